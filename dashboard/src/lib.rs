//! Component layer of the migration planning dashboard.
//!
//! Each screen of the tool is a self-contained panel owning its own
//! state: the generic [`inventory::InventoryPanel`] for the four CRUD
//! collections, [`config_form::SingletonForm`] for the two configuration
//! records, the viewers in [`analysis`] for backend-computed reports and
//! [`export::ExportPanel`] for report files. Panels never share state
//! with each other; everything they display comes from their own last
//! confirmed exchange with the backend.

pub mod analysis;
pub mod cli;
pub mod config_form;
pub mod export;
pub mod inventory;
pub mod render;
