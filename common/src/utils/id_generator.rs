//! Unique ID generator.

use uuid::Uuid;

/// Generates unique identifiers.
pub struct IdGenerator;

impl IdGenerator {
    /// Generates a request ID for the `x-request-id` header.
    pub fn request_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Generates a short unique ID (first 8 characters of a UUID),
    /// used in export file names.
    pub fn short_id() -> String {
        Uuid::new_v4().to_string()[..8].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_ids_are_unique() {
        assert_ne!(IdGenerator::request_id(), IdGenerator::request_id());
    }

    #[test]
    fn short_id_has_eight_chars() {
        assert_eq!(IdGenerator::short_id().len(), 8);
    }
}
