//! Cloud preference configuration models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::SingletonEntity;

/// Target cloud provider.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum CloudProvider {
    /// Amazon Web Services.
    Aws,
    /// Microsoft Azure.
    Azure,
    /// Google Cloud Platform.
    Gcp,
}

impl CloudProvider {
    /// Flagship compute/database/storage services, used for advisory text.
    pub fn core_services(&self) -> [&'static str; 3] {
        match self {
            CloudProvider::Aws => ["EC2", "RDS", "S3"],
            CloudProvider::Azure => ["Virtual Machines", "SQL Database", "Blob Storage"],
            CloudProvider::Gcp => ["Compute Engine", "Cloud SQL", "Cloud Storage"],
        }
    }
}

impl std::fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CloudProvider::Aws => write!(f, "AWS"),
            CloudProvider::Azure => write!(f, "Azure"),
            CloudProvider::Gcp => write!(f, "GCP"),
        }
    }
}

/// Singleton record describing the target cloud environment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CloudPreferenceItem {
    /// Unique record identifier.
    pub id: i64,
    /// Target provider.
    pub provider: CloudProvider,
    /// Primary region (e.g. "eu-central-1").
    pub region: String,
    /// Services the organisation prefers to land on.
    #[serde(default)]
    pub preferred_services: Vec<String>,
    /// Network topology (e.g. "Virtual Private Cloud (VPC)").
    pub network_config: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create/update payload for the cloud preference record.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CloudPreferenceDraft {
    /// Target provider.
    pub provider: CloudProvider,
    /// Primary region.
    #[validate(length(min = 1, message = "region is required"))]
    pub region: String,
    /// Preferred services.
    #[serde(default)]
    pub preferred_services: Vec<String>,
    /// Network topology.
    #[validate(length(min = 1, message = "network_config is required"))]
    pub network_config: String,
}

impl SingletonEntity for CloudPreferenceItem {
    const PATH: &'static str = "cloud-preferences";
    const ENTITY: &'static str = "cloud preference";

    type Draft = CloudPreferenceDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn to_draft(&self) -> CloudPreferenceDraft {
        CloudPreferenceDraft {
            provider: self.provider,
            region: self.region.clone(),
            preferred_services: self.preferred_services.clone(),
            network_config: self.network_config.clone(),
        }
    }
}
