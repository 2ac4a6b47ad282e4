use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{HealthSummary, Id, PlantResponse, Reading};

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterDeviceRequest {
    /// Hardware identifier printed on the pot
    pub uuid: Uuid,
    /// Display name
    pub name: String,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignPlantRequest {
    /// Plant profile to assign
    pub plant_id: Id,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushTokenRequest {
    /// Expo push destination token
    pub push_token: String,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceResponse {
    /// Device identifier
    pub id: Id,
    /// Hardware identifier
    pub uuid: Uuid,
    /// Display name
    pub name: String,
    /// Registered push destination
    pub push_token: Option<String>,
    /// Latest sensor reading
    pub reading: Option<Reading>,
    /// Assigned plant profile
    pub plant: Option<PlantResponse>,
    /// Health labels, a projection of (reading, plant ranges)
    pub status: Option<HealthSummary>,
}
