//! Workstation entity

use serde::{Deserialize, Serialize};

/// Workstation operational status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkstationStatus {
    #[default]
    Available,
    Occupied,
    Maintenance,
    OutOfOrder,
}

impl WorkstationStatus {
    /// Whether a confirmed appointment may check in here
    pub fn is_operable(&self) -> bool {
        matches!(self, WorkstationStatus::Available)
    }
}

/// Workstation entity (service bay)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workstation {
    pub id: String,
    /// Unique display name
    pub name: String,
    /// Category, e.g. "styling", "washing"
    pub kind: String,
    pub status: WorkstationStatus,
    /// At most one staff member, unique across all workstations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_staff_id: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create workstation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkstationCreate {
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub operator: Option<String>,
}

/// Update workstation payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkstationUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub status: Option<WorkstationStatus>,
    #[serde(default)]
    pub operator: Option<String>,
}

/// Staff assignment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignStaffRequest {
    pub staff_id: String,
    #[serde(default)]
    pub operator: Option<String>,
}
