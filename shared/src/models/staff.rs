//! Staff member, the subset of the user entity read by scheduling

use serde::{Deserialize, Serialize};

/// Staff role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StaffRole {
    #[default]
    Staff,
    Manager,
    Receptionist,
}

impl StaffRole {
    /// Only staff and managers may be bound to a workstation
    pub fn is_assignable(&self) -> bool {
        matches!(self, StaffRole::Staff | StaffRole::Manager)
    }
}

/// Staff member entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: String,
    pub name: String,
    pub role: StaffRole,
    pub created_at: i64,
}

/// Create staff payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffCreate {
    pub name: String,
    #[serde(default)]
    pub role: StaffRole,
    #[serde(default)]
    pub operator: Option<String>,
}
