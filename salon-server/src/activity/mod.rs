//! Activity event fan-out
//!
//! Every committed scheduling mutation may emit an [`ActivityEvent`]
//! (who, what, when) on a broadcast channel. A background worker forwards
//! events to the log sink. Emission is fire-and-forget: a slow, absent or
//! failed sink never blocks or rolls back a scheduling transaction.

use serde::Serialize;
use shared::models::Appointment;
use shared::util;
use tokio::sync::broadcast;

/// A single activity-trail entry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    /// Dotted action name, e.g. `appointment.checked_out`
    pub action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workstation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    /// Operator display name as provided by the caller
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    /// Unix millis
    pub timestamp: i64,
}

impl ActivityEvent {
    pub fn new(action: &'static str) -> Self {
        Self {
            action,
            appointment_id: None,
            workstation_id: None,
            customer_id: None,
            operator: None,
            timestamp: util::now_millis(),
        }
    }

    /// Event describing an appointment mutation
    pub fn appointment(
        action: &'static str,
        appointment: &Appointment,
        operator: Option<&str>,
    ) -> Self {
        Self {
            appointment_id: Some(appointment.id.clone()),
            workstation_id: appointment.workstation_id.clone(),
            customer_id: Some(appointment.customer_id.clone()),
            operator: operator.map(str::to_string),
            ..Self::new(action)
        }
    }

    /// Event describing a workstation mutation
    pub fn workstation(action: &'static str, workstation_id: &str, operator: Option<&str>) -> Self {
        Self {
            workstation_id: Some(workstation_id.to_string()),
            operator: operator.map(str::to_string),
            ..Self::new(action)
        }
    }

    /// Event describing a customer-summary mutation
    pub fn customer(action: &'static str, customer_id: &str, operator: Option<&str>) -> Self {
        Self {
            customer_id: Some(customer_id.to_string()),
            operator: operator.map(str::to_string),
            ..Self::new(action)
        }
    }
}

/// Forward activity events to the log sink until the channel closes
pub async fn run_worker(mut rx: broadcast::Receiver<ActivityEvent>) {
    tracing::info!("Activity log worker started");

    loop {
        match rx.recv().await {
            Ok(event) => {
                tracing::info!(
                    target: "activity",
                    action = event.action,
                    appointment_id = event.appointment_id.as_deref(),
                    workstation_id = event.workstation_id.as_deref(),
                    customer_id = event.customer_id.as_deref(),
                    operator = event.operator.as_deref(),
                    timestamp = event.timestamp,
                    "activity"
                );
            }
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                tracing::warn!(missed, "Activity worker lagged, events dropped");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }

    tracing::info!("Activity channel closed, worker stopping");
}
