use std::sync::Arc;

use crate::core::Config;
use crate::scheduling::{ScheduleStore, SchedulingService};

/// Server state - shared handles to all services
///
/// Cheap to clone; the scheduler is behind an `Arc` and the store inside
/// it shares one database handle.
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// The scheduling core
    pub scheduler: Arc<SchedulingService>,
}

impl ServerState {
    /// Initialize state: working directory, store, scheduling service
    pub fn initialize(config: &Config) -> anyhow::Result<Self> {
        config.ensure_work_dir_structure()?;
        let store = ScheduleStore::open(config.database_path())?;
        let scheduler = Arc::new(SchedulingService::new(store));
        tracing::info!(
            db = %config.database_path().display(),
            "Scheduling store opened"
        );
        Ok(Self {
            config: config.clone(),
            scheduler,
        })
    }

    pub fn scheduler(&self) -> &SchedulingService {
        &self.scheduler
    }
}
