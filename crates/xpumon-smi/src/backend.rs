//! XpuSmiBackend - DeviceBackend over the vendor diagnostics CLI

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use xpumon_core::{
    Device, DeviceBackend, HealthSnapshot, ProcessSnapshot, Snapshot, StatsSnapshot,
};

use crate::command::CommandSpec;
use crate::config::SmiConfig;
use crate::executor::CommandExecutor;
use crate::parse;
use crate::runner::QueryRunner;

/// Device backend that shells out to `xpumcli` / `xpu-smi`
#[derive(Debug, Clone)]
pub struct XpuSmiBackend {
    runner: QueryRunner,
}

impl XpuSmiBackend {
    pub fn new(runner: QueryRunner) -> Self {
        Self { runner }
    }

    /// Backend spawning real processes
    pub fn from_config(config: &SmiConfig) -> Self {
        Self::new(QueryRunner::from_config(config))
    }

    pub fn with_executor(config: &SmiConfig, executor: Arc<dyn CommandExecutor>) -> Self {
        Self::new(QueryRunner::with_executor(config, executor))
    }

    async fn snapshot(&self, spec: CommandSpec) -> Snapshot {
        match self.runner.run_query(&spec).await {
            Some(output) => parse::snapshot(&output),
            None => {
                debug!(query = %spec.kind(), "No output, returning empty snapshot");
                Snapshot::new()
            }
        }
    }
}

#[async_trait]
impl DeviceBackend for XpuSmiBackend {
    async fn list_devices(&self) -> Vec<Device> {
        self.runner
            .run_query(&CommandSpec::discovery())
            .await
            .map(|output| parse::device_list(&output))
            .unwrap_or_default()
    }

    async fn get_stats(&self, device_id: &str) -> StatsSnapshot {
        self.snapshot(CommandSpec::stats(device_id)).await
    }

    async fn get_health(&self, device_id: &str) -> HealthSnapshot {
        self.snapshot(CommandSpec::health(device_id)).await
    }

    async fn get_processes(&self, device_id: &str) -> ProcessSnapshot {
        self.snapshot(CommandSpec::processes(device_id)).await
    }
}
