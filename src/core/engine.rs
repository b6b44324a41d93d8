use crate::core::{Pipeline, RunSummary};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use chrono::Utc;

pub struct OrganizerEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> OrganizerEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn run(&self) -> Result<RunSummary> {
        let started_at = Utc::now();
        tracing::info!("🚀 Starting content organization");
        self.monitor.log_stats("Start");

        // 展開壓縮檔
        tracing::info!("📦 Expanding archives...");
        let expansion = self.pipeline.extract()?;
        tracing::info!(
            "Expanded {} archive(s), {} failed",
            expansion.expanded.len(),
            expansion.failed.len()
        );
        for failure in &expansion.failed {
            tracing::warn!(
                "⚠️ Archive left in place: {} ({:?}): {}",
                failure.path.display(),
                failure.kind,
                failure.message
            );
        }
        self.monitor.log_stats("Expand");

        // 攤平複製
        tracing::info!("🗂️ Flattening staging directory...");
        let flattened = self.pipeline.transform()?;
        tracing::info!(
            "Copied {} file(s) into {}",
            flattened.routed.len(),
            flattened.destination.display()
        );
        self.monitor.log_stats("Flatten");

        // 寫入 manifest
        tracing::info!("📝 Writing manifest...");
        let manifest_path = self.pipeline.load(&flattened)?;
        tracing::info!("Manifest saved to: {}", manifest_path.display());
        self.monitor.log_final_stats();

        Ok(RunSummary {
            identifier: flattened.identifier.clone(),
            expansion,
            flattened,
            manifest_path,
            started_at,
            finished_at: Utc::now(),
        })
    }
}
