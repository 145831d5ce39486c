use crate::core::Pipeline;
use crate::domain::model::BatchSummary;
use crate::utils::error::Result;
use crate::utils::monitor::ImportMonitor;

/// Outcome of one engine run, enough for the caller to report
/// "imported N of M files".
#[derive(Debug, Clone)]
pub struct RunReport {
    pub output_path: String,
    pub summary: BatchSummary,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: ImportMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: ImportMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("Starting report card import...");

        // Extract
        let documents = self.pipeline.extract().await?;
        tracing::info!("Extracted {} documents", documents.len());
        self.monitor.log_phase("Extract");

        // Transform
        let transformed = self.pipeline.transform(documents).await?;
        let summary = transformed.summary.clone();
        tracing::info!(
            "Accepted {} of {} documents ({} discarded)",
            summary.accepted,
            summary.total,
            summary.discarded
        );
        self.monitor.log_phase("Transform");

        // Load
        let output_path = self.pipeline.load(transformed).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_phase("Load");
        self.monitor.log_final(summary.total);

        Ok(RunReport {
            output_path,
            summary,
        })
    }
}
