use crate::core::Pipeline;
use crate::domain::model::{LinkRequest, RunSummary};
use crate::utils::error::Result;

pub struct LinkEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> LinkEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("📂 Reading products...");
        let table = self.pipeline.extract().await?;
        tracing::info!("📂 Read {} rows", table.rows.len());

        tracing::info!("🔗 Creating payment links...");
        let result = self.pipeline.transform(table).await?;
        tracing::info!(
            "🔗 Linked {} rows ({} invalid, {} failed)",
            result.linked_rows.len(),
            result.skipped_invalid,
            result.failed_remote
        );

        tracing::info!("💾 Writing output...");
        let summary = self.pipeline.load(result).await?;
        tracing::info!("💾 Output saved to: {}", summary.output_path);

        Ok(summary)
    }

    /// Reads and validates the input only.
    pub async fn dry_run(&self) -> Result<Vec<LinkRequest>> {
        let table = self.pipeline.extract().await?;
        let planned = self.pipeline.plan(&table);
        tracing::info!(
            "🔍 {} of {} rows would get a payment link",
            planned.len(),
            table.rows.len()
        );
        Ok(planned)
    }
}
