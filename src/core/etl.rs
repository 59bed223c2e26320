use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct ExportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ExportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting gym export...");

        tracing::info!("Extracting gym rows...");
        let rows = self.pipeline.extract().await?;
        tracing::info!("Extracted {} rows", rows.len());

        tracing::info!("Transforming rows...");
        let document = self.pipeline.transform(rows).await?;
        tracing::info!("Transformed {} gyms", document.gyms.len());

        tracing::info!("Writing document...");
        let output_path = self.pipeline.load(document).await?;
        tracing::info!("Document written to: {}", output_path);

        Ok(output_path)
    }
}
