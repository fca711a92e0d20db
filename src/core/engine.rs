use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct GeneratorEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> GeneratorEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<String> {
        tracing::debug!("Discovering packages...");
        let report = self.pipeline.discover()?;
        tracing::debug!(
            "Discovered {} packages across {} workspaces",
            report.packages.len(),
            report.workspaces.len()
        );

        tracing::debug!("Assembling settings...");
        let fragment = self.pipeline.assemble(report)?;
        tracing::debug!(
            "Assembled {} extra paths",
            fragment.analysis_extra_paths.len()
        );

        let destination = self.pipeline.emit(fragment)?;
        tracing::debug!("Settings written to: {}", destination);

        Ok(destination)
    }
}
