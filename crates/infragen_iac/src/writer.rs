//! Writing generated Terraform to disk.

use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::error::IacResult;
use crate::generator::GeneratedOutput;

/// File name of the generated configuration inside each provider directory.
pub const OUTPUT_FILE: &str = "main.tf";

/// Writes generated output as `<output_dir>/<provider>/main.tf`.
pub struct OutputWriter {
    output_dir: PathBuf,
}

impl OutputWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Where output for `provider` lands.
    pub fn target_path(&self, provider: &str) -> PathBuf {
        self.output_dir.join(provider).join(OUTPUT_FILE)
    }

    /// Write `output`, replacing any previous file, and return its path.
    pub fn write(&self, output: &GeneratedOutput) -> IacResult<PathBuf> {
        let provider_dir = self.output_dir.join(output.provider.as_str());
        fs::create_dir_all(&provider_dir)?;

        let path = provider_dir.join(OUTPUT_FILE);
        fs::write(&path, output.content())?;

        info!(
            "Wrote {} resources to {}",
            output.resource_count(),
            path.display()
        );
        Ok(path)
    }
}
