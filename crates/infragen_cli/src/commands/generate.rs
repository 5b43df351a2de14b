//! Generate command - Render Terraform for a configuration.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tracing::warn;

use infragen_iac::{Credentials, GenerationConfig, OutputWriter, TerraformGenerator};
use infragen_templates::TemplateLoader;

#[derive(Args)]
pub struct GenerateArgs {
    /// Configuration file (JSON, or YAML with a .yaml/.yml extension)
    #[arg(short, long, default_value = "config.json")]
    pub config: PathBuf,

    /// Templates directory containing <provider>/<type>.j2 files
    #[arg(short, long, default_value = "templates")]
    pub templates: PathBuf,

    /// Output directory; files are written to <output>/<provider>/main.tf
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,

    /// Print the generated Terraform instead of writing it
    #[arg(long)]
    pub stdout: bool,
}

pub async fn execute(args: GenerateArgs) -> Result<()> {
    let config = GenerationConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load configuration from {:?}", args.config))?;

    // Reject unknown providers before reading credentials or templates.
    let provider = config.cloud_provider()?;

    for warning in config.lint() {
        warn!("{}", warning);
    }

    let renderer = TemplateLoader::new(&args.templates)
        .load_provider_only(provider.as_str())
        .context("Failed to load templates")?;

    let generator =
        TerraformGenerator::new(Arc::new(renderer)).with_credentials(Credentials::from_env());
    let output = generator
        .generate(&config)
        .with_context(|| format!("Generation failed for {:?}", args.config))?;

    if args.stdout {
        print!("{}", output);
        return Ok(());
    }

    let path = OutputWriter::new(&args.output).write(&output)?;
    println!(
        "Generated {} resources for {} → {}",
        output.resource_count(),
        provider,
        path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn templates_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../templates")
    }

    #[tokio::test]
    async fn test_generate_writes_main_tf() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("config.json");
        fs::write(
            &config,
            r#"{"provider": "google", "region": "us-central1", "resources": [{"type": "compute_network", "name": "vpc"}]}"#,
        )
        .unwrap();

        let args = GenerateArgs {
            config,
            templates: templates_dir(),
            output: dir.path().join("out"),
            stdout: false,
        };
        execute(args).await.unwrap();

        let content = fs::read_to_string(dir.path().join("out/google/main.tf")).unwrap();
        assert!(content.starts_with("provider \"google\" {"));
        assert!(content.contains("resource \"google_compute_network\" \"vpc\""));
    }

    #[tokio::test]
    async fn test_generate_missing_dependency_writes_nothing() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("config.yaml");
        fs::write(&config, "provider: aws\nresources:\n  - type: subnet\n    name: app\n").unwrap();

        let args = GenerateArgs {
            config,
            templates: templates_dir(),
            output: dir.path().join("out"),
            stdout: false,
        };
        let err = execute(args).await.unwrap_err();

        assert!(format!("{:#}", err).contains("Subnet app requires a vpc_name"));
        assert!(!dir.path().join("out").exists());
    }

    #[tokio::test]
    async fn test_generate_unknown_provider_skips_templates() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("config.json");
        fs::write(&config, r#"{"provider": "oracle", "resources": []}"#).unwrap();

        let args = GenerateArgs {
            config,
            templates: dir.path().join("no-templates-here"),
            output: dir.path().join("out"),
            stdout: false,
        };
        let err = execute(args).await.unwrap_err();

        assert!(err.to_string().contains("Unsupported provider: oracle"));
    }
}
