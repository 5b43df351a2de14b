//! CLI command definitions.

use clap::{Parser, Subcommand};

pub mod generate;
pub mod plan;

/// infragen - Terraform generation for AWS, Azure and Google Cloud
#[derive(Parser)]
#[command(name = "infragen")]
#[command(version, about = "infragen - Terraform generation for AWS, Azure and Google Cloud")]
#[command(long_about = r#"
infragen turns a declarative list of cloud resources into Terraform, wiring
resources to each other with reference expressions. Networking resources are
emitted first so everything else can refer to them.

COMMANDS:
  generate  → Render <output>/<provider>/main.tf from a configuration
  plan      → Show emission order and wiring without rendering

CREDENTIALS (read from the environment by `generate`):
  aws      AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY
  azurerm  ARM_SUBSCRIPTION_ID, ARM_TENANT_ID, ARM_CLIENT_ID, ARM_CLIENT_SECRET
  google   GCP_PROJECT_ID, GOOGLE_APPLICATION_CREDENTIALS

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid configuration or arguments
  3 - Unsupported provider or missing dependency
  4 - Template error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate Terraform from a configuration file
    Generate(generate::GenerateArgs),

    /// Show the generation plan for a configuration file
    Plan(plan::PlanArgs),
}
