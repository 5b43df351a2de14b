//! Plan command - Show emission order and wiring without rendering.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use infragen_iac::{GenerationConfig, GenerationPlan, TerraformGenerator};

#[derive(Args)]
pub struct PlanArgs {
    /// Configuration file (JSON, or YAML with a .yaml/.yml extension)
    #[arg(short, long, default_value = "config.json")]
    pub config: PathBuf,

    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: PlanArgs) -> Result<()> {
    let config = GenerationConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load configuration from {:?}", args.config))?;
    let warnings = config.lint();
    let plan = TerraformGenerator::plan(&config)?;

    if args.json {
        let report = serde_json::json!({
            "plan": plan,
            "warnings": warnings,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print!("{}", format_plan(&plan));
    if !warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &warnings {
            println!("  - {}", warning);
        }
    }

    Ok(())
}

fn format_plan(plan: &GenerationPlan) -> String {
    let mut out = format!("Provider: {}\n\n", plan.provider);

    out.push_str("Emission order:\n");
    for (index, entry) in plan.entries.iter().enumerate() {
        let wiring = if entry.wired { "" } else { " (pass-through)" };
        out.push_str(&format!(
            "  {:>2}. [{}] {}.{}{}\n",
            index + 1,
            entry.pass,
            entry.resource_type,
            entry.name,
            wiring
        ));
    }

    out.push_str("\nReferences:\n");
    if plan.references.is_empty() {
        out.push_str("  (none)\n");
    }
    for category in plan.references.categories() {
        out.push_str(&format!("  {}:\n", category));
        for (attribute, value) in plan.references.get(category) {
            out.push_str(&format!("    {} = {}\n", attribute, value));
        }
    }

    out
}
