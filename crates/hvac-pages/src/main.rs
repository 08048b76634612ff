mod assets;
mod batch;
mod classifier;
mod config;
mod content;
mod error;
mod format;
mod manifest;
mod model;
mod parser;
mod render;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use hvac_common::store::SpecStore;

use batch::{BatchDriver, RunMode};
use classifier::Classifier;
use config::{Cli, Config, Mode};
use content::{Branding, ContentAssembler};
use render::{ComplianceFooter, PageRenderer};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "run aborted");
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let config = Config::from_cli(cli)?;
    info!(
        product_line = %config.product_line.id,
        specs = %config.specs_path.display(),
        skus = %config.skus_path.display(),
        output = %config.output_dir.display(),
        threshold = config.threshold,
        mode = ?config.mode,
        "configuration loaded"
    );

    let store = SpecStore::load(&config.specs_path, config.catalog.model_aliases())
        .with_context(|| format!("loading spec table {}", config.specs_path.display()))?;

    let classifier = Classifier::new(config.catalog.prefix_table());
    for rule in classifier.table().shadowed() {
        warn!(prefix = %rule.prefix, category = %rule.category, "prefix rule can never match");
    }

    let branding = Branding {
        brand: config.product_line.brand.clone(),
        refrigerant: config.product_line.refrigerant.clone(),
    };
    let renderer = PageRenderer::new(
        ContentAssembler::new(branding),
        ComplianceFooter::new(config.threshold),
    );
    let run_mode = match config.mode {
        Mode::DryRun => RunMode::DryRun,
        Mode::Generate | Mode::ValidateOnly => RunMode::Write,
    };
    let driver = BatchDriver::new(
        &config.product_line.id,
        config.product_line.rating,
        classifier,
        renderer,
        run_mode,
    )?;

    if config.mode == Mode::ValidateOnly {
        let report = driver.validate(&config.skus_path, &store)?;
        println!(
            "{} entries checked, {} rejected lines",
            report.entries, report.rejected_lines
        );
        for sku in &report.unknown_skus {
            println!("  unknown SKU: {sku}");
        }
        for model in &report.missing_models {
            println!("  missing spec: {model}");
        }
        return Ok(if report.is_valid() {
            println!("all SKUs resolve");
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        });
    }

    let summary = driver.run_all(&config.skus_path, &store, &config.output_dir)?;
    let verb = if run_mode == RunMode::DryRun { "would generate" } else { "generated" };
    println!("{verb} {} pages, {} failed", summary.success, summary.failed);
    for failure in &summary.failures {
        println!("  line {}: {} ({})", failure.line, failure.skus, failure.reason);
    }
    if let Some(path) = &summary.manifest {
        println!("manifest: {}", path.display());
    }

    Ok(if summary.all_succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
