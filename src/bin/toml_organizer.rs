use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use content_organizer::core::flatten::staging_dir;
use content_organizer::core::ConfigProvider;
use content_organizer::utils::error::ErrorSeverity;
use content_organizer::utils::{logger, validation::Validate};
use content_organizer::{OrganizerEngine, RunSummary, TomlConfig, WalkdirFinder};
use serde::Serialize;
use std::path::Path;

#[derive(Parser)]
#[command(name = "toml-organizer")]
#[command(about = "Organize a batch of downloaded content described in a TOML file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "organizer.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Write a JSON report of every run to this path
    #[arg(long)]
    report: Option<String>,
}

#[derive(Serialize)]
struct JobFailure {
    identifier: String,
    error: String,
}

#[derive(Serialize)]
struct BatchReport {
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    succeeded: Vec<RunSummary>,
    failed: Vec<JobFailure>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based content organizer");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let jobs = config.jobs();
    tracing::info!(
        "✅ Configuration loaded: {} content item(s) under {}",
        jobs.len(),
        config.organizer.base_dir
    );

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        for job in &jobs {
            let staging = staging_dir(Path::new(job.base_dir()), job.identifier());
            println!(
                "{} staging={} present={} expand_archives={} manifest_keys={}",
                job.identifier(),
                staging.display(),
                staging.is_dir(),
                job.expand_archives(),
                job.descriptor.len()
            );
        }
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let started_at = Utc::now();
    let mut succeeded = Vec::new();
    let mut failed = Vec::new();
    let mut worst_severity: Option<ErrorSeverity> = None;

    // 依序處理，單一內容失敗不影響其他內容
    for job in jobs {
        let identifier = job.identifier.clone();
        let pipeline = job.into_pipeline(WalkdirFinder::new());
        let engine = OrganizerEngine::new_with_monitoring(pipeline, monitor_enabled);

        match engine.run() {
            Ok(summary) => {
                tracing::info!("✅ {} organized", identifier);
                succeeded.push(summary);
            }
            Err(e) => {
                tracing::error!(
                    "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
                    identifier,
                    e,
                    e.category(),
                    e.severity()
                );
                tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
                worst_severity = worst_severity.max(Some(e.severity()));
                failed.push(JobFailure {
                    identifier,
                    error: e.user_friendly_message(),
                });
            }
        }
    }

    println!(
        "✅ {} organized, ❌ {} failed",
        succeeded.len(),
        failed.len()
    );

    if let Some(report_path) = &args.report {
        let report = BatchReport {
            started_at,
            finished_at: Utc::now(),
            succeeded,
            failed,
        };
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(report_path, json)
            .with_context(|| format!("Failed to write report '{}'", report_path))?;
        println!("📁 Report saved to: {}", report_path);
    }

    // 以最嚴重的錯誤決定結束碼
    let exit_code = worst_severity.map(ErrorSeverity::exit_code).unwrap_or(0);
    if exit_code > 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}
