use clap::Parser;
use content_organizer::utils::{logger, validation::Validate};
use content_organizer::{CliConfig, ContentPipeline, OrganizerEngine, WalkdirFinder};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting content-organizer");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let descriptor = match config.load_descriptor() {
        Ok(descriptor) => descriptor,
        Err(e) => {
            tracing::error!("❌ Failed to build manifest: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code().max(1));
        }
    };

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let pipeline = ContentPipeline::new(WalkdirFinder::new(), config, descriptor);
    let engine = OrganizerEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run() {
        Ok(summary) => {
            tracing::info!("✅ Content {} organized", summary.identifier);
            println!("✅ Content organized: {}", summary.flattened.destination.display());
            println!("📁 Manifest saved to: {}", summary.manifest_path.display());
            if !summary.expansion.is_clean() {
                println!(
                    "⚠️ {} archive(s) could not be expanded:",
                    summary.expansion.failed.len()
                );
                for failure in &summary.expansion.failed {
                    println!("   - {} ({:?})", failure.path.display(), failure.kind);
                }
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Organization failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}
