use clap::Parser;
use payment_links::core::ConfigProvider;
use payment_links::utils::{logger, validation::Validate};
use payment_links::{CliConfig, LinkEngine, LocalStorage, PaymentLinkPipeline, StripeGateway};
use std::time::Duration;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("🚀 Starting payment-links");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    // Validation guarantees a key unless this is a dry run, which never calls out.
    let gateway = match StripeGateway::new(
        config.api_base(),
        config.api_key().unwrap_or_default(),
        Duration::from_secs(config.timeout_seconds()),
    ) {
        Ok(gateway) => gateway,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    let dry_run = config.dry_run;
    let pipeline = PaymentLinkPipeline::new(LocalStorage::default(), config, gateway);
    let engine = LinkEngine::new(pipeline);

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - Stripe will not be called");
        match engine.dry_run().await {
            Ok(planned) => println!("🔍 {} rows would get a payment link", planned.len()),
            Err(e) => {
                eprintln!("❌ {}", e.user_friendly_message());
                std::process::exit(e.exit_code());
            }
        }
        return;
    }

    match engine.run().await {
        Ok(summary) => {
            println!(
                "🎉 Successfully wrote {} payment links to '{}'",
                summary.links_created, summary.output_path
            );
            let skipped = summary.skipped_invalid + summary.failed_remote;
            if skipped > 0 {
                println!(
                    "⚠️ {} of {} rows were skipped ({} invalid, {} failed at Stripe)",
                    skipped, summary.rows_read, summary.skipped_invalid, summary.failed_remote
                );
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}
