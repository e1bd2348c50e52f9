use anyhow::Context;
use clap::Parser;
use payment_links::core::ConfigProvider;
use payment_links::utils::{logger, validation::Validate};
use payment_links::{LinkEngine, LocalStorage, PaymentLinkPipeline, StripeGateway, TomlConfig};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "toml-links")]
#[command(about = "Create Stripe payment links using a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "payment-links.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Dry run - show what would be processed without executing
    #[arg(long)]
    dry_run: bool,
}

fn load_config(path: &str, dry_run: bool) -> anyhow::Result<TomlConfig> {
    let config = TomlConfig::from_file(path)
        .with_context(|| format!("Failed to load config file '{}'", path))?;
    let validated = if dry_run {
        config.validate_for_dry_run()
    } else {
        config.validate()
    };
    validated.with_context(|| format!("Invalid configuration in '{}'", path))?;
    Ok(config)
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match load_config(&args.config, args.dry_run) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            eprintln!("💡 Make sure the file exists, is valid TOML and sets [stripe] api_key");
            std::process::exit(1);
        }
    };

    if config.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose || config.verbose());
    }

    tracing::info!("🚀 Starting TOML-based payment-links run");
    tracing::info!(
        "📁 {} -> {} ({})",
        config.input_path(),
        config.output_path(),
        config.currency()
    );

    // A dry run never calls out, so it may go without a key.
    let gateway = if args.dry_run {
        StripeGateway::new(
            config.api_base(),
            config.api_key().unwrap_or_default(),
            Duration::from_secs(config.timeout_seconds()),
        )
    } else {
        StripeGateway::from_config(&config)
    };
    let gateway = match gateway {
        Ok(gateway) => gateway,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    let pipeline = PaymentLinkPipeline::new(LocalStorage::default(), config, gateway);
    let engine = LinkEngine::new(pipeline);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - Stripe will not be called");
        if let Err(e) = engine.dry_run().await {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
        return;
    }

    match engine.run().await {
        Ok(summary) => {
            tracing::info!(
                "✅ {} of {} rows linked",
                summary.links_created,
                summary.rows_read
            );
            println!(
                "🎉 Successfully wrote {} payment links to '{}'",
                summary.links_created, summary.output_path
            );
        }
        Err(e) => {
            tracing::error!("❌ Run failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}
