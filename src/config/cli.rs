use crate::adapters::DEFAULT_API_BASE;
use crate::config::ApiKey;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_currency, validate_non_empty_string, validate_path, validate_range,
    validate_required_field, validate_url, Validate,
};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "payment-links")]
#[command(about = "Create a Stripe payment link for every product in a CSV file")]
pub struct CliConfig {
    /// CSV with at least `name` and `amount_usd` columns
    #[arg(short, long, default_value = super::DEFAULT_INPUT)]
    pub input: String,

    /// Where to write the rows that got a payment link
    #[arg(short, long, default_value = super::DEFAULT_OUTPUT)]
    pub output: String,

    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    #[arg(long, env = super::API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<ApiKey>,

    /// Currency code for every price
    #[arg(long, default_value = super::DEFAULT_CURRENCY)]
    pub currency: String,

    #[arg(long, default_value_t = super::DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Validate the input and show what would be created, without calling Stripe
    #[arg(long)]
    pub dry_run: bool,
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(ApiKey::expose)
    }

    fn currency(&self) -> &str {
        &self.currency
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        validate_path("output", &self.output)?;
        validate_url("api_base", &self.api_base)?;
        validate_currency("currency", &self.currency)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, 300)?;

        if !self.dry_run {
            let key = validate_required_field("api_key", &self.api_key)?;
            validate_non_empty_string("api_key", key.expose())?;
        }
        Ok(())
    }
}
