#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use serde::Deserialize;
use std::fmt;

pub const DEFAULT_INPUT: &str = "products.csv";
pub const DEFAULT_OUTPUT: &str = "payment_links.csv";
pub const DEFAULT_CURRENCY: &str = "eur";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const API_KEY_ENV: &str = "STRIPE_API_KEY";

/// Secret key for the payment service. Never printed.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<String> for ApiKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_debug_is_redacted() {
        let key = ApiKey::from("sk_live_secret".to_string());
        let printed = format!("{:?}", key);

        assert!(!printed.contains("sk_live_secret"));
        assert_eq!(key.expose(), "sk_live_secret");
    }
}
