use crate::adapters::DEFAULT_API_BASE;
use crate::config::{ApiKey, DEFAULT_CURRENCY, DEFAULT_INPUT, DEFAULT_OUTPUT, DEFAULT_TIMEOUT_SECONDS};
use crate::core::ConfigProvider;
use crate::utils::error::{LinkError, Result};
use crate::utils::validation::{
    validate_currency, validate_non_empty_string, validate_path, validate_range,
    validate_required_field, validate_url, Validate,
};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    pub stripe: StripeConfig,
    #[serde(default)]
    pub files: FilesConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeConfig {
    pub api_key: Option<ApiKey>,
    pub api_base: Option<String>,
    pub currency: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilesConfig {
    pub input_path: Option<String>,
    pub output_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    /// `compact` (default) or `json`
    pub format: Option<String>,
}

impl TomlConfig {
    /// Loads and parses a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => LinkError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => LinkError::IoError(e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| LinkError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .is_some_and(|f| f.eq_ignore_ascii_case("json"))
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        self.files.input_path.as_deref().unwrap_or(DEFAULT_INPUT)
    }

    fn output_path(&self) -> &str {
        self.files.output_path.as_deref().unwrap_or(DEFAULT_OUTPUT)
    }

    fn api_base(&self) -> &str {
        self.stripe.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }

    fn api_key(&self) -> Option<&str> {
        self.stripe.api_key.as_ref().map(ApiKey::expose)
    }

    fn currency(&self) -> &str {
        self.stripe.currency.as_deref().unwrap_or(DEFAULT_CURRENCY)
    }

    fn timeout_seconds(&self) -> u64 {
        self.stripe
            .timeout_seconds
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }
}

impl TomlConfig {
    /// Everything except the API key, which a dry run never uses.
    pub fn validate_for_dry_run(&self) -> Result<()> {
        validate_path("files.input_path", self.input_path())?;
        validate_path("files.output_path", self.output_path())?;
        validate_url("stripe.api_base", self.api_base())?;
        validate_currency("stripe.currency", self.currency())?;
        validate_range("stripe.timeout_seconds", self.timeout_seconds(), 1, 300)?;

        if let Some(format) = self.logging.as_ref().and_then(|l| l.format.as_deref()) {
            if !["compact", "json"].contains(&format.to_ascii_lowercase().as_str()) {
                return Err(LinkError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: format.to_string(),
                    reason: "Supported formats: compact, json".to_string(),
                });
            }
        }

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_for_dry_run()?;

        let key = validate_required_field("stripe.api_key", &self.stripe.api_key)?;
        validate_non_empty_string("stripe.api_key", key.expose())?;
        if key.expose().starts_with("${") {
            return Err(LinkError::MissingConfigError {
                field: format!("stripe.api_key (environment variable in {} is not set)", key.expose()),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = TomlConfig::from_toml_str(
            r#"
[stripe]
api_key = "sk_test_123"
"#,
        )
        .unwrap();

        assert_eq!(config.input_path(), "products.csv");
        assert_eq!(config.output_path(), "payment_links.csv");
        assert_eq!(config.currency(), "eur");
        assert_eq!(config.timeout_seconds(), 30);
        assert!(!config.verbose());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_placeholders_are_substituted() {
        std::env::set_var("PAYMENT_LINKS_TEST_KEY", "sk_test_from_env");

        let config = TomlConfig::from_toml_str(
            r#"
[stripe]
api_key = "${PAYMENT_LINKS_TEST_KEY}"
currency = "usd"

[files]
input_path = "in/products.csv"
output_path = "out/links.csv"

[logging]
verbose = true
format = "json"
"#,
        )
        .unwrap();

        assert_eq!(config.api_key(), Some("sk_test_from_env"));
        assert_eq!(config.currency(), "usd");
        assert_eq!(config.output_path(), "out/links.csv");
        assert!(config.verbose());
        assert!(config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unset_placeholder_fails_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[stripe]
api_key = "${PAYMENT_LINKS_TEST_UNSET_VARIABLE}"
"#,
        )
        .unwrap();

        assert!(matches!(
            config.validate(),
            Err(LinkError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_dry_run_validation_skips_api_key() {
        let config = TomlConfig::from_toml_str(
            r#"
[stripe]
currency = "usd"
"#,
        )
        .unwrap();

        assert!(config.validate_for_dry_run().is_ok());
        assert!(matches!(
            config.validate(),
            Err(LinkError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_dry_run_validation_still_checks_settings() {
        let config = TomlConfig::from_toml_str(
            r#"
[stripe]
currency = "euro"
"#,
        )
        .unwrap();

        assert!(config.validate_for_dry_run().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[stripe\napi_key = 1").unwrap_err();
        assert!(matches!(err, LinkError::ConfigValidationError { .. }));
    }
}
