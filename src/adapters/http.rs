use crate::domain::model::Metadata;
use crate::domain::ports::{ConfigProvider, PaymentGateway};
use crate::utils::error::{LinkError, Result};
use crate::utils::validation::validate_required_field;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";

#[derive(Debug, Deserialize)]
struct CreatedResource {
    id: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    message: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    code: Option<String>,
}

/// Stripe REST client speaking form-encoded POSTs with bearer auth.
pub struct StripeGateway {
    client: Client,
    api_base: String,
    api_key: String,
}

impl StripeGateway {
    pub fn new(api_base: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("payment-links/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LinkError::ConfigError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let api_key = config.api_key();
        let api_key = validate_required_field("api_key", &api_key)?;
        Self::new(
            config.api_base(),
            api_key,
            Duration::from_secs(config.timeout_seconds()),
        )
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T> {
        let endpoint = format!("{}{}", self.api_base, path);
        tracing::debug!("POST {} ({} form fields)", endpoint, params.len());

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .form(params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!("{} responded {}", endpoint, status);

        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(envelope) => describe_error(envelope.error),
                Err(_) if body.trim().is_empty() => status.to_string(),
                Err(_) => body,
            };
            return Err(LinkError::RemoteError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn create(&self, path: &str, params: &[(String, String)]) -> Result<CreatedResource> {
        self.post_form(path, params).await
    }
}

fn describe_error(error: StripeErrorBody) -> String {
    let message = error
        .message
        .unwrap_or_else(|| "no message provided".to_string());
    match (error.kind, error.code) {
        (Some(kind), Some(code)) => format!("{} ({}/{})", message, kind, code),
        (Some(kind), None) => format!("{} ({})", message, kind),
        (None, Some(code)) => format!("{} ({})", message, code),
        (None, None) => message,
    }
}

fn metadata_params<'a>(
    prefix: &str,
    metadata: &'a Metadata,
) -> impl Iterator<Item = (String, String)> + 'a {
    let prefix = prefix.to_string();
    metadata
        .iter()
        .map(move |(key, value)| (format!("{}[{}]", prefix, key), value.clone()))
}

fn require(field: Option<String>, endpoint: &str, name: &str) -> Result<String> {
    field.ok_or_else(|| LinkError::UnexpectedResponse {
        endpoint: endpoint.to_string(),
        field: name.to_string(),
    })
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_product(&self, name: &str, metadata: &Metadata) -> Result<String> {
        let mut params = vec![("name".to_string(), name.to_string())];
        params.extend(metadata_params("metadata", metadata));

        let product = self.create("/v1/products", &params).await?;
        require(product.id, "/v1/products", "id")
    }

    async fn create_price(
        &self,
        product_id: &str,
        unit_amount: i64,
        currency: &str,
    ) -> Result<String> {
        let params = vec![
            ("unit_amount".to_string(), unit_amount.to_string()),
            ("currency".to_string(), currency.to_lowercase()),
            ("product".to_string(), product_id.to_string()),
        ];

        let price = self.create("/v1/prices", &params).await?;
        require(price.id, "/v1/prices", "id")
    }

    async fn create_payment_link(
        &self,
        price_id: &str,
        quantity: u32,
        metadata: &Metadata,
        description: &str,
    ) -> Result<String> {
        let mut params = vec![
            ("line_items[0][price]".to_string(), price_id.to_string()),
            ("line_items[0][quantity]".to_string(), quantity.to_string()),
        ];
        params.extend(metadata_params("metadata", metadata));
        params.extend(metadata_params("payment_intent_data[metadata]", metadata));
        params.push((
            "payment_intent_data[description]".to_string(),
            description.to_string(),
        ));

        let link = self.create("/v1/payment_links", &params).await?;
        require(link.url, "/v1/payment_links", "url")
    }
}
