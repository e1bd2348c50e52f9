use crate::domain::model::Metadata;
use crate::domain::ports::PaymentGateway;
use crate::utils::error::Result;

/// Amount in the currency's smallest unit. Truncates toward zero, so
/// sub-cent digits are dropped rather than rounded.
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).trunc() as i64
}

pub struct LinkCreator<G: PaymentGateway> {
    pub(crate) gateway: G,
    currency: String,
}

impl<G: PaymentGateway> LinkCreator<G> {
    pub fn new(gateway: G, currency: impl Into<String>) -> Self {
        Self {
            gateway,
            currency: currency.into(),
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Product, then price, then payment link. The first failing call ends
    /// the attempt for this product; nothing is retried.
    pub async fn create(&self, name: &str, amount: f64, metadata: &Metadata) -> Result<String> {
        let unit_amount = to_minor_units(amount);

        let product_id = self.gateway.create_product(name, metadata).await?;
        tracing::debug!("Created product {} for '{}'", product_id, name);

        let price_id = self
            .gateway
            .create_price(&product_id, unit_amount, &self.currency)
            .await?;
        tracing::debug!(
            "Created price {} ({} {}) for '{}'",
            price_id,
            unit_amount,
            self.currency,
            name
        );

        self.gateway
            .create_payment_link(&price_id, 1, metadata, name)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::LinkError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingGateway {
        calls: Mutex<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    impl RecordingGateway {
        fn failing_on(step: &'static str) -> Self {
            Self {
                fail_on: Some(step),
                ..Default::default()
            }
        }

        fn record(&self, step: &'static str, detail: String) -> Result<()> {
            self.calls.lock().unwrap().push(format!("{}:{}", step, detail));
            if self.fail_on == Some(step) {
                return Err(LinkError::RemoteError {
                    status: 400,
                    message: format!("{} rejected", step),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl PaymentGateway for RecordingGateway {
        async fn create_product(&self, name: &str, metadata: &Metadata) -> Result<String> {
            self.record("product", format!("{}/{}", name, metadata.len()))?;
            Ok("prod_1".to_string())
        }

        async fn create_price(
            &self,
            product_id: &str,
            unit_amount: i64,
            currency: &str,
        ) -> Result<String> {
            self.record("price", format!("{}/{}/{}", product_id, unit_amount, currency))?;
            Ok("price_1".to_string())
        }

        async fn create_payment_link(
            &self,
            price_id: &str,
            quantity: u32,
            _metadata: &Metadata,
            description: &str,
        ) -> Result<String> {
            self.record("link", format!("{}/{}/{}", price_id, quantity, description))?;
            Ok("https://pay.example/abc".to_string())
        }
    }

    #[test]
    fn test_minor_units_truncate() {
        assert_eq!(to_minor_units(15.99), 1599);
        assert_eq!(to_minor_units(9.99), 999);
        assert_eq!(to_minor_units(50.0), 5000);
        assert_eq!(to_minor_units(0.005), 0);
        assert_eq!(to_minor_units(1.999), 199);
        assert_eq!(to_minor_units(0.0), 0);
    }

    #[tokio::test]
    async fn test_create_chains_three_calls() {
        let creator = LinkCreator::new(RecordingGateway::default(), "eur");
        let mut metadata = Metadata::new();
        metadata.insert("name".to_string(), "Widget".to_string());

        let url = creator.create("Widget", 15.99, &metadata).await.unwrap();

        assert_eq!(url, "https://pay.example/abc");
        let calls = creator.gateway.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![
                "product:Widget/1",
                "price:prod_1/1599/eur",
                "link:price_1/1/Widget",
            ]
        );
    }

    #[tokio::test]
    async fn test_failure_stops_remaining_calls() {
        let creator = LinkCreator::new(RecordingGateway::failing_on("price"), "eur");

        let err = creator
            .create("Widget", 9.99, &Metadata::new())
            .await
            .unwrap_err();

        assert!(err.is_row_recoverable());
        let calls = creator.gateway.calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|c| !c.starts_with("link")));
    }
}
