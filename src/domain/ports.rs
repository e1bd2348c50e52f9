use crate::domain::model::{LinkRequest, Metadata, ProductTable, RunSummary, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn api_base(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn currency(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
}

/// The three remote operations needed to publish one payment link.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Returns the new product's id.
    async fn create_product(&self, name: &str, metadata: &Metadata) -> Result<String>;

    /// Returns the new price's id.
    async fn create_price(&self, product_id: &str, unit_amount: i64, currency: &str)
        -> Result<String>;

    /// Returns the shareable URL of the new payment link.
    async fn create_payment_link(
        &self,
        price_id: &str,
        quantity: u32,
        metadata: &Metadata,
        description: &str,
    ) -> Result<String>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ProductTable>;
    async fn transform(&self, table: ProductTable) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<RunSummary>;

    /// Validates the table without touching the remote service.
    fn plan(&self, table: &ProductTable) -> Vec<LinkRequest>;
}
