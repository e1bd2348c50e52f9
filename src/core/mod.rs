pub mod etl;
pub mod link_creator;
pub mod pipeline;
pub mod reader;
pub mod writer;

pub use crate::domain::model::{
    LinkRequest, Metadata, ProductTable, Row, RunSummary, TransformResult,
};
pub use crate::domain::ports::{ConfigProvider, PaymentGateway, Pipeline, Storage};
pub use crate::utils::error::Result;
