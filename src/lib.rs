pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{LocalStorage, StripeGateway};
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use core::{etl::LinkEngine, pipeline::PaymentLinkPipeline};
pub use utils::error::{LinkError, Result};
