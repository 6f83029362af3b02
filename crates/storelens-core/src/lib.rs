mod app_config;
mod config;
pub mod competitors;
pub mod contract;
pub mod export;
pub mod store;

pub use app_config::AppConfig;
pub use competitors::{Competitor, CompetitorAnalysisRequest, CompetitorAnalysisResult};
pub use config::{load_app_config, load_app_config_from_env};
pub use contract::{decode, decode_value, ContractError, ErrorBody};
pub use export::{ExportReceipt, HealthStatus, ServiceInfo};
pub use store::{
    ContactDetails, Faq, ImportantLink, PriceRange, Product, ProductCatalog, SocialHandles,
    StoreAnalysisRequest, StoreInsights,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
