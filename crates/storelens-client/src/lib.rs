pub mod client;
pub mod error;
mod operation;
mod settings;

pub use client::InsightsClient;
pub use error::ClientError;
pub use settings::{ClientSettings, DEFAULT_BASE_URL};
