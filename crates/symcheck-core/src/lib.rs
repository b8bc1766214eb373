pub mod advisory;
pub mod config;
pub mod errors;
pub mod model;
pub mod providers;
pub mod templates;

pub mod report;
pub mod storage;

pub use advisory::AdvisoryPipeline;
pub use config::AppConfig;
pub use errors::{ConfigError, ProviderError, StorageError};
pub use model::{Advisory, GenerationParams, QueryRecord};
pub use storage::Store;
