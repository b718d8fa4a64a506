//! Error handling for Stockwatch.
//! One error enum per concern, `thiserror` only, folded into `StockwatchError`.

pub mod config_error;
pub mod stockwatch_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use stockwatch_error::{StockwatchError, StockwatchResult};
pub use storage_error::StorageError;
