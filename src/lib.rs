pub mod args;
pub mod clock;
pub mod commands;
mod config;
mod error;
pub mod locale;
pub mod model;
pub mod storage;
pub mod store;
mod utils;


pub use config::Config;
pub use error::{Error, PersistError, Result};
pub use store::{SharedStore, TransactionStore};
