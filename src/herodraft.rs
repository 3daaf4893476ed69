//! The shared drafting round and everything it is built from.

pub mod catalog;
pub mod config;
pub mod coordinator;
pub mod drawer;
pub mod error;
pub mod round;
pub mod settings;
pub mod store;

pub use catalog::HeroCatalog;
pub use coordinator::{Assignment, RoundCoordinator};
pub use error::DraftError;
pub use settings::DraftSettings;
