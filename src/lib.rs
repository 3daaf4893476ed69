pub mod api;
pub mod herodraft;
pub mod logging;
pub mod utils;
