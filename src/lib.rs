pub mod breakdown;
pub mod cfr;
pub mod config;
pub mod fetch;
pub mod logging;
pub mod render;
