pub mod config;
pub mod core;
pub mod errors;
pub mod insights;
pub mod models;
pub mod report;
pub mod state;
#[cfg(test)]
pub mod test_helpers;
