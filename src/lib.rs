//! Descriptive statistics over bike-share trip data, filtered by city,
//! month and day of week.

pub mod analyzers;
pub mod config;
pub mod filter;
pub mod loader;
pub mod output;
pub mod prompt;
pub mod session;
pub mod trip;
