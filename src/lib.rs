pub mod config;
pub mod credentials;
pub mod fetch;
pub mod output;
pub mod provider;
pub mod scoring;
pub mod tba;
