// umistat-api: Async Rust client for the Umami website-analytics share API

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::ShareClient;
pub use error::Error;
pub use transport::TransportConfig;
pub use types::{ShareCredential, StatsSnapshot, StatsWindow};
