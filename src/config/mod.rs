//! Configuration module for the org chart backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

use crate::loader::DataSource;

const DEFAULT_DATA_SOURCE: &str = "./data/employees.json";
const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 8080));
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the employee JSON is fetched from (file path or URL)
    pub data_source: DataSource,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Timeout for fetching the employee data over HTTP
    pub fetch_timeout: Duration,
    /// Settings that could not be parsed and fell back to their defaults.
    /// Read before logging is up, so `main` reports them afterwards.
    pub fallbacks: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut fallbacks = Vec::new();

        let data_source = DataSource::parse(
            &env::var("ORGCHART_DATA_SOURCE").unwrap_or_else(|_| DEFAULT_DATA_SOURCE.to_string()),
        );
        let bind_addr = parse_bind_addr(env::var("ORGCHART_BIND_ADDR").ok(), &mut fallbacks);
        let log_level = env::var("ORGCHART_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let fetch_timeout =
            parse_fetch_timeout(env::var("ORGCHART_FETCH_TIMEOUT_SECS").ok(), &mut fallbacks);

        Self {
            data_source,
            bind_addr,
            log_level,
            fetch_timeout,
            fallbacks,
        }
    }
}

fn parse_bind_addr(value: Option<String>, fallbacks: &mut Vec<String>) -> SocketAddr {
    let Some(value) = value else {
        return DEFAULT_BIND_ADDR;
    };
    value.trim().parse().unwrap_or_else(|_| {
        fallbacks.push(format!(
            "Invalid ORGCHART_BIND_ADDR {:?}, using {}",
            value, DEFAULT_BIND_ADDR
        ));
        DEFAULT_BIND_ADDR
    })
}

fn parse_fetch_timeout(value: Option<String>, fallbacks: &mut Vec<String>) -> Duration {
    let secs = match value {
        None => DEFAULT_FETCH_TIMEOUT_SECS,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            fallbacks.push(format!(
                "Invalid ORGCHART_FETCH_TIMEOUT_SECS {:?}, using {}",
                value, DEFAULT_FETCH_TIMEOUT_SECS
            ));
            DEFAULT_FETCH_TIMEOUT_SECS
        }),
    };
    Duration::from_secs(secs)
}
