use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    /// Remote GraphQL endpoint for the front end. `None` executes against the local schema.
    pub graphql_url: Option<String>,
    pub http_timeout: Duration,
    pub notice_ttl: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "4000".to_string()).parse().context("PORT")?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://moviegraph.db?mode=rwc".to_string());

        let graphql_url = std::env::var("GRAPHQL_URL")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let http_timeout_secs: u64 =
            std::env::var("HTTP_TIMEOUT_SECS").ok().and_then(|s| s.parse().ok()).unwrap_or(30);

        let notice_secs: u64 =
            std::env::var("NOTICE_SECS").ok().and_then(|s| s.parse().ok()).unwrap_or(3);

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            graphql_url,
            http_timeout: Duration::from_secs(http_timeout_secs),
            notice_ttl: Duration::from_secs(notice_secs),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 4000)),
            database_url: "sqlite::memory:".to_string(),
            graphql_url: None,
            http_timeout: Duration::from_secs(30),
            notice_ttl: Duration::from_secs(3),
        }
    }
}
