//! Run configuration: every setting is an optional flag with an environment fallback.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::Parser;
use drawcast_publish::BuildContext;
use drawcast_sync::FetchConfig;
use drawcast_sync::http::DEFAULT_USER_AGENT;

pub const DEFAULT_UPSTREAM_URL: &str =
    "https://draw.ar-lottery01.com/WinGo/WinGo_1M/GetHistoryIssuePage.json";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "https://rankingmork-del.github.io/blazix-live-api/api";
pub const DEFAULT_SERVICE_NAME: &str = "BLAZIX S4 LIVE API";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "drawcast",
    version,
    about = "Fetch the latest draws, derive a prediction, and publish static JSON documents"
)]
pub struct Config {
    /// Upstream draw-history endpoint
    #[arg(long, env = "DRAWCAST_UPSTREAM_URL", default_value = DEFAULT_UPSTREAM_URL)]
    pub upstream_url: String,

    /// Directory the documents are written into
    #[arg(long, env = "DRAWCAST_OUTPUT_DIR", default_value = "api")]
    pub output_dir: PathBuf,

    /// Fetch timeout in seconds
    #[arg(long, env = "DRAWCAST_TIMEOUT_SECS", default_value_t = 15)]
    pub timeout_secs: u64,

    /// Public URL the output directory is served under
    #[arg(long, env = "DRAWCAST_PUBLIC_BASE_URL", default_value = DEFAULT_PUBLIC_BASE_URL)]
    pub public_base_url: String,

    /// Scheduler cadence in seconds (descriptive only)
    #[arg(long, env = "DRAWCAST_INTERVAL_SECS", default_value_t = 60)]
    pub interval_secs: u64,

    /// User-Agent sent upstream
    #[arg(long, env = "DRAWCAST_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Service name shown in info.json and README.md
    #[arg(long, env = "DRAWCAST_SERVICE_NAME", default_value = DEFAULT_SERVICE_NAME)]
    pub service_name: String,

    /// Seed for the placeholder statistics (random when unset)
    #[arg(long, env = "DRAWCAST_STATS_SEED")]
    pub stats_seed: Option<u64>,

    /// Log verbosity
    #[arg(long, env = "DRAWCAST_LOG_LEVEL", default_value = "info")]
    pub log_level: tracing::Level,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            url: self.upstream_url.clone(),
            timeout: self.timeout(),
            user_agent: self.user_agent.clone(),
        }
    }

    pub fn build_context(&self, issued_at: DateTime<Utc>) -> BuildContext {
        BuildContext {
            issued_at,
            public_base_url: self.public_base_url.clone(),
            interval: self.interval(),
            service_name: self.service_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Config::command().debug_assert();
    }

    #[test]
    fn defaults_apply_without_arguments() {
        let config = Config::try_parse_from(["drawcast"]).unwrap();
        assert_eq!(config.upstream_url, DEFAULT_UPSTREAM_URL);
        assert_eq!(config.output_dir, PathBuf::from("api"));
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert_eq!(config.interval(), Duration::from_secs(60));
        assert_eq!(config.log_level, tracing::Level::INFO);
        assert!(config.stats_seed.is_none());
        assert_eq!(config.service_name, "BLAZIX S4 LIVE API");
        assert_eq!(
            config.public_base_url,
            "https://rankingmork-del.github.io/blazix-live-api/api"
        );
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "drawcast",
            "--output-dir",
            "/srv/www/api",
            "--timeout-secs",
            "5",
            "--stats-seed",
            "9",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/srv/www/api"));
        assert_eq!(config.fetch_config().timeout, Duration::from_secs(5));
        assert_eq!(config.stats_seed, Some(9));
        assert_eq!(config.log_level, tracing::Level::DEBUG);
    }

    #[test]
    fn build_context_carries_settings() {
        let config = Config::try_parse_from(["drawcast", "--interval-secs", "300"]).unwrap();
        let now = Utc::now();
        let ctx = config.build_context(now);
        assert_eq!(ctx.issued_at, now);
        assert_eq!(ctx.interval, Duration::from_secs(300));
        assert_eq!(ctx.public_base_url, DEFAULT_PUBLIC_BASE_URL);
    }
}
