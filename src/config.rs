use std::env;

const DEFAULT_AVAILABILITY_URL: &str = "https://lookouthunter.s3.amazonaws.com/availability.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub host: String,
    /// Static URL the availability snapshot is fetched from
    pub availability_url: String,
    /// Optional local file to load instead of fetching; for development
    pub snapshot_path: Option<String>,
    pub refresh_interval_hours: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Config {
            port: env::var("LOOKOUT_PORT")
                .unwrap_or_else(|_| "17870".to_string())
                .parse()?,
            host: env::var("LOOKOUT_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            availability_url: env::var("LOOKOUT_AVAILABILITY_URL")
                .unwrap_or_else(|_| DEFAULT_AVAILABILITY_URL.to_string()),
            snapshot_path: env::var("LOOKOUT_SNAPSHOT_PATH").ok(),
            refresh_interval_hours: env::var("LOOKOUT_REFRESH_INTERVAL_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()?,
        })
    }
}
