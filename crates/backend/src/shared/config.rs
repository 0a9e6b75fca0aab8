use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub data: DataConfig,
    pub server: ServerConfig,
    /// Directory the config file was read from; relative data paths resolve against it
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// CSV export with the weekly sales table
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[data]
path = "Apples.csv"

[server]
host = "0.0.0.0"
port = 3000
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Current working directory
/// 3. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf));
    let cwd = std::env::current_dir().ok();

    for dir in [exe_dir, cwd].into_iter().flatten() {
        let config_path = dir.join("config.toml");
        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            let contents = std::fs::read_to_string(&config_path)?;
            let mut config: Config = toml::from_str(&contents)?;
            config.base_dir = Some(dir);
            return Ok(config);
        }
        tracing::warn!("config.toml not found at: {}", config_path.display());
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Get the sales CSV path from configuration
/// Resolves relative paths against the directory the config was loaded from
pub fn get_data_path(config: &Config) -> PathBuf {
    let data_path = Path::new(&config.data.path);

    if data_path.is_absolute() {
        return data_path.to_path_buf();
    }

    match &config.base_dir {
        Some(dir) => dir.join(data_path),
        None => data_path.to_path_buf(),
    }
}

pub fn get_server_addr(config: &Config) -> anyhow::Result<SocketAddr> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    addr.parse()
        .map_err(|e| anyhow::anyhow!("invalid server address {addr}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.data.path, "Apples.csv");
        assert_eq!(config.server.port, 3000);
        assert!(config.base_dir.is_none());
    }

    #[test]
    fn test_relative_data_path_resolves_against_config_dir() {
        let mut config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        config.base_dir = Some(PathBuf::from("/srv/explorer"));
        assert_eq!(get_data_path(&config), PathBuf::from("/srv/explorer/Apples.csv"));

        config.data.path = "/data/sales.csv".to_string();
        assert_eq!(get_data_path(&config), PathBuf::from("/data/sales.csv"));
    }

    #[test]
    fn test_server_addr() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        let addr = get_server_addr(&config).unwrap();
        assert_eq!(addr.port(), 3000);

        let mut bad = config.clone();
        bad.server.host = "not a host".to_string();
        assert!(get_server_addr(&bad).is_err());
    }
}
