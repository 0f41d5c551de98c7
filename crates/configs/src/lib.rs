use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

fn default_host() -> String { "localhost".into() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(anyhow!("unknown log format `{other}` (expected compact or json)")),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LogConfig {
    #[serde(default)]
    pub format: LogFormat,
}

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`). Without a file, defaults are
    /// overridden by `SERVER_HOST`, `SERVER_PORT`, `TOKIO_WORKER_THREADS`
    /// and `LOG_FORMAT`. A file that exists but does not parse is an error.
    pub fn load_and_validate() -> Result<Self> {
        let path = config_path();
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path).map_err(|e| anyhow!("{path}: {e}"))?
        } else {
            Self::from_env()?
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `var` returns for the `SERVER_*`,
    /// `TOKIO_WORKER_THREADS` and `LOG_FORMAT` keys. Unparsable values are errors.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Self::default();
        if let Some(host) = var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = var("SERVER_PORT") {
            cfg.server.port = port
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow!("SERVER_PORT `{port}` is not a valid port: {e}"))?;
        }
        if let Some(threads) = var("TOKIO_WORKER_THREADS") {
            let w = threads
                .trim()
                .parse::<usize>()
                .map_err(|e| anyhow!("TOKIO_WORKER_THREADS `{threads}` is not a thread count: {e}"))?;
            cfg.server.worker_threads = Some(w);
        }
        if let Some(format) = var("LOG_FORMAT") {
            cfg.log.format = format.parse()?;
        }
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }

    /// `host:port` as handed to the listener; `host` may be a name such as `localhost`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn env_overrides_defaults() -> Result<()> {
        let cfg = AppConfig::from_vars(vars(&[
            ("SERVER_HOST", "0.0.0.0"),
            ("SERVER_PORT", "9000"),
            ("TOKIO_WORKER_THREADS", "2"),
            ("LOG_FORMAT", "json"),
        ]))?;
        assert_eq!(cfg.server.bind_addr(), "0.0.0.0:9000");
        assert_eq!(cfg.server.worker_threads, Some(2));
        assert_eq!(cfg.log.format, LogFormat::Json);

        let cfg = AppConfig::from_vars(vars(&[]))?;
        assert_eq!(cfg.server.bind_addr(), "localhost:8080");
        assert_eq!(cfg.server.worker_threads, Some(4));
        Ok(())
    }

    #[test]
    fn unparsable_env_values_are_errors() {
        assert!(AppConfig::from_vars(vars(&[("SERVER_PORT", "eighty")])).is_err());
        assert!(AppConfig::from_vars(vars(&[("TOKIO_WORKER_THREADS", "many")])).is_err());
        assert!(AppConfig::from_vars(vars(&[("TOKIO_WORKER_THREADS", "-1")])).is_err());
        assert!(AppConfig::from_vars(vars(&[("LOG_FORMAT", "xml")])).is_err());
    }

    #[test]
    fn defaults_bind_localhost_8080() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.bind_addr(), "localhost:8080");
        assert_eq!(cfg.log.format, LogFormat::Compact);
    }

    #[test]
    fn parses_partial_toml() -> Result<()> {
        let mut cfg = load_from_str(
            r#"
            [server]
            port = 9090

            [log]
            format = "json"
            "#,
        )?;
        cfg.normalize_and_validate()?;
        assert_eq!(cfg.server.host, "localhost");
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.log.format, LogFormat::Json);
        Ok(())
    }

    #[test]
    fn blank_host_and_zero_workers_are_normalized() -> Result<()> {
        let mut cfg = load_from_str("[server]\nhost = \"  \"\nport = 1\nworker_threads = 0\n")?;
        cfg.normalize_and_validate()?;
        assert_eq!(cfg.server.host, "localhost");
        assert_eq!(cfg.server.worker_threads, Some(4));
        Ok(())
    }

    #[test]
    fn zero_port_is_rejected() -> Result<()> {
        let mut cfg = load_from_str("[server]\nport = 0\n")?;
        assert!(cfg.normalize_and_validate().is_err());
        Ok(())
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        assert!(load_from_str("[log]\nformat = \"xml\"\n").is_err());
        assert!("xml".parse::<LogFormat>().is_err());
        assert_eq!(" JSON ".parse::<LogFormat>().ok(), Some(LogFormat::Json));
    }
}
