use std::env;
use std::error::Error;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::configs::normalize_path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Database {
    pub migration_path: Option<String>,
    pub clean_start: bool,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Auth {
    pub secret: String,
    pub expiration: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Push {
    pub endpoint: String,
    /// Repeat alerts for the same (device, metric) inside this window are
    /// suppressed. `0` fires on every out-of-range ingest.
    pub cooldown_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub logger: Logger,
    pub database: Database,
    pub auth: Auth,
    pub push: Push,
}

impl Settings {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut value: toml::Value = fs::read_to_string("configs/default.toml")?.parse()?;

        let overlay_path = format!("configs/{run_mode}.toml");
        if Path::new(&overlay_path).is_file() {
            let overlay: toml::Value = fs::read_to_string(&overlay_path)?.parse()?;
            merge_value(&mut value, overlay);
        }

        let mut settings: Settings = value.try_into()?;

        if let Some(migrate) = &settings.database.migration_path {
            if Path::new(migrate).is_dir() {
                let migrate_path = normalize_path(migrate)?.to_string_lossy().to_string();

                settings.database.migration_path = Some(migrate_path);
            } else {
                settings.database.migration_path = None;
            }
        }

        Ok(settings)
    }
}

fn merge_value(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_value(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_merges_over_base() {
        let mut base: toml::Value = r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [push]
            endpoint = "https://exp.host/--/api/v2/push/send"
            cooldown_seconds = 1800
        "#
        .parse()
        .unwrap();

        let overlay: toml::Value = r#"
            [server]
            port = 9090

            [push]
            cooldown_seconds = 0
        "#
        .parse()
        .unwrap();

        merge_value(&mut base, overlay);

        assert_eq!(base["server"]["host"].as_str(), Some("0.0.0.0"));
        assert_eq!(base["server"]["port"].as_integer(), Some(9090));
        assert_eq!(base["push"]["cooldown_seconds"].as_integer(), Some(0));
        assert_eq!(
            base["push"]["endpoint"].as_str(),
            Some("https://exp.host/--/api/v2/push/send")
        );
    }
}
