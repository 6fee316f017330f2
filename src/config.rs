/// Runtime configuration
///
/// Read from environment variables. Anything unset falls back to a default
/// and says so in the log. Anything set but unparseable is an error.

use crate::error::{FlashcardError, Result};
use std::{env, fmt::Display, net::IpAddr, path::PathBuf, str::FromStr};
use tracing::info;

pub const HOST_VAR: &str = "FLASHCARDS_HOST";
pub const PORT_VAR: &str = "FLASHCARDS_PORT";
pub const DB_VAR: &str = "FLASHCARDS_DB";
pub const EXPOSE_ERRORS_VAR: &str = "FLASHCARDS_EXPOSE_ERRORS";
pub const LOG_JSON_VAR: &str = "FLASHCARDS_LOG_JSON";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub db_path: PathBuf,
    /// Put error messages and their causes in 500 bodies. Debug deployments only.
    pub expose_errors: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. `load` uses the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = match lookup(DB_VAR) {
            Some(path) => PathBuf::from(path),
            None => {
                let path = default_db_path()?;
                info!("{DB_VAR} not set, using default: {}", path.display());
                path
            }
        };

        Ok(Self {
            host: try_load(&lookup, HOST_VAR, "0.0.0.0")?,
            port: try_load(&lookup, PORT_VAR, "8787")?,
            db_path,
            expose_errors: try_load(&lookup, EXPOSE_ERRORS_VAR, "false")?,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Read before logging is set up, so it can't live in `Config`
pub fn log_json_requested() -> bool {
    env::var(LOG_JSON_VAR)
        .map(|v| v.trim() == "true")
        .unwrap_or(false)
}

fn try_load<F, T>(lookup: &F, key: &str, default: &str) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.trim()
        .parse()
        .map_err(|e| FlashcardError::Config(format!("invalid {key} value {raw:?}: {e}")))
}

fn default_db_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| FlashcardError::Config("could not find home directory".to_string()))?;

    Ok(home.join(".lightning-flashcards").join("flashcards.db"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[(DB_VAR, "/tmp/cards.db")])).unwrap();

        assert_eq!(config.port, 8787);
        assert_eq!(config.address(), "0.0.0.0:8787");
        assert_eq!(config.db_path, PathBuf::from("/tmp/cards.db"));
        assert!(!config.expose_errors);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            (DB_VAR, "/tmp/cards.db"),
            (HOST_VAR, "127.0.0.1"),
            (PORT_VAR, "9000"),
            (EXPOSE_ERRORS_VAR, "true"),
        ]))
        .unwrap();

        assert_eq!(config.address(), "127.0.0.1:9000");
        assert!(config.expose_errors);
    }

    #[test]
    fn test_invalid_port() {
        let result = Config::from_lookup(lookup_from(&[
            (DB_VAR, "/tmp/cards.db"),
            (PORT_VAR, "not-a-port"),
        ]));

        match result {
            Err(FlashcardError::Config(msg)) => assert!(msg.contains(PORT_VAR)),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }
}
