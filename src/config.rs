//! Runtime configuration
//!
//! Values come from the environment (optionally seeded from a `.env` file by the
//! binary) and can be overridden per command on the command line.

use std::path::PathBuf;

pub const DATA_DIR_VAR: &str = "MOVIE_DB_DATA_DIR";
pub const DDL_VAR: &str = "MOVIE_DB_DDL";
pub const GENRE_VAR: &str = "MOVIE_DB_GENRE";
pub const MIN_RATING_VAR: &str = "MOVIE_DB_MIN_RATING";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory holding the CSV files read by `populate`
    pub data_dir: PathBuf,

    /// DDL script to run on `init`; the bundled script is used when unset
    pub ddl_path: Option<PathBuf>,

    /// Genre used by the award-winning actors report
    pub genre: String,

    /// Rating threshold used by the awarded directors report
    pub min_rating: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            ddl_path: None,
            genre: "Action".to_string(),
            min_rating: 7.0,
        }
    }
}

impl Config {
    /// Build a config from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Unset or unparsable
    /// values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let min_rating = match lookup(MIN_RATING_VAR) {
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(value) => value,
                Err(_) => {
                    tracing::warn!("Ignoring {}={:?}: not a number", MIN_RATING_VAR, raw);
                    defaults.min_rating
                }
            },
            None => defaults.min_rating,
        };

        Self {
            data_dir: lookup(DATA_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            ddl_path: lookup(DDL_VAR).map(PathBuf::from),
            genre: lookup(GENRE_VAR).unwrap_or(defaults.genre),
            min_rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config, Config::default());
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.genre, "Action");
        assert_eq!(config.min_rating, 7.0);
    }

    #[test]
    fn test_overrides_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (DATA_DIR_VAR, "/tmp/movies"),
            (DDL_VAR, "schema.sql"),
            (GENRE_VAR, "Drama"),
            (MIN_RATING_VAR, "8.5"),
        ]
        .into_iter()
        .collect();

        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/movies"));
        assert_eq!(config.ddl_path, Some(PathBuf::from("schema.sql")));
        assert_eq!(config.genre, "Drama");
        assert_eq!(config.min_rating, 8.5);
    }

    #[test]
    fn test_bad_rating_falls_back() {
        let config = Config::from_lookup(|key| {
            (key == MIN_RATING_VAR).then(|| "seven".to_string())
        });
        assert_eq!(config.min_rating, 7.0);
    }
}
