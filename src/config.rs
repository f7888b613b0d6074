use dotenv::dotenv;

use std::env;

const DEFAULT_DATABASE_URL: &str = "sqlite://polls.db";
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8000";
const DEFAULT_TEMPLATE_DIR: &str = "templates";

/**
 * Runtime settings, read from the environment (and `.env` when present)
 */
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub database_url: String,
    pub bind_address: String,
    pub template_dir: String,
}

impl Settings {
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let setting = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Settings {
            database_url: setting("DATABASE_URL", DEFAULT_DATABASE_URL),
            bind_address: setting("BIND_ADDRESS", DEFAULT_BIND_ADDRESS),
            template_dir: setting("TEMPLATE_DIR", DEFAULT_TEMPLATE_DIR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let settings = Settings::from_lookup(|_| None);
        assert_eq!(settings.database_url, "sqlite://polls.db");
        assert_eq!(settings.bind_address, "127.0.0.1:8000");
        assert_eq!(settings.template_dir, "templates");
    }

    #[test]
    fn environment_overrides_defaults() {
        let mut vars = HashMap::new();
        vars.insert("DATABASE_URL", "sqlite::memory:");
        vars.insert("BIND_ADDRESS", "0.0.0.0:9000");
        vars.insert("TEMPLATE_DIR", "");

        let settings = Settings::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(settings.database_url, "sqlite::memory:");
        assert_eq!(settings.bind_address, "0.0.0.0:9000");
        assert_eq!(settings.template_dir, "templates");
    }
}
