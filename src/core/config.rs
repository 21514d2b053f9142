use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::constants::{DEFAULT_ENDPOINT, DEFAULT_TYPING_INTERVAL_MS};

const VALID_THEMES: [&str; 2] = ["dark", "light"];

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Base URL of the question-answering service
    pub endpoint: Option<String>,
    /// UI theme name ("dark" or "light")
    pub theme: Option<String>,
    /// Delay between typewriter reveal steps, in milliseconds
    pub typing_interval_ms: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Config, Box<dyn Error>> {
        let config_path = Self::get_config_path();
        Self::load_from_path(&config_path)
    }

    pub fn load_from_path(config_path: &PathBuf) -> Result<Config, Box<dyn Error>> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<(), Box<dyn Error>> {
        let config_path = Self::get_config_path();
        self.save_to_path(&config_path)
    }

    pub fn save_to_path(&self, config_path: &PathBuf) -> Result<(), Box<dyn Error>> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    fn get_config_path() -> PathBuf {
        let proj_dirs = ProjectDirs::from("org", "minbar", "minbar")
            .expect("Failed to determine config directory");
        proj_dirs.config_dir().join("config.toml")
    }

    /// Service base URL, falling back to the stock development address.
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn typing_interval(&self) -> Duration {
        Duration::from_millis(
            self.typing_interval_ms
                .unwrap_or(DEFAULT_TYPING_INTERVAL_MS),
        )
    }

    pub fn print_all(&self) {
        println!("Current configuration:");
        match &self.endpoint {
            Some(endpoint) => println!("  endpoint: {endpoint}"),
            None => println!("  endpoint: (unset, using {DEFAULT_ENDPOINT})"),
        }
        match &self.theme {
            Some(theme) => println!("  theme: {theme}"),
            None => println!("  theme: (unset, using dark)"),
        }
        match self.typing_interval_ms {
            Some(ms) => println!("  typing-interval-ms: {ms}"),
            None => println!("  typing-interval-ms: (unset, using {DEFAULT_TYPING_INTERVAL_MS})"),
        }
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<String, Box<dyn Error>> {
        match key {
            "endpoint" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err("endpoint cannot be empty".into());
                }
                self.endpoint = Some(value.to_string());
                Ok(format!("endpoint set to {value}"))
            }
            "theme" => {
                let value = value.trim().to_lowercase();
                if !VALID_THEMES.contains(&value.as_str()) {
                    return Err(
                        format!("unknown theme '{value}' (valid: {})", VALID_THEMES.join(", "))
                            .into(),
                    );
                }
                self.theme = Some(value.clone());
                Ok(format!("theme set to {value}"))
            }
            "typing-interval-ms" => {
                let ms: u64 = value
                    .trim()
                    .parse()
                    .map_err(|_| format!("'{value}' is not a valid interval in milliseconds"))?;
                self.typing_interval_ms = Some(ms);
                Ok(format!("typing-interval-ms set to {ms}"))
            }
            _ => Err(format!(
                "unknown key '{key}' (valid: endpoint, theme, typing-interval-ms)"
            )
            .into()),
        }
    }

    pub fn unset_value(&mut self, key: &str) -> Result<String, Box<dyn Error>> {
        match key {
            "endpoint" => {
                self.endpoint = None;
                Ok("endpoint unset".to_string())
            }
            "theme" => {
                self.theme = None;
                Ok("theme unset".to_string())
            }
            "typing-interval-ms" => {
                self.typing_interval_ms = None;
                Ok("typing-interval-ms unset".to_string())
            }
            _ => Err(format!(
                "unknown key '{key}' (valid: endpoint, theme, typing-interval-ms)"
            )
            .into()),
        }
    }
}
