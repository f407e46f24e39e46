use std::env;

use anyhow::{bail, Context};
use dotenv::dotenv;

use crate::validation::ValidationRules;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://customer_data.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // Database configuration
    pub database_url: String,

    // Validation
    pub strict_birthday: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            strict_birthday: false,
        }
    }
}

impl Config {
    /// Reads `DATABASE_URL` and `INTAKE_STRICT_BIRTHDAY`, after loading `.env` if present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let strict_birthday = match env::var("INTAKE_STRICT_BIRTHDAY") {
            Ok(value) => parse_flag(&value)
                .context("INTAKE_STRICT_BIRTHDAY must be true or false")?,
            Err(_) => false,
        };

        Ok(Config {
            database_url,
            strict_birthday,
        })
    }

    pub fn rules(&self) -> ValidationRules {
        ValidationRules {
            strict_birthday: self.strict_birthday,
        }
    }
}

fn parse_flag(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("invalid flag value: {:?}", other),
    }
}
