use std::env;

use anyhow::{Context, bail};
use dotenvy::dotenv;

use crate::engine::BalanceThresholds;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub body_limit_bytes: usize,
    pub thresholds: BalanceThresholds,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if it exists
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, falling back to defaults for
    /// missing keys.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = lookup("PORT")
            .unwrap_or_else(|| "8000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let body_limit_bytes = lookup("BODY_LIMIT_BYTES")
            .unwrap_or_else(|| "500000".to_string())
            .parse::<usize>()
            .context("BODY_LIMIT_BYTES must be a byte count")?;

        let defaults = BalanceThresholds::default();
        let thresholds = BalanceThresholds {
            overload_factor: factor(&lookup, "OVERLOAD_FACTOR", defaults.overload_factor)?,
            underload_factor: factor(&lookup, "UNDERLOAD_FACTOR", defaults.underload_factor)?,
            target_ceiling_factor: factor(
                &lookup,
                "TARGET_CEILING_FACTOR",
                defaults.target_ceiling_factor,
            )?,
        };
        if thresholds.underload_factor >= thresholds.overload_factor {
            bail!(
                "UNDERLOAD_FACTOR ({}) must be below OVERLOAD_FACTOR ({})",
                thresholds.underload_factor,
                thresholds.overload_factor
            );
        }

        Ok(Self {
            host,
            port,
            body_limit_bytes,
            thresholds,
        })
    }
}

fn factor<F>(lookup: &F, key: &str, default: f64) -> anyhow::Result<f64>
where
    F: Fn(&str) -> Option<String>,
{
    let value = match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .with_context(|| format!("{key} must be a number"))?,
        None => default,
    };
    if !value.is_finite() || value <= 0.0 {
        bail!("{key} must be a positive number, got {value}");
    }
    Ok(value)
}
