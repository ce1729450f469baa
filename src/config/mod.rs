use std::env;
use std::path::PathBuf;

use crate::intelligence::ConfidenceProxy;

const DEFAULT_MODEL_PATH: &str = "models/fraud_pipeline.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,

    // External model
    pub model_path: PathBuf,
    pub model_enabled: bool,
    pub confidence_proxy: ConfidenceProxy,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ConfidenceProxy::default();

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".into())
                .parse()
                .map_err(|e| anyhow::anyhow!("PORT must be a valid port number: {e}"))?,

            model_path: lookup("MODEL_PATH")
                .unwrap_or_else(|| DEFAULT_MODEL_PATH.into())
                .into(),
            model_enabled: flag(&lookup, "MODEL_ENABLED", true),
            confidence_proxy: ConfidenceProxy {
                fraud: confidence(&lookup, "MODEL_FRAUD_CONFIDENCE", defaults.fraud),
                no_fraud: confidence(&lookup, "MODEL_NO_FRAUD_CONFIDENCE", defaults.no_fraud),
            },
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse a boolean switch, accepting the usual spellings case-insensitively.
fn flag<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return default;
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => true,
        "false" | "0" | "no" | "off" => false,
        _ => {
            tracing::warn!(key, value = %raw, default, "Invalid boolean value, using default");
            default
        }
    }
}

/// Parse a confidence value in [0, 1], keeping the default otherwise.
fn confidence<F>(lookup: &F, key: &str, default: f64) -> f64
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return default;
    };

    match raw.trim().parse::<f64>() {
        Ok(v) if (0.0..=1.0).contains(&v) => v,
        _ => {
            tracing::warn!(key, value = %raw, default, "Invalid confidence value, using default");
            default
        }
    }
}
