use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub acceleration: AccelerationConfig,
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccelerationConfig {
    /// Requested GPU mode; the probe still decides whether it is honoured.
    pub ocr_use_gpu: bool,
    pub probe_timeout_ms: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    pub command: Option<String>,
    pub args: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            server: ServerConfig {
                port: var("PORT", "5001")
                    .parse()
                    .context("PORT must be a valid port number")?,
                host: var("HOST", "0.0.0.0"),
                cors_allowed_origins: var("ALLOWED_ORIGINS", "*")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                max_upload_bytes: var("MAX_UPLOAD_BYTES", "52428800")
                    .parse()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
            },
            acceleration: AccelerationConfig {
                // only the literal "true" (any case) enables GPU mode
                ocr_use_gpu: var("DOCLING_OCR_USE_GPU", "false").to_lowercase() == "true",
                probe_timeout_ms: var("GPU_PROBE_TIMEOUT_MS", "5000")
                    .parse()
                    .context("GPU_PROBE_TIMEOUT_MS must be a number of milliseconds")?,
            },
            engine: EngineConfig {
                command: lookup("ENGINE_COMMAND").filter(|c| !c.trim().is_empty()),
                args: var("ENGINE_ARGS", "")
                    .split_whitespace()
                    .map(str::to_string)
                    .collect(),
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
