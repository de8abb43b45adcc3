//! Compute Mode Selection
//!
//! Decides once at startup whether the OCR engine runs on GPU or CPU.
//! The result is a plain value handed to downstream initializers (engine
//! launcher, health route) instead of process-wide state.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Environment variable read by the OCR engine to pick its device.
pub const ENGINE_GPU_ENV: &str = "EASYOCR_USE_GPU";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ComputeMode {
    Gpu,
    Cpu,
}

impl std::fmt::Display for ComputeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComputeMode::Gpu => write!(f, "gpu"),
            ComputeMode::Cpu => write!(f, "cpu"),
        }
    }
}

/// Device reported by a [`GpuProbe`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GpuInfo {
    pub name: String,
    pub memory_total_mib: Option<u64>,
    pub driver_version: Option<String>,
}

impl GpuInfo {
    pub fn memory_total_gb(&self) -> Option<f64> {
        self.memory_total_mib.map(|mib| mib as f64 / 1024.0)
    }
}

#[async_trait]
pub trait GpuProbe: Send + Sync {
    /// Returns the first usable device, or `None` when no GPU is available.
    async fn probe(&self) -> Option<GpuInfo>;
}

/// Queries the NVIDIA driver through `nvidia-smi`.
pub struct NvidiaSmiProbe {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl NvidiaSmiProbe {
    pub fn new(timeout: Duration) -> Self {
        Self::with_program(
            "nvidia-smi",
            [
                "--query-gpu=name,memory.total,driver_version",
                "--format=csv,noheader,nounits",
            ],
            timeout,
        )
    }

    /// Runs `program` instead of `nvidia-smi`; its stdout must use the same CSV rows.
    pub fn with_program<I, S>(program: impl Into<String>, args: I, timeout: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            timeout,
        }
    }
}

#[async_trait]
impl GpuProbe for NvidiaSmiProbe {
    async fn probe(&self) -> Option<GpuInfo> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).kill_on_drop(true);

        let output = match timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                debug!(program = %self.program, error = %e, "GPU probe unavailable");
                return None;
            }
            Err(_) => {
                warn!(program = %self.program, timeout_ms = self.timeout.as_millis() as u64, "GPU probe timed out");
                return None;
            }
        };

        if !output.status.success() {
            debug!(program = %self.program, status = ?output.status.code(), "GPU probe reported no device");
            return None;
        }

        String::from_utf8_lossy(&output.stdout)
            .lines()
            .find_map(parse_smi_line)
    }
}

/// Parses one `name, memory.total, driver_version` row of nvidia-smi CSV output.
///
/// Rows without exactly three columns are not device rows. Memory and driver
/// may be `[N/A]` on some boards.
fn parse_smi_line(line: &str) -> Option<GpuInfo> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [name, memory, driver] = fields.as_slice() else {
        return None;
    };
    if name.is_empty() {
        return None;
    }

    Some(GpuInfo {
        name: name.to_string(),
        memory_total_mib: memory.parse().ok(),
        driver_version: Some(*driver)
            .filter(|v| !v.is_empty() && !v.starts_with('['))
            .map(str::to_string),
    })
}

/// Startup decision on where OCR runs.
#[derive(Debug, Clone, Serialize)]
pub struct Acceleration {
    pub mode: ComputeMode,
    pub gpu: Option<GpuInfo>,
}

impl Acceleration {
    pub fn cpu() -> Self {
        Self {
            mode: ComputeMode::Cpu,
            gpu: None,
        }
    }

    /// Resolves the requested mode against what the probe finds.
    ///
    /// The probe is only consulted when GPU mode was requested.
    pub async fn resolve(requested_gpu: bool, probe: &dyn GpuProbe) -> Self {
        if !requested_gpu {
            info!("Running in CPU mode. Set DOCLING_OCR_USE_GPU=true to enable GPU support.");
            return Self::cpu();
        }

        match probe.probe().await {
            Some(gpu) => {
                info!(
                    device = %gpu.name,
                    driver = gpu.driver_version.as_deref().unwrap_or("unknown"),
                    "CUDA is available. Using GPU: {}",
                    gpu.name
                );
                Self {
                    mode: ComputeMode::Gpu,
                    gpu: Some(gpu),
                }
            }
            None => {
                warn!("DOCLING_OCR_USE_GPU is set to true but CUDA is not available. Falling back to CPU.");
                Self::cpu()
            }
        }
    }

    pub fn use_gpu(&self) -> bool {
        self.mode == ComputeMode::Gpu
    }

    /// Environment the document engine must be started with.
    pub fn engine_env(&self) -> Vec<(&'static str, &'static str)> {
        let value = if self.use_gpu() { "True" } else { "False" };
        vec![(ENGINE_GPU_ENV, value)]
    }

    pub fn log_startup(&self) {
        info!("Docling Enhanced started with GPU support: {}", self.use_gpu());
        if let Some(gpu) = &self.gpu {
            if let Some(gb) = gpu.memory_total_gb() {
                info!("GPU Memory: {:.2} GB", gb);
            }
            info!("CUDA Device: {}", gpu.name);
        }
    }
}
