//! Document Engine Launcher
//!
//! Starts the external document-processing engine as a child process with
//! the environment selected by [`Acceleration`].

use tokio::process::{Child, Command};
use tracing::info;

use crate::acceleration::Acceleration;
use crate::config::EngineConfig;
use crate::types::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct EngineLauncher {
    program: String,
    args: Vec<String>,
    env: Vec<(&'static str, &'static str)>,
}

impl EngineLauncher {
    /// Returns `None` when no engine command is configured.
    pub fn new(config: &EngineConfig, acceleration: &Acceleration) -> Option<Self> {
        let program = config.command.clone()?;

        Some(Self {
            program,
            args: config.args.clone(),
            env: acceleration.engine_env(),
        })
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .envs(self.env.iter().copied())
            .kill_on_drop(true);
        cmd
    }

    pub fn spawn(&self) -> AppResult<Child> {
        info!(program = %self.program, args = ?self.args, env = ?self.env, "Starting document engine");

        self.command()
            .spawn()
            .map_err(|e| AppError::Engine(format!("failed to start {}: {}", self.program, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acceleration::{ComputeMode, GpuInfo, ENGINE_GPU_ENV};
    use std::ffi::OsStr;

    fn gpu_acceleration() -> Acceleration {
        Acceleration {
            mode: ComputeMode::Gpu,
            gpu: Some(GpuInfo {
                name: "Tesla T4".to_string(),
                memory_total_mib: Some(15360),
                driver_version: None,
            }),
        }
    }

    #[test]
    fn test_no_command_no_launcher() {
        let launcher = EngineLauncher::new(&EngineConfig::default(), &Acceleration::cpu());
        assert!(launcher.is_none());
    }

    #[test]
    fn test_command_carries_args_and_env() {
        let config = EngineConfig {
            command: Some("docling-serve".to_string()),
            args: vec!["run".to_string(), "--port".to_string(), "5002".to_string()],
        };
        let launcher = EngineLauncher::new(&config, &gpu_acceleration()).unwrap();
        let cmd = launcher.command();
        let std_cmd = cmd.as_std();

        assert_eq!(std_cmd.get_program(), OsStr::new("docling-serve"));
        let args: Vec<_> = std_cmd.get_args().collect();
        assert_eq!(args, vec![OsStr::new("run"), OsStr::new("--port"), OsStr::new("5002")]);

        let envs: Vec<_> = std_cmd.get_envs().collect();
        assert_eq!(envs, vec![(OsStr::new(ENGINE_GPU_ENV), Some(OsStr::new("True")))]);
    }

    #[tokio::test]
    async fn test_spawn_missing_binary_is_engine_error() {
        let config = EngineConfig {
            command: Some("definitely-not-a-real-engine-binary".to_string()),
            args: Vec::new(),
        };
        let launcher = EngineLauncher::new(&config, &Acceleration::cpu()).unwrap();

        match launcher.spawn() {
            Err(AppError::Engine(msg)) => assert!(msg.contains("definitely-not-a-real-engine-binary")),
            other => panic!("expected engine error, got {:?}", other.map(|_| ())),
        }
    }
}
