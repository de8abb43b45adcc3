use std::future::IntoFuture;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::{error, info};

use docling_enhanced::acceleration::{Acceleration, NvidiaSmiProbe};
use docling_enhanced::engine::EngineLauncher;
use docling_enhanced::{config::Config, routes::create_router, utils::init_logger, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config.server);

    // Decide GPU/CPU once; everything downstream receives the result
    let probe = NvidiaSmiProbe::new(Duration::from_millis(config.acceleration.probe_timeout_ms));
    let acceleration = Acceleration::resolve(config.acceleration.ocr_use_gpu, &probe).await;

    let mut engine = match EngineLauncher::new(&config.engine, &acceleration) {
        Some(launcher) => Some(launcher.spawn()?),
        None => {
            info!("ENGINE_COMMAND not set, document engine is managed externally");
            None
        }
    };

    let state = AppState::new(config.clone(), acceleration);
    let app = create_router(state.clone());

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);
    state.acceleration.log_startup();

    let server = axum::serve(listener, app).into_future();

    match engine.as_mut() {
        Some(child) => {
            tokio::select! {
                result = server => {
                    result.map_err(|e| anyhow::anyhow!("Server error: {}", e))?;
                }
                status = child.wait() => {
                    let status = status?;
                    error!(%status, "Document engine exited");
                    anyhow::bail!("document engine exited with {}", status);
                }
            }
        }
        None => {
            server
                .await
                .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;
        }
    }

    Ok(())
}
