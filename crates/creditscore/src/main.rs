//! Credit score inference service.
//!
//! Run with: cargo run -p creditscore -- [config.toml]
//! Then: curl -X POST http://localhost:8080/predict -d @applicant.json

use creditscore::{console, run, ServiceConfig, ServiceError};
use creditscore_config::{config_path, ConfigError};

#[tokio::main]
async fn main() -> Result<(), ServiceError> {
    console::init();

    let path = config_path(std::env::args().nth(1));
    let config = match ServiceConfig::load(&path) {
        Ok(config) => config,
        // No file means defaults; a broken file is fatal.
        Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("No configuration at {}, using defaults", path.display());
            ServiceConfig::default()
        }
        Err(e) => return Err(e.into()),
    };

    run(config).await
}
