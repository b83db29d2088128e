//! Face Mask Studio - Main Entry Point

use anyhow::Context;
use studio::{init_logging, App, StudioConfig};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = StudioConfig::load().context("failed to load configuration")?;
    init_logging(&config.log_level, config.log_json);

    info!("=== Face Mask Studio v{} ===", env!("CARGO_PKG_VERSION"));

    let mut app = App::from_config(config).context("failed to start the studio")?;
    app.run()?;

    Ok(())
}
