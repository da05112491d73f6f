//! # electrician
//!
//! Start and stop a system of echo components.
//!
//! ```text
//! ELECTRICIAN_MANIFEST=manifests/basic.json \
//! ELECTRICIAN_LOG_LEVEL=debug \
//! ELECTRICIAN_DUMP_METRICS=1 \
//!     electrician
//! ```

use anyhow::{Context, Result};
use electrician_runtime::RuntimeConfig;
use electrician_telemetry::{encode_metrics, init_telemetry};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = RuntimeConfig::from_env();

    let _telemetry =
        init_telemetry(config.telemetry.clone()).context("Failed to initialize telemetry")?;

    let manifest = config.load_manifest().context("Failed to load manifest")?;
    info!(
        manifest = ?config.manifest_path,
        components = manifest.components.len(),
        "Loaded manifest"
    );

    let report = electrician_runtime::run(&manifest).await?;
    info!(start_order = ?report.start_order, "Run complete");

    if config.dump_metrics {
        print!("{}", encode_metrics().context("Failed to encode metrics")?);
    }

    Ok(())
}
