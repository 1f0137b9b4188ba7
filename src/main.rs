use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::time::Duration;

use tabula::cli::{apply_actions, render_table, CliArgs, RunConfig};
use tabula::config::EngineConfig;
use tabula::model::TableModel;
use tabula::snapshot::Snapshot;
use tabula::TableEngine;

const EXPORT_TIMEOUT: Duration = Duration::from_secs(30);

fn main() -> Result<()> {
    tabula::tracing::init();

    let run = CliArgs::parse().into_config().map_err(|e| anyhow!(e))?;
    let config = EngineConfig::load();

    let mut engine = build_engine(&run, &config)?;
    apply_actions(&mut engine, &run.actions)?;

    if run.export {
        let dir = run
            .export_dir
            .clone()
            .unwrap_or_else(|| config.export_dir());
        engine.export_to_dir(&dir)?;
        if !engine.wait_for_pending(EXPORT_TIMEOUT) {
            return Err(anyhow!("Timed out writing export to {}", dir.display()));
        }
        if let Some(notification) = engine.notification() {
            if notification.is_error() {
                return Err(anyhow!(notification.text.clone()));
            }
            eprintln!("{}", notification.text);
        }
    }

    if run.save {
        let path = snapshot_path(&run, &config)
            .ok_or_else(|| anyhow!("No snapshot path available, pass --snapshot"))?;
        engine
            .snapshot()
            .save(&path)
            .with_context(|| format!("saving snapshot to {}", path.display()))?;
    }

    print!("{}", render_table(engine.model()));
    Ok(())
}

fn snapshot_path(run: &RunConfig, config: &EngineConfig) -> Option<std::path::PathBuf> {
    run.snapshot.clone().or_else(|| config.snapshot_path())
}

/// Start from the snapshot if one exists, otherwise from the default columns
fn build_engine(run: &RunConfig, config: &EngineConfig) -> Result<TableEngine> {
    if let Some(path) = snapshot_path(run, config).filter(|p| p.exists()) {
        let snapshot = Snapshot::load(&path)
            .with_context(|| format!("loading snapshot from {}", path.display()))?;
        let mut model = TableModel::with_default_columns();
        model.restore(snapshot)?;
        return Ok(TableEngine::new(model));
    }

    if run.seed_sample_data && config.seed_sample_data {
        Ok(TableEngine::default())
    } else {
        Ok(TableEngine::empty())
    }
}
