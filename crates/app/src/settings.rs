use std::path::{Path, PathBuf};

use anyhow::Context as _;
use services::{RouteCatalog, SimulationSettings, SimulationSettingsDraft};
use tracing::{debug, info};

use crate::cli::TimingArgs;

fn read_draft(path: &Path) -> anyhow::Result<SimulationSettingsDraft> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading settings from {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing settings in {}", path.display()))
}

/// Flags and environment first, then the settings file, then defaults.
pub fn resolve_settings(
    config: Option<&Path>,
    timing: &TimingArgs,
) -> anyhow::Result<SimulationSettings> {
    let overrides = SimulationSettingsDraft {
        tick_period_ms: timing.tick_ms,
        tick_decrement: timing.tick_decrement,
        completion_delay_ms: timing.delay_ms,
    };
    let file = match config {
        Some(path) => read_draft(path)?,
        None => SimulationSettingsDraft::new(),
    };
    let settings = overrides.or(file).validate()?;
    debug!(?settings, "simulation settings resolved");
    Ok(settings)
}

pub fn load_catalog(route_files: &[PathBuf]) -> anyhow::Result<RouteCatalog> {
    let mut catalog = RouteCatalog::builtin();
    for path in route_files {
        let ids = catalog
            .load_file(path)
            .with_context(|| format!("loading routes from {}", path.display()))?;
        info!(file = %path.display(), routes = ids.len(), "route file loaded");
    }
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "tickPeriodMs": 1000, "tickDecrement": 2 }"#).unwrap();

        let timing = TimingArgs {
            tick_ms: Some(250),
            ..TimingArgs::default()
        };
        let settings = resolve_settings(Some(&path), &timing).unwrap();
        assert_eq!(settings.tick_period(), Duration::from_millis(250));
        assert_eq!(settings.tick_decrement(), 2.0);
        assert_eq!(settings.completion_delay(), Duration::from_secs(2));
    }

    #[test]
    fn defaults_without_file() {
        let settings = resolve_settings(None, &TimingArgs::default()).unwrap();
        assert_eq!(settings, SimulationSettings::default());
    }

    #[test]
    fn invalid_override_is_reported() {
        let timing = TimingArgs {
            tick_decrement: Some(-1.0),
            ..TimingArgs::default()
        };
        let err = resolve_settings(None, &timing).unwrap_err();
        assert!(err.to_string().contains("tick decrement"), "{err}");
    }

    #[test]
    fn missing_route_file_names_the_path() {
        let err = load_catalog(&[PathBuf::from("/nonexistent/routes.json")]).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/routes.json"), "{err:#}");
    }
}
