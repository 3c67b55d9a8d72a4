use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "wayfind", version, about = "Simulated AR walking directions")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Command>,

    /// Simulation settings JSON (`tickPeriodMs`, `tickDecrement`, `completionDelayMs`).
    #[arg(long, global = true, env = "WAYFIND_CONFIG")]
    pub config: Option<PathBuf>,

    /// Extra route files, added to the built-in routes.
    #[arg(long = "routes", global = true, value_name = "JSON")]
    pub route_files: Vec<PathBuf>,

    #[command(flatten)]
    pub timing: TimingArgs,
}

impl Cli {
    /// No subcommand means the desktop UI.
    #[must_use]
    pub fn command(&self) -> Command {
        self.cmd.clone().unwrap_or(Command::Ui(UiArgs::default()))
    }
}

/// Timing overrides; these win over the settings file.
#[derive(Args, Debug, Clone, Default)]
pub struct TimingArgs {
    /// Milliseconds between simulated steps.
    #[arg(long, global = true, env = "WAYFIND_TICK_MS")]
    pub tick_ms: Option<u64>,

    /// Metres walked per tick.
    #[arg(long, global = true, env = "WAYFIND_TICK_DECREMENT")]
    pub tick_decrement: Option<f64>,

    /// Pause in milliseconds between finishing a leg and starting the next.
    #[arg(long, global = true, env = "WAYFIND_DELAY_MS")]
    pub delay_ms: Option<u64>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Open the desktop navigator (default).
    Ui(UiArgs),
    /// Walk a route headlessly and log every instruction change.
    Simulate(SimulateArgs),
    /// List the available routes.
    Routes,
}

#[derive(Args, Debug, Clone, Default)]
pub struct UiArgs {
    /// Open this route directly instead of the route picker.
    #[arg(long, env = "WAYFIND_ROUTE")]
    pub route: Option<String>,

    /// Simulate a camera whose permission prompt is refused.
    #[arg(long, default_value_t = false)]
    pub deny_camera: bool,

    /// Pretend the device supports immersive AR instead of showing the preview.
    #[arg(long, default_value_t = false)]
    pub simulate_ar: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Route id to walk.
    #[arg(long, env = "WAYFIND_ROUTE", default_value = "square-walk")]
    pub route: String,

    /// Run the timers this many times faster.
    #[arg(long, default_value_t = 1.0)]
    pub speed: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_ui() {
        let cli = Cli::try_parse_from(["wayfind"]).unwrap();
        assert!(matches!(cli.command(), Command::Ui(_)));
        assert!(cli.route_files.is_empty());
    }

    #[test]
    fn simulate_flags() {
        let cli = Cli::try_parse_from([
            "wayfind",
            "simulate",
            "--route",
            "short-demo",
            "--speed",
            "10",
            "--tick-ms",
            "500",
        ])
        .unwrap();
        let Command::Simulate(args) = cli.command() else {
            panic!("expected simulate");
        };
        assert_eq!(args.route, "short-demo");
        assert_eq!(args.speed, 10.0);
        assert_eq!(cli.timing.tick_ms, Some(500));
    }

    #[test]
    fn global_route_files_after_subcommand() {
        let cli = Cli::try_parse_from([
            "wayfind", "routes", "--routes", "a.json", "--routes", "b.json",
        ])
        .unwrap();
        assert!(matches!(cli.command(), Command::Routes));
        assert_eq!(
            cli.route_files,
            vec![PathBuf::from("a.json"), PathBuf::from("b.json")]
        );
    }

    #[test]
    fn ui_device_flags() {
        let cli = Cli::try_parse_from(["wayfind", "ui", "--deny-camera", "--simulate-ar"]).unwrap();
        let Command::Ui(args) = cli.command() else {
            panic!("expected ui");
        };
        assert!(args.deny_camera);
        assert!(args.simulate_ar);
        assert!(!UiArgs::default().simulate_ar);
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["wayfind", "teleport"]).is_err());
    }
}
