use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use extrudekit::{
    init_logging, BareFrame, PatternMode, ProgramFrame, PrusaMk3sFrame, Session, Settings,
    SettingsOverrides,
};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "extrudekit", version)]
#[command(about = "Generate G-code for extrusion calibration patterns", long_about = None)]
struct Cli {
    /// Pattern to print: line, plane or cube (or l, p, c)
    mode: PatternMode,

    /// Iteration number, starting at 1
    #[arg(default_value_t = 1)]
    iteration: u32,

    /// Override a setting, e.g. --set printDir=45 (repeatable)
    #[arg(short, long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,

    /// Read overrides from a .json or .toml file
    #[arg(long, value_name = "FILE", conflicts_with = "set")]
    overrides: Option<PathBuf>,

    /// Settings file (.toml or .json); defaults to the user config when present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start and end blocks around the pattern
    #[arg(long, value_enum, default_value_t = FrameKind::Prusa)]
    frame: FrameKind,

    /// Extruder temperature in °C
    #[arg(long, default_value_t = 215)]
    extruder_temp: u32,

    /// Bed temperature in °C
    #[arg(long, default_value_t = 60)]
    bed_temp: u32,

    /// Nozzle diameter written into the printer check
    #[arg(long, default_value_t = 0.4)]
    nozzle: f64,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum FrameKind {
    /// Prusa i3 MK3S start and end blocks
    Prusa,
    /// Pattern body only
    Bare,
}

fn load_settings(config: Option<&PathBuf>) -> Result<Settings> {
    if let Some(path) = config {
        return Settings::load_from_file(path)
            .with_context(|| format!("loading settings from {}", path.display()));
    }
    match extrudekit::settings::default_config_path() {
        Ok(path) if path.exists() => {
            debug!(path = %path.display(), "Using user settings");
            Settings::load_from_file(&path)
                .with_context(|| format!("loading settings from {}", path.display()))
        }
        _ => Ok(Settings::default()),
    }
}

fn load_overrides(cli: &Cli) -> Result<SettingsOverrides> {
    let Some(path) = &cli.overrides else {
        return SettingsOverrides::from_pairs(&cli.set).context("parsing --set overrides");
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading overrides from {}", path.display()))?;
    let overrides = if path.extension().is_some_and(|ext| ext == "toml") {
        SettingsOverrides::from_toml(&text)
    } else {
        SettingsOverrides::from_json(&text)
    };
    overrides.with_context(|| format!("parsing overrides in {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    init_logging(level)?;

    let base = load_settings(cli.config.as_ref())?;
    let overrides = load_overrides(&cli)?;
    let session = Session::new(&base, &overrides)?;

    let frame: Box<dyn ProgramFrame> = match cli.frame {
        FrameKind::Prusa => Box::new(PrusaMk3sFrame {
            nozzle_diameter: cli.nozzle,
            extruder_temp: cli.extruder_temp,
            bed_temp: cli.bed_temp,
            generated_at: None,
        }),
        FrameKind::Bare => Box::new(BareFrame),
    };
    let program = session.run_framed(frame.as_ref(), cli.mode, cli.iteration)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(program.as_bytes())?;
    stdout.flush()?;
    info!(mode = %cli.mode, iteration = cli.iteration, bytes = program.len(), "Wrote program");

    Ok(())
}
