use clap::{Args, Parser, Subcommand};
use pc_app::{
    AppResult, PumpOverride, SourceConfig, analyze, export_json, load_config, load_pump,
    run_config,
};
use pc_io::ColumnMapping;
use pc_pump::{PumpCurveModel, REFERENCE_SPEED, SpeedSet};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pumpcurve")]
#[command(about = "Pump curve analysis - BEP, POR and affinity-law speed projections", long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Best efficiency point, optionally projected to another speed
    Bep {
        #[command(flatten)]
        source: SourceArgs,
        /// Speed in percent of reference
        #[arg(long)]
        speed: Option<f64>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Preferred operating range (70%..120% of BEP flow)
    Por {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long)]
        json: bool,
    },
    /// BEP and curve points at several speeds
    Speeds {
        #[command(flatten)]
        source: SourceArgs,
        /// Comma-separated speeds in percent (default 90,80,70,60,50)
        #[arg(long, value_delimiter = ',')]
        speeds: Vec<f64>,
        #[arg(long)]
        json: bool,
    },
    /// Write the normalized curve record as JSON
    ExportJson {
        #[command(flatten)]
        source: SourceArgs,
        /// Output JSON file path
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Render a chart described by an analysis config
    Plot {
        /// Path to the analysis YAML file
        #[arg(long)]
        config: PathBuf,
        /// Override the config's output directory
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Override the chart title
        #[arg(long)]
        title: Option<String>,
    },
    /// Validate analysis config syntax and values
    ValidateConfig {
        /// Path to the analysis YAML file
        config_path: PathBuf,
    },
}

/// Where the curve comes from. Vendor CSV unless `--generic` or a `.json`
/// path says otherwise.
#[derive(Args)]
struct SourceArgs {
    /// Curve file (vendor CSV, generic CSV or exported JSON)
    path: PathBuf,
    /// Pump make (vendor and generic files do not carry it)
    #[arg(long)]
    make: Option<String>,
    /// Pump model, overriding the file's
    #[arg(long)]
    model: Option<String>,
    /// Read a generic table with named columns
    #[arg(long, requires_all = ["flow", "head"])]
    generic: bool,
    #[arg(long)]
    flow: Option<String>,
    #[arg(long)]
    head: Option<String>,
    #[arg(long)]
    efficiency: Option<String>,
    #[arg(long)]
    efficiency_flow: Option<String>,
    #[arg(long)]
    npshr: Option<String>,
    #[arg(long)]
    npshr_flow: Option<String>,
}

impl SourceArgs {
    fn to_source(&self) -> SourceConfig {
        let path = self.path.clone();
        if self.generic {
            let mut columns = ColumnMapping::new(
                self.flow.clone().unwrap_or_default(),
                self.head.clone().unwrap_or_default(),
            );
            if let Some(eff) = &self.efficiency {
                columns = columns.with_efficiency(eff, self.efficiency_flow.clone());
            }
            if let Some(npshr) = &self.npshr {
                columns = columns.with_npshr(npshr, self.npshr_flow.clone());
            }
            SourceConfig::Generic { path, columns }
        } else if path.extension().is_some_and(|ext| ext == "json") {
            SourceConfig::Json { path }
        } else {
            SourceConfig::Vendor { path }
        }
    }

    fn load(&self) -> AppResult<PumpCurveModel> {
        let overrides = PumpOverride {
            make: self.make.clone(),
            model: self.model.clone(),
        };
        let source = self.to_source();
        tracing::debug!(path = %self.path.display(), ?source, "loading pump curve");
        load_pump(&source, &overrides)
    }
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match cli.command {
        Commands::Bep {
            source,
            speed,
            json,
        } => cmd_bep(&source, speed, json),
        Commands::Por { source, json } => cmd_por(&source, json),
        Commands::Speeds {
            source,
            speeds,
            json,
        } => cmd_speeds(&source, speeds, json),
        Commands::ExportJson { source, output } => cmd_export_json(&source, &output),
        Commands::Plot {
            config,
            output_dir,
            title,
        } => cmd_plot(&config, output_dir, title),
        Commands::ValidateConfig { config_path } => cmd_validate_config(&config_path),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_bep(source: &SourceArgs, speed: Option<f64>, json: bool) -> AppResult<()> {
    let pump = source.load()?;
    match speed {
        Some(speed) if speed != REFERENCE_SPEED => {
            let at_speed = pump.best_efficiency_point_at_speed(speed)?;
            if json {
                print_json(&at_speed)?;
            } else {
                println!("{}", at_speed.summary(&pump.identity().full_name()));
            }
        }
        _ => {
            let bep = pump.best_efficiency_point()?;
            if json {
                print_json(&bep)?;
            } else {
                println!("{}", pump.identity());
                println!("  BEP: {bep}");
            }
        }
    }
    Ok(())
}

fn cmd_por(source: &SourceArgs, json: bool) -> AppResult<()> {
    let pump = source.load()?;
    let por = pump.preferred_operating_range()?;
    if json {
        print_json(&por)?;
    } else {
        println!("{}", pump.identity());
        println!("  POR: {por}");
    }
    Ok(())
}

fn cmd_speeds(source: &SourceArgs, speeds: Vec<f64>, json: bool) -> AppResult<()> {
    let pump = source.load()?;
    let speeds = if speeds.is_empty() {
        SpeedSet::default()
    } else {
        SpeedSet::from(speeds)
    };

    let report = analyze(&pump, &speeds)?;
    if json {
        return print_json(&report);
    }

    print!("{}", report.to_text());
    for (speed, (flow, head)) in pump.speed_curves(&speeds)? {
        println!("  {speed}% curve:");
        for (q, h) in flow.iter().zip(&head) {
            println!("    {q:>8.2} L/s  {h:>7.2} m");
        }
    }
    Ok(())
}

fn cmd_export_json(source: &SourceArgs, output: &Path) -> AppResult<()> {
    let pump = source.load()?;
    export_json(&pump, output)?;
    println!("✓ Exported {} to {}", pump.identity(), output.display());
    Ok(())
}

fn cmd_plot(
    config_path: &Path,
    output_dir: Option<PathBuf>,
    title: Option<String>,
) -> AppResult<()> {
    let mut config = load_config(config_path)?;
    if output_dir.is_some() {
        config.plot.output_dir = output_dir;
    }
    if title.is_some() {
        config.plot.title = title;
    }

    let result = run_config(&config)?;
    println!("Chart with {} layers:", result.layer_count);
    for entry in &result.legend {
        println!("  {}", entry.label);
    }
    match result.artifact {
        Some(path) => println!("✓ Saved {}", path.display()),
        None => println!("(no output_dir set; nothing written)"),
    }
    Ok(())
}

fn cmd_validate_config(config_path: &Path) -> AppResult<()> {
    println!("Validating config: {}", config_path.display());
    let config = load_config(config_path)?;
    println!("✓ Config is valid");
    println!("  Source: {}", config.source.path().display());
    println!("  Speeds: {:?}", config.speeds);
    Ok(())
}
