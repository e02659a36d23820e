//! # prophet-cli
//!
//! Command-line interface for running Prophet forecasts over CSV data.

use clap::{Args, Parser, Subcommand};
use prophet_facade::{
    CsvDatasetLoader, ForecastPoint, ProcessEngine, Prophet, ProphetConfig, Settings,
    FORECAST_SCRIPT,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "prophet=info";

type CliResult<T> = std::result::Result<T, String>;

#[derive(Parser)]
#[command(name = "prophet")]
#[command(about = "Prophet time series forecasting over CSV data", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast a two-column (label, value) CSV file
    Forecast(ForecastArgs),

    /// Print the embedded engine script
    Script,
}

#[derive(Args, Debug, Default)]
struct ForecastArgs {
    /// Input CSV file; the first row is treated as a header
    #[arg(short, long, required_unless_present = "dry_run")]
    input: Option<PathBuf>,

    /// Field delimiter of the input file
    #[arg(short, long, default_value_t = ',')]
    delimiter: char,

    /// JSON settings file ({"prophet": {...}, "engine": {...}})
    #[arg(long)]
    config: Option<PathBuf>,

    /// Flexibility of the trend at changepoints
    #[arg(long)]
    changepoint_prior_scale: Option<f64>,

    /// Share of the history in which changepoints may be placed
    #[arg(long)]
    changepoint_range: Option<f64>,

    /// Width of the uncertainty interval (e.g. 0.95)
    #[arg(long)]
    interval_width: Option<f64>,

    /// Number of future periods to forecast
    #[arg(short, long)]
    periods: Option<u32>,

    /// Frequency code of the future periods (e.g. "10s", "H", "D")
    #[arg(short, long)]
    freq: Option<String>,

    /// Python interpreter running the engine
    #[arg(long, env = "PROPHET_PYTHON")]
    python: Option<String>,

    /// Engine script to run instead of the embedded one
    #[arg(long)]
    script: Option<PathBuf>,

    /// Output file (optional, defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the engine command line instead of running it
    #[arg(long)]
    dry_run: bool,
}

/// Merge the settings file (if any) with command-line flags; flags win.
fn resolve_settings(args: &ForecastArgs) -> CliResult<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::from_json_file(path).map_err(|e| e.to_string())?,
        None => Settings::default(),
    };

    let overrides = ProphetConfig {
        changepoint_prior_scale: args.changepoint_prior_scale,
        changepoint_range: args.changepoint_range,
        interval_width: args.interval_width,
        future_periods: args.periods,
        future_freq: args.freq.clone(),
    };
    settings.prophet = settings.prophet.merged_with(overrides);

    if let Some(python) = &args.python {
        settings.engine.program = python.clone();
    }
    if let Some(script) = &args.script {
        settings.engine.script = Some(script.clone());
    }

    Ok(settings)
}

fn delimiter_byte(delimiter: char) -> CliResult<u8> {
    if !delimiter.is_ascii() {
        return Err(format!("Delimiter '{}' is not a single ASCII character", delimiter));
    }
    Ok(delimiter as u8)
}

/// Write forecast results to file or stdout
fn write_forecast_results(forecast: &[ForecastPoint], output: Option<&PathBuf>) -> CliResult<()> {
    match output {
        Some(path) => {
            let file =
                File::create(path).map_err(|e| format!("Failed to create output: {}", e))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, forecast)
                .map_err(|e| format!("Failed to write JSON: {}", e))?;
            writer
                .flush()
                .map_err(|e| format!("Failed to write output: {}", e))?;
            info!("Forecast written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            serde_json::to_writer_pretty(&mut handle, forecast)
                .map_err(|e| format!("Failed to write JSON: {}", e))?;
            writeln!(handle).map_err(|e| format!("Failed to write output: {}", e))?;
        }
    }
    Ok(())
}

/// Run forecast command
fn run_forecast(args: ForecastArgs) -> CliResult<()> {
    let settings = resolve_settings(&args)?;
    let engine = ProcessEngine::from_config(settings.engine);
    let prophet = Prophet::with_engine(settings.prophet, engine);

    if args.dry_run {
        println!("{}", prophet.engine().command_line(&prophet.args()).join(" "));
        return Ok(());
    }

    let input = args
        .input
        .as_deref()
        .ok_or_else(|| "An input file is required".to_string())?;
    let loader = CsvDatasetLoader::new().with_delimiter(delimiter_byte(args.delimiter)?);
    let dataset = loader.load_file(input).map_err(|e| e.to_string())?;
    info!(
        "Loaded {} data points from {:?}",
        dataset.len(),
        input.file_name().unwrap_or_default()
    );

    let forecast = prophet.forecast(&dataset).map_err(|e| e.to_string())?;
    info!("Received {} forecast points", forecast.len());

    write_forecast_results(&forecast, args.output.as_ref())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .init();
}

fn main() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Forecast(args) => run_forecast(args),
        Commands::Script => {
            print!("{}", FORECAST_SCRIPT);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
