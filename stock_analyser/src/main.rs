//! Command-line entry point of the stock analyser

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use stock_analyser::config::{CONFIG_ENV, DEFAULT_CONFIG_FILE};
use stock_analyser::{Analyser, AnalyserConfig, AnalyserError, AnalysisKind, AnalysisRequest};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stock_analyser")]
#[command(about = "Descriptive and predictive analysis of daily stock prices", long_about = None)]
struct Cli {
    /// Stock ticker, e.g. AAPL
    #[arg(short, long)]
    ticker: String,

    /// First date of the range (YYYY-MM-DD)
    #[arg(short, long)]
    start: NaiveDate,

    /// End of the range (YYYY-MM-DD, exclusive)
    #[arg(short, long)]
    end: NaiveDate,

    /// Days to predict into the future (0-20)
    #[arg(short, long, default_value_t = 5, allow_negative_numbers = true)]
    days: i64,

    /// Read prices from a local CSV file instead of downloading them
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Config file (JSON)
    #[arg(short, long, env = CONFIG_ENV, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Directory for chart CSV files, overrides the config
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Analyses to run (default: all)
    #[arg(value_enum)]
    analyses: Vec<AnalysisKind>,
}

fn main() -> anyhow::Result<ExitCode> {
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AnalyserConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?
        .with_env_overrides();
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }

    let request = match AnalysisRequest::new(&cli.ticker, cli.start, cli.end, cli.days) {
        Ok(request) => request,
        Err(e) => return Ok(notice(e)),
    };

    let loaded = match &cli.csv {
        Some(path) => Analyser::from_csv(request, path),
        None => Analyser::fetch(request, &config),
    };
    let analyser = match loaded {
        Ok(analyser) => analyser,
        Err(e @ AnalyserError::InvalidInput(_)) => return Ok(notice(e)),
        Err(e) => return Err(e).context("loading price data"),
    };

    println!("{}", analyser.summary());

    let analyses = if cli.analyses.is_empty() {
        AnalysisKind::all()
    } else {
        cli.analyses
    };

    for kind in analyses {
        info!(analysis = %kind, "running");
        let output = analyser.run(kind);
        if let Some(report) = output.report {
            println!();
            println!("== {} ==", kind);
            println!("{}", report);
        }
        if let Some(chart) = output.chart {
            let path = chart
                .write_csv(&config.output_dir, analyser.request().ticker())
                .with_context(|| format!("writing {} chart", kind))?;
            println!("{}: {}", kind, path.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Show a rejected input to the user
fn notice(e: AnalyserError) -> ExitCode {
    eprintln!("{}", e);
    ExitCode::from(2)
}
