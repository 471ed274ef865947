//! revenue - aggregate monthly revenue from a CSV file and chart it.

use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Parser};
use log::warn;

use revenue::{generate_sample, ChartRenderer, MonthlyReport, RenderOutcome};

const SAMPLE_START_YEAR: i32 = 2024;
const SAMPLE_MONTHS: u32 = 12;
const CHART_TITLE: &str = "Total revenue by month";

/// Command line arguments for revenue.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    name = env!("CARGO_BIN_NAME"),
    about = "Aggregate monthly revenue from a CSV file and chart it",
    group(ArgGroup::new("input").required(true).args(["csv", "sample"]))
)]
struct Args {
    /// Input CSV file with `date` and `revenue` columns
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    csv: Option<PathBuf>,

    /// Generate sample data (optionally naming the file) and use it as input
    #[arg(
        short,
        long,
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = "sample_revenue.csv"
    )]
    sample: Option<PathBuf>,

    /// Draw the monthly totals as a bar chart
    #[arg(short, long)]
    plot: bool,

    /// Where to save the chart image
    #[arg(short, long, default_value = "revenue_by_month.png")]
    out: PathBuf,

    /// Open the saved chart in the system image viewer
    #[arg(long, requires = "plot")]
    show: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let csv_path = match (&args.csv, &args.sample) {
        (_, Some(sample)) => {
            let path = generate_sample(sample, SAMPLE_START_YEAR, SAMPLE_MONTHS)
                .with_context(|| format!("generating sample data at {}", sample.display()))?;
            println!("sample CSV written to {}", path.display());
            path
        }
        (Some(csv), None) => csv.clone(),
        (None, None) => bail!("no input CSV; use --csv PATH or --sample"),
    };

    let mut report = MonthlyReport::new();
    report.read_csv(&csv_path)?;
    print!("{report}");

    if args.plot {
        let renderer = ChartRenderer::new();
        if !renderer.is_available() {
            warn!("no drawing backend in this build; skipping chart");
            eprintln!("charting is not available in this build (enable the `plot` feature)");
            return Ok(());
        }
        match renderer.render(&report.series(), Some(&args.out), args.show, CHART_TITLE)? {
            RenderOutcome::NoData => {}
            RenderOutcome::Rendered { saved, .. } => {
                if let Some(path) = saved {
                    println!("chart saved to {}", path.display());
                }
            }
        }
    }
    Ok(())
}
