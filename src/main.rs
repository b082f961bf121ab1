use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use nextday::prelude::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nextday")]
#[command(about = "A k-nearest-neighbors next-day direction backtester for daily bars", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    //run the classification backtest
    Run {
        //path to csv data file (date,open,high,low,close,ticker)
        #[arg(long)]
        data: PathBuf,

        //ticker to analyze (eg spot, aapl)
        #[arg(long)]
        ticker: String,

        //first date of the window (inclusive)
        #[arg(long, default_value = "2019-12-01")]
        start: NaiveDate,

        //last date of the window (inclusive)
        #[arg(long, default_value = "2020-12-01")]
        end: NaiveDate,

        //neighbor count for the classifier
        #[arg(long, default_value = "16")]
        k: usize,

        //fraction of the series used for training
        #[arg(long, default_value = "0.6")]
        train_fraction: f64,

        //output path for the cumulative-return curves csv
        #[arg(long)]
        output_curves_csv: Option<PathBuf>,

        //optional path to save the effective configuration as json
        #[arg(long)]
        save_config: Option<PathBuf>,
    },

    //run from a saved json configuration
    RunConfig {
        //path to a json configuration file
        #[arg(long)]
        config: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            data,
            ticker,
            start,
            end,
            k,
            train_fraction,
            output_curves_csv,
            save_config,
        } => {
            let config = RunConfig {
                data_path: data,
                ticker,
                start_date: start,
                end_date: end,
                k_neighbors: k,
                train_fraction,
                output_curves_csv,
            };

            if let Some(path) = save_config {
                config
                    .to_json_file(&path)
                    .context(format!("Failed to save config to {:?}", path))?;
                println!("Configuration saved to {:?}\n", path);
            }

            run(config)?;
        }
        Commands::RunConfig { config } => {
            let loaded = RunConfig::from_json_file(&config)
                .context(format!("Failed to load config from {:?}", config))?;
            run(loaded)?;
        }
    }

    Ok(())
}

fn run(config: RunConfig) -> Result<()> {
    println!("Nextday Direction Backtester");
    println!("============================\n");

    config.validate().context("Invalid run configuration")?;

    //load data
    println!("Loading data from {:?}...", config.data_path);
    let all_bars = load_csv(&config.data_path)
        .context(format!("Failed to load data from {:?}", config.data_path))?;

    let series = select_series(
        &all_bars,
        &config.ticker,
        config.start_date,
        config.end_date,
    )
    .context("Data selection failed")?;

    println!("Loaded {} bars for {}", series.len(), config.ticker);
    println!(
        "Date range: {} to {}\n",
        series.first().map(|b| b.date).unwrap_or(config.start_date),
        series.last().map(|b| b.date).unwrap_or(config.end_date)
    );

    println!(
        "Classifier: k-NN (k={}), train fraction {:.2}",
        config.k_neighbors, config.train_fraction
    );

    //run the pipeline
    println!("Running backtest...\n");
    let outcome = run_backtest(&config, &series)?;

    //display results
    println!("Backtest Results");
    println!("================\n");
    outcome.report.pretty_print_table();

    println!(
        "\nTrain_data Accuracy: {:.2}",
        outcome.report.train_accuracy
    );
    println!("Test_data Accuracy: {:.2}", outcome.report.test_accuracy);
    println!("Performance ratio: {:.2}", outcome.report.performance_ratio);

    if let Some((instrument, strategy)) = nextday::metrics::curve_endpoints(&outcome.curve) {
        println!(
            "Cumulative test-window return: instrument {:.2}%, strategy {:.2}%",
            instrument, strategy
        );
    }

    //save curves for external plotting if requested
    if let Some(curves_path) = &config.output_curves_csv {
        save_curves_csv(&outcome.curve, curves_path)?;
        println!("\nCumulative return curves saved to {:?}", curves_path);
    }

    Ok(())
}

fn save_curves_csv(curve: &[CurvePoint], path: &PathBuf) -> Result<()> {
    use std::io::Write;

    let mut file = std::fs::File::create(path)?;
    writeln!(file, "date,cumulative_instrument_pct,cumulative_strategy_pct")?;

    for point in curve {
        writeln!(
            file,
            "{},{},{}",
            point.date, point.instrument, point.strategy
        )?;
    }

    Ok(())
}
