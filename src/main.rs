// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{bail, Result};
use arr_estimator::{logging, write_estimates_csv, write_sensitivity_csv, EstimationConfig, Report};
use std::env;
use std::io;

const USAGE: &str = "usage: arr-estimator [tui | export estimates | export sensitivity | report] [--config PATH]";

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();
    let config = load_config(&mut args)?;

    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        [] | ["tui"] => run_ui_mode(config)?,
        ["export", "estimates"] => {
            logging::init_stderr("arr-estimator");
            let table = config.estimates()?;
            write_estimates_csv(&table, io::stdout().lock())?;
        }
        ["export", "sensitivity"] => {
            logging::init_stderr("arr-estimator");
            write_sensitivity_csv(&config, io::stdout().lock())?;
        }
        ["report"] => {
            logging::init_stderr("arr-estimator");
            println!("{}", Report::build(&config)?.to_json()?);
        }
        _ => bail!(USAGE),
    }

    Ok(())
}

/// Pull `--config PATH` out of the argument list; defaults when absent
fn load_config(args: &mut Vec<String>) -> Result<EstimationConfig> {
    let Some(pos) = args.iter().position(|a| a == "--config") else {
        return Ok(EstimationConfig::default());
    };
    if pos + 1 >= args.len() {
        bail!("--config requires a path\n{}", USAGE);
    }
    let path = args.remove(pos + 1);
    args.remove(pos);
    EstimationConfig::from_file(path)
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: EstimationConfig) -> Result<()> {
    if logging::init_file("arr-estimator") {
        tracing::info!(entities = config.entities.len(), "starting dashboard");
    }

    println!("📊 Loading ARR Estimator...");
    println!("Starting UI... (Press 'q' to quit)\n");

    let mut app = ui::App::new(config);
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: EstimationConfig) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use: arr-estimator export estimates");
    std::process::exit(1);
}
