use std::io::{self, Write};
use std::process::ExitCode;

use log::LevelFilter;

use xvgsma::pipeline::{run_pipeline, OUTPUT_FILE_NAME};
use xvgsma::validate::{parse_period, validate_xvg_path};

const BANNER_WIDTH: usize = 82;

fn title() {
    let inner = BANNER_WIDTH - 4;
    let rule = "-".repeat(BANNER_WIDTH);
    println!("{rule}");
    println!(
        "| {:^inner$} |",
        "Calculate Simple Moving Average (MA) from XVG files"
    );
    println!("| {:inner$} |", "");
    println!(
        "| {:<inner$} |",
        "e.g. gmx energy -f min.edr min-energy.xvg -xvg none"
    );
    println!("| {:<inner$} |", "  or gmx energy -f min.edr min-energy.xvg");
    println!("| {:inner$} |", "");
    println!("{rule}");
    println!();
}

fn prompt(label: &str) -> io::Result<String> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{label:.<20}: ")?;
    stdout.flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(answer.trim().to_string())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let path = prompt("XVG file")?;
    let input = validate_xvg_path(&path)?;
    let period = parse_period(&prompt("Specific a period of time")?)?;
    log::info!("Smoothing {} with a period of {period}", input.display());
    run_pipeline(&input, period, OUTPUT_FILE_NAME)?;
    println!(" + File '{OUTPUT_FILE_NAME}' saved!");
    Ok(())
}

fn main() -> ExitCode {
    let _ = pretty_env_logger::formatted_builder()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .try_init();

    title();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!(" + {err}\n");
            ExitCode::FAILURE
        }
    }
}
