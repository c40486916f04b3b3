//! Assembler CLI driver.
//!
//! Usage:
//!     riscv-assembler [input.asm]
//!
//! Reads the input file (default `input.asm`), writes the machine-code
//! listing to `output.mc`, and exits 1 if either file cannot be opened.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use log::{debug, info};

use riscv_assembler::assemble;
use riscv_assembler::error::AsmError;

const OUTPUT_PATH: &str = "output.mc";

#[derive(Parser, Debug)]
#[command(name = "riscv-assembler")]
#[command(version)]
#[command(about = "Two-pass RV64 assembler producing a hexadecimal machine-code listing")]
struct Args {
    /// Input assembly file
    #[arg(value_name = "INPUT", default_value = "input.asm")]
    input: PathBuf,

    /// Show detailed progress output
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> Result<(), AsmError> {
    let start = Instant::now();

    let source = fs::read_to_string(&args.input).map_err(|source| AsmError::InputOpen {
        path: args.input.display().to_string(),
        source,
    })?;
    info!("assembling {}", args.input.display());

    let listing = assemble(&source);

    fs::write(OUTPUT_PATH, &listing).map_err(|source| AsmError::OutputOpen {
        path: OUTPUT_PATH.to_string(),
        source,
    })?;

    debug!(
        "{} source lines -> {} listing lines in {:.2}ms",
        source.lines().count(),
        listing.lines().count(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let _ = simple_logger::SimpleLogger::new().with_level(level).init();

    match run(&args) {
        Ok(()) => {
            println!("Assembly to machine code conversion complete!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
