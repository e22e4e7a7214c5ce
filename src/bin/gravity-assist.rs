// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Restore the gravity assist program to its "1202 program alarm" state and run it, then search
//! for the noun and verb that produce the target output

use std::error::Error;
use std::fs::read_to_string;
use std::io::stderr;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Parser;
use gravity_assist::disasm::disassemble;
use gravity_assist::prelude::*;
use gravity_assist::search::{self, ALARM_PARAMS, TARGET_OUTPUT};
use tracing_subscriber::EnvFilter;

const VERSION: &str = concat!(env!("CARGO_CRATE_NAME"), '-', env!("CARGO_PKG_VERSION"));

#[derive(Parser)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = VERSION)]
#[command(about = "Gravity assist program runner", long_about = None)]
struct Args {
    #[arg(help = "File containing the comma-separated program")]
    #[arg(default_value = "input.txt")]
    source: PathBuf,
    #[arg(long, help = "Noun for the initial run")]
    #[arg(default_value_t = ALARM_PARAMS.noun)]
    noun: i64,
    #[arg(long, help = "Verb for the initial run")]
    #[arg(default_value_t = ALARM_PARAMS.verb)]
    verb: i64,
    #[arg(short, long, help = "Output to search for")]
    #[arg(default_value_t = TARGET_OUTPUT, allow_negative_numbers = true)]
    target: i64,
    #[arg(short, long, help = "Number of threads to search with")]
    #[arg(default_value = "1", env = "GRAVITY_ASSIST_JOBS")]
    jobs: NonZeroUsize,
    #[arg(long, help = "Print a trace of the initial run to stderr")]
    trace: bool,
    #[arg(long, help = "Print the disassembled program and exit")]
    disassemble: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(tracing::level_filters::LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(stderr)
        .init();

    let args = Args::parse();

    let text = read_to_string(&args.source)
        .map_err(|e| format!("failed to read {}: {e}", args.source.display()))?;
    let program: Memory = text.parse()?;
    tracing::debug!(len = program.len(), source = %args.source.display(), "loaded program");

    if args.disassemble {
        print!("{}", disassemble(program));
        return Ok(());
    }

    let alarm = Params {
        noun: args.noun,
        verb: args.verb,
    };
    let mut interp = Interpreter::from(search::configure(&program, alarm)?);
    if args.trace {
        interp.start_trace();
    }
    let result = interp.run();
    if let Some(trace) = interp.end_trace() {
        eprint!("{trace}");
    }
    println!("output with {alarm}: {}", result?);

    let found = find_parallel(&program, args.target, args.jobs)?;
    println!("{found} produces {}", args.target);
    println!("answer: {}", found.answer());
    Ok(())
}
