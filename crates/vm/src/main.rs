//! Kiwi VM CLI
//!
//! Loads an instruction listing, executes it, and reports the final machine
//! state. `--trace` shows the registers after every instruction.

use clap::{Parser as ClapParser, Subcommand};
use kiwi_vm::{Machine, parse_listing};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

#[derive(ClapParser)]
#[command(name = "kiwivm")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Kiwi virtual machine - execute instruction listings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute an instruction listing
    Run {
        /// Listing file (stdin when omitted)
        input: Option<PathBuf>,

        /// Print the registers after every instruction
        #[arg(long)]
        trace: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { input, trace } => run(input.as_deref(), trace),
    }
}

fn run(input: Option<&Path>, trace: bool) {
    let source = match input {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error reading {}: {}", path.display(), e);
                process::exit(1);
            }
        },
        None => {
            let mut source = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut source) {
                eprintln!("Error reading stdin: {}", e);
                process::exit(1);
            }
            source
        }
    };

    let program = match parse_listing(&source) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let mut machine = Machine::new();
    let result = if trace {
        machine.run_traced(&program, |m, instr| {
            let regs = m.regs();
            println!("{:<12} : {} {} {}", instr.to_string(), regs[0], regs[1], regs[2]);
        })
    } else {
        machine.run(&program)
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        process::exit(1);
    }

    let regs = machine.regs();
    println!(
        "r0={} r1={} r2={} sp={}",
        regs[0],
        regs[1],
        regs[2],
        machine.sp()
    );
}
