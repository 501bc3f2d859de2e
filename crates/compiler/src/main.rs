//! Kiwi Front-End CLI
//!
//! Command-line driver for the scanner: dumps the token stream of a source
//! file (or stdin) for debugging the lexical grammar.

use clap::{CommandFactory, Parser as ClapParser, Subcommand};
use clap_complete::{Shell, generate};
use kiwic::{Scanner, TokenKind};
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

#[derive(ClapParser)]
#[command(name = "kiwic")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Kiwi front end - inspect the token stream of Kiwi source", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token stream of a source file
    Tokens {
        /// Input source file (stdin when omitted)
        input: Option<PathBuf>,

        /// Include COMMENT tokens (filtered by default, as the parser
        /// sees the stream)
        #[arg(long)]
        keep_comments: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Tokens {
            input,
            keep_comments,
        } => {
            run_tokens(input.as_deref(), keep_comments);
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "kiwic", &mut io::stdout());
        }
    }
}

fn run_tokens(input: Option<&std::path::Path>, keep_comments: bool) {
    let (source, name) = match input {
        Some(path) => {
            let source = match std::fs::read_to_string(path) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Error reading {}: {}", path.display(), e);
                    process::exit(1);
                }
            };
            (source, path.display().to_string())
        }
        None => {
            let mut source = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut source) {
                eprintln!("Error reading stdin: {}", e);
                process::exit(1);
            }
            (source, "stdin".to_string())
        }
    };

    let mut scanner = Scanner::with_file_name(&source, name);
    loop {
        let result = if keep_comments {
            scanner.next_token()
        } else {
            scanner.next_significant_token()
        };
        match result {
            Ok(tok) => {
                println!("{}", tok);
                if tok.kind == TokenKind::Eof {
                    break;
                }
            }
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        }
    }
}
