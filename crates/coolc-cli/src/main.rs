// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Cool class-hierarchy command-line interface.
//!
//! This is the main entry point for the `coolc` command. It reads parser
//! output (a JSON program file), builds the class graph, and reports on it.

use clap::{ArgAction, Parser, Subcommand};
use miette::Result;
use tracing_subscriber::EnvFilter;

mod commands;
mod diagnostic;
mod manifest;
mod program;

use commands::Session;
use commands::check::OutputFormat;

/// coolc: class hierarchy analysis for Cool programs
#[derive(Debug, Parser)]
#[command(name = "coolc")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Name of the program entry class (overrides `coolc.toml`)
    #[arg(long, env = "COOLC_ENTRY_CLASS", global = true)]
    entry_class: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check a program's class hierarchy for errors
    Check {
        /// Program file (JSON parser output)
        program: String,

        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the inheritance tree
    Hierarchy {
        /// Program file (JSON parser output)
        program: String,
    },

    /// Test whether one class conforms to another
    Conforms {
        /// Program file (JSON parser output)
        program: String,
        /// Candidate subclass
        sub: String,
        /// Candidate superclass
        sup: String,
    },

    /// Print the least common ancestor of two classes
    Join {
        /// Program file (JSON parser output)
        program: String,
        left: String,
        right: String,
    },

    /// Print attribute layouts and dispatch tables
    Layout {
        /// Program file (JSON parser output)
        program: String,

        /// Only print this class
        #[arg(long)]
        class: Option<String>,
    },
}

impl Command {
    fn program(&self) -> &str {
        match self {
            Command::Check { program, .. }
            | Command::Hierarchy { program }
            | Command::Conforms { program, .. }
            | Command::Join { program, .. }
            | Command::Layout { program, .. } => program,
        }
    }
}

fn main() -> Result<()> {
    // Install miette's fancy error handler
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = Session::open(cli.command.program(), cli.entry_class.as_deref())
        .and_then(|session| run(&cli.command, &session));

    // Exit with appropriate code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("{e:?}");
            std::process::exit(1);
        }
    }
}

fn run(command: &Command, session: &Session) -> Result<()> {
    match command {
        Command::Check { format, .. } => commands::check::run_check(session, *format),
        Command::Hierarchy { .. } => commands::hierarchy::run_hierarchy(session),
        Command::Conforms { sub, sup, .. } => commands::query::run_conforms(session, sub, sup),
        Command::Join { left, right, .. } => commands::query::run_join(session, left, right),
        Command::Layout { class, .. } => commands::layout::run_layout(session, class.as_deref()),
    }
}

fn directive_for_verbosity(v: u8) -> &'static str {
    // Targets are the crates' module paths: the `coolc` binary and the
    // `coolc_core` library. Engine warnings duplicate the rendered
    // diagnostics, so the library stays quiet by default.
    match v {
        0 => "coolc=info,coolc_core=error",
        1 => "coolc=debug,coolc_core=debug",
        _ => "coolc=trace,coolc_core=trace",
    }
}
