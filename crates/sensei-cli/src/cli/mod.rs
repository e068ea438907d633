//! Command-line definition for the `sensei` binary.
//!
//! The chat needs no arguments; the flags only tune logging.

pub mod chat;

use clap::Parser;

/// Chat with Sensei Hax, your guide through the cyber dojo.
#[derive(Parser, Debug)]
#[command(name = "sensei", version, about, long_about = None)]
pub struct Cli {
    /// Show only errors on the terminal.
    #[arg(long)]
    pub quiet: bool,

    /// More terminal logging (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
