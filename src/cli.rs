use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "fatedeck", version, about = "Fate Deck cipher: encrypt and decrypt text with a hand of cards")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(long, global = true, help = "TOML config file (suit_fallback, mirror_policy, uppercase_plaintext)")]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, help = "Reject key tokens with an unrecognized suit")]
    pub strict: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encrypt TEXT with KEY
    Encrypt(RunArgs),
    /// Decrypt TEXT with KEY
    Decrypt(RunArgs),
    /// Show how KEY is parsed
    ParseKey { key: String },
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[arg(required_unless_present = "stdin")]
    pub text: Option<String>,
    #[arg(long, short, help = "Key, e.g. \"S7 H13 C3 JOKER D5\"")]
    pub key: String,
    #[arg(long, default_value_t = false, help = "Print every intermediate step")]
    pub trace: bool,
    #[arg(
        long,
        conflicts_with = "text",
        help = "Read TEXT from stdin; one trailing newline is dropped"
    )]
    pub stdin: bool,
    #[arg(long, help = "Escape control characters in plain and --trace output")]
    pub escape: bool,
}
