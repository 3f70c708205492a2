use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fatedeck::config::CipherConfig;
use fatedeck::key::{format_key, KeyParser, KeyToken, SuitFallback};
use fatedeck::{DeckCipher, Direction, Trace};

mod cli;

use cli::{Cli, Commands, RunArgs};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

#[derive(Serialize)]
struct RunReport<'a> {
    direction: Direction,
    key: String,
    output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<&'a Trace>,
}

#[derive(Serialize)]
struct KeyReport<'a> {
    position: usize,
    card: String,
    #[serde(flatten)]
    token: &'a KeyToken,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => CipherConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CipherConfig::default(),
    };
    if cli.strict {
        config.suit_fallback = SuitFallback::Reject;
    }

    match &cli.command {
        Commands::Encrypt(args) => run(&cli, config, args, Direction::Encrypt),
        Commands::Decrypt(args) => run(&cli, config, args, Direction::Decrypt),
        Commands::ParseKey { key } => parse_key(&cli, config, key),
    }
}

fn run(cli: &Cli, config: CipherConfig, args: &RunArgs, direction: Direction) -> Result<()> {
    let cipher = DeckCipher::with_config(config);
    let tokens = cipher.parse_key(&args.key).context("invalid key")?;
    let text = read_text(args)?;
    let trace = match direction {
        Direction::Encrypt => cipher.encrypt_tokens(&text, &tokens),
        Direction::Decrypt => cipher.decrypt_tokens(&text, &tokens),
    };
    let output = trace
        .try_output_text()
        .context("output cannot be written as text")?;

    if cli.json {
        let report = RunReport {
            direction,
            key: format_key(&tokens),
            output,
            trace: args.trace.then_some(&trace),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if args.trace {
        print_trace(&trace, args.escape);
    }
    println!("{}", shown(&output, args.escape));
    Ok(())
}

/// TEXT from argv, or stdin minus the newline plain output ends with.
fn read_text(args: &RunArgs) -> Result<String> {
    if !args.stdin {
        return Ok(args.text.clone().unwrap_or_default());
    }
    let mut text = io::read_to_string(io::stdin()).context("reading TEXT from stdin")?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

fn shown(text: &str, escape: bool) -> String {
    if escape {
        text.escape_debug().to_string()
    } else {
        text.to_string()
    }
}

fn print_trace(trace: &Trace, escape: bool) {
    for (i, record) in trace.records().iter().enumerate() {
        println!("[{}] {}", i, record.desc);
        println!("    {}", shown(&record.deck.render(), escape));
        if let Some(info) = &record.xor_info {
            for line in info.lines() {
                println!("      {}", line);
            }
        }
    }
}

fn parse_key(cli: &Cli, config: CipherConfig, key: &str) -> Result<()> {
    let tokens = KeyParser::new(config.suit_fallback)
        .parse(key)
        .context("invalid key")?;

    if cli.json {
        let report: Vec<KeyReport<'_>> = tokens
            .iter()
            .enumerate()
            .map(|(i, token)| KeyReport {
                position: i + 1,
                card: token.card(),
                token,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for (i, token) in tokens.iter().enumerate() {
        println!("{:>3}  {:<6} {:<8} {:>3}  {}", i + 1, token.card(), token.suit.name(), token.value, token.raw);
    }
    Ok(())
}
