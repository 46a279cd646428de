use std::io::Read;
use std::path::PathBuf;

use alloy_primitives::Address;
use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use txsemantics::ArgumentNode;
use txsemantics_dydx::registry::KnownAddressRegistry;
use txsemantics_dydx::{
    ContractRegistry, DEFAULT_DECIMALS, TransactionContext, decimals_for, decode_operate,
};

use crate::config::TokensConfig;
use crate::logging::init_tracing;
use crate::output::{OutputFormat, render_text};

fn parse_output(s: &str) -> Result<OutputFormat, String> {
    s.parse()
}

fn parse_address(s: &str) -> Result<Address, String> {
    s.parse().map_err(|e| format!("Invalid address '{s}': {e}"))
}

fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FORMAT")
        .help("Output format (text, json)")
        .value_parser(parse_output)
        .default_value("text")
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read actions from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(input).with_context(|| format!("Failed to read actions: {input}"))
}

fn decode(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .context("Input is required")?;
    let output = matches
        .get_one::<OutputFormat>("output")
        .copied()
        .unwrap_or(OutputFormat::Text);

    let raw = read_input(input)?;
    let actions: Vec<ArgumentNode> =
        serde_json::from_str(&raw).with_context(|| format!("Invalid argument tree in {input}"))?;
    tracing::debug!(actions = actions.len(), "Decoding operate actions");

    let actions = decode_operate(actions).context("Failed to decode operate actions")?;
    tracing::info!(actions = actions.len(), "Decoded operate actions");

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&actions)?),
        OutputFormat::Text => print!("{}", render_text(&actions)),
    }
    Ok(())
}

fn decimals(matches: &ArgMatches) -> Result<()> {
    let address = matches
        .get_one::<Address>("address")
        .copied()
        .context("Address is required")?;
    let chain_id = matches.get_one::<u64>("chain-id").copied().unwrap_or(1);
    let default = matches
        .get_one::<u8>("default")
        .copied()
        .unwrap_or(DEFAULT_DECIMALS);
    let output = matches
        .get_one::<OutputFormat>("output")
        .copied()
        .unwrap_or(OutputFormat::Text);

    let mut registry = ContractRegistry::new();
    txsemantics_dydx::register(&mut registry);
    if let Some(path) = matches.get_one::<PathBuf>("tokens") {
        let tokens = TokensConfig::from_file(path)?;
        tracing::debug!(
            network_id = tokens.network_id,
            tokens = tokens.tokens.len(),
            "Loaded token config"
        );
        registry.load_chain_metadata(&tokens.chain_metadata());
    }

    let tx = TransactionContext::new(chain_id);
    let dec = decimals_for(&registry, &tx, Some(address), default);
    tracing::info!(%address, chain_id, decimals = dec, "Resolved decimals");

    match output {
        OutputFormat::Json => {
            let report = serde_json::json!({
                "address": address,
                "chain_id": chain_id,
                "decimals": dec,
                "registered": registry.register(chain_id, address),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => println!("{dec}"),
    }
    Ok(())
}

/// app cli
pub struct Cli;
impl Cli {
    pub fn command() -> Command {
        Command::new("txsemantics")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Names and rescales the actions of dYdX SoloMargin operate calls")
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                Arg::new("debug")
                    .short('d')
                    .long("debug")
                    .help("Log at debug level")
                    .global(true)
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("json-logs")
                    .long("json-logs")
                    .help("Write logs as bunyan JSON")
                    .global(true)
                    .action(ArgAction::SetTrue),
            )
            .subcommand(
                Command::new("decode")
                    .about("Decode the actions argument of an operate call")
                    .arg(
                        Arg::new("input")
                            .short('i')
                            .long("input")
                            .value_name("FILE")
                            .help("JSON argument tree of the actions, '-' for stdin")
                            .required(true),
                    )
                    .arg(output_arg()),
            )
            .subcommand(
                Command::new("decimals")
                    .about("Look up the decimals of a token")
                    .arg(
                        Arg::new("address")
                            .short('a')
                            .long("address")
                            .value_name("ADDRESS")
                            .help("Token contract address")
                            .value_parser(parse_address)
                            .required(true),
                    )
                    .arg(
                        Arg::new("chain-id")
                            .long("chain-id")
                            .value_name("CHAIN_ID")
                            .value_parser(value_parser!(u64))
                            .default_value("1"),
                    )
                    .arg(
                        Arg::new("default")
                            .long("default")
                            .value_name("DECIMALS")
                            .help("Decimals to report for unknown tokens")
                            .value_parser(value_parser!(u8))
                            .default_value("18"),
                    )
                    .arg(
                        Arg::new("tokens")
                            .long("tokens")
                            .value_name("TOML")
                            .help("Extra token metadata to register")
                            .value_parser(value_parser!(PathBuf)),
                    )
                    .arg(output_arg()),
            )
    }

    /// Parses the process arguments and runs the selected subcommand
    pub fn execute() -> Result<()> {
        let matches = Self::command().get_matches();
        init_tracing(matches.get_flag("debug"), matches.get_flag("json-logs"))?;

        match matches.subcommand() {
            Some(("decode", sub)) => decode(sub),
            Some(("decimals", sub)) => decimals(sub),
            _ => unreachable!("subcommand is required"),
        }
    }
}
