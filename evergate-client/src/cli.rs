use clap::{Parser, Subcommand};

/// Evergate bridge client
///
/// Inspects EVM <-> Everscale token transfers and the static routing tables
/// behind them.
#[derive(Parser, PartialEq, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone()
    }
}

#[derive(Subcommand, Clone, PartialEq, Debug)]
pub enum Command {
    /// Parses a transfer URL and prints the reconstructed transfer step.
    Restore {
        /// Transfer URL path, e.g. /transfer/evm-1/everscale-1/<vault>/<tx>/default
        url: String,
    },
    /// Lists the networks the bridge can route between.
    Networks,
    /// Lists the configured vault/asset pairings.
    Vaults,
}
