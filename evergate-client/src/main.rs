use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use evergate_client::cli::{Cli, Command};
use evergate_common::models::{
    asset::vaults,
    network::networks,
    transfer::parse_transfer_url,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command() {
        Command::Restore { url } => {
            let step = parse_transfer_url(&url)
                .with_context(|| format!("failed to parse transfer url {url}"))?;
            println!("{step:#?}");
            if let Some(canonical) = step.transfer_url() {
                println!("canonical url: {canonical}");
            }
        }
        Command::Networks => {
            for network in networks() {
                println!(
                    "{:<14} {:<10} chain {:<4} {}",
                    network.id, network.network_type, network.chain_id, network.name
                );
            }
        }
        Command::Vaults => {
            for vault in vaults() {
                println!(
                    "chain {:<4} vault {} token {} tip3 {} ({})",
                    vault.chain_id, vault.vault, vault.token, vault.tip3_root, vault.deposit_type
                );
            }
        }
    }
    Ok(())
}
