mod app;
mod components;
mod config;
mod controller;
mod data;
mod events;
mod logging;
mod theme;
mod utils;
mod view;

use std::sync::Arc;

use alloy::primitives::U256;
use alloy::signers::local::PrivateKeySigner;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use tokio::sync::mpsc;

use crate::app::App;
use crate::components::header::Header;
use crate::config::Config;
use crate::controller::Controller;
use crate::data::wallet::{NodeWallet, Wallet};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = Config::parse();
    let log_path = config.log_path();
    logging::init(&log_path)?;

    // Resolve the node: an explicit URL wins over the chain preset
    let preset = match config.chain.as_deref() {
        Some(name) => Some(data::chains::get_chain_config(name).ok_or_else(|| {
            eyre!(
                "unknown chain '{name}', expected one of: {}",
                data::chains::supported_chains().join(", ")
            )
        })?),
        None => None,
    };
    let rpc_url = config
        .rpc_url
        .clone()
        .or_else(|| preset.as_ref().map(|p| p.rpc_url.clone()));
    let chain_name = preset
        .as_ref()
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "Custom".to_string());
    let symbol = preset
        .as_ref()
        .map(|p| p.symbol.clone())
        .unwrap_or_else(|| "ETH".to_string());

    let signer = config
        .private_key
        .as_deref()
        .map(|key| key.trim().parse::<PrivateKeySigner>())
        .transpose()
        .wrap_err("invalid private key")?;

    let wallet: Option<Arc<dyn Wallet>> = match rpc_url {
        Some(url) => {
            let wallet = NodeWallet::new(&url, signer, U256::from(config.set_num_value))?;
            tracing::info!(
                rpc_url = %url,
                chain = %chain_name,
                chain_id = ?preset.as_ref().map(|p| p.chain_id),
                "wallet configured"
            );
            Some(Arc::new(wallet))
        }
        None => {
            tracing::warn!("no RPC endpoint configured, running without a wallet");
            None
        }
    };

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let header = Header::new(chain_name, wallet.is_some());
    let mut controller = Controller::new(wallet, event_tx);
    if let Some(contract) = config.contract {
        controller.draft_mut().pending_contract_address = contract;
    }

    let mut app = App::new(controller, event_rx, header, symbol, config.tick_rate_ms);

    eprintln!("Logging to {}", log_path.display());

    // Initialize terminal
    let terminal = ratatui::init();
    let result = app.run(terminal).await;

    // Restore terminal
    ratatui::restore();

    result
}
