use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "counter-tui", about = "Terminal front-end for a deployed Counter contract")]
pub struct Config {
    /// RPC endpoint URL of the node backing the wallet
    #[arg(short, long, env = "COUNTER_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Chain preset (anvil, sepolia, holesky, ethereum)
    #[arg(long)]
    pub chain: Option<String>,

    /// Hex private key used to sign transactions; without it the node's
    /// unlocked accounts are used
    #[arg(long, env = "COUNTER_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Prefill the contract address field
    #[arg(short, long)]
    pub contract: Option<String>,

    /// Wei sent along with every setNum call
    #[arg(long, default_value = "0")]
    pub set_num_value: u128,

    /// Tick rate in milliseconds for UI refresh
    #[arg(long, default_value = "100")]
    pub tick_rate_ms: u64,

    /// Log file (defaults to counter-tui.log in the local data directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .map(|dir| dir.join("counter-tui"))
                .unwrap_or_default()
                .join("counter-tui.log")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["counter-tui"]).unwrap();
        assert!(config.chain.is_none());
        assert!(config.contract.is_none());
        assert_eq!(config.set_num_value, 0);
        assert_eq!(config.tick_rate_ms, 100);
    }

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "counter-tui",
            "--rpc-url",
            "http://127.0.0.1:8545",
            "--contract",
            "0x5FbDB2315678afecb367f032d93F642f64180aa3",
            "--set-num-value",
            "1000",
            "--log-file",
            "/tmp/counter.log",
        ])
        .unwrap();
        assert_eq!(config.rpc_url.as_deref(), Some("http://127.0.0.1:8545"));
        assert_eq!(config.set_num_value, 1000);
        assert_eq!(config.log_path(), PathBuf::from("/tmp/counter.log"));
    }

    #[test]
    fn test_default_log_path_file_name() {
        let config = Config::try_parse_from(["counter-tui"]).unwrap();
        assert!(config.log_path().ends_with("counter-tui.log"));
    }
}
