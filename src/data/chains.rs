/// Network preset selectable with `--chain`.
#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub name: String,
    pub chain_id: u64,
    pub rpc_url: String,
    pub symbol: String,
}

/// Get a chain configuration preset by name.
pub fn get_chain_config(name: &str) -> Option<ChainConfig> {
    match name.to_lowercase().as_str() {
        "anvil" | "local" | "localhost" => Some(ChainConfig {
            name: "Anvil".to_string(),
            chain_id: 31337,
            rpc_url: "http://127.0.0.1:8545".to_string(),
            symbol: "ETH".to_string(),
        }),
        "sepolia" => Some(ChainConfig {
            name: "Sepolia".to_string(),
            chain_id: 11155111,
            rpc_url: "https://ethereum-sepolia-rpc.publicnode.com".to_string(),
            symbol: "ETH".to_string(),
        }),
        "holesky" => Some(ChainConfig {
            name: "Holesky".to_string(),
            chain_id: 17000,
            rpc_url: "https://ethereum-holesky-rpc.publicnode.com".to_string(),
            symbol: "ETH".to_string(),
        }),
        "ethereum" | "eth" | "mainnet" => Some(ChainConfig {
            name: "Ethereum".to_string(),
            chain_id: 1,
            rpc_url: "https://eth.merkle.io".to_string(),
            symbol: "ETH".to_string(),
        }),
        _ => None,
    }
}

/// Return a list of all supported chain names.
pub fn supported_chains() -> Vec<&'static str> {
    vec!["anvil", "sepolia", "holesky", "ethereum"]
}
