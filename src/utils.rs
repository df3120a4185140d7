use alloy::primitives::{Address, B256, U256};

/// Truncate an address to "0xabcd...ef12" format
pub fn short_address(addr: &Address) -> String {
    let s = format!("{addr}");
    format!("{}...{}", &s[..6], &s[s.len() - 4..])
}

/// Truncate a B256 hash to "0xabcdef...ef12" format
pub fn truncate_hash(hash: &B256) -> String {
    let s = format!("{hash}");
    format!("{}...{}", &s[..8], &s[s.len() - 4..])
}

/// Format a wei amount in whole units with exactly four decimals, rounding
/// half up.
pub fn format_balance(wei: U256) -> String {
    // 1e14 wei per displayed digit
    let step = U256::from(100_000_000_000_000u64);
    let rounded = (wei.saturating_add(step / U256::from(2))) / step;
    let scale = U256::from(10_000u64);
    let whole = rounded / scale;
    let fraction: u64 = (rounded % scale).to();
    format!("{whole}.{fraction:04}")
}

/// Balance line, "--" until the first read lands
pub fn format_balance_with_symbol(wei: Option<U256>, symbol: &str) -> String {
    match wei {
        Some(wei) => format!("{} {symbol}", format_balance(wei)),
        None => format!("-- {symbol}"),
    }
}
