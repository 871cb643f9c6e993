pub const NATIVE_TOKEN_ADDRESS: &str = "0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE";
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";
pub const DEFAULT_DECIMALS: u8 = 18;

pub const ETHEREUM_CHAIN_ID: u64 = 1;
pub const BSC_CHAIN_ID: u64 = 56;

// (chain id, aggregator slug, native symbol, native name, icon)
pub const KNOWN_CHAINS: [(u64, &str, &str, &str, &str); 2] = [
    (ETHEREUM_CHAIN_ID, "ethereum", "ETH", "Ethereum", "/ethereum.svg"),
    (BSC_CHAIN_ID, "bsc", "BNB", "Binance Coin", "/bnb.svg"),
];
