pub const AGGREGATOR_API_URL: &str = "https://aggregator-api.kyberswap.com";
pub const CLIENT_ID_HEADER: &str = "X-Client-Id";
pub const CLIENT_ID: &str = "Latest";
pub const ROUTE_ENCODE_PATH: &str = "route/encode";
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

pub const TOKEN_LIST_URL: &str = "https://ks-setting.kyberswap.com/api/v1/tokens";
pub const TOKEN_LIST_PAGE_SIZE: u32 = 100;
pub const STABLECOIN_SYMBOLS: [&str; 2] = ["USDC", "USDT"];
