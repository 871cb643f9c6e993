pub const DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_AMOUNT: &str = "1";
pub const DEFAULT_SLIPPAGE: &str = "0.5";
pub const SLIPPAGE_PRESETS: [&str; 4] = ["0.05", "0.1", "0.5", "1"];
pub const BPS_DENOMINATOR: u64 = 10_000;
pub const PRICE_IMPACT_PLACEHOLDER: &str = "< 0.01%";
pub const QUOTE_ERROR_MESSAGE: &str = "Failed to get swap quote. Please try again.";

pub const SETTINGS_TREE_NAME: &str = "swap_settings";
pub const SETTINGS_KEY: &str = "SETTINGS";
