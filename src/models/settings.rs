use serde::{Deserialize, Serialize};

use crate::{
    config::swap::{BPS_DENOMINATOR, DEFAULT_SLIPPAGE},
    utils::units::checked_parse_units,
};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SwapSettings {
    pub chain: String,
    pub slippage: String,
}

impl Default for SwapSettings {
    fn default() -> Self {
        SwapSettings {
            chain: "ethereum".to_string(),
            slippage: DEFAULT_SLIPPAGE.to_string(),
        }
    }
}

/// Slippage percentage ("0.5") to basis points (50). Anything outside 0..=100% is rejected.
pub fn parse_slippage_bps(slippage: &str) -> Option<u64> {
    let bps = checked_parse_units(slippage, 2)?;

    u64::try_from(bps).ok().filter(|bps| *bps <= BPS_DENOMINATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::swap::SLIPPAGE_PRESETS;

    #[test]
    fn test_parse_slippage_bps() {
        assert_eq!(parse_slippage_bps("0.5"), Some(50));
        assert_eq!(parse_slippage_bps("0.05"), Some(5));
        assert_eq!(parse_slippage_bps("1"), Some(100));
        assert_eq!(parse_slippage_bps("100"), Some(10_000));
        assert_eq!(parse_slippage_bps("0"), Some(0));
    }

    #[test]
    fn test_parse_slippage_bps_invalid() {
        assert_eq!(parse_slippage_bps("Custom"), None);
        assert_eq!(parse_slippage_bps(""), None);
        assert_eq!(parse_slippage_bps("100.01"), None);
    }

    #[test]
    fn test_presets_are_valid() {
        for preset in SLIPPAGE_PRESETS {
            assert!(parse_slippage_bps(preset).is_some(), "{}", preset);
        }
    }
}
