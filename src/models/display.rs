use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

use crate::{
    config::swap::{BPS_DENOMINATOR, PRICE_IMPACT_PLACEHOLDER},
    utils::units::{format_units, pow10},
};

use super::{quote::SwapQuote, token::Token};

/// Figures shown next to a quote. Everything here is derived, never fetched.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SwapDisplay {
    pub rate: String,
    pub minimum_received: String,
    pub price_impact: String,
    pub gas_estimate: String,
}

impl SwapDisplay {
    pub fn derive(
        quote: &SwapQuote,
        from: &Token,
        to: &Token,
        amount_in: U256,
        slippage_bps: u64,
    ) -> Self {
        let output = U256::from_str_radix(&quote.output_amount, 10).unwrap_or(U256::ZERO);
        let to_decimals = to.decimals_or_default();
        let rate = rate_per_unit(output, amount_in, from.decimals_or_default());
        let minimum = minimum_received(output, slippage_bps);

        SwapDisplay {
            rate: format!(
                "1 {} = {} {}",
                from.symbol,
                format_units(rate, to_decimals),
                to.symbol
            ),
            minimum_received: format!("{} {}", format_units(minimum, to_decimals), to.symbol),
            price_impact: price_impact(quote.amount_in_usd, quote.amount_out_usd),
            gas_estimate: gas_estimate(quote.gas_usd),
        }
    }
}

/// Output base units received for one whole unit of the input token.
pub fn rate_per_unit(output: U256, amount_in: U256, in_decimals: u8) -> U256 {
    if amount_in.is_zero() {
        return U256::ZERO;
    }

    pow10(in_decimals)
        .and_then(|unit| output.checked_mul(unit))
        .map(|scaled| scaled / amount_in)
        .unwrap_or(U256::ZERO)
}

/// `output * (10000 - bps) / 10000`, floored.
pub fn minimum_received(output: U256, slippage_bps: u64) -> U256 {
    let kept = BPS_DENOMINATOR.saturating_sub(slippage_bps);

    output
        .checked_mul(U256::from(kept))
        .map(|scaled| scaled / U256::from(BPS_DENOMINATOR))
        // Only reachable for outputs close to U256::MAX.
        .unwrap_or_else(|| output / U256::from(BPS_DENOMINATOR) * U256::from(kept))
}

pub fn price_impact(amount_in_usd: f64, amount_out_usd: f64) -> String {
    if amount_out_usd <= 0.0 || amount_in_usd <= 0.0 {
        return PRICE_IMPACT_PLACEHOLDER.to_string();
    }

    format!("{:.2}%", (1.0 - amount_out_usd / amount_in_usd) * 100.0)
}

pub fn gas_estimate(gas_usd: f64) -> String {
    format!("~${:.4}", gas_usd)
}
