use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChargeFeeBy {
    CurrencyIn,
    CurrencyOut,
}

impl ChargeFeeBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChargeFeeBy::CurrencyIn => "currency_in",
            ChargeFeeBy::CurrencyOut => "currency_out",
        }
    }
}

/// Parameters of a single `route/encode` query. Amounts are base unit integer strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwapQuoteRequest {
    pub token_in: String,
    pub token_out: String,
    pub amount_in: String,
    pub save_gas: Option<bool>,
    /// Basis points as a decimal string.
    pub slippage_tolerance: Option<String>,
    pub is_in_bps: Option<bool>,
    pub charge_fee_by: Option<ChargeFeeBy>,
    pub fee_receiver: Option<String>,
    pub fee_amount: Option<String>,
    pub deadline: Option<String>,
    pub to: Option<String>,
    pub client_data: Option<String>,
}

impl SwapQuoteRequest {
    pub fn new(token_in: &str, token_out: &str, amount_in: &str) -> Self {
        SwapQuoteRequest {
            token_in: token_in.to_string(),
            token_out: token_out.to_string(),
            amount_in: amount_in.to_string(),
            ..Default::default()
        }
    }

    /// Query parameters in wire order. Absent and empty optional fields are left out.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("tokenIn", self.token_in.clone()),
            ("tokenOut", self.token_out.clone()),
            ("amountIn", self.amount_in.clone()),
        ];

        if let Some(save_gas) = self.save_gas {
            pairs.push(("saveGas", save_gas.to_string()));
        }
        push_present(&mut pairs, "slippageTolerance", &self.slippage_tolerance);
        if let Some(is_in_bps) = self.is_in_bps {
            pairs.push(("isInBps", is_in_bps.to_string()));
        }
        if let Some(charge_fee_by) = self.charge_fee_by {
            pairs.push(("chargeFeeBy", charge_fee_by.as_str().to_string()));
        }
        push_present(&mut pairs, "feeReceiver", &self.fee_receiver);
        push_present(&mut pairs, "feeAmount", &self.fee_amount);
        push_present(&mut pairs, "deadline", &self.deadline);
        push_present(&mut pairs, "to", &self.to);
        push_present(&mut pairs, "clientData", &self.client_data);

        pairs
    }
}

fn push_present(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: &Option<String>) {
    if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
        pairs.push((key, value.to_string()));
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteLeg {
    pub pool: String,
    pub token_in: String,
    pub token_out: String,
    pub swap_amount: String,
    pub amount_out: String,
    #[serde(default)]
    pub limit_return_amount: String,
    #[serde(default)]
    pub max_price: String,
    pub exchange: String,
    #[serde(default)]
    pub pool_length: u32,
    #[serde(default)]
    pub pool_type: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct QuoteToken {
    pub address: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    pub decimals: u8,
}

/// Response of the aggregator `route/encode` endpoint.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SwapQuote {
    #[serde(default)]
    pub input_amount: String,
    pub output_amount: String,
    #[serde(default)]
    pub total_gas: u64,
    #[serde(default)]
    pub gas_price_gwei: String,
    #[serde(default)]
    pub gas_usd: f64,
    #[serde(default)]
    pub amount_in_usd: f64,
    #[serde(default)]
    pub amount_out_usd: f64,
    #[serde(default)]
    pub received_usd: f64,
    #[serde(default)]
    pub swaps: Vec<Vec<RouteLeg>>,
    #[serde(default)]
    pub tokens: HashMap<String, QuoteToken>,
    pub encoded_swap_data: String,
    pub router_address: String,
}
