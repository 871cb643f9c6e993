use serde::{Deserialize, Serialize};

use crate::config::chains::{DEFAULT_DECIMALS, KNOWN_CHAINS, NATIVE_TOKEN_ADDRESS};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Token {
    pub symbol: String,
    pub name: String,
    pub icon: String,
    pub balance: String,
    pub value: String,
    pub address: Option<String>,
    pub decimals: Option<u8>,
}

impl Token {
    pub fn is_native(&self) -> bool {
        self.address
            .as_deref()
            .is_some_and(|addr| addr.eq_ignore_ascii_case(NATIVE_TOKEN_ADDRESS))
    }

    pub fn decimals_or_default(&self) -> u8 {
        self.decimals.unwrap_or(DEFAULT_DECIMALS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chain {
    pub id: u64,
    pub slug: &'static str,
    native_symbol: &'static str,
    native_name: &'static str,
    native_icon: &'static str,
}

impl Chain {
    pub fn from_id(id: u64) -> Option<Self> {
        KNOWN_CHAINS
            .iter()
            .find(|(chain_id, ..)| *chain_id == id)
            .map(Self::from_entry)
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        KNOWN_CHAINS
            .iter()
            .find(|(_, chain_slug, ..)| chain_slug.eq_ignore_ascii_case(slug))
            .map(Self::from_entry)
    }

    fn from_entry(entry: &(u64, &'static str, &'static str, &'static str, &'static str)) -> Self {
        let (id, slug, native_symbol, native_name, native_icon) = *entry;

        Chain {
            id,
            slug,
            native_symbol,
            native_name,
            native_icon,
        }
    }

    pub fn native_token(&self) -> Token {
        Token {
            symbol: self.native_symbol.to_string(),
            name: self.native_name.to_string(),
            icon: self.native_icon.to_string(),
            balance: "0".to_string(),
            value: "0".to_string(),
            address: Some(NATIVE_TOKEN_ADDRESS.to_string()),
            decimals: Some(DEFAULT_DECIMALS),
        }
    }
}
