use alloy::primitives::Address;

use crate::config::chains::ZERO_ADDRESS;

use super::token::Chain;

/// Wallet and network state handed to the quote and swap code explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletContext {
    pub chain: Chain,
    pub account: Option<Address>,
}

impl WalletContext {
    pub fn new(chain: Chain) -> Self {
        WalletContext {
            chain,
            account: None,
        }
    }

    pub fn with_account(chain: Chain, account: Address) -> Self {
        WalletContext {
            chain,
            account: Some(account),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    /// Destination of the swap output; the zero address while disconnected.
    pub fn recipient(&self) -> String {
        match self.account {
            Some(account) => account.to_string(),
            None => ZERO_ADDRESS.to_string(),
        }
    }
}
