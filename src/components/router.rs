use alloy::{
    primitives::{Address, Bytes, TxHash, U256},
    sol,
    sol_types::SolCall,
};
use async_trait::async_trait;
use log::info;
use thiserror::Error;

use crate::{
    config::chains::DEFAULT_DECIMALS,
    models::{context::WalletContext, quote::SwapQuote, token::Token},
    utils::units::parse_units,
};

sol! {
    interface IERC20 {
        function approve(address spender, uint256 amount) external returns (bool);
    }
}

sol! {
    interface IMetaAggregationRouter {
        function swap(bytes rawData) external payable;
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SwapError {
    #[error("Wallet is not connected")]
    NotConnected,

    #[error("No quote to execute")]
    MissingQuote,

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid swap payload: {0}")]
    InvalidPayload(String),

    #[error("Wallet error: {0}")]
    Wallet(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    pub to: Address,
    pub data: Bytes,
    pub value: U256,
}

/// Transactions needed to settle one quote, in sending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapPlan {
    pub approval: Option<ContractCall>,
    pub swap: ContractCall,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapReceipt {
    pub approval: Option<TxHash>,
    pub swap: TxHash,
}

/// Signs and broadcasts a call on behalf of the connected account.
#[async_trait]
pub trait Wallet: Send + Sync {
    async fn send_transaction(&self, call: &ContractCall) -> Result<TxHash, SwapError>;
}

fn parse_address(addr: &str) -> Result<Address, SwapError> {
    addr.parse()
        .map_err(|_| SwapError::InvalidAddress(addr.to_string()))
}

pub fn prepare_swap(
    ctx: &WalletContext,
    from: &Token,
    from_amount: &str,
    quote: Option<&SwapQuote>,
) -> Result<SwapPlan, SwapError> {
    if !ctx.is_connected() {
        return Err(SwapError::NotConnected);
    }

    let quote = quote.ok_or(SwapError::MissingQuote)?;
    let router = parse_address(&quote.router_address)?;
    let raw_data: Bytes = quote
        .encoded_swap_data
        .parse()
        .map_err(|e| SwapError::InvalidPayload(format!("{}", e)))?;

    let (approval, value) = if from.is_native() {
        (None, parse_units(from_amount, DEFAULT_DECIMALS))
    } else {
        let token = parse_address(from.address.as_deref().unwrap_or_default())?;
        let approve = IERC20::approveCall {
            spender: router,
            amount: parse_units(from_amount, from.decimals_or_default()),
        };
        let call = ContractCall {
            to: token,
            data: approve.abi_encode().into(),
            value: U256::ZERO,
        };

        (Some(call), U256::ZERO)
    };

    let swap = ContractCall {
        to: router,
        data: IMetaAggregationRouter::swapCall { rawData: raw_data }
            .abi_encode()
            .into(),
        value,
    };

    Ok(SwapPlan { approval, swap })
}

/// Sends the approval (if any) and then the swap, stopping at the first failure.
pub async fn execute_swap<W: Wallet + ?Sized>(
    wallet: &W,
    plan: &SwapPlan,
) -> Result<SwapReceipt, SwapError> {
    let approval = match &plan.approval {
        Some(call) => {
            let hash = wallet.send_transaction(call).await?;

            info!("approval sent: {}", hash);

            Some(hash)
        }
        None => None,
    };
    let swap = wallet.send_transaction(&plan.swap).await?;

    info!("swap sent: {}", swap);

    Ok(SwapReceipt { approval, swap })
}

pub fn swap_summary(from_amount: &str, from: &Token, to_amount: &str, to: &Token) -> String {
    format!(
        "Swapping {} {} to {} {}",
        from_amount, from.symbol, to_amount, to.symbol
    )
}
