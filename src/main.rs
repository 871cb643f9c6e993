use alloy::primitives::Address;
use log::{error, info, warn, LevelFilter};
use simple_logger::SimpleLogger;
use std::{env, error::Error, sync::Arc, time::Duration};
use swap_quote_rs::{
    components::{
        aggregator::AggregatorClient,
        router::prepare_swap,
        tokens::{default_pair, TokenListClient},
    },
    db::settings::SettingsStore,
    models::{context::WalletContext, token::Chain},
    workers::quote_refresh::{QuoteRefresher, SwapInputs},
};
use tokio::time::timeout;

const DEFAULT_DB_PATH: &str = "data/swap-settings";
const QUOTE_WAIT_SECS: u64 = 30;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    SimpleLogger::new()
        .with_colors(true)
        .with_level(LevelFilter::Info)
        .init()?;

    let db_path = env::var("DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
    let store = SettingsStore::open(&db_path)?;
    let mut settings = store.load()?;

    if let Ok(chain) = env::var("CHAIN") {
        settings.chain = chain;
    }
    if let Ok(slippage) = env::var("SLIPPAGE") {
        settings.slippage = slippage;
    }

    let chain = Chain::from_slug(&settings.chain)
        .ok_or_else(|| format!("unsupported chain: {}", settings.chain))?;
    let account = env::var("ACCOUNT")
        .ok()
        .map(|addr| addr.parse::<Address>())
        .transpose()?;
    let ctx = WalletContext { chain, account };

    let token_list = match env::var("TOKEN_LIST_URL") {
        Ok(url) => TokenListClient::with_url(&url)?,
        Err(_) => TokenListClient::new()?,
    };
    let aggregator = match env::var("AGGREGATOR_URL") {
        Ok(url) => AggregatorClient::with_base_url(&url)?,
        Err(_) => AggregatorClient::new()?,
    };

    let tokens = token_list.fetch_tokens(chain.id).await?;
    let (from, to) = default_pair(&chain, &tokens).ok_or("no USDC/USDT in the token list")?;

    info!(
        "{}: quoting {} -> {} ({} tokens listed)",
        chain.slug,
        from.symbol,
        to.symbol,
        tokens.len()
    );

    let mut inputs = SwapInputs::new(ctx);

    inputs.from = Some(from.clone());
    inputs.to = Some(to.clone());
    inputs.slippage = settings.slippage.clone();
    if let Ok(amount) = env::var("AMOUNT") {
        inputs.amount = amount;
    }

    let amount = inputs.amount.clone();
    let refresher = QuoteRefresher::spawn(Arc::new(aggregator), inputs);
    let mut updates = refresher.subscribe();
    let state = timeout(
        Duration::from_secs(QUOTE_WAIT_SECS),
        updates.wait_for(|state| state.seq > 0 && !state.loading),
    )
    .await??
    .clone();

    match (&state.output_amount, &state.display) {
        (Some(output), Some(display)) => {
            info!("{} {} -> {} {}", amount, from.symbol, output, to.symbol);
            info!("rate: {}", display.rate);
            info!("minimum received: {}", display.minimum_received);
            info!("price impact: {}", display.price_impact);
            info!("estimated gas fee: {}", display.gas_estimate);
        }
        _ => match &state.error {
            Some(message) => error!("{}", message),
            None => warn!("no quote for amount {:?}", amount),
        },
    }

    if ctx.is_connected() && state.quote.is_some() {
        match prepare_swap(&ctx, &from, &amount, state.quote.as_ref()) {
            Ok(plan) => {
                if let Some(approval) = &plan.approval {
                    info!("approval needed on {}", approval.to);
                }
                info!("swap call to {} with value {}", plan.swap.to, plan.swap.value);
            }
            Err(e) => error!("swap preparation failed: {}", e),
        }
    }

    refresher.shutdown().await;
    store.save(&settings)?;

    Ok(())
}
