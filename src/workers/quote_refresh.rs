use log::{debug, error, info};
use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio::{sync::watch, task::JoinHandle, time::sleep};

use crate::{
    components::aggregator::QuoteSource,
    config::swap::{DEBOUNCE_MS, DEFAULT_AMOUNT, DEFAULT_SLIPPAGE, QUOTE_ERROR_MESSAGE},
    models::{
        context::WalletContext,
        display::SwapDisplay,
        quote::{SwapQuote, SwapQuoteRequest},
        settings::parse_slippage_bps,
        token::Token,
    },
    utils::units::{from_base_units, parse_units},
};

/// Everything the user can change that affects the quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapInputs {
    pub ctx: WalletContext,
    pub from: Option<Token>,
    pub to: Option<Token>,
    pub amount: String,
    pub slippage: String,
}

impl SwapInputs {
    pub fn new(ctx: WalletContext) -> Self {
        SwapInputs {
            ctx,
            from: None,
            to: None,
            amount: DEFAULT_AMOUNT.to_string(),
            slippage: DEFAULT_SLIPPAGE.to_string(),
        }
    }

    /// Reverses the direction; the quoted output becomes the new input amount.
    pub fn flip(&mut self, output_amount: &str) {
        std::mem::swap(&mut self.from, &mut self.to);
        self.amount = output_amount.to_string();
    }

    fn differs_only_in_slippage(&self, other: &SwapInputs) -> bool {
        self.slippage != other.slippage
            && self.ctx == other.ctx
            && self.from == other.from
            && self.to == other.to
            && self.amount == other.amount
    }

    fn same_market(&self, other: &SwapInputs) -> bool {
        self.ctx.chain == other.ctx.chain && self.from == other.from && self.to == other.to
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuoteState {
    /// Cycle that last wrote this state.
    pub seq: u64,
    pub output_amount: Option<String>,
    pub quote: Option<SwapQuote>,
    pub display: Option<SwapDisplay>,
    pub error: Option<String>,
    pub loading: bool,
    /// Inputs the current quote was fetched for.
    pub quoted_inputs: Option<SwapInputs>,
}

impl QuoteState {
    fn clear_quote(&mut self) {
        self.output_amount = None;
        self.quote = None;
        self.display = None;
        self.quoted_inputs = None;
    }
}

/// Request for the current inputs, or `None` when a quote can not be asked for.
pub fn build_request(inputs: &SwapInputs) -> Option<SwapQuoteRequest> {
    let from = inputs.from.as_ref()?;
    let to = inputs.to.as_ref()?;
    let token_in = from.address.as_deref()?;
    let token_out = to.address.as_deref()?;
    let amount_in = parse_units(&inputs.amount, from.decimals_or_default());

    if amount_in.is_zero() {
        return None;
    }

    let slippage_bps = parse_slippage_bps(&inputs.slippage)?;

    Some(SwapQuoteRequest {
        slippage_tolerance: Some(slippage_bps.to_string()),
        to: Some(inputs.ctx.recipient()),
        ..SwapQuoteRequest::new(token_in, token_out, &amount_in.to_string())
    })
}

fn derive_display(quote: &SwapQuote, inputs: &SwapInputs) -> Option<SwapDisplay> {
    let from = inputs.from.as_ref()?;
    let to = inputs.to.as_ref()?;
    let slippage_bps = parse_slippage_bps(&inputs.slippage)?;
    let amount_in = parse_units(&inputs.amount, from.decimals_or_default());

    Some(SwapDisplay::derive(quote, from, to, amount_in, slippage_bps))
}

fn on_input_change(
    state: &watch::Sender<QuoteState>,
    latest: &AtomicU64,
    previous: &SwapInputs,
    inputs: &SwapInputs,
) {
    // Responses still in flight for the old pair or chain must not land.
    if !previous.same_market(inputs) {
        let seq = latest.fetch_add(1, Ordering::SeqCst) + 1;

        debug!("market changed, quotes before #{} are stale", seq);
    }

    state.send_if_modified(|current| {
        let Some(quoted) = current.quoted_inputs.as_ref() else {
            return false;
        };

        if !quoted.same_market(inputs) {
            current.clear_quote();
            return true;
        }

        if quoted.differs_only_in_slippage(inputs) {
            let display = current
                .quote
                .as_ref()
                .and_then(|quote| derive_display(quote, inputs));

            if let Some(display) = display {
                current.display = Some(display);
                current.quoted_inputs = Some(inputs.clone());
                return true;
            }
        }

        false
    });
}

fn apply_result(
    current: &mut QuoteState,
    seq: u64,
    inputs: SwapInputs,
    result: Result<SwapQuote, String>,
) {
    current.seq = seq;
    current.loading = false;

    match result {
        Ok(quote) => {
            let decimals = inputs
                .to
                .as_ref()
                .map(Token::decimals_or_default)
                .unwrap_or_default();

            current.output_amount = Some(from_base_units(&quote.output_amount, decimals));
            current.display = derive_display(&quote, &inputs);
            current.quote = Some(quote);
            current.quoted_inputs = Some(inputs);
            current.error = None;
        }
        Err(_) => {
            current.clear_quote();
            current.error = Some(QUOTE_ERROR_MESSAGE.to_string());
        }
    }
}

fn dispatch<Q>(
    source: &Arc<Q>,
    state: &Arc<watch::Sender<QuoteState>>,
    latest: &Arc<AtomicU64>,
    inputs: SwapInputs,
) where
    Q: QuoteSource + ?Sized + 'static,
{
    let seq = latest.fetch_add(1, Ordering::SeqCst) + 1;

    let Some(request) = build_request(&inputs) else {
        state.send_modify(|current| {
            current.seq = seq;
            current.loading = false;
            current.error = None;
            current.clear_quote();
        });
        return;
    };

    state.send_modify(|current| {
        current.loading = true;
        current.error = None;
    });

    let source = Arc::clone(source);
    let state = Arc::clone(state);
    let latest = Arc::clone(latest);

    tokio::spawn(async move {
        let chain = inputs.ctx.chain.slug;
        let result = source
            .fetch_quote(chain, &request)
            .await
            .map_err(|e| e.to_string());

        if let Err(e) = &result {
            error!("quote #{} for {} failed: {}", seq, chain, e);
        }

        state.send_if_modified(|current| {
            if latest.load(Ordering::SeqCst) != seq {
                debug!("discarding stale quote #{}", seq);
                return false;
            }

            apply_result(current, seq, inputs, result);
            true
        });
    });
}

async fn run<Q>(
    source: Arc<Q>,
    mut inputs: watch::Receiver<SwapInputs>,
    state: Arc<watch::Sender<QuoteState>>,
    delay: Duration,
) where
    Q: QuoteSource + ?Sized + 'static,
{
    let latest = Arc::new(AtomicU64::new(0));
    let mut previous = inputs.borrow().clone();

    inputs.mark_changed();

    while inputs.changed().await.is_ok() {
        let current = inputs.borrow_and_update().clone();

        on_input_change(&state, &latest, &previous, &current);
        previous = current;

        loop {
            let changed = tokio::select! {
                _ = sleep(delay) => None,
                changed = inputs.changed() => Some(changed.is_ok()),
            };

            match changed {
                None => break,
                Some(false) => return,
                Some(true) => {
                    let current = inputs.borrow_and_update().clone();

                    on_input_change(&state, &latest, &previous, &current);
                    previous = current;
                }
            }
        }

        let snapshot = inputs.borrow_and_update().clone();

        dispatch(&source, &state, &latest, snapshot);
    }

    info!("quote refresh stopped");
}

/// Handle to a running refresh loop. Dropping it (or calling `shutdown`) stops the loop.
pub struct QuoteRefresher {
    inputs: watch::Sender<SwapInputs>,
    state: watch::Receiver<QuoteState>,
    task: JoinHandle<()>,
}

impl QuoteRefresher {
    pub fn spawn<Q>(source: Arc<Q>, inputs: SwapInputs) -> Self
    where
        Q: QuoteSource + ?Sized + 'static,
    {
        Self::spawn_with_delay(source, inputs, Duration::from_millis(DEBOUNCE_MS))
    }

    pub fn spawn_with_delay<Q>(source: Arc<Q>, inputs: SwapInputs, delay: Duration) -> Self
    where
        Q: QuoteSource + ?Sized + 'static,
    {
        let (inputs_tx, inputs_rx) = watch::channel(inputs);
        let (state_tx, state_rx) = watch::channel(QuoteState::default());
        let task = tokio::spawn(run(source, inputs_rx, Arc::new(state_tx), delay));

        QuoteRefresher {
            inputs: inputs_tx,
            state: state_rx,
            task,
        }
    }

    pub fn update<F: FnOnce(&mut SwapInputs)>(&self, modify: F) {
        self.inputs.send_modify(modify);
    }

    pub fn set_amount(&self, amount: &str) {
        self.update(|inputs| inputs.amount = amount.to_string());
    }

    pub fn set_slippage(&self, slippage: &str) {
        self.update(|inputs| inputs.slippage = slippage.to_string());
    }

    pub fn select_from(&self, token: Token) {
        self.update(|inputs| inputs.from = Some(token));
    }

    pub fn select_to(&self, token: Token) {
        self.update(|inputs| inputs.to = Some(token));
    }

    pub fn set_context(&self, ctx: WalletContext) {
        self.update(|inputs| inputs.ctx = ctx);
    }

    pub fn flip(&self) {
        let output = self.state.borrow().output_amount.clone().unwrap_or_default();

        self.update(|inputs| inputs.flip(&output));
    }

    pub fn inputs(&self) -> SwapInputs {
        self.inputs.borrow().clone()
    }

    pub fn state(&self) -> QuoteState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<QuoteState> {
        self.state.clone()
    }

    pub async fn shutdown(self) {
        drop(self.inputs);

        if let Err(e) = self.task.await {
            error!("quote refresh task failed: {:?}", e);
        }
    }
}
