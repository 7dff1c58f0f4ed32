//! Background fetch tasks
//!
//! Each request runs on its own tokio task and reports back over an mpsc channel. The UI loop
//! applies events to the [`Session`], which drops responses that are no longer wanted.

use std::sync::Arc;

use screener_chain::{OptionsChain, OptionsRequest, Session, StockQuote, StockRequest};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::client::{ApiClient, FetchError};

/// Completed fetch, paired with the request that produced it
#[derive(Debug)]
pub enum FetchEvent {
    Stock(StockRequest, Result<StockQuote, FetchError>),
    Options(OptionsRequest, Result<OptionsChain, FetchError>),
}

/// Spawn a stock fetch
pub fn spawn_stock_fetch(
    client: Arc<ApiClient>,
    request: StockRequest,
    event_tx: mpsc::Sender<FetchEvent>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        info!(seq = request.seq, ticker = %request.ticker, "fetching stock");
        let result = client.fetch_stock(&request.ticker).await;
        if event_tx.send(FetchEvent::Stock(request, result)).await.is_err() {
            warn!("Event receiver dropped, stock response lost");
        }
    })
}

/// Spawn an options fetch
pub fn spawn_options_fetch(
    client: Arc<ApiClient>,
    request: OptionsRequest,
    event_tx: mpsc::Sender<FetchEvent>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            seq = request.seq,
            ticker = %request.ticker,
            expiration = ?request.expiration,
            "fetching options"
        );
        let result = client
            .fetch_options(&request.ticker, request.expiration.as_deref())
            .await;
        if event_tx.send(FetchEvent::Options(request, result)).await.is_err() {
            warn!("Event receiver dropped, options response lost");
        }
    })
}

/// Apply a completed fetch to the session.
///
/// Returns the follow-up options request when a stock fetch succeeds.
pub fn apply_event(session: &mut Session, event: FetchEvent) -> Option<OptionsRequest> {
    match event {
        FetchEvent::Stock(request, result) => session.apply_stock(&request, result),
        FetchEvent::Options(request, result) => {
            session.apply_options(&request, result);
            None
        }
    }
}
