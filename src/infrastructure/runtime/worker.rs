//! Initialization routine - runs in a Tokio runtime and performs the startup reads

use std::future::Future;
use std::sync::mpsc::Sender;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::domain::chain::{account_summary, format_moment};
use crate::domain::ConsoleLine;
use crate::infrastructure::runtime::bridge::{InitRequest, RuntimeEvent};
use crate::infrastructure::substrate::{create_provider, AccountId32, ChainProvider};

/// Connect to the configured node and run [`init_sequence`] against it
pub async fn connect_and_init(
    request: InitRequest,
    mut emit: impl FnMut(RuntimeEvent),
) -> Result<()> {
    let endpoint = request.endpoint.display();
    info!(%endpoint, "connecting");
    let provider = create_provider(request.endpoint).await?;

    // Only informational, a node without system_chain is still usable
    let chain = match provider.chain_name().await {
        Ok(chain) => Some(chain),
        Err(err) => {
            info!("system_chain unavailable: {err:#}");
            None
        }
    };
    info!(%endpoint, chain = chain.as_deref().unwrap_or("?"), "connected");
    emit(RuntimeEvent::Connected {
        endpoint: provider.endpoint_name(),
        chain,
    });

    init_sequence(provider.as_ref(), &request.address, emit).await
}

/// Genesis hash, then `Timestamp.Now`, then the account entry, strictly in order
pub async fn init_sequence<P: ChainProvider + ?Sized>(
    provider: &P,
    address: &AccountId32,
    mut emit: impl FnMut(RuntimeEvent),
) -> Result<()> {
    let genesis = provider.genesis_hash().await?;
    emit(RuntimeEvent::Console(ConsoleLine::info(genesis.to_hex())));

    let now = provider.timestamp_now().await?;
    info!(now, human = %format_moment(now), "timestamp");

    let account = provider.account(address).await?;
    info!(
        nonce = account.nonce,
        free = %account.data.free,
        reserved = %account.data.reserved,
        "account"
    );

    emit(RuntimeEvent::Console(ConsoleLine::info(account_summary(
        now, &account,
    ))));
    emit(RuntimeEvent::Finished);
    Ok(())
}

/// Run a routine until it completes or `cancel` fires
///
/// Failures are reported as [`RuntimeEvent::Error`] instead of being dropped.
pub async fn run_routine<F>(routine: F, evt_tx: &Sender<RuntimeEvent>, cancel: CancellationToken)
where
    F: Future<Output = Result<()>>,
{
    tokio::select! {
        _ = cancel.cancelled() => {
            info!("initialization cancelled");
        }
        result = routine => {
            if let Err(err) = result {
                error!("initialization failed: {err:#}");
                let _ = evt_tx.send(RuntimeEvent::Error {
                    message: format!("{err:#}"),
                });
            }
        }
    }
}
