//! Background generation worker.
//!
//! Generation runs off the UI loop on a dedicated task. Requests and
//! responses carry the experience epoch, so the state machine can drop
//! results that arrive after the phase has already moved on.

use std::sync::Arc;

use card_core::{conjure, BirthdayContent, GeneratedImage, Oracle, OracleError};
use tokio::sync::mpsc;

/// Requests from the UI to the worker.
#[derive(Debug)]
pub enum WorkerRequest {
    /// Run both oracle calls for the generation attempt with this epoch.
    Generate { epoch: u64 },
}

/// Responses from the worker back to the UI.
pub enum WorkerResponse {
    Generated {
        epoch: u64,
        outcome: Result<(BirthdayContent, GeneratedImage), OracleError>,
    },
}

/// Spawn the worker task and return the channel endpoints.
pub fn spawn(
    oracle: Arc<dyn Oracle>,
) -> (mpsc::Sender<WorkerRequest>, mpsc::Receiver<WorkerResponse>) {
    let (request_tx, mut request_rx) = mpsc::channel::<WorkerRequest>(8);
    let (response_tx, response_rx) = mpsc::channel::<WorkerResponse>(8);

    tokio::spawn(async move {
        while let Some(request) = request_rx.recv().await {
            match request {
                WorkerRequest::Generate { epoch } => {
                    tracing::info!(epoch, "generation started");
                    let outcome = conjure(oracle.as_ref()).await;
                    if let Err(ref error) = outcome {
                        tracing::error!(%error, epoch, "generation attempt failed");
                    }
                    if response_tx
                        .send(WorkerResponse::Generated { epoch, outcome })
                        .await
                        .is_err()
                    {
                        // UI is gone; stop the worker.
                        break;
                    }
                }
            }
        }
    });

    (request_tx, response_rx)
}
