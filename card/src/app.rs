//! Main application state and logic.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use card_core::{Catch, Experience, Phase};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;

use crate::ui::theme::CardTheme;
use crate::worker::{WorkerRequest, WorkerResponse};

/// Pause after the last spirit is caught, so the final cue can play
/// before the loading screen appears.
const COMPLETION_DELAY: Duration = Duration::from_millis(500);

/// A generation transition scheduled for after the completion delay.
///
/// The epoch pins the timer to the hunt it was scheduled in; if the
/// state machine has moved on by the time it fires, it is dropped.
struct PendingGeneration {
    fire_at: Instant,
    epoch: u64,
}

/// Main application state.
pub struct App {
    pub experience: Experience,

    // Channel communication with the generation worker
    request_tx: mpsc::Sender<WorkerRequest>,
    response_rx: mpsc::Receiver<WorkerResponse>,

    // UI state
    pub theme: CardTheme,
    status_message: Option<String>,
    pub animation_frame: u8,

    // Scheduled hunting -> generating transition
    pending_generation: Option<PendingGeneration>,

    // Where the revealed artwork was written, once available
    artwork_path: Option<PathBuf>,

    rng: StdRng,
}

impl App {
    /// Create a new application with channel endpoints to the worker.
    pub fn new(
        request_tx: mpsc::Sender<WorkerRequest>,
        response_rx: mpsc::Receiver<WorkerResponse>,
    ) -> Self {
        Self {
            experience: Experience::new(),
            request_tx,
            response_rx,
            theme: CardTheme::default(),
            status_message: None,
            animation_frame: 0,
            pending_generation: None,
            artwork_path: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Start the spirit hunt from the intro screen.
    pub fn begin_hunt(&mut self) {
        if self.experience.begin(&mut self.rng).is_ok() {
            self.set_status("Clique nos orbes para selar a energia");
        }
    }

    /// Handle a click (or hotkey) on the spirit with the given id.
    pub fn click_spirit(&mut self, id: u8) {
        match self.experience.catch_spirit(id) {
            Catch::Caught { remaining } => {
                self.set_status(format!("Fragmento selado. Restam {remaining}."));
            }
            Catch::HuntComplete => {
                self.set_status("Todos os fragmentos coletados!");
                self.pending_generation = Some(PendingGeneration {
                    fire_at: Instant::now() + COMPLETION_DELAY,
                    epoch: self.experience.epoch(),
                });
            }
            Catch::AlreadyGone | Catch::OutOfPhase => {}
        }
    }

    /// Retry generation from the error screen.
    pub fn retry_generation(&mut self) {
        if matches!(self.experience.phase(), Phase::Error { .. }) {
            self.dispatch_generation();
        }
    }

    /// Reset the whole experience from the reveal screen.
    pub fn reset(&mut self) {
        if self.experience.reset().is_ok() {
            self.pending_generation = None;
            self.artwork_path = None;
            self.clear_status();
        }
    }

    /// Drive timers and drain worker responses. Called every loop turn.
    pub fn pump(&mut self) {
        self.fire_pending_generation();
        self.poll_worker();
    }

    /// Tick for animations.
    pub fn tick(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    /// Path the artwork was saved to, once revealed.
    pub fn artwork_path(&self) -> Option<&PathBuf> {
        self.artwork_path.as_ref()
    }

    /// Get the current status message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Set the status message.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message.
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    fn fire_pending_generation(&mut self) {
        let Some(pending) = &self.pending_generation else {
            return;
        };
        if Instant::now() < pending.fire_at {
            return;
        }

        let scheduled_epoch = pending.epoch;
        self.pending_generation = None;

        // A reset or retry since scheduling would have bumped the epoch.
        if scheduled_epoch != self.experience.epoch() {
            tracing::debug!(scheduled_epoch, "dropping stale generation timer");
            return;
        }

        self.dispatch_generation();
    }

    fn dispatch_generation(&mut self) {
        // Reserve the channel slot first so the phase never moves to
        // Generating without a request actually in flight.
        let permit = match self.request_tx.try_reserve() {
            Ok(permit) => permit,
            Err(_) => {
                // Assign the disjoint field directly: set_status takes &mut self,
                // which conflicts with the immutable borrow held by the reserve.
                self.status_message = Some("O oráculo está ocupado, aguarde...".into());
                return;
            }
        };

        let epoch = match self.experience.start_generation() {
            Ok(epoch) => epoch,
            Err(error) => {
                tracing::warn!(%error, "generation not started");
                return;
            }
        };

        // Assign the disjoint field directly: set_status takes &mut self, which
        // conflicts with the immutable borrow held by the live permit.
        self.status_message = Some("Sincronizando...".into());
        permit.send(WorkerRequest::Generate { epoch });
    }

    fn poll_worker(&mut self) {
        while let Ok(response) = self.response_rx.try_recv() {
            match response {
                WorkerResponse::Generated { epoch, outcome } => {
                    if self.experience.resolve_generation(epoch, outcome) {
                        self.clear_status();
                        if matches!(self.experience.phase(), Phase::Reveal { .. }) {
                            self.save_artwork();
                        }
                    }
                }
            }
        }
    }

    /// Write the revealed artwork next to the process so the terminal
    /// can hand the user a real image file.
    fn save_artwork(&mut self) {
        let Phase::Reveal { artwork, .. } = self.experience.phase() else {
            return;
        };

        let path = PathBuf::from(format!("oraculo-eduarda.{}", artwork.extension()));
        match artwork.bytes() {
            Ok(bytes) => match std::fs::write(&path, bytes) {
                Ok(()) => {
                    self.set_status(format!("Arte salva em {}", path.display()));
                    self.artwork_path = Some(path);
                }
                Err(error) => {
                    tracing::error!(%error, "failed to write artwork");
                    self.set_status("Não foi possível salvar a arte no disco");
                }
            },
            Err(error) => {
                tracing::error!(%error, "artwork payload was not valid base64");
                self.set_status("Não foi possível decodificar a arte");
            }
        }
    }
}
