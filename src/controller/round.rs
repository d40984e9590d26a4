use crate::error::CoreError;
use crate::mvu::round::{Deps, Msg, RoundModel, run_effect, update};
use crate::round::{Readout, RoundSession, SessionId};
use crate::services::{ElevationLookup, LocationHint, LocationStream, WeatherLookup};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

struct Shared {
    model: Mutex<RoundModel>,
    session: SessionId,
    cancel: CancellationToken,
    elevation: Arc<dyn ElevationLookup>,
    weather: Arc<dyn WeatherLookup>,
}

impl Shared {
    /// Apply `msg` and run its effects. The model lock is held only while a
    /// message is applied, never across a lookup; results that come back after
    /// the round ended are dropped.
    async fn drive(&self, msg: Msg) {
        let mut effects = {
            let mut model = self.model.lock().await;
            update(&mut model, msg)
        };
        let deps = Deps {
            elevation: self.elevation.as_ref(),
            weather: self.weather.as_ref(),
        };
        while let Some(effect) = effects.pop() {
            let result = run_effect(effect, self.session, deps).await;
            if self.cancel.is_cancelled() {
                tracing::debug!(session = ?self.session, "round ended, dropping lookup result");
                return;
            }
            let mut model = self.model.lock().await;
            effects.extend(update(&mut model, result));
        }
    }
}

/// The live round screen: one session, its lookups and its location feed.
pub struct RoundHandle {
    shared: Arc<Shared>,
    tracker: Mutex<Option<JoinHandle<()>>>,
}

impl RoundHandle {
    #[must_use]
    pub fn start(
        model: RoundModel,
        elevation: Arc<dyn ElevationLookup>,
        weather: Arc<dyn WeatherLookup>,
    ) -> Self {
        let session = model.session.id();
        tracing::info!(?session, tee = model.session.tee().unwrap_or("free roam"), "round started");
        Self {
            shared: Arc::new(Shared {
                model: Mutex::new(model),
                session,
                cancel: CancellationToken::new(),
                elevation,
                weather,
            }),
            tracker: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.shared.session
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        !self.shared.cancel.is_cancelled()
    }

    /// Apply a UI event and return any notices it raised.
    ///
    /// # Errors
    /// `CoreError::OutOfRange` once the round has ended.
    pub async fn dispatch(&self, msg: Msg) -> Result<Vec<String>, CoreError> {
        if !self.is_live() {
            return Err(CoreError::OutOfRange("round has ended".into()));
        }
        self.shared.drive(msg).await;
        Ok(self.take_notices().await)
    }

    pub async fn take_notices(&self) -> Vec<String> {
        self.shared.model.lock().await.take_notices()
    }

    pub async fn readout(&self) -> Readout {
        self.shared.model.lock().await.session.current_readout()
    }

    /// Copy of the current session state.
    pub async fn session(&self) -> RoundSession {
        self.shared.model.lock().await.session.clone()
    }

    /// Subscribe to position fixes and feed them into the session until
    /// [`RoundHandle::end_round`] is called or the source stops.
    ///
    /// # Errors
    /// `CoreError::OutOfRange` if the round has ended, or the source's
    /// subscription error.
    pub async fn start_tracking(
        &self,
        source: &dyn LocationStream,
        hint: LocationHint,
    ) -> Result<(), CoreError> {
        if !self.is_live() {
            return Err(CoreError::OutOfRange("round has ended".into()));
        }
        let mut subscription = source.subscribe(hint)?;
        let shared = Arc::clone(&self.shared);
        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    () = shared.cancel.cancelled() => break,
                    fix = subscription.next() => match fix {
                        Some(point) => shared.drive(Msg::LocationUpdated(point)).await,
                        None => break,
                    },
                }
            }
            tracing::debug!(session = ?shared.session, "location tracking stopped");
        });

        let mut tracker = self.tracker.lock().await;
        if let Some(previous) = tracker.replace(task) {
            previous.abort();
        }
        Ok(())
    }

    /// Wait for the location feed to run dry (the source closed) without
    /// ending the round.
    pub async fn finish_tracking(&self) {
        let task = self.tracker.lock().await.take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "location task ended abnormally");
            }
        }
    }

    /// Tear the round down: stop location tracking and ignore any lookups
    /// still in flight.
    pub async fn end_round(&self) {
        self.shared.cancel.cancel();
        let task = self.tracker.lock().await.take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    tracing::warn!(error = %e, "location task ended abnormally");
                }
            }
        }
        tracing::info!(session = ?self.shared.session, "round ended");
    }
}

impl Drop for RoundHandle {
    fn drop(&mut self) {
        self.shared.cancel.cancel();
    }
}
