use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::backends::StreamResolver;
use crate::backends::external_streams::ExternalStream;
use crate::constants::RESOLVE_FAILED_MESSAGE;
use crate::core::{Property, PropertySubscriber};
use crate::models::ContentId;
use crate::utils::StreamError;

#[derive(Debug, Clone, PartialEq)]
pub enum SelectorState {
    Idle,
    Loading {
        content_id: ContentId,
    },
    Loaded {
        content_id: ContentId,
        streams: Vec<ExternalStream>,
        /// Candidate whose resolution is in flight
        resolving_index: Option<usize>,
    },
    Resolved {
        url: String,
    },
    Error {
        message: String,
    },
}

impl SelectorState {
    fn label(&self) -> &'static str {
        match self {
            SelectorState::Idle => "idle",
            SelectorState::Loading { .. } => "loading",
            SelectorState::Loaded { .. } => "loaded",
            SelectorState::Resolved { .. } => "resolved",
            SelectorState::Error { .. } => "error",
        }
    }
}

/// Identity of the current session. Every new load or reset bumps the
/// generation so completions started before it can recognise themselves as stale.
#[derive(Debug, Default)]
struct Session {
    content_id: Option<ContentId>,
    generation: u64,
    resolving_index: Option<usize>,
}

#[derive(Debug)]
struct Inner {
    resolver: Arc<dyn StreamResolver>,
    // State is only published while this lock is held
    session: Mutex<Session>,
    state: Property<SelectorState>,
}

/// Owns the load/resolve lifecycle of one external stream selection.
///
/// Network calls run on spawned tasks; the returned handles may be awaited but
/// never need to be. At most one resolve is in flight per session.
#[derive(Debug, Clone)]
pub struct StreamSelectionCoordinator {
    inner: Arc<Inner>,
}

impl StreamSelectionCoordinator {
    pub fn new(resolver: Arc<dyn StreamResolver>) -> Self {
        Self {
            inner: Arc::new(Inner {
                resolver,
                session: Mutex::new(Session::default()),
                state: Property::new(SelectorState::Idle, "stream_selector_state"),
            }),
        }
    }

    pub fn state(&self) -> SelectorState {
        self.inner.state.get()
    }

    /// Subscribe to state changes. The current state is available immediately.
    pub fn subscribe(&self) -> PropertySubscriber<SelectorState> {
        self.inner.state.subscribe()
    }

    pub async fn content_id(&self) -> Option<ContentId> {
        self.inner.session.lock().await.content_id.clone()
    }

    /// Fetch the candidate streams for `content_id`.
    ///
    /// Ignored while a session for the same id is already loading or loaded.
    pub async fn load(&self, content_id: ContentId) -> Option<JoinHandle<()>> {
        let mut session = self.inner.session.lock().await;

        let duplicate = self.inner.state.with(|state| match state {
            SelectorState::Loading { content_id: current }
            | SelectorState::Loaded {
                content_id: current,
                ..
            } => *current == content_id,
            _ => false,
        });
        if duplicate {
            debug!("Session for {} already active, ignoring load", content_id);
            return None;
        }

        session.generation += 1;
        session.content_id = Some(content_id.clone());
        session.resolving_index = None;
        let generation = session.generation;

        info!("Loading candidate streams for {}", content_id);
        self.inner.state.set(SelectorState::Loading {
            content_id: content_id.clone(),
        });
        drop(session);

        let inner = self.inner.clone();
        Some(tokio::spawn(async move {
            let result = inner.resolver.list_streams(&content_id).await;

            let session = inner.session.lock().await;
            if session.generation != generation {
                debug!("Discarding superseded stream list for {}", content_id);
                return;
            }

            match result {
                Ok(streams) => {
                    info!("Loaded {} candidate streams for {}", streams.len(), content_id);
                    inner.state.set(SelectorState::Loaded {
                        content_id,
                        streams,
                        resolving_index: None,
                    });
                }
                Err(e) => {
                    error!("Failed to load streams for {}: {}", content_id, e);
                    inner.state.set(SelectorState::Error {
                        message: e.to_string(),
                    });
                }
            }
        }))
    }

    /// Resolve the candidate at `index` into a playable URL.
    ///
    /// Only valid once loaded and while no other resolve is pending; otherwise ignored.
    pub async fn resolve(&self, index: usize) -> Option<JoinHandle<()>> {
        let mut session = self.inner.session.lock().await;

        let mut target = None;
        self.inner.state.update_if(|state| match state {
            SelectorState::Loaded {
                content_id,
                resolving_index,
                ..
            } if resolving_index.is_none() => {
                *resolving_index = Some(index);
                target = Some(content_id.clone());
                true
            }
            _ => false,
        });

        let Some(content_id) = target else {
            debug!(
                "Ignoring resolve of stream {} while {}",
                index,
                self.inner.state.with(|state| match state {
                    SelectorState::Loaded { .. } => "another resolve is pending",
                    other => other.label(),
                })
            );
            return None;
        };

        session.resolving_index = Some(index);
        let generation = session.generation;
        drop(session);

        info!("Resolving stream {} for {}", index, content_id);

        let inner = self.inner.clone();
        Some(tokio::spawn(async move {
            let result = inner.resolver.resolve_stream(&content_id, index).await;

            let mut session = inner.session.lock().await;
            if session.generation != generation || session.resolving_index != Some(index) {
                debug!(
                    "Discarding superseded resolve of stream {} for {}",
                    index, content_id
                );
                return;
            }
            session.resolving_index = None;

            match result {
                Ok(response) => match response.playable_url() {
                    Some(url) => {
                        info!("Stream resolved: {}", url);
                        inner.state.set(SelectorState::Resolved {
                            url: url.to_string(),
                        });
                    }
                    None => {
                        warn!(
                            "Resolve of stream {} for {} returned status '{}' without a usable url",
                            index, content_id, response.status
                        );
                        let e = StreamError::Semantic(RESOLVE_FAILED_MESSAGE.to_string());
                        inner.state.set(SelectorState::Error {
                            message: e.to_string(),
                        });
                    }
                },
                Err(e) => {
                    error!("Failed to resolve stream {} for {}: {}", index, content_id, e);
                    inner.state.set(SelectorState::Error {
                        message: e.to_string(),
                    });
                }
            }
        }))
    }

    /// Drop the current session. Pending completions are discarded.
    pub async fn reset(&self) {
        let mut session = self.inner.session.lock().await;
        self.reset_locked(&mut session);
    }

    /// Consume a terminal outcome, resetting the session.
    /// Returns `None` while the session is not resolved or errored.
    pub async fn take_outcome(&self) -> Option<Result<String, String>> {
        let mut session = self.inner.session.lock().await;

        let outcome = match self.inner.state.get() {
            SelectorState::Resolved { url } => Ok(url),
            SelectorState::Error { message } => Err(message),
            SelectorState::Idle | SelectorState::Loading { .. } | SelectorState::Loaded { .. } => {
                return None;
            }
        };

        self.reset_locked(&mut session);
        Some(outcome)
    }

    fn reset_locked(&self, session: &mut Session) {
        if let Some(content_id) = session.content_id.take() {
            debug!("Resetting stream selection session for {}", content_id);
        }
        session.generation += 1;
        session.resolving_index = None;
        self.inner.state.set(SelectorState::Idle);
    }
}
