use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::playback_router::PlaybackRouter;
use super::stream_selection::{SelectorState, StreamSelectionCoordinator};
use crate::config::PlaybackConfig;
use crate::models::{ContentId, NavigationDecision};

/// Drives the stream selector page for one item: loads candidates on open,
/// resolves the chosen one and continues into the video player.
#[derive(Debug)]
pub struct StreamSelectorController {
    coordinator: StreamSelectionCoordinator,
    router: Arc<PlaybackRouter>,
    config: PlaybackConfig,
    content_id: ContentId,
    item_index: usize,
    start_position: Option<Duration>,
}

impl StreamSelectorController {
    pub fn new(
        coordinator: StreamSelectionCoordinator,
        router: Arc<PlaybackRouter>,
        config: PlaybackConfig,
        content_id: ContentId,
        item_index: usize,
        start_position: Option<Duration>,
    ) -> Self {
        Self {
            coordinator,
            router,
            config,
            content_id,
            item_index,
            start_position,
        }
    }

    /// Build a controller for a [`NavigationDecision::StreamSelectorLaunch`].
    pub fn from_decision(
        decision: &NavigationDecision,
        coordinator: StreamSelectionCoordinator,
        router: Arc<PlaybackRouter>,
        config: PlaybackConfig,
    ) -> Option<Self> {
        match decision {
            NavigationDecision::StreamSelectorLaunch {
                content_id,
                item_index,
                start_position,
                ..
            } => Some(Self::new(
                coordinator,
                router,
                config,
                content_id.clone(),
                *item_index,
                *start_position,
            )),
            _ => None,
        }
    }

    pub fn content_id(&self) -> &ContentId {
        &self.content_id
    }

    pub fn coordinator(&self) -> &StreamSelectionCoordinator {
        &self.coordinator
    }

    pub async fn open(&self) -> Option<JoinHandle<()>> {
        self.coordinator.load(self.content_id.clone()).await
    }

    pub async fn select(&self, index: usize) -> Option<JoinHandle<()>> {
        self.coordinator.resolve(index).await
    }

    /// Reload candidates after a failure.
    pub async fn retry(&self) -> Option<JoinHandle<()>> {
        self.coordinator.reset().await;
        self.open().await
    }

    /// Leave the selector without playing anything.
    pub async fn dismiss(&self) {
        self.coordinator.reset().await;
        self.router.navigator().go_back();
    }

    /// Open the selector and wait until a stream is resolved or the session ends.
    ///
    /// A resolved URL is consumed exactly once and forwarded to the video player.
    /// Errors keep the page open so the user can retry or pick another stream.
    pub async fn run(&self) -> Option<NavigationDecision> {
        let mut states = self.coordinator.subscribe();
        self.open().await;

        loop {
            match states.current() {
                SelectorState::Resolved { .. } => {
                    if let Some(Ok(url)) = self.coordinator.take_outcome().await {
                        info!("Stream selected for {}", self.content_id);
                        return Some(self.router.continue_with_stream(
                            url,
                            self.item_index,
                            self.start_position,
                            &self.config,
                        ));
                    }
                }
                SelectorState::Idle => {
                    debug!("Stream selection for {} dismissed", self.content_id);
                    return None;
                }
                SelectorState::Error { message } => {
                    warn!("Stream selection for {} failed: {}", self.content_id, message);
                }
                SelectorState::Loading { .. } | SelectorState::Loaded { .. } => {}
            }

            if !states.wait_for_change().await {
                return None;
            }
        }
    }
}
