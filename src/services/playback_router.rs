use rand::Rng;
use rand::seq::SliceRandom;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::PlaybackConfig;
use crate::core::{AudioQueue, Navigator, VideoQueue};
use crate::models::{NavigationDecision, PlaybackRequest};

/// Picks the playback back-end for a "play" action.
///
/// Routing never fails: missing items, ids or preferences fall through to the
/// next, more generic destination.
pub struct PlaybackRouter {
    video_queue: Arc<dyn VideoQueue>,
    audio_queue: Arc<dyn AudioQueue>,
    navigator: Arc<dyn Navigator>,
}

impl PlaybackRouter {
    pub fn new(
        video_queue: Arc<dyn VideoQueue>,
        audio_queue: Arc<dyn AudioQueue>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            video_queue,
            audio_queue,
            navigator,
        }
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    pub fn decide(&self, request: PlaybackRequest, config: &PlaybackConfig) -> NavigationDecision {
        self.decide_with_rng(request, config, &mut rand::rng())
    }

    /// Same as [`decide`](Self::decide) with an explicit shuffle source.
    pub fn decide_with_rng<R: Rng + ?Sized>(
        &self,
        request: PlaybackRequest,
        config: &PlaybackConfig,
        rng: &mut R,
    ) -> NavigationDecision {
        let PlaybackRequest {
            mut items,
            items_position,
            start_position,
            replace,
            shuffle,
        } = request;

        if items.iter().any(|item| item.is_audio()) {
            debug!("Routing {} items to the audio queue", items.len());
            self.audio_queue.play_now(items, items_position, shuffle);
            return NavigationDecision::PlayAudioQueue;
        }

        if shuffle {
            items.shuffle(rng);
        }

        let all_external_capable = items.iter().all(|item| item.supports_external_player());
        let external_stream_id = items
            .get(items_position)
            .and_then(|item| item.external_stream_id());
        let is_empty = items.is_empty();

        self.video_queue.set_queue(items, items_position);

        if is_empty {
            debug!("Empty playback queue, nothing to launch");
            return NavigationDecision::NoOp;
        }

        if config.use_external_player && all_external_capable {
            NavigationDecision::ExternalPlayerLaunch {
                start_position: start_position.unwrap_or(Duration::ZERO),
            }
        } else if let Some(content_id) = external_stream_id {
            debug!("Item at {} has external stream id {}", items_position, content_id);
            NavigationDecision::StreamSelectorLaunch {
                content_id,
                item_index: items_position,
                start_position,
                replace,
            }
        } else {
            Self::video_player(config, items_position, start_position, replace, None)
        }
    }

    /// Route the request and hand the resulting destination to the navigator.
    pub fn launch(&self, request: PlaybackRequest, config: &PlaybackConfig) -> NavigationDecision {
        let decision = self.decide(request, config);
        self.dispatch(&decision);
        decision
    }

    /// Continue into the video player once the selector produced a final URL.
    /// The selector screen is always replaced.
    pub fn continue_with_stream(
        &self,
        stream_url: String,
        item_index: usize,
        start_position: Option<Duration>,
        config: &PlaybackConfig,
    ) -> NavigationDecision {
        info!("Continuing to video player with resolved stream {}", stream_url);
        let decision =
            Self::video_player(config, item_index, start_position, true, Some(stream_url));
        self.dispatch(&decision);
        decision
    }

    fn dispatch(&self, decision: &NavigationDecision) {
        if let Some((destination, replace)) = decision.destination() {
            debug!("Navigating to {:?} (replace: {})", destination, replace);
            self.navigator.navigate(destination, replace);
        }
    }

    fn video_player(
        config: &PlaybackConfig,
        item_index: usize,
        start_position: Option<Duration>,
        replace: bool,
        stream_url: Option<String>,
    ) -> NavigationDecision {
        if config.new_video_player {
            NavigationDecision::NewVideoPlayerLaunch {
                item_index,
                start_position,
                replace,
                stream_url,
            }
        } else {
            NavigationDecision::LegacyVideoPlayerLaunch {
                item_index,
                start_position,
                replace,
                stream_url,
            }
        }
    }
}

impl std::fmt::Debug for PlaybackRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackRouter").finish_non_exhaustive()
    }
}
