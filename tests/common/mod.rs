pub mod mocks;

use serde_json::{Value, json};
use std::sync::Arc;

use stream_launcher::PlaybackRouter;

use mocks::{RecordingNavigator, RecordingQueue};

pub struct TestApp {
    pub router: Arc<PlaybackRouter>,
    pub queue: Arc<RecordingQueue>,
    pub navigator: Arc<RecordingNavigator>,
}

impl TestApp {
    pub fn new() -> Self {
        let queue = Arc::new(RecordingQueue::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let router = Arc::new(PlaybackRouter::new(
            queue.clone(),
            queue.clone(),
            navigator.clone(),
        ));
        Self {
            router,
            queue,
            navigator,
        }
    }
}

/// Two-candidate listing as returned by the stream service.
pub fn streams_body() -> Value {
    json!({
        "strms": [
            {
                "title": "Movie.2019.1080p",
                "provider": "webshare",
                "quality": "1080p",
                "lang": "CZ",
                "size": "4.2 GB",
                "sid": "s-1080",
                "sinfo": true,
                "linfo": ["cs", "en"],
                "stream_info": {
                    "video": {"codec": "h264", "width": 1920, "height": 1080, "duration": 7200},
                    "audio": {"codec": "ac3", "channels": 6},
                    "langs": {"CZ": 1, "EN": 1},
                    "HEVC": 0
                },
                "subs": [{"lang": "cs"}]
            },
            {
                "title": "Movie.2019.2160p",
                "provider": "webshare",
                "quality": "4K",
                "lang": "EN",
                "size": "18 GB",
                "sid": "s-2160",
                "stream_info": {"HEVC": 1, "fps": 23.976},
                "notifications": "none"
            }
        ]
    })
}
