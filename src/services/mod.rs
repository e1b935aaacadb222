pub mod playback_router;
pub mod stream_selection;
pub mod stream_selector;

pub use playback_router::PlaybackRouter;
pub use stream_selection::{SelectorState, StreamSelectionCoordinator};
pub use stream_selector::StreamSelectorController;
