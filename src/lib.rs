// Playback routing and external stream selection, shared by the CLI in src/main.rs

pub mod backends;
pub mod config;
pub mod constants;
pub mod core;
pub mod models;
pub mod services;
pub mod utils;

pub use backends::{ExternalStreamApi, StreamResolver};
pub use config::{Config, PlaybackConfig};
pub use services::{
    PlaybackRouter, SelectorState, StreamSelectionCoordinator, StreamSelectorController,
};
pub use utils::{StreamError, StreamResult};
