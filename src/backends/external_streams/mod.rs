mod api;
mod types;


pub use api::ExternalStreamApi;
pub use types::{
    AudioInfo, ExternalStream, ExternalStreamsResponse, ResolveResponse, StreamInfo, VideoInfo,
};
