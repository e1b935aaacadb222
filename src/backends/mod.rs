pub mod external_streams;
pub mod traits;

pub use external_streams::ExternalStreamApi;
pub use traits::StreamResolver;
