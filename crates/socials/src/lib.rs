pub mod extractor;
pub mod media;

pub use extractor::{default_client, default_dispatcher};
pub use extractor::dispatcher::{Dispatcher, UpstreamConfig};
pub use extractor::error::ExtractorError;
pub use extractor::platform::Platform;
pub use media::DownloadResult;
