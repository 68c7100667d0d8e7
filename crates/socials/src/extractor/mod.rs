mod default;
pub mod dispatcher;
pub mod error;
pub mod platform;
pub mod platform_extractor;
pub mod platforms;
pub mod signature;

pub use default::{DEFAULT_TIMEOUT, default_client, default_dispatcher};
pub(crate) use default::DEFAULT_UA;
