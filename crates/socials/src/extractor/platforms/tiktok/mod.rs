pub mod builder;
mod models;
mod utils;

pub use builder::TikTok;
