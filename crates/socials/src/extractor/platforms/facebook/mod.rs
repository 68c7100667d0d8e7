pub mod builder;

pub use builder::Facebook;
