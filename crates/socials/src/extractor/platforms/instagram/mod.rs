pub mod builder;

pub use builder::Instagram;
