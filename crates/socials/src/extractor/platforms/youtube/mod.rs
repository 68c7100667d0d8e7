pub mod builder;

pub use builder::YouTube;
