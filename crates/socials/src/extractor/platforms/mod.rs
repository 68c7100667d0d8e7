pub mod facebook;
pub mod instagram;
pub mod tiktok;
pub mod youtube;
