pub mod syndication;
pub mod video;
