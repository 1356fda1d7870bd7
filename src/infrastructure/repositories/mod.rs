pub mod account_repository;
pub mod video_repository;

pub use account_repository::{AccountRepository, PgAccountRepository};
pub use video_repository::{PgVideoRepository, VideoRepository};
