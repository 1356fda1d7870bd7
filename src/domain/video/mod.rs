pub mod model;

pub use model::{MediaVariant, VideoOwner, VideoRecord};
