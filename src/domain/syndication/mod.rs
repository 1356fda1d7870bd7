pub mod assembler;
pub mod error;
pub mod format;
pub mod model;
pub mod render;
pub mod request;
pub mod service;

pub use error::SyndicationError;
pub use format::OutputFormat;
pub use model::{FeedEnvelope, FeedItem, InstanceInfo};
pub use request::RawFeedQuery;
pub use service::{RenderedFeed, SyndicationService, SyndicationServiceApi};
