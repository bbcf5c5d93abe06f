mod author;
mod binary;
mod date_time;
mod image;
mod media;
mod relation;

pub use author::AuthorProcessor;
pub use binary::BinaryFileProcessor;
pub use date_time::{DateAndTimeProcessor, DateProcessor, TimeProcessor};
pub use image::ImageProcessor;
pub use media::MediaProcessor;
pub use relation::{RelationListProcessor, RelationProcessor};
