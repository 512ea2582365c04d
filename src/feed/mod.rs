mod client;
mod error;
mod oem;

pub use client::{FeedClient, FeedSource, DEFAULT_FEED_URL};
pub use error::FeedError;
pub use oem::{Header, Measurement, Metadata, StateVectorRecord};
