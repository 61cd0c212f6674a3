pub mod client;
pub mod error;
pub mod types;

pub use client::{BitbucketClient, ResilientDelivery};
pub use types::{BuildState, StatusPayload};
