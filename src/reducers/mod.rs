//! Domain reducers consumed by the root `update.rs`.
//!
//! Each query pipeline (parcel queries, places search, demographics,
//! layer/basemap management) lives in its own module. A reducer returns
//! `true` when it consumed the message.

pub mod demographics;
pub mod layers;
pub mod places;
pub mod query;
