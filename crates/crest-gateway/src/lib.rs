//! # crest-gateway
//!
//! Event dispatch and state synchronization: routes named gateway payloads
//! into the concurrent entity mirror and fans notifications out to
//! subscribers in order. Transport and REST implementations live behind
//! collaborator traits.

pub mod availability;
pub mod bus;
mod dispatch;
pub mod engine;
pub mod events;
pub mod rest;

#[cfg(test)]
pub(crate) mod testing;

pub use availability::AvailabilityTracker;
pub use bus::{NotificationBus, SubscriberFuture};
pub use engine::GatewayEngine;
pub use events::{EventKind, EventName, GatewayEvent, MemberChunk};
pub use rest::{CurrentApplication, RestClient, RestError};
