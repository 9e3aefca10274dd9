//! # nook-domain
//!
//! Pure domain model for the nook home automation hub.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Entities** (state holders with identity: a vacuum's on/off
//!   state, a lock's locked/unlocked state, …)
//! - Define **Devices** (physical things that expose one or more entities)
//! - Define **Events** (state-change and service-call records)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod device;
pub mod entity;
pub mod event;
