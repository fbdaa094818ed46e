//! Discord API types.
//!
//! IDs are typed with marker types (see [`id`]) and enums keep unrecognised
//! values in an `Unknown` variant, so payloads from newer API versions still
//! decode.

/// Application commands and interactions.
pub mod application;

/// Functions for building components.
pub mod builders;

/// Channels, messages and components.
pub mod channel;

/// Guilds, members, roles and permissions.
pub mod guild;

/// Type-safe IDs with marker types.
pub mod id;

pub mod user;

pub(crate) mod util;
