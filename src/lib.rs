//! Core of a Discord client library.
//!
//! - [`types`]: Discord API types, including the polymorphic component
//!   codec and the interaction decoder.
//! - [`permissions`]: effective permissions of a member, in a guild or in
//!   a channel.
//! - [`resolve`]: looking up entities referenced by command options, through
//!   local state, then the API, then a stub.
//! - [`events`] and [`cache`]: typed gateway events and the in-memory state
//!   they maintain.
//! - [`handlers`]: routing interactions to handler functions.
//! - [`config`]: library configuration, optionally read from the environment.
//!
//! Sockets, HTTP transport and rate limiting are left to the caller; remote
//! lookups go through the [`resolve::Requester`] trait.

pub mod cache;
pub mod config;
pub mod error;
pub mod events;
pub mod handlers;
pub mod permissions;
pub mod resolve;
pub mod types;
