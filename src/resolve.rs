//! Entity lookup with a local-then-remote fallback chain.
//!
//! Command options only carry IDs. [`Resolver`] turns an ID into the full
//! entity by asking a [`StateLookup`] first (no I/O), then a [`Requester`]
//! (may hit the network), and finally returning a stub that carries only the
//! ID. A lookup through [`Resolver`] therefore never fails.

use crate::{
    config::Config,
    types::{
        channel::Channel,
        guild::Role,
        id::{
            marker::{ChannelMarker, GuildMarker, RoleMarker, UserMarker},
            Id,
        },
        user::User,
    },
};
use async_trait::async_trait;
use std::{
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    time::Duration,
};
use tracing::{debug, warn};

/// Per-request options forwarded to a [`Requester`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RequestOptions {
    /// Value for the `X-Audit-Log-Reason` header.
    pub reason: Option<String>,
    /// Upper bound for the whole request, retries included.
    pub timeout: Option<Duration>,
}

/// Error returned by a [`Requester`].
#[derive(Debug)]
pub enum RequestError {
    /// Non-success status from Discord.
    Api {
        status: u16,
        body: String,
        route: String,
    },
    /// Transport / network error.
    Transport(String),
    /// Serialisation error.
    Serde(String),
    /// The entity doesn't exist or isn't visible to the application.
    NotFound { route: String },
}

impl Display for RequestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RequestError::Api {
                status,
                body,
                route,
            } => {
                write!(f, "Discord API error {} on {}: {}", status, route, body)
            }
            RequestError::Transport(e) => write!(f, "HTTP transport error: {}", e),
            RequestError::Serde(e) => write!(f, "Serialisation error: {}", e),
            RequestError::NotFound { route } => write!(f, "Not found: {}", route),
        }
    }
}

impl std::error::Error for RequestError {}

/// Remote source of entities, typically a REST client.
#[async_trait]
pub trait Requester: Send + Sync {
    /// `GET /channels/{channel.id}`
    async fn channel(
        &self,
        id: Id<ChannelMarker>,
        options: &RequestOptions,
    ) -> Result<Channel, RequestError>;

    /// `GET /guilds/{guild.id}/roles`
    async fn roles(
        &self,
        guild_id: Id<GuildMarker>,
        options: &RequestOptions,
    ) -> Result<Vec<Role>, RequestError>;

    /// `GET /users/{user.id}`
    async fn user(&self, id: Id<UserMarker>, options: &RequestOptions)
        -> Result<User, RequestError>;
}

/// Local, non-blocking source of entities, typically a gateway cache.
pub trait StateLookup: Send + Sync {
    fn channel(&self, id: Id<ChannelMarker>) -> Option<Channel>;

    fn role(&self, guild_id: Id<GuildMarker>, role_id: Id<RoleMarker>) -> Option<Role>;

    fn user(&self, id: Id<UserMarker>) -> Option<User>;
}

/// Fallback chain over an optional state and an optional requester.
#[derive(Clone, Default)]
pub struct Resolver<'a> {
    state: Option<&'a dyn StateLookup>,
    requester: Option<&'a dyn Requester>,
    options: RequestOptions,
}

impl<'a> Resolver<'a> {
    /// Resolver with no sources; every lookup returns a stub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a resolver honouring [`Config::resolve_remote`] and
    /// [`Config::request`].
    pub fn from_config(
        config: &Config,
        state: Option<&'a dyn StateLookup>,
        requester: Option<&'a dyn Requester>,
    ) -> Self {
        Self {
            state,
            requester: requester.filter(|_| config.resolve_remote),
            options: config.request.clone(),
        }
    }

    #[must_use]
    pub fn with_state(mut self, state: &'a dyn StateLookup) -> Self {
        self.state = Some(state);
        self
    }

    #[must_use]
    pub fn with_requester(mut self, requester: &'a dyn Requester) -> Self {
        self.requester = Some(requester);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Resolve a channel; falls back to [`Channel::stub`].
    pub async fn channel(&self, id: Id<ChannelMarker>) -> Channel {
        if let Some(channel) = self.state.and_then(|state| state.channel(id)) {
            return channel;
        }

        if let Some(requester) = self.requester {
            match requester.channel(id, &self.options).await {
                Ok(channel) => return channel,
                Err(e) => warn!(channel_id = %id, error = %e, "channel lookup failed, using stub"),
            }
        }

        debug!(channel_id = %id, "channel unresolved");
        Channel::stub(id)
    }

    /// Resolve a role; falls back to [`Role::stub`].
    ///
    /// Roles can only be looked up within a guild, so without a `guild_id`
    /// the stub is returned straight away.
    pub async fn role(&self, guild_id: Option<Id<GuildMarker>>, id: Id<RoleMarker>) -> Role {
        let Some(guild_id) = guild_id else {
            return Role::stub(id);
        };

        if let Some(role) = self.state.and_then(|state| state.role(guild_id, id)) {
            return role;
        }

        if let Some(requester) = self.requester {
            match requester.roles(guild_id, &self.options).await {
                Ok(roles) => {
                    if let Some(role) = roles.into_iter().find(|role| role.id == id) {
                        return role;
                    }
                }
                Err(e) => {
                    warn!(guild_id = %guild_id, role_id = %id, error = %e, "role lookup failed, using stub");
                }
            }
        }

        debug!(role_id = %id, "role unresolved");
        Role::stub(id)
    }

    /// Resolve a user; falls back to [`User::stub`].
    pub async fn user(&self, id: Id<UserMarker>) -> User {
        if let Some(user) = self.state.and_then(|state| state.user(id)) {
            return user;
        }

        if let Some(requester) = self.requester {
            match requester.user(id, &self.options).await {
                Ok(user) => return user,
                Err(e) => warn!(user_id = %id, error = %e, "user lookup failed, using stub"),
            }
        }

        debug!(user_id = %id, "user unresolved");
        User::stub(id)
    }
}

impl Debug for Resolver<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Resolver")
            .field("state", &self.state.is_some())
            .field("requester", &self.requester.is_some())
            .field("options", &self.options)
            .finish()
    }
}
