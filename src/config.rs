//! Library configuration.
//!
//! [`Config`] can be built by hand or, with the `env` feature, read from the
//! process environment after loading a `.env` file:
//!
//! | Variable | Field |
//! |---|---|
//! | `DISCORD_APPLICATION_ID` | [`Config::application_id`] |
//! | `DISCORD_RESOLVE_REMOTE` | [`Config::resolve_remote`] (`true`/`false`, `1`/`0`) |
//! | `DISCORD_AUDIT_REASON` | [`RequestOptions::reason`] |

use crate::{
    resolve::RequestOptions,
    types::id::{marker::ApplicationMarker, Id},
};
use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

pub const APPLICATION_ID_VAR: &str = "DISCORD_APPLICATION_ID";
pub const RESOLVE_REMOTE_VAR: &str = "DISCORD_RESOLVE_REMOTE";
pub const AUDIT_REASON_VAR: &str = "DISCORD_AUDIT_REASON";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Only interactions addressed to this application are routed.
    pub application_id: Option<Id<ApplicationMarker>>,
    /// Whether option resolution may fall back to remote lookups.
    pub resolve_remote: bool,
    /// Options sent with every remote lookup.
    pub request: RequestOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            application_id: None,
            resolve_remote: true,
            request: RequestOptions::default(),
        }
    }
}

impl Config {
    /// Read the configuration from the environment.
    ///
    /// A `.env` file in the working directory or its parents is loaded first,
    /// if there is one. Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a variable is set to an unparsable value.
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a variable is set to an unparsable value.
    pub fn from_lookup(
        mut lookup: impl FnMut(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = non_empty(lookup(APPLICATION_ID_VAR)) {
            let id = raw
                .parse::<Id<ApplicationMarker>>()
                .map_err(|source| ConfigError::invalid(APPLICATION_ID_VAR, &raw, Some(source)))?;
            config.application_id = Some(id);
        }

        if let Some(raw) = non_empty(lookup(RESOLVE_REMOTE_VAR)) {
            config.resolve_remote = match raw.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => return Err(ConfigError::invalid(RESOLVE_REMOTE_VAR, &raw, None)),
            };
        }

        config.request.reason = non_empty(lookup(AUDIT_REASON_VAR));

        Ok(config)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// A configuration variable couldn't be parsed.
#[derive(Debug)]
pub struct ConfigError {
    kind: ConfigErrorType,
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl ConfigError {
    /// Immutable reference to the type of error that occurred.
    #[must_use = "retrieving the type has no effect if left unused"]
    pub const fn kind(&self) -> &ConfigErrorType {
        &self.kind
    }

    /// Consume the error, returning the source error if there is any.
    #[must_use = "consuming the error and retrieving the source has no effect if left unused"]
    pub fn into_source(self) -> Option<Box<dyn Error + Send + Sync>> {
        self.source
    }

    fn invalid(
        name: &'static str,
        value: &str,
        source: Option<std::num::ParseIntError>,
    ) -> Self {
        Self {
            kind: ConfigErrorType::InvalidValue {
                name,
                value: value.to_owned(),
            },
            source: source.map(|source| Box::new(source) as Box<dyn Error + Send + Sync>),
        }
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match &self.kind {
            ConfigErrorType::InvalidValue { name, value } => {
                write!(f, "{name} has an invalid value: {value:?}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|source| &**source as &(dyn Error + 'static))
    }
}

/// Type of [`ConfigError`] that occurred.
#[derive(Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ConfigErrorType {
    /// The variable is set but its value can't be parsed.
    InvalidValue { name: &'static str, value: String },
}
