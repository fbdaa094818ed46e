//! Routing interactions to handler functions.
//!
//! [`InteractionRouter`] is an explicit registry: commands are keyed by name,
//! components and modals by custom ID. A custom ID registered with a trailing
//! `:` matches every ID starting with that prefix, so `"reroll:"` handles
//! `"reroll:6"` and `"reroll:20"`.
//!
//! ```
//! use snowcord::{
//!     handlers::InteractionRouter,
//!     types::application::interaction::{InteractionCallbackData, InteractionResponse},
//! };
//!
//! let router = InteractionRouter::new()
//!     .command("ping", |_| InteractionResponse::text("Pong!"))
//!     .component("reroll:", |interaction| {
//!         let sides = interaction
//!             .component_data()
//!             .and_then(|data| data.custom_id_argument())
//!             .unwrap_or("6");
//!
//!         InteractionResponse::update(
//!             InteractionCallbackData::new().content(format!("Rolling a d{sides}")),
//!         )
//!     });
//! # let _ = router;
//! ```

use crate::{
    config::Config,
    types::{
        application::interaction::{Interaction, InteractionResponse, InteractionType},
        id::{marker::ApplicationMarker, Id},
    },
};
use std::{
    collections::HashMap,
    fmt::{Debug, Formatter, Result as FmtResult},
};
use tracing::{debug, info, warn};

/// Function producing the response to an interaction.
pub type Handler = Box<dyn Fn(&Interaction) -> InteractionResponse + Send + Sync>;

/// Handlers keyed by exact ID and by `prefix:`.
#[derive(Default)]
struct Routes {
    exact: HashMap<String, Handler>,
    prefixed: HashMap<String, Handler>,
}

impl Routes {
    fn insert(&mut self, key: String, handler: Handler) {
        match key.strip_suffix(':') {
            Some(prefix) => {
                self.prefixed.insert(prefix.to_owned(), handler);
            }
            None => {
                self.exact.insert(key, handler);
            }
        }
    }

    fn get(&self, key: &str) -> Option<&Handler> {
        self.exact.get(key).or_else(|| {
            let (prefix, _) = key.split_once(':')?;

            self.prefixed.get(prefix)
        })
    }

    fn len(&self) -> usize {
        self.exact.len() + self.prefixed.len()
    }
}

/// Registry of interaction handlers.
#[derive(Default)]
pub struct InteractionRouter {
    application_id: Option<Id<ApplicationMarker>>,
    commands: Routes,
    autocomplete: Routes,
    components: Routes,
    modals: Routes,
}

impl InteractionRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Router that ignores interactions addressed to other applications,
    /// when [`Config::application_id`] is set.
    pub fn with_config(config: &Config) -> Self {
        Self {
            application_id: config.application_id,
            ..Self::default()
        }
    }

    /// Handle the command with the given name.
    #[must_use]
    pub fn command(
        mut self,
        name: impl Into<String>,
        handler: impl Fn(&Interaction) -> InteractionResponse + Send + Sync + 'static,
    ) -> Self {
        self.commands.insert(name.into(), Box::new(handler));
        self
    }

    /// Handle autocomplete requests for the command with the given name.
    #[must_use]
    pub fn autocomplete(
        mut self,
        name: impl Into<String>,
        handler: impl Fn(&Interaction) -> InteractionResponse + Send + Sync + 'static,
    ) -> Self {
        self.autocomplete.insert(name.into(), Box::new(handler));
        self
    }

    /// Handle the component with the given custom ID, or every custom ID
    /// starting with it if it ends with `:`.
    #[must_use]
    pub fn component(
        mut self,
        custom_id: impl Into<String>,
        handler: impl Fn(&Interaction) -> InteractionResponse + Send + Sync + 'static,
    ) -> Self {
        self.components.insert(custom_id.into(), Box::new(handler));
        self
    }

    /// Handle submissions of the modal with the given custom ID; prefixes
    /// work as for [`component`](Self::component).
    #[must_use]
    pub fn modal(
        mut self,
        custom_id: impl Into<String>,
        handler: impl Fn(&Interaction) -> InteractionResponse + Send + Sync + 'static,
    ) -> Self {
        self.modals.insert(custom_id.into(), Box::new(handler));
        self
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.commands.len() + self.autocomplete.len() + self.components.len() + self.modals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Produce the response to an interaction.
    ///
    /// Pings are answered with a pong. Returns `None` if no handler matches,
    /// if the interaction carries no data, or if it is addressed to another
    /// application.
    pub fn dispatch(&self, interaction: &Interaction) -> Option<InteractionResponse> {
        if let Some(application_id) = self.application_id {
            if interaction.application_id != application_id {
                warn!(
                    interaction_id = %interaction.id,
                    application_id = %interaction.application_id,
                    "interaction addressed to another application"
                );

                return None;
            }
        }

        let (routes, key) = match interaction.kind {
            InteractionType::Ping => return Some(InteractionResponse::pong()),
            InteractionType::ApplicationCommand => {
                (&self.commands, interaction.command_data()?.name.as_str())
            }
            InteractionType::ApplicationCommandAutocomplete => {
                (&self.autocomplete, interaction.command_data()?.name.as_str())
            }
            InteractionType::MessageComponent => (
                &self.components,
                interaction.component_data()?.custom_id.as_str(),
            ),
            InteractionType::ModalSubmit => {
                (&self.modals, interaction.modal_data()?.custom_id.as_str())
            }
            InteractionType::Unknown(kind) => {
                info!(kind, "unhandled interaction type");

                return None;
            }
        };

        let Some(handler) = routes.get(key) else {
            info!(kind = interaction.kind.kind(), key, "unhandled interaction");

            return None;
        };

        debug!(kind = interaction.kind.kind(), key, "dispatching interaction");

        Some(handler(interaction))
    }
}

impl Debug for InteractionRouter {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("InteractionRouter")
            .field("application_id", &self.application_id)
            .field("commands", &self.commands.len())
            .field("autocomplete", &self.autocomplete.len())
            .field("components", &self.components.len())
            .field("modals", &self.modals.len())
            .finish()
    }
}
