//! Users.

use crate::types::id::{marker::UserMarker, Id};
use serde::{
    de::{Deserializer, Error as DeError},
    Deserialize, Serialize, Serializer,
};

/// A Discord user.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct User {
    pub id: Id<UserMarker>,
    #[serde(rename = "username", default)]
    pub name: String,
    /// Legacy four-digit discriminator; `0` for users on the new username
    /// system.
    #[serde(
        default,
        deserialize_with = "discriminator::deserialize",
        serialize_with = "discriminator::serialize"
    )]
    pub discriminator: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bot: bool,
    #[serde(default)]
    pub system: bool,
}

impl User {
    /// Placeholder carrying only the user's ID.
    pub fn stub(id: Id<UserMarker>) -> Self {
        Self {
            id,
            name: String::new(),
            discriminator: 0,
            global_name: None,
            avatar: None,
            bot: false,
            system: false,
        }
    }

    /// CDN URL of the avatar, or `None` if no avatar is set.
    pub fn avatar_url(&self) -> Option<String> {
        self.avatar.as_ref().map(|hash| {
            format!(
                "https://cdn.discordapp.com/avatars/{}/{}.png",
                self.id, hash
            )
        })
    }

    /// `Username#Discriminator` or just `Username` for the new username system.
    pub fn tag(&self) -> String {
        if self.discriminator == 0 {
            self.name.clone()
        } else {
            format!("{}#{:04}", self.name, self.discriminator)
        }
    }

    /// Mention string, e.g. `<@123>`.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}

/// Discriminators arrive as zero-padded strings ("0001").
mod discriminator {
    use super::{DeError, Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(u16),
            Str(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Num(n) => Ok(n),
            Raw::Str(s) => s.parse().map_err(DeError::custom),
        }
    }

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &u16, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&format_args!("{value:04}"))
    }
}

#[cfg(test)]
mod tests {
    use super::User;
    use crate::types::id::Id;
    use serde_json::json;

    #[test]
    fn tag_with_discriminator() {
        let user: User = serde_json::from_value(json!({
            "id": "789",
            "username": "alice",
            "discriminator": "0001",
            "avatar": null,
        }))
        .unwrap();

        assert_eq!(user.tag(), "alice#0001");
        assert_eq!(serde_json::to_value(&user).unwrap()["discriminator"], "0001");
    }

    #[test]
    fn tag_new_system() {
        let user: User = serde_json::from_value(json!({
            "id": "789",
            "username": "alice",
            "discriminator": "0",
        }))
        .unwrap();

        assert_eq!(user.tag(), "alice");
    }

    #[test]
    fn avatar_url_present() {
        let mut user = User::stub(Id::new(789));
        assert!(user.avatar_url().is_none());

        user.avatar = Some("1a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d".to_owned());
        let url = user.avatar_url().unwrap();

        assert!(url.starts_with("https://cdn.discordapp.com/avatars/789/"));
    }

    #[test]
    fn stub_has_only_id() {
        let stub = User::stub(Id::new(42));

        assert_eq!(stub.id.get(), 42);
        assert!(stub.name.is_empty());
        assert_eq!(stub.mention(), "<@42>");
    }
}
