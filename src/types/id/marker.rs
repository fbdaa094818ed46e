//! Markers for various resource types, such as channels or users.
//!
//! Markers themselves perform no logical action, and are only used to
//! ensure that IDs of incorrect types aren't used. If IDs were only 64-bit
//! integers then a role's ID may be erroneously used in the place of where
//! a user's ID is required; by using markers it can be ensured that only an
//! ID with a [`RoleMarker`] can be used where a role's ID is required.

/// Marker for application IDs.
///
/// Types such as [`Interaction::application_id`] use this ID marker.
///
/// [`Interaction::application_id`]: crate::types::application::interaction::Interaction::application_id
#[derive(Debug)]
#[non_exhaustive]
pub struct ApplicationMarker;

/// Marker for attachment IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct AttachmentMarker;

/// Marker for channel IDs.
///
/// Types such as [`Channel`] use this ID marker.
///
/// [`Channel`]: crate::types::channel::Channel
#[derive(Debug)]
#[non_exhaustive]
pub struct ChannelMarker;

/// Marker for command IDs.
///
/// Types such as [`CommandData`] use this ID marker.
///
/// [`CommandData`]: crate::types::application::interaction::application_command::CommandData
#[derive(Debug)]
#[non_exhaustive]
pub struct CommandMarker;

/// Marker for emoji IDs.
///
/// Types such as [`EmojiRef`] use this ID marker.
///
/// [`EmojiRef`]: crate::types::channel::message::component::EmojiRef
#[derive(Debug)]
#[non_exhaustive]
pub struct EmojiMarker;

/// Marker for generic IDs.
///
/// Used where the resource kind is only known at runtime, such as the target
/// of a [`PermissionOverwrite`] or a command's target.
///
/// [`PermissionOverwrite`]: crate::types::channel::permission_overwrite::PermissionOverwrite
#[derive(Debug)]
#[non_exhaustive]
pub struct GenericMarker;

/// Marker for guild IDs.
///
/// Types such as [`Guild`] or [`Channel`] use this ID marker.
///
/// [`Channel`]: crate::types::channel::Channel
/// [`Guild`]: crate::types::guild::Guild
#[derive(Debug)]
#[non_exhaustive]
pub struct GuildMarker;

/// Marker for interaction IDs.
///
/// Types such as [`Interaction`] use this ID marker.
///
/// [`Interaction`]: crate::types::application::interaction::Interaction
#[derive(Debug)]
#[non_exhaustive]
pub struct InteractionMarker;

/// Marker for message IDs.
#[derive(Debug)]
#[non_exhaustive]
pub struct MessageMarker;

/// Marker for role IDs.
///
/// Types such as [`Member`] or [`Role`] use this ID marker.
///
/// [`Member`]: crate::types::guild::Member
/// [`Role`]: crate::types::guild::Role
#[derive(Debug)]
#[non_exhaustive]
pub struct RoleMarker;

/// Marker for SKU IDs, used by premium buttons.
#[derive(Debug)]
#[non_exhaustive]
pub struct SkuMarker;

/// Marker for user IDs.
///
/// Types such as [`Channel`] or [`User`] use this ID marker.
///
/// [`Channel`]: crate::types::channel::Channel
/// [`User`]: crate::types::user::User
#[derive(Debug)]
#[non_exhaustive]
pub struct UserMarker;
