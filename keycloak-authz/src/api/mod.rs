//! Host-facing plugin operations.
//!
//! Each module carries the typed request payload for one operation and the
//! executor that serves it. The host's dispatch layer routes request bodies
//! here and forwards the returned [`crate::models::PluginResponse`].

pub mod access_token;
pub mod authenticate;
pub mod authorization_url;
pub mod verify_connection;
