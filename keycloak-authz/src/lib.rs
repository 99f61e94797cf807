//! # keycloak-authz
//!
//! Role-authorization decision core for a continuous-delivery server that
//! delegates login to Keycloak. Request executors deserialize the host's
//! JSON messages, drive the OAuth2 flow through `keycloak-client`, and
//! answer with the wire bodies the host expects.
//!
//! ## Components
//!
//! - `api`: one executor per host operation (authorization URL, token
//!   exchange, authentication, configuration checks)
//! - `authorizer`: evaluates role configurations against a user profile
//! - `membership`: pluggable group-membership backends
//! - `models`: request and response payloads shared across operations
//! - `errors`: error taxonomy for executor failures

pub mod api;
pub mod authorizer;
pub mod errors;
pub mod membership;
pub mod models;
