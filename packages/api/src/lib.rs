//! # API crate: the identity-service boundary for JobKonnect
//!
//! Everything the front end knows about accounts goes through this crate. The
//! hosted identity service (Supabase Auth + PostgREST) owns credentials, sessions,
//! email confirmation and OAuth; this crate only speaks to it.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | [`IdentityService`] / [`ProfileDirectory`] traits, the session-change channel, Supabase configuration |
//! | [`models`] | `User`, `Session`, `Role`, auth events and sign-up payloads |
//! | [`supabase`] | [`SupabaseClient`], the REST implementation of both traits |
//! | [`memory`] | [`MemoryIdentity`], an in-memory implementation for tests and offline work |
//! | [`error`] | [`AuthError`] and [`ConfigError`] |

pub mod auth;
pub mod error;
pub mod memory;
pub mod models;
pub mod supabase;

pub use auth::{
    IdentityService, OAuthProvider, ProfileDirectory, SessionChannel, SessionSubscription,
    SupabaseConfig,
};
pub use error::{AuthError, ConfigError};
pub use memory::MemoryIdentity;
pub use models::{
    AuthChange, AuthEvent, Role, Session, SignUpRequest, SignUpResponse, User, UserMetadata,
};
pub use supabase::SupabaseClient;
