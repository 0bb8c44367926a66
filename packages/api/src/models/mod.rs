//! Data models shared between the identity service and the UI.

mod session;
mod user;

pub use session::{AuthChange, AuthEvent, Session, SignUpRequest, SignUpResponse};
pub use user::{Role, User, UserMetadata};
