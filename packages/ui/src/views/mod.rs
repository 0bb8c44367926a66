mod auth;
pub use auth::AuthView;
