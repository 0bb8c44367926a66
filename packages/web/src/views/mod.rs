mod auth;
pub use auth::Auth;

mod dashboard;
pub use dashboard::{EmployerDashboard, SeekerDashboard};

mod home;
pub use home::Home;
