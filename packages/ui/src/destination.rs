//! Where the UI can send the user.

use url::Url;

/// A navigation target produced by the auth screen or the header.
///
/// The four in-app variants correspond to client routes; `External` is a full-page
/// redirect away from the application (OAuth providers).
#[derive(Clone, Debug, PartialEq)]
pub enum Destination {
    Home,
    Auth,
    SeekerDashboard,
    EmployerDashboard,
    External(Url),
}

impl Destination {
    /// The path (or absolute URL for `External`).
    pub fn path(&self) -> &str {
        match self {
            Destination::Home => "/",
            Destination::Auth => "/auth",
            Destination::SeekerDashboard => "/seeker-dashboard",
            Destination::EmployerDashboard => "/employer-dashboard",
            Destination::External(url) => url.as_str(),
        }
    }

    /// Dashboard for a raw role value: `job_seeker` gets the seeker dashboard,
    /// anything else (including no role) the employer dashboard.
    pub fn dashboard_for(raw_role: Option<&str>) -> Self {
        match raw_role {
            Some("job_seeker") => Destination::SeekerDashboard,
            _ => Destination::EmployerDashboard,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Destination::External(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Destination::Home.path(), "/");
        assert_eq!(Destination::Auth.path(), "/auth");
        assert_eq!(Destination::SeekerDashboard.path(), "/seeker-dashboard");
        assert_eq!(Destination::EmployerDashboard.path(), "/employer-dashboard");

        let url = Url::parse("https://demo.supabase.co/auth/v1/authorize?provider=google").unwrap();
        let external = Destination::External(url);
        assert!(external.is_external());
        assert_eq!(
            external.path(),
            "https://demo.supabase.co/auth/v1/authorize?provider=google"
        );
    }

    #[test]
    fn test_dashboard_for_role() {
        assert_eq!(Destination::dashboard_for(Some("job_seeker")), Destination::SeekerDashboard);
        assert_eq!(Destination::dashboard_for(Some("employer")), Destination::EmployerDashboard);
        assert_eq!(Destination::dashboard_for(Some("recruiter")), Destination::EmployerDashboard);
        assert_eq!(Destination::dashboard_for(None), Destination::EmployerDashboard);
    }
}
