//! Endpoint configuration for the backend under test.
//!
//! Built once by the CLI entrypoint from the base URL and passed by
//! reference into every registration routine.

/// Resolved URLs for the backend's resource roots.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub base: String,
    pub user: String,
    pub user_auth: String,
    pub media: String,
    pub auction: String,
}

impl Endpoints {
    /// Builds the endpoint table from a base URL such as `http://localhost:8080`.
    pub fn new(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Self {
            user: format!("{base}/rest/user"),
            user_auth: format!("{base}/rest/user/auth"),
            media: format!("{base}/rest/media"),
            auction: format!("{base}/rest/auction"),
            base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_resource_roots() {
        let endpoints = Endpoints::new("http://localhost:8080");
        assert_eq!(endpoints.user, "http://localhost:8080/rest/user");
        assert_eq!(endpoints.user_auth, "http://localhost:8080/rest/user/auth");
        assert_eq!(endpoints.media, "http://localhost:8080/rest/media");
        assert_eq!(endpoints.auction, "http://localhost:8080/rest/auction");
    }

    #[test]
    fn strips_trailing_slash() {
        let endpoints = Endpoints::new("http://host:1234/");
        assert_eq!(endpoints.base, "http://host:1234");
        assert_eq!(endpoints.media, "http://host:1234/rest/media");
    }
}
