use serde::{Deserialize, Serialize};

/// Paths reachable without a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicPaths {
    /// Matched exactly.
    pub exact: Vec<String>,
    /// Framework/static asset prefixes, matched with `starts_with`.
    pub asset_prefixes: Vec<String>,
    /// Auth API prefix (token issue, refresh), matched with `starts_with`.
    pub auth_api_prefix: String,
}

impl Default for PublicPaths {
    fn default() -> Self {
        Self {
            exact: vec![
                "/".to_string(),
                "/login".to_string(),
                "/register".to_string(),
                "/health".to_string(),
            ],
            asset_prefixes: vec![
                "/_next".to_string(),
                "/static".to_string(),
                "/assets".to_string(),
                "/favicon.ico".to_string(),
            ],
            auth_api_prefix: "/api/auth".to_string(),
        }
    }
}

impl PublicPaths {
    pub fn is_public(&self, path: &str) -> bool {
        if self.exact.iter().any(|p| p == path) {
            return true;
        }
        if self
            .asset_prefixes
            .iter()
            .any(|prefix| !prefix.is_empty() && path.starts_with(prefix.as_str()))
        {
            return true;
        }
        !self.auth_api_prefix.is_empty() && path.starts_with(self.auth_api_prefix.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_paths() {
        let public = PublicPaths::default();
        assert!(public.is_public("/"));
        assert!(public.is_public("/login"));
        assert!(public.is_public("/register"));
        assert!(!public.is_public("/login/extra"));
        assert!(!public.is_public("/admin"));
    }

    #[test]
    fn test_prefixes() {
        let public = PublicPaths::default();
        assert!(public.is_public("/_next/static/chunks/main.js"));
        assert!(public.is_public("/assets/logo.svg"));
        assert!(public.is_public("/api/auth/token"));
        assert!(public.is_public("/api/auth"));
        assert!(!public.is_public("/api/orders"));
    }

    #[test]
    fn test_empty_prefixes_never_match_everything() {
        let public = PublicPaths {
            exact: vec![],
            asset_prefixes: vec![String::new()],
            auth_api_prefix: String::new(),
        };
        assert!(!public.is_public("/admin"));
    }
}
