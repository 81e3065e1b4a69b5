use serde::{Deserialize, Serialize};

/// Publicize connection as seen from the post publish settings screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostSocialConnection {
    pub connection_id: i64,

    /// Publicize service id (e.g. "tumblr")
    pub service: String,

    /// Human readable service name
    pub label: String,

    pub external_id: String,

    /// Name of the connected account on the external service
    pub external_name: String,

    #[serde(default)]
    pub icon_url: String,

    /// Whether sharing to this connection is switched on for the post
    #[serde(default = "default_sharing_enabled")]
    pub is_sharing_enabled: bool,
}

fn default_sharing_enabled() -> bool {
    true
}

impl PostSocialConnection {
    pub fn new(
        connection_id: i64,
        service: impl Into<String>,
        label: impl Into<String>,
        external_id: impl Into<String>,
        external_name: impl Into<String>,
    ) -> Self {
        Self {
            connection_id,
            service: service.into(),
            label: label.into(),
            external_id: external_id.into(),
            external_name: external_name.into(),
            icon_url: String::new(),
            is_sharing_enabled: default_sharing_enabled(),
        }
    }

    pub fn with_icon_url(mut self, icon_url: impl Into<String>) -> Self {
        self.icon_url = icon_url.into();
        self
    }

    pub fn with_sharing_enabled(mut self, enabled: bool) -> Self {
        self.is_sharing_enabled = enabled;
        self
    }

    /// Get a display string for the connection
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.external_name, self.label)
    }
}

/// Auto-share quota for the site's current plan
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ShareLimit {
    #[default]
    Disabled,
    Enabled {
        share_limit: i32,
        publicized_count: i32,
        shared_posts_count: i32,
        shares_remaining: i32,
    },
}

impl ShareLimit {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_builder() {
        let conn = PostSocialConnection::new(1, "linkedin", "LinkedIn", "linkedin.com", "My Profile")
            .with_icon_url("https://example.com/linkedin.png")
            .with_sharing_enabled(false);

        assert_eq!(conn.connection_id, 1);
        assert_eq!(conn.icon_url, "https://example.com/linkedin.png");
        assert!(!conn.is_sharing_enabled);
        assert_eq!(conn.display_name(), "My Profile (LinkedIn)");
    }

    #[test]
    fn test_connection_defaults_from_toml() {
        let conn: PostSocialConnection = toml::from_str(
            r#"
            connection_id = 7
            service = "mastodon"
            label = "Mastodon"
            external_id = "@me@mastodon.social"
            external_name = "me"
            "#,
        )
        .unwrap();

        assert!(conn.is_sharing_enabled);
        assert!(conn.icon_url.is_empty());
    }

    #[test]
    fn test_share_limit_serialization() {
        let limit = ShareLimit::Enabled {
            share_limit: 30,
            publicized_count: 4,
            shared_posts_count: 2,
            shares_remaining: 26,
        };

        let json = serde_json::to_string(&limit).unwrap();
        assert!(json.contains("\"status\":\"enabled\""));

        let parsed: ShareLimit = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, limit);
        assert!(parsed.is_enabled());
        assert!(!ShareLimit::default().is_enabled());
    }
}
