/// Social services that Publicize knows how to share to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublicizeServiceIcon {
    Facebook,
    Instagram,
    LinkedIn,
    Mastodon,
    Tumblr,
    Twitter,
}

impl PublicizeServiceIcon {
    /// Every known service, in display order
    pub const ALL: [PublicizeServiceIcon; 6] = [
        Self::Facebook,
        Self::Instagram,
        Self::LinkedIn,
        Self::Mastodon,
        Self::Tumblr,
        Self::Twitter,
    ];

    /// Service identifier used by the Publicize API
    pub fn service_id(&self) -> &'static str {
        match self {
            Self::Facebook => "facebook",
            Self::Instagram => "instagram-business",
            Self::LinkedIn => "linkedin",
            Self::Mastodon => "mastodon",
            Self::Tumblr => "tumblr",
            Self::Twitter => "twitter",
        }
    }

    pub fn icon_res(&self) -> &'static str {
        match self {
            Self::Facebook => "ic_social_facebook",
            Self::Instagram => "ic_social_instagram",
            Self::LinkedIn => "ic_social_linkedin",
            Self::Mastodon => "ic_social_mastodon",
            Self::Tumblr => "ic_social_tumblr",
            Self::Twitter => "ic_social_twitter",
        }
    }

    pub fn from_service_id(service_id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|icon| icon.service_id() == service_id)
    }
}
