use std::collections::HashMap;

/// Localized strings used by the Jetpack Social settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringId {
    SubscribeShareMore,
    ConnectSocialProfilesButton,
    ConnectSocialProfilesMessage,
    ConnectNotNowButton,
}

impl StringId {
    /// Key in the locale tables
    pub fn key(&self) -> &'static str {
        match self {
            Self::SubscribeShareMore => "post_settings.jetpack_social.subscribe_share_more",
            Self::ConnectSocialProfilesButton => {
                "post_settings.jetpack_social.connect_social_profiles_button"
            }
            Self::ConnectSocialProfilesMessage => {
                "post_settings.jetpack_social.connect_social_profiles_message"
            }
            Self::ConnectNotNowButton => "post_settings.jetpack_social.connect_not_now_button",
        }
    }
}

pub trait StringProvider: Send + Sync {
    fn get_string(&self, id: StringId) -> String;
}

/// Strings from the bundled rust-i18n locale tables, in the current locale
#[derive(Debug, Clone, Copy, Default)]
pub struct I18nStringProvider;

impl I18nStringProvider {
    pub fn new() -> Self {
        Self
    }
}

impl StringProvider for I18nStringProvider {
    fn get_string(&self, id: StringId) -> String {
        rust_i18n::t!(id.key()).to_string()
    }
}

/// Fixed string table; ids without an entry resolve to their key
#[derive(Debug, Clone, Default)]
pub struct StaticStringProvider {
    strings: HashMap<StringId, String>,
}

impl StaticStringProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_string(mut self, id: StringId, value: impl Into<String>) -> Self {
        self.strings.insert(id, value.into());
        self
    }
}

impl StringProvider for StaticStringProvider {
    fn get_string(&self, id: StringId) -> String {
        self.strings
            .get(&id)
            .cloned()
            .unwrap_or_else(|| id.key().to_string())
    }
}
