use crate::utils::error::WpMobileError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tabs shown on the My Site screen
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MySiteTabType {
    All,
    SiteMenu,
    Dashboard,
}

impl MySiteTabType {
    /// Value persisted as the initial screen
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::SiteMenu => "site_menu",
            Self::Dashboard => "dashboard",
        }
    }

    /// Value reported to analytics
    pub fn tracking_label(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::SiteMenu => "site_menu",
            Self::Dashboard => "dashboard",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        [Self::All, Self::SiteMenu, Self::Dashboard]
            .into_iter()
            .find(|tab| tab.label() == label)
    }
}

/// Arm of the My Site default tab experiment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DefaultTabVariant {
    Dashboard,
    #[value(alias = "site_menu")]
    SiteMenu,
}

impl DefaultTabVariant {
    pub fn tab(&self) -> MySiteTabType {
        match self {
            Self::Dashboard => MySiteTabType::Dashboard,
            Self::SiteMenu => MySiteTabType::SiteMenu,
        }
    }

    pub fn tracking_label(&self) -> &'static str {
        self.tab().tracking_label()
    }

    /// Resolve a persisted tracking label; anything other than dashboard is the site menu arm
    pub fn from_tracking_label(label: &str) -> Self {
        if label == MySiteTabType::Dashboard.tracking_label() {
            Self::Dashboard
        } else {
            Self::SiteMenu
        }
    }
}

impl From<DefaultTabVariant> for MySiteTabType {
    fn from(variant: DefaultTabVariant) -> Self {
        variant.tab()
    }
}

impl fmt::Display for DefaultTabVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tracking_label())
    }
}

impl FromStr for DefaultTabVariant {
    type Err = WpMobileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dashboard" => Ok(Self::Dashboard),
            "site_menu" | "site-menu" => Ok(Self::SiteMenu),
            other => Err(WpMobileError::UnknownVariant(other.to_string())),
        }
    }
}
