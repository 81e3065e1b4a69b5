pub mod analytics;
pub mod publicize;
pub mod social;
pub mod tab;

// Re-export main types
pub use analytics::{Stat, TrackedEvent};
pub use publicize::PublicizeServiceIcon;
pub use social::{PostSocialConnection, ShareLimit};
pub use tab::{DefaultTabVariant, MySiteTabType};
