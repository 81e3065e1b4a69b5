use crate::models::PostSocialConnection;
use std::fmt;
use std::sync::Arc;

/// Click handler without arguments
pub type Callback = Arc<dyn Fn() + Send + Sync>;

/// Shared handler receiving the toggled connection and its new state
pub type ConnectionClickHandler = Arc<dyn Fn(&PostSocialConnection, bool) + Send + Sync>;

/// Handler pre-bound to a single connection
pub type ToggleCallback = Arc<dyn Fn(bool) + Send + Sync>;

/// One icon in the row of service logos
#[derive(Debug, Clone, PartialEq)]
pub struct TrainOfIconsModel {
    pub icon_res: &'static str,
    pub alpha: f32,
}

impl TrainOfIconsModel {
    pub fn new(icon_res: &'static str) -> Self {
        Self {
            icon_res,
            alpha: 1.0,
        }
    }
}

/// A connection row with its toggle handler
#[derive(Clone)]
pub struct JetpackSocialConnectionData {
    pub post_social_connection: PostSocialConnection,
    pub on_connection_click: ToggleCallback,
    pub enabled: bool,
}

impl JetpackSocialConnectionData {
    /// Forward a toggle of this row to its bound handler
    pub fn toggle(&self, enable: bool) {
        (self.on_connection_click)(enable)
    }
}

/// Display model of the Jetpack Social section
#[derive(Clone, PartialEq, Debug)]
pub enum JetpackSocialUiState {
    Loaded(Loaded),
    NoConnections(NoConnections),
}

#[derive(Clone)]
pub struct Loaded {
    pub jetpack_social_connection_data_list: Vec<JetpackSocialConnectionData>,
    pub show_share_limit_ui: bool,
    pub is_share_message_enabled: bool,
    pub share_message: String,
    pub on_share_message_click: Callback,
    pub subscribe_button_label: String,
    pub on_subscribe_click: Callback,
}

#[derive(Clone)]
pub struct NoConnections {
    pub train_of_icons_models: Vec<TrainOfIconsModel>,
    pub message: String,
    pub connect_profiles_button_label: String,
    pub on_connect_profiles_click: Callback,
    pub not_now_button_label: String,
    pub on_not_now_click: Callback,
}

impl From<Loaded> for JetpackSocialUiState {
    fn from(state: Loaded) -> Self {
        Self::Loaded(state)
    }
}

impl From<NoConnections> for JetpackSocialUiState {
    fn from(state: NoConnections) -> Self {
        Self::NoConnections(state)
    }
}

// Handlers compare by identity, the same handler instance must have been bound.

impl PartialEq for JetpackSocialConnectionData {
    fn eq(&self, other: &Self) -> bool {
        self.post_social_connection == other.post_social_connection
            && Arc::ptr_eq(&self.on_connection_click, &other.on_connection_click)
            && self.enabled == other.enabled
    }
}

impl PartialEq for Loaded {
    fn eq(&self, other: &Self) -> bool {
        self.jetpack_social_connection_data_list == other.jetpack_social_connection_data_list
            && self.show_share_limit_ui == other.show_share_limit_ui
            && self.is_share_message_enabled == other.is_share_message_enabled
            && self.share_message == other.share_message
            && Arc::ptr_eq(&self.on_share_message_click, &other.on_share_message_click)
            && self.subscribe_button_label == other.subscribe_button_label
            && Arc::ptr_eq(&self.on_subscribe_click, &other.on_subscribe_click)
    }
}

impl PartialEq for NoConnections {
    fn eq(&self, other: &Self) -> bool {
        self.train_of_icons_models == other.train_of_icons_models
            && self.message == other.message
            && self.connect_profiles_button_label == other.connect_profiles_button_label
            && Arc::ptr_eq(&self.on_connect_profiles_click, &other.on_connect_profiles_click)
            && self.not_now_button_label == other.not_now_button_label
            && Arc::ptr_eq(&self.on_not_now_click, &other.on_not_now_click)
    }
}

impl fmt::Debug for JetpackSocialConnectionData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JetpackSocialConnectionData")
            .field("post_social_connection", &self.post_social_connection)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for Loaded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loaded")
            .field(
                "jetpack_social_connection_data_list",
                &self.jetpack_social_connection_data_list,
            )
            .field("show_share_limit_ui", &self.show_share_limit_ui)
            .field("is_share_message_enabled", &self.is_share_message_enabled)
            .field("share_message", &self.share_message)
            .field("subscribe_button_label", &self.subscribe_button_label)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for NoConnections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoConnections")
            .field("train_of_icons_models", &self.train_of_icons_models)
            .field("message", &self.message)
            .field(
                "connect_profiles_button_label",
                &self.connect_profiles_button_label,
            )
            .field("not_now_button_label", &self.not_now_button_label)
            .finish_non_exhaustive()
    }
}
