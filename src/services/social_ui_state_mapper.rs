use crate::models::{PostSocialConnection, PublicizeServiceIcon, ShareLimit};
use crate::services::string_provider::{StringId, StringProvider};
use crate::state::{
    Callback, ConnectionClickHandler, JetpackSocialConnectionData, JetpackSocialUiState, Loaded,
    NoConnections, TrainOfIconsModel,
};
use std::sync::Arc;

/// Builds the Jetpack Social section of the post publish settings screen
pub struct JetpackSocialUiStateMapper {
    string_provider: Arc<dyn StringProvider>,
}

impl JetpackSocialUiStateMapper {
    pub fn new(string_provider: Arc<dyn StringProvider>) -> Self {
        Self { string_provider }
    }

    /// Map connections to rows, binding each row's toggle to `on_connection_click`.
    ///
    /// Rows of an already published post are disabled.
    #[allow(clippy::too_many_arguments)]
    pub fn map_loaded(
        &self,
        connections: Vec<PostSocialConnection>,
        share_limit: &ShareLimit,
        on_subscribe_click: Callback,
        share_message: impl Into<String>,
        on_share_message_click: Callback,
        on_connection_click: ConnectionClickHandler,
        is_post_published: bool,
    ) -> Loaded {
        let jetpack_social_connection_data_list = connections
            .into_iter()
            .map(|connection| {
                let handler = on_connection_click.clone();
                let bound = connection.clone();
                JetpackSocialConnectionData {
                    post_social_connection: connection,
                    on_connection_click: Arc::new(move |enable: bool| handler(&bound, enable)),
                    enabled: !is_post_published,
                }
            })
            .collect();

        Loaded {
            jetpack_social_connection_data_list,
            show_share_limit_ui: share_limit.is_enabled(),
            is_share_message_enabled: share_limit.is_enabled(),
            share_message: share_message.into(),
            on_share_message_click,
            subscribe_button_label: self.string_provider.get_string(StringId::SubscribeShareMore),
            on_subscribe_click,
        }
    }

    pub fn map_no_connections(
        &self,
        on_connect_profiles_click: Callback,
        on_not_now_click: Callback,
    ) -> NoConnections {
        NoConnections {
            train_of_icons_models: PublicizeServiceIcon::ALL
                .iter()
                .map(|icon| TrainOfIconsModel::new(icon.icon_res()))
                .collect(),
            message: self
                .string_provider
                .get_string(StringId::ConnectSocialProfilesMessage),
            connect_profiles_button_label: self
                .string_provider
                .get_string(StringId::ConnectSocialProfilesButton),
            on_connect_profiles_click,
            not_now_button_label: self.string_provider.get_string(StringId::ConnectNotNowButton),
            on_not_now_click,
        }
    }

    /// Pick the no-connections prompt for an empty list, the loaded rows otherwise
    pub fn map(&self, connections: Vec<PostSocialConnection>, input: SocialStateInput) -> JetpackSocialUiState {
        if connections.is_empty() {
            return self
                .map_no_connections(input.on_connect_profiles_click, input.on_not_now_click)
                .into();
        }

        self.map_loaded(
            connections,
            &input.share_limit,
            input.on_subscribe_click,
            input.share_message,
            input.on_share_message_click,
            input.on_connection_click,
            input.is_post_published,
        )
        .into()
    }
}

/// Everything besides the connection list needed to render either state
#[derive(Clone)]
pub struct SocialStateInput {
    pub share_limit: ShareLimit,
    pub share_message: String,
    pub is_post_published: bool,
    pub on_subscribe_click: Callback,
    pub on_share_message_click: Callback,
    pub on_connection_click: ConnectionClickHandler,
    pub on_connect_profiles_click: Callback,
    pub on_not_now_click: Callback,
}
