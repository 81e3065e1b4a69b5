// Display state handed to the UI layer
pub mod jetpack_social;

pub use jetpack_social::{
    Callback, ConnectionClickHandler, JetpackSocialConnectionData, JetpackSocialUiState, Loaded,
    NoConnections, ToggleCallback, TrainOfIconsModel,
};
