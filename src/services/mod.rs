// Services module
pub mod analytics_service;
pub mod config_service;
pub mod default_tab_experiment;
pub mod feature_config;
pub mod prefs_service;
pub mod social_ui_state_mapper;
pub mod string_provider;
