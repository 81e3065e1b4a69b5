pub mod commands;

pub use commands::{Cli, Commands, ExperimentAction, SocialAction};

use crate::models::{DefaultTabVariant, PostSocialConnection, ShareLimit};
use crate::services::analytics_service::AnalyticsService;
use crate::services::config_service::{AppSettings, ConfigService};
use crate::services::default_tab_experiment::{ExperimentStatus, MySiteDefaultTabExperiment};
use crate::services::feature_config::{FeatureFlags, FlagFeatureConfig};
use crate::services::prefs_service::{AppPrefs, TomlPreferenceStore};
use crate::services::social_ui_state_mapper::{JetpackSocialUiStateMapper, SocialStateInput};
use crate::services::string_provider::I18nStringProvider;
use crate::state::{Callback, ConnectionClickHandler, JetpackSocialUiState};
use crate::utils::error::{Result, WpMobileError};
use crate::utils::i18n;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use rust_i18n::t;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Services wired together from the on-disk configuration
pub struct AppContext {
    pub config: ConfigService,
    pub settings: AppSettings,
    pub analytics: Arc<AnalyticsService>,
    pub experiment: MySiteDefaultTabExperiment,
    pub mapper: JetpackSocialUiStateMapper,
}

impl AppContext {
    /// Load from `config_dir`, or the platform config directory when absent
    pub fn load(config_dir: Option<PathBuf>) -> Result<Self> {
        let config = match config_dir {
            Some(dir) => ConfigService::with_dir(dir)?,
            None => ConfigService::new()?,
        };
        Self::from_config(config)
    }

    pub fn from_config(config: ConfigService) -> Result<Self> {
        let settings = config.load_settings()?;

        let flags = Arc::new(FeatureFlags::from_settings(&settings.features));
        let store = TomlPreferenceStore::open(config.prefs_file())?;

        let mut analytics = AnalyticsService::new(settings.analytics.max_events);
        if let Some(ref log_file) = settings.analytics.log_file {
            analytics = analytics.with_file(log_file.clone());
        }
        let analytics = Arc::new(analytics);

        let experiment = MySiteDefaultTabExperiment::new(
            Arc::new(FlagFeatureConfig::my_site_default_tab_experiment(flags.clone())),
            Arc::new(FlagFeatureConfig::my_site_default_tab_experiment_variation_dashboard(
                flags.clone(),
            )),
            Arc::new(FlagFeatureConfig::my_site_dashboard_tabs(flags)),
            AppPrefs::new(Arc::new(store)),
            analytics.clone(),
        );
        let mapper = JetpackSocialUiStateMapper::new(Arc::new(I18nStringProvider::new()));

        Ok(Self {
            config,
            settings,
            analytics,
            experiment,
            mapper,
        })
    }
}

/// Input file for `social preview`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewFile {
    #[serde(default)]
    pub share_message: String,

    #[serde(default)]
    pub is_post_published: bool,

    #[serde(default)]
    pub share_limit: ShareLimit,

    #[serde(default)]
    pub connections: Vec<PostSocialConnection>,
}

pub fn load_preview_file(path: &Path) -> Result<PreviewFile> {
    let content = fs::read_to_string(path).map_err(|e| {
        WpMobileError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let preview: PreviewFile = toml::from_str(&content)?;
    tracing::debug!(
        "Loaded {} connections from {}",
        preview.connections.len(),
        path.display()
    );
    Ok(preview)
}

/// Dispatch a parsed command line
pub fn run(ctx: &AppContext, command: Commands) -> Result<()> {
    match command {
        Commands::Experiment { action } => {
            for line in run_experiment(ctx, action)? {
                println!("{}", line);
            }
        }
        Commands::Social {
            action: SocialAction::Preview { file, published, message },
        } => {
            let mut preview = load_preview_file(&file)?;
            preview.is_post_published |= published;
            if let Some(message) = message {
                preview.share_message = message;
            }
            let state = ctx.mapper.map(preview.connections.clone(), logging_input(&preview));
            for line in render_ui_state(&state, &preview.share_limit) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

/// Run one experiment action, returning the lines to show
pub fn run_experiment(ctx: &AppContext, action: ExperimentAction) -> Result<Vec<String>> {
    let lines = match action {
        ExperimentAction::Status => render_experiment_status(&ctx.experiment.status()?),
        ExperimentAction::Check => match ctx.experiment.check_and_assign_if_needed()? {
            Some(variant) => vec![t!("experiment.assigned_now", variant = variant).to_string()],
            None if ctx.experiment.is_experiment_running() => {
                vec![t!("experiment.already_assigned").to_string()]
            }
            None => vec![t!("experiment.not_running").to_string()],
        },
        ExperimentAction::Refresh => {
            ctx.experiment.refresh_tracking_properties_if_needed()?;
            vec![t!("experiment.refreshed").to_string()]
        }
        ExperimentAction::Override { variant } => {
            if ctx.experiment.override_variant(variant)? {
                vec![t!("experiment.overridden", variant = variant).to_string()]
            } else {
                vec![t!("experiment.override_skipped").to_string()]
            }
        }
    };
    Ok(lines)
}

fn yes_no(value: bool) -> String {
    if value {
        style("yes").green().to_string()
    } else {
        style("no").red().to_string()
    }
}

pub fn render_experiment_status(status: &ExperimentStatus) -> Vec<String> {
    vec![
        style(t!("experiment.status_title")).bold().to_string(),
        format!("  {}: {}", t!("experiment.enabled"), yes_no(status.enabled)),
        format!("  {}: {}", t!("experiment.assigned"), yes_no(status.assigned)),
        format!("  {}: {}", t!("experiment.initial_screen"), status.initial_screen),
        format!(
            "  {}: {}",
            t!("experiment.tracking_label"),
            style(&status.tracking_label).cyan()
        ),
    ]
}

/// Text rendering of the Jetpack Social section
pub fn render_ui_state(state: &JetpackSocialUiState, share_limit: &ShareLimit) -> Vec<String> {
    let mut lines = Vec::new();
    match state {
        JetpackSocialUiState::Loaded(loaded) => {
            for item in &loaded.jetpack_social_connection_data_list {
                let connection = &item.post_social_connection;
                let mark = if connection.is_sharing_enabled { "[x]" } else { "[ ]" };
                let row = format!("{} {}", mark, connection.display_name());
                lines.push(if item.enabled {
                    row
                } else {
                    style(row).dim().to_string()
                });
            }

            if loaded.show_share_limit_ui {
                if let ShareLimit::Enabled { shares_remaining, .. } = share_limit {
                    lines.push(
                        t!(
                            "post_settings.jetpack_social.shares_remaining",
                            remaining = shares_remaining
                        )
                        .to_string(),
                    );
                }
                lines.push(format!("<{}>", style(&loaded.subscribe_button_label).bold()));
            } else {
                lines.push(t!("post_settings.jetpack_social.no_share_limit").to_string());
            }

            if loaded.is_share_message_enabled {
                lines.push(format!("> {}", loaded.share_message));
            }
        }
        JetpackSocialUiState::NoConnections(prompt) => {
            let icons = prompt
                .train_of_icons_models
                .iter()
                .map(|icon| icon.icon_res)
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(style(icons).dim().to_string());
            lines.push(prompt.message.clone());
            lines.push(format!(
                "<{}>  <{}>",
                style(&prompt.connect_profiles_button_label).bold(),
                prompt.not_now_button_label
            ));
        }
    }
    lines
}

/// Apply a UI language and remember it in `settings.toml`
pub fn switch_language(ctx: &AppContext, lang: &str) -> Result<String> {
    let applied = i18n::change_language(lang);
    let mut settings = ctx.config.load_settings()?;
    settings.language = applied.clone();
    ctx.config.save_settings(&settings)?;
    Ok(applied)
}

/// The last `count` events tracked in this session, oldest first
pub fn render_recent_events(analytics: &AnalyticsService, count: usize) -> Vec<String> {
    let events = analytics.recent(count);
    if events.is_empty() {
        return vec![style(t!("menu.no_events")).dim().to_string()];
    }
    events.iter().map(|event| event.format()).collect()
}

fn log_click(what: &'static str) -> Callback {
    Arc::new(move || tracing::info!("{} clicked", what))
}

/// Handlers that only log, for non-interactive previews
fn logging_input(preview: &PreviewFile) -> SocialStateInput {
    let on_connection_click: ConnectionClickHandler =
        Arc::new(|connection: &PostSocialConnection, enable: bool| {
            tracing::info!(
                "Sharing to {} {}",
                connection.display_name(),
                if enable { "enabled" } else { "disabled" }
            )
        });

    SocialStateInput {
        share_limit: preview.share_limit,
        share_message: preview.share_message.clone(),
        is_post_published: preview.is_post_published,
        on_subscribe_click: log_click("Subscribe"),
        on_share_message_click: log_click("Share message"),
        on_connection_click,
        on_connect_profiles_click: log_click("Connect profiles"),
        on_not_now_click: log_click("Not now"),
    }
}

const RECENT_EVENTS: usize = 20;

/// Menu-driven mode over the same actions
pub fn run_interactive(ctx: &AppContext) -> anyhow::Result<()> {
    let theme = ColorfulTheme::default();

    loop {
        let items = [
            t!("menu.status").to_string(),
            t!("menu.check").to_string(),
            t!("menu.refresh").to_string(),
            t!("menu.override").to_string(),
            t!("menu.preview").to_string(),
            t!("menu.events").to_string(),
            t!("menu.language").to_string(),
            t!("menu.quit").to_string(),
        ];

        let selection = Select::with_theme(&theme)
            .with_prompt(t!("menu.prompt").to_string())
            .items(&items)
            .default(0)
            .interact()?;

        let action = match selection {
            0 => ExperimentAction::Status,
            1 => ExperimentAction::Check,
            2 => ExperimentAction::Refresh,
            3 => {
                let variants = [DefaultTabVariant::Dashboard, DefaultTabVariant::SiteMenu];
                let names: Vec<String> = variants.iter().map(|v| v.to_string()).collect();
                let chosen = Select::with_theme(&theme)
                    .with_prompt(t!("menu.choose_variant").to_string())
                    .items(&names)
                    .default(0)
                    .interact()?;
                ExperimentAction::Override {
                    variant: variants[chosen],
                }
            }
            4 => {
                interactive_preview(ctx, &theme)?;
                continue;
            }
            5 => {
                for line in render_recent_events(&ctx.analytics, RECENT_EVENTS) {
                    println!("{}", line);
                }
                continue;
            }
            6 => {
                let languages = i18n::available_languages();
                let names: Vec<&str> = languages.iter().map(|(_, name)| *name).collect();
                let current = i18n::current_language();
                let chosen = Select::with_theme(&theme)
                    .with_prompt(t!("menu.choose_language").to_string())
                    .items(&names)
                    .default(
                        languages
                            .iter()
                            .position(|(code, _)| *code == current)
                            .unwrap_or(0),
                    )
                    .interact()?;
                let applied = switch_language(ctx, languages[chosen].0)?;
                println!("{}", t!("menu.language_saved", language = applied));
                continue;
            }
            _ => break,
        };

        for line in run_experiment(ctx, action)? {
            println!("{}", line);
        }
    }

    Ok(())
}

fn interactive_preview(ctx: &AppContext, theme: &ColorfulTheme) -> anyhow::Result<()> {
    let path: String = Input::with_theme(theme)
        .with_prompt(t!("menu.connections_file").to_string())
        .interact_text()?;
    let preview = load_preview_file(Path::new(path.trim()))?;

    let toggles: Arc<Mutex<Vec<(i64, bool)>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = toggles.clone();
    let mut input = logging_input(&preview);
    input.on_connection_click = Arc::new(move |connection: &PostSocialConnection, enable: bool| {
        if let Ok(mut toggles) = sink.lock() {
            toggles.push((connection.connection_id, enable));
        }
    });

    let state = ctx.mapper.map(preview.connections.clone(), input);
    for line in render_ui_state(&state, &preview.share_limit) {
        println!("{}", line);
    }

    let JetpackSocialUiState::Loaded(loaded) = state else {
        return Ok(());
    };
    let editable: Vec<_> = loaded
        .jetpack_social_connection_data_list
        .iter()
        .filter(|item| item.enabled)
        .collect();
    if editable.is_empty() {
        return Ok(());
    }

    let names: Vec<String> = editable
        .iter()
        .map(|item| item.post_social_connection.display_name())
        .collect();
    let defaults: Vec<bool> = editable
        .iter()
        .map(|item| item.post_social_connection.is_sharing_enabled)
        .collect();
    let chosen = MultiSelect::with_theme(theme)
        .items(&names)
        .defaults(&defaults)
        .interact()?;

    for (index, item) in editable.iter().enumerate() {
        let enable = chosen.contains(&index);
        if enable != item.post_social_connection.is_sharing_enabled {
            item.toggle(enable);
        }
    }

    let toggles = toggles
        .lock()
        .map_err(|_| anyhow::anyhow!("toggle log poisoned"))?;
    for (connection_id, enable) in toggles.iter() {
        println!(
            "{} #{} -> {}",
            style("connection").dim(),
            connection_id,
            yes_no(*enable)
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn context_with(features: (bool, bool, bool)) -> (AppContext, TempDir) {
        let temp = TempDir::new().unwrap();
        let config = ConfigService::with_dir(temp.path().to_path_buf()).unwrap();
        let mut settings = AppSettings::default();
        settings.features.my_site_dashboard_tabs = features.0;
        settings.features.my_site_default_tab_experiment = features.1;
        settings.features.my_site_default_tab_experiment_variation_dashboard = features.2;
        config.save_settings(&settings).unwrap();
        (AppContext::from_config(config).unwrap(), temp)
    }

    #[test]
    fn test_load_preview_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("preview.toml");
        fs::write(
            &path,
            r#"
share_message = "Hello"

[share_limit]
status = "enabled"
share_limit = 30
publicized_count = 1
shared_posts_count = 2
shares_remaining = 27

[[connections]]
connection_id = 1
service = "tumblr"
label = "Tumblr"
external_id = "myblog.tumblr.com"
external_name = "My blog"
"#,
        )
        .unwrap();

        let preview = load_preview_file(&path).unwrap();
        assert_eq!(preview.share_message, "Hello");
        assert!(!preview.is_post_published);
        assert!(preview.share_limit.is_enabled());
        assert_eq!(preview.connections.len(), 1);
    }

    #[test]
    fn test_load_preview_file_missing() {
        let err = load_preview_file(Path::new("/nonexistent/preview.toml")).unwrap_err();
        assert!(matches!(err, WpMobileError::ConfigError(_)));
    }

    #[test]
    fn test_render_no_connections_lists_every_icon() {
        let (ctx, _temp) = context_with((false, false, false));
        let state = ctx.mapper.map(vec![], logging_input(&PreviewFile::default()));

        let text = console::strip_ansi_codes(&render_ui_state(&state, &ShareLimit::Disabled).join("\n"))
            .to_string();
        assert!(text.contains("ic_social_facebook"));
        assert!(text.contains("ic_social_twitter"));
    }

    #[test]
    fn test_render_loaded_hides_message_without_share_limit() {
        let (ctx, _temp) = context_with((false, false, false));
        let preview = PreviewFile {
            share_message: "Hello".to_string(),
            connections: vec![PostSocialConnection::new(1, "tumblr", "Tumblr", "id", "My blog")],
            ..PreviewFile::default()
        };
        let state = ctx.mapper.map(preview.connections.clone(), logging_input(&preview));

        let text = console::strip_ansi_codes(&render_ui_state(&state, &preview.share_limit).join("\n"))
            .to_string();
        assert!(text.contains("[x] My blog (Tumblr)"));
        assert!(!text.contains("> Hello"));
    }

    #[test]
    fn test_switch_language_is_saved() {
        let (ctx, temp) = context_with((false, false, false));
        let mut settings = ctx.config.load_settings().unwrap();
        settings.language = "zh-CN".to_string();
        ctx.config.save_settings(&settings).unwrap();

        assert_eq!(switch_language(&ctx, "en_US.UTF-8").unwrap(), "en");

        let reloaded = ConfigService::with_dir(temp.path().to_path_buf())
            .unwrap()
            .load_settings()
            .unwrap();
        assert_eq!(reloaded.language, "en");
        assert_eq!(reloaded.features, settings.features);
    }

    #[test]
    fn test_recent_events_after_assignment() {
        let (ctx, _temp) = context_with((true, true, false));
        if !ctx.experiment.is_experiment_running() {
            // Feature flags overridden from the environment
            return;
        }
        assert_eq!(render_recent_events(&ctx.analytics, 5).len(), 1);

        run_experiment(&ctx, ExperimentAction::Check).unwrap();

        let lines = render_recent_events(&ctx.analytics, 5);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("my_site_default_tab_experiment_variant_assigned"));
        assert!(lines[0].contains("default_tab_experiment=site_menu"));
    }

    #[test]
    fn test_experiment_commands_persist_between_contexts() {
        let (ctx, temp) = context_with((true, true, true));
        if !ctx.experiment.is_experiment_running() {
            // Feature flags overridden from the environment
            return;
        }

        run_experiment(&ctx, ExperimentAction::Check).unwrap();
        assert_eq!(ctx.analytics.events().len(), 1);

        let reloaded =
            AppContext::from_config(ConfigService::with_dir(temp.path().to_path_buf()).unwrap()).unwrap();
        let status = reloaded.experiment.status().unwrap();
        assert!(status.assigned);
        assert_eq!(status.initial_screen, "dashboard");

        run_experiment(&reloaded, ExperimentAction::Check).unwrap();
        assert!(reloaded.analytics.events().is_empty());
    }
}
