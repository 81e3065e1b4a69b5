use crate::models::{DefaultTabVariant, MySiteTabType, Stat};
use crate::services::analytics_service::AnalyticsTracker;
use crate::services::feature_config::{ExperimentVariationConfig, FeatureConfig};
use crate::services::prefs_service::AppPrefs;
use crate::utils::error::Result;
use std::collections::BTreeMap;
use std::sync::Arc;

pub const DEFAULT_TAB_EXPERIMENT: &str = "default_tab_experiment";
pub const NONEXISTENT: &str = "nonexistent";

/// Read-only view of the experiment on this device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentStatus {
    pub enabled: bool,
    pub assigned: bool,
    pub initial_screen: String,
    pub tracking_label: String,
}

/// Assigns and reports the My Site default tab experiment.
///
/// Assignment happens at most once per install: nothing here clears the
/// assigned flag, and turning the experiment off only stops further changes.
pub struct MySiteDefaultTabExperiment {
    experiment_feature_config: Arc<dyn FeatureConfig>,
    variation_dashboard_feature_config: Arc<dyn ExperimentVariationConfig>,
    dashboard_tabs_feature_config: Arc<dyn FeatureConfig>,
    app_prefs: AppPrefs,
    analytics_tracker: Arc<dyn AnalyticsTracker>,
}

impl MySiteDefaultTabExperiment {
    pub fn new(
        experiment_feature_config: Arc<dyn FeatureConfig>,
        variation_dashboard_feature_config: Arc<dyn ExperimentVariationConfig>,
        dashboard_tabs_feature_config: Arc<dyn FeatureConfig>,
        app_prefs: AppPrefs,
        analytics_tracker: Arc<dyn AnalyticsTracker>,
    ) -> Self {
        Self {
            experiment_feature_config,
            variation_dashboard_feature_config,
            dashboard_tabs_feature_config,
            app_prefs,
            analytics_tracker,
        }
    }

    /// Assign a variant if the experiment runs and none was assigned yet.
    ///
    /// Returns the variant assigned by this call.
    pub fn check_and_assign_if_needed(&self) -> Result<Option<DefaultTabVariant>> {
        if !self.is_experiment_running() || self.is_variant_assigned()? {
            return Ok(None);
        }

        let variant = if self.variation_dashboard_feature_config.is_dashboard_variant() {
            DefaultTabVariant::Dashboard
        } else {
            DefaultTabVariant::SiteMenu
        };
        // The assigned flag goes last: a failed write leaves the device unassigned
        self.app_prefs
            .set_initial_screen_from_my_site_default_tab_experiment_variant(variant)?;
        self.app_prefs
            .set_my_site_default_tab_experiment_variant_assigned()?;

        tracing::info!("Assigned My Site default tab experiment variant: {}", variant);
        self.report_assignment()?;
        Ok(Some(variant))
    }

    /// Re-attach the experiment property to analytics when the experiment runs
    pub fn refresh_tracking_properties_if_needed(&self) -> Result<()> {
        if self.is_experiment_running() {
            self.analytics_tracker
                .set_inject_experiment_properties(self.variant_map_for_tracking()?)?;
        }
        Ok(())
    }

    /// Replace an existing assignment. Returns whether the override was applied.
    pub fn override_variant(&self, variant: DefaultTabVariant) -> Result<bool> {
        if !self.is_experiment_running() || !self.is_variant_assigned()? {
            tracing::debug!("Skipping variant override to {}", variant);
            return Ok(false);
        }

        self.app_prefs
            .set_initial_screen_from_my_site_default_tab_experiment_variant(variant)?;

        tracing::info!("Overrode My Site default tab experiment variant: {}", variant);
        self.report_assignment()?;
        Ok(true)
    }

    pub fn status(&self) -> Result<ExperimentStatus> {
        Ok(ExperimentStatus {
            enabled: self.is_experiment_running(),
            assigned: self.is_variant_assigned()?,
            initial_screen: self.app_prefs.my_site_initial_screen()?,
            tracking_label: self.variant_tracking_label()?,
        })
    }

    pub fn is_experiment_running(&self) -> bool {
        self.dashboard_tabs_feature_config.is_enabled()
            && self.experiment_feature_config.is_enabled()
    }

    fn is_variant_assigned(&self) -> Result<bool> {
        self.app_prefs
            .is_my_site_default_tab_experiment_variant_assigned()
    }

    fn report_assignment(&self) -> Result<()> {
        self.analytics_tracker
            .set_inject_experiment_properties(self.variant_map_for_tracking()?)?;
        self.analytics_tracker
            .track(Stat::MySiteDefaultTabExperimentVariantAssigned)
    }

    fn variant_map_for_tracking(&self) -> Result<BTreeMap<String, String>> {
        Ok(BTreeMap::from([(
            DEFAULT_TAB_EXPERIMENT.to_string(),
            self.variant_tracking_label()?,
        )]))
    }

    fn variant_tracking_label(&self) -> Result<String> {
        if !self.is_variant_assigned()? {
            return Ok(NONEXISTENT.to_string());
        }

        let tab = match MySiteTabType::from_label(&self.app_prefs.my_site_initial_screen()?) {
            Some(MySiteTabType::Dashboard) => MySiteTabType::Dashboard,
            _ => MySiteTabType::SiteMenu,
        };
        Ok(tab.tracking_label().to_string())
    }
}
