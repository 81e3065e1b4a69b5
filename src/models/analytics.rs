use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Analytics events emitted by this crate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    MySiteDefaultTabExperimentVariantAssigned,
}

impl Stat {
    /// Event name on the wire
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::MySiteDefaultTabExperimentVariantAssigned => {
                "my_site_default_tab_experiment_variant_assigned"
            }
        }
    }
}

/// Event recorded by the analytics tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedEvent {
    pub id: Uuid,

    pub stat: Stat,

    /// Experiment properties injected at the moment the event fired
    #[serde(default)]
    pub properties: BTreeMap<String, String>,

    pub timestamp: DateTime<Utc>,
}

impl TrackedEvent {
    pub fn new(stat: Stat, properties: BTreeMap<String, String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            stat,
            properties,
            timestamp: Utc::now(),
        }
    }

    /// Format for display
    pub fn format(&self) -> String {
        let timestamp = self.timestamp.format("%Y-%m-%d %H:%M:%S");
        if self.properties.is_empty() {
            return format!("[{}] {}", timestamp, self.stat.event_name());
        }

        let props = self
            .properties
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(", ");
        format!("[{}] {} {{{}}}", timestamp, self.stat.event_name(), props)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_name() {
        assert_eq!(
            Stat::MySiteDefaultTabExperimentVariantAssigned.event_name(),
            "my_site_default_tab_experiment_variant_assigned"
        );
    }

    #[test]
    fn test_format_includes_properties() {
        let mut props = BTreeMap::new();
        props.insert("default_tab_experiment".to_string(), "dashboard".to_string());
        let event = TrackedEvent::new(Stat::MySiteDefaultTabExperimentVariantAssigned, props);

        let line = event.format();
        assert!(line.contains("my_site_default_tab_experiment_variant_assigned"));
        assert!(line.contains("default_tab_experiment=dashboard"));
    }

    #[test]
    fn test_format_without_properties() {
        let event = TrackedEvent::new(Stat::MySiteDefaultTabExperimentVariantAssigned, BTreeMap::new());
        assert!(!event.format().contains('{'));
    }
}
