use crate::models::{Stat, TrackedEvent};
use crate::utils::error::{Result, WpMobileError};
use std::collections::{BTreeMap, VecDeque};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Sink for analytics events
pub trait AnalyticsTracker: Send + Sync {
    fn track(&self, stat: Stat) -> Result<()>;

    /// Replace the experiment properties attached to every later event
    fn set_inject_experiment_properties(&self, properties: BTreeMap<String, String>) -> Result<()>;
}

fn poisoned(_: impl std::fmt::Display) -> WpMobileError {
    WpMobileError::AnalyticsError("analytics lock poisoned".to_string())
}

/// Analytics tracker keeping recent events in memory
pub struct AnalyticsService {
    /// In-memory event buffer (most recent events)
    events: RwLock<VecDeque<TrackedEvent>>,

    /// Global experiment properties
    experiment_properties: RwLock<BTreeMap<String, String>>,

    max_memory_events: usize,

    /// Optional JSON-lines file
    log_file_path: Option<PathBuf>,
}

impl AnalyticsService {
    pub fn new(max_memory_events: usize) -> Self {
        Self {
            events: RwLock::new(VecDeque::with_capacity(max_memory_events)),
            experiment_properties: RwLock::new(BTreeMap::new()),
            max_memory_events,
            log_file_path: None,
        }
    }

    /// Create with file logging enabled
    pub fn with_file(mut self, log_file_path: PathBuf) -> Self {
        self.log_file_path = Some(log_file_path);
        self
    }

    fn record(&self, event: TrackedEvent) -> Result<()> {
        {
            let mut events = self.events.write().map_err(poisoned)?;

            if self.max_memory_events > 0 {
                if events.len() >= self.max_memory_events {
                    events.pop_front();
                }
                events.push_back(event.clone());
            }
        }

        if let Some(ref file_path) = self.log_file_path {
            Self::write_to_file(file_path, &event)?;
        }

        tracing::info!("{}", event.format());
        Ok(())
    }

    fn write_to_file(file_path: &Path, event: &TrackedEvent) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)
            .map_err(|e| {
                anyhow::anyhow!("Failed to open analytics file {}: {}", file_path.display(), e)
            })?;

        let line = serde_json::to_string(event)?;
        writeln!(file, "{}", line)
            .map_err(|e| anyhow::anyhow!("Failed to write analytics file: {}", e))?;

        Ok(())
    }

    /// Get all events in memory
    pub fn events(&self) -> Vec<TrackedEvent> {
        self.events
            .read()
            .map(|events| events.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Get events for a specific stat
    pub fn events_for(&self, stat: Stat) -> Vec<TrackedEvent> {
        self.events
            .read()
            .map(|events| events.iter().filter(|e| e.stat == stat).cloned().collect())
            .unwrap_or_default()
    }

    /// Get recent events (last N)
    pub fn recent(&self, count: usize) -> Vec<TrackedEvent> {
        let events = self.events();
        let skip = events.len().saturating_sub(count);
        events.into_iter().skip(skip).collect()
    }

    pub fn experiment_properties(&self) -> BTreeMap<String, String> {
        self.experiment_properties
            .read()
            .map(|props| props.clone())
            .unwrap_or_default()
    }
}

impl AnalyticsTracker for AnalyticsService {
    fn track(&self, stat: Stat) -> Result<()> {
        let properties = self.experiment_properties.read().map_err(poisoned)?.clone();
        self.record(TrackedEvent::new(stat, properties))
    }

    fn set_inject_experiment_properties(&self, properties: BTreeMap<String, String>) -> Result<()> {
        tracing::debug!("Injecting experiment properties: {:?}", properties);
        let mut current = self.experiment_properties.write().map_err(poisoned)?;
        *current = properties;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn props(value: &str) -> BTreeMap<String, String> {
        BTreeMap::from([("default_tab_experiment".to_string(), value.to_string())])
    }

    #[test]
    fn test_track_attaches_injected_properties() {
        let service = AnalyticsService::new(10);
        service.set_inject_experiment_properties(props("dashboard")).unwrap();
        service.track(Stat::MySiteDefaultTabExperimentVariantAssigned).unwrap();

        let events = service.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].properties, props("dashboard"));
    }

    #[test]
    fn test_properties_are_replaced_not_merged() {
        let service = AnalyticsService::new(10);
        service.set_inject_experiment_properties(props("dashboard")).unwrap();
        service
            .set_inject_experiment_properties(BTreeMap::from([("other".to_string(), "x".to_string())]))
            .unwrap();

        let current = service.experiment_properties();
        assert_eq!(current.len(), 1);
        assert_eq!(current.get("other").map(String::as_str), Some("x"));
    }

    #[test]
    fn test_buffer_drops_oldest() {
        let service = AnalyticsService::new(2);
        for label in ["a", "b", "c"] {
            service.set_inject_experiment_properties(props(label)).unwrap();
            service.track(Stat::MySiteDefaultTabExperimentVariantAssigned).unwrap();
        }

        let events = service.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].properties, props("b"));
        assert_eq!(events[1].properties, props("c"));
    }

    #[test]
    fn test_recent_keeps_latest() {
        let service = AnalyticsService::new(10);
        for _ in 0..3 {
            service.track(Stat::MySiteDefaultTabExperimentVariantAssigned).unwrap();
        }

        assert_eq!(service.recent(2).len(), 2);
        assert_eq!(service.recent(5).len(), 3);
        assert_eq!(
            service.events_for(Stat::MySiteDefaultTabExperimentVariantAssigned).len(),
            3
        );

        service.set_inject_experiment_properties(props("site_menu")).unwrap();
        service.track(Stat::MySiteDefaultTabExperimentVariantAssigned).unwrap();
        let latest = service.recent(1);
        assert_eq!(latest[0].properties, props("site_menu"));
    }

    #[test]
    fn test_file_logging() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("analytics.jsonl");
        let service = AnalyticsService::new(10).with_file(path.clone());

        service.set_inject_experiment_properties(props("site_menu")).unwrap();
        service.track(Stat::MySiteDefaultTabExperimentVariantAssigned).unwrap();
        service.track(Stat::MySiteDefaultTabExperimentVariantAssigned).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: TrackedEvent = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed.stat, Stat::MySiteDefaultTabExperimentVariantAssigned);
        assert_eq!(parsed.properties, props("site_menu"));
    }
}
