use crate::error::ExplorerError;
use serde::Deserialize;

const INTERNAL_ONLY_TAG: &str = "(Internal Only)";

/// One selectable spec version.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    pub status: String,
    #[serde(default)]
    pub internal_only: bool,
}

impl VersionInfo {
    /// `"<version> - <status>"`, followed by `(Internal Only)` when flagged.
    pub fn label(&self) -> String {
        if self.internal_only {
            format!("{} - {} {}", self.version, self.status, INTERNAL_ONLY_TAG)
        } else {
            format!("{} - {}", self.version, self.status)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VersionList {
    #[serde(default)]
    pub versions: Vec<VersionInfo>,
}

/// Version metadata as published next to a versioned API: `{"meta": {"versions": [...]}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VersionMetadata {
    #[serde(default)]
    pub meta: VersionList,
}

impl VersionMetadata {
    pub fn new(versions: Vec<VersionInfo>) -> Self {
        Self {
            meta: VersionList { versions },
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self, ExplorerError> {
        serde_json::from_str(content).map_err(|e| ExplorerError::invalid_json(&e))
    }

    pub fn versions(&self) -> &[VersionInfo] {
        &self.meta.versions
    }

    pub fn is_empty(&self) -> bool {
        self.meta.versions.is_empty()
    }

    pub fn contains(&self, version: &str) -> bool {
        self.meta.versions.iter().any(|info| info.version == version)
    }
}

/// Whether the layout should show the version picker above the docs.
pub fn should_show_selector(metadata: Option<&VersionMetadata>) -> bool {
    metadata.is_some_and(|metadata| !metadata.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionState {
    Idle,
    /// Chosen in the list but not confirmed yet.
    Selected(String),
    Applied(String),
}

/// State of the version picker.
///
/// Picking an entry only records it; nothing outside the selector changes
/// until [`VersionSelector::confirm`] runs the reload callback.
#[derive(Debug, Clone)]
pub struct VersionSelector {
    metadata: VersionMetadata,
    current_version: String,
    state: SelectionState,
}

impl VersionSelector {
    pub fn new(metadata: VersionMetadata, current_version: impl Into<String>) -> Self {
        Self {
            metadata,
            current_version: current_version.into(),
            state: SelectionState::Idle,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn current_version(&self) -> &str {
        &self.current_version
    }

    /// The version the list shows as chosen: the pending pick, else the current version.
    pub fn displayed_version(&self) -> &str {
        match &self.state {
            SelectionState::Selected(version) => version,
            _ => &self.current_version,
        }
    }

    pub fn options(&self) -> Vec<VersionOption> {
        let displayed = self.displayed_version();
        self.metadata
            .versions()
            .iter()
            .map(|info| VersionOption {
                value: info.version.clone(),
                label: info.label(),
                selected: info.version == displayed,
            })
            .collect()
    }

    /// Records a pick from the list. Unknown versions are ignored.
    pub fn select(&mut self, version: &str) {
        if !self.metadata.contains(version) {
            log::warn!("Ignoring selection of unknown version {}", version);
            return;
        }
        log::debug!("Version {} selected", version);
        self.state = SelectionState::Selected(version.to_string());
    }

    /// Applies the displayed version by calling `reload` exactly once.
    pub fn confirm<F>(&mut self, mut reload: F) -> String
    where
        F: FnMut(&str),
    {
        let version = self.displayed_version().to_string();
        reload(&version);
        log::debug!("Version {} applied", version);
        self.current_version = version.clone();
        self.state = SelectionState::Applied(version.clone());
        version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> VersionMetadata {
        VersionMetadata::from_json_str(
            r#"{
                "meta": {
                    "versions": [
                        {"version": "1.0.0", "status": "Current Version", "internal_only": false},
                        {"version": "0.0.1", "status": "Previous Version", "internal_only": true},
                        {"version": "2.0.0", "status": "Draft Version"}
                    ]
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_labels() {
        let labels: Vec<String> = metadata().versions().iter().map(VersionInfo::label).collect();
        assert_eq!(
            labels,
            vec![
                "1.0.0 - Current Version",
                "0.0.1 - Previous Version (Internal Only)",
                "2.0.0 - Draft Version",
            ]
        );
    }

    #[test]
    fn test_should_show_selector() {
        assert!(should_show_selector(Some(&metadata())));
        assert!(!should_show_selector(Some(&VersionMetadata::default())));
        assert!(!should_show_selector(None));
    }

    #[test]
    fn test_from_json_str_invalid() {
        assert!(matches!(
            VersionMetadata::from_json_str("{"),
            Err(ExplorerError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_select_does_not_reload() {
        let mut calls = 0;
        let mut selector = VersionSelector::new(metadata(), "1.0.0");
        selector.select("0.0.1");
        assert_eq!(calls, 0);
        assert_eq!(selector.state(), &SelectionState::Selected("0.0.1".to_string()));
        assert_eq!(selector.current_version(), "1.0.0");

        let selected: Vec<String> = selector
            .options()
            .into_iter()
            .filter(|option| option.selected)
            .map(|option| option.value)
            .collect();
        assert_eq!(selected, vec!["0.0.1"]);

        selector.confirm(|_| calls += 1);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_confirm_reloads_once_per_activation() {
        let mut reloaded: Vec<String> = Vec::new();
        let mut selector = VersionSelector::new(metadata(), "1.0.0");

        selector.select("2.0.0");
        selector.select("0.0.1");
        let applied = selector.confirm(|version| reloaded.push(version.to_string()));
        assert_eq!(applied, "0.0.1");
        assert_eq!(reloaded, vec!["0.0.1"]);
        assert_eq!(selector.state(), &SelectionState::Applied("0.0.1".to_string()));
        assert_eq!(selector.current_version(), "0.0.1");

        selector.confirm(|version| reloaded.push(version.to_string()));
        assert_eq!(reloaded, vec!["0.0.1", "0.0.1"]);
    }

    #[test]
    fn test_confirm_without_selection_uses_current() {
        let mut reloaded: Vec<String> = Vec::new();
        let mut selector = VersionSelector::new(metadata(), "1.0.0");
        selector.confirm(|version| reloaded.push(version.to_string()));
        assert_eq!(reloaded, vec!["1.0.0"]);
    }

    #[test]
    fn test_select_unknown_version_is_ignored() {
        let mut selector = VersionSelector::new(metadata(), "1.0.0");
        selector.select("9.9.9");
        assert_eq!(selector.state(), &SelectionState::Idle);
        assert_eq!(selector.displayed_version(), "1.0.0");
    }
}
