//! # Project Data Structures
//!
//! The `Project` struct is the root container for a job's wind calculations.
//! Projects serialize to `.wnd` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: GlobalSettings (unit system, edition, design method)
//! └── items: HashMap<Uuid, WindCalculation> (all calculations)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use wind_core::project::Project;
//!
//! let mut project = Project::new("Jane Engineer", "25-042", "ACME Corp");
//! let input = project.new_input("Warehouse MWFRS");
//! let id = project.add_calculation("Warehouse MWFRS", input);
//!
//! let results = project.calculate_all();
//! assert!(results[&id].is_ok());
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::calculate;
use crate::errors::CalcResult;
use crate::input::WindInput;
use crate::loads::DesignMethod;
use crate::references::StandardEdition;
use crate::results::WindResult;
use crate::units::UnitSystem;

/// Current schema version for .wnd files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// Items are stored in a flat UUID-keyed map so results can be matched back
/// to their inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub meta: ProjectMetadata,
    pub settings: GlobalSettings,
    pub items: HashMap<Uuid, WindCalculation>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// ```rust
    /// use wind_core::project::Project;
    ///
    /// let project = Project::new("John Doe", "25-001", "Client Corp");
    /// assert_eq!(project.meta.engineer, "John Doe");
    /// ```
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: GlobalSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Default input carrying the project's unit system, edition, and design method
    pub fn new_input(&self, label: impl Into<String>) -> WindInput {
        WindInput {
            label: label.into(),
            unit_system: self.settings.unit_system,
            edition: self.settings.edition,
            design_method: self.settings.design_method,
            ..WindInput::default()
        }
    }

    /// Add a calculation and return the UUID assigned to it.
    pub fn add_calculation(&mut self, label: impl Into<String>, input: WindInput) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(
            id,
            WindCalculation {
                label: label.into(),
                input,
            },
        );
        self.touch();
        id
    }

    pub fn remove_calculation(&mut self, id: &Uuid) -> Option<WindCalculation> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    pub fn get_calculation(&self, id: &Uuid) -> Option<&WindCalculation> {
        self.items.get(id)
    }

    /// Mutable access marks the project as modified.
    pub fn get_calculation_mut(&mut self, id: &Uuid) -> Option<&mut WindCalculation> {
        if self.items.contains_key(id) {
            self.meta.modified = Utc::now();
            self.items.get_mut(id)
        } else {
            None
        }
    }

    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Items sorted by label, for stable reports
    pub fn sorted_calculations(&self) -> Vec<(&Uuid, &WindCalculation)> {
        let mut items: Vec<_> = self.items.iter().collect();
        items.sort_by(|a, b| a.1.label.cmp(&b.1.label));
        items
    }

    /// Run every calculation. A refused input does not stop the others.
    pub fn calculate_all(&self) -> HashMap<Uuid, CalcResult<WindResult>> {
        self.items
            .iter()
            .map(|(id, item)| {
                log::debug!("calculating {} ({})", item.label, id);
                (*id, item.calculate())
            })
            .collect()
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,
    pub engineer: String,
    /// Job/project number
    pub job_id: String,
    pub client: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Defaults applied to new calculations in the project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSettings {
    pub unit_system: UnitSystem,
    pub edition: StandardEdition,
    pub design_method: DesignMethod,
}

/// One labelled wind calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindCalculation {
    pub label: String,
    pub input: WindInput,
}

impl WindCalculation {
    pub fn calculate(&self) -> CalcResult<WindResult> {
        calculate(&self.input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_creation() {
        let project = Project::new("John Doe", "25-001", "Acme Corp");
        assert_eq!(project.meta.engineer, "John Doe");
        assert_eq!(project.meta.job_id, "25-001");
        assert_eq!(project.meta.client, "Acme Corp");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.settings.edition, StandardEdition::Asce716);
    }

    #[test]
    fn test_project_serialization() {
        let mut project = Project::new("Jane Engineer", "25-042", "Test Client");
        let input = project.new_input("Roof");
        project.add_calculation("Roof", input);
        let json = serde_json::to_string_pretty(&project).unwrap();

        assert!(json.contains("Jane Engineer"));
        assert!(json.contains("25-042"));
        assert!(json.contains("ASCE 7-16"));

        let roundtrip: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.engineer, "Jane Engineer");
        assert_eq!(roundtrip.item_count(), 1);
    }

    #[test]
    fn test_new_input_uses_settings() {
        let mut project = Project::new("Engineer", "25-001", "Client");
        project.settings.unit_system = UnitSystem::Metric;
        project.settings.edition = StandardEdition::Asce722;
        project.settings.design_method = DesignMethod::Asd;
        let input = project.new_input("Canopy");
        assert_eq!(input.label, "Canopy");
        assert_eq!(input.unit_system, UnitSystem::Metric);
        assert_eq!(input.edition, StandardEdition::Asce722);
        assert_eq!(input.design_method, DesignMethod::Asd);
    }

    #[test]
    fn test_add_remove_calculation() {
        let mut project = Project::new("Engineer", "25-001", "Client");
        let id = project.add_calculation("B-1", WindInput::default());
        assert_eq!(project.item_count(), 1);
        assert!(project.get_calculation(&id).is_some());

        let removed = project.remove_calculation(&id);
        assert!(removed.is_some());
        assert_eq!(project.item_count(), 0);
        assert!(project.remove_calculation(&id).is_none());
    }

    #[test]
    fn test_calculate_all_keeps_failures_separate() {
        let mut project = Project::new("Engineer", "25-001", "Client");
        let good = project.add_calculation("Good", WindInput::default());
        let bad = project.add_calculation(
            "Bad",
            WindInput {
                basic_wind_speed: -10.0,
                ..WindInput::default()
            },
        );
        let results = project.calculate_all();
        assert_eq!(results.len(), 2);
        assert!(results[&good].is_ok());
        assert_eq!(results[&bad].as_ref().unwrap_err().error_code(), "VALIDATION_FAILED");
    }

    #[test]
    fn test_sorted_calculations() {
        let mut project = Project::new("Engineer", "25-001", "Client");
        project.add_calculation("Zeta", WindInput::default());
        project.add_calculation("Alpha", WindInput::default());
        let sorted = project.sorted_calculations();
        assert_eq!(sorted[0].1.label, "Alpha");
        assert_eq!(sorted[1].1.label, "Zeta");
    }
}
