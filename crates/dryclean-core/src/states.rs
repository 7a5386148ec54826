//! Selectable state options for the location dialog.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateOption {
    /// Value stored on the address, e.g. `"NY"`.
    pub value: String,
    /// Display label, e.g. `"New York"`.
    pub label: String,
}

#[derive(Debug, Deserialize)]
pub struct StatesFile {
    pub states: Vec<StateOption>,
}

/// Load and validate state options from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_state_options(path: &Path) -> Result<Vec<StateOption>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::StatesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let states_file: StatesFile = serde_yaml::from_str(&content)?;
    validate_states(&states_file)?;

    Ok(states_file.states)
}

fn validate_states(states_file: &StatesFile) -> Result<(), ConfigError> {
    let mut seen_values = HashSet::new();

    for option in &states_file.states {
        if option.value.trim().is_empty() || option.label.trim().is_empty() {
            return Err(ConfigError::Validation(
                "state value and label must be non-empty".to_string(),
            ));
        }

        if !seen_values.insert(option.value.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate state value: '{}'",
                option.value
            )));
        }
    }

    Ok(())
}

/// Resolves a region name reported by a place lookup to a state value.
///
/// Compares case-insensitively against each option label and accepts a
/// substring match in either direction. Falls back to the raw region name
/// when nothing matches. Returns `None` for a blank region.
#[must_use]
pub fn match_state(options: &[StateOption], region: &str) -> Option<String> {
    let region = region.trim();
    if region.is_empty() {
        return None;
    }

    let needle = region.to_lowercase();
    let matched = options.iter().find(|option| {
        let label = option.label.trim().to_lowercase();
        !label.is_empty() && (label.contains(&needle) || needle.contains(&label))
    });

    Some(matched.map_or_else(|| region.to_string(), |option| option.value.clone()))
}
