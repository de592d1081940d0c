use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Largest network the exact tour search accepts, whatever the configuration says.
/// 11! orderings are enumerated at this size.
pub const HARD_MAX_NODES: usize = 12;

/// Node limit of the reference instance.
pub const DEFAULT_MAX_NODES: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Upper bound on the number of nodes a network or tour search may have.
    pub max_nodes: usize,
    /// Skip a partial ordering as soon as its cost reaches the best complete tour.
    pub prune_partial_tours: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_nodes: DEFAULT_MAX_NODES,
            prune_partial_tours: true,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_nodes == 0 || self.max_nodes > HARD_MAX_NODES {
            return Err(Error::invalid_input(format!(
                "max_nodes must be between 1 and {HARD_MAX_NODES}, got {}",
                self.max_nodes
            )));
        }
        Ok(())
    }

    /// Reads a JSON configuration file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Fails with [`Error::InvalidNodeCount`] unless `1 <= count <= max_nodes`.
    pub fn check_node_count(&self, count: usize) -> Result<()> {
        if count == 0 || count > self.max_nodes {
            return Err(Error::InvalidNodeCount {
                count,
                max: self.max_nodes,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: SolverConfig = serde_json::from_str(r#"{ "max_nodes": 6 }"#).unwrap();
        assert_eq!(config.max_nodes, 6);
        assert!(config.prune_partial_tours);
    }

    #[test]
    fn rejects_limits_outside_the_hard_ceiling() {
        let zero = SolverConfig {
            max_nodes: 0,
            ..SolverConfig::default()
        };
        assert!(zero.validate().is_err());

        let huge = SolverConfig {
            max_nodes: HARD_MAX_NODES + 1,
            ..SolverConfig::default()
        };
        assert!(huge.validate().is_err());
        assert!(SolverConfig::default().validate().is_ok());
    }

    #[test]
    fn node_count_bounds() {
        let config = SolverConfig::default();
        assert!(matches!(
            config.check_node_count(0),
            Err(Error::InvalidNodeCount { count: 0, .. })
        ));
        assert!(config.check_node_count(1).is_ok());
        assert!(config.check_node_count(DEFAULT_MAX_NODES).is_ok());
        assert!(config.check_node_count(DEFAULT_MAX_NODES + 1).is_err());
    }
}
