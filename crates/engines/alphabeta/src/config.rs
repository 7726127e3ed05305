//! Search configuration and the depth/branch adaptation tables.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::eval::EvalWeights;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid search config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Reachable-cell count below `below` raises the search depth to at least `depth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthStep {
    pub below: usize,
    pub depth: u8,
}

/// Removable-tile count below `below` widens the root to at least `limit`
/// candidates. A missing `limit` means every candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchStep {
    pub below: usize,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Configuration for the alpha-beta engine.
///
/// Every field has a default, so a TOML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Hard cap on the iterative-deepening depth. Values below 1 act as 1.
    pub max_search_depth: u8,
    /// Wall-clock budget per move in milliseconds (None = no limit).
    pub time_limit_ms: Option<u64>,
    /// Worker threads for the root search (None = available parallelism).
    pub threads: Option<usize>,
    /// Seed for tie-breaking between equally scored moves (None = entropy).
    pub seed: Option<u64>,
    /// Radius of the reachability scan feeding the depth table, clamped to 1..=3.
    pub reach_radius: u8,
    pub base_depth: u8,
    pub depth_steps: Vec<DepthStep>,
    pub base_branch: usize,
    pub branch_steps: Vec<BranchStep>,
    /// Below the root, only remove tiles within this Manhattan distance of the opponent.
    pub removal_radius: Option<usize>,
    /// Root ordering penalty per unit of distance between a removal and the mover.
    pub order_self_penalty: f64,
    pub eval: EvalWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_search_depth: 5,
            time_limit_ms: None,
            threads: None,
            seed: None,
            reach_radius: 2,
            base_depth: 2,
            depth_steps: vec![
                DepthStep { below: 24, depth: 3 },
                DepthStep { below: 16, depth: 4 },
                DepthStep { below: 8, depth: 5 },
            ],
            base_branch: 10,
            branch_steps: vec![
                BranchStep {
                    below: 25,
                    limit: Some(15),
                },
                BranchStep {
                    below: 15,
                    limit: None,
                },
            ],
            removal_radius: Some(3),
            order_self_penalty: 0.0,
            eval: EvalWeights::default(),
        }
    }
}

impl SearchConfig {
    /// Config for a plain fixed-depth search: every root candidate, no pruning
    /// heuristics, no time limit.
    pub fn fixed_depth(depth: u8) -> Self {
        Self {
            max_search_depth: depth,
            base_depth: depth,
            depth_steps: Vec::new(),
            base_branch: usize::MAX,
            branch_steps: Vec::new(),
            removal_radius: None,
            ..Self::default()
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }

    pub fn depth_cap(&self) -> u8 {
        self.max_search_depth.max(1)
    }

    /// Depth implied by the reachable-cell signal, clamped to `[1, cap]`.
    pub fn depth_for(&self, reachable: usize, cap: u8) -> u8 {
        let depth = self
            .depth_steps
            .iter()
            .filter(|step| reachable < step.below)
            .map(|step| step.depth)
            .fold(self.base_depth, u8::max);
        depth.clamp(1, cap.max(1))
    }

    /// Root branch factor implied by the removable-tile signal, clamped to
    /// `[1, candidates]`.
    pub fn branch_for(&self, removable: usize, candidates: usize) -> usize {
        let branch = self
            .branch_steps
            .iter()
            .filter(|step| removable < step.below)
            .map(|step| step.limit.unwrap_or(usize::MAX))
            .fold(self.base_branch, usize::max);
        branch.clamp(1, candidates.max(1))
    }

    pub fn reach_radius(&self) -> usize {
        usize::from(self.reach_radius.clamp(1, 3))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
