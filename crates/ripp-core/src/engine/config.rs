use crate::core::models::request::ModificationRequest;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_CORE_LENGTH: usize = 15;
pub const DEFAULT_WARN_THRESHOLD: u64 = 1_000_000;
pub const DEFAULT_MAX_LEADER_LENGTH: usize = 40;
pub const DEFAULT_SCORE_THRESHOLD: f64 = 0.1;

/// Keyword selecting random substitution as fill policy or random priority.
pub const RANDOM_POLICY: &str = "random";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// A fill or priority policy as written by the caller.
///
/// A single string is a keyword (`"random"`), an enzyme identifier or, for
/// fill policies, a literal residue motif. A list names several enzymes.
/// Interpretation against the registry happens in the leader task.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PolicyValue {
    One(String),
    Many(Vec<String>),
}

impl Default for PolicyValue {
    fn default() -> Self {
        Self::One(RANDOM_POLICY.to_string())
    }
}

impl From<&str> for PolicyValue {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<String> for PolicyValue {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for PolicyValue {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<&[&str]> for PolicyValue {
    fn from(values: &[&str]) -> Self {
        Self::Many(values.iter().map(|v| v.to_string()).collect())
    }
}

/// Which retained tiling the design workflow resolves into a leader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TilingSelection {
    /// Highest combined score, then shortest, then lowest id.
    #[default]
    Best,
    Id(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumerationConfig {
    /// Candidate-space size above which a warning is emitted.
    pub warn_threshold: u64,
    /// Candidate-space size above which enumeration is refused.
    pub hard_limit: Option<u64>,
}

impl Default for EnumerationConfig {
    fn default() -> Self {
        Self {
            warn_threshold: DEFAULT_WARN_THRESHOLD,
            hard_limit: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilingConfig {
    pub max_length: usize,
    /// Tilings must score strictly above this to be retained.
    pub score_threshold: f64,
}

impl Default for TilingConfig {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LEADER_LENGTH,
            score_threshold: DEFAULT_SCORE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LeaderConfig {
    pub fill: PolicyValue,
    pub priority: PolicyValue,
    pub selection: TilingSelection,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesignConfig {
    pub modifications: Vec<ModificationRequest>,
    pub core_length: usize,
    pub required_patterns: Vec<String>,
    pub forbidden_patterns: Vec<String>,
    pub enumeration: EnumerationConfig,
    pub tiling: TilingConfig,
    pub leader: LeaderConfig,
}

impl DesignConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, "<inline>")
    }

    fn parse(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let file: DesignFile = toml::from_str(content).map_err(|e| ConfigError::Toml {
            path: origin.to_string(),
            source: e,
        })?;
        file.into_builder().build()
    }
}

#[derive(Default)]
pub struct DesignConfigBuilder {
    modifications: Vec<ModificationRequest>,
    core_length: Option<usize>,
    required_patterns: Vec<String>,
    forbidden_patterns: Vec<String>,
    warn_threshold: Option<u64>,
    hard_limit: Option<u64>,
    max_leader_length: Option<usize>,
    score_threshold: Option<f64>,
    fill: Option<PolicyValue>,
    priority: Option<PolicyValue>,
    selection: Option<TilingSelection>,
    seed: Option<u64>,
}

impl DesignConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modification(mut self, request: ModificationRequest) -> Self {
        self.modifications.push(request);
        self
    }
    pub fn modifications(mut self, requests: impl IntoIterator<Item = ModificationRequest>) -> Self {
        self.modifications.extend(requests);
        self
    }
    pub fn core_length(mut self, length: usize) -> Self {
        self.core_length = Some(length);
        self
    }
    pub fn required_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.required_patterns.push(pattern.into());
        self
    }
    pub fn forbidden_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.forbidden_patterns.push(pattern.into());
        self
    }
    pub fn warn_threshold(mut self, threshold: u64) -> Self {
        self.warn_threshold = Some(threshold);
        self
    }
    pub fn hard_limit(mut self, limit: u64) -> Self {
        self.hard_limit = Some(limit);
        self
    }
    pub fn max_leader_length(mut self, length: usize) -> Self {
        self.max_leader_length = Some(length);
        self
    }
    pub fn score_threshold(mut self, threshold: f64) -> Self {
        self.score_threshold = Some(threshold);
        self
    }
    pub fn fill(mut self, policy: impl Into<PolicyValue>) -> Self {
        self.fill = Some(policy.into());
        self
    }
    pub fn priority(mut self, policy: impl Into<PolicyValue>) -> Self {
        self.priority = Some(policy.into());
        self
    }
    pub fn selection(mut self, selection: TilingSelection) -> Self {
        self.selection = Some(selection);
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<DesignConfig, ConfigError> {
        if self.modifications.is_empty() {
            return Err(ConfigError::MissingParameter("modifications"));
        }
        let score_threshold = self.score_threshold.unwrap_or(DEFAULT_SCORE_THRESHOLD);
        if !score_threshold.is_finite() {
            return Err(ConfigError::InvalidValue {
                parameter: "score_threshold",
                reason: format!("{} is not a finite number", score_threshold),
            });
        }

        Ok(DesignConfig {
            modifications: self.modifications,
            core_length: self.core_length.unwrap_or(DEFAULT_CORE_LENGTH),
            required_patterns: self.required_patterns,
            forbidden_patterns: self.forbidden_patterns,
            enumeration: EnumerationConfig {
                warn_threshold: self.warn_threshold.unwrap_or(DEFAULT_WARN_THRESHOLD),
                hard_limit: self.hard_limit,
            },
            tiling: TilingConfig {
                max_length: self.max_leader_length.unwrap_or(DEFAULT_MAX_LEADER_LENGTH),
                score_threshold,
            },
            leader: LeaderConfig {
                fill: self.fill.unwrap_or_default(),
                priority: self.priority.unwrap_or_default(),
                selection: self.selection.unwrap_or_default(),
                seed: self.seed,
            },
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct DesignFile {
    #[serde(default)]
    modifications: Vec<ModificationRequest>,
    core_length: Option<usize>,
    #[serde(default)]
    required_patterns: Vec<String>,
    #[serde(default)]
    forbidden_patterns: Vec<String>,
    #[serde(default)]
    enumeration: EnumerationFile,
    #[serde(default)]
    tiling: TilingFile,
    #[serde(default)]
    leader: LeaderFile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct EnumerationFile {
    warn_threshold: Option<u64>,
    hard_limit: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct TilingFile {
    max_length: Option<usize>,
    score_threshold: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct LeaderFile {
    fill: Option<PolicyValue>,
    priority: Option<PolicyValue>,
    selection: Option<TilingSelection>,
    seed: Option<u64>,
}

impl DesignFile {
    fn into_builder(self) -> DesignConfigBuilder {
        DesignConfigBuilder {
            modifications: self.modifications,
            core_length: self.core_length,
            required_patterns: self.required_patterns,
            forbidden_patterns: self.forbidden_patterns,
            warn_threshold: self.enumeration.warn_threshold,
            hard_limit: self.enumeration.hard_limit,
            max_leader_length: self.tiling.max_length,
            score_threshold: self.tiling.score_threshold,
            fill: self.leader.fill,
            priority: self.leader.priority,
            selection: self.leader.selection,
            seed: self.leader.seed,
        }
    }
}
