//! Configuration system for smtlink.
//!
//! Describes what the target solver can do and how queries for it are
//! written. Load from TOML or YAML, or start from a built-in preset.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use smtlink_config::InterfaceConfig;
//!
//! let config = InterfaceConfig::from_toml_str(r#"
//!     solver = "yices"
//!     logic = "QF_BV"
//!     timeout_ms = 5000
//! "#).unwrap();
//!
//! assert_eq!(config.capabilities().name, "Yices");
//! assert!(!config.capabilities().supports_optimization);
//! assert_eq!(config.logic.as_deref(), Some("QF_BV"));
//! ```
//!
//! Describe a solver explicitly:
//!
//! ```
//! use smtlink_config::InterfaceConfig;
//!
//! let config = InterfaceConfig::from_toml_str(r#"
//!     [solver]
//!     name = "in-house"
//!     supports_unbounded_ints = true
//!     supports_reals = true
//! "#).unwrap();
//!
//! assert!(config.capabilities().supports_reals);
//! assert!(!config.capabilities().supports_quantifiers);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use smtlink_core::Dialect;

/// Sentinel used when the configuration does not name one.
pub const DEFAULT_SENTINEL: &str = "smtlink-multi-model-separator";

/// Status lines a solver prints; none of them may serve as a sentinel.
const STATUS_LINES: [&str; 4] = ["sat", "unsat", "unknown", "timeout"];

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Features a solver declares support for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverCapabilities {
    /// Display name used in diagnostics.
    pub name: String,

    /// Mathematical integers (`Int`).
    #[serde(default)]
    pub supports_unbounded_ints: bool,

    /// Algebraic reals (`Real`).
    #[serde(default)]
    pub supports_reals: bool,

    /// IEEE-754 floats and doubles.
    #[serde(default)]
    pub supports_ieee754: bool,

    /// Quantified formulas.
    #[serde(default)]
    pub supports_quantifiers: bool,

    /// User declared sorts.
    #[serde(default)]
    pub supports_uninterpreted_sorts: bool,

    /// `minimize`/`maximize`/`assert-soft`.
    #[serde(default)]
    pub supports_optimization: bool,
}

impl SolverCapabilities {
    /// A solver with no optional features, only booleans and bit-vectors.
    pub fn minimal(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// A solver supporting every feature the gate knows about.
    pub fn full(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            supports_unbounded_ints: true,
            supports_reals: true,
            supports_ieee754: true,
            supports_quantifiers: true,
            supports_uninterpreted_sorts: true,
            supports_optimization: true,
        }
    }
}

/// Solvers with well-known capability sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverPreset {
    /// Z3, the only preset with optimization support.
    #[default]
    Z3,

    /// CVC4.
    Cvc4,

    /// cvc5.
    Cvc5,

    /// Yices 2.
    Yices,

    /// Boolector, bit-vectors and arrays only.
    Boolector,

    /// MathSAT 5.
    Mathsat,

    /// ABC, booleans and bit-vectors only.
    Abc,
}

impl SolverPreset {
    /// All presets, in declaration order.
    pub const ALL: [SolverPreset; 7] = [
        SolverPreset::Z3,
        SolverPreset::Cvc4,
        SolverPreset::Cvc5,
        SolverPreset::Yices,
        SolverPreset::Boolector,
        SolverPreset::Mathsat,
        SolverPreset::Abc,
    ];

    /// Capability descriptor of this solver.
    pub fn capabilities(self) -> SolverCapabilities {
        let name = self.to_string();
        match self {
            SolverPreset::Z3 => SolverCapabilities::full(name),
            SolverPreset::Cvc4 | SolverPreset::Cvc5 => SolverCapabilities {
                supports_optimization: false,
                ..SolverCapabilities::full(name)
            },
            SolverPreset::Yices => SolverCapabilities {
                supports_unbounded_ints: true,
                supports_reals: true,
                supports_uninterpreted_sorts: true,
                ..SolverCapabilities::minimal(name)
            },
            SolverPreset::Mathsat => SolverCapabilities {
                supports_unbounded_ints: true,
                supports_reals: true,
                supports_ieee754: true,
                supports_uninterpreted_sorts: true,
                ..SolverCapabilities::minimal(name)
            },
            SolverPreset::Boolector | SolverPreset::Abc => SolverCapabilities::minimal(name),
        }
    }
}

impl fmt::Display for SolverPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolverPreset::Z3 => "Z3",
            SolverPreset::Cvc4 => "CVC4",
            SolverPreset::Cvc5 => "cvc5",
            SolverPreset::Yices => "Yices",
            SolverPreset::Boolector => "Boolector",
            SolverPreset::Mathsat => "MathSAT",
            SolverPreset::Abc => "ABC",
        };
        f.write_str(name)
    }
}

/// Either a preset name or an explicit capability table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SolverSpec {
    /// `solver = "z3"`
    Preset(SolverPreset),

    /// `[solver]` table.
    Custom(SolverCapabilities),
}

impl Default for SolverSpec {
    fn default() -> Self {
        SolverSpec::Preset(SolverPreset::default())
    }
}

impl SolverSpec {
    pub fn capabilities(&self) -> SolverCapabilities {
        match self {
            SolverSpec::Preset(preset) => preset.capabilities(),
            SolverSpec::Custom(caps) => caps.clone(),
        }
    }
}

/// Main interface configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct InterfaceConfig {
    /// Target solver.
    #[serde(default)]
    pub solver: SolverSpec,

    /// Query-language dialect.
    #[serde(default)]
    pub dialect: Dialect,

    /// Explicit `set-logic`; inferred from the program when absent.
    #[serde(default)]
    pub logic: Option<String>,

    /// Emit `(set-option :produce-models true)`.
    #[serde(default = "default_produce_models")]
    pub produce_models: bool,

    /// Marker echoed between the models of a multi-model response.
    #[serde(default = "default_sentinel")]
    pub sentinel: String,

    /// Solver timeout passed as `:timeout`, in milliseconds.
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Extra `set-option` pairs, emitted in key order.
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

fn default_produce_models() -> bool {
    true
}

fn default_sentinel() -> String {
    DEFAULT_SENTINEL.to_string()
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        Self {
            solver: SolverSpec::default(),
            dialect: Dialect::default(),
            logic: None,
            produce_models: default_produce_models(),
            sentinel: default_sentinel(),
            timeout_ms: None,
            options: BTreeMap::new(),
        }
    }
}

impl InterfaceConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or
    /// describes an unusable sentinel.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks invariants serde cannot express.
    ///
    /// The sentinel is echoed inside a string literal and matched as a whole
    /// output line, so it must be non-empty printable text without quotes or
    /// surrounding whitespace. It must also differ from every status line.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.sentinel;
        if s.is_empty() || s.trim() != s {
            return Err(ConfigError::Invalid(format!(
                "sentinel {s:?} must be non-empty without surrounding whitespace"
            )));
        }
        if s.chars().any(|c| c == '"' || c.is_control()) {
            return Err(ConfigError::Invalid(format!(
                "sentinel {s:?} must be printable and free of quotes"
            )));
        }
        if STATUS_LINES.contains(&s.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "sentinel {s:?} is a solver status line"
            )));
        }
        Ok(())
    }

    /// Capability descriptor of the configured solver.
    pub fn capabilities(&self) -> SolverCapabilities {
        self.solver.capabilities()
    }

    /// Targets a preset solver.
    pub fn with_preset(mut self, preset: SolverPreset) -> Self {
        self.solver = SolverSpec::Preset(preset);
        self
    }

    /// Targets an explicitly described solver.
    pub fn with_capabilities(mut self, capabilities: SolverCapabilities) -> Self {
        self.solver = SolverSpec::Custom(capabilities);
        self
    }

    /// Sets the logic.
    pub fn with_logic(mut self, logic: impl Into<String>) -> Self {
        self.logic = Some(logic.into());
        self
    }

    /// Sets the multi-model sentinel.
    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    /// Sets the solver timeout.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Adds an extra solver option.
    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }
}
