//! Calculation environment.
//!
//! A `CalcEnv` owns everything that outlives a single calculation pass:
//! the stat parser, the node modifier cache, and the configuration.
//! Independent sessions each own their own environment, so no cache
//! state is shared between them.

use crate::error::ModError;
use crate::node::{NodeAggregate, NodeModCache, PassiveNode, StatParser};
use serde::{Deserialize, Serialize};

/// Environment configuration.
///
/// Missing fields take their default values.
///
/// # Examples
///
/// ```rust
/// use zzmod::EnvConfig;
///
/// let config = EnvConfig::from_json(r#"{ "log_parse_errors": false }"#).unwrap();
/// assert!(config.apply_node_effects);
/// assert!(!config.log_parse_errors);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Apply node-level effects (disabled nodes, passive effect scaling,
    /// replaced effects) when a node is first parsed.
    pub apply_node_effects: bool,
    /// Emit a warning log for every parser diagnostic.
    pub log_parse_errors: bool,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            apply_node_effects: true,
            log_parse_errors: true,
        }
    }
}

impl EnvConfig {
    /// Read a configuration from JSON.
    ///
    /// # Errors
    ///
    /// [`ModError::InvalidConfig`] if the text is not a valid configuration.
    pub fn from_json(json: &str) -> Result<Self, ModError> {
        serde_json::from_str(json).map_err(|e| ModError::InvalidConfig(e.to_string()))
    }
}

/// Calculation environment owning a parser and a node cache.
///
/// # Examples
///
/// ```rust
/// use zzmod::{CalcEnv, ModType, Modifier, PassiveNode};
///
/// let parser = |text: &str| match text.strip_suffix("% increased Damage") {
///     Some(n) => match n.parse::<f64>() {
///         Ok(v) => (vec![Modifier::float("Damage", ModType::Increase, v)], String::new()),
///         Err(e) => (Vec::new(), e.to_string()),
///     },
///     None => (Vec::new(), "unrecognised stat".to_string()),
/// };
///
/// let mut env = CalcEnv::new(parser);
/// let nodes = vec![PassiveNode::new(
///     100,
///     "Brutal Blade",
///     vec!["12% increased Damage".into(), "Grants a pony".into()],
/// )];
///
/// let aggregate = env.build_node_mods(&nodes).unwrap();
/// assert_eq!(aggregate.mods.sum(ModType::Increase, None, &["Damage"]).unwrap(), 12.0);
/// assert_eq!(aggregate.diagnostics.len(), 1);
/// ```
pub struct CalcEnv<P> {
    parser: P,
    cache: NodeModCache,
    config: EnvConfig,
}

impl<P: StatParser> CalcEnv<P> {
    /// Create an environment with the default configuration.
    pub fn new(parser: P) -> Self {
        Self::with_config(parser, EnvConfig::default())
    }

    pub fn with_config(parser: P, config: EnvConfig) -> Self {
        Self {
            parser,
            cache: NodeModCache::new(),
            config,
        }
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    pub fn cache(&self) -> &NodeModCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut NodeModCache {
        &mut self.cache
    }

    /// Build the merged modifier list of a set of allocated nodes.
    ///
    /// See [`NodeModCache::build_aggregate`].
    pub fn build_node_mods<'n, I>(&mut self, nodes: I) -> Result<NodeAggregate, ModError>
    where
        I: IntoIterator<Item = &'n PassiveNode>,
    {
        self.cache.build_aggregate(&self.parser, nodes, &self.config)
    }
}
