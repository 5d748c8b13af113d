//! Passive node modifier cache.
//!
//! Parsing stat text is by far the most expensive step of a calculation,
//! and the same passive nodes are evaluated over and over while a build
//! is edited. `NodeModCache` keeps the parsed [`ModList`] of every node it
//! has seen, keyed by node id, and [`NodeModCache::build_aggregate`]
//! merges the lists of a set of allocated nodes into one.
//!
//! Stat text of a node id is assumed not to change while the cache is
//! alive. Call [`NodeModCache::clear`] or [`NodeModCache::invalidate`]
//! when it does.

use crate::env::EnvConfig;
use crate::error::ModError;
use crate::mod_list::ModList;
use crate::modifier::Modifier;
use crate::value::ListPayload;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::{debug, trace, warn};

/// A passive tree node and its stat lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassiveNode {
    pub id: u32,
    pub name: String,
    pub stats: Vec<String>,
}

impl PassiveNode {
    pub fn new(id: u32, name: impl Into<String>, stats: Vec<String>) -> Self {
        Self {
            id,
            name: name.into(),
            stats,
        }
    }
}

/// Result of parsing one stat line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedStat {
    /// Modifiers produced by the line, possibly none.
    pub mods: Vec<Modifier>,
    /// Parser complaint about the line, if any.
    pub error: Option<String>,
}

/// Trait for stat text parsers.
///
/// Implemented for closures returning `(mods, error)`, where an empty or
/// blank error string means the line parsed cleanly.
///
/// # Examples
///
/// ```rust
/// use zzmod::{ModType, Modifier, StatParser};
///
/// let parser = |text: &str| match text {
///     "+10 to maximum Life" => (vec![Modifier::float("Life", ModType::Base, 10.0)], String::new()),
///     _ => (Vec::new(), "unknown stat".to_string()),
/// };
///
/// assert_eq!(parser.parse_stat("+10 to maximum Life").mods.len(), 1);
/// assert_eq!(parser.parse_stat("???").error.as_deref(), Some("unknown stat"));
/// ```
pub trait StatParser {
    /// Parse a single stat line into modifiers.
    fn parse_stat(&self, text: &str) -> ParsedStat;
}

impl<F> StatParser for F
where
    F: Fn(&str) -> (Vec<Modifier>, String),
{
    fn parse_stat(&self, text: &str) -> ParsedStat {
        let (mods, error) = self(text);
        ParsedStat {
            mods,
            error: (!error.trim().is_empty()).then_some(error),
        }
    }
}

/// A stat line the parser complained about.
///
/// The line still contributes whatever modifiers were produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseDiagnostic {
    pub node_id: u32,
    pub node_name: String,
    pub stat: String,
    pub message: String,
    pub mods_found: usize,
}

impl fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error parsing Passive Node ({}) mod: {}, stat text: {}, with {} mods found",
            self.node_name, self.message, self.stat, self.mods_found
        )
    }
}

/// A skill granted by an allocated passive node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrantedSkill {
    pub skill_id: String,
    pub level: u32,
    pub no_supports: bool,
    /// Node that grants the skill.
    pub node_id: u32,
}

/// Merged modifiers of a set of passive nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeAggregate {
    /// Modifiers of every node, in node order.
    pub mods: ModList<'static>,
    /// Diagnostics of nodes parsed during this call. Cached nodes add none.
    pub diagnostics: Vec<ParseDiagnostic>,
    pub granted_skills: Vec<GrantedSkill>,
    /// Nodes that make enemies explode.
    pub explode_sources: Vec<u32>,
}

/// Cache of parsed modifier lists keyed by passive node id.
///
/// # Examples
///
/// ```rust
/// use zzmod::{EnvConfig, ModType, Modifier, NodeModCache, PassiveNode};
///
/// let parser = |_: &str| (vec![Modifier::float("Life", ModType::Base, 10.0)], String::new());
/// let nodes = vec![
///     PassiveNode::new(1, "Life", vec!["+10 to maximum Life".into()]),
///     PassiveNode::new(2, "Life", vec!["+10 to maximum Life".into()]),
/// ];
///
/// let mut cache = NodeModCache::new();
/// let aggregate = cache.build_aggregate(&parser, &nodes, &EnvConfig::default()).unwrap();
///
/// assert_eq!(aggregate.mods.sum(ModType::Base, None, &["Life"]).unwrap(), 20.0);
/// assert_eq!(cache.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NodeModCache {
    entries: HashMap<u32, ModList<'static>>,
}

impl NodeModCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached nodes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, node_id: u32) -> bool {
        self.entries.contains_key(&node_id)
    }

    /// Cached modifier list of a node.
    pub fn get(&self, node_id: u32) -> Option<&ModList<'static>> {
        self.entries.get(&node_id)
    }

    /// Drop a single node so it is parsed again on next use.
    pub fn invalidate(&mut self, node_id: u32) {
        self.entries.remove(&node_id);
    }

    /// Drop every cached node.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Build one modifier list for a set of allocated nodes.
    ///
    /// Each node is looked up in the cache first. On a miss its stat
    /// lines are parsed once each, parser complaints are collected as
    /// diagnostics, and the resulting list is cached.
    ///
    /// `nodes` is treated as a set: a node id seen earlier in the same
    /// call is skipped.
    ///
    /// # Errors
    ///
    /// Only structural errors from node post-processing are returned;
    /// unparseable stat lines never fail the build.
    pub fn build_aggregate<'n, P, I>(
        &mut self,
        parser: &P,
        nodes: I,
        config: &EnvConfig,
    ) -> Result<NodeAggregate, ModError>
    where
        P: StatParser + ?Sized,
        I: IntoIterator<Item = &'n PassiveNode>,
    {
        let mut aggregate = NodeAggregate::default();
        let mut misses = 0usize;
        let mut seen = HashSet::new();

        for node in nodes {
            if !seen.insert(node.id) {
                trace!(node = node.id, "skipping duplicate node");
                continue;
            }

            let node_mods = match self.entries.entry(node.id) {
                Entry::Occupied(entry) => {
                    trace!(node = node.id, "node mods cache hit");
                    entry.into_mut()
                }
                Entry::Vacant(entry) => {
                    misses += 1;
                    let list = build_node_mods(parser, node, config, &mut aggregate.diagnostics)?;
                    debug!(node = node.id, mods = list.len(), "cached node mods");
                    entry.insert(list)
                }
            };

            aggregate.mods.merge(node_mods);
            collect_node_outputs(node.id, node_mods, &mut aggregate)?;
        }

        debug!(
            mods = aggregate.mods.len(),
            misses,
            diagnostics = aggregate.diagnostics.len(),
            "built node aggregate"
        );
        Ok(aggregate)
    }
}

fn build_node_mods<P>(
    parser: &P,
    node: &PassiveNode,
    config: &EnvConfig,
    diagnostics: &mut Vec<ParseDiagnostic>,
) -> Result<ModList<'static>, ModError>
where
    P: StatParser + ?Sized,
{
    let mut list = ModList::new();
    for stat in &node.stats {
        let parsed = parser.parse_stat(stat);
        trace!(node = node.id, stat = %stat, mods = parsed.mods.len(), "parsed stat line");

        if let Some(message) = parsed.error.filter(|e| !e.trim().is_empty()) {
            let diagnostic = ParseDiagnostic {
                node_id: node.id,
                node_name: node.name.clone(),
                stat: stat.clone(),
                message,
                mods_found: parsed.mods.len(),
            };
            if config.log_parse_errors {
                warn!("{}", diagnostic);
            }
            diagnostics.push(diagnostic);
        }

        list.extend(parsed.mods);
    }

    if config.apply_node_effects {
        list = apply_node_effects(list)?;
    }
    Ok(list)
}

/// Node-level effects: disabled nodes, effect scaling, replaced effects.
fn apply_node_effects(mut list: ModList<'static>) -> Result<ModList<'static>, ModError> {
    if list.flag(
        None,
        &["PassiveSkillHasNoEffect", "AllocatedPassiveSkillHasNoEffect"],
    )? {
        list.clear();
        return Ok(list);
    }

    let scale = list.effect_multiplier(None, &["PassiveSkillEffect"])?;
    if scale != 1.0 {
        let mut scaled = ModList::new();
        scaled.scale_add_list(&list, scale);
        list = scaled;
    }

    if list.flag(None, &["PassiveSkillHasOtherEffect"])? {
        let replacements: Vec<Modifier> = list
            .list(None, &["NodeModifier"])?
            .into_iter()
            .filter_map(|payload| match payload {
                ListPayload::Mod(m) => Some(m.as_ref().clone()),
                _ => None,
            })
            .collect();
        if !replacements.is_empty() {
            list = replacements.into_iter().collect();
        }
    }

    Ok(list)
}

fn collect_node_outputs(
    node_id: u32,
    node_mods: &ModList<'_>,
    aggregate: &mut NodeAggregate,
) -> Result<(), ModError> {
    for payload in node_mods.list(None, &["ExtraSkill"])? {
        if let ListPayload::ExtraSkill(grant) = payload {
            if grant.name != "Unknown" {
                aggregate.granted_skills.push(GrantedSkill {
                    skill_id: grant.skill_id.clone(),
                    level: grant.level,
                    no_supports: true,
                    node_id,
                });
            }
        }
    }

    if node_mods.flag(None, &["CanExplode"])? {
        aggregate.explode_sources.push(node_id);
    }
    Ok(())
}
