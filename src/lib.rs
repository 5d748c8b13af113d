//! # zzmod - Deterministic Modifier Aggregation for ARPG Build Planners
//!
//! A modifier engine for build planners that provides:
//! - **Typed modifiers** (flat, increased, more, flag, list) with provenance
//! - **Filtered queries** scoped by capability flags, keywords and source
//! - **Conditional modifiers** resolved against named conditions and multipliers
//! - **Node caching** so passive tree stat text is parsed once per session
//!
//! ## Core Concepts
//!
//! ### Modifier Pipeline
//!
//! ```text
//! [stat text] → [StatParser] → [Modifier] → [ModList / ModStore] → query
//! ```
//!
//! 1. **Modifiers** are small named effects with a kind and a value
//! 2. **Mod lists** collect modifiers and read through a parent list
//! 3. **Mod stores** add conditions and multipliers for tagged modifiers
//! 4. **The node cache** turns allocated passive nodes into one mod list
//!
//! ## Example
//!
//! ```rust
//! use zzmod::*;
//!
//! let mut list = ModList::new();
//! list.add_mod(Modifier::float("Damage", ModType::Increase, 10.0));
//! list.add_mod(
//!     Modifier::float("Damage", ModType::Increase, 20.0)
//!         .with_keyword_flags(KeywordFlags::FIRE),
//! );
//! list.add_mod(Modifier::float("Damage", ModType::More, 50.0));
//!
//! let cold = ModFilter::new().with_keyword_flags(KeywordFlags::COLD);
//! assert_eq!(list.sum(ModType::Increase, Some(&cold), &["Damage"]).unwrap(), 10.0);
//! assert_eq!(list.sum(ModType::Increase, None, &["Damage"]).unwrap(), 30.0);
//! ```
//!
//! ## Modules
//!
//! - [`modifier`] - Modifier records and kinds
//! - [`value`] - Modifier values and list payloads
//! - [`flags`] - Capability/keyword bitmasks and sources
//! - [`tag`] - Multiplier and condition tags
//! - [`filter`] - Query filters
//! - [`mod_list`] - Ordered modifier lists and queries
//! - [`store`] - Mod lists with conditions and multipliers
//! - [`node`] - Passive node cache and aggregation
//! - [`env`] - Calculation environment and configuration
//! - [`error`] - Error types

pub mod env;
pub mod error;
pub mod filter;
pub mod flags;
pub mod mod_list;
pub mod mod_name;
pub mod modifier;
pub mod node;
pub mod store;
pub mod tag;
pub mod value;

// Re-export main types for convenience
pub use env::{CalcEnv, EnvConfig};
pub use error::ModError;
pub use filter::ModFilter;
pub use flags::{KeywordFlags, ModFlags, ModSource};
pub use mod_list::ModList;
pub use mod_name::ModName;
pub use modifier::{ModType, Modifier};
pub use store::ModStore;
pub use tag::{ConditionTag, EmptyScope, EvalScope, MultiplierTag, Tag};
pub use value::{ListPayload, ModValue, SkillGrant};

// Re-export node cache types
pub use node::{
    GrantedSkill, NodeAggregate, NodeModCache, ParseDiagnostic, ParsedStat, PassiveNode,
    StatParser,
};
