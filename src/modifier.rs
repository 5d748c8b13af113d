//! Modifier records.
//!
//! A `Modifier` is one named effect ("10% increased Fire Damage"): a
//! combination kind, an optional source, classifier bitmasks, tags, and
//! a value. Modifiers are built with a by-value builder and are not
//! mutated after they are added to a [`ModList`](crate::mod_list::ModList).

use crate::error::ModError;
use crate::flags::{KeywordFlags, ModFlags, ModSource};
use crate::mod_name::ModName;
use crate::tag::{EvalScope, Tag};
use crate::value::{ListPayload, ModValue};
use serde::{Deserialize, Serialize};

/// How a modifier combines with others of the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModType {
    /// Boolean switch.
    Flag,
    /// Flat added value.
    Base,
    /// Additive percentage ("increased"/"reduced").
    Increase,
    /// Compounding percentage ("more"/"less").
    More,
    /// Plain multiplier.
    Multiplier,
    /// Entry gathered into a list.
    List,
}

/// A single named effect.
///
/// # Examples
///
/// ```rust
/// use zzmod::{KeywordFlags, ModFlags, ModSource, ModType, Modifier};
///
/// let m = Modifier::float("Damage", ModType::Increase, 12.0)
///     .with_source(ModSource::Tree)
///     .with_flags(ModFlags::PROJECTILE)
///     .with_keyword_flags(KeywordFlags::FIRE);
///
/// assert_eq!(m.name(), "Damage");
/// assert_eq!(m.kind(), ModType::Increase);
/// assert_eq!(m.source(), Some(ModSource::Tree));
/// assert_eq!(m.value().as_number(), Some(12.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    name: ModName,
    kind: ModType,
    source: Option<ModSource>,
    flags: ModFlags,
    keyword_flags: KeywordFlags,
    tags: Vec<Tag>,
    value: ModValue,
}

impl Modifier {
    /// Create a modifier with an arbitrary kind and value.
    pub fn new(name: impl Into<ModName>, kind: ModType, value: ModValue) -> Self {
        Self {
            name: name.into(),
            kind,
            source: None,
            flags: ModFlags::empty(),
            keyword_flags: KeywordFlags::empty(),
            tags: Vec::new(),
            value,
        }
    }

    /// Create a numeric modifier.
    pub fn float(name: impl Into<ModName>, kind: ModType, value: f64) -> Self {
        Self::new(name, kind, ModValue::Number(value))
    }

    /// Create a boolean modifier of kind [`ModType::Flag`].
    pub fn flag(name: impl Into<ModName>, value: bool) -> Self {
        Self::new(name, ModType::Flag, ModValue::Flag(value))
    }

    /// Create a list modifier of kind [`ModType::List`].
    pub fn list(name: impl Into<ModName>, value: impl Into<ListPayload>) -> Self {
        Self::new(name, ModType::List, ModValue::List(value.into()))
    }

    /// Record where the modifier came from. Filters with a source only
    /// match modifiers with the same source.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use zzmod::{ModFilter, ModSource, ModType, Modifier};
    ///
    /// let shock = Modifier::float("DamageTaken", ModType::Increase, 15.0)
    ///     .with_source(ModSource::Shock);
    ///
    /// assert!(ModFilter::new().with_source(ModSource::Shock).matches(&shock));
    /// assert!(!ModFilter::new().with_source(ModSource::Scorch).matches(&shock));
    /// ```
    pub fn with_source(mut self, source: ModSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Add capability flags. Repeated calls accumulate.
    pub fn with_flags(mut self, flags: ModFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Add keyword flags. Repeated calls accumulate.
    pub fn with_keyword_flags(mut self, flags: KeywordFlags) -> Self {
        self.keyword_flags |= flags;
        self
    }

    /// Attach a multiplier or condition tag.
    pub fn with_tag(mut self, tag: impl Into<Tag>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags.extend(tags);
        self
    }

    pub fn name(&self) -> &ModName {
        &self.name
    }

    pub fn kind(&self) -> ModType {
        self.kind
    }

    pub fn source(&self) -> Option<ModSource> {
        self.source
    }

    pub fn flags(&self) -> ModFlags {
        self.flags
    }

    pub fn keyword_flags(&self) -> KeywordFlags {
        self.keyword_flags
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn value(&self) -> &ModValue {
        &self.value
    }

    /// Copy of this modifier carrying a different value.
    pub(crate) fn with_value(&self, value: ModValue) -> Self {
        Self {
            value,
            ..self.clone()
        }
    }

    /// Whether every condition tag holds in `scope`.
    pub fn is_active(&self, scope: &dyn EvalScope) -> bool {
        self.tags.iter().all(|tag| match tag {
            Tag::Condition(cond) => cond.holds(scope),
            Tag::Multiplier(_) => true,
        })
    }

    /// Numeric value after applying the multiplier tag, if any.
    ///
    /// Returns `None` for non-numeric values and for modifiers whose
    /// conditions do not hold.
    ///
    /// # Errors
    ///
    /// Propagates errors of [`MultiplierTag::apply`](crate::tag::MultiplierTag::apply).
    pub fn evaluate_number(&self, scope: &dyn EvalScope) -> Result<Option<f64>, ModError> {
        let Some(mut value) = self.value.as_number() else {
            return Ok(None);
        };
        if !self.is_active(scope) {
            return Ok(None);
        }

        for tag in &self.tags {
            if let Tag::Multiplier(mult) = tag {
                value = mult.apply(&self.name, value, scope)?;
            }
        }

        Ok(Some(value))
    }
}
