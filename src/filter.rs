//! Query filters.
//!
//! A `ModFilter` scopes a query to the modifiers relevant for one
//! situation, e.g. "projectile fire hits". Each field left at `None`
//! is unconstrained.

use crate::flags::{KeywordFlags, ModFlags, ModSource};
use crate::modifier::Modifier;
use serde::{Deserialize, Serialize};

/// Constraints applied to every modifier considered by a query.
///
/// A modifier satisfies a constrained field when its own attribute is
/// unset (empty bitmask, no source) or when it intersects the required
/// bitmask / equals the required source.
///
/// # Examples
///
/// ```rust
/// use zzmod::{KeywordFlags, ModFilter, ModType, Modifier};
///
/// let filter = ModFilter::new().with_keyword_flags(KeywordFlags::COLD);
///
/// let cold = Modifier::float("Damage", ModType::Increase, 10.0)
///     .with_keyword_flags(KeywordFlags::COLD);
/// let fire = Modifier::float("Damage", ModType::Increase, 10.0)
///     .with_keyword_flags(KeywordFlags::FIRE);
/// let generic = Modifier::float("Damage", ModType::Increase, 10.0);
///
/// assert!(filter.matches(&cold));
/// assert!(!filter.matches(&fire));
/// assert!(filter.matches(&generic));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModFilter {
    pub flags: Option<ModFlags>,
    pub keyword_flags: Option<KeywordFlags>,
    pub source: Option<ModSource>,
}

impl ModFilter {
    /// Create a filter that matches every modifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require modifiers to share a capability flag (or have none).
    pub fn with_flags(mut self, flags: ModFlags) -> Self {
        self.flags = Some(flags);
        self
    }

    pub fn with_keyword_flags(mut self, flags: KeywordFlags) -> Self {
        self.keyword_flags = Some(flags);
        self
    }

    pub fn with_source(mut self, source: ModSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Whether `m` satisfies every constrained field of this filter.
    pub fn matches(&self, m: &Modifier) -> bool {
        if let Some(required) = self.flags {
            if !required.is_empty() && !m.flags().is_empty() && !m.flags().intersects(required) {
                return false;
            }
        }

        if let Some(required) = self.keyword_flags {
            if !required.is_empty()
                && !m.keyword_flags().is_empty()
                && !m.keyword_flags().intersects(required)
            {
                return false;
            }
        }

        if let (Some(required), Some(source)) = (self.source, m.source()) {
            if required != source {
                return false;
            }
        }

        true
    }
}

/// Apply an optional filter; `None` matches everything.
pub(crate) fn matches(filter: Option<&ModFilter>, m: &Modifier) -> bool {
    filter.map_or(true, |f| f.matches(m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::ModType;

    fn damage() -> Modifier {
        Modifier::float("Damage", ModType::Increase, 10.0)
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = ModFilter::new();
        assert!(filter.matches(&damage()));
        assert!(filter.matches(
            &damage()
                .with_flags(ModFlags::SPELL)
                .with_source(ModSource::Item)
        ));
        assert!(matches(None, &damage().with_keyword_flags(KeywordFlags::CHAOS)));
    }

    #[test]
    fn test_flags_wildcard_and_intersection() {
        let filter = ModFilter::new().with_flags(ModFlags::DOT);
        assert!(filter.matches(&damage()));
        assert!(filter.matches(&damage().with_flags(ModFlags::DOT | ModFlags::AILMENT)));
        assert!(!filter.matches(&damage().with_flags(ModFlags::PROJECTILE)));
    }

    #[test]
    fn test_source_exact_match() {
        let filter = ModFilter::new().with_source(ModSource::Scorch);
        assert!(filter.matches(&damage()));
        assert!(filter.matches(&damage().with_source(ModSource::Scorch)));
        assert!(!filter.matches(&damage().with_source(ModSource::Shock)));
    }

    #[test]
    fn test_all_fields_must_match() {
        let filter = ModFilter::new()
            .with_flags(ModFlags::ATTACK)
            .with_keyword_flags(KeywordFlags::FIRE);
        let m = damage()
            .with_flags(ModFlags::ATTACK)
            .with_keyword_flags(KeywordFlags::COLD);
        assert!(!filter.matches(&m));
    }
}
