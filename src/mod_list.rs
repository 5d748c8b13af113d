//! Modifier list module.
//!
//! Provides the `ModList` type, an ordered collection of modifiers with
//! an optional read-through parent. All derived values of a build are
//! read from mod lists through four queries:
//!
//! - [`ModList::sum`] adds numeric values of one kind
//! - [`ModList::compound`] multiplies `1 + value / 100` factors
//! - [`ModList::flag`] ORs boolean values
//! - [`ModList::list`] gathers list payloads in order
//!
//! Each query considers the list's own entries followed by its parent
//! chain, restricted to the requested names and an optional
//! [`ModFilter`].

use crate::error::ModError;
use crate::filter::{self, ModFilter};
use crate::modifier::{ModType, Modifier};
use crate::tag::{EmptyScope, EvalScope};
use crate::value::{ListPayload, ModValue};

/// An ordered collection of modifiers.
///
/// The parent is borrowed, never owned: it must outlive every child
/// reading through it, and it cannot be modified while children exist.
///
/// # Examples
///
/// ```rust
/// use zzmod::{ModList, ModType, Modifier};
///
/// let mut base = ModList::new();
/// base.add_mod(Modifier::float("Life", ModType::Base, 50.0));
///
/// let mut child = ModList::with_parent(&base);
/// child.add_mod(Modifier::float("Life", ModType::Base, 25.0));
///
/// assert_eq!(child.sum(ModType::Base, None, &["Life"]).unwrap(), 75.0);
/// assert_eq!(base.sum(ModType::Base, None, &["Life"]).unwrap(), 50.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModList<'p> {
    entries: Vec<Modifier>,
    parent: Option<&'p ModList<'p>>,
}

impl<'p> ModList<'p> {
    /// Create an empty list without a parent.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            parent: None,
        }
    }

    /// Create an empty list reading through `parent`.
    pub fn with_parent(parent: &'p ModList<'p>) -> Self {
        Self {
            entries: Vec::new(),
            parent: Some(parent),
        }
    }

    pub fn parent(&self) -> Option<&'p ModList<'p>> {
        self.parent
    }

    /// The list's own entries, without the parent chain.
    pub fn entries(&self) -> &[Modifier] {
        &self.entries
    }

    /// Number of own entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over own entries, then over the parent chain.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            entries: self.entries.iter(),
            pending: self.parent,
        }
    }

    /// Append a modifier. No deduplication is performed.
    pub fn add_mod(&mut self, m: Modifier) {
        self.entries.push(m);
    }

    /// Append copies of `other`'s own entries. `other`'s parent is not merged.
    pub fn merge(&mut self, other: &ModList<'_>) {
        self.entries.extend(other.entries.iter().cloned());
    }

    /// Remove all own entries. The parent is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Append a copy of `m` with its numeric value scaled.
    ///
    /// Negative scales are treated as zero. Integral values are rounded
    /// to two decimals and truncated toward zero after scaling so that
    /// "+10 to Strength" at 150% effect stays a whole number. Flag and
    /// list values are copied unchanged.
    pub fn scale_add_mod(&mut self, m: &Modifier, scale: f64) {
        let scale = scale.max(0.0);
        if scale == 1.0 {
            self.add_mod(m.clone());
            return;
        }

        let scaled = match m.value() {
            ModValue::Number(v) => {
                let v = *v;
                let value = if v.fract() == 0.0 {
                    round2(v * scale).trunc()
                } else {
                    v * scale
                };
                m.with_value(ModValue::Number(value))
            }
            _ => m.clone(),
        };
        self.add_mod(scaled);
    }

    /// Append scaled copies of all of `other`'s own entries.
    pub fn scale_add_list(&mut self, other: &ModList<'_>, scale: f64) {
        for m in &other.entries {
            self.scale_add_mod(m, scale);
        }
    }

    /// Sum the values of all matching modifiers of `kind`.
    ///
    /// Multiplier tags are evaluated against an empty scope, so tagged
    /// modifiers contribute nothing here. Query a
    /// [`ModStore`](crate::store::ModStore) to resolve them.
    ///
    /// # Errors
    ///
    /// [`ModError::EmptyNames`] if `names` is empty, or
    /// [`ModError::ZeroDivision`] and [`ModError::NonFinite`] from a
    /// multiplier tag.
    pub fn sum(
        &self,
        kind: ModType,
        filter: Option<&ModFilter>,
        names: &[&str],
    ) -> Result<f64, ModError> {
        self.sum_with(&EmptyScope, kind, filter, names)
    }

    /// Multiply `1 + value / 100` over all matching numeric modifiers.
    ///
    /// Every kind contributes; the product starts at 1.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use zzmod::{ModList, ModType, Modifier};
    ///
    /// let mut list = ModList::new();
    /// list.add_mod(Modifier::float("Damage", ModType::More, 100.0));
    /// list.add_mod(Modifier::float("Damage", ModType::More, 50.0));
    ///
    /// assert_eq!(list.compound(None, &["Damage"]).unwrap(), 3.0);
    /// ```
    pub fn compound(&self, filter: Option<&ModFilter>, names: &[&str]) -> Result<f64, ModError> {
        self.compound_with(&EmptyScope, filter, names)
    }

    /// Whether any matching modifier carries a `true` flag value.
    pub fn flag(&self, filter: Option<&ModFilter>, names: &[&str]) -> Result<bool, ModError> {
        self.flag_with(&EmptyScope, filter, names)
    }

    /// Gather the payloads of all matching list modifiers in order.
    pub fn list(
        &self,
        filter: Option<&ModFilter>,
        names: &[&str],
    ) -> Result<Vec<&ListPayload>, ModError> {
        self.list_with(&EmptyScope, filter, names)
    }

    /// `(1 + increased / 100) * more` for the given names.
    ///
    /// Only [`ModType::Increase`] and [`ModType::More`] modifiers take part.
    pub fn effect_multiplier(
        &self,
        filter: Option<&ModFilter>,
        names: &[&str],
    ) -> Result<f64, ModError> {
        self.effect_multiplier_with(&EmptyScope, filter, names)
    }

    /// [`ModList::sum`] with tags evaluated against `scope`.
    pub fn sum_with(
        &self,
        scope: &dyn EvalScope,
        kind: ModType,
        filter: Option<&ModFilter>,
        names: &[&str],
    ) -> Result<f64, ModError> {
        check_names(names)?;
        let mut total = 0.0;
        for m in self.iter().filter(|m| selects(m, filter, names)) {
            if m.kind() != kind {
                continue;
            }
            if let Some(value) = m.evaluate_number(scope)? {
                total += value;
            }
        }
        Ok(total)
    }

    /// [`ModList::compound`] with tags evaluated against `scope`.
    pub fn compound_with(
        &self,
        scope: &dyn EvalScope,
        filter: Option<&ModFilter>,
        names: &[&str],
    ) -> Result<f64, ModError> {
        self.product(scope, None, filter, names)
    }

    /// [`ModList::flag`] with conditions evaluated against `scope`.
    pub fn flag_with(
        &self,
        scope: &dyn EvalScope,
        filter: Option<&ModFilter>,
        names: &[&str],
    ) -> Result<bool, ModError> {
        check_names(names)?;
        Ok(self
            .iter()
            .filter(|m| selects(m, filter, names))
            .any(|m| m.value().as_flag() == Some(true) && m.is_active(scope)))
    }

    /// [`ModList::list`] with conditions evaluated against `scope`.
    pub fn list_with(
        &self,
        scope: &dyn EvalScope,
        filter: Option<&ModFilter>,
        names: &[&str],
    ) -> Result<Vec<&ListPayload>, ModError> {
        check_names(names)?;
        Ok(self
            .iter()
            .filter(|m| selects(m, filter, names) && m.is_active(scope))
            .filter_map(|m| m.value().as_list())
            .collect())
    }

    /// [`ModList::effect_multiplier`] with tags evaluated against `scope`.
    pub fn effect_multiplier_with(
        &self,
        scope: &dyn EvalScope,
        filter: Option<&ModFilter>,
        names: &[&str],
    ) -> Result<f64, ModError> {
        let increased = self.sum_with(scope, ModType::Increase, filter, names)?;
        let more = self.product(scope, Some(ModType::More), filter, names)?;
        Ok((1.0 + increased / 100.0) * more)
    }

    fn product(
        &self,
        scope: &dyn EvalScope,
        kind: Option<ModType>,
        filter: Option<&ModFilter>,
        names: &[&str],
    ) -> Result<f64, ModError> {
        check_names(names)?;
        let mut result = 1.0;
        for m in self.iter().filter(|m| selects(m, filter, names)) {
            if kind.is_some_and(|k| k != m.kind()) {
                continue;
            }
            if let Some(value) = m.evaluate_number(scope)? {
                result *= 1.0 + value / 100.0;
            }
        }
        Ok(result)
    }
}

impl Extend<Modifier> for ModList<'_> {
    fn extend<T: IntoIterator<Item = Modifier>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}

impl FromIterator<Modifier> for ModList<'_> {
    fn from_iter<T: IntoIterator<Item = Modifier>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
            parent: None,
        }
    }
}

/// Iterator over a list's own entries followed by its parent chain.
pub struct Iter<'a> {
    entries: std::slice::Iter<'a, Modifier>,
    pending: Option<&'a ModList<'a>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Modifier;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(m) = self.entries.next() {
                return Some(m);
            }
            let list = self.pending.take()?;
            self.entries = list.entries.iter();
            self.pending = list.parent;
        }
    }
}

fn check_names(names: &[&str]) -> Result<(), ModError> {
    if names.is_empty() {
        return Err(ModError::EmptyNames);
    }
    Ok(())
}

fn selects(m: &Modifier, filter: Option<&ModFilter>, names: &[&str]) -> bool {
    names.iter().any(|n| m.name() == n) && filter::matches(filter, m)
}

fn round2(v: f64) -> f64 {
    (v * 100.0 + 0.5).floor() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::KeywordFlags;

    #[test]
    fn test_add_and_merge_preserve_order() {
        let mut a = ModList::new();
        a.add_mod(Modifier::list("Keystone", "A"));
        let mut b = ModList::new();
        b.add_mod(Modifier::list("Keystone", "B"));
        b.add_mod(Modifier::list("Keystone", "C"));
        a.merge(&b);

        let names: Vec<_> = a.list(None, &["Keystone"]).unwrap();
        assert_eq!(
            names,
            vec![
                &ListPayload::from("A"),
                &ListPayload::from("B"),
                &ListPayload::from("C")
            ]
        );
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn test_merge_ignores_other_parent() {
        let mut grandparent = ModList::new();
        grandparent.add_mod(Modifier::float("Life", ModType::Base, 100.0));
        let other = ModList::with_parent(&grandparent);

        let mut target = ModList::new();
        target.merge(&other);
        assert!(target.is_empty());
    }

    #[test]
    fn test_iter_walks_parent_chain() {
        let mut root = ModList::new();
        root.add_mod(Modifier::flag("Root", true));
        let mut middle = ModList::with_parent(&root);
        middle.add_mod(Modifier::flag("Middle", true));
        let mut leaf = ModList::with_parent(&middle);
        leaf.add_mod(Modifier::flag("Leaf", true));

        let names: Vec<&str> = leaf.iter().map(|m| m.name().as_str()).collect();
        assert_eq!(names, vec!["Leaf", "Middle", "Root"]);
    }

    #[test]
    fn test_empty_names_is_an_error() {
        let list = ModList::new();
        assert_eq!(list.sum(ModType::Base, None, &[]), Err(ModError::EmptyNames));
        assert_eq!(list.flag(None, &[]), Err(ModError::EmptyNames));
    }

    #[test]
    fn test_name_listed_twice_counts_once() {
        let mut list = ModList::new();
        list.add_mod(Modifier::float("Life", ModType::Base, 10.0));
        assert_eq!(list.sum(ModType::Base, None, &["Life", "Life"]).unwrap(), 10.0);
    }

    #[test]
    fn test_effect_multiplier_ignores_other_kinds() {
        let mut list = ModList::new();
        list.add_mod(Modifier::float("PassiveSkillEffect", ModType::Increase, 50.0));
        list.add_mod(Modifier::float("PassiveSkillEffect", ModType::More, 100.0));
        list.add_mod(Modifier::float("PassiveSkillEffect", ModType::Base, 999.0));
        assert_eq!(
            list.effect_multiplier(None, &["PassiveSkillEffect"]).unwrap(),
            3.0
        );
    }

    #[test]
    fn test_scale_add_mod() {
        let mut list = ModList::new();
        list.scale_add_mod(&Modifier::float("Str", ModType::Base, 10.0), 1.5);
        list.scale_add_mod(&Modifier::float("Str", ModType::Base, 7.0), 1.5);
        list.scale_add_mod(&Modifier::float("Regen", ModType::Base, 0.5), 1.5);
        list.scale_add_mod(&Modifier::flag("Onslaught", true), 1.5);
        list.scale_add_mod(&Modifier::float("Str", ModType::Base, 10.0), -2.0);

        let values: Vec<_> = list.entries().iter().map(|m| m.value().clone()).collect();
        assert_eq!(
            values,
            vec![
                ModValue::Number(15.0),
                ModValue::Number(10.0),
                ModValue::Number(0.75),
                ModValue::Flag(true),
                ModValue::Number(0.0),
            ]
        );
    }

    #[test]
    fn test_scale_add_keeps_classifiers() {
        let m = Modifier::float("Damage", ModType::Increase, 20.0)
            .with_keyword_flags(KeywordFlags::FIRE);
        let mut list = ModList::new();
        list.scale_add_mod(&m, 2.0);
        assert_eq!(list.entries()[0].keyword_flags(), KeywordFlags::FIRE);
        assert_eq!(list.entries()[0].value().as_number(), Some(40.0));
    }

    #[test]
    fn test_from_iterator() {
        let list: ModList = vec![
            Modifier::float("Life", ModType::Base, 1.0),
            Modifier::float("Life", ModType::Base, 2.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(list.sum(ModType::Base, None, &["Life"]).unwrap(), 3.0);
    }
}
