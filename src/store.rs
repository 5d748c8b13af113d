//! Modifier store module.
//!
//! A `ModStore` is a [`ModList`] together with the named state that
//! tagged modifiers depend on: boolean conditions ("FullLife",
//! "UsingFlask") and numeric multipliers ("FrenzyCharge", "Strength").
//! Upstream calculation code fills both tables; queries on the store
//! resolve tags against them.

use crate::error::ModError;
use crate::filter::ModFilter;
use crate::mod_list::ModList;
use crate::modifier::{ModType, Modifier};
use crate::tag::{EvalScope, MultiplierTag};
use crate::value::{ListPayload, ModValue};
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

/// A modifier list with conditions and multipliers.
///
/// Dereferences to its [`ModList`], so list operations such as
/// [`ModList::add_mod`] are available directly. The query methods are
/// shadowed by versions that evaluate tags against the store's tables.
///
/// # Examples
///
/// ```rust
/// use zzmod::{ConditionTag, ModStore, ModType, Modifier, MultiplierTag};
///
/// let mut store = ModStore::new();
/// store.add_mod(
///     Modifier::float("Damage", ModType::Increase, 4.0)
///         .with_tag(MultiplierTag::new("FrenzyCharge")),
/// );
/// store.add_mod(
///     Modifier::float("Damage", ModType::Increase, 20.0)
///         .with_tag(ConditionTag::new("FullLife")),
/// );
///
/// store.multipliers.insert("FrenzyCharge".to_string(), 3.0);
/// assert_eq!(store.sum(ModType::Increase, None, &["Damage"]).unwrap(), 12.0);
///
/// store.conditions.insert("FullLife".to_string(), true);
/// assert_eq!(store.sum(ModType::Increase, None, &["Damage"]).unwrap(), 32.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModStore<'p> {
    list: ModList<'p>,
    /// Named boolean conditions.
    pub conditions: HashMap<String, bool>,
    /// Named multiplier variables.
    pub multipliers: HashMap<String, f64>,
}

impl<'p> ModStore<'p> {
    /// Create an empty store without a parent list.
    pub fn new() -> Self {
        Self::from_list(ModList::new())
    }

    /// Create an empty store reading through `parent`.
    pub fn with_parent(parent: &'p ModList<'p>) -> Self {
        Self::from_list(ModList::with_parent(parent))
    }

    /// Wrap an existing list with empty tables.
    pub fn from_list(list: ModList<'p>) -> Self {
        Self {
            list,
            conditions: HashMap::new(),
            multipliers: HashMap::new(),
        }
    }

    pub fn mod_list(&self) -> &ModList<'p> {
        &self.list
    }

    pub fn into_list(self) -> ModList<'p> {
        self.list
    }

    pub fn set_condition(&mut self, name: impl Into<String>, value: bool) {
        self.conditions.insert(name.into(), value);
    }

    pub fn set_multiplier(&mut self, name: impl Into<String>, value: f64) {
        self.multipliers.insert(name.into(), value);
    }

    /// Evaluate a multiplier tag against `m`'s numeric value.
    ///
    /// Non-numeric values are returned unchanged.
    ///
    /// # Errors
    ///
    /// [`ModError::ZeroDivision`] when the tag divides by zero, and
    /// [`ModError::NonFinite`] when the scaled value is not finite.
    pub fn eval_multiplier(&self, m: &Modifier, tag: &MultiplierTag) -> Result<ModValue, ModError> {
        match m.value() {
            ModValue::Number(v) => Ok(ModValue::Number(tag.apply(m.name(), *v, self)?)),
            other => Ok(other.clone()),
        }
    }

    /// See [`ModList::sum`].
    pub fn sum(
        &self,
        kind: ModType,
        filter: Option<&ModFilter>,
        names: &[&str],
    ) -> Result<f64, ModError> {
        self.list.sum_with(self, kind, filter, names)
    }

    /// See [`ModList::compound`].
    pub fn compound(&self, filter: Option<&ModFilter>, names: &[&str]) -> Result<f64, ModError> {
        self.list.compound_with(self, filter, names)
    }

    /// See [`ModList::flag`].
    pub fn flag(&self, filter: Option<&ModFilter>, names: &[&str]) -> Result<bool, ModError> {
        self.list.flag_with(self, filter, names)
    }

    /// See [`ModList::list`].
    pub fn list(
        &self,
        filter: Option<&ModFilter>,
        names: &[&str],
    ) -> Result<Vec<&ListPayload>, ModError> {
        self.list.list_with(self, filter, names)
    }

    /// See [`ModList::effect_multiplier`].
    pub fn effect_multiplier(
        &self,
        filter: Option<&ModFilter>,
        names: &[&str],
    ) -> Result<f64, ModError> {
        self.list.effect_multiplier_with(self, filter, names)
    }
}

impl EvalScope for ModStore<'_> {
    fn multiplier(&self, name: &str) -> f64 {
        self.multipliers.get(name).copied().unwrap_or(0.0)
    }

    fn condition(&self, name: &str) -> bool {
        self.conditions.get(name).copied().unwrap_or(false)
    }
}

impl<'p> Deref for ModStore<'p> {
    type Target = ModList<'p>;

    fn deref(&self) -> &Self::Target {
        &self.list
    }
}

impl DerefMut for ModStore<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone() {
        let mut store = ModStore::new();
        store.set_condition("test condition", true);
        store.set_multiplier("test multiplier", 42.0);
        store.add_mod(Modifier::float("Life", ModType::Base, 10.0));

        let copy = store.clone();
        assert_eq!(store, copy);
    }

    #[test]
    fn test_clone_tables_are_independent() {
        let mut store = ModStore::new();
        store.set_condition("FullLife", true);
        store.set_multiplier("FrenzyCharge", 2.0);

        let mut copy = store.clone();
        copy.set_condition("FullLife", false);
        copy.set_multiplier("FrenzyCharge", 5.0);
        copy.set_multiplier("PowerCharge", 1.0);

        assert_eq!(store.conditions.get("FullLife"), Some(&true));
        assert_eq!(store.multipliers.get("FrenzyCharge"), Some(&2.0));
        assert!(!store.multipliers.contains_key("PowerCharge"));
    }

    #[test]
    fn test_clone_shares_parent() {
        let mut parent = ModList::new();
        parent.add_mod(Modifier::float("Life", ModType::Base, 10.0));
        let store = ModStore::with_parent(&parent);
        let copy = store.clone();

        let (Some(a), Some(b)) = (store.parent(), copy.parent()) else {
            panic!("parent lost on clone");
        };
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_eval_multiplier() {
        let mut store = ModStore::new();
        store.set_multiplier("FullLife", 200.0);
        let m = Modifier::float("testMod0", ModType::Increase, 10.0);

        let tag = MultiplierTag::new("FullLife").with_division(5.0);
        assert_eq!(store.eval_multiplier(&m, &tag).unwrap(), ModValue::Number(400.0));

        let limited = tag.with_limit(15.0).with_limit_variable("FullLife");
        assert_eq!(
            store.eval_multiplier(&m, &limited).unwrap(),
            ModValue::Number(150.0)
        );
    }

    #[test]
    fn test_store_reads_parent_entries() {
        let mut parent = ModList::new();
        parent.add_mod(
            Modifier::float("Damage", ModType::More, 10.0)
                .with_tag(MultiplierTag::new("PowerCharge")),
        );
        let mut store = ModStore::with_parent(&parent);
        store.set_multiplier("PowerCharge", 2.0);

        assert_eq!(store.compound(None, &["Damage"]).unwrap(), 1.2);
    }

    #[test]
    fn test_zero_division_aborts_query() {
        let mut store = ModStore::new();
        store.add_mod(
            Modifier::float("Damage", ModType::Base, 10.0)
                .with_tag(MultiplierTag::new("Strength").with_division(0.0)),
        );
        store.set_multiplier("Strength", 100.0);

        assert!(matches!(
            store.sum(ModType::Base, None, &["Damage"]),
            Err(ModError::ZeroDivision { .. })
        ));
    }

    #[test]
    fn test_nan_division_aborts_query() {
        let mut store = ModStore::new();
        store.add_mod(
            Modifier::float("Damage", ModType::Increase, 10.0)
                .with_tag(MultiplierTag::new("FullLife").with_division(f64::NAN)),
        );
        store.set_multiplier("FullLife", 200.0);

        assert!(matches!(
            store.sum(ModType::Increase, None, &["Damage"]),
            Err(ModError::NonFinite { .. })
        ));
    }
}
