//! Modifier tags.
//!
//! Tags make a modifier depend on the state of the character being
//! calculated. A multiplier tag scales the modifier by named counters
//! ("per 10 Strength", "per Frenzy Charge"); a condition tag switches the
//! modifier on or off ("while on Full Life"). Both look their variables
//! up through an [`EvalScope`], usually a [`ModStore`](crate::store::ModStore).

use crate::error::ModError;
use crate::mod_name::ModName;
use serde::{Deserialize, Serialize};

/// Named state that tags are evaluated against.
///
/// Missing multipliers count as zero and missing conditions as false.
pub trait EvalScope {
    /// Value of a named multiplier variable.
    fn multiplier(&self, name: &str) -> f64;

    /// Value of a named condition.
    fn condition(&self, name: &str) -> bool;
}

/// A scope with no multipliers and no conditions set.
///
/// Used by plain [`ModList`](crate::mod_list::ModList) queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyScope;

impl EvalScope for EmptyScope {
    fn multiplier(&self, _name: &str) -> f64 {
        0.0
    }

    fn condition(&self, _name: &str) -> bool {
        false
    }
}

/// Scales a modifier by the sum of named multiplier variables.
///
/// The result is `value * sum(variables) / division`. With a `limit` the
/// number of instances `sum / division` is capped, so the result never
/// exceeds `value * limit` for non-negative values.
///
/// # Examples
///
/// ```rust
/// use zzmod::{ModName, ModStore, MultiplierTag};
///
/// let mut store = ModStore::new();
/// store.multipliers.insert("FullLife".to_string(), 200.0);
///
/// let name = ModName::from_str("Damage");
/// let tag = MultiplierTag::new("FullLife").with_division(5.0);
/// assert_eq!(tag.apply(&name, 10.0, &store).unwrap(), 400.0);
///
/// let capped = tag.with_limit(15.0);
/// assert_eq!(capped.apply(&name, 10.0, &store).unwrap(), 150.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiplierTag {
    /// Divisor applied to the summed variables.
    pub division: f64,
    /// Multiplier variables that are summed.
    pub variables: Vec<String>,
    /// Maximum number of instances.
    pub limit: Option<f64>,
    /// Variable the limit was read from. Kept for breakdown display only.
    pub limit_variable: Option<String>,
}

impl MultiplierTag {
    /// Create a tag scaling by a single variable with a division of 1.
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            division: 1.0,
            variables: vec![variable.into()],
            limit: None,
            limit_variable: None,
        }
    }

    /// Add another variable to the summed set.
    pub fn with_variable(mut self, variable: impl Into<String>) -> Self {
        self.variables.push(variable.into());
        self
    }

    /// Set the divisor applied to the summed variables ("per 10 Strength"
    /// has a division of 10).
    pub fn with_division(mut self, division: f64) -> Self {
        self.division = division;
        self
    }

    /// Cap the number of instances.
    pub fn with_limit(mut self, limit: f64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Record which variable the limit was read from.
    pub fn with_limit_variable(mut self, variable: impl Into<String>) -> Self {
        self.limit_variable = Some(variable.into());
        self
    }

    /// Scale `value` by this tag.
    ///
    /// `name` only identifies the modifier in the error.
    ///
    /// # Errors
    ///
    /// Returns [`ModError::ZeroDivision`] when `division` is zero, and
    /// [`ModError::NonFinite`] when `division`, the summed variables or the
    /// result is NaN or infinite.
    pub fn apply(
        &self,
        name: &ModName,
        value: f64,
        scope: &dyn EvalScope,
    ) -> Result<f64, ModError> {
        if self.division == 0.0 {
            return Err(ModError::ZeroDivision { name: name.clone() });
        }
        if !self.division.is_finite() {
            return Err(ModError::NonFinite { name: name.clone() });
        }

        let total: f64 = self.variables.iter().map(|v| scope.multiplier(v)).sum();
        // f64::min would let a NaN total slip past the limit
        if !total.is_finite() {
            return Err(ModError::NonFinite { name: name.clone() });
        }
        let mut instances = total / self.division;
        if let Some(limit) = self.limit {
            instances = instances.min(limit);
        }

        let scaled = value * instances;
        if !scaled.is_finite() {
            return Err(ModError::NonFinite { name: name.clone() });
        }
        Ok(scaled)
    }
}

/// Enables a modifier only while a named condition holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionTag {
    pub variable: String,
    /// Invert the condition.
    pub neg: bool,
}

impl ConditionTag {
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            neg: false,
        }
    }

    /// Create a tag that holds while the condition is *not* set.
    pub fn not(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            neg: true,
        }
    }

    /// Whether the condition, after negation, is met in `scope`.
    pub fn holds(&self, scope: &dyn EvalScope) -> bool {
        scope.condition(&self.variable) != self.neg
    }
}

/// A semantic tag attached to a modifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Tag {
    Multiplier(MultiplierTag),
    Condition(ConditionTag),
}

impl From<MultiplierTag> for Tag {
    fn from(tag: MultiplierTag) -> Self {
        Tag::Multiplier(tag)
    }
}

impl From<ConditionTag> for Tag {
    fn from(tag: ConditionTag) -> Self {
        Tag::Condition(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Vars(HashMap<&'static str, f64>);

    impl EvalScope for Vars {
        fn multiplier(&self, name: &str) -> f64 {
            self.0.get(name).copied().unwrap_or(0.0)
        }

        fn condition(&self, name: &str) -> bool {
            self.0.get(name).is_some_and(|v| *v != 0.0)
        }
    }

    fn name() -> ModName {
        ModName::from_str("testMod0")
    }

    #[test]
    fn test_multiplier_unlimited() {
        let scope = Vars(HashMap::from([("FullLife", 200.0)]));
        let tag = MultiplierTag::new("FullLife").with_division(5.0);
        assert_eq!(tag.apply(&name(), 10.0, &scope).unwrap(), 400.0);
    }

    #[test]
    fn test_multiplier_limit_scales_with_base_value() {
        let scope = Vars(HashMap::from([("FullLife", 200.0)]));
        let tag = MultiplierTag::new("FullLife")
            .with_division(5.0)
            .with_limit(15.0)
            .with_limit_variable("FullLife");
        assert_eq!(tag.apply(&name(), 10.0, &scope).unwrap(), 150.0);
    }

    #[test]
    fn test_limit_variable_does_not_change_result() {
        let scope = Vars(HashMap::from([("FullLife", 200.0), ("Other", 3.0)]));
        let plain = MultiplierTag::new("FullLife").with_division(5.0).with_limit(15.0);
        let recorded = plain.clone().with_limit_variable("Other");
        assert_eq!(
            plain.apply(&name(), 10.0, &scope).unwrap(),
            recorded.apply(&name(), 10.0, &scope).unwrap()
        );
    }

    #[test]
    fn test_multiplier_sums_variables_and_ignores_missing() {
        let scope = Vars(HashMap::from([("FrenzyCharge", 3.0), ("PowerCharge", 2.0)]));
        let tag = MultiplierTag::new("FrenzyCharge")
            .with_variable("PowerCharge")
            .with_variable("EnduranceCharge");
        assert_eq!(tag.apply(&name(), 4.0, &scope).unwrap(), 20.0);
    }

    #[test]
    fn test_multiplier_zero_division() {
        let tag = MultiplierTag::new("FullLife").with_division(0.0);
        let result = tag.apply(&name(), 10.0, &EmptyScope);
        assert_eq!(result, Err(ModError::ZeroDivision { name: name() }));
    }

    #[test]
    fn test_multiplier_nan_division() {
        let scope = Vars(HashMap::from([("FullLife", 200.0)]));
        let tag = MultiplierTag::new("FullLife").with_division(f64::NAN);
        let result = tag.apply(&name(), 10.0, &scope);
        assert_eq!(result, Err(ModError::NonFinite { name: name() }));
    }

    #[test]
    fn test_multiplier_infinite_variable() {
        let scope = Vars(HashMap::from([("FullLife", f64::INFINITY)]));
        let tag = MultiplierTag::new("FullLife");
        let result = tag.apply(&name(), 10.0, &scope);
        assert_eq!(result, Err(ModError::NonFinite { name: name() }));
    }

    #[test]
    fn test_multiplier_nan_variable_with_limit() {
        let scope = Vars(HashMap::from([("FullLife", f64::NAN)]));
        let tag = MultiplierTag::new("FullLife").with_limit(15.0);
        let result = tag.apply(&name(), 10.0, &scope);
        assert_eq!(result, Err(ModError::NonFinite { name: name() }));
    }

    #[test]
    fn test_multiplier_subnormal_division_overflows() {
        let scope = Vars(HashMap::from([("FullLife", 200.0)]));
        let tag = MultiplierTag::new("FullLife").with_division(f64::MIN_POSITIVE / 1e10);
        let result = tag.apply(&name(), 10.0, &scope);
        assert_eq!(result, Err(ModError::NonFinite { name: name() }));
    }

    #[test]
    fn test_multiplier_limit_caps_instances_for_negative_values() {
        // the cap bounds the instance count, so a negative value is
        // capped at value * limit rather than floored there
        let scope = Vars(HashMap::from([("FullLife", 200.0)]));
        let tag = MultiplierTag::new("FullLife")
            .with_division(5.0)
            .with_limit(15.0);
        assert_eq!(tag.apply(&name(), -10.0, &scope).unwrap(), -150.0);
    }

    #[test]
    fn test_condition_tag() {
        let scope = Vars(HashMap::from([("FullLife", 1.0)]));
        assert!(ConditionTag::new("FullLife").holds(&scope));
        assert!(!ConditionTag::not("FullLife").holds(&scope));
        assert!(!ConditionTag::new("LowLife").holds(&scope));
        assert!(ConditionTag::not("LowLife").holds(&scope));
    }
}
