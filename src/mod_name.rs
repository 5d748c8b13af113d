//! Modifier name module.
//!
//! Provides the `ModName` type, the query key of every modifier.
//! Uses `Arc<str>` so the thousands of modifiers produced for a passive
//! tree share allocations when cloned between node lists.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;

/// Shared string name of a modifier.
///
/// # Examples
///
/// ```rust
/// use zzmod::ModName;
///
/// let life = ModName::from_str("Life");
/// let life2: ModName = "Life".into();
/// let life3: ModName = String::from("Life").into();
///
/// assert_eq!(life, life2);
/// assert_eq!(life, life3);
/// assert_eq!(life, "Life");
/// ```
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ModName(Arc<str>);

impl Serialize for ModName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.as_ref().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ModName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(ModName::from(s))
    }
}

impl ModName {
    /// Create a new `ModName` from a string slice.
    pub fn from_str(s: &str) -> Self {
        Self(Arc::from(s))
    }

    /// Get the string representation of this name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModName {
    fn from(s: &str) -> Self {
        Self::from_str(s)
    }
}

impl From<String> for ModName {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl PartialEq<str> for ModName {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for ModName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl std::fmt::Display for ModName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mod_name_creation() {
        let a = ModName::from_str("Life");
        let b = ModName::from_str("Life");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "Life");
    }

    #[test]
    fn test_mod_name_str_comparison() {
        let name: ModName = "Damage".into();
        assert!(name == "Damage");
        assert!(name != "Life");
    }

    #[test]
    fn test_mod_name_serde() {
        let name = ModName::from_str("CritChance");
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"CritChance\"");
        let back: ModName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
    }
}
