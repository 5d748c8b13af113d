//! Modifier values.
//!
//! A modifier carries exactly one payload: a number, a boolean flag, or
//! a list entry. List entries are a closed set of shapes produced by the
//! stat parser.

use crate::modifier::Modifier;
use serde::{Deserialize, Serialize};

/// A skill granted or supported by a list modifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGrant {
    /// Display name of the skill. `"Unknown"` marks grants the parser
    /// could not identify.
    pub name: String,
    /// Game identifier of the skill gem.
    pub skill_id: String,
    /// Gem level.
    pub level: u32,
}

/// Payload of a list-valued modifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ListPayload {
    /// Plain text entry, e.g. a keystone name.
    Text(String),
    /// A skill granted outright.
    ExtraSkill(SkillGrant),
    /// A support gem applied to linked skills.
    ExtraSupport(SkillGrant),
    /// A wrapped modifier, e.g. the replacement effect of a node.
    Mod(Box<Modifier>),
}

impl From<&str> for ListPayload {
    fn from(s: &str) -> Self {
        ListPayload::Text(s.to_string())
    }
}

impl From<String> for ListPayload {
    fn from(s: String) -> Self {
        ListPayload::Text(s)
    }
}

/// The value of a modifier.
///
/// # Examples
///
/// ```rust
/// use zzmod::ModValue;
///
/// let mut value = ModValue::Number(10.0);
/// assert_eq!(value.as_number(), Some(10.0));
/// assert_eq!(value.as_flag(), None);
///
/// value.set_flag(true);
/// assert_eq!(value.as_flag(), Some(true));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModValue {
    Number(f64),
    Flag(bool),
    List(ListPayload),
}

impl ModValue {
    /// Numeric payload, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ModValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Boolean payload, if this is a flag.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ModValue::Flag(v) => Some(*v),
            _ => None,
        }
    }

    /// List payload, if this is a list entry.
    pub fn as_list(&self) -> Option<&ListPayload> {
        match self {
            ModValue::List(v) => Some(v),
            _ => None,
        }
    }

    /// Replace the value with a number, whatever it held before.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use zzmod::ModValue;
    ///
    /// let mut value = ModValue::Flag(true);
    /// value.set_number(12.5);
    /// assert_eq!(value.as_number(), Some(12.5));
    /// assert_eq!(value.as_flag(), None);
    /// ```
    pub fn set_number(&mut self, v: f64) {
        *self = ModValue::Number(v);
    }

    /// Replace the value with a flag.
    pub fn set_flag(&mut self, v: bool) {
        *self = ModValue::Flag(v);
    }

    pub fn set_list(&mut self, v: ListPayload) {
        *self = ModValue::List(v);
    }
}
