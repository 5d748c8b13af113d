//! Classifier bitmasks and provenance tags for modifiers.
//!
//! `ModFlags` describe what kind of damage or action a modifier applies
//! to (attack, spell, projectile, weapon class). `KeywordFlags` describe
//! skill keywords (fire, cold, minion, curse). An empty mask on a modifier
//! means it is unconstrained and applies everywhere.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Capability flags of a modifier.
    ///
    /// A query filter matches a modifier when the modifier's flags are
    /// empty or share at least one bit with the filter's flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ModFlags: u32 {
        const ATTACK       = 1 << 0;
        const SPELL        = 1 << 1;
        const HIT          = 1 << 2;
        const DOT          = 1 << 3;
        const CAST         = 1 << 4;
        const MELEE        = 1 << 8;
        const AREA         = 1 << 9;
        const PROJECTILE   = 1 << 10;
        const AILMENT      = 1 << 11;
        const MELEE_HIT    = 1 << 12;
        const WEAPON       = 1 << 13;
        const AXE          = 1 << 16;
        const BOW          = 1 << 17;
        const CLAW         = 1 << 18;
        const DAGGER       = 1 << 19;
        const MACE         = 1 << 20;
        const STAFF        = 1 << 21;
        const SWORD        = 1 << 22;
        const WAND         = 1 << 23;
        const UNARMED      = 1 << 24;
        const WEAPON_1H    = 1 << 28;
        const WEAPON_2H    = 1 << 29;
    }
}

bitflags! {
    /// Keyword flags of a modifier.
    ///
    /// Matched with the same rule as [`ModFlags`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct KeywordFlags: u32 {
        const AURA          = 1 << 0;
        const CURSE         = 1 << 1;
        const WARCRY        = 1 << 2;
        const MOVEMENT      = 1 << 3;
        const PHYSICAL      = 1 << 4;
        const FIRE          = 1 << 5;
        const COLD          = 1 << 6;
        const LIGHTNING     = 1 << 7;
        const CHAOS         = 1 << 8;
        const VAAL          = 1 << 9;
        const BOW           = 1 << 10;
        const ARROW         = 1 << 11;
        const TRAP          = 1 << 12;
        const MINE          = 1 << 13;
        const TOTEM         = 1 << 14;
        const MINION        = 1 << 15;
        const ATTACK        = 1 << 16;
        const SPELL         = 1 << 17;
        const HIT           = 1 << 18;
        const AILMENT       = 1 << 19;
        const BRAND         = 1 << 20;
        const POISON        = 1 << 21;
        const BLEED         = 1 << 22;
        const IGNITE        = 1 << 23;
    }
}

/// Where a modifier came from.
///
/// Unlike the bitmasks, a source filter only matches modifiers with the
/// exact same source (or modifiers with no source at all).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModSource {
    Base,
    Tree,
    Item,
    Skill,
    Config,
    Shock,
    Scorch,
    Brittle,
    Sap,
    Chill,
}

impl std::fmt::Display for ModSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ModSource::Base => "Base",
            ModSource::Tree => "Tree",
            ModSource::Item => "Item",
            ModSource::Skill => "Skill",
            ModSource::Config => "Config",
            ModSource::Shock => "Shock",
            ModSource::Scorch => "Scorch",
            ModSource::Brittle => "Brittle",
            ModSource::Sap => "Sap",
            ModSource::Chill => "Chill",
        };
        f.write_str(s)
    }
}
