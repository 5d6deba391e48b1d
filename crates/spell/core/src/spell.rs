//! Closed set of spell kinds.
//!
//! The kind selects which effect behavior runs once every requirement passes.
//! Parsing happens when a target is constructed, so the dispatcher only ever
//! sees variants it can match exhaustively.

/// Spell type carried by a spellable target.
///
/// String forms follow the Tiled property values used by level authors
/// (`"disappear"`, `"move"`, `"unlock"`).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[strum(serialize_all = "snake_case")]
pub enum SpellKind {
    /// Plays a vanish animation, destroys the target and optionally unlocks
    /// another object and/or a transition.
    Disappear,
    /// Reserved for relocating the target. Currently performs no world mutation.
    Move,
    /// Opens the target door immediately and returns control after a delay.
    Unlock,
}
