//! World-state section naming.
//!
//! Level authors key their world-state sections as `"inside" + Name`, where
//! `Name` is the current map (or the level, when the map is the default one)
//! converted from snake_case to PascalCase.

use crate::world::Location;

/// Map name reported when a level consists of a single map.
pub const DEFAULT_MAP_NAME: &str = "default";

/// Prefix shared by every world-state section name.
pub const SECTION_PREFIX: &str = "inside";

/// Resolves the world-state section for the player's current location.
///
/// Pure function of the world's level and map names, so it is computed once
/// per event.
pub fn resolve_state_section_name(world: &(impl Location + ?Sized)) -> String {
    let map_name = world.current_map_name();
    let source = if map_name == DEFAULT_MAP_NAME {
        world.current_level_name()
    } else {
        map_name
    };

    let formatted = format_section_name(source);
    if formatted.contains(SECTION_PREFIX) {
        formatted
    } else {
        format!("{SECTION_PREFIX}{formatted}")
    }
}

/// Formats a raw Tiled level/map name into its section-name form.
///
/// The first character is upper-cased unless it is followed by `"nside"`
/// (so `inside_crypt` keeps its lowercase prefix). Every underscore followed
/// by a character is removed and that character is upper-cased. A trailing
/// underscore is kept.
pub fn format_section_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars();

    if let Some(first) = chars.next() {
        let rest = chars.as_str();
        if rest.starts_with("nside") {
            out.push(first);
        } else {
            out.extend(first.to_uppercase());
        }
    }

    while let Some(c) = chars.next() {
        if c != '_' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next) => out.extend(next.to_uppercase()),
            None => out.push('_'),
        }
    }

    out
}
