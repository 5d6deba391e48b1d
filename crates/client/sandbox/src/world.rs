//! In-memory world that logs every primitive the runtime calls.
use std::collections::{BTreeSet, HashSet};

use tracing::info;

use spell_core::{Location, ObjectError, Target, World};

pub struct SandboxWorld {
    level: String,
    map: String,
    movement_enabled: bool,
    tool: Option<String>,
    objects: HashSet<String>,
    locked_objects: HashSet<String>,
    locked_transitions: HashSet<String>,
    destroyed: BTreeSet<String>,
    unlocked: BTreeSet<String>,
}

impl SandboxWorld {
    /// Places every target's entity in the world, with anything it unlocks locked.
    pub fn new(level: &str, map: &str, targets: &[Target]) -> Self {
        let mut world = Self {
            level: level.to_string(),
            map: map.to_string(),
            movement_enabled: true,
            tool: None,
            objects: HashSet::new(),
            locked_objects: HashSet::new(),
            locked_transitions: HashSet::new(),
            destroyed: BTreeSet::new(),
            unlocked: BTreeSet::new(),
        };

        for target in targets {
            world.objects.insert(target.entity_key().to_string());
            if let Some(object) = target.object_to_unlock() {
                world.objects.insert(object.to_string());
                world.locked_objects.insert(object.to_string());
            }
            if let Some(transition) = target.transition_to_unlock() {
                world.locked_transitions.insert(transition.to_string());
            }
        }

        world
    }

    pub fn destroyed(&self) -> &BTreeSet<String> {
        &self.destroyed
    }

    pub fn unlocked(&self) -> &BTreeSet<String> {
        &self.unlocked
    }

    fn require_object(&self, key: &str) -> Result<(), ObjectError> {
        if self.objects.contains(key) {
            Ok(())
        } else {
            Err(ObjectError::NotFound(key.to_string()))
        }
    }
}

impl Location for SandboxWorld {
    fn current_level_name(&self) -> &str {
        &self.level
    }

    fn current_map_name(&self) -> &str {
        &self.map
    }
}

impl World for SandboxWorld {
    fn disable_player_movement(&mut self) {
        self.movement_enabled = false;
        info!(target: "sandbox::world", "player movement disabled");
    }

    fn enable_player_movement(&mut self) {
        self.movement_enabled = true;
        info!(target: "sandbox::world", "player movement enabled");
    }

    fn use_tool(&mut self, name: &str) {
        self.tool = Some(name.to_string());
        info!(target: "sandbox::world", tool = name, "tool raised");
    }

    fn stop_using_tool(&mut self) {
        if let Some(tool) = self.tool.take() {
            info!(target: "sandbox::world", tool = %tool, "tool lowered");
        }
    }

    fn destroy_object(&mut self, key: &str) -> Result<(), ObjectError> {
        self.require_object(key)?;
        self.objects.remove(key);
        self.destroyed.insert(key.to_string());
        info!(target: "sandbox::world", key, "object destroyed");
        Ok(())
    }

    fn unlock_object(&mut self, key: &str) -> Result<(), ObjectError> {
        self.require_object(key)?;
        self.locked_objects.remove(key);
        self.unlocked.insert(key.to_string());
        info!(target: "sandbox::world", key, "object unlocked");
        Ok(())
    }

    fn unlock_transition(&mut self, key: &str) -> Result<(), ObjectError> {
        if !self.locked_transitions.remove(key) {
            return Err(ObjectError::TransitionNotFound(key.to_string()));
        }
        self.unlocked.insert(key.to_string());
        info!(target: "sandbox::world", key, "transition unlocked");
        Ok(())
    }

    fn open_door(&mut self, key: &str) -> Result<(), ObjectError> {
        self.require_object(key)?;
        self.unlocked.insert(key.to_string());
        info!(target: "sandbox::world", key, "door opened");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spell_core::SpellKind;

    fn garden() -> SandboxWorld {
        let vines = Target::new("vine_1")
            .with_group("vines")
            .spellable(SpellKind::Disappear)
            .unlocks_object("garden_gate")
            .unlocks_transition("to_orchard");
        SandboxWorld::new("overgrown_garden", "default", &[vines])
    }

    #[test]
    fn places_group_and_unlockables() {
        let mut world = garden();
        assert!(world.destroy_object("vines").is_ok());
        assert!(world.unlock_object("garden_gate").is_ok());
        assert!(world.unlock_transition("to_orchard").is_ok());
        assert!(world.destroyed().contains("vines"));
    }

    #[test]
    fn missing_objects_report_errors() {
        let mut world = garden();
        assert_eq!(
            world.destroy_object("vine_1"),
            Err(ObjectError::NotFound("vine_1".into()))
        );
        assert!(world.unlock_transition("to_orchard").is_ok());
        assert_eq!(
            world.unlock_transition("to_orchard"),
            Err(ObjectError::TransitionNotFound("to_orchard".into()))
        );
    }
}
