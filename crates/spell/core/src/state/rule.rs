//! Per-spell requirement rules.

use std::collections::HashMap;
use std::fmt;

use crate::requirements::{HookContext, RequirementContext};

/// Predicate deciding whether a single requirement is met.
pub type Predicate = Box<dyn Fn(&RequirementContext<'_>) -> bool + Send + Sync>;

/// Side effect fired after a requirement is evaluated.
pub type Hook = Box<dyn Fn(&mut HookContext<'_>) + Send + Sync>;

/// Named requirement predicate.
pub struct Requirement {
    name: String,
    predicate: Predicate,
}

impl Requirement {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_met(&self, ctx: &RequirementContext<'_>) -> bool {
        (self.predicate)(ctx)
    }
}

/// Requirements and hooks for one spell on one entity.
///
/// Requirements keep insertion order. Hooks are looked up by requirement
/// name; a requirement without hooks simply gates the cast.
#[derive(Default)]
pub struct SpellRule {
    requirements: Vec<Requirement>,
    success_actions: HashMap<String, Hook>,
    failure_actions: HashMap<String, Hook>,
}

impl SpellRule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a requirement. Re-using a name replaces the predicate but keeps
    /// the requirement at its original position.
    #[must_use]
    pub fn require<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&RequirementContext<'_>) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        let predicate: Predicate = Box::new(predicate);
        match self.requirements.iter_mut().find(|r| r.name == name) {
            Some(existing) => existing.predicate = predicate,
            None => self.requirements.push(Requirement { name, predicate }),
        }
        self
    }

    /// Registers the hook fired when requirement `name` is met.
    #[must_use]
    pub fn on_success<F>(mut self, name: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&mut HookContext<'_>) + Send + Sync + 'static,
    {
        self.success_actions.insert(name.into(), Box::new(hook));
        self
    }

    /// Registers the hook fired when requirement `name` is not met.
    #[must_use]
    pub fn on_failure<F>(mut self, name: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&mut HookContext<'_>) + Send + Sync + 'static,
    {
        self.failure_actions.insert(name.into(), Box::new(hook));
        self
    }

    pub fn requirements(&self) -> impl Iterator<Item = &Requirement> {
        self.requirements.iter()
    }

    pub fn requirement_names(&self) -> impl Iterator<Item = &str> {
        self.requirements.iter().map(|r| r.name.as_str())
    }

    pub fn success_action(&self, name: &str) -> Option<&Hook> {
        self.success_actions.get(name)
    }

    pub fn failure_action(&self, name: &str) -> Option<&Hook> {
        self.failure_actions.get(name)
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}

impl fmt::Debug for SpellRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut success: Vec<_> = self.success_actions.keys().collect();
        let mut failure: Vec<_> = self.failure_actions.keys().collect();
        success.sort();
        failure.sort();

        f.debug_struct("SpellRule")
            .field("requirements", &self.requirement_names().collect::<Vec<_>>())
            .field("success_actions", &success)
            .field("failure_actions", &failure)
            .finish()
    }
}
