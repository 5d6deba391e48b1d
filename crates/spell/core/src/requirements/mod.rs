//! Requirement evaluation for spell casts.
//!
//! Given an entity key, a spell kind and the active section name, the
//! evaluator walks the author's world state to find the matching
//! [`SpellRule`](crate::state::SpellRule) and runs its requirements:
//!
//! 1. **Lookup**: section → `entities` → entity → spell bucket. The first absent
//!    layer produces [`Verdict::Unconfigured`] and one warning.
//! 2. **Predicates**: run in insertion order against a [`RequirementContext`].
//! 3. **Hooks**: the success or failure hook of each evaluated requirement
//!    fires with a [`HookContext`] before the next requirement runs.
//! 4. **Short-circuit**: the first unmet requirement yields [`Verdict::Denied`].
//!
//! Nothing here returns an error. Missing configuration and unmet
//! requirements are ordinary verdicts; the caller's [`MissingConfigPolicy`]
//! decides whether an unconfigured entity may be cast on.
//!
//! [`MissingConfigPolicy`]: crate::config::MissingConfigPolicy

mod context;
mod evaluator;
mod lookup;

pub use context::{HookContext, RequirementContext};
pub use evaluator::{RequirementEvaluator, Verdict};
pub use lookup::{MissingConfig, RuleLookup, lookup_rule};
