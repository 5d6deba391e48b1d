//! Ordered requirement evaluation with per-requirement hooks.

use tracing::{debug, warn};

use crate::config::MissingConfigPolicy;
use crate::error::SpellError;
use crate::spell::SpellKind;
use crate::state::WorldState;
use crate::target::SpellEvent;
use crate::world::World;

use super::context::{HookContext, RequirementContext};
use super::lookup::{MissingConfig, RuleLookup, lookup_rule};

/// Outcome of evaluating one entity/spell pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Every requirement was met.
    Approved,
    /// Evaluation stopped at the named requirement.
    Denied { requirement: String },
    /// Some configuration layer is absent; see [`MissingConfigPolicy`].
    Unconfigured(MissingConfig),
}

impl Verdict {
    /// Collapses the verdict to "may the cast proceed".
    pub fn allows_cast(&self, policy: MissingConfigPolicy) -> bool {
        match self {
            Self::Approved => true,
            Self::Denied { .. } => false,
            Self::Unconfigured(_) => policy.allows_cast(),
        }
    }
}

/// Evaluates spell requirements against the author's world state.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequirementEvaluator {
    policy: MissingConfigPolicy,
}

impl RequirementEvaluator {
    pub fn new(policy: MissingConfigPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> MissingConfigPolicy {
        self.policy
    }

    /// Evaluates the requirements of `kind` on `entity_key`.
    ///
    /// Requirements run in insertion order. After each one, its success or
    /// failure hook fires if defined, and the first unmet requirement stops
    /// evaluation. A missing configuration layer logs exactly one warning.
    pub fn evaluate(
        &self,
        entity_key: &str,
        kind: SpellKind,
        event: &SpellEvent,
        world: &mut dyn World,
        world_state: &mut WorldState,
        section: &str,
    ) -> Verdict {
        let WorldState { sections, flags } = world_state;

        let rule = match lookup_rule(sections, section, entity_key, kind) {
            RuleLookup::Found(rule) => rule,
            RuleLookup::Missing(missing) => {
                warn!(
                    target: "spell::requirements",
                    code = missing.error_code(),
                    section = missing.section(),
                    entity = entity_key,
                    spell = %kind,
                    policy = %self.policy,
                    "{missing}"
                );
                return Verdict::Unconfigured(missing);
            }
        };

        for requirement in rule.requirements() {
            let name = requirement.name();
            let met = requirement.is_met(&RequirementContext {
                event,
                world: &*world,
                flags: &*flags,
            });

            let hook = if met {
                rule.success_action(name)
            } else {
                rule.failure_action(name)
            };
            if let Some(hook) = hook {
                hook(&mut HookContext {
                    event,
                    world: &mut *world,
                    flags: &mut *flags,
                });
            }

            debug!(
                target: "spell::requirements",
                entity = entity_key,
                spell = %kind,
                requirement = name,
                met,
                hooked = hook.is_some(),
                "requirement evaluated"
            );

            if !met {
                return Verdict::Denied {
                    requirement: name.to_string(),
                };
            }
        }

        Verdict::Approved
    }

    /// Boolean form of [`Self::evaluate`]; missing configuration follows the
    /// evaluator's policy.
    pub fn all_requirements_met(
        &self,
        entity_key: &str,
        kind: SpellKind,
        event: &SpellEvent,
        world: &mut dyn World,
        world_state: &mut WorldState,
        section: &str,
    ) -> bool {
        self.evaluate(entity_key, kind, event, world, world_state, section)
            .allows_cast(self.policy)
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;
    use std::sync::{Arc, Mutex};

    use tracing::field::{Field, Visit};
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::{Context, SubscriberExt};

    use super::*;
    use crate::state::{EntityConfig, SpellRule, StateSection};
    use crate::target::Target;
    use crate::testing::{RecordingWorld, WorldCall};

    const SECTION: &str = "insideCellar";

    type Log = Arc<Mutex<Vec<String>>>;

    #[derive(Default)]
    struct FieldText(String);

    impl Visit for FieldText {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.push_str(&format!("{}={:?} ", field.name(), value));
        }
    }

    struct WarnCollector(Log);

    impl<S: tracing::Subscriber> Layer<S> for WarnCollector {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::WARN {
                let mut text = FieldText::default();
                event.record(&mut text);
                self.0.lock().unwrap().push(text.0);
            }
        }
    }

    fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
        let log = Log::default();
        let subscriber = tracing_subscriber::registry().with(WarnCollector(log.clone()));
        let result = tracing::subscriber::with_default(subscriber, f);
        let warnings = log.lock().unwrap().clone();
        (result, warnings)
    }

    fn recorder(
        log: &Log,
        entry: &'static str,
    ) -> impl Fn(&mut HookContext<'_>) + Send + Sync + use<> {
        let log = log.clone();
        move |_| log.lock().unwrap().push(entry.to_string())
    }

    fn probe(
        log: &Log,
        name: &'static str,
        met: bool,
    ) -> impl Fn(&RequirementContext<'_>) -> bool + Send + Sync + use<> {
        let log = log.clone();
        move |_| {
            log.lock().unwrap().push(name.to_string());
            met
        }
    }

    fn cellar(rule: SpellRule) -> WorldState {
        WorldState::new().with_section(
            SECTION,
            StateSection::new().with_entity(
                "rubble",
                EntityConfig::new().with_spell(SpellKind::Disappear, rule),
            ),
        )
    }

    fn event() -> SpellEvent {
        SpellEvent::new(Target::new("rubble_1").with_group("rubble").spellable(SpellKind::Disappear))
    }

    #[test]
    fn stops_at_first_unmet_requirement() {
        let log = Log::default();
        let evaluated = Log::default();

        let rule = SpellRule::new()
            .require("r1", probe(&evaluated, "r1", true))
            .require("r2", probe(&evaluated, "r2", false))
            .require("r3", probe(&evaluated, "r3", true))
            .on_success("r1", recorder(&log, "r1:success"))
            .on_failure("r1", recorder(&log, "r1:failure"))
            .on_success("r2", recorder(&log, "r2:success"))
            .on_failure("r2", recorder(&log, "r2:failure"))
            .on_success("r3", recorder(&log, "r3:success"))
            .on_failure("r3", recorder(&log, "r3:failure"));

        let mut state = cellar(rule);
        let mut world = RecordingWorld::new("cellar", "default");
        let verdict = RequirementEvaluator::default().evaluate(
            "rubble",
            SpellKind::Disappear,
            &event(),
            &mut world,
            &mut state,
            SECTION,
        );

        assert_eq!(
            verdict,
            Verdict::Denied {
                requirement: "r2".into()
            }
        );
        assert_eq!(*evaluated.lock().unwrap(), ["r1", "r2"]);
        assert_eq!(*log.lock().unwrap(), ["r1:success", "r2:failure"]);
    }

    #[test]
    fn all_success_hooks_fire_in_order() {
        let log = Log::default();
        let rule = SpellRule::new()
            .require("has_wand", |_| true)
            .require("knows_spell", |_| true)
            .require("in_range", |_| true)
            .on_success("in_range", recorder(&log, "in_range"))
            .on_success("has_wand", recorder(&log, "has_wand"))
            .on_success("knows_spell", recorder(&log, "knows_spell"));

        let mut state = cellar(rule);
        let mut world = RecordingWorld::new("cellar", "default");
        let met = RequirementEvaluator::default().all_requirements_met(
            "rubble",
            SpellKind::Disappear,
            &event(),
            &mut world,
            &mut state,
            SECTION,
        );

        assert!(met);
        assert_eq!(*log.lock().unwrap(), ["has_wand", "knows_spell", "in_range"]);
    }

    #[test]
    fn predicates_read_flags_written_by_hooks() {
        let rule = SpellRule::new()
            .require("first_try", |ctx| !ctx.flags.is_set("tried"))
            .on_failure("first_try", |ctx| {
                ctx.flags.increment("refusals", 1);
            })
            .on_success("first_try", |ctx| {
                ctx.flags.set("tried", true);
                ctx.world.use_tool("chalk");
            });

        let mut state = cellar(rule);
        let mut world = RecordingWorld::new("cellar", "default");
        let evaluator = RequirementEvaluator::default();
        let run = |world: &mut RecordingWorld, state: &mut WorldState| {
            evaluator.evaluate("rubble", SpellKind::Disappear, &event(), world, state, SECTION)
        };

        assert_eq!(run(&mut world, &mut state), Verdict::Approved);
        assert!(matches!(run(&mut world, &mut state), Verdict::Denied { .. }));
        assert_eq!(state.flags.get("refusals"), Some(&serde_json::json!(1)));
        assert_eq!(world.calls(), [WorldCall::UseTool("chalk".into())]);
    }

    #[test]
    fn missing_entity_passes_with_one_warning() {
        let mut state = cellar(SpellRule::new().require("never", |_| false));
        let mut world = RecordingWorld::new("cellar", "default");
        let evaluator = RequirementEvaluator::default();

        for key in ["barrel", "crate_stack", "old_sign"] {
            let (met, warnings) = capture_warnings(|| {
                evaluator.all_requirements_met(
                    key,
                    SpellKind::Disappear,
                    &event(),
                    &mut world,
                    &mut state,
                    SECTION,
                )
            });

            assert!(met);
            assert_eq!(warnings.len(), 1, "{warnings:?}");
            assert!(warnings[0].contains(key));
        }
        assert!(world.calls().is_empty());
    }

    #[test]
    fn missing_section_respects_fail_closed() {
        let mut state = WorldState::new();
        let mut world = RecordingWorld::new("cellar", "default");
        let evaluator = RequirementEvaluator::new(MissingConfigPolicy::FailClosed);

        let verdict = evaluator.evaluate(
            "rubble",
            SpellKind::Disappear,
            &event(),
            &mut world,
            &mut state,
            SECTION,
        );

        assert!(matches!(
            verdict,
            Verdict::Unconfigured(MissingConfig::Section { .. })
        ));
        assert!(!verdict.allows_cast(evaluator.policy()));
        assert!(verdict.allows_cast(MissingConfigPolicy::FailOpen));
    }

    #[test]
    fn empty_requirement_list_is_approved() {
        let mut state = cellar(SpellRule::new());
        let mut world = RecordingWorld::new("cellar", "default");

        let verdict = RequirementEvaluator::default().evaluate(
            "rubble",
            SpellKind::Disappear,
            &event(),
            &mut world,
            &mut state,
            SECTION,
        );
        assert_eq!(verdict, Verdict::Approved);
    }
}
