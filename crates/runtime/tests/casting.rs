use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Notify, broadcast};

use spell_core::testing::{RecordingWorld, WorldCall};
use spell_core::{
    EntityConfig, SpellConfig, SpellEvent, SpellKind, SpellRule, StateSection, StoryFlags,
    Target, WorldState,
};
use spell_runtime::{AnimationError, Animator, CastEvent, CastOutcome, SpellRuntime};

/// Animator whose tween only completes when the test opens the gate.
#[derive(Clone, Default)]
struct GatedAnimator {
    gate: Arc<Notify>,
}

#[async_trait]
impl Animator for GatedAnimator {
    async fn disappear(&self, _key: &str) -> Result<(), AnimationError> {
        self.gate.notified().await;
        Ok(())
    }
}

struct BrokenAnimator;

#[async_trait]
impl Animator for BrokenAnimator {
    async fn disappear(&self, key: &str) -> Result<(), AnimationError> {
        Err(AnimationError::SpriteNotFound(key.to_string()))
    }
}

struct PanickingAnimator;

#[async_trait]
impl Animator for PanickingAnimator {
    async fn disappear(&self, key: &str) -> Result<(), AnimationError> {
        panic!("sprite sheet for {key} is corrupt");
    }
}

/// Animator driven by a game clock that resolves waits immediately.
#[derive(Clone, Default)]
struct GameClock {
    waits: Arc<Mutex<Vec<Duration>>>,
}

#[async_trait]
impl Animator for GameClock {
    async fn disappear(&self, _key: &str) -> Result<(), AnimationError> {
        Ok(())
    }

    async fn wait(&self, delay: Duration) {
        self.waits.lock().unwrap().push(delay);
    }
}

fn garden_state() -> WorldState {
    let mut flags = StoryFlags::new();
    flags.set("learned_vanish", true);

    WorldState::new().with_flags(flags).with_section(
        "insideOvergrownGarden",
        StateSection::new()
            .with_entity(
                "vines",
                EntityConfig::new().with_spell(
                    SpellKind::Disappear,
                    SpellRule::new()
                        .require("learned_vanish", |ctx| ctx.flags.is_set("learned_vanish"))
                        .on_success("learned_vanish", |ctx| {
                            ctx.flags.increment("vanish_casts", 1);
                        }),
                ),
            )
            .with_entity(
                "shed_door",
                EntityConfig::new().with_spell(
                    SpellKind::Unlock,
                    SpellRule::new()
                        .require("has_key", |ctx| ctx.flags.is_set("shed_key"))
                        .on_failure("has_key", |ctx| {
                            ctx.flags.set("hint_shown", true);
                        }),
                ),
            ),
    )
}

fn vines() -> SpellEvent {
    SpellEvent::new(
        Target::new("vine_3")
            .with_group("vines")
            .spellable(SpellKind::Disappear)
            .unlocks_object("garden_gate")
            .unlocks_transition("to_orchard"),
    )
}

fn shed_door() -> SpellEvent {
    SpellEvent::new(Target::new("shed_door").spellable(SpellKind::Unlock))
}

async fn next_restored(events: &mut broadcast::Receiver<CastEvent>) -> CastEvent {
    loop {
        let event = events.recv().await.expect("event stream open");
        if matches!(event, CastEvent::ControlRestored { .. }) {
            return event;
        }
    }
}

#[tokio::test]
async fn disappear_finishes_only_after_tween_completes() {
    let animator = GatedAnimator::default();
    let gate = Arc::clone(&animator.gate);

    let runtime = SpellRuntime::builder()
        .world(RecordingWorld::new("overgrown_garden", "default"))
        .world_state(garden_state())
        .animator(animator)
        .build()
        .await
        .expect("runtime should build");
    let handle = runtime.handle();
    let mut events = runtime.subscribe();

    let outcome = handle.cast(vines()).await.expect("cast should be accepted");
    assert!(matches!(outcome, CastOutcome::Casting { kind: SpellKind::Disappear, .. }));
    assert!(handle.control().await.unwrap().is_locked());

    gate.notify_one();
    let restored = next_restored(&mut events).await;
    assert!(matches!(restored, CastEvent::ControlRestored { ref entity, .. } if entity == "vines"));
    assert!(!handle.control().await.unwrap().is_locked());

    drop(handle);
    let (world, state) = runtime.shutdown().await.expect("clean shutdown");

    assert_eq!(
        world.calls(),
        [
            WorldCall::DisableMovement,
            WorldCall::UseTool("wand".into()),
            WorldCall::Destroy("vines".into()),
            WorldCall::UnlockObject("garden_gate".into()),
            WorldCall::UnlockTransition("to_orchard".into()),
            WorldCall::StopUsingTool,
            WorldCall::EnableMovement,
        ]
    );
    assert_eq!(state.flags.get("vanish_casts"), Some(&serde_json::json!(1)));
}

#[tokio::test(start_paused = true)]
async fn unlock_returns_control_after_delay() {
    let mut state = garden_state();
    state.flags.set("shed_key", true);

    let runtime = SpellRuntime::builder()
        .world(RecordingWorld::new("overgrown_garden", "default"))
        .world_state(state)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut events = runtime.subscribe();

    let started = tokio::time::Instant::now();
    let outcome = handle.cast(shed_door()).await.unwrap();
    assert!(outcome.is_cast());
    assert!(handle.control().await.unwrap().is_locked());

    next_restored(&mut events).await;
    assert!(started.elapsed() >= Duration::from_millis(SpellConfig::DEFAULT_UNLOCK_DELAY_MS));

    drop(handle);
    let (world, _) = runtime.shutdown().await.unwrap();

    let open = world.position(&WorldCall::OpenDoor("shed_door".into()));
    let enable = world.position(&WorldCall::EnableMovement);
    let stop = world.position(&WorldCall::StopUsingTool);
    assert!(open.is_some());
    assert!(open < stop && stop < enable);
}

#[tokio::test]
async fn failed_requirement_runs_failure_hook_only() {
    let runtime = SpellRuntime::builder()
        .world(RecordingWorld::new("overgrown_garden", "default"))
        .world_state(garden_state())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut events = runtime.subscribe();

    let outcome = handle.cast(shed_door()).await.unwrap();
    assert!(matches!(outcome, CastOutcome::Denied { .. }));
    assert!(matches!(
        events.recv().await.unwrap(),
        CastEvent::Denied { ref entity, .. } if entity == "shed_door"
    ));

    drop(handle);
    let (world, state) = runtime.shutdown().await.unwrap();
    assert!(world.calls().is_empty());
    assert!(state.flags.is_set("hint_shown"));
}

#[tokio::test]
async fn overlapping_cast_is_rejected_until_control_returns() {
    let animator = GatedAnimator::default();
    let gate = Arc::clone(&animator.gate);

    let runtime = SpellRuntime::builder()
        .world(RecordingWorld::new("overgrown_garden", "default"))
        .world_state(garden_state())
        .animator(animator)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut events = runtime.subscribe();

    assert!(handle.cast(vines()).await.unwrap().is_cast());
    let second = handle.cast(vines()).await.unwrap();
    assert!(matches!(second, CastOutcome::Busy { .. }));

    gate.notify_one();
    next_restored(&mut events).await;

    gate.notify_one();
    assert!(handle.cast(vines()).await.unwrap().is_cast());
    next_restored(&mut events).await;

    drop(handle);
    let (_, state) = runtime.shutdown().await.unwrap();
    assert_eq!(state.flags.get("vanish_casts"), Some(&serde_json::json!(2)));
}

#[tokio::test]
async fn animation_failure_still_restores_control() {
    let runtime = SpellRuntime::builder()
        .world(RecordingWorld::new("overgrown_garden", "default"))
        .world_state(garden_state())
        .animator(BrokenAnimator)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut events = runtime.subscribe();

    handle.cast(vines()).await.unwrap();
    next_restored(&mut events).await;

    drop(handle);
    let (world, _) = runtime.shutdown().await.unwrap();
    assert!(world.movement_enabled());
    assert_eq!(world.tool(), None);
}

#[tokio::test]
async fn non_spellable_event_is_ignored() {
    let runtime = SpellRuntime::builder()
        .world(RecordingWorld::new("overgrown_garden", "default"))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    let outcome = handle
        .cast(SpellEvent::new(Target::new("signpost")))
        .await
        .unwrap();
    assert_eq!(outcome, CastOutcome::Ignored);

    drop(handle);
    let (world, _) = runtime.shutdown().await.unwrap();
    assert!(world.calls().is_empty());
}

#[tokio::test]
async fn shutdown_waits_for_pending_continuation() {
    let animator = GatedAnimator::default();
    let gate = Arc::clone(&animator.gate);

    let runtime = SpellRuntime::builder()
        .world(RecordingWorld::new("overgrown_garden", "default"))
        .world_state(garden_state())
        .animator(animator)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    assert!(handle.cast(vines()).await.unwrap().is_cast());
    drop(handle);

    // The tween completes after every handle is gone
    gate.notify_one();
    let (world, _) = runtime.shutdown().await.unwrap();
    assert!(world.movement_enabled());
    assert_eq!(world.calls().last(), Some(&WorldCall::EnableMovement));
}

#[tokio::test]
async fn panicking_tween_still_finishes_cast() {
    let runtime = SpellRuntime::builder()
        .world(RecordingWorld::new("overgrown_garden", "default"))
        .world_state(garden_state())
        .animator(PanickingAnimator)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut events = runtime.subscribe();

    let CastOutcome::Casting { cast, .. } = handle.cast(vines()).await.unwrap() else {
        panic!("disappear must suspend");
    };
    let restored = tokio::time::timeout(Duration::from_secs(5), next_restored(&mut events))
        .await
        .expect("control restored event");
    assert!(matches!(restored, CastEvent::ControlRestored { cast: id, .. } if id == cast));
    assert!(!handle.control().await.unwrap().is_locked());

    drop(handle);
    let (world, _) = runtime.shutdown().await.unwrap();
    assert_eq!(
        world.calls(),
        [
            WorldCall::DisableMovement,
            WorldCall::UseTool("wand".into()),
            WorldCall::Destroy("vines".into()),
            WorldCall::UnlockObject("garden_gate".into()),
            WorldCall::UnlockTransition("to_orchard".into()),
            WorldCall::StopUsingTool,
            WorldCall::EnableMovement,
        ]
    );
}

#[tokio::test]
async fn unlock_delay_runs_on_the_animator_clock() {
    let mut state = garden_state();
    state.flags.set("shed_key", true);
    let clock = GameClock::default();
    let waits = Arc::clone(&clock.waits);

    let runtime = SpellRuntime::builder()
        .world(RecordingWorld::new("overgrown_garden", "default"))
        .world_state(state)
        .spell_config(SpellConfig::default().with_unlock_delay_ms(2500))
        .animator(clock)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut events = runtime.subscribe();

    assert!(handle.cast(shed_door()).await.unwrap().is_cast());
    // The clock resolves instantly, so no real 2.5 s pass
    tokio::time::timeout(Duration::from_secs(1), next_restored(&mut events))
        .await
        .expect("control restored before the wall-clock delay");

    drop(handle);
    runtime.shutdown().await.unwrap();
    assert_eq!(*waits.lock().unwrap(), [Duration::from_millis(2500)]);
}
