//! Sandbox entry point: casts every scripted target against an in-memory world.
mod config;
mod scenario;
mod world;

use anyhow::Result;
use tokio::sync::broadcast;
use tracing::{info, warn};

use spell_core::{SpellEvent, Target};
use spell_runtime::{CastEvent, CastId, CastOutcome, SpellHandle, SpellRuntime};

use config::SandboxConfig;
use scenario::TweenAnimator;
use world::SandboxWorld;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SandboxConfig::from_env();
    let spell_config = config.spell_config()?;
    let targets = config.targets()?;
    let world_state = scenario::garden_state(config.flags()?);

    let world = SandboxWorld::new(&config.level, &config.map, &targets);

    let runtime = SpellRuntime::builder()
        .spell_config(spell_config)
        .world(world)
        .world_state(world_state)
        .animator(TweenAnimator::new(config.tween))
        .build()
        .await?;

    let handle = runtime.handle();
    let mut events = runtime.subscribe();

    for target in targets {
        cast_and_wait(&handle, &mut events, target).await?;
    }

    drop(handle);
    let (world, state) = runtime.shutdown().await?;

    info!(
        destroyed = ?world.destroyed(),
        unlocked = ?world.unlocked(),
        flags = ?state.flags,
        "sandbox finished"
    );

    Ok(())
}

/// Casts on `target` and, if the behavior suspended, waits until control is back.
async fn cast_and_wait(
    handle: &SpellHandle,
    events: &mut broadcast::Receiver<CastEvent>,
    target: Target,
) -> Result<()> {
    let key = target.key().to_string();
    let outcome = handle.cast(SpellEvent::new(target)).await?;
    info!(key = %key, ?outcome, "cast submitted");

    if let CastOutcome::Casting { cast, .. } = outcome {
        wait_for_restore(events, cast).await?;
    }

    Ok(())
}

async fn wait_for_restore(events: &mut broadcast::Receiver<CastEvent>, id: CastId) -> Result<()> {
    loop {
        match events.recv().await {
            Ok(CastEvent::ControlRestored { cast, .. }) if cast == id => return Ok(()),
            Ok(_) => {}
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "event stream lagged");
            }
            Err(broadcast::error::RecvError::Closed) => {
                anyhow::bail!("event stream closed before {} restored control", id)
            }
        }
    }
}
