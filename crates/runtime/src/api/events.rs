//! Lifecycle callbacks fired by the simulation engine.
use arena_core::Target;

/// Engine callback for a single agent.
///
/// Spawning is not an event: it goes through [`crate::Squad::spawn`], which
/// registers the agent before its first decision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AgentEvent {
    /// Stopped next to an asteroid or salvage carrier.
    ArrivedAtResource(Target),
    LoadComplete,
    ArrivedAtHome,
    UnloadComplete,
    /// Reached the destination of a `MoveTo`. `None` when the engine cannot
    /// name what was there.
    ArrivedAtTarget(Option<Target>),
    /// Stopped without reaching anything in particular.
    Stopped,
}
