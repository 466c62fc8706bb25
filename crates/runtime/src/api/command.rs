//! Commands handed back to the simulation engine.
use arena_core::{AgentId, Target, TeamId};

/// One engine command issued on behalf of an agent.
///
/// Movement is resolved by the engine: a `MoveTo` travels in a straight line
/// and reports back through an arrival or stop callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    MoveTo(Target),
    TurnTo(Target),
    /// Aim at the target and shoot once.
    Fire(Target),
    /// Start transferring payload from a resource point into the hold.
    Load(Target),
    /// Start transferring the hold into the team's home base.
    Unload(TeamId),
    Stop,
}

impl Command {
    pub fn is_move(&self) -> bool {
        matches!(self, Command::MoveTo(_))
    }
}

/// Receiver of the commands produced while handling a callback.
pub trait CommandSink {
    fn dispatch(&mut self, agent: AgentId, command: Command);
}

impl CommandSink for Vec<(AgentId, Command)> {
    fn dispatch(&mut self, agent: AgentId, command: Command) {
        self.push((agent, command));
    }
}
