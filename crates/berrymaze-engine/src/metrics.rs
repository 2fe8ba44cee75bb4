//! Per-run counters for the execution engine.

/// Counters collected over one run.
///
/// Durations are in microseconds. The interpreter fills the instruction
/// counters; the runner fills `total_us` and `events_emitted`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunMetrics {
    /// Wall-clock time from the first step to the terminal event, in microseconds.
    pub total_us: u64,
    /// Interpreter steps taken (dispatches, loop boundaries, frame exits).
    pub steps: u64,
    /// `Move` instructions executed.
    pub moves: u64,
    /// Moves that hit a wall or the grid edge.
    pub blocked_moves: u64,
    /// Rewards collected.
    pub collected: u32,
    /// Enemy hits that cost a strawberry.
    pub lives_consumed: u32,
    /// Enemy hits that reset the player to the start.
    pub resets: u32,
    /// Deepest body nesting entered.
    pub deepest: u32,
    /// Events delivered to the consumer.
    pub events_emitted: u64,
}
