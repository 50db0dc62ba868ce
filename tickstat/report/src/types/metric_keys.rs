//! Series keys produced by tick telemetry ingestion.

pub const TICK_RATE: &str = "tick_rate";
pub const FRAME_DURATION: &str = "frame_duration";
pub const MEMORY: &str = "memory";
/// First component of the per-column CPU composite keys, e.g. `cpu.user`.
pub const CPU: &str = "cpu";
pub const CPU_TOTAL: &str = "cpu_total";
pub const PLAYERS: &str = "players";
pub const PLAYER_EVENTS: &str = "player_events";
pub const LAG_SPIKES: &str = "lag_spikes";
