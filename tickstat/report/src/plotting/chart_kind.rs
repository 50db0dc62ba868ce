use crate::metric_keys;
use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum ChartKind {
    #[display("Tick Rate")]
    #[serde(rename = "tick_rate")]
    TickRate,
    #[display("Frame Duration")]
    #[serde(rename = "frame_duration")]
    FrameDuration,
    #[display("Memory")]
    #[serde(rename = "memory")]
    Memory,
    #[display("CPU Time")]
    #[serde(rename = "cpu")]
    Cpu,
    #[display("Players")]
    #[serde(rename = "players")]
    Players,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::TickRate,
        ChartKind::FrameDuration,
        ChartKind::Memory,
        ChartKind::Cpu,
        ChartKind::Players,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ChartKind::TickRate => "tick_rate",
            ChartKind::FrameDuration => "frame_duration",
            ChartKind::Memory => "memory",
            ChartKind::Cpu => "cpu",
            ChartKind::Players => "players",
        }
    }

    pub fn primary_key(&self) -> &'static str {
        match self {
            ChartKind::TickRate => metric_keys::TICK_RATE,
            ChartKind::FrameDuration => metric_keys::FRAME_DURATION,
            ChartKind::Memory => metric_keys::MEMORY,
            ChartKind::Cpu => metric_keys::CPU_TOTAL,
            ChartKind::Players => metric_keys::PLAYERS,
        }
    }

    pub fn y_axis_label(&self) -> &'static str {
        match self {
            ChartKind::TickRate => "Ticks [1/s]",
            ChartKind::FrameDuration => "Duration [ms]",
            ChartKind::Memory => "Memory [MB]",
            ChartKind::Cpu => "CPU Time [ms]",
            ChartKind::Players => "Players",
        }
    }

    /// Factor applied to stored values before plotting.
    pub fn value_scale(&self) -> f64 {
        match self {
            ChartKind::Memory => 1.0 / (1024.0 * 1024.0),
            _ => 1.0,
        }
    }
}
