//! Labeling types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trade direction of an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Long,
    Short,
}

impl Side {
    /// +1.0 for long, -1.0 for short
    pub fn sign(&self) -> f64 {
        match self {
            Side::Long => 1.0,
            Side::Short => -1.0,
        }
    }
}

/// Ordinal identifier of an event within one labeling run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId(pub usize);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Barrier widths shared by every event of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarrierParams {
    /// Profit-take width as a multiple of target
    pub profit_multiple: f64,
    /// Stop-loss width as a multiple of target
    pub loss_multiple: f64,
    /// Minimum target for an event to qualify
    pub min_return: f64,
}

impl Default for BarrierParams {
    fn default() -> Self {
        Self {
            profit_multiple: 1.0,
            loss_multiple: 1.0,
            min_return: 0.005,
        }
    }
}

/// Which barrier ended an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarrierTouch {
    /// Path return rose above the profit-take level
    ProfitTake,
    /// Path return fell below the stop-loss level
    StopLoss,
    /// Deadline reached without a horizontal touch
    VerticalBarrier,
    /// No deadline and no touch before the series ended
    EndOfSeries,
}

impl BarrierTouch {
    pub fn as_str(&self) -> &'static str {
        match self {
            BarrierTouch::ProfitTake => "profit_take",
            BarrierTouch::StopLoss => "stop_loss",
            BarrierTouch::VerticalBarrier => "vertical_barrier",
            BarrierTouch::EndOfSeries => "end_of_series",
        }
    }
}

/// Resolved exit of an event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarrierExit {
    pub time: NaiveDateTime,
    pub touch: BarrierTouch,
    /// Profit-take and stop-loss held at the same timestamp
    pub tie: bool,
}

/// A candidate trade awaiting or holding its barrier resolution
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub start: NaiveDateTime,
    /// Required return magnitude (volatility at `start`)
    pub target: f64,
    pub side: Side,
    pub profit_multiple: f64,
    pub loss_multiple: f64,
    /// Vertical barrier; `None` holds until the end of the series
    pub deadline: Option<NaiveDateTime>,
    /// Filled in by barrier resolution
    pub exit: Option<BarrierExit>,
}

impl Event {
    pub fn exit_time(&self) -> Option<NaiveDateTime> {
        self.exit.map(|e| e.time)
    }

    /// Profit-take return level
    pub fn upper_level(&self) -> f64 {
        self.profit_multiple * self.target
    }

    /// Stop-loss return level
    pub fn lower_level(&self) -> f64 {
        -self.loss_multiple * self.target
    }

    pub fn is_resolved(&self) -> bool {
        self.exit.is_some()
    }
}

/// Why a candidate event did not become an [`Event`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum DropReason {
    /// Volatility has no value at the event time
    UndefinedVolatility,
    /// Target is not above the minimum return
    BelowMinReturn { target: f64 },
    /// Event time is not a bar of the price series
    NotInSeries,
    /// Deadline lies before the event start
    DeadlineBeforeStart,
    /// A side map was given but has no entry for the event
    MissingSide,
}

impl DropReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DropReason::UndefinedVolatility => "undefined_volatility",
            DropReason::BelowMinReturn { .. } => "below_min_return",
            DropReason::NotInSeries => "not_in_series",
            DropReason::DeadlineBeforeStart => "deadline_before_start",
            DropReason::MissingSide => "missing_side",
        }
    }
}

/// A filtered-out candidate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DroppedEvent {
    pub time: NaiveDateTime,
    pub reason: DropReason,
}

/// Output of event definition
#[derive(Debug, Clone, Default)]
pub struct EventSetup {
    pub events: Vec<Event>,
    pub dropped: Vec<DroppedEvent>,
}

/// Realised return and its sign for one resolved event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub id: EventId,
    pub start: NaiveDateTime,
    pub exit_time: NaiveDateTime,
    /// Side-adjusted return from start to exit
    pub ret: f64,
    /// Sign of `ret`: +1, -1, or 0 when flat
    pub label: i8,
    pub touch: BarrierTouch,
}

/// Final training row: a bin with its sample weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabeledOutcome {
    pub start: NaiveDateTime,
    pub exit_time: NaiveDateTime,
    pub ret: f64,
    pub label: i8,
    pub touch: BarrierTouch,
    pub sample_weight: f64,
}

impl LabeledOutcome {
    pub fn new(bin: &Bin, sample_weight: f64) -> Self {
        Self {
            start: bin.start,
            exit_time: bin.exit_time,
            ret: bin.ret,
            label: bin.label,
            touch: bin.touch,
            sample_weight,
        }
    }
}
