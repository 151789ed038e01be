//! Triple-barrier labeling module
//!
//! Events get a volatility-scaled profit-take and stop-loss plus an optional
//! deadline; the first barrier the price path touches decides the exit

mod barrier;
mod bins;
mod events;
mod types;

pub use barrier::{resolve_barriers, resolve_event};
pub use bins::{generate_labels, label_of};
pub use events::{define_events, vertical_barriers, Deadlines, Sides};
pub use types::{
    BarrierExit, BarrierParams, BarrierTouch, Bin, DropReason, DroppedEvent, Event, EventId,
    EventSetup, LabeledOutcome, Side,
};
