//! Stopping places and where entities stand while waiting at them.

use ts_core::{LaneId, StopId};

/// Lateral space one waiting entity occupies along the stop.
pub const WAITING_WIDTH: f64 = 0.8;

/// Depth of one row of waiting entities, measured away from the lane.
pub const WAITING_DEPTH: f64 = 1.0;

/// A named stretch of a lane where vehicles halt to board and alight.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoppingPlace {
    pub id: StopId,

    /// Display name; empty when the scenario gives none.
    pub name: String,

    pub lane: LaneId,

    pub begin_pos: f64,

    pub end_pos: f64,
}

impl StoppingPlace {
    pub fn new(id: impl Into<StopId>, lane: impl Into<LaneId>, begin_pos: f64, end_pos: f64) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            lane: lane.into(),
            begin_pos,
            end_pos,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.end_pos - self.begin_pos
    }

    /// How many entities fit side by side along the stop.  At least one.
    pub fn transportables_abreast(&self) -> usize {
        ((self.length() / WAITING_WIDTH).floor() as usize).max(1)
    }

    /// Lane offset at which the entity holding `slot` waits.
    ///
    /// Slots fill from the downstream end of the stop; without a slot the
    /// entity waits at the stop's midpoint.
    pub fn waiting_position_on_lane(&self, slot: Option<usize>) -> f64 {
        match slot {
            Some(slot) => {
                let column = slot % self.transportables_abreast();
                self.end_pos - (0.5 + column as f64) * WAITING_WIDTH
            }
            None => (self.begin_pos + self.end_pos) / 2.0,
        }
    }

    /// Row (distance from the curb, in rows) the entity holding `slot` uses.
    pub fn waiting_row(&self, slot: Option<usize>) -> usize {
        slot.map_or(0, |s| s / self.transportables_abreast())
    }

    /// `true` if `pos` lies within the stop, widened by `tolerance`.
    #[inline]
    pub fn contains(&self, pos: f64, tolerance: f64) -> bool {
        pos >= self.begin_pos - tolerance && pos <= self.end_pos + tolerance
    }
}
