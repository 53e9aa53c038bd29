pub mod band;
pub mod tables;

pub use band::HandicapBand;
pub use tables::{position_delta, strokes_delta, PAR, STROKES_UNDER_CAP};

/// Handicaps never go below this after an adjustment.
pub const HANDICAP_FLOOR: f64 = 0.0;

/// Applies a table delta and clamps the result at the floor.
pub fn clamp_adjusted(handicap: f64, delta: i32) -> f64 {
    (handicap + f64::from(delta)).max(HANDICAP_FLOOR)
}
