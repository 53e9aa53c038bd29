use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Discrete handicap ranges used as the row key of both adjustment tables.
///
/// Every bound is inclusive on the upper end. `ThirtyThreeToThirtyEight` is the
/// overflow band and has no enforced upper limit.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum HandicapBand {
    #[strum(serialize = "0-9")]
    #[serde(rename = "0-9")]
    ZeroToNine = 0,
    #[strum(serialize = "10-15")]
    #[serde(rename = "10-15")]
    TenToFifteen = 1,
    #[strum(serialize = "16-21")]
    #[serde(rename = "16-21")]
    SixteenToTwentyOne = 2,
    #[strum(serialize = "22-26")]
    #[serde(rename = "22-26")]
    TwentyTwoToTwentySix = 3,
    #[strum(serialize = "27-32")]
    #[serde(rename = "27-32")]
    TwentySevenToThirtyTwo = 4,
    #[strum(serialize = "33-38")]
    #[serde(rename = "33-38")]
    ThirtyThreeToThirtyEight = 5,
}

impl HandicapBand {
    /// Maps any handicap to its band. NaN compares false everywhere and lands in
    /// the overflow band.
    pub fn classify(handicap: f64) -> Self {
        if handicap <= 9.0 {
            HandicapBand::ZeroToNine
        } else if handicap <= 15.0 {
            HandicapBand::TenToFifteen
        } else if handicap <= 21.0 {
            HandicapBand::SixteenToTwentyOne
        } else if handicap <= 26.0 {
            HandicapBand::TwentyTwoToTwentySix
        } else if handicap <= 32.0 {
            HandicapBand::TwentySevenToThirtyTwo
        } else {
            HandicapBand::ThirtyThreeToThirtyEight
        }
    }

    /// Row index into the adjustment tables.
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}
