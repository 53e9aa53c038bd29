use super::band::HandicapBand;

/// Net score a player has to beat before the strokes rule applies.
pub const PAR: i32 = 72;

/// Strokes under par beyond this are looked up as this value.
pub const STROKES_UNDER_CAP: i32 = 12;

/// Handicap decrease for finishing 1st, 2nd and 3rd on the net leaderboard,
/// one row per band.
const POSITION_TABLE: [[i32; 3]; 6] = [
    [-1, 0, 0],
    [-2, -1, 0],
    [-3, -2, -1],
    [-4, -3, -2],
    [-5, -4, -3],
    [-6, -5, -4],
];

/// Magnitude of the handicap decrease for 1..=12 strokes under par. The
/// overflow band has no row and is exempt.
const STROKES_TABLE: [[i32; 12]; 5] = [
    [0, 1, 1, 1, 2, 2, 2, 2, 2, 3, 3, 3],
    [0, 1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4],
    [1, 1, 2, 2, 3, 3, 4, 4, 4, 5, 6, 6],
    [1, 2, 2, 3, 4, 4, 5, 6, 6, 6, 8, 8],
    [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12],
];

/// Handicap delta for a top-3 net finish. Any other position yields 0.
pub fn position_delta(band: HandicapBand, position: usize) -> i32 {
    match position {
        1..=3 => POSITION_TABLE[band.index()][position - 1],
        _ => 0,
    }
}

/// Handicap delta for beating par by `strokes_under_par` on net score.
pub fn strokes_delta(band: HandicapBand, strokes_under_par: i32) -> i32 {
    if band == HandicapBand::ThirtyThreeToThirtyEight || strokes_under_par <= 0 {
        return 0;
    }

    let capped = strokes_under_par.min(STROKES_UNDER_CAP) as usize;
    let magnitude = STROKES_TABLE
        .get(band.index())
        .and_then(|row| row.get(capped - 1))
        .copied()
        .unwrap_or_default();

    -magnitude
}
