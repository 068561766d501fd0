//! Scoring - flat points per cleared row

use crate::types::POINTS_PER_ROW;

/// Points for clearing `rows` rows with a single lock
pub fn line_clear_score(rows: usize) -> u32 {
    (rows as u32).saturating_mul(POINTS_PER_ROW)
}
