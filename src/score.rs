//! Row-clear scoring and level progression

/// Points per cleared row before multipliers
pub const BASE_ROW_SCORE: u64 = 40;
/// Rows to clear before the level goes up
pub const ROWS_FOR_LEVEL_UP: i32 = 8;

/// Score after clearing `cleared` rows at `level`.
///
/// `floor(score + 40 * (cleared * 2) * (level * 1.05))`, evaluated in that
/// order so rounding stays reproducible.
pub fn add_row_clear(score: u64, cleared: usize, level: u32) -> u64 {
    let gained = (BASE_ROW_SCORE * (cleared as u64 * 2)) as f64 * (level as f64 * 1.05);
    (score as f64 + gained).floor() as u64
}

/// Level and countdown after clearing `cleared` rows.
///
/// When the countdown runs out the next level's countdown is
/// `|remaining - ROWS_FOR_LEVEL_UP|`, so every row of overshoot adds one to
/// the next level's quota.
pub fn advance_level(level: u32, rows_until_next_level: i32, cleared: usize) -> (u32, i32) {
    let remaining = rows_until_next_level - cleared as i32;
    if remaining <= 0 {
        (level + 1, (remaining - ROWS_FOR_LEVEL_UP).abs())
    } else {
        (level, remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_rows_no_points() {
        assert_eq!(add_row_clear(120, 0, 3), 120);
    }

    #[test]
    fn test_single_row_level_one() {
        assert_eq!(add_row_clear(0, 1, 1), 84);
    }

    #[test]
    fn test_double_row_level_one() {
        assert_eq!(add_row_clear(0, 2, 1), 168);
        assert_eq!(add_row_clear(100, 2, 1), 268);
    }

    #[test]
    fn test_level_multiplier() {
        // 40 * 2 * (3 * 1.05) = 252
        assert_eq!(add_row_clear(0, 1, 3), 252);
    }

    #[test]
    fn test_countdown_without_level_up() {
        assert_eq!(advance_level(1, 8, 3), (1, 5));
        assert_eq!(advance_level(2, 5, 0), (2, 5));
    }

    #[test]
    fn test_level_up_exact() {
        assert_eq!(advance_level(1, 2, 2), (2, 8));
    }

    #[test]
    fn test_level_up_carries_overshoot() {
        assert_eq!(advance_level(1, 1, 2), (2, 9));
        assert_eq!(advance_level(4, 2, 4), (5, 10));
        // Worst case: one row left, four cleared
        assert_eq!(advance_level(3, 1, 4), (4, 11));
    }
}
