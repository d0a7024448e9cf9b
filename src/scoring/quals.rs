use statrs::function::erf::erf_inv;

/// Curve flattening constant. Larger values compress the spread between ranks.
pub const ALPHA: f64 = 1.07;

/// Half the distance between the best and median scores
const SPREAD: f64 = 10.0;

/// Score of the median rank
const MIDPOINT: f64 = 12.0;

/// Raw scores this close to an integer are treated as that integer, so float
/// noise in `erf_inv(x) / erf_inv(x)` never pushes the ceiling up a whole point.
const SNAP_EPSILON: f64 = 1e-9;

/// Qualification points for finishing at `rank` out of `team_count` ranked teams.
///
/// `ceil(|10 * erfinv((N - 2R + 2) / (alpha * N)) / erfinv(1 / alpha) + 12|)`
///
/// Rank 1 always scores 22 and the median rank 12. Inputs outside
/// `1 <= rank <= team_count` are clamped into that range, and a zero
/// `team_count` is treated as a field of one.
pub fn quals_points(rank: u32, team_count: u32) -> u32 {
    let team_count = team_count.max(1);
    let rank = rank.clamp(1, team_count);

    let n = f64::from(team_count);
    let r = f64::from(rank);

    // Valid ranks keep |x| <= 1/alpha, well inside erfinv's (-1, 1) domain
    let bound = 1.0 / ALPHA;
    let x = ((n - 2.0 * r + 2.0) / (ALPHA * n)).clamp(-bound, bound);

    let raw = erf_inv(x) * SPREAD / erf_inv(bound) + MIDPOINT;
    let snapped = if (raw - raw.round()).abs() < SNAP_EPSILON {
        raw.round()
    } else {
        raw
    };

    snapped.abs().ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn curve(team_count: u32) -> Vec<u32> {
        (1..=team_count).map(|r| quals_points(r, team_count)).collect()
    }

    #[test]
    fn test_four_team_field() {
        assert_eq!(curve(4), vec![22, 16, 12, 9]);
    }

    #[test]
    fn test_small_fields() {
        assert_eq!(curve(1), vec![22]);
        assert_eq!(curve(2), vec![22, 12]);
        assert_eq!(curve(3), vec![22, 15, 10]);
    }

    #[test]
    fn test_thirty_team_field() {
        let points = curve(30);
        assert_eq!(points[0], 22);
        assert_eq!(points[1], 21);
        assert_eq!(points[14], 13);
        assert_eq!(points[15], 12); // median rank, x == 0
        assert_eq!(points[29], 4);
        assert!(points[0] > points[14]);
        assert!(points[14] > points[29]);
    }

    #[test]
    fn test_top_gap_wider_than_middle_gap() {
        let points = curve(40);
        let top_gap = points[0] - points[1];
        let middle_gap = points[19] - points[20];
        assert!(top_gap >= middle_gap);
        assert_eq!(points[0], 22);
        assert_eq!(points[39], 4);
    }

    #[test]
    fn test_out_of_range_inputs_clamp() {
        assert_eq!(quals_points(0, 10), quals_points(1, 10));
        assert_eq!(quals_points(11, 10), quals_points(10, 10));
        assert_eq!(quals_points(1, 0), 22);
    }

    proptest! {
        #[test]
        fn prop_bounded(team_count in 1u32..200, rank_seed in 0u32..200) {
            let rank = rank_seed % team_count + 1;
            let points = quals_points(rank, team_count);
            prop_assert!(points >= 2);
            prop_assert!(points <= 22);
        }

        #[test]
        fn prop_non_increasing_in_rank(team_count in 2u32..200) {
            let points = curve(team_count);
            for pair in points.windows(2) {
                prop_assert!(pair[0] >= pair[1], "{:?}", points);
            }
        }
    }
}
