//! Binary search over a non-decreasing integer-domain function.

/// First `x` in `[lo, hi]` with `f(x) >= target`, or `None` if there is none.
pub fn first_at_least<F>(lo: i32, hi: i32, target: f64, f: F) -> Option<i32>
where
    F: Fn(i32) -> f64,
{
    if lo > hi || f(hi) < target {
        return None;
    }
    let (mut a, mut b) = (lo, hi);
    while a < b {
        let mid = a + (b - a) / 2;
        if f(mid) >= target {
            b = mid;
        } else {
            a = mid + 1;
        }
    }
    Some(a)
}

/// Last `x` in `[lo, hi]` with `f(x) <= target`, or `None` if there is none.
pub fn last_at_most<F>(lo: i32, hi: i32, target: f64, f: F) -> Option<i32>
where
    F: Fn(i32) -> f64,
{
    if lo > hi || f(lo) > target {
        return None;
    }
    let (mut a, mut b) = (lo, hi);
    while a < b {
        // Round up so the loop always makes progress.
        let mid = a + (b - a + 1) / 2;
        if f(mid) <= target {
            a = mid;
        } else {
            b = mid - 1;
        }
    }
    Some(a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(x: i32) -> f64 {
        f64::from(x / 5)
    }

    #[test]
    fn finds_plateau_edges() {
        // step(x) == 4 for x in 20..=24
        assert_eq!(first_at_least(0, 100, 4.0, step), Some(20));
        assert_eq!(last_at_most(0, 100, 4.0, step), Some(24));
    }

    #[test]
    fn out_of_range_targets() {
        assert_eq!(first_at_least(0, 100, 100.0, step), None);
        assert_eq!(last_at_most(10, 100, 0.5, step), None);
        assert_eq!(first_at_least(10, 100, -1.0, step), Some(10));
        assert_eq!(last_at_most(0, 100, 1e9, step), Some(100));
    }
}
