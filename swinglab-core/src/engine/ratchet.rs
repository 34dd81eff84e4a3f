//! Trailing-level ratchet.
//!
//! A trailing stop only ever tightens: it rises behind a long position and
//! falls in front of a short one, but never loosens back. The simulator
//! routes every proposed trailing level through [`tighten`], which is the
//! single place the monotonicity invariant lives.

use crate::domain::Side;

/// Combine the current trailing level with a proposed one, keeping the
/// tighter of the two.
///
/// # Example
/// ```
/// use swinglab_core::domain::Side;
/// use swinglab_core::engine::ratchet::tighten;
///
/// let level = tighten(Side::Long, 99.0, 101.0);
/// assert_eq!(level, 101.0);              // raised behind a rising long
/// assert_eq!(tighten(Side::Long, level, 100.0), 101.0); // never drops
/// ```
pub fn tighten(side: Side, current: f64, proposed: f64) -> f64 {
    match side {
        Side::Long => current.max(proposed),
        Side::Short => current.min(proposed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_level_never_drops() {
        let mut level = 95.0;
        let proposals = [96.0, 94.0, 98.5, 97.0, 98.5, 99.0];
        let mut prev = level;
        for p in proposals {
            level = tighten(Side::Long, level, p);
            assert!(level >= prev, "level loosened: {prev} -> {level}");
            prev = level;
        }
        assert_eq!(level, 99.0);
    }

    #[test]
    fn short_level_never_rises() {
        let mut level = 105.0;
        for p in [104.0, 106.0, 101.5, 103.0] {
            let next = tighten(Side::Short, level, p);
            assert!(next <= level);
            level = next;
        }
        assert_eq!(level, 101.5);
    }

    #[test]
    fn equal_proposal_is_a_no_op() {
        assert_eq!(tighten(Side::Long, 100.0, 100.0), 100.0);
        assert_eq!(tighten(Side::Short, 100.0, 100.0), 100.0);
    }
}
