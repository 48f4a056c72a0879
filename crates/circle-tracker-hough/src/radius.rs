use serde::{Deserialize, Serialize};

/// Evenly spaced candidate radii starting at `r_min`.
///
/// The step is `max(1, round((r_max - r_min) / 25))`, so a range is never
/// split into much more than 26 buckets. The last radius may fall short of
/// `r_max` by up to `r_step - 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadiusRange {
    pub r_min: u32,
    pub r_step: u32,
    pub num_radii: usize,
}

impl RadiusRange {
    /// Target bucket count used to derive the step.
    pub const BUCKETS: u64 = 25;

    /// Build the range for `[r_min, r_max]`.
    ///
    /// `r_min` is clamped to 1. An empty range is returned when
    /// `r_max <= r_min`.
    pub fn new(r_min: u32, r_max: u32) -> Self {
        let r_min = r_min.max(1);
        if r_max <= r_min {
            return Self {
                r_min,
                r_step: 1,
                num_radii: 0,
            };
        }
        let span = (r_max - r_min) as u64;
        // round(span / 25), halves rounding up, in integer arithmetic
        let r_step = ((2 * span + Self::BUCKETS) / (2 * Self::BUCKETS)).max(1);
        Self {
            r_min,
            r_step: r_step as u32,
            num_radii: (span / r_step) as usize + 1,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_radii == 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.num_radii
    }

    /// Radius of bucket `ri`.
    #[inline]
    pub fn radius(&self, ri: usize) -> u32 {
        self.r_min + ri as u32 * self.r_step
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.num_radii).map(|ri| self.radius(ri))
    }

    /// Largest generated radius, if any.
    pub fn last(&self) -> Option<u32> {
        self.num_radii.checked_sub(1).map(|ri| self.radius(ri))
    }

    /// Votes a perfect circle of bucket `ri` would collect: `ceil(2*pi*r)`.
    #[inline]
    pub fn max_possible_votes(&self, ri: usize) -> u32 {
        (std::f64::consts::TAU * self.radius(ri) as f64).ceil() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_range_is_quantized() {
        let range = RadiusRange::new(20, 180);
        assert_eq!(range.r_step, 6);
        assert_eq!(range.num_radii, 27);
        assert_eq!(range.last(), Some(176));
    }

    #[test]
    fn narrow_range_uses_unit_step() {
        let range = RadiusRange::new(10, 20);
        assert_eq!(range.r_step, 1);
        assert_eq!(range.num_radii, 11);
        assert_eq!(range.iter().collect::<Vec<_>>(), (10..=20).collect::<Vec<_>>());
    }

    #[test]
    fn step_rounds_to_nearest() {
        // 63 / 25 = 2.52
        assert_eq!(RadiusRange::new(1, 64).r_step, 3);
        // 37 / 25 = 1.48
        assert_eq!(RadiusRange::new(1, 38).r_step, 1);
        // 38 / 25 = 1.52
        assert_eq!(RadiusRange::new(1, 39).r_step, 2);
    }

    #[test]
    fn degenerate_ranges_are_empty() {
        assert!(RadiusRange::new(30, 30).is_empty());
        assert!(RadiusRange::new(40, 10).is_empty());
        assert_eq!(RadiusRange::new(40, 10).last(), None);
        let clamped = RadiusRange::new(0, 5);
        assert_eq!(clamped.r_min, 1);
        assert_eq!(clamped.num_radii, 5);
    }

    #[test]
    fn max_possible_votes_is_circumference_ceiling() {
        let range = RadiusRange::new(1, 10);
        assert_eq!(range.max_possible_votes(0), 7);
        assert_eq!(range.max_possible_votes(9), 63);
    }
}
