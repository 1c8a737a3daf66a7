//! Scaled fixed-point integers for the damage pipeline
//!
//! Damage dice are adjusted as an *average die value* rather than as sides.
//! The average starts inflated by 10, each slay/brand multiplier (itself x10)
//! adds another factor of 10 and each percentage factor adds a factor of 100.
//! [`ScaledInt::collapse_to_sides`] turns the result back into integer die
//! sides with stochastic rounding so the expected value is preserved.

use std::fmt;

use fa_rng::RandomSource;

/// An integer carrying an explicit scale factor: the real value is
/// `raw / scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaledInt {
    raw: i64,
    scale: i64,
}

impl ScaledInt {
    /// Scale of a freshly computed die average
    pub const DIE_SCALE: i64 = 10;
    /// Scale added by a x10 multiplier
    pub const MULTIPLIER_SCALE: i64 = 10;
    /// Scale added by a percentage factor
    pub const PERCENT_SCALE: i64 = 100;

    pub const fn new(raw: i64, scale: i64) -> Self {
        Self { raw, scale }
    }

    /// Average roll of a die with `sides` sides, x10
    pub const fn die_average(sides: i32) -> Self {
        Self::new((10 * (sides as i64 + 1)) / 2, Self::DIE_SCALE)
    }

    pub const fn raw(self) -> i64 {
        self.raw
    }

    pub const fn scale(self) -> i64 {
        self.scale
    }

    /// Multiply by a x10 multiplier (10 = unchanged)
    pub const fn apply_multiplier(self, mul: i32) -> Self {
        Self::new(self.raw * mul as i64, self.scale * Self::MULTIPLIER_SCALE)
    }

    /// Multiply by a percentage factor (100 = unchanged)
    pub const fn apply_percent(self, factor: i32) -> Self {
        Self::new(self.raw * factor as i64, self.scale * Self::PERCENT_SCALE)
    }

    /// The same scale, zero value
    pub const fn zeroed(self) -> Self {
        Self::new(0, self.scale)
    }

    /// Convert an average die value back into die sides.
    ///
    /// A die with `s` sides averages `(s + 1) / 2`, so `s = 2 * avg - 1`.
    /// The fractional part of `s` becomes the probability of rounding up.
    /// Never returns a negative side count.
    pub fn collapse_to_sides(self, rng: &mut dyn RandomSource) -> i32 {
        if self.scale <= 0 {
            return 0;
        }
        let temp = 2 * self.raw - self.scale;
        if temp <= 0 {
            return 0;
        }
        let mut sides = temp / self.scale;
        let carry = temp % self.scale;
        if carry > 0 && (rng.randint0(self.scale.min(i32::MAX as i64) as i32) as i64) < carry {
            sides += 1;
        }
        sides.min(i32::MAX as i64) as i32
    }
}

impl fmt::Display for ScaledInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.raw, self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fa_rng::{GameRng, ScriptedRng};

    #[test]
    fn test_die_average() {
        assert_eq!(ScaledInt::die_average(5), ScaledInt::new(30, 10));
        assert_eq!(ScaledInt::die_average(4), ScaledInt::new(25, 10));
    }

    #[test]
    fn test_exact_collapse() {
        // d5, doubled by a x20 slay, no deadliness: d11
        let avg = ScaledInt::die_average(5).apply_multiplier(20).apply_percent(100);
        let mut rng = ScriptedRng::new(Vec::<i32>::new());
        assert_eq!(avg.collapse_to_sides(&mut rng), 11);
        assert_eq!(rng.trace().len(), 0);
    }

    #[test]
    fn test_collapse_unchanged_die() {
        let avg = ScaledInt::die_average(8).apply_multiplier(10).apply_percent(100);
        let mut rng = GameRng::new(1);
        assert_eq!(avg.collapse_to_sides(&mut rng), 8);
    }

    #[test]
    fn test_stochastic_carry() {
        // avg 3.0 * 1.55 = 4.65, so sides = 8.3
        let avg = ScaledInt::die_average(5).apply_multiplier(10).apply_percent(155);
        assert_eq!(avg.raw(), 46500);
        let mut low = ScriptedRng::new([0]);
        let mut high = ScriptedRng::new([9999]);
        assert_eq!(avg.collapse_to_sides(&mut low), 9);
        assert_eq!(avg.collapse_to_sides(&mut high), 8);
    }

    #[test]
    fn test_zero_never_negative() {
        let avg = ScaledInt::die_average(5).apply_multiplier(10).apply_percent(0);
        let mut rng = GameRng::new(3);
        assert_eq!(avg.collapse_to_sides(&mut rng), 0);
        assert_eq!(avg.zeroed().raw(), 0);
    }

    #[test]
    fn test_expected_value_preserved() {
        let avg = ScaledInt::die_average(5).apply_multiplier(10).apply_percent(155);
        let mut rng = GameRng::new(99);
        let n = 20_000;
        let total: i64 = (0..n).map(|_| avg.collapse_to_sides(&mut rng) as i64).sum();
        let mean = total as f64 / n as f64;
        assert!((mean - 8.3).abs() < 0.05, "mean {}", mean);
    }
}
