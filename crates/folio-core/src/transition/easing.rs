//! Easing curves for page-turn progress

pub use crate::config::EasingType;

pub trait EasingTypeExt {
    /// Eased value of raw progress `t`, both in [0, 1]
    fn apply(&self, t: f64) -> f64;
}

impl EasingTypeExt for EasingType {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::Linear => t,
            EasingType::EaseInOut => quad_ease_in_out(t),
        }
    }
}

/// Quadratic ease-in-out: 2t² below the midpoint, 1 - (-2t+2)²/2 above
#[inline]
pub fn quad_ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        let k = -2.0 * t + 2.0;
        1.0 - k * k / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curves_start_and_end_on_bounds() {
        for easing in [EasingType::Linear, EasingType::EaseInOut] {
            assert_eq!(easing.apply(0.0), 0.0, "{:?}", easing);
            assert_eq!(easing.apply(1.0), 1.0, "{:?}", easing);
        }
    }

    #[test]
    fn test_ease_in_out_is_monotonic() {
        let values: Vec<f64> = (0..=20).map(|i| quad_ease_in_out(i as f64 / 20.0)).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_ease_in_out_shape() {
        assert!((quad_ease_in_out(0.25) - 0.125).abs() < 1e-9);
        assert!((quad_ease_in_out(0.5) - 0.5).abs() < 1e-9);
        assert!((quad_ease_in_out(0.75) - 0.875).abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(EasingType::EaseInOut.apply(-1.0), 0.0);
        assert_eq!(EasingType::EaseInOut.apply(3.0), 1.0);
        assert_eq!(EasingType::Linear.apply(1.5), 1.0);
    }
}
