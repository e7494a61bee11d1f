//! Easing curves applied to raw linear progress.

/// Overshoot used by the menu item entrance.
pub const ITEM_OVERSHOOT: f64 = 1.4;

/// Overshoot used by the social icon pop-in.
pub const SOCIAL_OVERSHOOT: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ease {
    Linear,
    /// Cubic in-out.
    Power2InOut,
    /// Quartic in-out.
    Power3InOut,
    /// Overshoots past 1.0 before settling.
    BackOut { overshoot: f64 },
}

impl Ease {
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Self::Power3InOut => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
            Self::BackOut { overshoot } => {
                let u = t - 1.0;
                1.0 + (overshoot + 1.0) * u.powi(3) + overshoot * u.powi(2)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [Ease; 4] = [
        Ease::Linear,
        Ease::Power2InOut,
        Ease::Power3InOut,
        Ease::BackOut { overshoot: ITEM_OVERSHOOT },
    ];

    #[test]
    fn endpoints_are_stable() {
        for ease in CURVES {
            assert!(ease.apply(0.0).abs() < 1e-12, "{ease:?} at 0");
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{ease:?} at 1");
        }
    }

    #[test]
    fn input_is_clamped() {
        for ease in CURVES {
            assert!((ease.apply(-3.0) - ease.apply(0.0)).abs() < 1e-12);
            assert!((ease.apply(7.0) - ease.apply(1.0)).abs() < 1e-12);
        }
    }

    #[test]
    fn in_out_curves_are_symmetric_at_midpoint() {
        assert!((Ease::Power2InOut.apply(0.5) - 0.5).abs() < 1e-12);
        assert!((Ease::Power3InOut.apply(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn in_out_curves_are_monotonic() {
        for ease in [Ease::Linear, Ease::Power2InOut, Ease::Power3InOut] {
            let a = ease.apply(0.25);
            let b = ease.apply(0.5);
            let c = ease.apply(0.75);
            assert!(a < b && b < c, "{ease:?}");
        }
    }

    #[test]
    fn back_out_overshoots() {
        let peak = (1..100)
            .map(|i| Ease::BackOut { overshoot: SOCIAL_OVERSHOOT }.apply(f64::from(i) / 100.0))
            .fold(0.0_f64, f64::max);
        assert!(peak > 1.0);
    }
}
