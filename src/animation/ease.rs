/// Easing curves used by the caption styles.
///
/// `apply` clamps its input to `[0, 1]`. Output is not clamped: back-out beziers
/// overshoot past 1 on purpose.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
    BounceOut,
}

impl Ease {
    /// Ease-out-expo approximation used by most entrances.
    pub const OUT_EXPO: Self = Self::CubicBezier {
        x1: 0.16,
        y1: 1.0,
        x2: 0.3,
        y2: 1.0,
    };

    /// Back-out with overshoot (Flare Zoom).
    pub const BACK_OUT: Self = Self::CubicBezier {
        x1: 0.34,
        y1: 1.56,
        x2: 0.64,
        y2: 1.0,
    };

    /// CSS `ease-in`.
    pub const IN: Self = Self::CubicBezier {
        x1: 0.42,
        y1: 0.0,
        x2: 1.0,
        y2: 1.0,
    };

    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier_ease(t, x1, y1, x2, y2),
            Self::BounceOut => bounce_out(t),
        }
    }
}

/// How [`interpolate`] treats inputs outside the input range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extrapolate {
    Extend,
    ClampLeft,
    ClampRight,
    Clamp,
}

impl Extrapolate {
    fn clamps_left(self) -> bool {
        matches!(self, Self::ClampLeft | Self::Clamp)
    }

    fn clamps_right(self) -> bool {
        matches!(self, Self::ClampRight | Self::Clamp)
    }
}

/// Map `x` from `input` onto `output`, easing the normalized progress.
///
/// Progress outside `[0, 1]` (when not clamped) extends linearly. A degenerate
/// input range resolves to whichever endpoint `x` has reached.
pub fn interpolate(
    x: f64,
    input: [f64; 2],
    output: [f64; 2],
    ease: Ease,
    extrapolate: Extrapolate,
) -> f64 {
    let [x0, x1] = input;
    let [y0, y1] = output;
    if x1 <= x0 {
        return if x >= x1 { y1 } else { y0 };
    }

    let mut t = (x - x0) / (x1 - x0);
    if t < 0.0 && extrapolate.clamps_left() {
        t = 0.0;
    }
    if t > 1.0 && extrapolate.clamps_right() {
        t = 1.0;
    }
    let te = if (0.0..=1.0).contains(&t) {
        ease.apply(t)
    } else {
        t
    };
    y0 + (y1 - y0) * te
}

/// Piecewise-linear interpolation across several stops (clamped at both ends).
pub fn interpolate_stops(x: f64, input: &[f64], output: &[f64]) -> f64 {
    let n = input.len().min(output.len());
    if n == 0 {
        return 0.0;
    }
    if x <= input[0] {
        return output[0];
    }
    for i in 1..n {
        if x <= input[i] {
            return interpolate(
                x,
                [input[i - 1], input[i]],
                [output[i - 1], output[i]],
                Ease::Linear,
                Extrapolate::Clamp,
            );
        }
    }
    output[n - 1]
}

fn cubic_bezier_ease(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    // CSS cubic-bezier: given x in [0,1], solve u such that bx(u)=x, then return by(u).
    fn sample_curve(a1: f64, a2: f64, t: f64) -> f64 {
        let omt = 1.0 - t;
        3.0 * omt * omt * t * a1 + 3.0 * omt * t * t * a2 + t * t * t
    }
    fn sample_curve_derivative(a1: f64, a2: f64, t: f64) -> f64 {
        let omt = 1.0 - t;
        3.0 * omt * omt * a1 + 6.0 * omt * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
    }

    let mut t = x;
    for _ in 0..8 {
        let x_t = sample_curve(x1, x2, t) - x;
        let d = sample_curve_derivative(x1, x2, t);
        if d.abs() < 1e-7 {
            break;
        }
        t = (t - x_t / d).clamp(0.0, 1.0);
    }

    // Bisection refine around the Newton estimate.
    let mut lo = (t - 0.05).max(0.0);
    let mut hi = (t + 0.05).min(1.0);
    if sample_curve(x1, x2, lo) > x {
        lo = 0.0;
    }
    if sample_curve(x1, x2, hi) < x {
        hi = 1.0;
    }
    for _ in 0..24 {
        let mid = 0.5 * (lo + hi);
        if sample_curve(x1, x2, mid) < x {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    sample_curve(y1, y2, 0.5 * (lo + hi))
}

fn bounce_out(t: f64) -> f64 {
    let n1 = 7.5625;
    let d1 = 2.75;

    if t < 1.0 / d1 {
        n1 * t * t
    } else if t < 2.0 / d1 {
        let t = t - 1.5 / d1;
        n1 * t * t + 0.75
    } else if t < 2.5 / d1 {
        let t = t - 2.25 / d1;
        n1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / d1;
        n1 * t * t + 0.984375
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 5] = [
        Ease::Linear,
        Ease::OUT_EXPO,
        Ease::BACK_OUT,
        Ease::IN,
        Ease::BounceOut,
    ];

    #[test]
    fn endpoints_are_stable() {
        for ease in ALL {
            assert!(ease.apply(0.0).abs() < 1e-9, "{ease:?}");
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-9, "{ease:?}");
        }
    }

    #[test]
    fn out_expo_front_loads_progress() {
        assert!(Ease::OUT_EXPO.apply(0.25) > 0.7);
        assert!(Ease::IN.apply(0.25) < 0.25);
    }

    #[test]
    fn back_out_overshoots() {
        let peak = (1..100)
            .map(|i| Ease::BACK_OUT.apply(i as f64 / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn interpolate_clamps_per_side() {
        let v = interpolate(-5.0, [0.0, 10.0], [0.0, 1.0], Ease::Linear, Extrapolate::ClampRight);
        assert!((v + 0.5).abs() < 1e-9);
        let v = interpolate(20.0, [0.0, 10.0], [0.0, 1.0], Ease::Linear, Extrapolate::ClampRight);
        assert_eq!(v, 1.0);
        let v = interpolate(20.0, [0.0, 10.0], [0.0, 1.0], Ease::Linear, Extrapolate::Extend);
        assert!((v - 2.0).abs() < 1e-9);
    }

    #[test]
    fn interpolate_degenerate_range_does_not_divide_by_zero() {
        let v = interpolate(0.0, [0.0, 0.0], [3.0, 7.0], Ease::OUT_EXPO, Extrapolate::Clamp);
        assert_eq!(v, 7.0);
        let v = interpolate(-1.0, [0.0, 0.0], [3.0, 7.0], Ease::Linear, Extrapolate::Clamp);
        assert_eq!(v, 3.0);
    }

    #[test]
    fn stops_interpolate_piecewise() {
        let input = [0.0, 2.0, 8.0, 10.0];
        let output = [0.0, 1.0, 1.0, 0.0];
        assert_eq!(interpolate_stops(-1.0, &input, &output), 0.0);
        assert!((interpolate_stops(1.0, &input, &output) - 0.5).abs() < 1e-9);
        assert_eq!(interpolate_stops(5.0, &input, &output), 1.0);
        assert!((interpolate_stops(9.0, &input, &output) - 0.5).abs() < 1e-9);
        assert_eq!(interpolate_stops(11.0, &input, &output), 0.0);
    }
}
