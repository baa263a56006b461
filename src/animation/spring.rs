use crate::foundation::core::Fps;

/// Damped harmonic oscillator driven from 0 toward a rest value of 1.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Spring {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl Spring {
    /// Elastic Pop tuning: underdamped, one visible overshoot.
    pub const ELASTIC_POP: Self = Self {
        stiffness: 180.0,
        damping: 12.0,
        mass: 1.0,
    };

    /// Spring value at `frame` (frames before 0 sample as 0).
    pub fn value(self, frame: i64, fps: Fps) -> f64 {
        if frame <= 0 {
            return 0.0;
        }
        self.step(frame as f64 * fps.frame_duration_secs())
    }

    /// Step response at `t` seconds with x(0)=0, v(0)=0.
    pub fn step(self, t: f64) -> f64 {
        let k = self.stiffness.max(0.0);
        let c = self.damping.max(0.0);
        let m = self.mass.max(1e-9);

        let w0 = (k / m).sqrt();
        if w0 == 0.0 {
            return 1.0;
        }
        let zeta = c / (2.0 * (k * m).sqrt()).max(1e-9);

        if (zeta - 1.0).abs() < 1e-6 {
            // Critically damped.
            let e = (-w0 * t).exp();
            1.0 - e * (1.0 + w0 * t)
        } else if zeta < 1.0 {
            let wd = w0 * (1.0 - zeta * zeta).sqrt();
            let e = (-zeta * w0 * t).exp();
            let c1 = (wd * t).cos();
            let s1 = (wd * t).sin();
            let k = zeta / (1.0 - zeta * zeta).sqrt();
            1.0 - e * (c1 + k * s1)
        } else {
            let z2 = (zeta * zeta - 1.0).sqrt();
            let r1 = -w0 * (zeta - z2);
            let r2 = -w0 * (zeta + z2);
            let c2 = (zeta + z2) / (2.0 * z2);
            let c1 = (zeta - z2) / (2.0 * z2);
            1.0 - (c2 * (r1 * t).exp() - c1 * (r2 * t).exp())
        }
    }
}
