use crate::foundation::core::Fps;

/// Damped harmonic oscillator parameters driving a unit step from 0 to 1.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringConfig {
    /// Spring constant `k`.
    pub stiffness: f64,
    /// Damping coefficient `c`.
    pub damping: f64,
    /// Oscillating mass `m`.
    #[serde(default = "default_mass")]
    pub mass: f64,
}

fn default_mass() -> f64 {
    1.0
}

impl SpringConfig {
    /// Fast, slightly overshooting settle used when a content item appears.
    pub const POP_IN: Self = Self {
        stiffness: 200.0,
        damping: 12.0,
        mass: 1.0,
    };

    /// Soft overdamped settle used for scroll contribution; never overshoots.
    pub const SCROLL: Self = Self {
        stiffness: 80.0,
        damping: 20.0,
        mass: 1.0,
    };

    /// `ζ = c / (2·sqrt(k·m))`. Below 1 the response overshoots.
    pub fn damping_ratio(self) -> f64 {
        let k = self.stiffness.max(0.0);
        let m = self.mass.max(1e-9);
        self.damping.max(0.0) / (2.0 * (k * m).sqrt()).max(1e-9)
    }

    pub(crate) fn is_valid(self) -> bool {
        [self.stiffness, self.damping, self.mass]
            .iter()
            .all(|v| v.is_finite())
            && self.stiffness > 0.0
            && self.damping >= 0.0
            && self.mass > 0.0
    }
}

/// Spring progress `elapsed_frames` after the driving event.
///
/// Returns `0.0` while the event lies in the future (`elapsed_frames < 0`). The result
/// depends only on the arguments, so frames may be evaluated in any order.
pub fn spring_progress(elapsed_frames: i64, fps: Fps, config: SpringConfig) -> f64 {
    if elapsed_frames < 0 {
        return 0.0;
    }
    spring_step(
        fps.signed_frames_to_secs(elapsed_frames),
        config.stiffness,
        config.damping,
        config.mass,
    )
}

fn spring_step(t: f64, stiffness: f64, damping: f64, mass: f64) -> f64 {
    // Step response from 0 to 1 with x(0)=0, v(0)=0.
    let k = stiffness.max(0.0);
    let c = damping.max(0.0);
    let m = mass.max(1e-9);

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
        // Underdamped.
        let wd = w0 * (1.0 - zeta * zeta).sqrt();
        let e = (-zeta * w0 * t).exp();
        let k = zeta / (1.0 - zeta * zeta).sqrt();
        1.0 - e * ((wd * t).cos() + k * (wd * t).sin())
    } else {
        // Overdamped.
        let z2 = (zeta * zeta - 1.0).sqrt();
        let r1 = -w0 * (zeta - z2);
        let r2 = -w0 * (zeta + z2);
        let c2 = (zeta + z2) / (2.0 * z2);
        let c1 = (zeta - z2) / (2.0 * z2);
        1.0 - (c2 * (r1 * t).exp() - c1 * (r2 * t).exp())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
