// Easing curves used by the timeline and the uniform blend.
//
// All inputs are sanitized first: NaN maps to 0 and values are clamped to
// \[0, 1\], so callers can feed raw progress without checking it.

/// Clamp to \[0, 1\], mapping NaN to 0.
#[inline]
pub fn clamp01(x: f32) -> f32 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Standard cubic ease `3x² - 2x³`.
#[inline]
pub fn smoothstep(x: f32) -> f32 {
    let t = clamp01(x);
    t * t * (3.0 - 2.0 * t)
}

/// Delayed ramp: 0 until `x` passes `threshold`, then rises to 1 as a power curve.
#[inline]
pub fn delayed_ramp(x: f32, threshold: f32, exponent: f32) -> f32 {
    let span = (1.0 - threshold).max(f32::EPSILON);
    clamp01((clamp01(x) - threshold) / span).powf(exponent)
}

/// Cubic in-out, matching the `power2.inOut` curve name used by tween libraries.
#[inline]
pub fn power2_in_out(x: f32) -> f32 {
    let t = clamp01(x);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[inline]
pub fn power1_out(x: f32) -> f32 {
    let t = clamp01(x);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Exponential-out curve used by the smooth scroll engine.
#[inline]
pub fn expo_out(x: f64) -> f64 {
    if x.is_nan() {
        return 0.0;
    }
    (1.001 - 2f64.powf(-10.0 * x.clamp(0.0, 1.0))).min(1.0)
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
