//! Gaussian primitives for sequential Bayesian rating updates
//!
//! Standard normal density and CDF, plus the truncated-Gaussian moment
//! functions used after observing a win, loss or draw. All functions are
//! total over finite inputs with a positive sigma/variance; callers check
//! that precondition before calling in.

use std::f64::consts::{PI, SQRT_2};

/// Below this the CDF is treated as numerically zero
const CDF_FLOOR: f64 = 1e-10;

/// Gaussian probability density at `x`
pub fn density(x: f64, mean: f64, sigma: f64) -> f64 {
    let diff = x - mean;
    (-(diff * diff) / (2.0 * sigma * sigma)).exp() / (sigma * (2.0 * PI).sqrt())
}

/// Error function, Abramowitz & Stegun formula 7.1.26 (|error| <= 1.5e-7)
pub fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    // The rational form leaves ~1e-9 at the origin
    if x == 0.0 {
        return 0.0;
    }

    let sign = if x > 0.0 { 1.0 } else { -1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + P * x);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;
    let y = 1.0 - poly * (-x * x).exp();

    sign * y
}

/// Standard normal cumulative distribution function
pub fn cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / SQRT_2))
}

/// Mean shift of a Gaussian truncated at `t`.
///
/// Evaluated at `z = (mean - t) / sqrt(variance)`. When `cdf(z)` underflows
/// the Mills-ratio bound `-z - 1/z` is used. It stays above the last value
/// before the switch, so a bigger upset never gets a smaller shift.
pub fn v(t: f64, mean: f64, variance: f64) -> f64 {
    let z = (mean - t) / variance.sqrt();
    let denom = cdf(z);
    if denom > CDF_FLOOR {
        density(z, 0.0, 1.0) / denom
    } else {
        -z - 1.0 / z
    }
}

/// Variance shrink factor of a Gaussian truncated at `t`, in `(0, 1]`.
///
/// A value outside that range means `v` is broken and must not be used to
/// update a belief.
pub fn w(t: f64, mean: f64, variance: f64) -> f64 {
    let z = (mean - t) / variance.sqrt();
    if cdf(z) <= CDF_FLOOR {
        return 1.0;
    }
    let v = v(t, mean, variance);
    v * (v + z)
}

/// Mean shift of a Gaussian truncated to `[-epsilon, epsilon]`, for draws.
///
/// Odd in `t`: a team that was ahead (`t > 0`) shifts down and the team
/// that was behind shifts up by the same normalised amount.
pub fn v_draw(t: f64, epsilon: f64) -> f64 {
    let abs_t = t.abs();
    let upper = epsilon - abs_t;
    let lower = -epsilon - abs_t;
    let denom = cdf(upper) - cdf(lower);

    let magnitude = if denom > CDF_FLOOR {
        (density(lower, 0.0, 1.0) - density(upper, 0.0, 1.0)) / denom
    } else {
        upper
    };

    if t < 0.0 {
        -magnitude
    } else {
        magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    #[test]
    fn test_erf_fixed_points() {
        assert_eq!(erf(0.0), 0.0);
        assert_eq!(cdf(0.0), 0.5);
        assert!((erf(1.0) - 0.8427007929).abs() < 2e-7);
        assert!((erf(3.0) - 0.9999779095).abs() < 2e-7);
    }

    #[test]
    fn test_erf_is_odd() {
        for x in [0.1, 0.5, 1.0, 2.5, 4.0, 10.0] {
            assert_eq!(erf(-x), -erf(x));
        }
    }

    #[test]
    fn test_cdf_known_values() {
        assert!((cdf(1.0) - 0.8413447).abs() < EPS);
        assert!((cdf(-1.96) - 0.0249979).abs() < EPS);
        assert!((cdf(1.0) + cdf(-1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_density_peaks_at_mean() {
        let peak = density(5.0, 5.0, 2.0);
        assert!((peak - 1.0 / (2.0 * (2.0 * PI).sqrt())).abs() < 1e-12);
        for x in [-100.0, 0.0, 4.9, 5.1, 7.0, 1e6] {
            assert!(density(x, 5.0, 2.0) <= peak);
        }
        assert_eq!(density(3.0, 5.0, 2.0), density(7.0, 5.0, 2.0));
    }

    #[test]
    fn test_v_at_zero() {
        // pdf(0) / 0.5
        let expected = 2.0 / (2.0 * PI).sqrt();
        assert!((v(0.0, 0.0, 1.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_v_decreases_with_lead() {
        let trailing = v(0.0, -1.0, 1.0);
        let even = v(0.0, 0.0, 1.0);
        let leading = v(0.0, 1.0, 1.0);
        assert!(trailing > even);
        assert!(even > leading);
        assert!(leading > 0.0);
    }

    #[test]
    fn test_v_fallback_stays_positive() {
        // cdf(-40) underflows; the asymptote takes over
        let shift = v(40.0, 0.0, 1.0);
        assert_eq!(shift, 40.0 + 1.0 / 40.0);
    }

    #[test]
    fn test_v_grows_with_upset_across_floor() {
        let mut previous = v(0.0, 0.0, 1.0);
        let mut z = 0.0;
        while z > -12.0 {
            z -= 0.001;
            let shift = v(0.0, z, 1.0);
            assert!(shift >= previous, "v({}) = {} < {}", z, shift, previous);
            previous = shift;
        }
        assert!(v(0.0, -6.4, 1.0) > v(0.0, -6.3, 1.0));
    }

    #[test]
    fn test_v_respects_variance() {
        // z = (2 - 0) / 2 = 1 either way
        assert!((v(0.0, 2.0, 4.0) - v(0.0, 1.0, 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_w_in_unit_interval() {
        for mean in [-3.0, -2.0, -0.5, 0.0, 0.5, 2.0, 3.0] {
            let shrink = w(0.0, mean, 1.0);
            assert!(shrink > 0.0 && shrink <= 1.0, "w={} at mean={}", shrink, mean);
        }
        assert_eq!(w(50.0, 0.0, 1.0), 1.0);
    }

    #[test]
    fn test_v_draw_is_odd() {
        for t in [0.1, 0.7, 1.5, 3.0] {
            assert_eq!(v_draw(-t, 0.5), -v_draw(t, 0.5));
        }
        assert_eq!(v_draw(0.0, 0.5), 0.0);
        assert!(v_draw(1.0, 0.5) < 0.0);
    }

    #[test]
    fn test_v_draw_without_margin_falls_back() {
        assert_eq!(v_draw(0.0, 0.0), 0.0);
        assert_eq!(v_draw(2.0, 0.0), -2.0);
        assert_eq!(v_draw(-2.0, 0.0), 2.0);
    }
}
