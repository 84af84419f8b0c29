//! Piecewise-linear tabulated functions.
//!
//! Backs the temperature-dependent lattice anisotropy constant: discrete
//! (temperature, constant) samples become a continuous function with flat
//! extrapolation above the last sample.

use spin_types::error::{SpinError, SpinResult};

/// Collects samples point-wise before the interpolation table is built.
#[derive(Debug, Clone, Default)]
pub struct TabulatedBuilder {
    points: Vec<(f64, f64)>,
}

impl TabulatedBuilder {
    pub fn new() -> Self {
        TabulatedBuilder { points: Vec::new() }
    }

    pub fn add_point(&mut self, t: f64, k: f64) {
        self.points.push((t, k));
    }

    /// Compute the per-interval slope/intercept table. Temperatures must be
    /// strictly increasing and every sample finite.
    pub fn build(self) -> SpinResult<TabulatedFunction> {
        if self.points.is_empty() {
            return Err(SpinError::Config(
                "tabulated function needs at least one sample".to_string(),
            ));
        }
        for &(t, k) in &self.points {
            if !t.is_finite() || !k.is_finite() {
                return Err(SpinError::Config(format!(
                    "tabulated sample ({t}, {k}) is not finite"
                )));
            }
        }
        for w in self.points.windows(2) {
            if w[1].0 <= w[0].0 {
                return Err(SpinError::Config(format!(
                    "tabulated temperatures must be strictly increasing ({} then {})",
                    w[0].0, w[1].0
                )));
            }
        }

        let n = self.points.len();
        let mut slope = Vec::with_capacity(n.saturating_sub(1));
        let mut intercept = Vec::with_capacity(n.saturating_sub(1));
        for w in self.points.windows(2) {
            let (t0, k0) = w[0];
            let (t1, k1) = w[1];
            let m = (k1 - k0) / (t1 - t0);
            slope.push(m);
            intercept.push(k0 - m * t0);
        }

        let (t_max, k_tmax) = self.points[n - 1];
        Ok(TabulatedFunction {
            points: self.points,
            slope,
            intercept,
            t_max,
            k_tmax,
        })
    }
}

/// Immutable piecewise-linear function over strictly increasing samples.
///
/// Queries below the first sample return the first constant; queries at or
/// above the last sample return the last constant.
#[derive(Debug, Clone)]
pub struct TabulatedFunction {
    points: Vec<(f64, f64)>,
    slope: Vec<f64>,
    intercept: Vec<f64>,
    t_max: f64,
    k_tmax: f64,
}

impl TabulatedFunction {
    pub fn evaluate(&self, t: f64) -> f64 {
        if t >= self.t_max {
            return self.k_tmax;
        }
        if t <= self.points[0].0 {
            return self.points[0].1;
        }
        // Index of the first sample above t; the bracketing interval starts
        // one sample earlier.
        let upper = self.points.partition_point(|&(ti, _)| ti <= t);
        let interval = upper - 1;
        self.slope[interval] * t + self.intercept[interval]
    }

    pub fn t_max(&self) -> f64 {
        self.t_max
    }

    pub fn k_at_t_max(&self) -> f64 {
        self.k_tmax
    }

    pub fn num_samples(&self) -> usize {
        self.points.len()
    }

    /// Sample the interpolated curve on [0, t_max + step] for diagnostics.
    pub fn sample_curve(&self, step: f64) -> Vec<(f64, f64)> {
        let mut out = Vec::new();
        let mut t = 0.0;
        while t <= self.t_max + step {
            out.push((t, self.evaluate(t)));
            t += step;
        }
        out
    }
}
