//! # Table Interpolation
//!
//! Almost every coefficient in the wind provisions is tabulated against one or
//! two geometric ratios and read by straight-line interpolation. This module
//! provides:
//!
//! - [`interpolate`] - one-axis piecewise-linear lookup with flat extrapolation
//! - [`interpolate_log`] - the same on a log10 axis (C&C effective area)
//! - [`Grid`] - an N-axis lookup over an ordered grid, used for the two-stage
//!   tables (slope then h/L, area then height, aspect then clearance)
//!
//! ## Example
//!
//! ```rust
//! use wind_core::interpolation::{interpolate, Axis, Grid};
//!
//! let xs = [0.0, 1.0, 2.0, 4.0];
//! let ys = [-0.5, -0.5, -0.3, -0.2];
//! assert_eq!(interpolate(2.0, &xs, &ys), -0.3);
//! assert_eq!(interpolate(9.0, &xs, &ys), -0.2);
//!
//! let grid = Grid::new(
//!     vec![Axis::linear(&[0.0, 1.0]), Axis::linear(&[0.0, 10.0])],
//!     vec![0.0, 10.0, 100.0, 110.0],
//! );
//! assert!((grid.lookup(&[0.5, 5.0]) - 55.0).abs() < 1e-12);
//! ```

/// Piecewise-linear interpolation with flat extrapolation.
///
/// `xs` must be ascending and the same length as `ys`. Returns `ys[0]` below
/// the first sample and the last `ys` above the last sample. A sample may be
/// repeated to encode a step; the step value applies from that sample on. Returns `NaN`
/// when no bracketing interval exists (empty or mismatched tables, NaN `x`).
pub fn interpolate(x: f64, xs: &[f64], ys: &[f64]) -> f64 {
    if xs.is_empty() || xs.len() != ys.len() {
        return f64::NAN;
    }
    let last = xs.len() - 1;
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[last] {
        return ys[last];
    }
    // intervals are closed on the left, so a repeated sample reads the later value
    for i in 0..last {
        let (x0, x1) = (xs[i], xs[i + 1]);
        if x >= x0 && x < x1 {
            let t = (x - x0) / (x1 - x0);
            return ys[i] + t * (ys[i + 1] - ys[i]);
        }
    }
    f64::NAN
}

/// Interpolate on a base-10 logarithmic `x` axis.
///
/// Non-positive `x` clamps to the first sample. `xs` must be positive.
pub fn interpolate_log(x: f64, xs: &[f64], ys: &[f64]) -> f64 {
    if x <= 0.0 {
        return ys.first().copied().unwrap_or(f64::NAN);
    }
    let log_xs: Vec<f64> = xs.iter().map(|v| v.log10()).collect();
    interpolate(x.log10(), &log_xs, ys)
}

/// Spacing of one grid axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisScale {
    Linear,
    /// Interpolate on log10 of the coordinate
    Log10,
}

/// One ordered axis of a [`Grid`]
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub samples: Vec<f64>,
    pub scale: AxisScale,
}

impl Axis {
    pub fn linear(samples: &[f64]) -> Self {
        Axis {
            samples: samples.to_vec(),
            scale: AxisScale::Linear,
        }
    }

    pub fn log10(samples: &[f64]) -> Self {
        Axis {
            samples: samples.to_vec(),
            scale: AxisScale::Log10,
        }
    }

    fn read(&self, x: f64, ys: &[f64]) -> f64 {
        match self.scale {
            AxisScale::Linear => interpolate(x, &self.samples, ys),
            AxisScale::Log10 => interpolate_log(x, &self.samples, ys),
        }
    }
}

/// N-axis piecewise-linear lookup table.
///
/// Values are stored row-major: the last axis varies fastest. A lookup
/// collapses the grid one axis at a time, so every axis gets the same
/// clamping behavior as [`interpolate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    axes: Vec<Axis>,
    values: Vec<f64>,
}

impl Grid {
    pub fn new(axes: Vec<Axis>, values: Vec<f64>) -> Self {
        debug_assert_eq!(
            axes.iter().map(|a| a.samples.len()).product::<usize>(),
            values.len(),
            "grid shape does not match value count"
        );
        Grid { axes, values }
    }

    /// Number of axes
    pub fn rank(&self) -> usize {
        self.axes.len()
    }

    /// Look up the value at `point` (one coordinate per axis).
    ///
    /// Returns `NaN` if the point has the wrong dimension or the table is
    /// malformed.
    pub fn lookup(&self, point: &[f64]) -> f64 {
        let expected: usize = self.axes.iter().map(|a| a.samples.len()).product();
        if point.len() != self.axes.len() || self.axes.is_empty() || expected != self.values.len() {
            return f64::NAN;
        }
        self.collapse(0, 0, point)
    }

    fn collapse(&self, depth: usize, offset: usize, point: &[f64]) -> f64 {
        let axis = &self.axes[depth];
        let n = axis.samples.len();
        if depth + 1 == self.axes.len() {
            return axis.read(point[depth], &self.values[offset..offset + n]);
        }
        let stride: usize = self.axes[depth + 1..].iter().map(|a| a.samples.len()).product();
        let ys: Vec<f64> = (0..n)
            .map(|i| self.collapse(depth + 1, offset + i * stride, point))
            .collect();
        axis.read(point[depth], &ys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XS: [f64; 4] = [0.0, 1.0, 2.0, 4.0];
    const YS: [f64; 4] = [-0.5, -0.5, -0.3, -0.2];

    #[test]
    fn test_endpoints_exact() {
        assert_eq!(interpolate(XS[0], &XS, &YS), YS[0]);
        assert_eq!(interpolate(XS[3], &XS, &YS), YS[3]);
    }

    #[test]
    fn test_flat_extrapolation() {
        assert_eq!(interpolate(-10.0, &XS, &YS), -0.5);
        assert_eq!(interpolate(100.0, &XS, &YS), -0.2);
    }

    #[test]
    fn test_midpoint_blend() {
        assert!((interpolate(3.0, &XS, &YS) - (-0.25)).abs() < 1e-12);
    }

    #[test]
    fn test_monotone_between_samples() {
        let xs = [0.1, 0.3, 0.7];
        let ys = [2.0, 1.8, 1.6];
        let mut prev = interpolate(0.1, &xs, &ys);
        let mut x = 0.1;
        while x <= 0.7 {
            let y = interpolate(x, &xs, &ys);
            assert!(y <= prev + 1e-12);
            prev = y;
            x += 0.01;
        }
    }

    #[test]
    fn test_degenerate_inputs_return_sentinel() {
        assert!(interpolate(1.0, &[], &[]).is_nan());
        assert!(interpolate(1.0, &[0.0, 1.0], &[1.0]).is_nan());
        assert!(interpolate(f64::NAN, &XS, &YS).is_nan());
    }

    #[test]
    fn test_duplicate_samples() {
        let xs = [0.0, 0.2, 0.2, 0.6];
        let ys = [-0.9, -0.9, 0.0, 0.95];
        assert_eq!(interpolate(0.1, &xs, &ys), -0.9);
        assert_eq!(interpolate(0.2, &xs, &ys), 0.0);
        assert!((interpolate(0.4, &xs, &ys) - 0.475).abs() < 1e-12);
        assert!((interpolate(0.199999, &xs, &ys) - (-0.9)).abs() < 1e-12);
    }

    #[test]
    fn test_log_interpolation() {
        let xs = [10.0, 100.0];
        let ys = [-1.8, -1.1];
        // halfway in log space
        let mid = 10f64.powf(1.5);
        assert!((interpolate_log(mid, &xs, &ys) - (-1.45)).abs() < 1e-9);
        assert_eq!(interpolate_log(0.0, &xs, &ys), -1.8);
        assert_eq!(interpolate_log(1000.0, &xs, &ys), -1.1);
    }

    #[test]
    fn test_grid_matches_single_axis() {
        let grid = Grid::new(vec![Axis::linear(&XS)], YS.to_vec());
        assert_eq!(grid.rank(), 1);
        assert_eq!(grid.lookup(&[2.0]), -0.3);
    }

    #[test]
    fn test_grid_three_axes() {
        // f(x, y, z) = x + 10y + 100z is reproduced exactly by trilinear blend
        let axes = vec![
            Axis::linear(&[0.0, 1.0]),
            Axis::linear(&[0.0, 1.0]),
            Axis::linear(&[0.0, 1.0]),
        ];
        let mut values = Vec::new();
        for x in [0.0, 1.0] {
            for y in [0.0, 1.0] {
                for z in [0.0, 1.0] {
                    values.push(x + 10.0 * y + 100.0 * z);
                }
            }
        }
        let grid = Grid::new(axes, values);
        assert!((grid.lookup(&[0.25, 0.5, 0.75]) - 80.25).abs() < 1e-12);
    }

    #[test]
    fn test_grid_wrong_dimension() {
        let grid = Grid::new(vec![Axis::linear(&XS)], YS.to_vec());
        assert!(grid.lookup(&[1.0, 2.0]).is_nan());
    }
}
