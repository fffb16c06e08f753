//! Descriptive statistics, density, spectrum and autocorrelation of a trajectory.
//!
//! Every function borrows the trajectory immutably and owns its output
//! buffers, so any of them may run concurrently on the same trajectory.

use crate::error::{AttractorError, Result};
use crate::types::{Axis, Point3, Trajectory};
use num_complex::Complex;
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_KDE_SAMPLES: usize = 1000;
pub const DEFAULT_FFT_SIZE: usize = 4096;

/// Floor added to normalized magnitudes before taking logarithms.
const SPECTRUM_FLOOR: f64 = f32::EPSILON as f64;

/// Per-axis extremes of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMax {
    pub min: Point3,
    pub max: Point3,
}

/// Population moments of a sample.
///
/// Skewness and kurtosis are the biased Fisher definitions; kurtosis is the
/// excess kurtosis, so a normal sample gives 0. A sample with zero variance
/// reports 0 for both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Moments {
    pub mean: f64,
    pub variance: f64,
    pub skewness: f64,
    pub kurtosis: f64,
    pub median: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MomentScope {
    /// One set of moments for each of X, Y and Z.
    PerAxis,
    /// One set of moments over every coordinate pooled together.
    Global,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MomentSet {
    PerAxis([Moments; 3]),
    Global(Moments),
}

/// A kernel density estimate sampled on an evenly spaced grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityCurve {
    pub grid: Vec<f64>,
    /// Density at each grid point, scaled so the largest value is 1.
    pub density: Vec<f64>,
}

/// Sizes used by [`analyze`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub kde_samples: usize,
    pub fft_size: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            kde_samples: DEFAULT_KDE_SAMPLES,
            fft_size: DEFAULT_FFT_SIZE,
        }
    }
}

/// All statistics of one trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub min_max: MinMax,
    pub per_axis: [Moments; 3],
    pub global: Moments,
    /// `None` for an axis whose values are all identical or not finite.
    pub density: [Option<DensityCurve>; 3],
    pub spectrum: [Vec<f64>; 3],
    pub autocorrelation: [Vec<f64>; 3],
}

fn require_points(
    trajectory: &Trajectory,
    operation: &'static str,
    required: usize,
) -> Result<()> {
    if trajectory.len() < required {
        return Err(AttractorError::InsufficientData {
            operation,
            required,
            actual: trajectory.len(),
        });
    }
    Ok(())
}

/// Minimum and maximum of each coordinate. NaN values propagate.
pub fn min_max(trajectory: &Trajectory) -> Result<MinMax> {
    require_points(trajectory, "min_max", 1)?;
    let matrix = trajectory.to_matrix();
    let mut lower = [0.0; 3];
    let mut upper = [0.0; 3];
    for axis in Axis::ALL {
        let column = matrix.column(axis.index());
        let first = column[0];
        let (lo, hi) = column.iter().fold((first, first), |(lo, hi), &v| {
            (
                if v.is_nan() || v < lo { v } else { lo },
                if v.is_nan() || v > hi { v } else { hi },
            )
        });
        lower[axis.index()] = lo;
        upper[axis.index()] = hi;
    }
    Ok(MinMax {
        min: Point3::from(lower),
        max: Point3::from(upper),
    })
}

fn sample_moments(values: &[f64]) -> Moments {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
    for &v in values {
        let d = v - mean;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }
    m2 /= n;
    m3 /= n;
    m4 /= n;

    // Differences at rounding level of the mean count as no spread.
    let flat = m2 <= (f64::EPSILON * mean).powi(2);
    let (skewness, kurtosis) = if flat {
        (0.0, 0.0)
    } else {
        (m3 / m2.powf(1.5), m4 / (m2 * m2) - 3.0)
    };

    Moments {
        mean,
        variance: m2,
        skewness,
        kurtosis,
        median: median(values),
    }
}

/// NaN if any value is NaN, like the mean.
fn median(values: &[f64]) -> f64 {
    if values.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

pub fn moments_per_axis(trajectory: &Trajectory) -> Result<[Moments; 3]> {
    require_points(trajectory, "moments", 2)?;
    Ok(Axis::ALL.map(|axis| sample_moments(&trajectory.axis(axis))))
}

pub fn moments_global(trajectory: &Trajectory) -> Result<Moments> {
    require_points(trajectory, "moments", 2)?;
    Ok(sample_moments(&trajectory.to_flat()))
}

/// Mean, variance, skewness, kurtosis and median, per axis or pooled.
pub fn moments(trajectory: &Trajectory, scope: MomentScope) -> Result<MomentSet> {
    match scope {
        MomentScope::PerAxis => moments_per_axis(trajectory).map(MomentSet::PerAxis),
        MomentScope::Global => moments_global(trajectory).map(MomentSet::Global),
    }
}

/// `num` evenly spaced values from `start` to `stop` inclusive.
fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let delta = (stop - start) / (num - 1) as f64;
            let mut grid: Vec<f64> = (0..num).map(|i| start + i as f64 * delta).collect();
            grid[num - 1] = stop;
            grid
        }
    }
}

fn kde_axis(trajectory: &Trajectory, axis: Axis, num_samples: usize) -> Result<DensityCurve> {
    let values = trajectory.axis(axis);
    if values.iter().any(|v| !v.is_finite()) {
        return Err(AttractorError::NonFinite {
            operation: "kde",
            axis,
        });
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let spread = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (n - 1.0);
    let (lo, hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    // Squared deviations of huge coordinates overflow.
    if !spread.is_finite() {
        return Err(AttractorError::NonFinite {
            operation: "kde",
            axis,
        });
    }
    if spread <= 0.0 || lo == hi {
        return Err(AttractorError::DegenerateAxis { axis });
    }

    // Scott's rule for a single dimension.
    let bandwidth = spread.sqrt() * n.powf(-0.2);
    let grid = linspace(lo, hi, num_samples);
    let mut density: Vec<f64> = grid
        .iter()
        .map(|&x| {
            values
                .iter()
                .map(|&v| {
                    let u = (x - v) / bandwidth;
                    (-0.5 * u * u).exp()
                })
                .sum::<f64>()
        })
        .collect();

    let peak = density.iter().cloned().fold(0.0, f64::max);
    if peak > 0.0 {
        for value in &mut density {
            *value /= peak;
        }
    }
    Ok(DensityCurve { grid, density })
}

/// Gaussian kernel density estimate of each coordinate, evaluated on
/// `num_samples` points spanning that coordinate's range.
pub fn kde(trajectory: &Trajectory, num_samples: usize) -> Result<[DensityCurve; 3]> {
    require_points(trajectory, "kde", 2)?;
    if num_samples == 0 {
        return Err(AttractorError::InvalidArgument("Number of KDE samples"));
    }
    Ok([
        kde_axis(trajectory, Axis::X, num_samples)?,
        kde_axis(trajectory, Axis::Y, num_samples)?,
        kde_axis(trajectory, Axis::Z, num_samples)?,
    ])
}

/// Magnitude spectrum in dB of each coordinate.
///
/// Each series is truncated or zero padded to `fft_size`, transformed, and
/// shifted so zero frequency sits at index `fft_size / 2`. Magnitudes are
/// scaled by the single largest one across all three axes before the
/// `20·log10` conversion.
pub fn spectrum(trajectory: &Trajectory, fft_size: usize) -> Result<[Vec<f64>; 3]> {
    require_points(trajectory, "spectrum", 1)?;
    if fft_size == 0 {
        return Err(AttractorError::InvalidArgument("FFT size"));
    }

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(fft_size);
    let shift = fft_size / 2;

    let mut magnitudes = Axis::ALL.map(|axis| {
        let mut buffer = vec![Complex::new(0.0, 0.0); fft_size];
        for (slot, value) in buffer.iter_mut().zip(trajectory.axis(axis)) {
            *slot = Complex::new(value, 0.0);
        }
        fft.process(&mut buffer);

        let mut shifted = vec![0.0; fft_size];
        for (i, c) in buffer.iter().enumerate() {
            shifted[(i + shift) % fft_size] = c.norm();
        }
        shifted
    });

    let peak = magnitudes.iter().flatten().cloned().fold(0.0, f64::max);
    for curve in &mut magnitudes {
        for value in curve.iter_mut() {
            if peak > 0.0 {
                *value /= peak;
            }
            *value = 20.0 * (*value + SPECTRUM_FLOOR).log10();
        }
    }
    Ok(magnitudes)
}

fn autocorrelation_axis(planner: &mut FftPlanner<f64>, series: &[f64]) -> Vec<f64> {
    let n = series.len();
    let size = (2 * n - 1).next_power_of_two();
    let forward = planner.plan_fft_forward(size);
    let inverse = planner.plan_fft_inverse(size);

    let mut buffer = vec![Complex::new(0.0, 0.0); size];
    for (slot, &value) in buffer.iter_mut().zip(series) {
        *slot = Complex::new(value, 0.0);
    }
    forward.process(&mut buffer);
    for c in buffer.iter_mut() {
        *c = Complex::new(c.norm_sqr(), 0.0);
    }
    inverse.process(&mut buffer);

    // buffer[l] now holds size * R(l) for lags 0..n; R is even for real input.
    let scale = size as f64;
    let half = n / 2;
    let mut out: Vec<f64> = (0..n)
        .map(|j| {
            let lag = j.abs_diff(half);
            buffer[lag].re / scale
        })
        .collect();

    let peak = out.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if peak > 0.0 {
        for value in &mut out {
            *value /= peak;
        }
    }
    out
}

/// Autocorrelation of each coordinate, same length as the trajectory.
///
/// Entry `j` is the correlation at lag `j - len / 2`, so zero lag sits in
/// the middle. Each curve is scaled to a unit peak unless it is all zero.
pub fn autocorrelation(trajectory: &Trajectory) -> Result<[Vec<f64>; 3]> {
    require_points(trajectory, "autocorrelation", 1)?;
    let mut planner = FftPlanner::<f64>::new();
    Ok(Axis::ALL.map(|axis| autocorrelation_axis(&mut planner, &trajectory.axis(axis))))
}

/// Computes every statistic with the sizes in `settings`.
pub fn analyze(trajectory: &Trajectory, settings: &AnalysisSettings) -> Result<StatisticsReport> {
    require_points(trajectory, "analyze", 2)?;
    if settings.kde_samples == 0 {
        return Err(AttractorError::InvalidArgument("Number of KDE samples"));
    }
    debug!(
        points = trajectory.len(),
        kde_samples = settings.kde_samples,
        fft_size = settings.fft_size,
        "Analysing trajectory"
    );

    let density = Axis::ALL.map(|axis| match kde_axis(trajectory, axis, settings.kde_samples) {
        Ok(curve) => Some(curve),
        Err(err) => {
            debug!(%axis, "Skipping density estimate: {err}");
            None
        }
    });

    Ok(StatisticsReport {
        min_max: min_max(trajectory)?,
        per_axis: moments_per_axis(trajectory)?,
        global: moments_global(trajectory)?,
        density,
        spectrum: spectrum(trajectory, settings.fft_size)?,
        autocorrelation: autocorrelation(trajectory)?,
    })
}
