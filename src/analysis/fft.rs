//! FFT computation for dataset sample buffers
//!
//! Produces the magnitude spectrum rendered by the FFT dashboard widget.
//! The input is the most recent window of a dataset's samples (see
//! `Dataset::fft_samples`); the output is one magnitude per frequency bin
//! up to the Nyquist frequency.

use rustfft::{num_complex::Complex, FftPlanner};
use std::f64::consts::PI;

/// Window function applied before the transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowFunction {
    /// No windowing
    Rectangular,
    /// Good general purpose window
    #[default]
    Hann,
    /// Reduced side lobes
    Hamming,
    /// Very low side lobes
    Blackman,
}

impl WindowFunction {
    /// Get all window functions
    pub fn all() -> &'static [WindowFunction] {
        &[
            WindowFunction::Rectangular,
            WindowFunction::Hann,
            WindowFunction::Hamming,
            WindowFunction::Blackman,
        ]
    }

    /// Get display name for this window function
    pub fn display_name(&self) -> &'static str {
        match self {
            WindowFunction::Rectangular => "Rectangular",
            WindowFunction::Hann => "Hann",
            WindowFunction::Hamming => "Hamming",
            WindowFunction::Blackman => "Blackman",
        }
    }

    /// Window coefficient at position `i` of `n` samples
    pub fn coefficient(&self, i: usize, n: usize) -> f64 {
        let phase = 2.0 * PI * i as f64 / n as f64;
        match self {
            WindowFunction::Rectangular => 1.0,
            WindowFunction::Hann => 0.5 * (1.0 - phase.cos()),
            WindowFunction::Hamming => 0.54 - 0.46 * phase.cos(),
            // Clamped at 0: the endpoint value is exactly 0 mathematically
            // but the coefficient constants round to -epsilon.
            WindowFunction::Blackman => {
                (0.42 - 0.5 * phase.cos() + 0.08 * (2.0 * phase).cos()).max(0.0)
            }
        }
    }
}

/// Magnitude spectrum of one dataset window
#[derive(Debug, Clone)]
pub struct SpectrumResult {
    /// Frequency bins in Hz, from DC up to Nyquist
    pub frequencies: Vec<f64>,
    /// Linear magnitude per bin, amplitude-normalized
    pub magnitudes: Vec<f64>,
    /// Sample rate the spectrum was computed at
    pub sample_rate: f64,
    /// Hz per bin
    pub frequency_resolution: f64,
}

impl SpectrumResult {
    /// Frequency of the strongest non-DC bin
    pub fn peak_frequency(&self) -> Option<f64> {
        self.magnitudes
            .iter()
            .zip(self.frequencies.iter())
            .skip(1)
            .max_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, &f)| f)
    }
}

/// Compute the magnitude spectrum of a sample window
///
/// Returns `None` for fewer than two samples or a non-positive sample
/// rate. The window function is applied in place before the transform;
/// magnitudes are normalized so a full-scale sine of amplitude A reports
/// approximately A at its bin (up to window attenuation).
pub fn compute_spectrum(
    samples: &[f64],
    sample_rate: f64,
    window: WindowFunction,
) -> Option<SpectrumResult> {
    let n = samples.len();
    if n < 2 || sample_rate <= 0.0 {
        return None;
    }

    let mut buffer: Vec<Complex<f64>> = samples
        .iter()
        .enumerate()
        .map(|(i, &s)| Complex::new(s * window.coefficient(i, n), 0.0))
        .collect();

    FftPlanner::new().plan_fft_forward(n).process(&mut buffer);

    // Coherent gain compensates for the window's amplitude attenuation
    let gain: f64 = (0..n).map(|i| window.coefficient(i, n)).sum::<f64>() / n as f64;
    let scale = 2.0 / (n as f64 * gain);

    let bins = n / 2;
    let resolution = sample_rate / n as f64;
    let frequencies = (0..bins).map(|i| i as f64 * resolution).collect();
    let magnitudes = buffer[..bins].iter().map(|c| c.norm() * scale).collect();

    Some(SpectrumResult {
        frequencies,
        magnitudes,
        sample_rate,
        frequency_resolution: resolution,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f64, rate: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| (2.0 * PI * freq * i as f64 / rate).sin())
            .collect()
    }

    #[test]
    fn test_window_endpoints() {
        let n = 64;
        assert_eq!(WindowFunction::Rectangular.coefficient(0, n), 1.0);
        assert!(WindowFunction::Hann.coefficient(0, n).abs() < 1e-12);
        assert!(WindowFunction::Blackman.coefficient(0, n) >= 0.0);
    }

    #[test]
    fn test_spectrum_finds_peak() {
        let samples = sine(50.0, 1024.0, 1024);
        let spectrum = compute_spectrum(&samples, 1024.0, WindowFunction::Hann).unwrap();
        let peak = spectrum.peak_frequency().unwrap();
        assert!((peak - 50.0).abs() <= spectrum.frequency_resolution);
    }

    #[test]
    fn test_spectrum_amplitude_normalization() {
        let samples = sine(64.0, 1024.0, 1024);
        let spectrum = compute_spectrum(&samples, 1024.0, WindowFunction::Rectangular).unwrap();
        let peak_mag = spectrum
            .magnitudes
            .iter()
            .fold(0.0_f64, |acc, &m| acc.max(m));
        assert!((peak_mag - 1.0).abs() < 0.05, "peak magnitude {peak_mag}");
    }

    #[test]
    fn test_spectrum_rejects_degenerate_input() {
        assert!(compute_spectrum(&[], 100.0, WindowFunction::Hann).is_none());
        assert!(compute_spectrum(&[1.0], 100.0, WindowFunction::Hann).is_none());
        assert!(compute_spectrum(&[1.0, 2.0], 0.0, WindowFunction::Hann).is_none());
    }
}
