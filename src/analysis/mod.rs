//! Frequency-domain analysis
//!
//! Backs the FFT dashboard widget: datasets flagged with the FFT option
//! feed their sample buffer through [`fft::compute_spectrum`] and the
//! resulting magnitude spectrum is what the widget renders.

pub mod fft;

pub use fft::{compute_spectrum, SpectrumResult, WindowFunction};
