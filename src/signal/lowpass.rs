//! Zero-phase Butterworth low-pass filter.
//!
//! Suppresses high-frequency jitter in a motion channel while preserving
//! the slow oscillation of the lifting motion. The filter is designed as a
//! cascade of second-order sections (bilinear transform with frequency
//! pre-warping) and applied forward-backward, so peak positions in the
//! output are not phase-shifted relative to the input. Zero phase is a
//! correctness requirement here: the peak detector's output is counted
//! downstream, and a phase lag would move peaks across window boundaries.

use std::f64::consts::PI;

use crate::reps::types::RepError;

/// One second-order section in transposed direct form II, with the
/// steady-state initial conditions used for transient suppression.
#[derive(Debug, Clone, Copy)]
struct Biquad {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
    // Unit-step steady-state filter state, scaled by the first sample
    // when the section is applied.
    zi0: f64,
    zi1: f64,
}

impl Biquad {
    fn new(b0: f64, b1: f64, b2: f64, a1: f64, a2: f64) -> Self {
        // Steady-state state vector: solve (I - A) zi = B for the
        // companion-form state matrix of the section.
        let s0 = b1 - b0 * a1;
        let s1 = b2 - b0 * a2;
        let det = 1.0 + a1 + a2;
        let zi0 = (s0 + s1) / det;
        let zi1 = ((1.0 + a1) * s1 - a2 * s0) / det;

        Self {
            b0,
            b1,
            b2,
            a1,
            a2,
            zi0,
            zi1,
        }
    }

    /// Run the section over the buffer in place, starting from the
    /// steady-state response to the buffer's first sample.
    fn run(&self, buf: &mut [f64]) {
        let first = match buf.first() {
            Some(&v) => v,
            None => return,
        };
        let mut z0 = self.zi0 * first;
        let mut z1 = self.zi1 * first;

        for v in buf.iter_mut() {
            let x = *v;
            let y = self.b0 * x + z0;
            z0 = self.b1 * x - self.a1 * y + z1;
            z1 = self.b2 * x - self.a2 * y;
            *v = y;
        }
    }
}

/// Digital Butterworth low-pass filter with zero-phase application.
#[derive(Debug, Clone)]
pub struct LowPassFilter {
    sections: Vec<Biquad>,
    order: usize,
}

impl LowPassFilter {
    /// Design a low-pass filter.
    ///
    /// The cutoff must lie strictly between zero and the Nyquist
    /// frequency (`sampling_rate_hz / 2`) and the order must be at
    /// least 1.
    pub fn new(sampling_rate_hz: f64, cutoff_hz: f64, order: usize) -> Result<Self, RepError> {
        if order == 0 {
            return Err(RepError::InvalidOrder { order });
        }
        let nyquist_hz = sampling_rate_hz / 2.0;
        if !(cutoff_hz > 0.0 && cutoff_hz < nyquist_hz) {
            return Err(RepError::InvalidCutoff {
                cutoff_hz,
                nyquist_hz,
            });
        }

        // Normalized cutoff in (0, 1), 1.0 being Nyquist, pre-warped for
        // the bilinear transform.
        let wn = cutoff_hz / nyquist_hz;
        let k = 1.0 / (PI * wn / 2.0).tan();
        let k2 = k * k;

        let mut sections = Vec::with_capacity(order / 2 + 1);

        // Conjugate analog pole pairs of the Butterworth prototype map to
        // one biquad each; every section has unity DC gain.
        for i in 0..order / 2 {
            let theta = PI * (2 * i + 1) as f64 / (2 * order) as f64;
            let c = 2.0 * theta.sin();
            let a0 = k2 + c * k + 1.0;
            sections.push(Biquad::new(
                1.0 / a0,
                2.0 / a0,
                1.0 / a0,
                (2.0 - 2.0 * k2) / a0,
                (k2 - c * k + 1.0) / a0,
            ));
        }

        // Odd orders leave one real analog pole, expressed as a
        // degenerate first-order section.
        if order % 2 == 1 {
            let a0 = k + 1.0;
            sections.push(Biquad::new(1.0 / a0, 1.0 / a0, 0.0, (1.0 - k) / a0, 0.0));
        }

        Ok(Self { sections, order })
    }

    /// Filter order the cascade was designed for.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of edge samples needed for stable zero-phase filtering.
    pub fn pad_len(&self) -> usize {
        3 * (self.order + 1)
    }

    /// Apply the filter forward-backward (zero phase).
    ///
    /// The output has the same length and alignment as the input. The
    /// signal is extended on both ends by odd reflection before
    /// filtering, then trimmed, which suppresses edge transients.
    ///
    /// Inputs too short to reflect (`len <= pad_len`) are returned
    /// unchanged; this is the documented degenerate behavior for sets
    /// far shorter than any real lifting set.
    pub fn apply(&self, series: &[f64]) -> Vec<f64> {
        let n = series.len();
        let pad = self.pad_len();
        if n <= pad {
            tracing::debug!(
                samples = n,
                required = pad + 1,
                "series too short for zero-phase filtering, returning unfiltered"
            );
            return series.to_vec();
        }

        // Odd reflection about the first and last samples.
        let mut ext = Vec::with_capacity(n + 2 * pad);
        for i in (1..=pad).rev() {
            ext.push(2.0 * series[0] - series[i]);
        }
        ext.extend_from_slice(series);
        for i in 1..=pad {
            ext.push(2.0 * series[n - 1] - series[n - 1 - i]);
        }

        self.cascade(&mut ext);
        ext.reverse();
        self.cascade(&mut ext);
        ext.reverse();

        ext[pad..pad + n].to_vec()
    }

    fn cascade(&self, buf: &mut [f64]) {
        for section in &self.sections {
            section.run(buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq_hz: f64, sampling_rate_hz: f64, samples: usize) -> Vec<f64> {
        (0..samples)
            .map(|i| (2.0 * PI * freq_hz * i as f64 / sampling_rate_hz).sin())
            .collect()
    }

    #[test]
    fn test_rejects_cutoff_at_or_above_nyquist() {
        assert!(LowPassFilter::new(5.0, 2.5, 5).is_err());
        assert!(LowPassFilter::new(5.0, 3.0, 5).is_err());
        assert!(LowPassFilter::new(5.0, 0.0, 5).is_err());
        assert!(LowPassFilter::new(5.0, 0.4, 0).is_err());
        assert!(LowPassFilter::new(5.0, 0.4, 5).is_ok());
    }

    #[test]
    fn test_preserves_constant_signal() {
        let filter = LowPassFilter::new(5.0, 0.4, 10).unwrap();
        let series = vec![3.5; 200];
        let out = filter.apply(&series);

        assert_eq!(out.len(), series.len());
        for v in out {
            assert!((v - 3.5).abs() < 1e-6);
        }
    }

    #[test]
    fn test_passes_low_and_rejects_high_frequency() {
        let fs = 5.0;
        let filter = LowPassFilter::new(fs, 0.4, 10).unwrap();

        let low = filter.apply(&sine(0.1, fs, 500));
        let high = filter.apply(&sine(2.0, fs, 500));

        // Compare RMS over the interior to avoid edge effects
        let rms = |s: &[f64]| {
            let mid = &s[100..400];
            (mid.iter().map(|v| v * v).sum::<f64>() / mid.len() as f64).sqrt()
        };

        let sine_rms = (0.5f64).sqrt();
        assert!((rms(&low) - sine_rms).abs() < 0.05);
        assert!(rms(&high) < 0.05);
    }

    #[test]
    fn test_refiltering_is_idempotent_on_smooth_signal() {
        let fs = 5.0;
        let filter = LowPassFilter::new(fs, 0.4, 10).unwrap();

        let once = filter.apply(&sine(0.1, fs, 500));
        let twice = filter.apply(&once);

        for (a, b) in once[50..450].iter().zip(&twice[50..450]) {
            assert!((a - b).abs() < 1e-3);
        }
    }

    #[test]
    fn test_zero_phase_keeps_peak_position() {
        let fs = 5.0;
        let filter = LowPassFilter::new(fs, 0.5, 5).unwrap();

        // Single broad bump centered at index 100
        let series: Vec<f64> = (0..200)
            .map(|i| {
                let d = (i as f64 - 100.0) / 15.0;
                (-d * d).exp()
            })
            .collect();

        let argmax = |s: &[f64]| {
            s.iter()
                .enumerate()
                .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
                .unwrap()
                .0 as i64
        };

        let filtered = filter.apply(&series);
        assert!((argmax(&filtered) - argmax(&series)).abs() <= 2);
    }

    #[test]
    fn test_short_input_returned_unchanged() {
        let filter = LowPassFilter::new(5.0, 0.4, 10).unwrap();
        let series = vec![1.0, 2.0, 1.0];

        assert_eq!(filter.apply(&series), series);
        assert!(filter.apply(&[]).is_empty());
    }

    #[test]
    fn test_odd_order_design() {
        let filter = LowPassFilter::new(5.0, 0.4, 5).unwrap();
        // Two conjugate pairs plus one real pole
        assert_eq!(filter.sections.len(), 3);

        let out = filter.apply(&vec![1.0; 100]);
        for v in out {
            assert!((v - 1.0).abs() < 1e-6);
        }
    }
}
