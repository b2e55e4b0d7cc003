use std::f32::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
| type              | constructed by       | passes          | rejects      |
| ----------------- | -------------------- | --------------- | ------------ |
| low-pass          | LPF                  | below cutoff    | above cutoff |
| high-pass         | HPF                  | above cutoff    | below cutoff |
| band-pass         | LPF ∘ HPF (series)   | between cutoffs | outside      |
| notch / band-stop | LPF + HPF (parallel) | outside         | between      |
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    LowPass,
    HighPass,
    BandPass,
    Notch,
}

pub struct FilterOutputs {
    pub lowpass: f32,
    pub bandpass: f32,
    pub highpass: f32,
    pub notch: f32,
}

/// Topology-preserving-transform state-variable filter.
///
/// Coefficients are derived per sample from the cutoff and resonance passed
/// in, so a modulated cutoff takes effect on the very next sample.
pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory
    filter_type: FilterType,
}

impl SVFilter {
    pub fn new(filter_type: FilterType) -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            filter_type,
        }
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }

    /// Prewarped integrator gain. Cutoff is kept just below Nyquist so the
    /// tangent stays finite.
    #[inline]
    pub fn compute_g(cutoff_hz: f32, sample_rate: f32) -> f32 {
        let cutoff = cutoff_hz.clamp(1.0, sample_rate * 0.49);
        (PI * cutoff / sample_rate).tan()
    }

    /// Damping from resonance in [0, 1): 0 is a gentle slope, near 1 rings.
    #[inline]
    pub fn compute_k(resonance: f32) -> f32 {
        2.0 - 2.0 * resonance.clamp(0.0, 0.99)
    }

    pub fn next_sample(&mut self, sample: f32, k: f32, g: f32) -> FilterOutputs {
        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        FilterOutputs {
            lowpass: v2,
            bandpass: v1,
            highpass: sample - k * v1 - v2,
            notch: sample - k * v1,
        }
    }

    #[inline]
    pub fn tick(&mut self, sample: f32, k: f32, g: f32) -> f32 {
        let outputs = self.next_sample(sample, k, g);
        match self.filter_type {
            FilterType::LowPass => outputs.lowpass,
            FilterType::HighPass => outputs.highpass,
            FilterType::BandPass => outputs.bandpass,
            FilterType::Notch => outputs.notch,
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    const SAMPLE_RATE: f32 = 48_000.0;

    fn run(filter: &mut SVFilter, input: impl Iterator<Item = f32>, cutoff: f32) -> Vec<f32> {
        let g = SVFilter::compute_g(cutoff, SAMPLE_RATE);
        let k = SVFilter::compute_k(0.0);
        input.map(|x| filter.tick(x, k, g)).collect()
    }

    fn sine(freq: f32, len: usize) -> impl Iterator<Item = f32> {
        (0..len).map(move |n| (TAU * freq * n as f32 / SAMPLE_RATE).sin())
    }

    fn peak_after_transient(buffer: &[f32]) -> f32 {
        let skip = buffer.len().min(256);
        buffer[skip..].iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
    }

    #[test]
    fn test_lowpass_passes_dc() {
        let mut filter = SVFilter::new(FilterType::LowPass);
        let out = run(&mut filter, std::iter::repeat(1.0).take(512), 500.0);
        assert!(out[511] > 0.99, "lowpass should settle to DC, got {}", out[511]);
    }

    #[test]
    fn test_highpass_blocks_dc() {
        let mut filter = SVFilter::new(FilterType::HighPass);
        let out = run(&mut filter, std::iter::repeat(1.0).take(512), 500.0);
        assert!(out[511].abs() < 0.001, "highpass should reject DC, got {}", out[511]);
    }

    #[test]
    fn test_lowpass_filters_high_freq() {
        let mut filter = SVFilter::new(FilterType::LowPass);
        let out = run(&mut filter, sine(5_000.0, 1024), 500.0);

        // 10x above cutoff at 12 dB/octave
        let peak = peak_after_transient(&out);
        assert!(peak < 0.05, "expected high freq attenuation, got peak: {peak}");
    }

    #[test]
    fn test_notch_rejects_cutoff() {
        let mut filter = SVFilter::new(FilterType::Notch);
        let out = run(&mut filter, sine(1_000.0, 4096), 1_000.0);
        let peak = peak_after_transient(&out[2048..]);
        assert!(peak < 0.05, "notch should null its centre frequency, got {peak}");
    }

    #[test]
    fn test_cutoff_clamped_below_nyquist() {
        let g = SVFilter::compute_g(1.0e6, SAMPLE_RATE);
        assert!(g.is_finite());
        assert!(SVFilter::compute_k(5.0) > 0.0, "resonance must never reach zero damping");
    }
}
