use std::f64::consts::TAU;

use radspberry::graph::{Amp, Generator, Node, NodeExt, Osc, Processor};
use rustfft::{num_complex::Complex, FftPlanner};

const RATE: f32 = 44_100.0;

fn render(mut node: impl Generator, len: usize) -> Vec<f32> {
    node.set_sample_rate(RATE);
    let mut out = vec![0.0; len];
    node.render(&mut out);
    out
}

struct SineFit {
    amplitude: f64,
    phase: f64,
    residual_rms: f64,
}

/// Least-squares fit of `a·sin(ωn) + b·cos(ωn)` over `signal[start..]`.
fn fit_sine(signal: &[f32], freq: f64, start: usize) -> SineFit {
    let w = TAU * freq / RATE as f64;
    let (mut ss, mut cc, mut sc, mut ys, mut yc) = (0.0, 0.0, 0.0, 0.0, 0.0);

    for (n, &y) in signal.iter().enumerate().skip(start) {
        let (s, c) = (w * n as f64).sin_cos();
        let y = y as f64;
        ss += s * s;
        cc += c * c;
        sc += s * c;
        ys += y * s;
        yc += y * c;
    }

    let det = ss * cc - sc * sc;
    let a = (ys * cc - yc * sc) / det;
    let b = (yc * ss - ys * sc) / det;

    let mut err = 0.0;
    for (n, &y) in signal.iter().enumerate().skip(start) {
        let (s, c) = (w * n as f64).sin_cos();
        err += (y as f64 - a * s - b * c).powi(2);
    }

    SineFit {
        amplitude: a.hypot(b),
        phase: b.atan2(a),
        residual_rms: (err / (signal.len() - start) as f64).sqrt(),
    }
}

fn rms(signal: &[f32]) -> f64 {
    let sum: f64 = signal.iter().map(|&x| (x as f64).powi(2)).sum();
    (sum / signal.len() as f64).sqrt()
}

#[test]
fn sine_survives_oversampling_up_to_delay_and_ripple() {
    let freq = 440.0;
    let plain = fit_sine(&render(Osc::sine(freq), 8192), freq as f64, 4096);

    for factor in [2, 4] {
        let wrapped = Osc::sine(freq).oversample(factor).expect("supported factor");
        let fit = fit_sine(&render(wrapped, 8192), freq as f64, 4096);

        // 0.1 dB of passband ripple is about 1.2 %
        assert!(
            (fit.amplitude - plain.amplitude).abs() < 0.02,
            "x{factor}: amplitude {} vs {}",
            fit.amplitude,
            plain.amplitude
        );
        assert!(
            fit.residual_rms < 1e-4,
            "x{factor}: no new components, residual {}",
            fit.residual_rms
        );

        // The filter only delays: a few output samples at 440 Hz
        let delay = (plain.phase - fit.phase) / (TAU * freq as f64 / RATE as f64);
        assert!(
            (0.0..8.0).contains(&delay),
            "x{factor}: group delay {delay} samples is implausible"
        );
    }
}

#[test]
fn content_above_output_nyquist_is_rejected() {
    // 30 kHz cannot exist at 44.1 kHz; played plainly it folds to 14.1 kHz
    let naive = render(Osc::sine(30_000.0), 4096);
    assert!(rms(&naive[2048..]) > 0.5, "plain oscillator aliases at full level");

    let wrapped = Osc::sine(30_000.0).oversample(4).expect("x4");
    let filtered = render(wrapped, 4096);
    let level = rms(&filtered[2048..]);
    assert!(level < 1e-3, "x4 decimation should remove 30 kHz, rms {level}");
}

/// Fraction of spectral energy that falls between the harmonics of a saw
/// whose fundamental sits exactly on bin `fundamental_bin`.
fn off_harmonic_ratio(signal: &[f32], fundamental_bin: usize) -> f64 {
    let n = signal.len();
    let mut spectrum: Vec<Complex<f64>> = signal
        .iter()
        .map(|&x| Complex::new(x as f64, 0.0))
        .collect();
    FftPlanner::new().plan_fft_forward(n).process(&mut spectrum);

    let mut total = 0.0;
    let mut off = 0.0;
    for (bin, value) in spectrum.iter().enumerate().take(n / 2).skip(1) {
        let power = value.norm_sqr();
        total += power;
        if bin % fundamental_bin != 0 {
            off += power;
        }
    }
    off / total
}

#[test]
fn oversampling_reduces_saw_aliasing() {
    const N: usize = 4096;
    const BIN: usize = 279;
    // Exactly periodic over the analysis block, so no window is needed
    let freq = BIN as f32 * RATE / N as f32;

    let analyse = |signal: Vec<f32>| off_harmonic_ratio(&signal[N..], BIN);

    let naive = analyse(render(Osc::saw(freq), 2 * N));
    let x2 = analyse(render(Osc::saw(freq).oversample(2).expect("x2"), 2 * N));
    let x4 = analyse(render(Osc::saw(freq).oversample(4).expect("x4"), 2 * N));

    assert!(naive > 0.05, "a naive saw at 3 kHz aliases heavily ({naive})");
    assert!(x2 < naive / 3.0, "x2 should cut aliasing: {x2} vs {naive}");
    assert!(x4 < naive / 10.0, "x4 should cut aliasing further: {x4} vs {naive}");
    assert!(x4 < x2, "x4 beats x2: {x4} vs {x2}");
}

#[test]
fn block_render_matches_ticking() {
    for factor in [2, 4] {
        let mut ticked = Osc::saw(1_234.0).oversample(factor).expect("supported");
        let mut blocked = Osc::saw(1_234.0).oversample(factor).expect("supported");
        ticked.set_sample_rate(RATE);
        blocked.set_sample_rate(RATE);

        let expected: Vec<f32> = ticked.ticks(3_000).collect();
        let mut out = vec![0.0; 3_000];
        // Uneven block sizes: filter state must carry across calls
        for chunk in out.chunks_mut(333) {
            blocked.render(chunk);
        }

        assert_eq!(out, expected, "x{factor}: render diverged from tick");
    }
}

#[test]
fn oversampled_processor_passes_the_passband() {
    let mut source = Osc::sine(440.0);
    source.set_sample_rate(RATE);
    let mut amp = Amp::new(1.0).oversample(4).expect("x4");
    amp.set_sample_rate(RATE);

    let out: Vec<f32> = amp.ticks(source.ticks(8192)).collect();
    let level = rms(&out[4096..]);
    assert!(
        (level - std::f64::consts::FRAC_1_SQRT_2).abs() < 0.035,
        "unit gain through up- and down-sampling, rms {level}"
    );

    let fit = fit_sine(&out, 440.0, 4096);
    assert!(fit.residual_rms < 1e-4, "residual {}", fit.residual_rms);
}
