//! Second-order IIR sections.

/*
Biquads and Cascades
====================

A biquad is the smallest useful recursive filter: two zeros and two poles.

    y[n] = b0·x[n] + b1·x[n-1] + b2·x[n-2] - a1·y[n-1] - a2·y[n-2]

Higher-order designs (the elliptic anti-aliasing filters used for
oversampling are 8th and 12th order) are factored into a cascade of biquads.
Running one long polynomial directly is numerically fragile; a chain of
second-order sections keeps every pole pair well conditioned.

Transposed Direct Form II
-------------------------

Each section keeps two state words:

    y  = b0·x + z1
    z1 = b1·x - a1·y + z2
    z2 = b2·x - a2·y

State and coefficients are f64. The 12th-order design places poles at radius
0.99, where f32 rounding would eat most of the stopband attenuation.

State is never reset implicitly. A cascade that runs across many blocks keeps
its memory between them, so block boundaries are inaudible.
*/

/// Coefficients for one section: `[b0, b1, b2, a1, a2]` with `a0 = 1`.
pub type SectionCoefficients = [f64; 5];

#[derive(Debug, Clone, Copy)]
pub struct Biquad {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
    z1: f64,
    z2: f64,
}

impl Biquad {
    pub fn new(coefficients: SectionCoefficients) -> Self {
        let [b0, b1, b2, a1, a2] = coefficients;
        Self {
            b0,
            b1,
            b2,
            a1,
            a2,
            z1: 0.0,
            z2: 0.0,
        }
    }

    #[inline]
    pub fn process(&mut self, x: f64) -> f64 {
        let y = self.b0 * x + self.z1;
        self.z1 = self.b1 * x - self.a1 * y + self.z2;
        self.z2 = self.b2 * x - self.a2 * y;
        y
    }

    pub fn reset(&mut self) {
        self.z1 = 0.0;
        self.z2 = 0.0;
    }

    /// Magnitude response at `freq`, given as a fraction of the sample rate.
    pub fn magnitude(&self, freq: f64) -> f64 {
        let w = std::f64::consts::TAU * freq;
        let (c1, s1) = (w.cos(), -w.sin());
        let (c2, s2) = ((2.0 * w).cos(), -(2.0 * w).sin());

        let num_re = self.b0 + self.b1 * c1 + self.b2 * c2;
        let num_im = self.b1 * s1 + self.b2 * s2;
        let den_re = 1.0 + self.a1 * c1 + self.a2 * c2;
        let den_im = self.a1 * s1 + self.a2 * s2;

        (num_re.hypot(num_im)) / (den_re.hypot(den_im))
    }
}

/// A series of biquads applied in order.
#[derive(Debug, Clone)]
pub struct Cascade {
    sections: Vec<Biquad>,
}

impl Cascade {
    pub fn new(table: &[SectionCoefficients]) -> Self {
        Self {
            sections: table.iter().copied().map(Biquad::new).collect(),
        }
    }

    #[inline]
    pub fn process(&mut self, x: f64) -> f64 {
        self.sections
            .iter_mut()
            .fold(x, |signal, section| section.process(signal))
    }

    pub fn reset(&mut self) {
        for section in &mut self.sections {
            section.reset();
        }
    }

    /// Filter order (two per section).
    pub fn order(&self) -> usize {
        self.sections.len() * 2
    }

    pub fn magnitude(&self, freq: f64) -> f64 {
        self.sections.iter().map(|s| s.magnitude(freq)).product()
    }
}
