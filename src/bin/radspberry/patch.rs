//! Demo patch played by the binary

use radspberry::{
    graph::{Amp, FilterNode, Generator, NodeExt, Osc, Param},
    Result,
};

/// Live handles the UI can turn while the patch plays.
pub struct Controls {
    /// Blend between the oversampled saw (0) and the square sub (1).
    pub morph: Param,
    /// Gain on the sine pad mixed underneath.
    pub pad: Param,
}

pub struct Patch<G> {
    pub root: G,
    pub controls: Controls,
}

/// A saw lead (run at 4x to keep its harmonics clean) crossfaded with a
/// square sub, through a resonant lowpass whose cutoff sweeps with a slow
/// sine LFO, over a quiet sine pad.
pub fn demo() -> Result<Patch<impl Generator>> {
    let lead = Osc::saw(110.0).oversample(4)?;
    let blend = lead.crossfade(Osc::square(55.0), 0.2);
    let morph = blend.fade();

    let voice = blend
        .serial(FilterNode::lowpass(800.0).with_resonance(0.6))
        .modulate("cutoff", Osc::sine(0.25), 300.0..=3_000.0)?;

    let pad_gain = Amp::new(0.15);
    let pad = pad_gain.gain();

    let root = voice.parallel(Osc::sine(220.0).serial(pad_gain));

    Ok(Patch {
        root,
        controls: Controls { morph, pad },
    })
}
