//! Oversampling factors and anti-aliasing filters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dsp::biquad::{Cascade, SectionCoefficients},
    error::Error,
};

/*
Oversampling
============

Hard sync, wave morphing, naive sawtooth and square waves, and waveshaping
all produce energy above the output Nyquist frequency. At the output rate
that energy cannot be represented; it folds back ("aliases") into the
audible band as inharmonic tones.

Running the node at F times the output rate moves the fold point up by F.
Before dropping back to the output rate, a low-pass filter removes
everything above the output Nyquist, so the only content that can still
alias is whatever the node produced above the *inner* Nyquist, which is
far weaker for typical signals.

    inner rate:  fs·F   ─ node.tick() ×F ─→ [decimation LPF] ─→ keep 1 of F
    outer rate:  fs                                         ─→ output

Filter designs
--------------

Both designs are elliptic (equiripple in pass and stop band), the steepest
transition for a given order. Frequencies below are fractions of the INNER
sample rate.

  factor │ order │ passband edge │ stopband edge        │ ripple │ rejection
  ───────┼───────┼───────────────┼──────────────────────┼────────┼──────────
    ×4   │  12   │ 0.100         │ 0.125 (= outer fs/2) │ 0.1 dB │ ~118 dB
    ×2   │   8   │ 0.200         │ 0.250 (= outer fs/2) │ 0.1 dB │  ~78 dB

The ×4 filter is a quarter-band design: its stopband starts exactly at a
quarter of the inner Nyquist. At 44.1 kHz output the passband reaches
17.6 kHz.

The same design doubles as the interpolation filter when a processor is
oversampled: the input is zero-stuffed (one real sample followed by F-1
zeros, scaled by F) and smoothed by the filter before the inner node sees it.

Group delay
-----------

IIR filters delay the signal by a frequency-dependent amount. In the
passband the ×4 design adds roughly two output samples at low frequencies;
oversampled nodes are therefore slightly late compared to their plain
versions. The delay is fixed for the wrapper's lifetime because the filter
state is never reset between blocks.
*/

/// Sections for the ×4 quarter-band decimator (12th-order elliptic).
const ELLIPTIC_X4: [SectionCoefficients; 6] = [
    [
        0.6506068747947505,
        -0.9167183750465526,
        0.6506068747947505,
        -1.5961072867888522,
        0.9806026613318006,
    ],
    [
        0.5500288636826257,
        -0.7496234505596308,
        0.5500288636826256,
        -1.5878668105975675,
        0.9383010874031881,
    ],
    [
        0.379706661355718,
        -0.47164789220561354,
        0.379706661355718,
        -1.5975317903637518,
        0.8852972208695743,
    ],
    [
        0.19053085105513054,
        -0.18196922591422066,
        0.19053085105513054,
        -1.620637759990242,
        0.8197302361862824,
    ],
    [
        0.05754647032770488,
        -0.012484390542336745,
        0.05754647032770488,
        -1.6491781825866565,
        0.7517867326997295,
    ],
    [
        0.010452108592612318,
        0.015315607001672763,
        0.010452108592612318,
        -1.6696355972919295,
        0.7058554214788268,
    ],
];

/// Sections for the ×2 half-band decimator (8th-order elliptic).
const ELLIPTIC_X2: [SectionCoefficients; 4] = [
    [
        0.67669263094784,
        0.017862453370246736,
        0.67669263094784,
        -0.5537522933797442,
        0.925000008645671,
    ],
    [
        0.4879595167084952,
        0.1290325360077698,
        0.4879595167084952,
        -0.6499042158245613,
        0.7548557852493212,
    ],
    [
        0.23493961818804307,
        0.2051136174677924,
        0.23493961818804318,
        -0.8575251536324391,
        0.5325180074763177,
    ],
    [
        0.0710753128435376,
        0.12768241896451818,
        0.0710753128435376,
        -1.0638591532718353,
        0.3336921979234287,
    ],
];

/// Supported oversampling ratios.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Factor {
    X2,
    X4,
}

impl Factor {
    #[inline]
    pub fn ratio(self) -> usize {
        match self {
            Factor::X2 => 2,
            Factor::X4 => 4,
        }
    }

    /// A fresh anti-aliasing filter for this factor.
    pub fn anti_alias_filter(self) -> Cascade {
        match self {
            Factor::X2 => Cascade::new(&ELLIPTIC_X2),
            Factor::X4 => Cascade::new(&ELLIPTIC_X4),
        }
    }
}

impl TryFrom<usize> for Factor {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Factor::X2),
            4 => Ok(Factor::X4),
            other => Err(Error::InvalidFactor(other)),
        }
    }
}
