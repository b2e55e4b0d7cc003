//! Snapshot of the output pipeline, taken once per frame

use radspberry::{audio::StreamStats, Player};

use crate::patch::Controls;

/// Everything the widgets draw, read from atomics without blocking audio.
#[derive(Debug, Clone, Copy)]
pub struct PipelineState {
    pub playing: bool,
    pub sample_rate: f32,
    /// `None` once the engine has stopped.
    pub buffered: Option<usize>,
    pub capacity: usize,
    pub stats: StreamStats,
    pub muted: bool,
    pub faded: bool,
    pub fade_gain: f32,
    pub volume: f32,
    pub morph: f32,
    pub pad: f32,
}

impl PipelineState {
    pub fn capture(player: &Player, controls: &Controls) -> Self {
        let engine = player.engine();
        Self {
            playing: player.is_playing(),
            sample_rate: engine.config().sample_rate,
            buffered: player.buffered().ok(),
            capacity: engine.capacity(),
            stats: engine.stats(),
            muted: player.is_muted(),
            faded: player.is_faded(),
            fade_gain: engine.fade_gain(),
            volume: player.volume().get(),
            morph: controls.morph.get(),
            pad: controls.pad.get(),
        }
    }

    /// Ring fill in [0, 1]; zero when stopped.
    pub fn fill_ratio(&self) -> f64 {
        match self.buffered {
            // One slot always stays empty
            Some(buffered) if self.capacity > 1 => {
                (buffered as f64 / (self.capacity - 1) as f64).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    pub fn output_label(&self) -> &'static str {
        match (self.playing, self.muted, self.faded) {
            (false, _, _) => "Stopped",
            (true, true, true) => "Faded",
            (true, true, false) => "Muted",
            (true, false, _) if self.fade_gain < 1.0 && self.fade_gain > 0.0 => "Fading",
            (true, false, _) => "Playing",
        }
    }
}
