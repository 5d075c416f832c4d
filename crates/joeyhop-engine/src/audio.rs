//! Fire-and-forget sound cues.
//!
//! Each cue carries a fixed parameter vector for a tiny procedural synth
//! (volume, randomness, frequency, attack, sustain, release, shape, ...). Slots
//! left `None` take the synth's defaults. The core never waits on or checks
//! the result of playing a cue.

use serde::{Deserialize, Serialize};

/// Number of synth parameters per cue.
pub const SYNTH_PARAMS: usize = 19;

/// A sound the game can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// The player trampled a bush.
    HazardHit,
    /// A joey hopped into the pouch.
    Rescued,
}

impl SoundCue {
    /// The synth parameter vector for this cue.
    pub fn params(self) -> [Option<f64>; SYNTH_PARAMS] {
        match self {
            SoundCue::HazardHit => [
                Some(1.55),
                None,
                Some(309.0),
                None,
                Some(0.08),
                Some(0.18),
                Some(3.0),
                Some(1.6),
                Some(-6.7),
                None,
                None,
                None,
                None,
                Some(0.3),
                None,
                Some(0.1),
                Some(0.05),
                Some(0.69),
                Some(0.03),
            ],
            SoundCue::Rescued => [
                Some(1.2),
                None,
                Some(620.0),
                Some(0.02),
                Some(0.06),
                Some(0.2),
                Some(1.0),
                Some(1.8),
                None,
                None,
                Some(240.0),
                Some(0.05),
                None,
                None,
                None,
                None,
                None,
                Some(0.6),
                Some(0.02),
            ],
        }
    }
}

/// Where cues go. Implementations must not fail loudly.
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Discards every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Remembers every cue played, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    pub played: Vec<SoundCue>,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: SoundCue) {
        self.played.push(cue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hazard_cue_vector() {
        let params = SoundCue::HazardHit.params();
        assert_eq!(params[0], Some(1.55));
        assert_eq!(params[1], None);
        assert_eq!(params[2], Some(309.0));
        assert_eq!(params[8], Some(-6.7));
        assert_eq!(params[18], Some(0.03));
    }

    #[test]
    fn recording_sink_keeps_order() {
        let mut sink = RecordingAudio::default();
        sink.play(SoundCue::Rescued);
        sink.play(SoundCue::HazardHit);
        assert_eq!(sink.played, vec![SoundCue::Rescued, SoundCue::HazardHit]);
    }
}
