//! Generated fallback tone.
//!
//! Played when the configured sound file cannot be opened or decoded, so
//! completion is still audible on machines without system sounds.

use std::time::Duration;

use rodio::source::{SineWave, Source};

/// Pitch of the fallback tone in Hz.
pub const TONE_FREQUENCY_HZ: f32 = 880.0;

/// Length of the fallback tone.
pub const TONE_DURATION: Duration = Duration::from_millis(400);

/// Volume multiplier applied to the sine wave.
pub const TONE_VOLUME: f32 = 0.25;

/// Returns the fallback tone as a finite audio source.
pub fn fallback_tone() -> impl Source<Item = f32> + Send + 'static {
    SineWave::new(TONE_FREQUENCY_HZ)
        .take_duration(TONE_DURATION)
        .amplify(TONE_VOLUME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_is_mono() {
        assert_eq!(fallback_tone().channels(), 1);
    }

    #[test]
    fn test_tone_is_finite() {
        let expected = fallback_tone().sample_rate() as f64 * TONE_DURATION.as_secs_f64();
        let samples = fallback_tone().count() as f64;
        assert!((samples - expected).abs() < 10.0, "got {} samples", samples);
    }

    #[test]
    fn test_tone_is_quiet() {
        let peak = fallback_tone().fold(0.0f32, |peak, s| peak.max(s.abs()));
        assert!(peak <= TONE_VOLUME + f32::EPSILON);
        assert!(peak > 0.0);
    }
}
