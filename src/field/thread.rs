use super::{BAND_HEIGHT, FIELD_WIDTH, WRAP_MARGIN};
use crate::field::metrics::Metric;
use crate::render::canvas::{Rgb, Vec2};
use std::f32::consts::TAU;

/// Horizontal distance between curve samples, in logical units.
pub(crate) const SAMPLE_STEP: f32 = 10.0;

/// Phase advance per unhovered frame.
const PHASE_STEP: f32 = 0.01;

/// Amplitude of the slow secondary wave layered on every curve.
const SECONDARY_AMPLITUDE: f32 = 20.0;

/// Amplitude of the horizontal wobble applied to each sample's x.
const WOBBLE_AMPLITUDE: f32 = 20.0;

/// One animated sine-based curve representing a single sustainability metric.
/// Shape parameters are drawn once at creation; `phase` and `base_y` mutate
/// every unhovered frame.
#[derive(Debug, Clone)]
pub(crate) struct Thread {
    pub(crate) metric: Metric,
    pub(crate) color: Rgb,
    phase: f32,
    amplitude: f32,
    frequency: f32,
    base_y: f32,
    speed_y: f32,
}

impl Thread {
    pub(crate) fn new(metric: Metric, color: Rgb, base_y: f32, rng: &mut fastrand::Rng) -> Self {
        Self {
            metric,
            color,
            phase: rng.f32() * TAU,
            amplitude: 30.0 + rng.f32() * 50.0,
            frequency: 0.005 + rng.f32() * 0.015,
            base_y,
            speed_y: 0.5 + rng.f32() * 1.0,
        }
    }

    /// Sample the curve at fixed horizontal steps across the field width.
    /// Pure: depends only on the thread's current state.
    pub(crate) fn samples(&self) -> Vec<Vec2> {
        let count = (FIELD_WIDTH / SAMPLE_STEP) as usize + 1;
        let mut points = Vec::with_capacity(count);
        let mut x = 0.0f32;
        while x <= FIELD_WIDTH {
            let y = self.base_y
                + (x * self.frequency + self.phase).sin() * self.amplitude
                + (self.phase * 0.5 + x * 0.002).sin() * SECONDARY_AMPLITUDE;
            let x_offset = (x * 0.005 + self.phase).sin() * WOBBLE_AMPLITUDE;
            points.push(Vec2::new(x + x_offset, y));
            x += SAMPLE_STEP;
        }
        points
    }

    /// Advance one frame of motion: the phase drifts forward and the anchor
    /// scrolls up, wrapping below the band once it clears the top margin.
    pub(crate) fn advance(&mut self) {
        self.phase += PHASE_STEP;
        self.base_y -= self.speed_y;
        if self.base_y < -WRAP_MARGIN {
            self.base_y = BAND_HEIGHT + WRAP_MARGIN;
        }
    }

    pub(crate) fn phase(&self) -> f32 {
        self.phase
    }

    pub(crate) fn base_y(&self) -> f32 {
        self.base_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_thread() -> Thread {
        let mut rng = fastrand::Rng::with_seed(7);
        Thread::new(Metric::WaterUse, Rgb::new(0x10, 0x00, 0x2D), 150.0, &mut rng)
    }

    #[test]
    fn sampling_is_deterministic() {
        let thread = test_thread();
        assert_eq!(thread.samples(), thread.samples());
    }

    #[test]
    fn samples_cover_the_field_width() {
        let thread = test_thread();
        let samples = thread.samples();
        assert_eq!(samples.len(), (FIELD_WIDTH / SAMPLE_STEP) as usize + 1);
        // Wobble can push x past the nominal bounds by at most its amplitude
        for point in &samples {
            assert!(point.x >= -WOBBLE_AMPLITUDE);
            assert!(point.x <= FIELD_WIDTH + WOBBLE_AMPLITUDE);
        }
    }

    #[test]
    fn advance_moves_phase_forward_and_anchor_up() {
        let mut thread = test_thread();
        let phase = thread.phase();
        let base_y = thread.base_y();
        thread.advance();
        assert!(thread.phase() > phase);
        assert!(thread.base_y() < base_y);
    }

    #[test]
    fn anchor_stays_within_the_extended_band() {
        let mut thread = test_thread();
        let mut wrapped = false;
        for _ in 0..100_000 {
            let before = thread.base_y();
            thread.advance();
            let after = thread.base_y();
            assert!(after >= -WRAP_MARGIN);
            assert!(after <= BAND_HEIGHT + WRAP_MARGIN);
            if after > before {
                // A wrap resets to exactly the bottom overscroll offset
                assert_eq!(after, BAND_HEIGHT + WRAP_MARGIN);
                wrapped = true;
            }
        }
        assert!(wrapped, "expected at least one wraparound over 100k frames");
    }
}
