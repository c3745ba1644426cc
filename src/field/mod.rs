mod metrics;
mod thread;

pub(crate) use metrics::{BACKGROUND, Metric};
pub(crate) use thread::Thread;

use crate::render::canvas::{Canvas, ColorError, Rgb, Vec2};
use strum::IntoEnumIterator;

/// Logical canvas width in units.
pub(crate) const FIELD_WIDTH: f32 = 800.0;

/// Height of the animation band; the legend sits below it.
pub(crate) const BAND_HEIGHT: f32 = 750.0;

/// How far past the top a thread may scroll before wrapping, and how far
/// below the band it reappears.
pub(crate) const WRAP_MARGIN: f32 = 100.0;

/// Alpha of the per-frame background fade that leaves a short motion trail.
pub(crate) const TRAIL_ALPHA: f32 = 20.0 / 255.0;

/// Pointer must come within this distance of a sampled point to hover.
const HOVER_RADIUS: f32 = 10.0;

const STROKE_WIDTH: f32 = 1.2;
const HIGHLIGHT_WIDTH: f32 = 2.0;
const HIGHLIGHT_ALPHA: f32 = 80.0 / 255.0;
const HIGHLIGHT_COLOR: Rgb = Rgb::new(255, 255, 255);

/// Owns the ten threads and the per-frame hover state. Hover is recomputed
/// from scratch each frame and never persisted; motion advances only on
/// frames where nothing is hovered.
pub(crate) struct ThreadField {
    threads: Vec<Thread>,
    hovered: Option<usize>,
}

impl ThreadField {
    pub(crate) fn new(rng: &mut fastrand::Rng) -> Result<Self, ColorError> {
        let colors = metrics::palette()?;
        let count = colors.len();
        let threads = Metric::iter()
            .zip(colors)
            .enumerate()
            .map(|(i, (metric, color))| {
                // Spread anchors linearly over the middle 60% of the band
                let spread = i as f32 / (count - 1) as f32;
                let base_y = BAND_HEIGHT * 0.2 + spread * BAND_HEIGHT * 0.6;
                Thread::new(metric, color, base_y, rng)
            })
            .collect();
        Ok(Self { threads, hovered: None })
    }

    pub(crate) fn threads(&self) -> &[Thread] {
        &self.threads
    }

    pub(crate) fn hovered(&self) -> Option<&Thread> {
        self.hovered.map(|i| &self.threads[i])
    }

    pub(crate) fn hovered_index(&self) -> Option<usize> {
        self.hovered
    }

    /// Proximity-test the pointer against every thread's sampled curve.
    /// First thread in creation order with any sample inside the radius wins;
    /// a pointer at or below the band edge never hovers. Pure and idempotent.
    pub(crate) fn hover_test(&self, pointer: Vec2) -> Option<usize> {
        if pointer.y >= BAND_HEIGHT {
            return None;
        }
        self.threads
            .iter()
            .position(|thread| thread.samples().iter().any(|p| p.dist(pointer) < HOVER_RADIUS))
    }

    /// Run one frame: recompute hover, draw every curve (the hovered one gets
    /// a second, thicker translucent stroke), then advance all threads if and
    /// only if none is hovered.
    pub(crate) fn frame(&mut self, canvas: &mut Canvas, pointer: Vec2) {
        self.hovered = self.hover_test(pointer);

        for (i, thread) in self.threads.iter().enumerate() {
            let points = thread.samples();
            canvas.stroke_polyline(&points, thread.color, STROKE_WIDTH, 1.0);
            if self.hovered == Some(i) {
                canvas.stroke_polyline(&points, HIGHLIGHT_COLOR, HIGHLIGHT_WIDTH, HIGHLIGHT_ALPHA);
            }
        }

        // Global pause: a single hovered thread freezes the whole field
        if self.hovered.is_none() {
            for thread in &mut self.threads {
                thread.advance();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_field() -> ThreadField {
        let mut rng = fastrand::Rng::with_seed(42);
        ThreadField::new(&mut rng).expect("failed to build field")
    }

    fn test_canvas() -> Canvas {
        Canvas::new(100, 94, FIELD_WIDTH, BAND_HEIGHT)
    }

    /// A pointer far from every sampled point and above the legend band.
    const FAR_POINTER: Vec2 = Vec2::new(-500.0, -500.0);

    fn motion_state(field: &ThreadField) -> Vec<(f32, f32)> {
        field.threads().iter().map(|t| (t.phase(), t.base_y())).collect()
    }

    /// Find a sample of `index` that no earlier thread's curve comes near, so
    /// a pointer there unambiguously hovers that thread.
    fn isolated_sample(field: &ThreadField, index: usize) -> Vec2 {
        field.threads()[index]
            .samples()
            .into_iter()
            .find(|p| {
                field.threads()[..index]
                    .iter()
                    .all(|other| other.samples().iter().all(|q| q.dist(*p) >= 10.0))
            })
            .expect("no isolated sample found")
    }

    #[test]
    fn creates_ten_threads_in_metric_order() {
        let field = seeded_field();
        assert_eq!(field.threads().len(), 10);
        assert_eq!(field.threads()[0].metric, Metric::WaterUse);
        assert_eq!(field.threads()[9].metric, Metric::RepairActions);
    }

    #[test]
    fn hover_test_is_idempotent() {
        let field = seeded_field();
        let pointer = field.threads()[4].samples()[20];
        assert_eq!(field.hover_test(pointer), field.hover_test(pointer));
    }

    #[test]
    fn first_thread_in_creation_order_wins_contested_hovers() {
        let field = seeded_field();
        for j in 0..field.threads().len() {
            let pointer = field.threads()[j].samples()[40];
            if pointer.y >= BAND_HEIGHT || pointer.y < 0.0 {
                continue;
            }
            let expected = (0..field.threads().len()).find(|&i| {
                field.threads()[i].samples().iter().any(|p| p.dist(pointer) < 10.0)
            });
            assert_eq!(field.hover_test(pointer), expected);
        }
    }

    #[test]
    fn pointer_at_an_isolated_sample_hovers_that_thread() {
        let field = seeded_field();
        let pointer = isolated_sample(&field, 3);
        if pointer.y >= 0.0 && pointer.y < BAND_HEIGHT {
            assert_eq!(field.hover_test(pointer), Some(3));
        }
    }

    #[test]
    fn pointer_below_the_band_never_hovers() {
        let mut field = seeded_field();
        let pointer = Vec2::new(400.0, BAND_HEIGHT + 10.0);
        assert_eq!(field.hover_test(pointer), None);
        let mut canvas = test_canvas();
        let before = motion_state(&field);
        field.frame(&mut canvas, pointer);
        assert_eq!(field.hovered_index(), None);
        // Legend-band pointers do not pause the animation
        assert_ne!(motion_state(&field), before);
    }

    #[test]
    fn far_pointer_keeps_all_threads_advancing() {
        let mut field = seeded_field();
        let mut canvas = test_canvas();
        let before = motion_state(&field);
        field.frame(&mut canvas, FAR_POINTER);
        assert_eq!(field.hovered_index(), None);
        for ((phase_before, y_before), thread) in before.iter().zip(field.threads()) {
            assert!(thread.phase() > *phase_before);
            let wrapped = thread.base_y() == BAND_HEIGHT + WRAP_MARGIN;
            assert!(thread.base_y() < *y_before || wrapped);
        }
    }

    #[test]
    fn hovered_frame_freezes_every_thread() {
        let mut field = seeded_field();
        let mut canvas = test_canvas();
        let pointer = isolated_sample(&field, 3);
        if pointer.y < 0.0 || pointer.y >= BAND_HEIGHT {
            return;
        }
        let before = motion_state(&field);
        field.frame(&mut canvas, pointer);
        assert_eq!(field.hovered_index(), Some(3));
        assert_eq!(motion_state(&field), before);

        // Motion resumes the frame the pointer leaves
        field.frame(&mut canvas, FAR_POINTER);
        assert_eq!(field.hovered_index(), None);
        assert_ne!(motion_state(&field), before);
    }

    #[test]
    fn hovered_thread_is_drawn_with_a_highlight() {
        let mut field = seeded_field();
        let pointer = isolated_sample(&field, 3);
        if pointer.y < 0.0 || pointer.y >= BAND_HEIGHT {
            return;
        }
        let mut plain = test_canvas();
        plain.fill(BACKGROUND);
        field.frame(&mut plain, FAR_POINTER);

        let mut field = seeded_field();
        let mut highlighted = test_canvas();
        highlighted.fill(BACKGROUND);
        field.frame(&mut highlighted, pointer);

        // The highlight pass whitens pixels along the hovered curve
        let differs = (0..plain.height())
            .any(|y| (0..plain.width()).any(|x| plain.pixel(x, y) != highlighted.pixel(x, y)));
        assert!(differs);
    }
}
