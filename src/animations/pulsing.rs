//! Pulses every pixel through a palette of colors.

use embassy_time::{Duration, Instant};

use crate::animation::Animation;
use crate::color::{Rgb, fade};
use crate::error::Error;
use crate::strip::StripCanvas;

const DEFAULT_CYCLE: Duration = Duration::from_millis(2000);

/// Pulses the strip through a palette, one palette slot per pixel position,
/// with the brightness riding a sine over the cycle. Slots are phase-shifted
/// against each other so the strip shimmers instead of breathing in unison.
pub struct Pulsing {
    cycle: Duration,
    palette: Vec<Rgb>,
}

impl Pulsing {
    pub fn new() -> Self {
        Self {
            cycle: DEFAULT_CYCLE,
            palette: vec![
                Rgb { r: 0, g: 128, b: 0 },
                Rgb { r: 64, g: 64, b: 0 },
            ],
        }
    }

    /// Pulse through a custom palette.
    #[must_use]
    pub fn with_palette(mut self, palette: Vec<Rgb>) -> Self {
        self.palette = palette;
        self
    }

    /// Use a custom pulse cycle.
    #[must_use]
    pub fn with_cycle(mut self, cycle: Duration) -> Self {
        self.cycle = cycle;
        self
    }

    /// Sine-shaped brightness for a point in the cycle.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn pulse(&self, into_cycle: u64) -> u8 {
        let theta = core::f64::consts::TAU * into_cycle as f64 / self.cycle.as_millis() as f64;
        let level = (libm::sin(theta) + 1.0) / 2.0;
        libm::round(level * 256.0).min(255.0) as u8
    }
}

impl Default for Pulsing {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for Pulsing {
    fn reset(&mut self, _canvas: &mut StripCanvas<'_>) {}

    #[allow(clippy::cast_possible_truncation)]
    fn draw(&mut self, now: Instant, canvas: &mut StripCanvas<'_>) -> Result<bool, Error> {
        if self.palette.is_empty() {
            return Ok(false);
        }
        let cycle_ms = self.cycle.as_millis().max(1);
        let into_cycle = now.as_millis() % cycle_ms;
        for pixel in 0..canvas.pixel_count() {
            let slot = pixel % self.palette.len();
            let shift = slot as u64 * (cycle_ms / self.palette.len() as u64);
            let brightness = self.pulse((into_cycle + shift) % cycle_ms);
            canvas.set_pixel(pixel, fade(self.palette[slot], brightness))?;
        }
        Ok(true)
    }
}
