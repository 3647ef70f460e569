//! A chasing spark: bright head pixel with a trailing flame.

use embassy_time::Instant;

use crate::animation::Animation;
use crate::color::Rgb;
use crate::error::Error;
use crate::strip::StripCanvas;

/// Colors of the chasing pixel, head first, cooling down the tail.
const TRAIL: [Rgb; 7] = [
    Rgb { r: 196, g: 196, b: 196 },
    Rgb { r: 128, g: 128, b: 0 },
    Rgb { r: 96, g: 64, b: 0 },
    Rgb { r: 64, g: 32, b: 0 },
    Rgb { r: 32, g: 0, b: 0 },
    Rgb { r: 16, g: 0, b: 0 },
    Rgb { r: 0, g: 0, b: 0 },
];

/// A white spark chasing around the strip, dragging a flame tail.
///
/// Advances one pixel per tick. Looks best on a closed ring.
pub struct Spark {
    current: usize,
}

impl Spark {
    pub fn new() -> Self {
        Self { current: 0 }
    }
}

impl Default for Spark {
    fn default() -> Self {
        Self::new()
    }
}

impl Animation for Spark {
    fn reset(&mut self, _canvas: &mut StripCanvas<'_>) {
        self.current = 0;
    }

    fn draw(&mut self, _now: Instant, canvas: &mut StripCanvas<'_>) -> Result<bool, Error> {
        let count = canvas.pixel_count();
        for (steps, color) in TRAIL.iter().enumerate() {
            canvas.set_pixel(behind(self.current, steps, count), *color)?;
        }
        self.current = (self.current + 1) % count;
        Ok(true)
    }
}

/// Pixel number `steps` behind `from`, wrapping at the strip end.
fn behind(from: usize, steps: usize, count: usize) -> usize {
    (from + count - steps % count) % count
}
