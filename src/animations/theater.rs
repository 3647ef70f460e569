//! Theater-style chase: pairs of lit pixels traveling down the strip.

use embassy_time::{Duration, Instant};

use crate::animation::Animation;
use crate::color::{BLACK, Rgb};
use crate::error::Error;
use crate::strip::StripCanvas;

/// Fastest cycle: twenty steps per second.
const FAST: Duration = Duration::from_millis(50);
/// Slowest cycle: one step per second.
const SLOW: Duration = Duration::from_millis(1000);
/// Lit pixels per group.
const GROUP: usize = 2;

/// Pairs of lights traveling down the strip.
///
/// The chase advances one state per cycle; [`Animation::set_value`] maps a
/// -1.0..1.0 reading onto the cycle time, so the chase speeds up as the
/// magnitude grows.
pub struct TheaterLights {
    color: Rgb,
    state: usize,
    cycle: Duration,
    /// Time of the next state change.
    change_at: Instant,
}

impl TheaterLights {
    pub fn new(color: Rgb) -> Self {
        Self {
            color,
            state: 0,
            cycle: Duration::from_millis(100),
            change_at: Instant::from_millis(0),
        }
    }
}

impl Animation for TheaterLights {
    fn reset(&mut self, _canvas: &mut StripCanvas<'_>) {
        self.state = 0;
        self.change_at = Instant::from_millis(0);
    }

    fn draw(&mut self, now: Instant, canvas: &mut StripCanvas<'_>) -> Result<bool, Error> {
        if now < self.change_at {
            return Ok(false);
        }
        self.state = (self.state + 1) % (GROUP * 2);
        for index in 0..canvas.pixel_count() {
            let phase = (index + self.state) % (GROUP * 2);
            let color = if phase >= GROUP { self.color } else { BLACK };
            canvas.set_pixel(index, color)?;
        }
        self.change_at = now + self.cycle;
        Ok(true)
    }

    /// Map `value` in -1.0..1.0 onto the cycle time; magnitude wins, the
    /// sign is ignored. Clamped to the 50 ms..1000 ms range.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn set_value(&mut self, value: f64) {
        let fast = FAST.as_millis() as f64;
        let slow = SLOW.as_millis() as f64;
        let millis = slow - (slow - fast) * libm::fabs(value);
        self.cycle = Duration::from_millis(libm::round(millis.clamp(fast, slow)) as u64);
    }
}
