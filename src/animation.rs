//! The behavior capability attached to a pixel strip.

use embassy_time::Instant;

use crate::color::Rgb;
use crate::error::Error;
use crate::strip::StripCanvas;

/// A behavior that repaints one strip over time.
///
/// `reset` runs synchronously when the animation is attached and must leave
/// the strip in a defined initial state. `draw` runs once per tick with an
/// explicit clock and reports whether it changed any pixel; the client
/// flushes the frame over the network only when some animation did.
///
/// Implementations keep all cross-tick state in their own fields and write
/// pixels only through the canvas they are handed.
pub trait Animation {
    /// Put the animation (and optionally the strip) into its initial state.
    fn reset(&mut self, canvas: &mut StripCanvas<'_>);

    /// Paint one frame. Returns whether anything changed and a flush is due.
    fn draw(&mut self, now: Instant, canvas: &mut StripCanvas<'_>) -> Result<bool, Error>;

    /// Inject a numeric parameter from outside the tick loop.
    fn set_value(&mut self, _value: f64) {}

    /// Inject a color parameter from outside the tick loop.
    fn set_color(&mut self, _color: Rgb) {}

    /// Inject a brightness level from outside the tick loop.
    fn set_dimness(&mut self, _level: u8) {}

    /// Replace the background behavior, for animations that layer over one.
    fn set_background(&mut self, _background: Box<dyn Animation>) {}
}
