//! A contiguous run of pixels on one physical output line.

use embassy_time::Instant;

use crate::animation::Animation;
use crate::color::{BLACK, Rgb};
use crate::error::Error;
use crate::frame::FrameBuffer;

/// One strip of 1-64 pixels on a single output line.
///
/// A strip carries two independent addresses, both assigned when it is
/// attached and fixed for its lifetime: its offset within the outgoing
/// packet (attachment order within the device) and its offset within the
/// gateway's physical output map (64-pixel slots per line).
pub struct PixelStrip {
    line: u8,
    pixel_count: usize,
    line_offset: usize,
    packet_offset: usize,
    description: Option<String>,
    pub(crate) animation: Option<Box<dyn Animation>>,
}

impl PixelStrip {
    pub(crate) fn new(
        line: u8,
        pixel_count: usize,
        line_offset: usize,
        packet_offset: usize,
        description: Option<String>,
    ) -> Self {
        Self {
            line,
            pixel_count,
            line_offset,
            packet_offset,
            description,
            animation: None,
        }
    }

    /// Number of pixels in this strip.
    pub fn pixel_count(&self) -> usize {
        self.pixel_count
    }

    /// Output line on the device, 0-7.
    pub fn line(&self) -> u8 {
        self.line
    }

    /// Position of the strip's first pixel within the outgoing packet.
    pub fn packet_offset(&self) -> usize {
        self.packet_offset
    }

    /// Position of the strip's first pixel in the gateway's output map.
    pub fn line_offset(&self) -> usize {
        self.line_offset
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The currently attached animation, if any.
    pub fn animation(&self) -> Option<&dyn Animation> {
        self.animation.as_deref()
    }

    /// Draw the attached animation, if any.
    pub(crate) fn animate(&mut self, now: Instant, frame: &mut FrameBuffer) -> Result<bool, Error> {
        let Some(animation) = self.animation.as_mut() else {
            return Ok(false);
        };
        let mut canvas = StripCanvas::new(frame, self.packet_offset, self.pixel_count);
        animation.draw(now, &mut canvas)
    }

    /// Run the attached animation's `reset` against this strip.
    pub(crate) fn reset_animation(&mut self, frame: &mut FrameBuffer) {
        if let Some(animation) = self.animation.as_mut() {
            let mut canvas = StripCanvas::new(frame, self.packet_offset, self.pixel_count);
            animation.reset(&mut canvas);
        }
    }
}

/// Write view over one strip's slice of the frame buffer.
///
/// This is the only surface an [`Animation`] paints through. Indices are
/// strip-local; the canvas translates them to packet offsets.
pub struct StripCanvas<'a> {
    frame: &'a mut FrameBuffer,
    packet_offset: usize,
    pixel_count: usize,
}

impl<'a> StripCanvas<'a> {
    pub(crate) fn new(frame: &'a mut FrameBuffer, packet_offset: usize, pixel_count: usize) -> Self {
        Self {
            frame,
            packet_offset,
            pixel_count,
        }
    }

    /// Number of pixels this canvas covers.
    pub fn pixel_count(&self) -> usize {
        self.pixel_count
    }

    /// Set one pixel by strip-local index.
    pub fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), Error> {
        if index >= self.pixel_count {
            return Err(Error::OutOfRange {
                index,
                count: self.pixel_count,
            });
        }
        self.frame.set_pixel(self.packet_offset + index, color);
        Ok(())
    }

    /// Read one pixel back by strip-local index.
    pub fn pixel(&self, index: usize) -> Result<Rgb, Error> {
        if index >= self.pixel_count {
            return Err(Error::OutOfRange {
                index,
                count: self.pixel_count,
            });
        }
        Ok(self.frame.pixel(self.packet_offset + index))
    }

    /// Paint every pixel on the strip with one color.
    pub fn fill(&mut self, color: Rgb) {
        for index in 0..self.pixel_count {
            self.frame.set_pixel(self.packet_offset + index, color);
        }
    }

    /// Reset every pixel on the strip to black.
    pub fn clear(&mut self) {
        self.fill(BLACK);
    }
}
