//! Device geometry and address translation.

use embassy_time::Instant;

use crate::error::Error;
use crate::frame::FrameBuffer;
use crate::strip::PixelStrip;

/// Output lines per device.
pub const LINES_PER_DEVICE: usize = 8;

/// Pixel budget of one output line.
pub const LINE_CAPACITY: usize = 64;

/// Pixel budget of one device; also the packet address stride between
/// devices on the same client.
pub const DEVICE_CAPACITY: usize = 512;

/// One gateway device: eight output lines sharing a 512-pixel address space.
///
/// Strips are append-only. Packet offsets run densely in attachment order
/// across the whole device; line offsets run densely per line. The two
/// numbering schemes cover the same pixels and are never mixed.
pub struct Device {
    base_offset: usize,
    pixel_count: usize,
    lines: [Vec<PixelStrip>; LINES_PER_DEVICE],
}

impl Device {
    pub(crate) fn new(base_offset: usize) -> Self {
        Self {
            base_offset,
            pixel_count: 0,
            lines: core::array::from_fn(|_| Vec::new()),
        }
    }

    /// Total pixels attached across all lines.
    pub fn pixel_count(&self) -> usize {
        self.pixel_count
    }

    /// First packet offset of this device's address space.
    pub fn base_offset(&self) -> usize {
        self.base_offset
    }

    /// Highest packet offset this device occupies, exclusive.
    pub(crate) fn max_packet_offset(&self) -> usize {
        self.base_offset + self.pixel_count
    }

    /// Attach a strip to `line`, assigning both of its offsets.
    ///
    /// All-or-nothing: every precondition is checked before anything is
    /// recorded, so a failed attach leaves the device untouched.
    pub(crate) fn attach(
        &mut self,
        line: u8,
        pixel_count: usize,
        description: Option<String>,
    ) -> Result<usize, Error> {
        if usize::from(line) >= LINES_PER_DEVICE {
            return Err(Error::InvalidArgument("line number must be 0-7"));
        }
        if pixel_count == 0 || pixel_count > LINE_CAPACITY {
            return Err(Error::InvalidArgument("strip length must be 1-64 pixels"));
        }
        let slot = &self.lines[usize::from(line)];
        let on_line: usize = slot.iter().map(PixelStrip::pixel_count).sum();
        if on_line + pixel_count > LINE_CAPACITY {
            return Err(Error::CapacityExceeded {
                requested: pixel_count,
                available: LINE_CAPACITY - on_line,
            });
        }
        if self.pixel_count + pixel_count > DEVICE_CAPACITY {
            return Err(Error::CapacityExceeded {
                requested: pixel_count,
                available: DEVICE_CAPACITY - self.pixel_count,
            });
        }

        let packet_offset = self.base_offset + self.pixel_count;
        let line_offset = usize::from(line) * LINE_CAPACITY + on_line;
        let strip = PixelStrip::new(line, pixel_count, line_offset, packet_offset, description);
        let slot = &mut self.lines[usize::from(line)];
        slot.push(strip);
        self.pixel_count += pixel_count;
        Ok(slot.len() - 1)
    }

    /// Draw every attached animation, lines in numeric order, strips in
    /// attachment order. Returns whether any strip changed.
    pub(crate) fn animate(&mut self, now: Instant, frame: &mut FrameBuffer) -> Result<bool, Error> {
        let mut changed = false;
        for line in &mut self.lines {
            for strip in line {
                changed |= strip.animate(now, frame)?;
            }
        }
        Ok(changed)
    }

    /// Strips in line order, then attachment order within each line.
    pub fn strips(&self) -> impl Iterator<Item = &PixelStrip> {
        self.lines.iter().flatten()
    }

    pub(crate) fn strip(&self, line: u8, slot: usize) -> &PixelStrip {
        &self.lines[usize::from(line)][slot]
    }

    pub(crate) fn strip_mut(&mut self, line: u8, slot: usize) -> &mut PixelStrip {
        &mut self.lines[usize::from(line)][slot]
    }
}
