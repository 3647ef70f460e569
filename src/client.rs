//! Client-side orchestration: addressing, buffering and the tick loop.

use embassy_time::Instant;

use crate::Transport;
use crate::animation::Animation;
use crate::color::{BLACK, Rgb};
use crate::config::{DeviceConfig, ServerConfig};
use crate::device::{DEVICE_CAPACITY, Device};
use crate::error::Error;
use crate::frame::FrameBuffer;
use crate::protocol::{self, CFG_DISABLE_DITHERING, CFG_DISABLE_INTERPOLATION};
use crate::strip::PixelStrip;
use crate::transport::TcpTransport;

/// Handle to a device attached to a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceId(usize);

/// Handle to a strip attached to a client.
///
/// Handles stay valid for the client's lifetime; strips are append-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripId {
    device: usize,
    line: u8,
    slot: usize,
}

/// A connection to one pixel gateway plus everything attached to it.
///
/// The client owns the outgoing frame buffer; devices and strips reach it
/// only through the offsets assigned when they were attached. One call to
/// [`Self::animate`] is one tick: draw every attached animation, then flush
/// the frame over the network at most once, and only if something changed.
pub struct OpcClient<T = TcpTransport> {
    transport: T,
    devices: Vec<Device>,
    frame: FrameBuffer,
    firmware_config: u8,
    dithering: bool,
    interpolation: bool,
}

impl OpcClient<TcpTransport> {
    /// Create a client for the gateway at `host:port`.
    ///
    /// The connection opens lazily on the first flush. Dithering starts
    /// enabled and interpolation disabled, so pixels respond instantly.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self::with_transport(TcpTransport::new(host, port))
    }

    /// Render the gateway's JSON configuration for this client's layout.
    pub fn server_config(&self) -> String {
        let devices = self
            .devices
            .iter()
            .map(|device| DeviceConfig {
                kind: "fadecandy".to_owned(),
                dither: self.dithering,
                interpolate: self.interpolation,
                map: device
                    .strips()
                    .map(|strip| {
                        (
                            protocol::CHANNEL,
                            strip.packet_offset(),
                            strip.line_offset(),
                            strip.pixel_count(),
                        )
                    })
                    .collect(),
            })
            .collect();
        ServerConfig {
            listen: (self.transport.host().to_owned(), self.transport.port()),
            verbose: true,
            devices,
        }
        .to_json()
    }
}

impl<T: Transport> OpcClient<T> {
    /// Create a client over a custom transport.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            devices: Vec::new(),
            frame: FrameBuffer::new(protocol::CHANNEL),
            firmware_config: CFG_DISABLE_INTERPOLATION,
            dithering: true,
            interpolation: false,
        }
    }

    /// Attach a new device. Its packet address space starts at the next
    /// multiple of 512.
    pub fn add_device(&mut self) -> DeviceId {
        let base = self.devices.len() * DEVICE_CAPACITY;
        self.devices.push(Device::new(base));
        self.frame.invalidate();
        DeviceId(self.devices.len() - 1)
    }

    /// Attach a strip of `pixel_count` pixels to `line` on `device`.
    pub fn add_strip(
        &mut self,
        device: DeviceId,
        line: u8,
        pixel_count: usize,
    ) -> Result<StripId, Error> {
        self.attach_strip(device, line, pixel_count, None)
    }

    /// Attach a strip carrying a human-readable description.
    pub fn add_strip_with_description(
        &mut self,
        device: DeviceId,
        line: u8,
        pixel_count: usize,
        description: &str,
    ) -> Result<StripId, Error> {
        self.attach_strip(device, line, pixel_count, Some(description.to_owned()))
    }

    fn attach_strip(
        &mut self,
        device: DeviceId,
        line: u8,
        pixel_count: usize,
        description: Option<String>,
    ) -> Result<StripId, Error> {
        let slot = self.devices[device.0].attach(line, pixel_count, description)?;
        self.frame.invalidate();
        Ok(StripId {
            device: device.0,
            line,
            slot,
        })
    }

    pub fn device(&self, id: DeviceId) -> &Device {
        &self.devices[id.0]
    }

    pub fn strip(&self, id: StripId) -> &PixelStrip {
        self.devices[id.device].strip(id.line, id.slot)
    }

    /// Attach an animation to a strip, replacing any current one.
    ///
    /// A replaced animation's pixels are cleared first; the new animation's
    /// `reset` runs synchronously before this returns.
    pub fn set_animation(&mut self, id: StripId, animation: impl Animation + 'static) {
        self.ensure_frame();
        if self.strip(id).animation().is_some() {
            self.clear_strip(id);
        }
        let strip = self.devices[id.device].strip_mut(id.line, id.slot);
        strip.animation = Some(Box::new(animation));
        strip.reset_animation(&mut self.frame);
    }

    /// Detach the strip's animation and black out its pixels.
    pub fn clear_animation(&mut self, id: StripId) {
        self.devices[id.device].strip_mut(id.line, id.slot).animation = None;
        self.clear_strip(id);
    }

    /// Forward a numeric parameter to the strip's animation, if any.
    pub fn set_value(&mut self, id: StripId, value: f64) {
        if let Some(animation) = self.devices[id.device]
            .strip_mut(id.line, id.slot)
            .animation
            .as_mut()
        {
            animation.set_value(value);
        }
    }

    /// Write one pixel on `strip` by strip-local index.
    pub fn set_pixel_color(&mut self, id: StripId, index: usize, color: Rgb) -> Result<(), Error> {
        self.ensure_frame();
        let strip = self.devices[id.device].strip(id.line, id.slot);
        if index >= strip.pixel_count() {
            return Err(Error::OutOfRange {
                index,
                count: strip.pixel_count(),
            });
        }
        self.frame.set_pixel(strip.packet_offset() + index, color);
        Ok(())
    }

    /// Read one pixel back from the outgoing packet.
    ///
    /// Takes `&mut self` because the first access after a layout change
    /// rebuilds the frame buffer.
    pub fn pixel_color(&mut self, id: StripId, index: usize) -> Result<Rgb, Error> {
        self.ensure_frame();
        let strip = self.devices[id.device].strip(id.line, id.slot);
        if index >= strip.pixel_count() {
            return Err(Error::OutOfRange {
                index,
                count: strip.pixel_count(),
            });
        }
        Ok(self.frame.pixel(strip.packet_offset() + index))
    }

    /// Reset every pixel on every device to black.
    pub fn clear(&mut self) {
        self.ensure_frame();
        self.frame.clear_pixels();
    }

    /// Reset one strip's pixels to black.
    pub fn clear_strip(&mut self, id: StripId) {
        self.ensure_frame();
        let strip = self.devices[id.device].strip(id.line, id.slot);
        let offset = strip.packet_offset();
        for index in 0..strip.pixel_count() {
            self.frame.set_pixel(offset + index, BLACK);
        }
    }

    /// Run one tick: draw every attached animation and flush once if any of
    /// them changed a pixel.
    ///
    /// Devices run in attachment order, lines in numeric order, strips in
    /// attachment order. Returns whether a flush happened.
    pub fn animate(&mut self, now: Instant) -> Result<bool, Error> {
        self.ensure_frame();
        let mut changed = false;
        for device in &mut self.devices {
            changed |= device.animate(now, &mut self.frame)?;
        }
        if changed {
            self.show();
        }
        Ok(changed)
    }

    /// Flush the full frame buffer to the gateway.
    ///
    /// Opens the connection if needed. A failed write closes the transport;
    /// the next flush reopens it.
    pub fn show(&mut self) {
        self.ensure_frame();
        if !self.connect() {
            return;
        }
        if let Err(err) = self.transport.write_all(self.frame.as_bytes()) {
            log::warn!("gateway write failed, closing connection: {err}");
            self.transport.close();
        }
    }

    /// Enable or disable temporal dithering on the gateway.
    pub fn set_dithering(&mut self, enabled: bool) {
        self.dithering = enabled;
        if enabled {
            self.firmware_config &= !CFG_DISABLE_DITHERING;
        } else {
            self.firmware_config |= CFG_DISABLE_DITHERING;
        }
        self.send_firmware_config();
    }

    /// Enable or disable inter-frame interpolation on the gateway.
    ///
    /// With interpolation off (the default), pixels respond instantly.
    pub fn set_interpolation(&mut self, enabled: bool) {
        self.interpolation = enabled;
        if enabled {
            self.firmware_config &= !CFG_DISABLE_INTERPOLATION;
        } else {
            self.firmware_config |= CFG_DISABLE_INTERPOLATION;
        }
        self.send_firmware_config();
    }

    /// The firmware flag byte as it would go on the wire.
    pub fn firmware_config(&self) -> u8 {
        self.firmware_config
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_open()
    }

    /// Close the gateway connection. The next flush reopens it.
    pub fn close(&mut self) {
        self.transport.close();
    }

    /// The raw outgoing packet, allocating it if the layout changed.
    pub fn packet(&mut self) -> &[u8] {
        self.ensure_frame();
        self.frame.as_bytes()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Rebuild the frame buffer if a device or strip was added since the
    /// last access.
    fn ensure_frame(&mut self) {
        let span = self
            .devices
            .iter()
            .map(Device::max_packet_offset)
            .max()
            .unwrap_or(0);
        self.frame.ensure_ready(span);
    }

    /// Send the firmware configuration, opening the connection if needed.
    ///
    /// A fresh open already carries the latest flags, so this writes the
    /// packet only on an already-open connection.
    fn send_firmware_config(&mut self) {
        if self.transport.is_open() {
            let packet = protocol::firmware_config_packet(protocol::CHANNEL, self.firmware_config);
            if let Err(err) = self.transport.write_all(&packet) {
                log::warn!("firmware config write failed, closing connection: {err}");
                self.transport.close();
            }
        } else {
            self.connect();
        }
    }

    /// Open the connection if needed. Every fresh open sends the firmware
    /// configuration before anything else.
    fn connect(&mut self) -> bool {
        if self.transport.is_open() {
            return true;
        }
        if let Err(err) = self.transport.open() {
            log::warn!("failed to open gateway connection: {err}");
            self.transport.close();
            return false;
        }
        log::info!("connected to pixel gateway");
        let packet = protocol::firmware_config_packet(protocol::CHANNEL, self.firmware_config);
        if let Err(err) = self.transport.write_all(&packet) {
            log::warn!("firmware config write failed, closing connection: {err}");
            self.transport.close();
            return false;
        }
        true
    }
}
