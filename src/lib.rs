pub mod animation;
pub mod animations;
pub mod client;
pub mod color;
pub mod config;
pub mod device;
pub mod error;
pub mod frame;
pub mod protocol;
pub mod strip;
pub mod transport;

pub use animation::Animation;
pub use client::{DeviceId, OpcClient, StripId};
pub use color::{BLACK, Rgb, fade, rgb_from_u32, rgb_to_u32};
pub use config::ServerConfig;
pub use device::{DEVICE_CAPACITY, Device, LINE_CAPACITY, LINES_PER_DEVICE};
pub use error::Error;
pub use frame::FrameBuffer;
pub use strip::{PixelStrip, StripCanvas};
pub use transport::TcpTransport;

pub use embassy_time::{Duration, Instant};

/// Abstract byte-stream transport to the pixel gateway.
///
/// Implement this trait to drive something other than a TCP socket.
/// The client writes whole packets and treats any failure as a lost
/// connection: it closes the transport and reopens it on the next flush.
pub trait Transport {
    /// Establish the connection. A no-op if already open.
    fn open(&mut self) -> std::io::Result<()>;

    /// Write one complete packet.
    fn write_all(&mut self, packet: &[u8]) -> std::io::Result<()>;

    /// Tear the connection down, discarding any underlying handle.
    fn close(&mut self);

    /// Whether the connection is currently established.
    fn is_open(&self) -> bool;
}
