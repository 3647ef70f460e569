//! Open Pixel Control wire format constants and fixed packets.
//!
//! Every message is `[channel, command, length_hi, length_lo]` followed by
//! `length` payload bytes, written raw with no delimiter or acknowledgment.

/// The single OPC channel this client drives.
pub const CHANNEL: u8 = 0;

/// Set-pixel-colors command: the payload is one RGB triple per pixel.
pub const CMD_SET_PIXEL_COLORS: u8 = 0x00;

/// System-exclusive command carrying vendor extensions.
pub const CMD_SYSTEM_EXCLUSIVE: u8 = 0xFF;

/// System id of the gateway's extension space.
pub const SYSTEM_ID: u16 = 0x0001;

/// Sub-command id of the firmware configuration message.
pub const FIRMWARE_CONFIG_ID: u16 = 0x0002;

/// Firmware flag: temporal dithering disabled while set.
pub const CFG_DISABLE_DITHERING: u8 = 0x01;

/// Firmware flag: inter-frame interpolation disabled while set.
pub const CFG_DISABLE_INTERPOLATION: u8 = 0x02;

/// Header bytes preceding pixel data in every packet.
pub const HEADER_LEN: usize = 4;

/// Bytes per pixel on the wire, red first.
pub const BYTES_PER_PIXEL: usize = 3;

/// Build the 9-byte firmware configuration packet.
///
/// Layout: channel, system-exclusive command, big-endian length (always 5),
/// system id, firmware-config sub-command, then the flag byte. The flags are
/// inverted relative to the public enable/disable calls: a set bit disables
/// the feature on the gateway.
pub fn firmware_config_packet(channel: u8, flags: u8) -> [u8; 9] {
    let system = SYSTEM_ID.to_be_bytes();
    let command = FIRMWARE_CONFIG_ID.to_be_bytes();
    [
        channel,
        CMD_SYSTEM_EXCLUSIVE,
        0x00,
        0x05,
        system[0],
        system[1],
        command[0],
        command[1],
        flags,
    ]
}
