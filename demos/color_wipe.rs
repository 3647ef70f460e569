//! Color wipe and rainbow sweep against a live gateway.
//!
//! Configuration comes from the environment: `OPC_SERVER`, `OPC_PORT` and
//! `OPC_STRIP_COUNT`.

use std::thread;
use std::time::Duration;

use opc_pixel_client::color::{color_wheel, rgb_from_u32};
use opc_pixel_client::{Error, OpcClient};

const WAIT: Duration = Duration::from_millis(50);

#[allow(clippy::cast_possible_truncation)]
fn main() -> Result<(), Error> {
    env_logger::init();

    let host = std::env::var("OPC_SERVER").unwrap_or_else(|_| "raspberrypi.local".to_owned());
    let port = std::env::var("OPC_PORT")
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(7890);
    let pixels = std::env::var("OPC_STRIP_COUNT")
        .ok()
        .and_then(|count| count.parse().ok())
        .unwrap_or(64);

    let mut client = OpcClient::new(host, port);
    let device = client.add_device();
    let strip = client.add_strip(device, 0, pixels)?;
    println!("{}", client.server_config());

    // Color wipe in red, green and blue
    for color in [0xFF_00_00, 0x00_FF_00, 0x00_00_FF] {
        for index in 0..pixels {
            client.set_pixel_color(strip, index, rgb_from_u32(color))?;
            client.show();
            thread::sleep(WAIT);
        }
        client.clear();
        client.show();
    }

    // Rainbow sweep
    for step in 0..256 {
        for index in 0..pixels {
            let pos = ((index + step) % 256) as u8;
            client.set_pixel_color(strip, index, color_wheel(pos))?;
        }
        client.show();
        thread::sleep(WAIT);
    }

    client.clear();
    client.show();
    client.close();
    Ok(())
}
