//! Theater-chase pairs of lights, speed driven by a live parameter.

use std::thread;
use std::time::Duration;

use opc_pixel_client::animations::TheaterLights;
use opc_pixel_client::color::rgb_from_u32;
use opc_pixel_client::{Animation, Error, Instant, OpcClient};

fn main() -> Result<(), Error> {
    env_logger::init();

    let host = std::env::var("OPC_SERVER").unwrap_or_else(|_| "raspberrypi.local".to_owned());
    let port = std::env::var("OPC_PORT")
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(7890);

    let mut client = OpcClient::new(host, port);
    let device = client.add_device();
    let strip = client.add_strip(device, 0, 64)?;
    println!("{}", client.server_config());

    let mut lights = TheaterLights::new(rgb_from_u32(0x00_00_DD));
    lights.set_value(0.8);
    client.set_animation(strip, lights);

    for _ in 0..1000 {
        client.animate(Instant::now())?;
        thread::sleep(Duration::from_millis(25));
    }

    client.clear_strip(strip);
    client.show();
    client.close();
    Ok(())
}
