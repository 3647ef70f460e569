//! Drive the pulsing animation on one strip.

use std::thread;
use std::time::Duration;

use opc_pixel_client::animations::Pulsing;
use opc_pixel_client::{Error, Instant, OpcClient};

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

    client.set_animation(strip, Pulsing::new());
    for _ in 0..1000 {
        client.animate(Instant::now())?;
        thread::sleep(Duration::from_millis(100));
    }

    client.clear();
    client.show();
    client.close();
    Ok(())
}
