use color_eyre::Result;
use hue::client::HueClient;
use ir::receiver::Receiver;
use log::info;
use protocols::https::mk_hyper_https_client;
use protocols::serial::{mk_serial_stream, read_ir_codes, resolve_serial_device};
use tokio::io::BufReader;

use crate::settings::read_settings;

mod hue;
mod ir;
mod protocols;
mod settings;

#[cfg(test)]
mod test_helper;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    pretty_env_logger::formatted_builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let settings = read_settings()?;
    let device = resolve_serial_device(&settings.serial)?;
    let https_client = mk_hyper_https_client(&settings.hue_bridge)?;

    let hue_client = HueClient::new(&settings.hue_bridge, &https_client);
    let mut receiver = Receiver::new(hue_client, &settings.receiver);

    info!("Listening for IR codes on {}", device);
    let serial_stream = mk_serial_stream(&device, &settings.serial)?;

    read_ir_codes(BufReader::new(serial_stream), &mut receiver).await?;

    Ok(())
}
