use async_trait::async_trait;
use color_eyre::Result;
use eyre::eyre;
use log::{debug, info};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_serial::{DataBits, Parity, SerialPortBuilderExt, SerialStream, StopBits};

use crate::settings::SerialSettings;

/// Message type of records carrying a decoded IR code.
const IR_MESSAGE: &str = "IR";

#[async_trait]
pub trait IrCodeHandler: Send {
    async fn handle_ir_code(&mut self, code: &str);
}

/// Returns the explicitly configured device, or the first one matching the
/// configured glob pattern.
pub fn resolve_serial_device(settings: &SerialSettings) -> Result<String> {
    if let Some(device) = &settings.device {
        return Ok(device.clone());
    }

    let device = glob::glob(&settings.device_glob)?
        .filter_map(|path| path.ok())
        .next()
        .ok_or_else(|| {
            eyre!(
                "Can't find a serial port matching {}. Set SERIAL_PORT to choose one.",
                settings.device_glob
            )
        })?;

    Ok(device.to_string_lossy().into_owned())
}

pub fn mk_serial_stream(device: &str, settings: &SerialSettings) -> Result<SerialStream> {
    let stream = tokio_serial::new(device, settings.baud_rate)
        .data_bits(DataBits::Eight)
        .stop_bits(StopBits::One)
        .parity(Parity::None)
        .open_native_async()?;

    Ok(stream)
}

/// Splits a `TYPE,PAYLOAD` record on its first comma.
pub fn parse_record(line: &str) -> Option<(&str, &str)> {
    line.trim_end_matches(['\r', '\n']).split_once(',')
}

/// Forwards the payload of every `IR` record to `handler` until the stream
/// ends. The first line is discarded, it is usually a partial record or the
/// receiver's startup banner.
pub async fn read_ir_codes<R, H>(mut reader: R, handler: &mut H) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    H: IrCodeHandler,
{
    let mut buf = Vec::new();

    if reader.read_until(b'\n', &mut buf).await? == 0 {
        info!("Serial stream closed before the first line");
        return Ok(());
    }

    loop {
        buf.clear();

        if reader.read_until(b'\n', &mut buf).await? == 0 {
            info!("Serial stream closed");
            return Ok(());
        }

        let line = String::from_utf8_lossy(&buf);

        match parse_record(&line) {
            Some((IR_MESSAGE, code)) => handler.handle_ir_code(code).await,
            Some((message, _)) => debug!("Ignoring {} message", message),
            None => debug!("Ignoring malformed line: {:?}", line),
        }
    }
}
