use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError};
use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
pub struct HueSettings {
    pub addr: String,
    pub username: String,
    pub use_https: bool,
    pub self_signed_cert: Option<String>,
    pub disable_host_name_verification: Option<bool>,
}

#[derive(Clone, Deserialize, Debug)]
pub struct SerialSettings {
    /// Explicit device path, also settable through the `SERIAL_PORT` env var
    pub device: Option<String>,
    pub device_glob: String,
    pub baud_rate: u32,
}

#[derive(Clone, Deserialize, Debug)]
pub struct ReceiverSettings {
    pub power_debounce_ms: u64,
}

#[derive(Clone, Deserialize, Debug)]
pub struct Settings {
    pub hue_bridge: HueSettings,
    pub serial: SerialSettings,
    pub receiver: ReceiverSettings,
}

#[cfg(target_os = "macos")]
const DEFAULT_DEVICE_GLOB: &str = "/dev/cu.*usbserial*";

#[cfg(not(target_os = "macos"))]
const DEFAULT_DEVICE_GLOB: &str = "/dev/ttyUSB*";

fn settings_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("hue_bridge.use_https", false)?
        .set_default("serial.device_glob", DEFAULT_DEVICE_GLOB)?
        .set_default("serial.baud_rate", 9600)?
        .set_default("receiver.power_debounce_ms", 500)
}

pub fn read_settings() -> Result<Settings, ConfigError> {
    settings_with_defaults()?
        .add_source(config::File::with_name("Settings").required(false))
        .add_source(
            config::Environment::with_prefix("IR_HUE")
                .prefix_separator("__")
                .separator("__"),
        )
        .set_override_option("serial.device", std::env::var("SERIAL_PORT").ok())?
        .build()?
        .try_deserialize::<Settings>()
}
