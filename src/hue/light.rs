use derive_builder::Builder;

/// Highest hue value understood by the bridge.
pub const HUE_MAX: u16 = 65535;

/// Highest brightness and saturation value understood by the bridge.
pub const LEVEL_MAX: u8 = 255;

/// Current state of a light as last reported by the bridge.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Light {
    pub id: String,
    pub name: String,
    pub on: bool,
    pub hue: Option<u16>,
    pub brightness: Option<u8>,
    pub saturation: Option<u8>,
}

/// State change to push to a light. Fields left unset are not sent.
#[derive(Builder, Clone, Debug, Default, PartialEq)]
#[builder(setter(into, strip_option), default)]
pub struct LightState {
    pub on: Option<bool>,
    pub hue: Option<u16>,
    pub brightness: Option<u8>,
    pub saturation: Option<u8>,
}

impl LightState {
    /// Fills in `on: true` unless the state already decides power itself.
    pub fn turned_on(mut self) -> Self {
        self.on.get_or_insert(true);
        self
    }
}
