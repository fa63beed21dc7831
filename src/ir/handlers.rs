use palette::Srgb;

use crate::hue::light::{LightState, HUE_MAX, LEVEL_MAX};

use super::codes::Action;

pub const HUE_STEP: i32 = 2000;
pub const BRIGHTNESS_STEP: i32 = 25;
pub const SATURATION_STEP: i32 = 25;

/// Transition time used by color buttons
pub const DEFAULT_WAIT: u16 = 4;

/// Transition time used by power, stepping and random buttons
pub const QUICK_WAIT: u16 = 1;

/// What a button does to the lights.
#[derive(Clone, Debug, PartialEq)]
pub enum Handler {
    /// Debounced on/off toggle
    Power,

    /// Fixed RGB color, converted through HSL
    Primary(Srgb<u8>),

    /// Fixed hue/brightness/saturation
    Fixed(LightState),

    /// Step the first light's hue, wrapping around
    Hue(i32),

    /// Step the first light's brightness, clamped
    Brightness(i32),

    /// Step the first light's saturation, clamped
    Saturation(i32),

    /// Independent random color per light
    RandomEach,

    /// Shared random hue and brightness at full saturation
    RandomSaturated,

    /// Shared random hue, brightness and saturation
    Random,
}

impl Action {
    /// Returns `None` for buttons that are known but do nothing.
    pub fn handler(self) -> Option<Handler> {
        let handler = match self {
            Action::Power => Handler::Power,
            Action::Red => Handler::Primary(Srgb::new(255, 0, 0)),
            Action::Green => Handler::Primary(Srgb::new(0, 255, 0)),
            Action::Blue => Handler::Primary(Srgb::new(0, 0, 255)),
            Action::Yellow => Handler::Fixed(LightState {
                on: None,
                hue: Some(8000),
                brightness: Some(170),
                saturation: Some(150),
            }),
            Action::Ch1 => Handler::Hue(HUE_STEP),
            Action::Ch4 => Handler::Hue(-HUE_STEP),
            Action::Ch2 => Handler::Brightness(BRIGHTNESS_STEP),
            Action::Ch5 => Handler::Brightness(-BRIGHTNESS_STEP),
            Action::Ch3 => Handler::Saturation(SATURATION_STEP),
            Action::Ch6 => Handler::Saturation(-SATURATION_STEP),
            Action::Ch10 => Handler::RandomEach,
            Action::Ch11 => Handler::RandomSaturated,
            Action::Ch12 => Handler::Random,
            Action::Ch7 | Action::Ch8 | Action::Ch9 | Action::ChPlus | Action::ChMinus => {
                return None
            }
        };

        Some(handler)
    }
}

/// Steps a hue and wraps it around at `HUE_MAX`.
///
/// The wrap subtracts (or adds) 65535 rather than 65536, so stepping across
/// the boundary lands one unit short of a true modulo.
pub fn step_hue(hue: u16, step: i32) -> u16 {
    let max = HUE_MAX as i32;
    let mut hue = hue as i32 + step;

    if hue > max {
        hue -= max;
    }

    if hue < 0 {
        hue += max;
    }

    hue.clamp(0, max) as u16
}

/// Steps a brightness or saturation level, clamped to `1..=LEVEL_MAX`.
pub fn step_level(level: u8, step: i32) -> u8 {
    (level as i32 + step).clamp(1, LEVEL_MAX as i32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_hue() {
        assert_eq!(step_hue(0, HUE_STEP), 2000);
        assert_eq!(step_hue(10000, -HUE_STEP), 8000);
        assert_eq!(step_hue(65000, HUE_STEP), 1465);
        assert_eq!(step_hue(63535, HUE_STEP), 65535);
        assert_eq!(step_hue(1000, -HUE_STEP), 64535);
        assert_eq!(step_hue(2000, -HUE_STEP), 0);
    }

    #[test]
    fn test_step_hue_round_trip_across_boundary() {
        let up = step_hue(64000, HUE_STEP);
        assert_eq!(step_hue(up, -HUE_STEP), 64000);
    }

    #[test]
    fn test_step_level_clamps() {
        assert_eq!(step_level(100, BRIGHTNESS_STEP), 125);
        assert_eq!(step_level(240, BRIGHTNESS_STEP), 255);
        assert_eq!(step_level(255, BRIGHTNESS_STEP), 255);
        assert_eq!(step_level(20, -BRIGHTNESS_STEP), 1);
        assert_eq!(step_level(0, -BRIGHTNESS_STEP), 1);
        assert_eq!(step_level(0, BRIGHTNESS_STEP), 25);
    }

    #[test]
    fn test_unmapped_buttons_have_no_handler() {
        for action in [
            Action::Ch7,
            Action::Ch8,
            Action::Ch9,
            Action::ChPlus,
            Action::ChMinus,
        ] {
            assert_eq!(action.handler(), None);
        }
    }

    #[test]
    fn test_handler_mapping() {
        assert_eq!(Action::Power.handler(), Some(Handler::Power));
        assert_eq!(Action::Ch1.handler(), Some(Handler::Hue(2000)));
        assert_eq!(Action::Ch4.handler(), Some(Handler::Hue(-2000)));
        assert_eq!(Action::Ch5.handler(), Some(Handler::Brightness(-25)));
        assert_eq!(Action::Ch3.handler(), Some(Handler::Saturation(25)));
        assert_eq!(Action::Ch10.handler(), Some(Handler::RandomEach));
        assert_eq!(
            Action::Blue.handler(),
            Some(Handler::Primary(Srgb::new(0, 0, 255)))
        );
    }
}
