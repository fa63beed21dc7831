use palette::{FromColor, Hsl, Hsv, Srgb};

use crate::hue::light::{LightState, HUE_MAX, LEVEL_MAX};

/// Converts an 8-bit RGB color to the bridge's hue/saturation/brightness
/// scale, going through HSL first.
pub fn rgb_to_light_state(rgb: Srgb<u8>) -> LightState {
    let hsl: Hsl = Hsl::from_color(rgb.into_format::<f32>());
    let hsv: Hsv = Hsv::from_color(hsl);

    let hue = hsv.hue.into_positive_degrees() as f64 / 360.0 * HUE_MAX as f64;
    let saturation = hsv.saturation as f64 * LEVEL_MAX as f64;
    let brightness = hsv.value as f64 * LEVEL_MAX as f64;

    LightState {
        on: None,
        hue: Some(hue.round().clamp(0.0, HUE_MAX as f64) as u16),
        brightness: Some(brightness.round().clamp(0.0, LEVEL_MAX as f64) as u8),
        saturation: Some(saturation.round().clamp(0.0, LEVEL_MAX as f64) as u8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hsb(rgb: (u8, u8, u8)) -> (Option<u16>, Option<u8>, Option<u8>) {
        let state = rgb_to_light_state(Srgb::new(rgb.0, rgb.1, rgb.2));
        (state.hue, state.brightness, state.saturation)
    }

    #[test]
    fn test_primaries() {
        assert_eq!(hsb((255, 0, 0)), (Some(0), Some(255), Some(255)));
        assert_eq!(hsb((0, 255, 0)), (Some(21845), Some(255), Some(255)));
        assert_eq!(hsb((0, 0, 255)), (Some(43690), Some(255), Some(255)));
    }

    #[test]
    fn test_grey_has_no_saturation() {
        let (_, brightness, saturation) = hsb((128, 128, 128));
        assert_eq!(saturation, Some(0));
        assert_eq!(brightness, Some(128));
    }

    #[test]
    fn test_power_is_left_unset() {
        let state = rgb_to_light_state(Srgb::new(255, 0, 0));
        assert_eq!(state.on, None);
    }
}
