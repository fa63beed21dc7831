use async_trait::async_trait;
use color_eyre::Result;
use eyre::eyre;

use crate::hue::{
    client::{Freshness, LightClient},
    light::{Light, LightState},
};

/// In-memory bridge that applies pushed states to its lights and records
/// every call.
#[derive(Default)]
pub struct RecordingClient {
    pub lights: Vec<Light>,
    pub fetches: Vec<Freshness>,
    pub pushes: Vec<(String, LightState, u16)>,
    pub fail: bool,
    pub rejecting_light: Option<String>,
}

impl RecordingClient {
    pub fn new(lights: Vec<Light>) -> Self {
        RecordingClient {
            lights,
            ..Default::default()
        }
    }
}

#[async_trait]
impl LightClient for RecordingClient {
    async fn lights(&mut self, freshness: Freshness) -> Result<Vec<Light>> {
        if self.fail {
            return Err(eyre!("bridge unreachable"));
        }

        self.fetches.push(freshness);

        Ok(self.lights.clone())
    }

    async fn set_state(&mut self, light: &Light, state: &LightState, wait: u16) -> Result<()> {
        if self.fail {
            return Err(eyre!("bridge unreachable"));
        }

        if self.rejecting_light.as_deref() == Some(light.id.as_str()) {
            return Err(eyre!("light {} rejected the state", light.id));
        }

        let stored = self
            .lights
            .iter_mut()
            .find(|x| x.id == light.id)
            .ok_or_else(|| eyre!("unknown light {}", light.id))?;

        if let Some(on) = state.on {
            stored.on = on;
        }
        if let Some(hue) = state.hue {
            stored.hue = Some(hue);
        }
        if let Some(brightness) = state.brightness {
            stored.brightness = Some(brightness);
        }
        if let Some(saturation) = state.saturation {
            stored.saturation = Some(saturation);
        }

        self.pushes.push((light.id.clone(), state.clone(), wait));

        Ok(())
    }
}

pub fn test_lights() -> Vec<Light> {
    vec![
        Light {
            id: "1".to_string(),
            name: "Ceiling".to_string(),
            on: false,
            hue: Some(10000),
            brightness: Some(200),
            saturation: Some(200),
        },
        Light {
            id: "2".to_string(),
            name: "Desk".to_string(),
            on: false,
            hue: Some(30000),
            brightness: Some(120),
            saturation: Some(80),
        },
    ]
}
