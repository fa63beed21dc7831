use async_trait::async_trait;
use color_eyre::Result;
use log::debug;

use crate::{protocols::https::HyperHttpsClient, settings::HueSettings};

use super::{
    light::{Light, LightState},
    rest::light::{get_hue_lights, put_hue_light_state},
};

/// Whether a light listing may be served from the client's cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Freshness {
    Cached,
    Fresh,
}

#[async_trait]
pub trait LightClient: Send {
    /// Lists all lights known to the bridge, ordered by id.
    async fn lights(&mut self, freshness: Freshness) -> Result<Vec<Light>>;

    /// Pushes `state` to `light`. `wait` is the transition time in multiples
    /// of 100ms, the call returns once the bridge has answered.
    async fn set_state(&mut self, light: &Light, state: &LightState, wait: u16) -> Result<()>;
}

pub struct HueClient {
    settings: HueSettings,
    https_client: HyperHttpsClient,
    lights: Option<Vec<Light>>,
}

impl HueClient {
    pub fn new(settings: &HueSettings, https_client: &HyperHttpsClient) -> Self {
        HueClient {
            settings: settings.clone(),
            https_client: https_client.clone(),
            lights: None,
        }
    }
}

#[async_trait]
impl LightClient for HueClient {
    async fn lights(&mut self, freshness: Freshness) -> Result<Vec<Light>> {
        if let (Freshness::Cached, Some(lights)) = (freshness, &self.lights) {
            return Ok(lights.clone());
        }

        let lights = get_hue_lights(&self.settings, &self.https_client).await?;
        debug!(
            "Fetched {} lights from bridge, {} switched on",
            lights.len(),
            lights.iter().filter(|x| x.on).count()
        );

        self.lights = Some(lights.clone());

        Ok(lights)
    }

    async fn set_state(&mut self, light: &Light, state: &LightState, wait: u16) -> Result<()> {
        put_hue_light_state(&self.settings, &self.https_client, light, state, wait).await
    }
}
