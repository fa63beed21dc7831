use std::collections::HashMap;

use color_eyre::Result;
use eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    hue::light::{Light, LightState},
    protocols::https::{mk_get_request, mk_put_request, HyperHttpsClient},
    settings::HueSettings,
};

use super::{base_url, format_api_errors, ApiError, ApiResponseItem};

#[derive(Deserialize, Debug, Clone)]
pub struct LightStateData {
    pub on: bool,
    pub bri: Option<u8>,
    pub hue: Option<u16>,
    pub sat: Option<u8>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LightData {
    pub name: String,
    pub state: LightStateData,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
enum LightsResponse {
    Lights(HashMap<String, LightData>),
    Errors(Vec<ApiResponseItem>),
}

impl LightData {
    fn into_light(self, id: String) -> Light {
        Light {
            id,
            name: self.name,
            on: self.state.on,
            hue: self.state.hue,
            brightness: self.state.bri,
            saturation: self.state.sat,
        }
    }
}

/// Orders lights the way the bridge numbers them, so that "1" sorts before
/// "10".
fn sort_lights(lights: &mut [Light]) {
    lights.sort_by(|a, b| {
        let a_key = (a.id.parse::<u32>().ok(), &a.id);
        let b_key = (b.id.parse::<u32>().ok(), &b.id);
        a_key.cmp(&b_key)
    });
}

fn lights_from_response(response: LightsResponse) -> Result<Vec<Light>> {
    match response {
        LightsResponse::Lights(lights) => {
            let mut lights: Vec<Light> = lights
                .into_iter()
                .map(|(id, data)| data.into_light(id))
                .collect();

            sort_lights(&mut lights);

            Ok(lights)
        }
        LightsResponse::Errors(items) => {
            let errors: Vec<ApiError> = items.into_iter().filter_map(|x| x.error).collect();
            Err(eyre!(
                "Error while listing Hue lights:\n{}",
                format_api_errors(&errors)
            ))
        }
    }
}

pub async fn get_hue_lights(
    settings: &HueSettings,
    client: &HyperHttpsClient,
) -> Result<Vec<Light>> {
    let uri = format!("{}/lights", base_url(settings)).parse()?;

    let response: LightsResponse = mk_get_request(client, &uri).await?;

    lights_from_response(response)
}

#[derive(Serialize, Debug, Clone, PartialEq)]
struct LightRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    on: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    hue: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    bri: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    sat: Option<u8>,

    transitiontime: u16, // measured in multiples of 100ms
}

impl LightRequest {
    fn new(state: &LightState, wait: u16) -> Self {
        LightRequest {
            on: state.on,
            hue: state.hue,
            bri: state.brightness,
            sat: state.saturation,
            transitiontime: wait,
        }
    }
}

fn check_put_response(light: &Light, response: Vec<ApiResponseItem>) -> Result<()> {
    let errors: Vec<ApiError> = response.into_iter().filter_map(|x| x.error).collect();

    if !errors.is_empty() {
        Err(eyre!(
            "Error while sending PUT to Hue light resource (name: {}):\n{}",
            light.name,
            format_api_errors(&errors)
        ))
    } else {
        Ok(())
    }
}

pub async fn put_hue_light_state(
    settings: &HueSettings,
    client: &HyperHttpsClient,
    light: &Light,
    state: &LightState,
    wait: u16,
) -> Result<()> {
    let uri = format!("{}/lights/{}/state", base_url(settings), light.id).parse()?;

    let body = LightRequest::new(state, wait);

    let response: Vec<ApiResponseItem> = mk_put_request(client, &uri, &body).await?;

    check_put_response(light, response)
}
