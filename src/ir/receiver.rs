use std::time::Duration;

use async_trait::async_trait;
use color_eyre::Result;
use eyre::eyre;
use log::{debug, error, info};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tokio::time::Instant;

use crate::{
    hue::{
        client::{Freshness, LightClient},
        light::{Light, LightState, LightStateBuilder, HUE_MAX, LEVEL_MAX},
    },
    protocols::serial::IrCodeHandler,
    settings::ReceiverSettings,
};

use super::{
    codes::CodeTable,
    color::rgb_to_light_state,
    handlers::{step_hue, step_level, Handler, DEFAULT_WAIT, QUICK_WAIT},
};

/// Lowest saturation picked by the per-light random button, so that every
/// light ends up with a visible color.
const RANDOM_EACH_MIN_SATURATION: u8 = 127;

/// Turns IR codes into light state changes.
///
/// Holds the state that survives between button presses: whether the lights
/// were last switched on, and when the power button was last accepted.
pub struct Receiver<C> {
    client: C,
    codes: CodeTable,
    on: bool,
    last_power: Option<Instant>,
    power_debounce: Duration,
    rng: StdRng,
}

impl<C: LightClient> Receiver<C> {
    pub fn new(client: C, settings: &ReceiverSettings) -> Self {
        Self::with_rng(client, settings, StdRng::from_entropy())
    }

    pub fn with_rng(client: C, settings: &ReceiverSettings, rng: StdRng) -> Self {
        Receiver {
            client,
            codes: CodeTable::default(),
            on: false,
            last_power: None,
            power_debounce: Duration::from_millis(settings.power_debounce_ms),
            rng,
        }
    }

    /// Runs the handler bound to `code`. Unknown codes, unmapped buttons and
    /// handler failures are logged and otherwise ignored.
    pub async fn dispatch(&mut self, code: &str) {
        let Some(action) = self.codes.lookup(code) else {
            info!("recv: nothing - {}", code);
            return;
        };

        info!("recv: {} - {}", action, code);

        let Some(handler) = action.handler() else {
            info!("- {} is not mapped to anything", action);
            return;
        };

        info!("- call: {}", action);

        if let Err(e) = self.run(handler).await {
            error!("Error while handling {}: {:?}", action, e);
        }
    }

    async fn run(&mut self, handler: Handler) -> Result<()> {
        match handler {
            Handler::Power => self.power().await,
            Handler::Primary(rgb) => self.push_all(rgb_to_light_state(rgb), DEFAULT_WAIT).await,
            Handler::Fixed(state) => self.push_all(state, DEFAULT_WAIT).await,
            Handler::Hue(step) => {
                let light = self.first_light().await?;
                let hue = light
                    .hue
                    .ok_or_else(|| eyre!("Light {} has no hue", light.name))?;

                let state = LightStateBuilder::default()
                    .hue(step_hue(hue, step))
                    .build()?;

                self.push_all(state, QUICK_WAIT).await
            }
            Handler::Brightness(step) => {
                let light = self.first_light().await?;
                let brightness = light
                    .brightness
                    .ok_or_else(|| eyre!("Light {} has no brightness", light.name))?;

                let state = LightStateBuilder::default()
                    .brightness(step_level(brightness, step))
                    .build()?;

                self.push_all(state, QUICK_WAIT).await
            }
            Handler::Saturation(step) => {
                let light = self.first_light().await?;
                let saturation = light
                    .saturation
                    .ok_or_else(|| eyre!("Light {} has no saturation", light.name))?;

                let state = LightStateBuilder::default()
                    .saturation(step_level(saturation, step))
                    .build()?;

                self.push_all(state, QUICK_WAIT).await
            }
            Handler::RandomEach => self.random_each().await,
            Handler::RandomSaturated => {
                let state = LightStateBuilder::default()
                    .hue(self.rng.gen_range(0..=HUE_MAX))
                    .brightness(self.rng.gen_range(0..=LEVEL_MAX))
                    .saturation(LEVEL_MAX)
                    .build()?;

                self.push_all(state, QUICK_WAIT).await
            }
            Handler::Random => {
                let state = LightStateBuilder::default()
                    .hue(self.rng.gen_range(0..=HUE_MAX))
                    .brightness(self.rng.gen_range(0..=LEVEL_MAX))
                    .saturation(self.rng.gen_range(0..=LEVEL_MAX))
                    .build()?;

                self.push_all(state, QUICK_WAIT).await
            }
        }
    }

    async fn power(&mut self) -> Result<()> {
        let now = Instant::now();

        if let Some(last_power) = self.last_power {
            if now.duration_since(last_power) < self.power_debounce {
                debug!("power: ignoring repeated press");
                return Ok(());
            }
        }

        self.last_power = Some(now);
        self.on = !self.on;

        let state = LightStateBuilder::default().on(self.on).build()?;
        self.push_all(state, QUICK_WAIT).await
    }

    async fn random_each(&mut self) -> Result<()> {
        let lights = self.client.lights(Freshness::Cached).await?;
        let mut errors = vec![];

        for light in &lights {
            let state = LightStateBuilder::default()
                .on(true)
                .hue(self.rng.gen_range(0..=HUE_MAX))
                .brightness(self.rng.gen_range(0..=LEVEL_MAX))
                .saturation(self.rng.gen_range(RANDOM_EACH_MIN_SATURATION..=LEVEL_MAX))
                .build()?;

            info!("light_state: {} {:?}", light.name, state);

            if let Err(e) = self.client.set_state(light, &state, QUICK_WAIT).await {
                errors.push(e);
            }
        }

        combine_errors(errors)
    }

    /// Reads the first light straight from the bridge, so that steps start
    /// from its actual current state.
    async fn first_light(&mut self) -> Result<Light> {
        let lights = self.client.lights(Freshness::Fresh).await?;

        lights
            .into_iter()
            .next()
            .ok_or_else(|| eyre!("No lights found on the bridge"))
    }

    async fn push_all(&mut self, state: LightState, wait: u16) -> Result<()> {
        let state = state.turned_on();
        info!("lights_state: {:?}", state);

        let lights = self.client.lights(Freshness::Cached).await?;
        let mut errors = vec![];

        // A light rejecting the state must not keep it from the others
        for light in &lights {
            if let Err(e) = self.client.set_state(light, &state, wait).await {
                errors.push(e);
            }
        }

        combine_errors(errors)
    }
}

fn combine_errors(errors: Vec<eyre::Report>) -> Result<()> {
    if errors.is_empty() {
        return Ok(());
    }

    let messages: Vec<String> = errors.iter().map(|e| format!("{:#}", e)).collect();

    Err(eyre!(
        "Setting state failed for {} light(s):\n{}",
        errors.len(),
        messages.join("\n")
    ))
}

#[async_trait]
impl<C: LightClient> IrCodeHandler for Receiver<C> {
    async fn handle_ir_code(&mut self, code: &str) {
        self.dispatch(code).await
    }
}
