use super::{LightGateway, LightRecord, LightUpdate};
use crate::config::BridgeConfig;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// HTTP client for the Hue bridge CLIP v2 REST API.
///
/// Authenticates with the `hue-application-key` header. Hue bridges serve a
/// self-signed TLS certificate, so certificate verification is disabled.
pub struct HueClient {
    application_key: String,
    http_client: Client,
    base_url: String,
}

impl HueClient {
    /// Create a client for a bridge reachable at `config.host`.
    pub fn new(config: &BridgeConfig) -> Result<Self> {
        Self::with_base_url(
            format!("https://{}", config.host),
            config.application_key.clone(),
        )
    }

    /// Create a client with a custom base URL (for testing with a mock server).
    pub fn with_base_url(base_url: String, application_key: String) -> Result<Self> {
        let http_client = Client::builder()
            .danger_accept_invalid_certs(true)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            application_key,
            http_client,
            base_url,
        })
    }
}

#[async_trait]
impl LightGateway for HueClient {
    async fn list_lights(&self) -> Result<HashMap<String, LightRecord>> {
        let url = format!("{}/clip/v2/resource/light", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .header("hue-application-key", &self.application_key)
            .send()
            .await
            .context("Failed to send light listing request")?;

        let response = check_response_status(response).await?;
        let envelope: ResourceEnvelope<LightGet> = response
            .json()
            .await
            .context("Failed to parse light listing response")?;

        debug!(count = envelope.data.len(), "Listed lights from bridge");

        Ok(envelope
            .data
            .into_iter()
            .map(|light| (light.id.clone(), light.into_record()))
            .collect())
    }

    async fn update_light(&self, id: &str, update: &LightUpdate) -> Result<()> {
        let url = format!("{}/clip/v2/resource/light/{}", self.base_url, id);
        let body = LightPut::from_update(update);

        debug!(light_id = %id, "Pushing state update to bridge");

        let response = self
            .http_client
            .put(&url)
            .header("hue-application-key", &self.application_key)
            .json(&body)
            .send()
            .await
            .context("Failed to send light update request")?;

        check_response_status(response).await?;
        Ok(())
    }
}

/// Non-2xx bridge responses become errors carrying status and body text.
async fn check_response_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(anyhow!("Bridge returned {}: {}", status, body))
}

// ── CLIP v2 wire types ────────────────────────────────────────────────────────

/// Listing envelope: `{ "errors": [...], "data": [...] }`
#[derive(Deserialize)]
struct ResourceEnvelope<T> {
    #[serde(default)]
    data: Vec<T>,
}

#[derive(Default, Deserialize)]
struct LightGet {
    id: String,
    metadata: Option<Metadata>,
    on: Option<OnState>,
    dimming: Option<Dimming>,
    color_temperature: Option<ColorTemperatureGet>,
}

impl LightGet {
    fn into_record(self) -> LightRecord {
        LightRecord {
            id: self.id,
            name: self.metadata.map(|m| m.name),
            on: self.on.map(|o| o.on).unwrap_or(false),
            brightness: self.dimming.map(|d| d.brightness),
            mirek: self.color_temperature.and_then(|ct| ct.mirek),
        }
    }
}

#[derive(Deserialize)]
struct Metadata {
    name: String,
}

#[derive(Serialize, Deserialize)]
struct OnState {
    on: bool,
}

#[derive(Serialize, Deserialize)]
struct Dimming {
    brightness: f32,
}

/// The bridge reports `mirek: null` while a bulb is in color mode.
#[derive(Deserialize)]
struct ColorTemperatureGet {
    mirek: Option<i64>,
}

#[derive(Serialize)]
struct ColorTemperaturePut {
    mirek: i64,
}

/// PUT body; omitted sub-objects leave the bulb attribute untouched.
#[derive(Serialize)]
struct LightPut {
    #[serde(skip_serializing_if = "Option::is_none")]
    on: Option<OnState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dimming: Option<Dimming>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color_temperature: Option<ColorTemperaturePut>,
}

impl LightPut {
    fn from_update(update: &LightUpdate) -> Self {
        Self {
            on: update.on.map(|on| OnState { on }),
            dimming: update.brightness.map(|brightness| Dimming { brightness }),
            color_temperature: update.mirek.map(|mirek| ColorTemperaturePut { mirek }),
        }
    }
}
