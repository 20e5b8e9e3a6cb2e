use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;

mod client;

pub use client::HueClient;

/// A light as reported by the bridge at listing time.
///
/// Transient: held for the duration of one request, never cached, since
/// bulb state can change behind the bridge's back (power cut, wall switch).
#[derive(Clone, Debug, PartialEq)]
pub struct LightRecord {
    pub id: String,
    pub name: Option<String>,
    pub on: bool,
    pub brightness: Option<f32>,
    pub mirek: Option<i64>,
}

/// Partial state update for one light.
///
/// Each field is independently optional; a `None` field is omitted from the
/// command sent to the bridge and leaves the bulb attribute untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LightUpdate {
    pub on: Option<bool>,
    pub mirek: Option<i64>,
    pub brightness: Option<f32>,
}

/// Gateway to the bridge that mediates commands to the lights.
///
/// The controller depends on this trait rather than on a concrete bridge
/// client, so tests can substitute a recording double. Implementations
/// report failure as an opaque error; retry policy, if any, lives outside.
#[async_trait]
pub trait LightGateway: Send + Sync {
    /// List all lights known to the bridge, keyed by light id.
    async fn list_lights(&self) -> Result<HashMap<String, LightRecord>>;

    /// Push a partial state update to one light.
    async fn update_light(&self, id: &str, update: &LightUpdate) -> Result<()>;
}
