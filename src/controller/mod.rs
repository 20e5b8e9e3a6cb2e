use crate::bridge::{LightGateway, LightUpdate};
use crate::light::LightStateRequest;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

#[cfg(test)]
mod tests;

/// Errors from the resolve-and-update pipeline.
///
/// All are terminal for the current request; nothing is retried here.
/// `GatewayUnavailable` and `TargetNotFound` stay distinct so callers can
/// tell "the bridge is down" from "the light is misconfigured".
#[derive(Debug)]
pub enum ControlError {
    /// The listing call failed (bridge unreachable, mid power-cut).
    GatewayUnavailable(String),
    /// No light on the bridge matches the configured target id.
    TargetNotFound(String),
    /// The bridge rejected or failed the update call.
    UpdateFailed(String),
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlError::GatewayUnavailable(cause) => {
                write!(f, "bridge listing failed: {}", cause)
            }
            ControlError::TargetNotFound(id) => {
                write!(f, "no light with id '{}' on the bridge", id)
            }
            ControlError::UpdateFailed(cause) => write!(f, "bridge update failed: {}", cause),
        }
    }
}

impl std::error::Error for ControlError {}

/// Resolves the configured target light and pushes desired state to it.
///
/// Holds no mutable state: every call re-lists the bridge, since bulb state
/// can change behind the bridge's back between requests. Concurrent requests
/// race freely; the last update to reach the bridge wins.
pub struct LightController {
    gateway: Arc<dyn LightGateway>,
    target_id: String,
}

impl LightController {
    pub fn new(gateway: Arc<dyn LightGateway>, target_id: String) -> Self {
        Self { gateway, target_id }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// Apply a validated desired state to the target light.
    ///
    /// Exactly one update command reaches the bridge on success; no command
    /// is issued when listing or resolution fails. `on` is always part of the
    /// command (an absent `on` already defaulted to false at parse time);
    /// absent mirek/brightness are left out so the bulb keeps its current
    /// values.
    pub async fn apply(&self, desired: &LightStateRequest) -> Result<(), ControlError> {
        let lights = self
            .gateway
            .list_lights()
            .await
            .map_err(|e| ControlError::GatewayUnavailable(e.to_string()))?;

        // Exact id equality; the listing is keyed by id, so at most one match
        let light = lights
            .get(&self.target_id)
            .ok_or_else(|| ControlError::TargetNotFound(self.target_id.clone()))?;

        let update = LightUpdate {
            on: Some(desired.on),
            mirek: desired.mirek,
            brightness: desired.brightness,
        };

        debug!(light_id = %light.id, on = desired.on, "Applying state update");

        self.gateway
            .update_light(&light.id, &update)
            .await
            .map_err(|e| ControlError::UpdateFailed(e.to_string()))
    }
}
