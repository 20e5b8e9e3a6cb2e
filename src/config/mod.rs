use serde::Deserialize;

/// Env var naming the one light this agent may control.
pub const TARGET_LIGHT_ENV: &str = "LIGHT_ID";

/// Complete Lumen configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LumenConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub bridge: BridgeConfig,
    #[serde(default)]
    pub light: LightConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:9000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// Hue bridge connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeConfig {
    /// Bridge hostname or IP
    #[serde(default = "default_bridge_host")]
    pub host: String,
    /// CLIP v2 application key obtained at pairing time
    #[serde(default = "default_application_key")]
    pub application_key: String,
}

fn default_bridge_host() -> String {
    std::env::var("HUE_BRIDGE_HOST").unwrap_or_default()
}

fn default_application_key() -> String {
    std::env::var("HUE_APPLICATION_KEY").unwrap_or_default()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            host: default_bridge_host(),
            application_key: default_application_key(),
        }
    }
}

/// Target light configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LightConfig {
    /// Id of the light to control; empty means unresolved, which surfaces
    /// as a per-request resolution failure rather than a startup error
    #[serde(default = "default_target_id")]
    pub target_id: String,
}

fn default_target_id() -> String {
    std::env::var(TARGET_LIGHT_ENV).unwrap_or_default()
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            target_id: default_target_id(),
        }
    }
}

/// Load configuration from TOML file
pub fn load_config(path: &str) -> Result<LumenConfig, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    let config: LumenConfig = toml::from_str(&contents)?;
    Ok(config)
}
