use serde::Deserialize;

mod validation;

pub use validation::{validate, ValidationError, BRIGHTNESS_MAX, BRIGHTNESS_MIN, MIREK_MAX, MIREK_MIN};

/// LightStateRequest is the caller's desired end state for the light.
///
/// `mirek` and `brightness` are independently optional: a field left out of
/// the request leaves the corresponding bulb attribute untouched. An absent
/// `on` is treated as `false`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LightStateRequest {
    /// Power state; absent means off
    #[serde(default)]
    pub on: bool,

    /// Color temperature in mirek (reciprocal megakelvin)
    pub mirek: Option<i64>,

    /// Brightness percentage
    pub brightness: Option<f32>,
}

impl LightStateRequest {
    /// Checks every range-constrained field that is present.
    ///
    /// Returns Ok(()) if valid, Err(ValidationError) naming the offending
    /// field otherwise. Pure and synchronous; no gateway call is made here.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate(self)
    }
}
