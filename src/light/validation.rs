use super::LightStateRequest;
use std::fmt;

/// Physical mirek range for commodity color-temperature bulbs.
pub const MIREK_MIN: i64 = 153;
pub const MIREK_MAX: i64 = 370;

pub const BRIGHTNESS_MIN: f32 = 0.0;
pub const BRIGHTNESS_MAX: f32 = 100.0;

/// Validation errors for LightStateRequest
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    OutOfRangeMirek(i64),
    OutOfRangeBrightness(f32),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::OutOfRangeMirek(v) => {
                write!(f, "mirek must be within [{}, {}], got {}", MIREK_MIN, MIREK_MAX, v)
            }
            ValidationError::OutOfRangeBrightness(v) => {
                write!(
                    f,
                    "brightness must be within [{}, {}], got {}",
                    BRIGHTNESS_MIN, BRIGHTNESS_MAX, v
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validates a desired-state request.
///
/// Validation rules:
/// - `mirek`, when present, must lie in [153, 370] inclusive
/// - `brightness`, when present, must lie in [0, 100] inclusive
/// - `on` has no constraint
///
/// Absent fields are valid by definition; only present fields are checked.
pub fn validate(request: &LightStateRequest) -> Result<(), ValidationError> {
    if let Some(mirek) = request.mirek {
        if !(MIREK_MIN..=MIREK_MAX).contains(&mirek) {
            return Err(ValidationError::OutOfRangeMirek(mirek));
        }
    }

    if let Some(brightness) = request.brightness {
        if !(BRIGHTNESS_MIN..=BRIGHTNESS_MAX).contains(&brightness) {
            return Err(ValidationError::OutOfRangeBrightness(brightness));
        }
    }

    Ok(())
}
