//! Adaptation parameters and their YAML form.
//!
//! # Example
//!
//! ```rust
//! use locadapt_ops::LocalAdaptParams;
//!
//! let params = LocalAdaptParams::from_yaml_str(
//!     r#"
//! enabled: true
//! amount: 85
//! temperature: 6500
//! zone:
//!   shape: rec
//!   transit: 40
//! "#,
//! )
//! .unwrap();
//! assert_eq!(params.amount, 85);
//! assert_eq!(params.zone.loc_x, 250); // omitted fields keep their defaults
//! ```

use crate::zone::ZoneSpec;
use crate::{OpsError, OpsResult};
use locadapt_color::ciecam02::Surround;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default target temperature in kelvin.
pub const DEFAULT_TEMPERATURE: i32 = 5000;

/// Default adaptation amount in percent.
pub const DEFAULT_AMOUNT: u8 = 70;

/// User parameters of the localized adaptation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalAdaptParams {
    /// Master switch.
    pub enabled: bool,
    /// Degree of adaptation in percent; `≤ 1` disables the effect.
    pub amount: u8,
    /// Derive `amount` from exposure metadata.
    pub auto_amount: bool,
    /// Destination luminance scaling; the destination white gets `Y = 100 / scaling`.
    pub luminance_scaling: f64,
    /// Derive `luminance_scaling` from temperature and green.
    pub auto_luminance_scaling: bool,
    /// Target white temperature in kelvin.
    pub temperature: i32,
    /// Green tint of the target white, 1.0 is neutral.
    pub green: f64,
    /// Destination surround.
    pub surround: Surround,
    /// Zone placement.
    pub zone: ZoneSpec,
}

impl Default for LocalAdaptParams {
    fn default() -> Self {
        Self {
            enabled: false,
            amount: DEFAULT_AMOUNT,
            auto_amount: false,
            luminance_scaling: 1.0,
            auto_luminance_scaling: false,
            temperature: DEFAULT_TEMPERATURE,
            green: 1.0,
            surround: Surround::Average,
            zone: ZoneSpec::default(),
        }
    }
}

impl LocalAdaptParams {
    /// Loads parameters from a YAML file.
    ///
    /// # Errors
    ///
    /// [`OpsError::ConfigNotFound`] for a missing file, I/O and YAML errors,
    /// and everything [`validate`](Self::validate) rejects.
    pub fn from_file(path: impl AsRef<Path>) -> OpsResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(OpsError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parses parameters from YAML.
    pub fn from_yaml_str(yaml: &str) -> OpsResult<Self> {
        let params: Self = serde_yaml::from_str(yaml)?;
        params.validate()?;
        Ok(params)
    }

    /// Serializes to YAML.
    pub fn to_yaml_string(&self) -> OpsResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Checks scalar ranges. Zone ranges are checked when the zone is mapped
    /// onto a frame.
    pub fn validate(&self) -> OpsResult<()> {
        if self.amount > 100 {
            return Err(OpsError::InvalidParameter(format!(
                "amount must be in [0, 100], got {}",
                self.amount
            )));
        }
        if !self.luminance_scaling.is_finite() || self.luminance_scaling <= 0.0 {
            return Err(OpsError::InvalidParameter(format!(
                "luminance_scaling must be > 0, got {}",
                self.luminance_scaling
            )));
        }
        if self.temperature <= 0 {
            return Err(OpsError::InvalidParameter(format!(
                "temperature must be > 0, got {}",
                self.temperature
            )));
        }
        if !self.green.is_finite() || self.green <= 0.0 {
            return Err(OpsError::InvalidParameter(format!(
                "green must be > 0, got {}",
                self.green
            )));
        }
        Ok(())
    }

    /// True when the parameters alone would let the engine run.
    pub fn is_active(&self) -> bool {
        self.enabled && self.amount > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::Shape;

    #[test]
    fn test_defaults() {
        let p = LocalAdaptParams::default();
        assert!(!p.enabled);
        assert_eq!(p.amount, 70);
        assert_eq!(p.temperature, 5000);
        assert_eq!(p.zone.transit, 60);
        assert!(!p.is_active());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let p = LocalAdaptParams::from_yaml_str("{}").unwrap();
        assert_eq!(p, LocalAdaptParams::default());
    }

    #[test]
    fn test_yaml_fields() {
        let p = LocalAdaptParams::from_yaml_str(
            "enabled: true\nsurround: dim\nzone:\n  shape: rec\n  degree: 30\n",
        )
        .unwrap();
        assert!(p.is_active());
        assert_eq!(p.surround, Surround::Dim);
        assert_eq!(p.zone.shape, Shape::Rectangle);
        assert_eq!(p.zone.degree, 30.0);
    }

    #[test]
    fn test_yaml_round_trip() {
        let p = LocalAdaptParams {
            enabled: true,
            amount: 42,
            green: 1.1,
            ..Default::default()
        };
        let text = p.to_yaml_string().unwrap();
        assert_eq!(LocalAdaptParams::from_yaml_str(&text).unwrap(), p);
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            LocalAdaptParams::from_yaml_str("amount: 120"),
            Err(OpsError::InvalidParameter(_))
        ));
        assert!(LocalAdaptParams::from_yaml_str("luminance_scaling: 0").is_err());
        assert!(LocalAdaptParams::from_yaml_str("temperature: -5").is_err());
        assert!(matches!(
            LocalAdaptParams::from_yaml_str("amount: [1, 2]"),
            Err(OpsError::Yaml(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = LocalAdaptParams::from_file("/nonexistent/locadapt.yaml").unwrap_err();
        assert!(matches!(err, OpsError::ConfigNotFound { .. }));
    }
}
