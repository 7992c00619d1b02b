//! Model configuration loaded from TOML.
//!
//! A [`ModelConfig`] describes the joint table a whole-body model is built
//! from: one entry per actuated joint in base-to-tip order, plus the model
//! name and floating-base flag. This is the "implementation-defined init
//! params" surface of the model-initialise component.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_axis() -> [f64; 3] {
    [0.0, 0.0, 1.0]
}
const fn default_lower() -> f64 {
    -std::f64::consts::PI
}
const fn default_upper() -> f64 {
    std::f64::consts::PI
}
const fn default_mass() -> f64 {
    1.0
}
const fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// JointConfig
// ---------------------------------------------------------------------------

/// One actuated joint in the model's serial chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointConfig {
    /// Joint name; also names the child frame reachable through this joint.
    pub name: String,

    /// Static offset from the parent frame, translation `[x, y, z]` in meters.
    #[serde(default)]
    pub origin_xyz: [f64; 3],

    /// Static offset from the parent frame, rotation `[roll, pitch, yaw]` in radians.
    #[serde(default)]
    pub origin_rpy: [f64; 3],

    /// Joint axis in the joint's local frame (default: Z).
    #[serde(default = "default_axis")]
    pub axis: [f64; 3],

    /// Whether the joint translates along its axis instead of rotating.
    #[serde(default)]
    pub prismatic: bool,

    /// Lower position limit (rad or m).
    #[serde(default = "default_lower")]
    pub lower: f64,

    /// Upper position limit (rad or m).
    #[serde(default = "default_upper")]
    pub upper: f64,

    /// Mass of the child link in kilograms.
    #[serde(default = "default_mass")]
    pub mass: f64,
}

// ---------------------------------------------------------------------------
// ModelConfig
// ---------------------------------------------------------------------------

/// Whole-body model configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model name reported by diagnostics.
    pub name: String,

    /// Whether the root link floats freely (6 unactuated DOF). The dispatch
    /// layer always reserves the leading 6 rows/columns for the base.
    #[serde(default = "default_true")]
    pub floating_base: bool,

    /// Mass of the root link in kilograms.
    #[serde(default = "default_mass")]
    pub base_mass: f64,

    /// Actuated joints in base-to-tip order. May be empty (DOF = 0).
    #[serde(default)]
    pub joints: Vec<JointConfig>,
}

impl ModelConfig {
    /// Number of actuated degrees of freedom this configuration describes.
    pub const fn dof(&self) -> usize {
        self.joints.len()
    }

    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::MissingField("name".into()));
        }
        if self.base_mass < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "base_mass".into(),
                message: "must be non-negative".into(),
            });
        }
        for joint in &self.joints {
            if joint.name.is_empty() {
                return Err(ConfigError::MissingField("joints.name".into()));
            }
            let [x, y, z] = joint.axis;
            if x == 0.0 && y == 0.0 && z == 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: format!("joints.{}.axis", joint.name),
                    message: "must be non-zero".into(),
                });
            }
            if joint.lower > joint.upper {
                return Err(ConfigError::InvalidValue {
                    field: format!("joints.{}.lower", joint.name),
                    message: format!("lower {} exceeds upper {}", joint.lower, joint.upper),
                });
            }
            if joint.mass < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: format!("joints.{}.mass", joint.name),
                    message: "must be non-negative".into(),
                });
            }
        }
        Ok(())
    }

    /// Parse and validate from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const PLANAR_ARM: &str = r#"
        name = "planar_arm"
        floating_base = true

        [[joints]]
        name = "shoulder"
        origin_xyz = [0.0, 0.0, 0.05]

        [[joints]]
        name = "elbow"
        origin_xyz = [0.0, 0.0, 0.3]
        lower = -2.094
        upper = 2.094
        mass = 0.5
    "#;

    #[test]
    fn parse_planar_arm() {
        let config = ModelConfig::from_toml_str(PLANAR_ARM).unwrap();
        assert_eq!(config.name, "planar_arm");
        assert!(config.floating_base);
        assert_eq!(config.dof(), 2);
        assert_eq!(config.joints[0].name, "shoulder");
        assert_eq!(config.joints[0].axis, [0.0, 0.0, 1.0]);
        assert!(!config.joints[0].prismatic);
        assert_eq!(config.joints[1].mass, 0.5);
    }

    #[test]
    fn empty_joint_table_is_valid() {
        let config = ModelConfig::from_toml_str("name = \"base_only\"").unwrap();
        assert_eq!(config.dof(), 0);
    }

    #[test]
    fn missing_name_rejected() {
        let err = ModelConfig::from_toml_str("floating_base = false").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn zero_axis_rejected() {
        let toml = r#"
            name = "bad"
            [[joints]]
            name = "j0"
            axis = [0.0, 0.0, 0.0]
        "#;
        let err = ModelConfig::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert!(err.to_string().contains("axis"));
    }

    #[test]
    fn inverted_limits_rejected() {
        let toml = r#"
            name = "bad"
            [[joints]]
            name = "j0"
            lower = 1.0
            upper = -1.0
        "#;
        let err = ModelConfig::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn negative_mass_rejected() {
        let toml = r#"
            name = "bad"
            [[joints]]
            name = "j0"
            mass = -2.0
        "#;
        let err = ModelConfig::from_toml_str(toml).unwrap_err();
        assert!(err.to_string().contains("mass"));
    }
}
