//! Demo configuration with TOML support.
//!
//! Every section uses `#[serde(default)]`, so a file that only overrides
//! `[spawn]` keeps the defaults for everything else.

use nalgebra::Vector3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::scene::Color;

/// Closed sampling range `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        rng.random_range(self.min..=self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, what: &str) -> Result<(), CoreError> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(CoreError::precondition(format!(
                "{what} range [{}, {}] is not an ordered finite interval",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportOptions {
    pub width: u32,
    pub height: u32,
    pub orthographic: bool,
    pub camera_position: [f32; 3],
}

impl ViewportOptions {
    pub fn camera_position(&self) -> Vector3<f32> {
        Vector3::from(self.camera_position)
    }
}

impl Default for ViewportOptions {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            orthographic: false,
            camera_position: [0.0, 0.0, -2.0],
        }
    }
}

/// Falling-object spawn and physics parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnOptions {
    /// Seconds between spawns
    pub interval: f32,
    /// Vertical acceleration; must be negative
    pub gravity: f32,
    /// Objects below this height are removed
    pub floor: f32,
    pub x: Span,
    pub y: Span,
    pub z: Span,
    /// Range for each of the r, g, b channels
    pub color: Span,
    /// Signed angular speed in radians per second
    pub spin: Span,
    pub cube_size: f32,
    /// Upper bound on live objects; spawns past it are skipped
    pub max_objects: usize,
}

impl Default for SpawnOptions {
    fn default() -> Self {
        Self {
            interval: 0.5,
            gravity: -0.5,
            floor: -8.0,
            x: Span::new(-6.0, 6.0),
            y: Span::new(6.0, 10.0),
            z: Span::new(3.0, 10.0),
            color: Span::new(0.1, 1.0),
            spin: Span::new(-0.5, 0.5),
            cube_size: 1.0,
            max_objects: 512,
        }
    }
}

impl SpawnOptions {
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(self.interval.is_finite() && self.interval > 0.0) {
            return Err(CoreError::precondition(format!(
                "spawn interval must be positive, got {}",
                self.interval
            )));
        }
        // Objects only ever leave the active set by falling through the floor
        if !(self.gravity.is_finite() && self.gravity < 0.0) {
            return Err(CoreError::precondition(format!(
                "gravity must be negative, got {}",
                self.gravity
            )));
        }
        if !self.floor.is_finite() {
            return Err(CoreError::precondition("floor must be finite"));
        }
        self.x.validate("spawn x")?;
        self.y.validate("spawn y")?;
        self.z.validate("spawn z")?;
        self.color.validate("color channel")?;
        self.spin.validate("spin")?;
        if self.y.min <= self.floor {
            return Err(CoreError::precondition(format!(
                "spawn height {} must lie above the floor {}",
                self.y.min, self.floor
            )));
        }
        if !(self.cube_size.is_finite() && self.cube_size > 0.0) {
            return Err(CoreError::precondition(format!(
                "cube size must be positive, got {}",
                self.cube_size
            )));
        }
        if self.max_objects == 0 {
            return Err(CoreError::precondition("max_objects must be at least 1"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookOptions {
    /// Radians per pointer unit
    pub sensitivity: f32,
    /// World units per discrete move
    pub move_step: f32,
}

impl Default for LookOptions {
    fn default() -> Self {
        Self {
            sensitivity: 0.01,
            move_step: 1.0,
        }
    }
}

impl LookOptions {
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.sensitivity.is_finite() || !self.move_step.is_finite() {
            return Err(CoreError::precondition(
                "look sensitivity and move step must be finite",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitOptions {
    pub angle_step_degrees: f32,
    pub move_step: f32,
    pub sides: usize,
    pub height: f32,
    pub radius: f32,
    pub color: [f32; 4],
}

impl Default for OrbitOptions {
    fn default() -> Self {
        Self {
            angle_step_degrees: 10.0,
            move_step: 0.2,
            sides: 4,
            height: 1.0,
            radius: 0.8,
            color: [1.0, 0.0, 0.0, 1.0],
        }
    }
}

impl OrbitOptions {
    pub fn angle_step(&self) -> f32 {
        self.angle_step_degrees.to_radians()
    }

    pub fn color(&self) -> Color {
        let [r, g, b, a] = self.color;
        Color::new(r, g, b, a)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.angle_step_degrees.is_finite() || !self.move_step.is_finite() {
            return Err(CoreError::precondition(
                "orbit angle and move steps must be finite",
            ));
        }
        // Shape parameters are checked by the pyramid builder itself
        Ok(())
    }
}

/// Top-level configuration shared by both demos
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub viewport: ViewportOptions,
    pub spawn: SpawnOptions,
    pub look: LookOptions,
    pub orbit: OrbitOptions,
}

impl DemoConfig {
    /// Parse TOML text and validate it. Missing fields use defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, CoreError> {
        let config: Self =
            toml::from_str(text).map_err(|e| CoreError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, CoreError> {
        toml::to_string_pretty(self).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(CoreError::precondition("viewport must be non-empty"));
        }
        self.spawn.validate()?;
        self.look.validate()?;
        self.orbit.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn default_round_trips_through_toml() {
        let config = DemoConfig::default();
        let text = config.to_toml_string().unwrap();
        let parsed = DemoConfig::from_toml_str(&text).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let text = r"
[spawn]
interval = 0.25
x = { min = -2.0, max = 2.0 }
";
        let config = DemoConfig::from_toml_str(text).unwrap();
        assert_eq!(config.spawn.interval, 0.25);
        assert_eq!(config.spawn.x, Span::new(-2.0, 2.0));
        assert_eq!(config.spawn.gravity, -0.5);
        assert_eq!(config.look.sensitivity, 0.01);
        assert_eq!(config.viewport.width, 640);
    }

    #[test]
    fn rejects_non_negative_gravity() {
        let err = DemoConfig::from_toml_str("[spawn]\ngravity = 0.0\n").unwrap_err();
        assert!(matches!(err, CoreError::Precondition(_)));
        assert!(err.to_string().contains("gravity"));
    }

    #[test]
    fn rejects_spawn_below_floor() {
        let text = "[spawn]\nfloor = 7.0\n";
        assert!(matches!(
            DemoConfig::from_toml_str(text),
            Err(CoreError::Precondition(_))
        ));
    }

    #[test]
    fn rejects_unordered_span() {
        let text = "[spawn]\nspin = { min = 1.0, max = -1.0 }\n";
        assert!(DemoConfig::from_toml_str(text).is_err());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = DemoConfig::from_toml_str("[spawn\ninterval = ").unwrap_err();
        assert!(matches!(err, CoreError::ConfigParse(_)));
    }

    #[test]
    fn span_samples_stay_inside() {
        let mut rng = StdRng::seed_from_u64(7);
        let span = Span::new(-0.5, 0.5);
        for _ in 0..1000 {
            assert!(span.contains(span.sample(&mut rng)));
        }
        let point = Span::new(2.0, 2.0);
        assert_eq!(point.sample(&mut rng), 2.0);
    }

    #[test]
    fn orbit_angle_in_radians() {
        let orbit = OrbitOptions::default();
        assert!((orbit.angle_step() - 10f32.to_radians()).abs() < 1e-7);
        assert_eq!(orbit.color(), Color::new(1.0, 0.0, 0.0, 1.0));
    }
}
