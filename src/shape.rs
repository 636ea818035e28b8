//! A ready-made piece set for hosts that do not bring their own.

use crate::controller::ControllerConfig;
use crate::filling::Filling;
use crate::geometry::{Index, Size};
use crate::pattern::Pattern;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Square,
    Circle,
    Triangle,
    Diamond,
    /// Spawned by five matched in an L or corner.
    Bomb,
    /// Spawned by four matched in a line.
    Rocket,
    /// Immovable block.
    Stone,
}

impl Shape {
    pub const BASIC: [Shape; 4] = [Shape::Square, Shape::Circle, Shape::Triangle, Shape::Diamond];
    /// In detection order.
    pub const BONUS: [Shape; 2] = [Shape::Bomb, Shape::Rocket];
    pub const OBSTACLES: [Shape; 1] = [Shape::Stone];

    /// Standard configuration over these shapes.
    pub fn config(size: Size) -> ControllerConfig<Shape> {
        ControllerConfig::new(size, Self::BASIC)
            .with_bonus(Self::BONUS)
            .with_obstacles(Self::OBSTACLES)
    }
}

impl Filling for Shape {
    fn pattern(&self) -> Pattern {
        match self {
            Shape::Bomb => Pattern::new(
                [(0, 0), (1, 0), (2, 0), (0, 1), (0, 2)]
                    .into_iter()
                    .map(Index::from),
            ),
            Shape::Rocket => Pattern::line(4),
            _ => Pattern::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Controller;
    use crate::geometry::Indices;

    #[test]
    fn test_only_bonuses_have_patterns() {
        for shape in Shape::BASIC.iter().chain(&Shape::OBSTACLES) {
            assert!(shape.pattern().is_empty(), "{shape:?}");
        }
        for shape in Shape::BONUS {
            assert!(!shape.pattern().is_empty(), "{shape:?}");
        }
    }

    #[test]
    fn test_config_is_valid() {
        let config = Shape::config(Size::new(8, 8));
        assert!(config.validate().is_ok());
        let ctrl = Controller::new(config.with_seed(3)).unwrap();
        assert_eq!(ctrl.basic().len(), 4);
    }

    #[test]
    fn test_bomb_detects_corner_in_any_orientation() {
        let corner: Indices = [(4, 4), (4, 5), (4, 6), (5, 4), (6, 4)]
            .into_iter()
            .map(Index::from)
            .collect();
        assert_eq!(Shape::Bomb.pattern().detect_in(&corner), corner);
        assert!(Shape::Rocket.pattern().detect_in(&corner).is_empty());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Shape::Rocket).unwrap(), r#""rocket""#);
        let shape: Shape = serde_json::from_str(r#""stone""#).unwrap();
        assert_eq!(shape, Shape::Stone);
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = Shape::config(Size::new(7, 9)).with_seed(11);
        let json = serde_json::to_string(&config).unwrap();
        let restored: ControllerConfig<Shape> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);

        let minimal = r#"{"size":{"columns":5,"rows":5},"basic":["square","circle"]}"#;
        let config: ControllerConfig<Shape> = serde_json::from_str(minimal).unwrap();
        assert!(config.bonus.is_empty());
        assert!(config.obstacles.is_empty());
        assert!(Controller::new(config).is_ok());
    }
}
