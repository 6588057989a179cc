// 🎨 Theme - light/dark palettes for scenarios and entities

use crate::entity::Entity;
use crate::scenario::ScenarioKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn scenario_color(&self, kind: ScenarioKind) -> &'static str {
        match (kind, self) {
            (ScenarioKind::Bear, _) => "#F87171",
            (ScenarioKind::Base, Theme::Light) => "#34D399",
            (ScenarioKind::Base, Theme::Dark) => "#4ADE80",
            (ScenarioKind::Bull, _) => "#60A5FA",
            (ScenarioKind::Custom, _) => "#9CA3AF",
        }
    }

    pub fn entity_color<'a>(&self, entity: &'a Entity) -> &'a str {
        match self {
            Theme::Light => &entity.colors.light,
            Theme::Dark => &entity.colors.dark,
        }
    }

    pub fn primary(&self) -> &'static str {
        match self {
            Theme::Light => "#1E3A8A",
            Theme::Dark => "#7C83FD",
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Theme::Light => "#111827",
            Theme::Dark => "#E0E0E0",
        }
    }

    pub fn border(&self) -> &'static str {
        match self {
            Theme::Light => "#E5E7EB",
            Theme::Dark => "#4A4B57",
        }
    }
}

/// Parse `#RRGGBB` into an RGB triple
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle().toggle(), Theme::Dark);
    }

    #[test]
    fn test_base_color_depends_on_theme() {
        assert_eq!(Theme::Light.scenario_color(ScenarioKind::Base), "#34D399");
        assert_eq!(Theme::Dark.scenario_color(ScenarioKind::Base), "#4ADE80");
        assert_eq!(
            Theme::Light.scenario_color(ScenarioKind::Bear),
            Theme::Dark.scenario_color(ScenarioKind::Bear)
        );
    }

    #[test]
    fn test_entity_color() {
        let entity = Entity::new("Alation", 612)
            .unwrap()
            .with_colors("#0EA5E9", "#38BDF8");
        assert_eq!(Theme::Light.entity_color(&entity), "#0EA5E9");
        assert_eq!(Theme::Dark.entity_color(&entity), "#38BDF8");
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#F87171"), Some((0xF8, 0x71, 0x71)));
        assert_eq!(parse_hex("60a5fa"), Some((0x60, 0xA5, 0xFA)));
        assert_eq!(parse_hex("#FFF"), None);
        assert_eq!(parse_hex("#GGGGGG"), None);
    }
}
