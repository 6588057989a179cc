// 🏢 Entity - A company being estimated
//
// Headcount is fixed for the session. The override rate feeds the synthetic
// Custom scenario; when absent the Custom scenario tracks the base rate.

use crate::error::{EstimationError, EstimationResult};
use serde::{Deserialize, Serialize};

// ============================================================================
// DISPLAY COLOURS
// ============================================================================

/// Hex colours for light and dark themes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityColors {
    pub light: String,
    pub dark: String,
}

impl Default for EntityColors {
    fn default() -> Self {
        EntityColors {
            light: "#6366F1".to_string(),
            dark: "#8687FF".to_string(),
        }
    }
}

// ============================================================================
// ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Company name, unique within a configuration
    pub name: String,

    /// Full-time-equivalent employees
    pub headcount: u32,

    /// User-tuned ARR per FTE for the Custom scenario
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_rate: Option<f64>,

    #[serde(default)]
    pub colors: EntityColors,
}

impl Entity {
    /// Create an entity; headcount must be strictly positive
    pub fn new(name: impl Into<String>, headcount: u32) -> EstimationResult<Self> {
        let entity = Entity {
            name: name.into(),
            headcount,
            override_rate: None,
            colors: EntityColors::default(),
        };
        entity.validate()?;
        Ok(entity)
    }

    pub fn with_colors(mut self, light: &str, dark: &str) -> Self {
        self.colors = EntityColors {
            light: light.to_string(),
            dark: dark.to_string(),
        };
        self
    }

    /// Copy of this entity with a new override rate
    pub fn with_override_rate(&self, rate: f64) -> Self {
        Entity {
            override_rate: Some(rate),
            ..self.clone()
        }
    }

    /// Rate used by the Custom scenario
    pub fn custom_rate(&self, base_rate: f64) -> f64 {
        self.override_rate.unwrap_or(base_rate)
    }

    pub fn validate(&self) -> EstimationResult<()> {
        if self.headcount == 0 {
            return Err(EstimationError::ZeroHeadcount {
                name: self.name.clone(),
            });
        }
        if let Some(rate) = self.override_rate {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(EstimationError::InvalidRate {
                    target: format!("{} custom", self.name),
                    rate,
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_creation() {
        let entity = Entity::new("Collibra", 974).unwrap();
        assert_eq!(entity.name, "Collibra");
        assert_eq!(entity.headcount, 974);
        assert!(entity.override_rate.is_none());
    }

    #[test]
    fn test_zero_headcount_rejected() {
        let err = Entity::new("Ghost", 0).unwrap_err();
        assert_eq!(
            err,
            EstimationError::ZeroHeadcount {
                name: "Ghost".to_string()
            }
        );
    }

    #[test]
    fn test_custom_rate_falls_back_to_base() {
        let entity = Entity::new("Alation", 612).unwrap();
        assert_eq!(entity.custom_rate(150_000.0), 150_000.0);

        let tuned = entity.with_override_rate(180_000.0);
        assert_eq!(tuned.custom_rate(150_000.0), 180_000.0);
        // Source entity is untouched
        assert!(entity.override_rate.is_none());
    }

    #[test]
    fn test_negative_override_rejected() {
        let entity = Entity::new("Alation", 612).unwrap().with_override_rate(-1.0);
        assert!(entity.validate().is_err());
    }

    #[test]
    fn test_deserialize_without_optional_fields() {
        let entity: Entity = serde_json::from_str(r#"{"name":"Acme","headcount":10}"#).unwrap();
        assert_eq!(entity.headcount, 10);
        assert_eq!(entity.colors, EntityColors::default());
    }
}
