use serde::{Deserialize, Serialize};

/// Tunable policy of the replay converter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Drop the last turn when it has no actions left after reduction. The
    /// terminal checkpoint of a finished match produces such a turn.
    pub drop_trailing_empty_turn: bool,
    /// Reject replays whose checkpoint turn counts do not strictly increase.
    pub require_monotonic_turns: bool,
    /// Upper bound for a base health value in any checkpoint. Unset, base
    /// health is carried through as recorded.
    pub max_base_health: Option<u8>,
}

impl ConvertConfig {
    pub fn new() -> Self {
        Self {
            drop_trailing_empty_turn: true,
            require_monotonic_turns: true,
            max_base_health: None,
        }
    }

    /// Keeps every reconstructed turn and skips the ordering check.
    pub fn lenient() -> Self {
        Self {
            drop_trailing_empty_turn: false,
            require_monotonic_turns: false,
            ..Self::new()
        }
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: ConvertConfig =
            serde_json::from_str(r#"{"require_monotonic_turns": false}"#).unwrap();
        assert!(config.drop_trailing_empty_turn);
        assert!(!config.require_monotonic_turns);
        assert_eq!(config.max_base_health, None);
    }

    #[test]
    fn base_health_limit_is_opt_in() {
        assert_eq!(ConvertConfig::default().max_base_health, None);
        let config: ConvertConfig = serde_json::from_str(r#"{"max_base_health": 5}"#).unwrap();
        assert_eq!(config.max_base_health, Some(5));
    }
}
