//! Rules configuration.
//!
//! The base game is fully described by `RulesConfig::default()`. Variant
//! rules and table sizes are switched through builder methods or loaded
//! from JSON:
//!
//! ```
//! use burnpile::core::{BurnOrderPolicy, RulesConfig};
//!
//! let rules = RulesConfig::default()
//!     .with_slot_capacity(6)
//!     .with_burn_order(BurnOrderPolicy::PlayerChosen);
//! assert!(rules.validate().is_ok());
//!
//! let loaded = RulesConfig::from_json(r#"{ "ten_wipes_pile": true }"#).unwrap();
//! assert!(loaded.ten_wipes_pile);
//! assert_eq!(loaded.base_hand_limit, 4);
//! ```

use serde::{Deserialize, Serialize};

use super::error::GameError;

/// How several burns found by one play are ordered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BurnOrderPolicy {
    /// Anchor rank first, then Twos, then Threes.
    #[default]
    AsDetected,
    /// The acting player picks the order through the decision maker.
    PlayerChosen,
}

/// Table rules for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Hand limit without the status ability.
    pub base_hand_limit: usize,

    /// Hand limit while holding the status ability.
    pub status_hand_limit: usize,

    /// Emergency slots per player. Slot 0 starts unlocked.
    pub emergency_slot_capacity: usize,

    pub face_up_count: usize,
    pub face_down_count: usize,

    pub burn_order: BurnOrderPolicy,

    /// A lone Ten clears the pile.
    pub ten_wipes_pile: bool,

    /// A PFJ that ends a play is an offense instead of an immediate steal.
    pub pfj_offense: bool,

    /// Block points needed against a Joker.
    pub joker_block_strength: u32,

    /// Block points needed against a PFJ offense.
    pub pfj_block_strength: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            base_hand_limit: 4,
            status_hand_limit: 5,
            emergency_slot_capacity: 4,
            face_up_count: 3,
            face_down_count: 3,
            burn_order: BurnOrderPolicy::AsDetected,
            ten_wipes_pile: false,
            pfj_offense: false,
            joker_block_strength: 1,
            pfj_block_strength: 1,
        }
    }
}

impl RulesConfig {
    /// Base rules with both extended rules switched on.
    #[must_use]
    pub fn extended() -> Self {
        Self::default().with_ten_wipe(true).with_pfj_offense(true)
    }

    /// Deserialize from JSON and validate. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| GameError::invalid_config("json", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_hand_limits(mut self, base: usize, with_status: usize) -> Self {
        self.base_hand_limit = base;
        self.status_hand_limit = with_status;
        self
    }

    #[must_use]
    pub fn with_slot_capacity(mut self, capacity: usize) -> Self {
        self.emergency_slot_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_table_cards(mut self, face_up: usize, face_down: usize) -> Self {
        self.face_up_count = face_up;
        self.face_down_count = face_down;
        self
    }

    #[must_use]
    pub fn with_burn_order(mut self, policy: BurnOrderPolicy) -> Self {
        self.burn_order = policy;
        self
    }

    #[must_use]
    pub fn with_ten_wipe(mut self, enabled: bool) -> Self {
        self.ten_wipes_pile = enabled;
        self
    }

    #[must_use]
    pub fn with_pfj_offense(mut self, enabled: bool) -> Self {
        self.pfj_offense = enabled;
        self
    }

    #[must_use]
    pub fn with_block_strengths(mut self, joker: u32, pfj: u32) -> Self {
        self.joker_block_strength = joker;
        self.pfj_block_strength = pfj;
        self
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.base_hand_limit == 0 {
            return Err(GameError::invalid_config("base_hand_limit", "must be at least 1"));
        }
        if self.status_hand_limit < self.base_hand_limit {
            return Err(GameError::invalid_config(
                "status_hand_limit",
                format!("must be >= base_hand_limit ({})", self.base_hand_limit),
            ));
        }
        if self.emergency_slot_capacity == 0 {
            return Err(GameError::invalid_config(
                "emergency_slot_capacity",
                "must be at least 1",
            ));
        }
        if self.joker_block_strength == 0 {
            return Err(GameError::invalid_config("joker_block_strength", "must be at least 1"));
        }
        if self.pfj_block_strength == 0 {
            return Err(GameError::invalid_config("pfj_block_strength", "must be at least 1"));
        }
        Ok(())
    }
}
