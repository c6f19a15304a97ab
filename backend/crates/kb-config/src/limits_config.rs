use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_MAX_BOARDS_PER_TEAM, MAX_MAX_BOARDS_PER_TEAM,
    MIN_MAX_BOARDS_PER_TEAM,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Board creation is refused once a team owns this many boards
    pub max_boards_per_team: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_boards_per_team: DEFAULT_MAX_BOARDS_PER_TEAM,
        }
    }
}

impl LimitsConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !(MIN_MAX_BOARDS_PER_TEAM..=MAX_MAX_BOARDS_PER_TEAM).contains(&self.max_boards_per_team)
        {
            return Err(ConfigError::limits(format!(
                "limits.max_boards_per_team must be {}-{}, got {}",
                MIN_MAX_BOARDS_PER_TEAM, MAX_MAX_BOARDS_PER_TEAM, self.max_boards_per_team
            )));
        }

        Ok(())
    }
}
