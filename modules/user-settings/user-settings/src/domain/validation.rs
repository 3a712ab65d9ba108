use user_settings_sdk::UserSettings;

use super::error::DomainError;

/// Field rules applied to every create and update.
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    min_weekly_goal: i32,
}

impl Validator {
    #[must_use]
    pub fn new(min_weekly_goal: i32) -> Self {
        Self { min_weekly_goal }
    }

    pub fn validate(&self, settings: &UserSettings) -> Result<(), DomainError> {
        if let Some(goal) = settings.weekly_goal
            && goal < self.min_weekly_goal
        {
            return Err(DomainError::validation(
                "weeklyGoal",
                format!("must be greater than or equal to {}", self.min_weekly_goal),
            ));
        }
        Ok(())
    }
}
