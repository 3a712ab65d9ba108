use serde::{Deserialize, Serialize};
use user_settings_sdk::{UserRef, UserSettings, WeightUnit};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnitDto {
    Kg,
    Lb,
}

impl From<WeightUnit> for WeightUnitDto {
    fn from(unit: WeightUnit) -> Self {
        match unit {
            WeightUnit::Kg => Self::Kg,
            WeightUnit::Lb => Self::Lb,
        }
    }
}

impl From<WeightUnitDto> for WeightUnit {
    fn from(unit: WeightUnitDto) -> Self {
        match unit {
            WeightUnitDto::Kg => Self::Kg,
            WeightUnitDto::Lb => Self::Lb,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserRefDto {
    pub id: i64,
}

/// Wire form of a user settings record. Absent values serialize as `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSettingsDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub weekly_goal: Option<i32>,
    #[serde(default)]
    pub weight_unit: Option<WeightUnitDto>,
    #[serde(default)]
    pub user: Option<UserRefDto>,
}

impl From<UserSettings> for UserSettingsDto {
    fn from(settings: UserSettings) -> Self {
        Self {
            id: settings.id,
            weekly_goal: settings.weekly_goal,
            weight_unit: settings.weight_unit.map(Into::into),
            user: settings.user.map(|u| UserRefDto { id: u.id }),
        }
    }
}

impl From<UserSettingsDto> for UserSettings {
    fn from(dto: UserSettingsDto) -> Self {
        Self {
            id: dto.id,
            weekly_goal: dto.weekly_goal,
            weight_unit: dto.weight_unit.map(Into::into),
            user: dto.user.map(|u| UserRef { id: u.id }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case_with_nulls() {
        let dto = UserSettingsDto::from(
            UserSettings::default()
                .with_id(1)
                .with_weight_unit(WeightUnit::Lb),
        );
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "weeklyGoal": null, "weightUnit": "lb", "user": null})
        );
    }

    #[test]
    fn deserializes_partial_body() {
        let dto: UserSettingsDto =
            serde_json::from_str(r#"{"weeklyGoal": 10, "weightUnit": "kg", "user": {"id": 4}}"#)
                .unwrap();
        let settings: UserSettings = dto.into();
        assert!(settings.id.is_none());
        assert_eq!(settings.weekly_goal, Some(10));
        assert_eq!(settings.weight_unit, Some(WeightUnit::Kg));
        assert_eq!(settings.user.map(|u| u.id), Some(4));
    }

    #[test]
    fn rejects_unknown_weight_unit() {
        let res: Result<UserSettingsDto, _> = serde_json::from_str(r#"{"weightUnit": "stone"}"#);
        assert!(res.is_err());
    }
}
