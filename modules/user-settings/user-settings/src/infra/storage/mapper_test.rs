#[cfg(test)]
mod tests {
    use super::super::*;
    use user_settings_sdk::{UserSettings, WeightUnit};

    #[test]
    fn test_entity_to_settings_conversion() {
        let model = entity::Model {
            id: 5,
            weekly_goal: Some(12),
            weight_unit: Some(entity::DbWeightUnit::Lb),
            user_id: Some(3),
        };

        let settings: UserSettings = model.into();

        assert_eq!(settings.id, Some(5));
        assert_eq!(settings.weekly_goal, Some(12));
        assert_eq!(settings.weight_unit, Some(WeightUnit::Lb));
        assert_eq!(settings.user.map(|u| u.id), Some(3));
    }

    #[test]
    fn test_entity_without_optional_columns() {
        let model = entity::Model {
            id: 1,
            weekly_goal: None,
            weight_unit: None,
            user_id: None,
        };

        let settings: UserSettings = model.into();

        assert_eq!(settings.id, Some(1));
        assert!(settings.weekly_goal.is_none());
        assert!(settings.weight_unit.is_none());
        assert!(settings.user.is_none());
    }

    #[test]
    fn test_weight_unit_conversion_both_ways() {
        for unit in [WeightUnit::Kg, WeightUnit::Lb] {
            let db: entity::DbWeightUnit = unit.into();
            assert_eq!(WeightUnit::from(db), unit);
        }
    }
}
