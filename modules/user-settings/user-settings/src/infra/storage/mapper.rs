use user_settings_sdk::{UserRef, UserSettings, WeightUnit};

use super::entity::{DbWeightUnit, Model};

impl From<DbWeightUnit> for WeightUnit {
    fn from(unit: DbWeightUnit) -> Self {
        match unit {
            DbWeightUnit::Kg => WeightUnit::Kg,
            DbWeightUnit::Lb => WeightUnit::Lb,
        }
    }
}

impl From<WeightUnit> for DbWeightUnit {
    fn from(unit: WeightUnit) -> Self {
        match unit {
            WeightUnit::Kg => DbWeightUnit::Kg,
            WeightUnit::Lb => DbWeightUnit::Lb,
        }
    }
}

impl From<Model> for UserSettings {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            weekly_goal: model.weekly_goal,
            weight_unit: model.weight_unit.map(Into::into),
            user: model.user_id.map(|id| UserRef { id }),
        }
    }
}
