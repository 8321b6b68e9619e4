use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Access tier shared by enrollments and user levels.
///
/// Variants are declared in promotion order, so the derived `Ord` ranks
/// `Basic < Standard < Certified`.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    #[sea_orm(string_value = "BASIC")]
    Basic,
    #[sea_orm(string_value = "STANDARD")]
    Standard,
    #[sea_orm(string_value = "CERTIFIED")]
    Certified,
}

impl Tier {
    #[must_use]
    pub fn grants_access(&self) -> bool {
        match self {
            Self::Standard | Self::Certified => true,
            Self::Basic => false,
        }
    }
}
