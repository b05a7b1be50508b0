//! Heritage site entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Site category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[sea_orm(string_value = "temple")]
    Temple,
    #[sea_orm(string_value = "fort")]
    Fort,
    #[sea_orm(string_value = "palace")]
    Palace,
    #[sea_orm(string_value = "monument")]
    Monument,
    #[sea_orm(string_value = "museum")]
    Museum,
    #[sea_orm(string_value = "archaeological")]
    Archaeological,
    #[sea_orm(string_value = "natural")]
    Natural,
    #[sea_orm(string_value = "other")]
    Other,
}

/// Heritage site entity - one catalogued cultural heritage site.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "heritage_site")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    #[sea_orm(column_type = "Text")]
    pub historical_significance: String,

    pub category: Category,

    pub state: String,

    pub city: String,

    #[sea_orm(nullable)]
    pub latitude: Option<f64>,

    #[sea_orm(nullable)]
    pub longitude: Option<f64>,

    /// UNESCO World Heritage Site flag.
    #[sea_orm(default_value = false)]
    pub is_unesco: bool,

    #[sea_orm(nullable)]
    pub time_period: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub visitor_guidelines: Option<String>,

    /// Detail-page visit counter (monotonic).
    #[sea_orm(default_value = 0)]
    pub view_count: i64,

    /// Only published sites are visible to public queries.
    #[sea_orm(default_value = false)]
    pub is_published: bool,

    /// Admin who created the record.
    pub created_by: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub folk_tales: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub cultural_heritage: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub cuisine: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub stories: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub community: Option<String>,

    #[sea_orm(nullable)]
    pub ticket_price: Option<String>,

    #[sea_orm(nullable)]
    pub opening_hours: Option<String>,

    #[sea_orm(nullable)]
    pub best_time_to_visit: Option<String>,

    /// Opaque IANA-style timezone label, stored as entered.
    #[sea_orm(nullable)]
    pub timezone: Option<String>,

    /// Embed URL for the 360° panorama viewer.
    #[sea_orm(nullable)]
    pub view360_url: Option<String>,

    /// Embed URL for the 3D model viewer.
    #[sea_orm(nullable)]
    pub view3d_url: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id"
    )]
    Creator,
    #[sea_orm(has_many = "super::media::Entity")]
    Media,
    #[sea_orm(has_many = "super::audio_summary::Entity")]
    Audio,
    #[sea_orm(has_many = "super::favorite::Entity")]
    Favorites,
    #[sea_orm(has_many = "super::user_story::Entity")]
    Stories,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::media::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Media.def()
    }
}

impl Related<super::audio_summary::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Audio.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
