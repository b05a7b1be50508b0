//! Audio summary entity (narrated guides attached to a site).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "audio_summary")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Owning site.
    #[sea_orm(indexed)]
    pub site_id: String,

    /// Storage key of the uploaded audio file.
    pub storage_key: String,

    /// Resolved public URL.
    pub url: String,

    /// Duration in seconds, when known.
    #[sea_orm(nullable)]
    pub duration: Option<f64>,

    /// Free-text language tag (e.g. "Hindi", "en").
    pub language: String,

    /// Playback-start counter (monotonic).
    #[sea_orm(default_value = 0)]
    pub play_count: i64,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::heritage_site::Entity",
        from = "Column::SiteId",
        to = "super::heritage_site::Column::Id",
        on_delete = "Cascade"
    )]
    Site,
}

impl Related<super::heritage_site::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Site.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
