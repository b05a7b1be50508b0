//! Media entity (images, videos, 3D models, panoramas attached to a site).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Media kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[sea_orm(string_value = "image")]
    Image,
    #[sea_orm(string_value = "video")]
    Video,
    #[sea_orm(string_value = "model3d")]
    Model3d,
    #[sea_orm(string_value = "panorama")]
    Panorama,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "media")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Owning site.
    #[sea_orm(indexed)]
    pub site_id: String,

    pub media_type: MediaType,

    /// Storage key for uploaded files; None for externally sourced URLs.
    #[sea_orm(nullable)]
    pub storage_key: Option<String>,

    /// Resolved public URL.
    pub url: String,

    #[sea_orm(nullable)]
    pub caption: Option<String>,

    /// At most one row per site carries this flag.
    #[sea_orm(default_value = false)]
    pub is_primary: bool,

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

impl Model {
    /// Whether this row is an uploaded file rather than an external link.
    #[must_use]
    pub const fn is_uploaded(&self) -> bool {
        self.storage_key.is_some()
    }
}
