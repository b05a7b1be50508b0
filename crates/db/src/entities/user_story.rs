//! User story entity (visitor-submitted stories awaiting moderation).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Story kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum StoryType {
    #[sea_orm(string_value = "story")]
    Story,
    #[sea_orm(string_value = "community")]
    Community,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_story")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Site the story is about.
    #[sea_orm(indexed)]
    pub site_id: String,

    /// Submitting user.
    pub user_id: String,

    #[sea_orm(column_type = "Text")]
    pub content: String,

    pub story_type: StoryType,

    /// Author display name, denormalized at submission time.
    pub author_name: String,

    /// Approval gate; only approved stories are publicly visible.
    #[sea_orm(default_value = false)]
    pub is_approved: bool,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::heritage_site::Entity",
        from = "Column::SiteId",
        to = "super::heritage_site::Column::Id"
    )]
    Site,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    Author,
}

impl Related<super::heritage_site::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Site.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
