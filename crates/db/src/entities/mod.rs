//! Database entities.

pub mod audio_summary;
pub mod favorite;
pub mod heritage_site;
pub mod media;
pub mod user;
pub mod user_story;

pub use audio_summary::Entity as AudioSummary;
pub use favorite::Entity as Favorite;
pub use heritage_site::Entity as HeritageSite;
pub use media::Entity as Media;
pub use user::Entity as User;
pub use user_story::Entity as UserStory;
