//! Database repositories.

pub mod audio_summary;
pub mod favorite;
pub mod heritage_site;
pub mod media;
pub mod user;
pub mod user_story;

pub use audio_summary::AudioSummaryRepository;
pub use favorite::FavoriteRepository;
pub use heritage_site::HeritageSiteRepository;
pub use media::MediaRepository;
pub use user::UserRepository;
pub use user_story::UserStoryRepository;
