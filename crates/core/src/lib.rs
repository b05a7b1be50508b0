//! Core domain services for virasat.
//!
//! Each service wraps one or more repositories and owns the policy the API
//! layer exposes: catalog filtering and search, media aggregation and
//! primary-image resolution, audio guides, favorites, story moderation, and
//! caller identity resolution.

pub mod services;

pub use services::audio::{AddAudioInput, AudioService};
pub use services::favorite::{FavoriteService, ToggleResult};
pub use services::media::{primary_image, AddMediaInput, MediaService};
pub use services::photo_search::{PhotoSearchClient, PhotoSearchConfig};
pub use services::site::{
    CatalogStats, CreateSiteInput, ListFilter, SiteDetail, SiteService, SiteWithMedia,
    UpdateSiteInput,
};
pub use services::story::{StoryService, SubmitStoryInput};
pub use services::user::{IdentityClaims, TokenVerifier, UserService};
