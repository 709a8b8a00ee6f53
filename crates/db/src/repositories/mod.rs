//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod application_repo;
pub mod blog_repo;
pub mod category_repo;
pub mod comment_repo;
pub mod competition_repo;
pub mod engagement_repo;
pub mod event_repo;
pub mod media_repo;
pub mod programme_area_repo;
pub mod programme_repo;
pub mod publication_repo;
pub mod session_repo;
pub mod tag_repo;
pub mod user_repo;

pub use application_repo::ApplicationRepo;
pub use blog_repo::BlogRepo;
pub use category_repo::CategoryRepo;
pub use comment_repo::CommentRepo;
pub use competition_repo::CompetitionRepo;
pub use engagement_repo::EngagementRepo;
pub use event_repo::EventRepo;
pub use media_repo::MediaRepo;
pub use programme_area_repo::ProgrammeAreaRepo;
pub use programme_repo::ProgrammeRepo;
pub use publication_repo::PublicationRepo;
pub use session_repo::SessionRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;
