//! Routed views

pub mod create_project;
pub mod edit_profile;
pub mod feed;
pub mod follow_list;
pub mod login;
pub mod messages;
pub mod profile;
pub mod project_detail;
pub mod register;

pub use create_project::CreateProjectPage;
pub use edit_profile::EditProfilePage;
pub use feed::FeedPage;
pub use follow_list::{FollowKind, FollowListPage};
pub use login::LoginPage;
pub use messages::MessagesPage;
pub use profile::ProfilePage;
pub use project_detail::ProjectDetailPage;
pub use register::RegisterPage;
