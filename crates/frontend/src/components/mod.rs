//! Shared view components

pub mod calendar;
pub mod comments;
pub mod error_banner;
pub mod feed_item;
pub mod nav;
pub mod progress_bar;
pub mod project;
pub mod search;
pub mod spinner;

pub use calendar::MonthCalendar;
pub use comments::CommentThread;
pub use error_banner::ErrorBanner;
pub use feed_item::FeedItemCard;
pub use nav::AppShell;
pub use progress_bar::ProgressBar;
pub use project::{FundingPanel, MemberList, PhotoGallery};
pub use search::SearchBox;
pub use spinner::LoadingSpinner;
