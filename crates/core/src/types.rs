use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnNull, DisplayFromStr, PickFirst, serde_as};
use std::fmt;

/// Declares a string-backed enum that keeps unknown server values instead of
/// rejecting the whole payload.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $value:literal / $label:literal,)+
        }
        default = $default:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire value
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $value,)+
                    Self::Other(value) => value.as_str(),
                }
            }

            /// Human readable label
            pub fn label(&self) -> &str {
                match self {
                    $(Self::$variant => $label,)+
                    Self::Other(value) => value.as_str(),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $($value => Self::$variant,)+
                    _ => Self::Other(value),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

string_enum! {
    /// Account flavour chosen at registration
    pub enum UserType {
        Artist => "artist" / "Artist",
        Collector => "collector" / "Collector",
        Gallery => "gallery" / "Gallery",
    }
    default = Artist;
}

string_enum! {
    pub enum ProjectType {
        Solo => "solo" / "Solo",
        Collaborative => "collaborative" / "Collaborative",
    }
    default = Solo;
}

string_enum! {
    pub enum ProjectStatus {
        Ongoing => "ongoing" / "Ongoing",
        Development => "development" / "In development",
        Completed => "completed" / "Completed",
        Paused => "paused" / "Paused",
    }
    default = Ongoing;
}

string_enum! {
    pub enum BudgetType {
        None => "none" / "No budget",
        SelfFunded => "self" / "Self-funded",
        Grant => "grant" / "Grant-funded",
        Seeking => "seeking" / "Seeking funding",
        Commissioned => "commissioned" / "Commissioned",
    }
    default = None;
}

// ========== Users & profiles ==========

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: u64,
    pub username: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub email: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub first_name: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub last_name: String,
}

impl UserSummary {
    /// Full name when the user filled it in, otherwise the username
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, Deserialize)]
struct RawProfile {
    id: u64,
    #[serde(default)]
    user: Option<UserSummary>,
    #[serde(default)]
    username: Option<String>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    user_type: UserType,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    bio: String,
    #[serde(default)]
    profile_image: Option<String>,
    #[serde(default)]
    date_joined: Option<DateTime<Utc>>,
    #[serde(default)]
    follower_count: u64,
    #[serde(default)]
    following_count: u64,
    #[serde(default)]
    is_following: bool,
}

/// Public profile. The handle is taken from the top-level `username` and
/// falls back to the nested user record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawProfile")]
pub struct Profile {
    pub id: u64,
    pub user: Option<UserSummary>,
    pub username: String,
    pub user_type: UserType,
    pub bio: String,
    pub profile_image: Option<String>,
    pub date_joined: Option<DateTime<Utc>>,
    pub follower_count: u64,
    pub following_count: u64,
    pub is_following: bool,
}

impl From<RawProfile> for Profile {
    fn from(raw: RawProfile) -> Self {
        let username = raw
            .username
            .filter(|name| !name.is_empty())
            .or_else(|| raw.user.as_ref().map(|user| user.username.clone()))
            .unwrap_or_default();

        Self {
            id: raw.id,
            user: raw.user,
            username,
            user_type: raw.user_type,
            bio: raw.bio,
            profile_image: raw.profile_image.filter(|url| !url.is_empty()),
            date_joined: raw.date_joined,
            follower_count: raw.follower_count,
            following_count: raw.following_count,
            is_following: raw.is_following,
        }
    }
}

/// Body of `/auth/me/` and `/auth/login/`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionPayload {
    pub user: UserSummary,
    #[serde(default)]
    pub profile: Option<Profile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub user_type: UserType,
}

/// In-memory file attached to a multipart request
#[derive(Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for Upload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upload")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub bio: Option<String>,
    pub user_type: Option<UserType>,
    pub profile_image: Option<Upload>,
}

// ========== Feed ==========

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    Image,
    Verbalise,
}

impl PostKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Verbalise => "verbalise",
        }
    }
}

impl fmt::Display for PostKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub username: String,
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostBody {
    Image { image: String, caption: String },
    Verbalise { content: String },
}

/// Feed record exactly as the server sends it: one flat shape for both post
/// tables, with the type-specific columns nullable.
#[derive(Debug, Clone, Deserialize)]
struct RawFeedItem {
    id: u64,
    post_type: String,
    #[serde(default)]
    user: Option<UserSummary>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    profile_image: Option<String>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    like_count: u64,
    #[serde(default)]
    comment_count: u64,
    #[serde(default)]
    is_liked: bool,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    caption: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

/// One entry of the home feed or a profile's post list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawFeedItem")]
pub struct FeedItem {
    pub id: u64,
    pub author: Author,
    pub created_at: DateTime<Utc>,
    pub like_count: u64,
    pub comment_count: u64,
    pub is_liked: bool,
    pub body: PostBody,
}

impl TryFrom<RawFeedItem> for FeedItem {
    type Error = String;

    fn try_from(raw: RawFeedItem) -> Result<Self, Self::Error> {
        let body = match raw.post_type.as_str() {
            "image" => PostBody::Image {
                image: raw.image.unwrap_or_default(),
                caption: raw.caption.unwrap_or_default(),
            },
            "verbalise" | "verbal" => PostBody::Verbalise {
                content: raw.content.unwrap_or_default(),
            },
            other => return Err(format!("unknown post_type `{other}`")),
        };

        let username = raw
            .username
            .filter(|name| !name.is_empty())
            .or_else(|| raw.user.map(|user| user.username))
            .unwrap_or_default();

        Ok(Self {
            id: raw.id,
            author: Author {
                username,
                profile_image: raw.profile_image.filter(|url| !url.is_empty()),
            },
            created_at: raw.created_at,
            like_count: raw.like_count,
            comment_count: raw.comment_count,
            is_liked: raw.is_liked,
            body,
        })
    }
}

impl FeedItem {
    pub const fn kind(&self) -> PostKind {
        match self.body {
            PostBody::Image { .. } => PostKind::Image,
            PostBody::Verbalise { .. } => PostKind::Verbalise,
        }
    }

    /// Ids are only unique per post table, so list keys carry the kind too
    pub fn key(&self) -> String {
        format!("{}-{}", self.kind(), self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeStatus {
    Liked,
    Unliked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LikeResponse {
    pub status: LikeStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewVerbalise {
    pub content: String,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Comment {
    pub id: u64,
    #[serde(default)]
    pub user: Option<UserSummary>,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn author(&self) -> &str {
        match &self.user {
            Some(user) if self.username.is_empty() => &user.username,
            _ => &self.username,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewComment {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImagePost {
    pub image: Upload,
    pub caption: String,
}

// ========== Projects ==========

#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
struct RawFunding {
    #[serde(default)]
    enabled: Option<bool>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    goal: Option<f64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    raised: Option<f64>,
    #[serde(default)]
    percentage: Option<u8>,
    #[serde(default)]
    is_funded: Option<bool>,
    #[serde(default)]
    supporter_count: Option<u64>,
    #[serde(default)]
    budget_items: Vec<BudgetItem>,
    #[serde(default)]
    recent_supporters: Vec<Supporter>,
}

/// One line of a project's budget breakdown
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BudgetItem {
    pub id: u64,
    pub category: String,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub amount: f64,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBudgetItem {
    pub category: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// A pledge as shown publicly; anonymous pledges arrive as "Anonymous"
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Supporter {
    pub id: u64,
    pub display_name: String,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub amount: f64,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Funding block of a project. The list/detail serializers send
/// `{"enabled": false}` when the project has no funding; the dedicated
/// funding endpoint omits `enabled` entirely and is the only one that
/// carries the budget breakdown and recent supporters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawFunding")]
pub enum Funding {
    Disabled,
    Enabled {
        goal: f64,
        raised: f64,
        percentage: u8,
        is_funded: bool,
        supporter_count: Option<u64>,
        budget_items: Vec<BudgetItem>,
        recent_supporters: Vec<Supporter>,
    },
}

impl Default for Funding {
    fn default() -> Self {
        Self::Disabled
    }
}

impl From<RawFunding> for Funding {
    fn from(raw: RawFunding) -> Self {
        let enabled = raw.enabled.unwrap_or(raw.goal.is_some());
        if !enabled {
            return Self::Disabled;
        }

        let goal = raw.goal.unwrap_or_default();
        let raised = raw.raised.unwrap_or_default();
        Self::Enabled {
            goal,
            raised,
            percentage: raw
                .percentage
                .unwrap_or_else(|| crate::progress::funding_percentage(goal, raised)),
            is_funded: raw.is_funded.unwrap_or(raised >= goal),
            supporter_count: raw.supporter_count,
            budget_items: raw.budget_items,
            recent_supporters: raw.recent_supporters,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cover_photo: Option<String>,
    #[serde(default)]
    pub project_type: ProjectType,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub budget_type: BudgetType,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub creator: UserSummary,
    #[serde(default)]
    pub progress_percent: Option<u8>,
    #[serde(default)]
    pub funding: Funding,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectPhoto {
    pub id: u64,
    pub image: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEntry {
    #[serde(default)]
    pub id: Option<u64>,
    pub date: NaiveDate,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectDetail {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cover_photo: Option<String>,
    #[serde(default)]
    pub project_type: ProjectType,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub budget_type: BudgetType,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub creator: UserSummary,
    #[serde(default)]
    pub collaborators: Vec<UserSummary>,
    #[serde(default)]
    pub manifestations: Vec<String>,
    #[serde(default)]
    pub photos: Vec<ProjectPhoto>,
    #[serde(default)]
    pub calendar_entries: Vec<CalendarEntry>,
    #[serde(default)]
    pub progress_percent: Option<u8>,
    #[serde(default)]
    pub days_remaining: Option<i64>,
    #[serde(default)]
    pub funding: Funding,
}

impl ProjectDetail {
    pub fn is_owned_by(&self, user: Option<&UserSummary>) -> bool {
        user.is_some_and(|user| user.id == self.creator.id)
    }

    /// Server-computed progress when present, otherwise derived from the dates
    pub fn effective_progress(&self, today: NaiveDate) -> Option<u8> {
        self.progress_percent.or_else(|| {
            crate::progress::progress_percent(self.start_date, self.end_date, today)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCalendarEntry {
    pub date: NaiveDate,
    pub content: String,
}

/// Fields of the multipart create form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub project_type: ProjectType,
    pub status: ProjectStatus,
    pub budget_type: BudgetType,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub cover_photo: Option<Upload>,
    pub funding_goal: Option<f64>,
}

/// Returned by project creation so the caller can navigate to the new page
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedProject {
    pub id: u64,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_type: Option<ProjectType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_type: Option<BudgetType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupportPledge {
    pub amount: f64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
    pub is_anonymous: bool,
}

// ========== Search ==========

/// Minimum query length the search endpoint answers with results
pub const SEARCH_MIN_CHARS: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub users: Vec<UserSummary>,
    #[serde(default)]
    pub projects: Vec<ProjectSummary>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.projects.is_empty()
    }
}

// ========== Messages ==========

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Message {
    pub id: u64,
    pub sender: UserSummary,
    pub recipient: UserSummary,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub parent: Option<u64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewMessage {
    pub recipient_username: String,
    pub subject: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_item(post_type: &str) -> serde_json::Value {
        json!({
            "id": 7,
            "post_type": post_type,
            "user": {"id": 1, "username": "ada", "email": "ada@example.com", "first_name": "", "last_name": ""},
            "username": "ada",
            "profile_image": null,
            "created_at": "2025-03-01T10:00:00Z",
            "like_count": 3,
            "comment_count": 0,
            "is_liked": false,
            "image": "/media/post_images/a.png",
            "caption": null,
            "content": "hello"
        })
    }

    #[test]
    fn feed_item_normalizes_image_posts() {
        let item: FeedItem = serde_json::from_value(raw_item("image")).unwrap();
        assert_eq!(item.kind(), PostKind::Image);
        assert_eq!(item.key(), "image-7");
        assert_eq!(
            item.body,
            PostBody::Image {
                image: "/media/post_images/a.png".into(),
                caption: String::new(),
            }
        );
        assert_eq!(item.author.profile_image, None);
    }

    #[test]
    fn feed_item_normalizes_verbalise_posts() {
        let item: FeedItem = serde_json::from_value(raw_item("verbalise")).unwrap();
        assert_eq!(item.kind(), PostKind::Verbalise);
        assert_eq!(
            item.body,
            PostBody::Verbalise {
                content: "hello".into()
            }
        );
    }

    #[test]
    fn feed_item_rejects_unknown_post_type() {
        let err = serde_json::from_value::<FeedItem>(raw_item("video")).unwrap_err();
        assert!(err.to_string().contains("unknown post_type"));
    }

    #[test]
    fn feed_item_falls_back_to_nested_username() {
        let mut value = raw_item("verbalise");
        value.as_object_mut().unwrap().remove("username");
        let item: FeedItem = serde_json::from_value(value).unwrap();
        assert_eq!(item.author.username, "ada");
    }

    #[test]
    fn profile_tolerates_sparse_payloads() {
        let profile: Profile = serde_json::from_value(json!({
            "id": 4,
            "user": {"id": 9, "username": "lin"},
            "bio": null,
            "profile_image": ""
        }))
        .unwrap();

        assert_eq!(profile.username, "lin");
        assert_eq!(profile.bio, "");
        assert_eq!(profile.profile_image, None);
        assert_eq!(profile.user_type, UserType::Artist);
        assert!(!profile.is_following);
    }

    #[test]
    fn unknown_enum_values_are_kept() {
        let status: ProjectStatus = serde_json::from_value(json!("archived")).unwrap();
        assert_eq!(status, ProjectStatus::Other("archived".into()));
        assert_eq!(status.as_str(), "archived");
        assert_eq!(
            serde_json::to_value(ProjectStatus::Development).unwrap(),
            json!("development")
        );
        assert_eq!(BudgetType::SelfFunded.label(), "Self-funded");
    }

    #[test]
    fn funding_accepts_decimal_strings() {
        let funding: Funding = serde_json::from_value(json!({
            "enabled": true,
            "goal": "500.00",
            "raised": "125.50",
            "percentage": 25,
            "is_funded": false
        }))
        .unwrap();

        assert_eq!(
            funding,
            Funding::Enabled {
                goal: 500.0,
                raised: 125.5,
                percentage: 25,
                is_funded: false,
                supporter_count: None,
                budget_items: Vec::new(),
                recent_supporters: Vec::new(),
            }
        );

        let disabled: Funding = serde_json::from_value(json!({"enabled": false})).unwrap();
        assert_eq!(disabled, Funding::Disabled);
    }

    #[test]
    fn funding_endpoint_shape_without_enabled_flag() {
        let funding: Funding = serde_json::from_value(json!({
            "id": 2,
            "goal": "200.00",
            "raised": "250.00",
            "supporter_count": 4,
            "budget_items": [
                {"id": 1, "category": "Materials", "amount": "120.00", "description": "Canvas"}
            ],
            "recent_supporters": [
                {
                    "id": 9,
                    "display_name": "Anonymous",
                    "amount": "50.00",
                    "message": "",
                    "created_at": "2025-03-01T10:00:00Z"
                }
            ]
        }))
        .unwrap();

        let Funding::Enabled {
            percentage,
            is_funded,
            supporter_count,
            budget_items,
            recent_supporters,
            ..
        } = funding
        else {
            panic!("funding endpoint always means enabled");
        };
        assert_eq!(percentage, 100);
        assert!(is_funded);
        assert_eq!(supporter_count, Some(4));
        assert_eq!(budget_items.len(), 1);
        assert_eq!(budget_items[0].category, "Materials");
        assert!((budget_items[0].amount - 120.0).abs() < f64::EPSILON);
        assert_eq!(recent_supporters[0].display_name, "Anonymous");
    }

    #[test]
    fn comment_author_falls_back_to_nested_user() {
        let comment: Comment = serde_json::from_value(json!({
            "id": 3,
            "user": {"id": 1, "username": "ada"},
            "content": "Lovely",
            "created_at": "2025-03-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(comment.author(), "ada");
    }

    #[test]
    fn display_name_prefers_full_name() {
        let mut user = UserSummary {
            id: 1,
            username: "ada".into(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
        };
        assert_eq!(user.display_name(), "ada");
        user.first_name = "Ada".into();
        user.last_name = "Lovelace".into();
        assert_eq!(user.display_name(), "Ada Lovelace");
    }
}
