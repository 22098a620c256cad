//! Column names of the post export and of the derived features.

pub const PAGE_NAME: &str = "Page Name";
pub const FOLLOWERS: &str = "Followers at Posting";
pub const CREATED: &str = "Post Created Date";
pub const TYPE: &str = "Type";
pub const TOTAL_INTERACTIONS: &str = "Total Interactions";
pub const LIKES: &str = "Likes";
pub const COMMENTS: &str = "Comments";
pub const SHARES: &str = "Shares";
pub const MESSAGE: &str = "Message";
pub const LINK_TEXT: &str = "Link Text";

pub const ENGAGEMENT_RATIO: &str = "Engagement Ratio";
pub const POST_HOUR: &str = "Post Hour";
pub const POST_DAY: &str = "Post Day";
pub const POST_MONTH: &str = "Post Month";
pub const POST_LENGTH: &str = "Post Length";
pub const PRESENCE_OF_MEDIA: &str = "Presence of Media";
pub const INTERACTION_RATE: &str = "Interaction Rate";

/// Features added by [`engineer_features`](super::features::engineer_features),
/// in the order they are appended.
pub const ENGINEERED: [&str; 6] = [
    ENGAGEMENT_RATIO,
    POST_HOUR,
    POST_DAY,
    POST_MONTH,
    POST_LENGTH,
    PRESENCE_OF_MEDIA,
];
