//! Comment Entity

use auth::models::user_id::UserId;
use chrono::{DateTime, Utc};

use crate::domain::value_object::ids::{CampaignId, CommentId};

/// Maximum comment length (in characters)
pub const COMMENT_MAX_LENGTH: usize = 2000;

/// A user's comment on a campaign
#[derive(Debug, Clone)]
pub struct Comment {
    pub comment_id: CommentId,
    pub campaign_id: CampaignId,
    pub author_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(campaign_id: CampaignId, author_id: UserId, content: String) -> Self {
        Self {
            comment_id: CommentId::new(),
            campaign_id,
            author_id,
            content,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_comment() {
        let campaign_id = CampaignId::new();
        let comment = Comment::new(campaign_id, UserId::new(), "Get well soon!".to_string());
        assert_eq!(comment.campaign_id, campaign_id);
        assert_eq!(comment.content, "Get well soon!");
    }
}
