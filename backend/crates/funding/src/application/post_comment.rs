//! Post Comment Use Case

use std::sync::Arc;

use auth::models::user_id::UserId;

use crate::domain::entity::comment::{COMMENT_MAX_LENGTH, Comment};
use crate::domain::repository::{CampaignRepository, CommentRepository};
use crate::domain::value_object::ids::CampaignId;
use crate::error::{FundingError, FundingResult};

/// Post comment use case
pub struct PostCommentUseCase<R>
where
    R: CampaignRepository + CommentRepository,
{
    repo: Arc<R>,
}

impl<R> PostCommentUseCase<R>
where
    R: CampaignRepository + CommentRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        campaign_id: &CampaignId,
        author_id: UserId,
        content: String,
    ) -> FundingResult<Comment> {
        let content = content.trim().to_string();
        if content.is_empty() {
            return Err(FundingError::bad_request("Comment cannot be empty"));
        }
        if content.chars().count() > COMMENT_MAX_LENGTH {
            return Err(FundingError::bad_request(format!(
                "Comment must be at most {} characters",
                COMMENT_MAX_LENGTH
            )));
        }

        if self.repo.campaign_by_id(campaign_id).await?.is_none() {
            return Err(FundingError::CampaignNotFound);
        }

        let comment = Comment::new(*campaign_id, author_id, content);
        self.repo.insert_comment(&comment).await?;

        tracing::info!(
            comment_id = %comment.comment_id,
            campaign_id = %campaign_id,
            "Comment posted"
        );

        Ok(comment)
    }
}
