//! PostgreSQL Repository Implementations
//!
//! One store type implements every funding repository trait. The
//! verification transaction lives here: claiming the donation row and
//! crediting its target commit or roll back together.

use auth::models::user_id::UserId;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    campaign::Campaign, comment::Comment, donation::Donation, medical_case::MedicalCase,
    withdrawal_request::WithdrawalRequest,
};
use crate::domain::repository::{
    ActivityItem, ActivityRepository, CampaignRepository, CaseRepository, CommentRepository,
    CreditOutcome, DonationRepository, DonationTotals, UserDirectory,
    WithdrawalRequestRepository,
};
use crate::domain::value_object::{
    amount::Amount,
    campaign_status::CampaignStatus,
    category::FundraisingCategory,
    donation_target::DonationTarget,
    ids::{CampaignId, CaseId, CommentId, DonationId, WithdrawalRequestId},
    request_status::RequestStatus,
    subscription_plan::SubscriptionPlan,
};
use crate::error::{FundingError, FundingResult};

/// PostgreSQL-backed funding repository
#[derive(Clone)]
pub struct PgFundingRepository {
    pool: PgPool,
}

impl PgFundingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Campaign Repository Implementation
// ============================================================================

impl CampaignRepository for PgFundingRepository {
    async fn insert_campaign(&self, campaign: &Campaign) -> FundingResult<()> {
        sqlx::query(
            r#"
            INSERT INTO campaigns (
                campaign_id,
                owner_id,
                state,
                category,
                title,
                description,
                start_date,
                end_date,
                target_amount,
                amount_raised,
                medical_report,
                media,
                sponsor,
                status,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(campaign.campaign_id.as_uuid())
        .bind(campaign.owner_id.as_uuid())
        .bind(&campaign.state)
        .bind(campaign.category.id())
        .bind(&campaign.title)
        .bind(&campaign.description)
        .bind(campaign.start_date)
        .bind(campaign.end_date)
        .bind(campaign.target_amount.minor_units())
        .bind(campaign.amount_raised)
        .bind(&campaign.medical_report)
        .bind(&campaign.media)
        .bind(&campaign.sponsor)
        .bind(campaign.status.id())
        .bind(campaign.created_at)
        .bind(campaign.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn campaign_by_id(&self, campaign_id: &CampaignId) -> FundingResult<Option<Campaign>> {
        let row = sqlx::query_as::<_, CampaignRow>(&select_campaign("WHERE campaign_id = $1"))
            .bind(campaign_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_campaign()).transpose()
    }

    async fn update_campaign(&self, campaign: &Campaign) -> FundingResult<()> {
        sqlx::query(
            r#"
            UPDATE campaigns SET
                state = $2,
                category = $3,
                title = $4,
                description = $5,
                start_date = $6,
                end_date = $7,
                target_amount = $8,
                medical_report = $9,
                media = $10,
                sponsor = $11,
                status = $12,
                updated_at = $13
            WHERE campaign_id = $1
            "#,
        )
        .bind(campaign.campaign_id.as_uuid())
        .bind(&campaign.state)
        .bind(campaign.category.id())
        .bind(&campaign.title)
        .bind(&campaign.description)
        .bind(campaign.start_date)
        .bind(campaign.end_date)
        .bind(campaign.target_amount.minor_units())
        .bind(&campaign.medical_report)
        .bind(&campaign.media)
        .bind(&campaign.sponsor)
        .bind(campaign.status.id())
        .bind(campaign.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_campaign(&self, campaign_id: &CampaignId) -> FundingResult<bool> {
        let deleted = sqlx::query("DELETE FROM campaigns WHERE campaign_id = $1")
            .bind(campaign_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn campaigns(&self) -> FundingResult<Vec<Campaign>> {
        let rows = sqlx::query_as::<_, CampaignRow>(&select_campaign("ORDER BY created_at DESC"))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|r| r.into_campaign()).collect()
    }

    async fn campaigns_by_status(&self, status: CampaignStatus) -> FundingResult<Vec<Campaign>> {
        let rows = sqlx::query_as::<_, CampaignRow>(&select_campaign(
            "WHERE status = $1 ORDER BY created_at DESC",
        ))
        .bind(status.id())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_campaign()).collect()
    }

    async fn campaigns_by_category(
        &self,
        category: FundraisingCategory,
    ) -> FundingResult<Vec<Campaign>> {
        let rows = sqlx::query_as::<_, CampaignRow>(&select_campaign(
            "WHERE category = $1 ORDER BY created_at DESC",
        ))
        .bind(category.id())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_campaign()).collect()
    }

    async fn campaigns_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> FundingResult<Vec<Campaign>> {
        let rows = sqlx::query_as::<_, CampaignRow>(&select_campaign(
            "WHERE created_at >= $1 AND created_at < $2 ORDER BY created_at DESC",
        ))
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_campaign()).collect()
    }
}

fn select_campaign(clause: &str) -> String {
    format!(
        r#"
        SELECT
            campaign_id,
            owner_id,
            state,
            category,
            title,
            description,
            start_date,
            end_date,
            target_amount,
            amount_raised,
            medical_report,
            media,
            sponsor,
            status,
            created_at,
            updated_at
        FROM campaigns
        {}
        "#,
        clause
    )
}

// ============================================================================
// Case Repository Implementation
// ============================================================================

impl CaseRepository for PgFundingRepository {
    async fn insert_case(&self, case: &MedicalCase) -> FundingResult<()> {
        sqlx::query(
            r#"
            INSERT INTO cases (
                case_id,
                owner_id,
                name,
                description,
                amount_donated,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(case.case_id.as_uuid())
        .bind(case.owner_id.as_uuid())
        .bind(&case.name)
        .bind(&case.description)
        .bind(case.amount_donated)
        .bind(case.created_at)
        .bind(case.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn case_by_id(&self, case_id: &CaseId) -> FundingResult<Option<MedicalCase>> {
        let row = sqlx::query_as::<_, CaseRow>(&select_case("WHERE case_id = $1"))
            .bind(case_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(CaseRow::into_case))
    }

    async fn update_case(&self, case: &MedicalCase) -> FundingResult<()> {
        sqlx::query(
            r#"
            UPDATE cases SET
                name = $2,
                description = $3,
                updated_at = $4
            WHERE case_id = $1
            "#,
        )
        .bind(case.case_id.as_uuid())
        .bind(&case.name)
        .bind(&case.description)
        .bind(case.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_case(&self, case_id: &CaseId) -> FundingResult<bool> {
        let deleted = sqlx::query("DELETE FROM cases WHERE case_id = $1")
            .bind(case_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn cases(&self) -> FundingResult<Vec<MedicalCase>> {
        let rows = sqlx::query_as::<_, CaseRow>(&select_case("ORDER BY created_at DESC"))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(CaseRow::into_case).collect())
    }
}

fn select_case(clause: &str) -> String {
    format!(
        r#"
        SELECT
            case_id,
            owner_id,
            name,
            description,
            amount_donated,
            created_at,
            updated_at
        FROM cases
        {}
        "#,
        clause
    )
}

// ============================================================================
// Donation Repository Implementation
// ============================================================================

impl DonationRepository for PgFundingRepository {
    async fn insert_donation(&self, donation: &Donation) -> FundingResult<()> {
        sqlx::query(
            r#"
            INSERT INTO donations (
                donation_id,
                donor_id,
                campaign_id,
                case_id,
                amount,
                subscription_plan,
                subscription_ref,
                is_verified,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(donation.donation_id.as_uuid())
        .bind(donation.donor_id.map(|id| id.into_uuid()))
        .bind(donation.target.campaign_uuid())
        .bind(donation.target.case_uuid())
        .bind(donation.amount.minor_units())
        .bind(donation.subscription_plan.map(|p| p.id()))
        .bind(&donation.subscription_ref)
        .bind(donation.is_verified)
        .bind(donation.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn donation_by_id(&self, donation_id: &DonationId) -> FundingResult<Option<Donation>> {
        let row = sqlx::query_as::<_, DonationRow>(&select_donation("WHERE donation_id = $1"))
            .bind(donation_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_donation()).transpose()
    }

    async fn delete_donation(&self, donation_id: &DonationId) -> FundingResult<bool> {
        let deleted = sqlx::query("DELETE FROM donations WHERE donation_id = $1")
            .bind(donation_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn donations(&self) -> FundingResult<Vec<Donation>> {
        let rows = sqlx::query_as::<_, DonationRow>(&select_donation("ORDER BY created_at DESC"))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|r| r.into_donation()).collect()
    }

    async fn donations_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> FundingResult<Vec<Donation>> {
        let rows = sqlx::query_as::<_, DonationRow>(&select_donation(
            "WHERE created_at >= $1 AND created_at < $2 ORDER BY created_at DESC",
        ))
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_donation()).collect()
    }

    async fn verify_and_credit(&self, donation_id: &DonationId) -> FundingResult<CreditOutcome> {
        let mut tx = self.pool.begin().await?;

        // Claim the donation: only one transaction can ever flip the flag
        let claimed = sqlx::query_as::<_, DonationRow>(
            r#"
            UPDATE donations SET is_verified = TRUE
            WHERE donation_id = $1 AND is_verified = FALSE
            RETURNING
                donation_id,
                donor_id,
                campaign_id,
                case_id,
                amount,
                subscription_plan,
                subscription_ref,
                is_verified,
                created_at
            "#,
        )
        .bind(donation_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = claimed else {
            // Distinguish a replay from an unknown reference
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM donations WHERE donation_id = $1)",
            )
            .bind(donation_id.as_uuid())
            .fetch_one(&mut *tx)
            .await?;

            return Err(if exists {
                FundingError::DonationAlreadyVerified
            } else {
                FundingError::DonationNotFound
            });
        };

        let donation = row.into_donation()?;
        let amount = donation.amount.minor_units();

        // Credit the target inside the same transaction
        let new_total = match donation.target {
            DonationTarget::Campaign(campaign_id) => sqlx::query_scalar::<_, i64>(
                r#"
                UPDATE campaigns
                SET amount_raised = amount_raised + $2, updated_at = NOW()
                WHERE campaign_id = $1
                RETURNING amount_raised
                "#,
            )
            .bind(campaign_id.as_uuid())
            .bind(amount)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(FundingError::CampaignNotFound)?,

            DonationTarget::Case(case_id) => sqlx::query_scalar::<_, i64>(
                r#"
                UPDATE cases
                SET amount_donated = amount_donated + $2, updated_at = NOW()
                WHERE case_id = $1
                RETURNING amount_donated
                "#,
            )
            .bind(case_id.as_uuid())
            .bind(amount)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(FundingError::CaseNotFound)?,
        };

        tx.commit().await?;

        Ok(CreditOutcome {
            donation,
            new_total,
        })
    }

    async fn set_subscription_ref(
        &self,
        donation_id: &DonationId,
        subscription_ref: &str,
    ) -> FundingResult<()> {
        sqlx::query("UPDATE donations SET subscription_ref = $2 WHERE donation_id = $1")
            .bind(donation_id.as_uuid())
            .bind(subscription_ref)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn user_donation_totals(&self, public_id: &str) -> FundingResult<DonationTotals> {
        self.require_user(public_id).await?;

        let row = sqlx::query_as::<_, TotalsRow>(
            r#"
            SELECT COALESCE(SUM(d.amount), 0)::BIGINT AS total, COUNT(d.donation_id) AS count
            FROM donations d
            JOIN users u ON u.user_id = d.donor_id
            WHERE u.public_id = $1 AND d.is_verified = TRUE
            "#,
        )
        .bind(public_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(DonationTotals {
            total: row.total,
            count: row.count,
        })
    }

    async fn user_campaign_total(
        &self,
        public_id: &str,
        campaign_id: &CampaignId,
    ) -> FundingResult<i64> {
        self.require_user(public_id).await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COALESCE(SUM(d.amount), 0)::BIGINT
            FROM donations d
            JOIN users u ON u.user_id = d.donor_id
            WHERE u.public_id = $1 AND d.campaign_id = $2 AND d.is_verified = TRUE
            "#,
        )
        .bind(public_id)
        .bind(campaign_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    async fn user_case_total(&self, public_id: &str, case_id: &CaseId) -> FundingResult<i64> {
        self.require_user(public_id).await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COALESCE(SUM(d.amount), 0)::BIGINT
            FROM donations d
            JOIN users u ON u.user_id = d.donor_id
            WHERE u.public_id = $1 AND d.case_id = $2 AND d.is_verified = TRUE
            "#,
        )
        .bind(public_id)
        .bind(case_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    async fn last_donation_for_user(&self, public_id: &str) -> FundingResult<Option<Donation>> {
        self.require_user(public_id).await?;

        let row = sqlx::query_as::<_, DonationRow>(
            r#"
            SELECT
                d.donation_id,
                d.donor_id,
                d.campaign_id,
                d.case_id,
                d.amount,
                d.subscription_plan,
                d.subscription_ref,
                d.is_verified,
                d.created_at
            FROM donations d
            JOIN users u ON u.user_id = d.donor_id
            WHERE u.public_id = $1
            ORDER BY d.created_at DESC
            LIMIT 1
            "#,
        )
        .bind(public_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_donation()).transpose()
    }
}

impl PgFundingRepository {
    async fn require_user(&self, public_id: &str) -> FundingResult<()> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE public_id = $1)",
        )
        .bind(public_id)
        .fetch_one(&self.pool)
        .await?;

        if !exists {
            return Err(FundingError::UserNotFound);
        }
        Ok(())
    }
}

fn select_donation(clause: &str) -> String {
    format!(
        r#"
        SELECT
            donation_id,
            donor_id,
            campaign_id,
            case_id,
            amount,
            subscription_plan,
            subscription_ref,
            is_verified,
            created_at
        FROM donations
        {}
        "#,
        clause
    )
}

// ============================================================================
// User Directory Implementation
// ============================================================================

impl UserDirectory for PgFundingRepository {
    async fn user_id_by_public_id(&self, public_id: &str) -> FundingResult<Option<UserId>> {
        let user_id =
            sqlx::query_scalar::<_, Uuid>("SELECT user_id FROM users WHERE public_id = $1")
                .bind(public_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(user_id.map(UserId::from_uuid))
    }
}

// ============================================================================
// Comment Repository Implementation
// ============================================================================

impl CommentRepository for PgFundingRepository {
    async fn insert_comment(&self, comment: &Comment) -> FundingResult<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (
                comment_id,
                campaign_id,
                author_id,
                content,
                created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(comment.comment_id.as_uuid())
        .bind(comment.campaign_id.as_uuid())
        .bind(comment.author_id.as_uuid())
        .bind(&comment.content)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn comments(&self) -> FundingResult<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT comment_id, campaign_id, author_id, content, created_at
            FROM comments
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CommentRow::into_comment).collect())
    }
}

// ============================================================================
// Withdrawal Request Repository Implementation
// ============================================================================

impl WithdrawalRequestRepository for PgFundingRepository {
    async fn insert_request(&self, request: &WithdrawalRequest) -> FundingResult<()> {
        sqlx::query(
            r#"
            INSERT INTO withdrawal_requests (
                request_id,
                campaign_id,
                requester_id,
                amount,
                bank_name,
                account_name,
                account_number,
                status,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(request.request_id.as_uuid())
        .bind(request.campaign_id.as_uuid())
        .bind(request.requester_id.as_uuid())
        .bind(request.amount.minor_units())
        .bind(&request.bank_name)
        .bind(&request.account_name)
        .bind(&request.account_number)
        .bind(request.status.id())
        .bind(request.created_at)
        .bind(request.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn request_by_id(
        &self,
        request_id: &WithdrawalRequestId,
    ) -> FundingResult<Option<WithdrawalRequest>> {
        let row = sqlx::query_as::<_, RequestRow>(&select_request("WHERE request_id = $1"))
            .bind(request_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_request()).transpose()
    }

    async fn update_request(&self, request: &WithdrawalRequest) -> FundingResult<()> {
        sqlx::query(
            r#"
            UPDATE withdrawal_requests SET
                status = $2,
                updated_at = $3
            WHERE request_id = $1
            "#,
        )
        .bind(request.request_id.as_uuid())
        .bind(request.status.id())
        .bind(request.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn requests(&self) -> FundingResult<Vec<WithdrawalRequest>> {
        let rows = sqlx::query_as::<_, RequestRow>(&select_request("ORDER BY created_at DESC"))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|r| r.into_request()).collect()
    }
}

fn select_request(clause: &str) -> String {
    format!(
        r#"
        SELECT
            request_id,
            campaign_id,
            requester_id,
            amount,
            bank_name,
            account_name,
            account_number,
            status,
            created_at,
            updated_at
        FROM withdrawal_requests
        {}
        "#,
        clause
    )
}

// ============================================================================
// Activity Repository Implementation
// ============================================================================

impl ActivityRepository for PgFundingRepository {
    async fn recent_activity(&self, limit: i64) -> FundingResult<Vec<ActivityItem>> {
        let rows = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT kind, id, label, created_at FROM (
                SELECT 'campaign' AS kind, campaign_id AS id, title AS label, created_at
                FROM campaigns
                UNION ALL
                SELECT 'case', case_id, name, created_at FROM cases
                UNION ALL
                SELECT 'donation', donation_id, amount::TEXT, created_at FROM donations
                UNION ALL
                SELECT 'comment', comment_id, LEFT(content, 80), created_at FROM comments
                UNION ALL
                SELECT 'user', user_id, name, created_at FROM users
            ) AS activity
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ActivityRow::into_item).collect())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct CampaignRow {
    campaign_id: Uuid,
    owner_id: Uuid,
    state: Option<String>,
    category: i16,
    title: String,
    description: String,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    target_amount: i64,
    amount_raised: i64,
    medical_report: Option<String>,
    media: Vec<String>,
    sponsor: Option<String>,
    status: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CampaignRow {
    fn into_campaign(self) -> FundingResult<Campaign> {
        let category = FundraisingCategory::from_id(self.category).ok_or_else(|| {
            FundingError::Internal(format!("Invalid category id: {}", self.category))
        })?;

        let status = CampaignStatus::from_id(self.status).ok_or_else(|| {
            FundingError::Internal(format!("Invalid campaign status id: {}", self.status))
        })?;

        Ok(Campaign {
            campaign_id: CampaignId::from_uuid(self.campaign_id),
            owner_id: UserId::from_uuid(self.owner_id),
            state: self.state,
            category,
            title: self.title,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
            target_amount: Amount::from_db(self.target_amount),
            amount_raised: self.amount_raised,
            medical_report: self.medical_report,
            media: self.media,
            sponsor: self.sponsor,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CaseRow {
    case_id: Uuid,
    owner_id: Uuid,
    name: String,
    description: String,
    amount_donated: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CaseRow {
    fn into_case(self) -> MedicalCase {
        MedicalCase {
            case_id: CaseId::from_uuid(self.case_id),
            owner_id: UserId::from_uuid(self.owner_id),
            name: self.name,
            description: self.description,
            amount_donated: self.amount_donated,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct DonationRow {
    donation_id: Uuid,
    donor_id: Option<Uuid>,
    campaign_id: Option<Uuid>,
    case_id: Option<Uuid>,
    amount: i64,
    subscription_plan: Option<i16>,
    subscription_ref: Option<String>,
    is_verified: bool,
    created_at: DateTime<Utc>,
}

impl DonationRow {
    fn into_donation(self) -> FundingResult<Donation> {
        let target = DonationTarget::from_columns(self.campaign_id, self.case_id)
            .ok_or_else(|| {
                FundingError::Internal(format!(
                    "Donation {} violates the campaign-xor-case constraint",
                    self.donation_id
                ))
            })?;

        Ok(Donation {
            donation_id: DonationId::from_uuid(self.donation_id),
            donor_id: self.donor_id.map(UserId::from_uuid),
            target,
            amount: Amount::from_db(self.amount),
            subscription_plan: self.subscription_plan.and_then(SubscriptionPlan::from_id),
            subscription_ref: self.subscription_ref,
            is_verified: self.is_verified,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct TotalsRow {
    total: i64,
    count: i64,
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    comment_id: Uuid,
    campaign_id: Uuid,
    author_id: Uuid,
    content: String,
    created_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            comment_id: CommentId::from_uuid(self.comment_id),
            campaign_id: CampaignId::from_uuid(self.campaign_id),
            author_id: UserId::from_uuid(self.author_id),
            content: self.content,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RequestRow {
    request_id: Uuid,
    campaign_id: Uuid,
    requester_id: Uuid,
    amount: i64,
    bank_name: String,
    account_name: String,
    account_number: String,
    status: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RequestRow {
    fn into_request(self) -> FundingResult<WithdrawalRequest> {
        let status = RequestStatus::from_id(self.status).ok_or_else(|| {
            FundingError::Internal(format!("Invalid request status id: {}", self.status))
        })?;

        Ok(WithdrawalRequest {
            request_id: WithdrawalRequestId::from_uuid(self.request_id),
            campaign_id: CampaignId::from_uuid(self.campaign_id),
            requester_id: UserId::from_uuid(self.requester_id),
            amount: Amount::from_db(self.amount),
            bank_name: self.bank_name,
            account_name: self.account_name,
            account_number: self.account_number,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ActivityRow {
    kind: String,
    id: Uuid,
    label: Option<String>,
    created_at: DateTime<Utc>,
}

impl ActivityRow {
    fn into_item(self) -> ActivityItem {
        ActivityItem {
            kind: self.kind,
            id: self.id,
            label: self.label,
            created_at: self.created_at,
        }
    }
}
