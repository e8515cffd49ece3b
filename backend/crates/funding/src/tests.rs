//! Use-case tests against in-memory fakes
//!
//! The store fake mirrors the transactional semantics of the Postgres
//! implementation (claim-then-credit is all-or-nothing); the gateway
//! fake is scripted per test.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use auth::models::user_id::UserId;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::application::config::FundingConfig;
use crate::application::{
    CreateCampaignInput, CreateCampaignUseCase, MakeDonationInput, MakeDonationUseCase,
    ModerateCampaignUseCase, ModerationAction, PostCommentUseCase, VerifyDonationUseCase,
    WithdrawalInput, WithdrawalUseCase,
};
use crate::domain::entity::{
    campaign::{Campaign, CampaignSpec},
    comment::Comment,
    donation::Donation,
    medical_case::MedicalCase,
    withdrawal_request::WithdrawalRequest,
};
use crate::domain::gateway::{
    InitializedPayment, PaymentGateway, PaymentStatus, PaymentVerification, SubscriptionHandle,
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
    ids::{CampaignId, CaseId, DonationId, WithdrawalRequestId},
    request_status::RequestStatus,
    subscription_plan::SubscriptionPlan,
};
use crate::error::{FundingError, FundingResult};
use platform::mailer::NoopMailer;

// ============================================================================
// In-memory store fake
// ============================================================================

#[derive(Default)]
struct StoreInner {
    campaigns: HashMap<Uuid, Campaign>,
    cases: HashMap<Uuid, MedicalCase>,
    donations: HashMap<Uuid, Donation>,
    comments: Vec<Comment>,
    requests: HashMap<Uuid, WithdrawalRequest>,
    /// public_id -> user_id
    users: HashMap<String, UserId>,
}

#[derive(Clone, Default)]
struct InMemoryStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl InMemoryStore {
    fn lock(&self) -> std::sync::MutexGuard<'_, StoreInner> {
        self.inner.lock().expect("store mutex poisoned")
    }

    fn register_user(&self, public_id: &str) -> UserId {
        let user_id = UserId::new();
        self.lock().users.insert(public_id.to_string(), user_id);
        user_id
    }

    fn campaign_total(&self, campaign_id: &CampaignId) -> i64 {
        self.lock()
            .campaigns
            .get(campaign_id.as_uuid())
            .map(|c| c.amount_raised)
            .unwrap_or_default()
    }

    fn case_total(&self, case_id: &CaseId) -> i64 {
        self.lock()
            .cases
            .get(case_id.as_uuid())
            .map(|c| c.amount_donated)
            .unwrap_or_default()
    }

    fn donation(&self, donation_id: &DonationId) -> Option<Donation> {
        self.lock().donations.get(donation_id.as_uuid()).cloned()
    }
}

impl CampaignRepository for InMemoryStore {
    async fn insert_campaign(&self, campaign: &Campaign) -> FundingResult<()> {
        self.lock()
            .campaigns
            .insert(campaign.campaign_id.into_uuid(), campaign.clone());
        Ok(())
    }

    async fn campaign_by_id(&self, campaign_id: &CampaignId) -> FundingResult<Option<Campaign>> {
        Ok(self.lock().campaigns.get(campaign_id.as_uuid()).cloned())
    }

    async fn update_campaign(&self, campaign: &Campaign) -> FundingResult<()> {
        self.lock()
            .campaigns
            .insert(campaign.campaign_id.into_uuid(), campaign.clone());
        Ok(())
    }

    async fn delete_campaign(&self, campaign_id: &CampaignId) -> FundingResult<bool> {
        Ok(self.lock().campaigns.remove(campaign_id.as_uuid()).is_some())
    }

    async fn campaigns(&self) -> FundingResult<Vec<Campaign>> {
        Ok(self.lock().campaigns.values().cloned().collect())
    }

    async fn campaigns_by_status(&self, status: CampaignStatus) -> FundingResult<Vec<Campaign>> {
        Ok(self
            .lock()
            .campaigns
            .values()
            .filter(|c| c.status == status)
            .cloned()
            .collect())
    }

    async fn campaigns_by_category(
        &self,
        category: FundraisingCategory,
    ) -> FundingResult<Vec<Campaign>> {
        Ok(self
            .lock()
            .campaigns
            .values()
            .filter(|c| c.category == category)
            .cloned()
            .collect())
    }

    async fn campaigns_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> FundingResult<Vec<Campaign>> {
        Ok(self
            .lock()
            .campaigns
            .values()
            .filter(|c| c.created_at >= start && c.created_at < end)
            .cloned()
            .collect())
    }
}

impl CaseRepository for InMemoryStore {
    async fn insert_case(&self, case: &MedicalCase) -> FundingResult<()> {
        self.lock().cases.insert(case.case_id.into_uuid(), case.clone());
        Ok(())
    }

    async fn case_by_id(&self, case_id: &CaseId) -> FundingResult<Option<MedicalCase>> {
        Ok(self.lock().cases.get(case_id.as_uuid()).cloned())
    }

    async fn update_case(&self, case: &MedicalCase) -> FundingResult<()> {
        self.lock().cases.insert(case.case_id.into_uuid(), case.clone());
        Ok(())
    }

    async fn delete_case(&self, case_id: &CaseId) -> FundingResult<bool> {
        Ok(self.lock().cases.remove(case_id.as_uuid()).is_some())
    }

    async fn cases(&self) -> FundingResult<Vec<MedicalCase>> {
        Ok(self.lock().cases.values().cloned().collect())
    }
}

impl DonationRepository for InMemoryStore {
    async fn insert_donation(&self, donation: &Donation) -> FundingResult<()> {
        self.lock()
            .donations
            .insert(donation.donation_id.into_uuid(), donation.clone());
        Ok(())
    }

    async fn donation_by_id(&self, donation_id: &DonationId) -> FundingResult<Option<Donation>> {
        Ok(self.lock().donations.get(donation_id.as_uuid()).cloned())
    }

    async fn delete_donation(&self, donation_id: &DonationId) -> FundingResult<bool> {
        Ok(self.lock().donations.remove(donation_id.as_uuid()).is_some())
    }

    async fn donations(&self) -> FundingResult<Vec<Donation>> {
        Ok(self.lock().donations.values().cloned().collect())
    }

    async fn donations_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> FundingResult<Vec<Donation>> {
        Ok(self
            .lock()
            .donations
            .values()
            .filter(|d| d.created_at >= start && d.created_at < end)
            .cloned()
            .collect())
    }

    async fn verify_and_credit(&self, donation_id: &DonationId) -> FundingResult<CreditOutcome> {
        let mut inner = self.lock();

        let donation = inner
            .donations
            .get(donation_id.as_uuid())
            .cloned()
            .ok_or(FundingError::DonationNotFound)?;

        if donation.is_verified {
            return Err(FundingError::DonationAlreadyVerified);
        }

        // Check the target before flipping the flag, mirroring the
        // all-or-nothing transaction of the real store
        let new_total = match donation.target {
            DonationTarget::Campaign(campaign_id) => {
                let campaign = inner
                    .campaigns
                    .get_mut(campaign_id.as_uuid())
                    .ok_or(FundingError::CampaignNotFound)?;
                campaign.amount_raised += donation.amount.minor_units();
                campaign.amount_raised
            }
            DonationTarget::Case(case_id) => {
                let case = inner
                    .cases
                    .get_mut(case_id.as_uuid())
                    .ok_or(FundingError::CaseNotFound)?;
                case.amount_donated += donation.amount.minor_units();
                case.amount_donated
            }
        };

        let stored = inner
            .donations
            .get_mut(donation_id.as_uuid())
            .ok_or(FundingError::DonationNotFound)?;
        stored.is_verified = true;
        let donation = stored.clone();

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
        if let Some(donation) = self.lock().donations.get_mut(donation_id.as_uuid()) {
            donation.subscription_ref = Some(subscription_ref.to_string());
        }
        Ok(())
    }

    async fn user_donation_totals(&self, public_id: &str) -> FundingResult<DonationTotals> {
        let inner = self.lock();
        let user_id = *inner
            .users
            .get(public_id)
            .ok_or(FundingError::UserNotFound)?;

        let verified = inner
            .donations
            .values()
            .filter(|d| d.donor_id == Some(user_id) && d.is_verified);

        let mut totals = DonationTotals::default();
        for donation in verified {
            totals.total += donation.amount.minor_units();
            totals.count += 1;
        }
        Ok(totals)
    }

    async fn user_campaign_total(
        &self,
        public_id: &str,
        campaign_id: &CampaignId,
    ) -> FundingResult<i64> {
        let inner = self.lock();
        let user_id = *inner
            .users
            .get(public_id)
            .ok_or(FundingError::UserNotFound)?;

        Ok(inner
            .donations
            .values()
            .filter(|d| {
                d.donor_id == Some(user_id)
                    && d.is_verified
                    && d.target == DonationTarget::Campaign(*campaign_id)
            })
            .map(|d| d.amount.minor_units())
            .sum())
    }

    async fn user_case_total(&self, public_id: &str, case_id: &CaseId) -> FundingResult<i64> {
        let inner = self.lock();
        let user_id = *inner
            .users
            .get(public_id)
            .ok_or(FundingError::UserNotFound)?;

        Ok(inner
            .donations
            .values()
            .filter(|d| {
                d.donor_id == Some(user_id)
                    && d.is_verified
                    && d.target == DonationTarget::Case(*case_id)
            })
            .map(|d| d.amount.minor_units())
            .sum())
    }

    async fn last_donation_for_user(&self, public_id: &str) -> FundingResult<Option<Donation>> {
        let inner = self.lock();
        let user_id = *inner
            .users
            .get(public_id)
            .ok_or(FundingError::UserNotFound)?;

        Ok(inner
            .donations
            .values()
            .filter(|d| d.donor_id == Some(user_id))
            .max_by_key(|d| d.created_at)
            .cloned())
    }
}

impl CommentRepository for InMemoryStore {
    async fn insert_comment(&self, comment: &Comment) -> FundingResult<()> {
        self.lock().comments.push(comment.clone());
        Ok(())
    }

    async fn comments(&self) -> FundingResult<Vec<Comment>> {
        Ok(self.lock().comments.clone())
    }
}

impl WithdrawalRequestRepository for InMemoryStore {
    async fn insert_request(&self, request: &WithdrawalRequest) -> FundingResult<()> {
        self.lock()
            .requests
            .insert(request.request_id.into_uuid(), request.clone());
        Ok(())
    }

    async fn request_by_id(
        &self,
        request_id: &WithdrawalRequestId,
    ) -> FundingResult<Option<WithdrawalRequest>> {
        Ok(self.lock().requests.get(request_id.as_uuid()).cloned())
    }

    async fn update_request(&self, request: &WithdrawalRequest) -> FundingResult<()> {
        self.lock()
            .requests
            .insert(request.request_id.into_uuid(), request.clone());
        Ok(())
    }

    async fn requests(&self) -> FundingResult<Vec<WithdrawalRequest>> {
        Ok(self.lock().requests.values().cloned().collect())
    }
}

impl ActivityRepository for InMemoryStore {
    async fn recent_activity(&self, limit: i64) -> FundingResult<Vec<ActivityItem>> {
        let inner = self.lock();
        let mut items: Vec<ActivityItem> = inner
            .campaigns
            .values()
            .map(|c| ActivityItem {
                kind: "campaign".to_string(),
                id: c.campaign_id.into_uuid(),
                label: Some(c.title.clone()),
                created_at: c.created_at,
            })
            .chain(inner.donations.values().map(|d| ActivityItem {
                kind: "donation".to_string(),
                id: d.donation_id.into_uuid(),
                label: Some(d.amount.to_string()),
                created_at: d.created_at,
            }))
            .collect();

        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items.truncate(limit as usize);
        Ok(items)
    }
}

impl UserDirectory for InMemoryStore {
    async fn user_id_by_public_id(&self, public_id: &str) -> FundingResult<Option<UserId>> {
        Ok(self.lock().users.get(public_id).copied())
    }
}

// ============================================================================
// Scripted gateway fake
// ============================================================================

#[derive(Clone)]
struct ScriptedGateway {
    verify_status: Arc<Mutex<PaymentStatus>>,
    /// reference -> amount recorded at initialize time
    initialized: Arc<Mutex<HashMap<String, i64>>>,
    subscription_calls: Arc<Mutex<u32>>,
}

impl Default for ScriptedGateway {
    fn default() -> Self {
        Self {
            verify_status: Arc::new(Mutex::new(PaymentStatus::Success)),
            initialized: Arc::new(Mutex::new(HashMap::new())),
            subscription_calls: Arc::new(Mutex::new(0)),
        }
    }
}

impl ScriptedGateway {
    fn set_verify_status(&self, status: PaymentStatus) {
        *self.verify_status.lock().expect("gateway mutex") = status;
    }

    fn subscription_call_count(&self) -> u32 {
        *self.subscription_calls.lock().expect("gateway mutex")
    }
}

impl PaymentGateway for ScriptedGateway {
    async fn initialize(
        &self,
        amount: Amount,
        _email: &str,
        reference: &DonationId,
    ) -> FundingResult<InitializedPayment> {
        self.initialized
            .lock()
            .expect("gateway mutex")
            .insert(reference.to_string(), amount.minor_units());

        Ok(InitializedPayment {
            authorization_url: format!("https://checkout.test/{}", reference),
            access_code: None,
            reference: reference.to_string(),
        })
    }

    async fn verify(&self, reference: &DonationId) -> FundingResult<PaymentVerification> {
        let amount = self
            .initialized
            .lock()
            .expect("gateway mutex")
            .get(&reference.to_string())
            .copied()
            .unwrap_or_default();

        Ok(PaymentVerification {
            status: *self.verify_status.lock().expect("gateway mutex"),
            amount,
            paid_at: Some(Utc::now()),
            channel: Some("card".to_string()),
        })
    }

    async fn create_subscription(
        &self,
        _amount: Amount,
        _email: &str,
        _reference: &DonationId,
        _plan: SubscriptionPlan,
    ) -> FundingResult<SubscriptionHandle> {
        *self.subscription_calls.lock().expect("gateway mutex") += 1;
        Ok(SubscriptionHandle {
            id: "4242".to_string(),
            subscription_code: Some("SUB_test".to_string()),
        })
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn open_campaign(owner_id: UserId) -> Campaign {
    let mut campaign = Campaign::new(
        owner_id,
        CampaignSpec {
            state: Some("Lagos".to_string()),
            category: FundraisingCategory::Surgery,
            title: "Surgery for Bola".to_string(),
            description: "Help fund a corrective surgery".to_string(),
            start_date: None,
            end_date: None,
            target_amount: Amount::from_minor_units(1_000_000).unwrap(),
            medical_report: None,
            media: vec![],
            sponsor: None,
            save_as_draft: false,
        },
    );
    campaign.moderate(true);
    campaign
}

async fn seeded(
) -> (InMemoryStore, ScriptedGateway, Campaign, UserId) {
    let store = InMemoryStore::default();
    let gateway = ScriptedGateway::default();

    let donor_id = store.register_user("donor-public-id-00001");
    let campaign = open_campaign(UserId::new());
    store.insert_campaign(&campaign).await.unwrap();

    (store, gateway, campaign, donor_id)
}

fn donation_input(
    campaign: &Campaign,
    donor_id: Option<UserId>,
    amount: i64,
) -> MakeDonationInput {
    MakeDonationInput {
        donor_id,
        target: DonationTarget::Campaign(campaign.campaign_id),
        amount,
        email: "donor@example.com".to_string(),
        subscription_plan: None,
    }
}

// ============================================================================
// Donation initialization
// ============================================================================

#[tokio::test]
async fn make_donation_initializes_without_crediting() {
    let (store, gateway, campaign, donor_id) = seeded().await;

    let use_case = MakeDonationUseCase::new(Arc::new(store.clone()), Arc::new(gateway));
    let output = use_case
        .execute(donation_input(&campaign, Some(donor_id), 25_000))
        .await
        .unwrap();

    assert!(output.authorization_url.contains(&output.reference));
    assert_eq!(output.amount_raised, 0);
    assert_eq!(output.amount_remaining, Some(1_000_000));

    let stored = store.donation(&output.donation.donation_id).unwrap();
    assert!(!stored.is_verified);

    // Nothing credited until verification
    assert_eq!(store.campaign_total(&campaign.campaign_id), 0);
}

#[tokio::test]
async fn donation_to_closed_campaign_is_rejected() {
    let (store, gateway, mut campaign, donor_id) = seeded().await;
    campaign.close();
    store.update_campaign(&campaign).await.unwrap();

    let use_case = MakeDonationUseCase::new(Arc::new(store.clone()), Arc::new(gateway));
    let result = use_case
        .execute(donation_input(&campaign, Some(donor_id), 25_000))
        .await;

    assert!(matches!(result, Err(FundingError::CampaignClosed)));
    assert!(store.lock().donations.is_empty());
}

#[tokio::test]
async fn visitor_donation_carries_no_donor() {
    let (store, gateway, campaign, _donor_id) = seeded().await;

    let use_case = MakeDonationUseCase::new(Arc::new(store.clone()), Arc::new(gateway));
    let output = use_case
        .execute(donation_input(&campaign, None, 5_000))
        .await
        .unwrap();

    assert!(output.donation.donor_id.is_none());
}

#[tokio::test]
async fn recurring_donation_creates_subscription_and_defers_credit() {
    let (store, gateway, campaign, donor_id) = seeded().await;

    let use_case = MakeDonationUseCase::new(Arc::new(store.clone()), Arc::new(gateway.clone()));
    let mut input = donation_input(&campaign, Some(donor_id), 10_000);
    input.subscription_plan = Some(SubscriptionPlan::Monthly);

    let output = use_case.execute(input).await.unwrap();

    assert_eq!(gateway.subscription_call_count(), 1);
    let stored = store.donation(&output.donation.donation_id).unwrap();
    assert_eq!(stored.subscription_ref.as_deref(), Some("4242"));

    // The original credited recurring donations immediately; here the
    // ledger stays untouched until verification
    assert_eq!(store.campaign_total(&campaign.campaign_id), 0);
}

// ============================================================================
// Verification and the ledger invariant
// ============================================================================

#[tokio::test]
async fn verifying_twice_credits_exactly_once() {
    let (store, gateway, campaign, donor_id) = seeded().await;

    let make = MakeDonationUseCase::new(Arc::new(store.clone()), Arc::new(gateway.clone()));
    let output = make
        .execute(donation_input(&campaign, Some(donor_id), 25_000))
        .await
        .unwrap();

    let verify = VerifyDonationUseCase::new(Arc::new(store.clone()), Arc::new(gateway));

    let first = verify.execute(&output.reference).await.unwrap();
    assert_eq!(first.new_total, 25_000);
    assert!(first.donation.is_verified);
    assert_eq!(store.campaign_total(&campaign.campaign_id), 25_000);

    // Replay: rejected, and the total is unchanged
    let second = verify.execute(&output.reference).await;
    assert!(matches!(second, Err(FundingError::DonationAlreadyVerified)));
    assert_eq!(store.campaign_total(&campaign.campaign_id), 25_000);
}

#[tokio::test]
async fn failed_gateway_verification_leaves_ledger_untouched() {
    let (store, gateway, campaign, donor_id) = seeded().await;

    let make = MakeDonationUseCase::new(Arc::new(store.clone()), Arc::new(gateway.clone()));
    let output = make
        .execute(donation_input(&campaign, Some(donor_id), 25_000))
        .await
        .unwrap();

    gateway.set_verify_status(PaymentStatus::Failed);

    let verify = VerifyDonationUseCase::new(Arc::new(store.clone()), Arc::new(gateway.clone()));
    let result = verify.execute(&output.reference).await;

    assert!(matches!(result, Err(FundingError::PaymentNotSuccessful)));
    assert!(!store.donation(&output.donation.donation_id).unwrap().is_verified);
    assert_eq!(store.campaign_total(&campaign.campaign_id), 0);

    // The same reference can still be verified once the payment goes through
    gateway.set_verify_status(PaymentStatus::Success);
    let outcome = verify.execute(&output.reference).await.unwrap();
    assert_eq!(outcome.new_total, 25_000);
}

#[tokio::test]
async fn unknown_reference_is_not_found() {
    let (store, gateway, _campaign, _donor_id) = seeded().await;

    let verify = VerifyDonationUseCase::new(Arc::new(store), Arc::new(gateway));
    let result = verify.execute(&Uuid::new_v4().to_string()).await;

    assert!(matches!(result, Err(FundingError::DonationNotFound)));
}

#[tokio::test]
async fn garbled_reference_is_a_bad_request() {
    let (store, gateway, _campaign, _donor_id) = seeded().await;

    let verify = VerifyDonationUseCase::new(Arc::new(store), Arc::new(gateway));
    let result = verify.execute("definitely-not-a-reference").await;

    assert!(matches!(result, Err(FundingError::Validation(_))));
}

#[tokio::test]
async fn case_donations_credit_the_case() {
    let store = InMemoryStore::default();
    let gateway = ScriptedGateway::default();
    let donor_id = store.register_user("donor-public-id-00002");

    let case = MedicalCase::new(
        UserId::new(),
        "Kidney transplant".to_string(),
        "Urgent transplant case".to_string(),
    );
    store.insert_case(&case).await.unwrap();

    let make = MakeDonationUseCase::new(Arc::new(store.clone()), Arc::new(gateway.clone()));
    let output = make
        .execute(MakeDonationInput {
            donor_id: Some(donor_id),
            target: DonationTarget::Case(case.case_id),
            amount: 40_000,
            email: "donor@example.com".to_string(),
            subscription_plan: None,
        })
        .await
        .unwrap();

    // Case responses carry no remaining-amount notion
    assert_eq!(output.amount_remaining, None);

    let verify = VerifyDonationUseCase::new(Arc::new(store.clone()), Arc::new(gateway));
    let outcome = verify.execute(&output.reference).await.unwrap();

    assert_eq!(outcome.new_total, 40_000);
    assert_eq!(store.case_total(&case.case_id), 40_000);
}

#[tokio::test]
async fn user_totals_count_only_verified_donations() {
    let (store, gateway, campaign, donor_id) = seeded().await;

    let make = MakeDonationUseCase::new(Arc::new(store.clone()), Arc::new(gateway.clone()));
    let verified = make
        .execute(donation_input(&campaign, Some(donor_id), 25_000))
        .await
        .unwrap();
    let _unverified = make
        .execute(donation_input(&campaign, Some(donor_id), 99_000))
        .await
        .unwrap();

    let verify = VerifyDonationUseCase::new(Arc::new(store.clone()), Arc::new(gateway));
    verify.execute(&verified.reference).await.unwrap();

    let totals = store
        .user_donation_totals("donor-public-id-00001")
        .await
        .unwrap();
    assert_eq!(totals.total, 25_000);
    assert_eq!(totals.count, 1);

    let campaign_total = store
        .user_campaign_total("donor-public-id-00001", &campaign.campaign_id)
        .await
        .unwrap();
    assert_eq!(campaign_total, 25_000);
}

// ============================================================================
// Campaign lifecycle
// ============================================================================

#[tokio::test]
async fn campaign_creation_validates_input() {
    let store = InMemoryStore::default();
    let use_case = CreateCampaignUseCase::new(Arc::new(store));

    let result = use_case
        .execute(
            UserId::new(),
            CreateCampaignInput {
                state: None,
                category: "Knitting".to_string(),
                title: "Title".to_string(),
                description: "Description".to_string(),
                start_date: None,
                end_date: None,
                target_amount: 10_000,
                medical_report: None,
                media: vec![],
                sponsor: None,
                save_as_draft: false,
            },
        )
        .await;

    assert!(matches!(result, Err(FundingError::Validation(_))));
}

#[tokio::test]
async fn moderation_is_one_shot() {
    let store = InMemoryStore::default();
    let campaign = Campaign::new(
        UserId::new(),
        CampaignSpec {
            state: None,
            category: FundraisingCategory::Cancer,
            title: "Chemo fund".to_string(),
            description: "Covering chemotherapy".to_string(),
            start_date: None,
            end_date: None,
            target_amount: Amount::from_minor_units(2_000_000).unwrap(),
            medical_report: None,
            media: vec![],
            sponsor: None,
            save_as_draft: false,
        },
    );
    store.insert_campaign(&campaign).await.unwrap();

    let use_case = ModerateCampaignUseCase::new(Arc::new(store.clone()));

    let approved = use_case
        .moderate(&campaign.campaign_id, ModerationAction::Approve)
        .await
        .unwrap();
    assert_eq!(approved.status, CampaignStatus::Approved);

    let again = use_case
        .moderate(&campaign.campaign_id, ModerationAction::Decline)
        .await;
    assert!(matches!(again, Err(FundingError::CampaignNotModeratable)));
}

#[tokio::test]
async fn draft_publishing_is_owner_only() {
    let store = InMemoryStore::default();
    let owner_id = UserId::new();
    let campaign = Campaign::new(
        owner_id,
        CampaignSpec {
            state: None,
            category: FundraisingCategory::Others,
            title: "Draft".to_string(),
            description: "Draft campaign".to_string(),
            start_date: None,
            end_date: None,
            target_amount: Amount::from_minor_units(500_000).unwrap(),
            medical_report: None,
            media: vec![],
            sponsor: None,
            save_as_draft: true,
        },
    );
    store.insert_campaign(&campaign).await.unwrap();

    let use_case = ModerateCampaignUseCase::new(Arc::new(store.clone()));

    let stranger = use_case
        .publish_draft(&campaign.campaign_id, &UserId::new(), false)
        .await;
    assert!(matches!(stranger, Err(FundingError::NotOwner)));

    let published = use_case
        .publish_draft(&campaign.campaign_id, &owner_id, false)
        .await
        .unwrap();
    assert_eq!(published.status, CampaignStatus::Pending);

    // Not a draft anymore
    let republish = use_case
        .publish_draft(&campaign.campaign_id, &owner_id, false)
        .await;
    assert!(matches!(republish, Err(FundingError::CampaignNotDraft)));
}

// ============================================================================
// Comments
// ============================================================================

#[tokio::test]
async fn comments_require_an_existing_campaign() {
    let (store, _gateway, campaign, donor_id) = seeded().await;

    let use_case = PostCommentUseCase::new(Arc::new(store.clone()));

    let missing = use_case
        .execute(&CampaignId::new(), donor_id, "hello".to_string())
        .await;
    assert!(matches!(missing, Err(FundingError::CampaignNotFound)));

    let empty = use_case
        .execute(&campaign.campaign_id, donor_id, "   ".to_string())
        .await;
    assert!(matches!(empty, Err(FundingError::Validation(_))));

    let comment = use_case
        .execute(&campaign.campaign_id, donor_id, "Get well soon!".to_string())
        .await
        .unwrap();
    assert_eq!(comment.content, "Get well soon!");
    assert_eq!(store.comments().await.unwrap().len(), 1);
}

// ============================================================================
// Withdrawal requests
// ============================================================================

#[tokio::test]
async fn withdrawal_request_lifecycle() {
    let (store, _gateway, campaign, donor_id) = seeded().await;

    let use_case = WithdrawalUseCase::new(
        Arc::new(store.clone()),
        Arc::new(NoopMailer),
        Arc::new(FundingConfig {
            admin_email: Some("admin@fundlift.example".to_string()),
            ..FundingConfig::default()
        }),
    );

    let request = use_case
        .create(
            donor_id,
            &campaign.campaign_id,
            WithdrawalInput {
                amount: 200_000,
                bank_name: "First Bank".to_string(),
                account_name: "Bola A".to_string(),
                account_number: "0123456789".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(request.status, RequestStatus::Pending);

    // Bad status string
    let invalid = use_case.resolve(&request.request_id, "maybe").await;
    assert!(matches!(invalid, Err(FundingError::Validation(_))));

    // "pending" is not a decision
    let pending = use_case.resolve(&request.request_id, "pending").await;
    assert!(matches!(pending, Err(FundingError::Validation(_))));

    let approved = use_case
        .resolve(&request.request_id, "approved")
        .await
        .unwrap();
    assert_eq!(approved.status, RequestStatus::Approved);

    // One-shot decision
    let again = use_case.resolve(&request.request_id, "rejected").await;
    assert!(matches!(again, Err(FundingError::RequestAlreadyResolved)));
}

#[tokio::test]
async fn withdrawal_requires_existing_campaign_and_bank_details() {
    let (store, _gateway, campaign, donor_id) = seeded().await;

    let use_case = WithdrawalUseCase::new(
        Arc::new(store),
        Arc::new(NoopMailer),
        Arc::new(FundingConfig::default()),
    );

    let missing = use_case
        .create(
            donor_id,
            &CampaignId::new(),
            WithdrawalInput {
                amount: 1_000,
                bank_name: "Bank".to_string(),
                account_name: "Name".to_string(),
                account_number: "123".to_string(),
            },
        )
        .await;
    assert!(matches!(missing, Err(FundingError::CampaignNotFound)));

    let blank_bank = use_case
        .create(
            donor_id,
            &campaign.campaign_id,
            WithdrawalInput {
                amount: 1_000,
                bank_name: "  ".to_string(),
                account_name: "Name".to_string(),
                account_number: "123".to_string(),
            },
        )
        .await;
    assert!(matches!(blank_bank, Err(FundingError::Validation(_))));
}
