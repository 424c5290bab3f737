use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::campaign::{Campaign, CampaignId, CampaignStatus, CampaignType};
use crate::offer::{Offer, OfferCategory, OfferId};
use crate::ticket::{SupportTier, Ticket, TicketId, TicketPriority, TicketStatus};

pub const OFFER_COUNT: u32 = 48;

/// The initial contents of every store.
#[derive(Clone, Debug, Default)]
pub struct Seed {
    pub tickets: Vec<Ticket>,
    pub campaigns: Vec<Campaign>,
    pub offers: Vec<Offer>,
}

pub fn seed(rng_seed: u64) -> Seed {
    let now = Utc::now();

    Seed {
        tickets: tickets(),
        campaigns: campaigns(now),
        offers: offers(&mut StdRng::seed_from_u64(rng_seed), now),
    }
}

fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn tickets() -> Vec<Ticket> {
    vec![
        Ticket {
            id: TicketId::new(3829),
            customer_id: "cust001".to_string(),
            token_id: Some("tok001".to_string()),
            subject: "Unable to redeem ExtraBucks".to_string(),
            description: "Customer reports ExtraBucks reward is showing in their account but cannot be redeemed at checkout.".to_string(),
            status: TicketStatus::Open,
            priority: TicketPriority::High,
            tier: SupportTier::Tier1,
            created_at: utc(2023, 7, 15, 10, 30),
            modified_at: utc(2023, 7, 15, 10, 30),
            assigned_to: None,
            notes: vec![
                "Initial contact: Customer called about difficulty redeeming their ExtraBucks reward.".to_string(),
                "Verified account details and confirmed reward is active in system.".to_string(),
            ],
            resolution_summary: None,
        },
        Ticket {
            id: TicketId::new(3828),
            customer_id: "cust002".to_string(),
            token_id: Some("tok003".to_string()),
            subject: "Coupon showing expired but should not be".to_string(),
            description: "Customer indicates that 30% Off Contact Lenses coupon is showing as expired in app, but expiration date should be next week.".to_string(),
            status: TicketStatus::Escalated,
            priority: TicketPriority::Medium,
            tier: SupportTier::Tier2,
            created_at: utc(2023, 7, 14, 15, 45),
            modified_at: utc(2023, 7, 15, 9, 20),
            assigned_to: Some("Sarah Johnson".to_string()),
            notes: vec![
                "Initial review: Confirmed coupon should be valid until 2023-06-15.".to_string(),
                "Attempted to refresh token status in system without success.".to_string(),
                "Escalated to Tier 2 for technical review of token records.".to_string(),
            ],
            resolution_summary: None,
        },
        Ticket {
            id: TicketId::new(3825),
            customer_id: "cust004".to_string(),
            token_id: None,
            subject: "Missing tokens after app update".to_string(),
            description: "Customer updated app and now cannot see previously claimed tokens.".to_string(),
            status: TicketStatus::InProgress,
            priority: TicketPriority::Medium,
            tier: SupportTier::Tier1,
            created_at: utc(2023, 7, 13, 11, 15),
            modified_at: utc(2023, 7, 14, 13, 40),
            assigned_to: Some("Alex Chen".to_string()),
            notes: vec![
                "Initial troubleshooting performed, advised customer to clear app cache.".to_string(),
                "Customer reports issue persists after clearing cache.".to_string(),
                "Looking at token database to verify status.".to_string(),
            ],
            resolution_summary: None,
        },
    ]
}

struct CampaignFixture {
    name: &'static str,
    campaign_type: CampaignType,
    description: Option<&'static str>,
    start_days: i64,
    end_days: i64,
    active: bool,
    auto_activate: bool,
}

const CAMPAIGNS: &[CampaignFixture] = &[
    CampaignFixture {
        name: "Summer Savings",
        campaign_type: CampaignType::Seasonal,
        description: Some("Bonus points on seasonal essentials"),
        start_days: -10,
        end_days: 50,
        active: true,
        auto_activate: false,
    },
    CampaignFixture {
        name: "Back to School",
        campaign_type: CampaignType::Promotional,
        description: Some("Double rewards on school supplies"),
        start_days: 20,
        end_days: 45,
        active: false,
        auto_activate: true,
    },
    CampaignFixture {
        name: "Loyal Shopper Boost",
        campaign_type: CampaignType::Targeted,
        description: None,
        start_days: -30,
        end_days: 30,
        active: false,
        auto_activate: false,
    },
    CampaignFixture {
        name: "Spring Wellness",
        campaign_type: CampaignType::Seasonal,
        description: Some("Vitamins and wellness offers"),
        start_days: -120,
        end_days: -60,
        active: true,
        auto_activate: false,
    },
    CampaignFixture {
        name: "Holiday Preview",
        campaign_type: CampaignType::Promotional,
        description: None,
        start_days: 90,
        end_days: 120,
        active: false,
        auto_activate: false,
    },
];

fn campaigns(now: DateTime<Utc>) -> Vec<Campaign> {
    CAMPAIGNS
        .iter()
        .zip(1..)
        .map(|(fixture, number)| {
            let created_at = now - Duration::days(150) + Duration::days(number as i64 * 7);
            let mut campaign = Campaign {
                id: CampaignId::new(number),
                partner_id: "partner-cvs".to_string(),
                partner_name: "CVS Pharmacy".to_string(),
                program_id: "program-extracare".to_string(),
                program_name: "ExtraCare Rewards".to_string(),
                name: fixture.name.to_string(),
                campaign_type: fixture.campaign_type,
                description: fixture.description.map(str::to_string),
                start_date: now + Duration::days(fixture.start_days),
                end_date: now + Duration::days(fixture.end_days),
                active: fixture.active,
                auto_activate: fixture.auto_activate,
                auto_deactivate: true,
                has_products: number % 2 == 1,
                status: CampaignStatus::Draft,
                created_at,
                created_by: "admin".to_string(),
                modified_at: created_at,
                modified_by: None,
            };
            campaign.refresh_status(now);
            campaign
        })
        .collect()
}

const MERCHANTS: &[(&str, OfferCategory, &[&str])] = &[
    ("Bean There Cafe", OfferCategory::Dining, &["Free pastry with coffee", "10% off lunch"]),
    ("Noodle House", OfferCategory::Dining, &["Free appetizer", "$5 off dinner"]),
    ("Urban Outfitters", OfferCategory::Retail, &["15% off apparel", "Free shipping"]),
    ("Gadget Hub", OfferCategory::Retail, &["$20 off headphones", "Extended warranty"]),
    ("SkyHigh Airlines", OfferCategory::Travel, &["Bonus miles", "Free seat upgrade"]),
    ("Harbor Hotels", OfferCategory::Travel, &["Third night free", "Late checkout"]),
    ("Cinema City", OfferCategory::Entertainment, &["Buy one get one ticket", "Free popcorn"]),
    ("FitLife Gym", OfferCategory::Health, &["First month free", "Free personal session"]),
    ("Sparkle Cleaners", OfferCategory::Services, &["20% off dry cleaning", "Free pickup"]),
];

fn offers(rng: &mut StdRng, now: DateTime<Utc>) -> Vec<Offer> {
    (1..=OFFER_COUNT)
        .filter_map(|number| {
            let (merchant, category, names) = MERCHANTS.choose(rng)?;
            let name = names.choose(rng)?;
            let rating = (rng.gen_range(30..=50) as f32) / 10.0;

            Some(Offer {
                id: OfferId::new(number),
                merchant: merchant.to_string(),
                name: name.to_string(),
                category: *category,
                value: rng.gen_range(1..=100) * 100,
                rating,
                end_date: now + Duration::days(rng.gen_range(1..=90)),
            })
        })
        .collect()
}
