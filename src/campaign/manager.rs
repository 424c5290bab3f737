use chrono::{DateTime, Utc};
use tracing::info;

use crate::action::{ActionMessage, Outcome};
use crate::database::Database;
use crate::error::Error;
use crate::store::RecordStore;
use crate::view::highlight::{annotate, Highlighted};
use crate::view::page::{paginate, Page};
use crate::view::{derive, Criteria};

use super::{
    Campaign, CampaignFilters, CampaignId, CampaignPatch, CampaignSort, CampaignStats,
    CampaignStatus, CampaignType,
};

#[derive(Clone, Debug)]
pub struct NewCampaign {
    pub partner_id: String,
    pub partner_name: String,
    pub program_id: String,
    pub program_name: String,
    pub name: String,
    pub campaign_type: CampaignType,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub active: bool,
    pub auto_activate: bool,
    pub auto_deactivate: bool,
    pub has_products: bool,
    pub created_by: String,
}

fn validate_name(name: &str) -> Result<(), Error> {
    if name.trim().is_empty() {
        return Err(Error::MissingText { field: "name" });
    }

    Ok(())
}

fn validate_dates(start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> Result<(), Error> {
    if end_date < start_date {
        return Err(Error::InvalidDateRange {
            start_date,
            end_date,
        });
    }

    Ok(())
}

/// Names are unique per program, ignoring case and surrounding whitespace.
fn ensure_name_available(
    store: &RecordStore<Campaign>,
    program_id: &str,
    name: &str,
    exclude: Option<CampaignId>,
) -> Result<(), Error> {
    let name = name.trim();
    let taken = store.get_all().iter().any(|campaign| {
        Some(campaign.id) != exclude
            && campaign.program_id == program_id
            && campaign.name.trim().eq_ignore_ascii_case(name)
    });

    if taken {
        return Err(Error::CampaignNameTaken {
            program_id: program_id.to_string(),
            name: name.to_string(),
        });
    }

    Ok(())
}

fn snapshot(store: &RecordStore<Campaign>, now: DateTime<Utc>) -> Vec<Campaign> {
    store
        .get_all()
        .iter()
        .cloned()
        .map(|mut campaign| {
            campaign.refresh_status(now);
            campaign
        })
        .collect()
}

#[tracing::instrument(skip(db))]
pub async fn list_campaigns(
    db: &Database,
    criteria: &Criteria<CampaignFilters>,
    sort: CampaignSort,
    page: Option<usize>,
    limit: Option<usize>,
) -> Result<Page<Highlighted<Campaign>>, Error> {
    let campaigns = {
        let store = db.campaigns().read().await;
        let campaigns = snapshot(&store, Utc::now());
        derive(&campaigns, criteria, |a, b| sort.compare(a, b))
    };
    let current = db.campaign_highlight().current().await;

    Ok(paginate(annotate(campaigns, current), page, limit))
}

#[tracing::instrument(skip(db))]
pub async fn campaign_stats(db: &Database) -> Result<CampaignStats, Error> {
    let store = db.campaigns().read().await;
    let now = Utc::now();

    Ok(CampaignStats::tally(
        store.get_all().iter().map(|campaign| campaign.status_at(now)),
    ))
}

#[tracing::instrument(skip(db))]
pub async fn get_campaign(db: &Database, campaign_id: CampaignId) -> Result<Campaign, Error> {
    let store = db.campaigns().read().await;
    let mut campaign = store.expect(campaign_id)?.clone();
    campaign.refresh_status(Utc::now());

    Ok(campaign)
}

#[tracing::instrument(skip(db))]
pub async fn create_campaign(db: &Database, new: NewCampaign) -> Result<Outcome<Campaign>, Error> {
    validate_name(&new.name)?;
    validate_dates(new.start_date, new.end_date)?;

    let now = Utc::now();
    let campaign = {
        let mut store = db.campaigns().write().await;
        ensure_name_available(&store, &new.program_id, &new.name, None)?;

        let mut campaign = Campaign {
            id: store.next_id(),
            partner_id: new.partner_id,
            partner_name: new.partner_name,
            program_id: new.program_id,
            program_name: new.program_name,
            name: new.name.trim().to_string(),
            campaign_type: new.campaign_type,
            description: new.description,
            start_date: new.start_date,
            end_date: new.end_date,
            active: new.active,
            auto_activate: new.auto_activate,
            auto_deactivate: new.auto_deactivate,
            has_products: new.has_products,
            status: CampaignStatus::Draft,
            created_at: now,
            created_by: new.created_by,
            modified_at: now,
            modified_by: None,
        };
        campaign.refresh_status(now);
        store.append(campaign.clone())?;
        campaign
    };

    db.campaign_highlight().mark(campaign.id).await;
    info!("created campaign {} as {:?}", campaign.id, campaign.status);

    Ok(Outcome {
        message: ActionMessage::success("Campaign created successfully"),
        record: campaign,
    })
}

#[tracing::instrument(skip(db))]
pub async fn update_campaign(
    db: &Database,
    campaign_id: CampaignId,
    mut patch: CampaignPatch,
) -> Result<Outcome<Campaign>, Error> {
    if let Some(name) = &patch.name {
        validate_name(name)?;
        patch.name = Some(name.trim().to_string());
    }

    patch.modified_at = Some(Utc::now());
    let campaign = {
        let mut store = db.campaigns().write().await;
        let current = store.expect(campaign_id)?;
        let start_date = patch.start_date.unwrap_or(current.start_date);
        let end_date = patch.end_date.unwrap_or(current.end_date);
        let program_id = current.program_id.clone();
        validate_dates(start_date, end_date)?;
        if let Some(name) = &patch.name {
            ensure_name_available(&store, &program_id, name, Some(campaign_id))?;
        }

        store.update(campaign_id, patch)?
    };

    info!("updated campaign {}", campaign.id);

    Ok(Outcome {
        message: ActionMessage::success("Campaign updated successfully"),
        record: campaign,
    })
}

#[tracing::instrument(skip(db))]
pub async fn set_campaign_active(
    db: &Database,
    campaign_id: CampaignId,
    active: bool,
) -> Result<Outcome<Campaign>, Error> {
    let patch = CampaignPatch {
        active: Some(active),
        modified_at: Some(Utc::now()),
        ..Default::default()
    };
    let campaign = db.campaigns().write().await.update(campaign_id, patch)?;

    info!(
        "set campaign {} active={} ({:?})",
        campaign.id, active, campaign.status
    );

    let text = if active {
        "Campaign activated"
    } else {
        "Campaign deactivated"
    };

    Ok(Outcome {
        message: ActionMessage::info(text),
        record: campaign,
    })
}

#[tracing::instrument(skip(db))]
pub async fn duplicate_campaign(
    db: &Database,
    campaign_id: CampaignId,
) -> Result<Outcome<Campaign>, Error> {
    let now = Utc::now();
    let campaign = {
        let mut store = db.campaigns().write().await;
        let source = store.expect(campaign_id)?.clone();
        let name = format!("{} (Copy)", source.name);
        ensure_name_available(&store, &source.program_id, &name, None)?;

        let mut campaign = Campaign {
            id: store.next_id(),
            name,
            active: false,
            created_at: now,
            modified_at: now,
            modified_by: None,
            ..source
        };
        campaign.refresh_status(now);
        store.append(campaign.clone())?;
        campaign
    };

    db.campaign_highlight().mark(campaign.id).await;
    info!("duplicated campaign {} as {}", campaign_id, campaign.id);

    Ok(Outcome {
        message: ActionMessage::success(format!("Campaign duplicated as \"{}\"", campaign.name)),
        record: campaign,
    })
}
