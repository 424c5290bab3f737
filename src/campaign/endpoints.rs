use actix_web::web::{Data, Json, Path, Query};
use actix_web::{get, patch, post};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::action::{ActionMessage, Outcome};
use crate::database::Database;
use crate::error::Error;
use crate::view::highlight::Highlighted;
use crate::view::page::Page;

use super::manager::{self, NewCampaign};
use super::{Campaign, CampaignId, CampaignPatch, CampaignQuery, CampaignStats, CampaignStatus, CampaignType};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateCampaignBody {
    pub partner_id: String,
    pub partner_name: String,
    pub program_id: String,
    pub program_name: String,
    pub name: String,
    pub campaign_type: CampaignType,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub auto_activate: bool,
    #[serde(default)]
    pub auto_deactivate: bool,
    #[serde(default)]
    pub has_products: bool,
    pub created_by: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateCampaignBody {
    pub name: Option<String>,
    pub campaign_type: Option<CampaignType>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub active: Option<bool>,
    pub auto_activate: Option<bool>,
    pub auto_deactivate: Option<bool>,
    pub has_products: Option<bool>,
    pub modified_by: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SetActiveBody {
    pub active: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CampaignBody {
    pub id: CampaignId,
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
    pub status: CampaignStatus,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub modified_at: DateTime<Utc>,
    pub modified_by: Option<String>,
}

impl CampaignBody {
    pub fn render(campaign: Campaign) -> CampaignBody {
        CampaignBody {
            id: campaign.id,
            partner_id: campaign.partner_id,
            partner_name: campaign.partner_name,
            program_id: campaign.program_id,
            program_name: campaign.program_name,
            name: campaign.name,
            campaign_type: campaign.campaign_type,
            description: campaign.description,
            start_date: campaign.start_date,
            end_date: campaign.end_date,
            active: campaign.active,
            auto_activate: campaign.auto_activate,
            auto_deactivate: campaign.auto_deactivate,
            has_products: campaign.has_products,
            status: campaign.status,
            created_at: campaign.created_at,
            created_by: campaign.created_by,
            modified_at: campaign.modified_at,
            modified_by: campaign.modified_by,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CampaignListItemBody {
    #[serde(flatten)]
    pub campaign: CampaignBody,
    pub highlighted: bool,
}

impl CampaignListItemBody {
    pub fn render(item: Highlighted<Campaign>) -> CampaignListItemBody {
        CampaignListItemBody {
            campaign: CampaignBody::render(item.record),
            highlighted: item.highlighted,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CampaignActionBody {
    pub campaign: CampaignBody,
    pub message: ActionMessage,
}

impl CampaignActionBody {
    pub fn render(outcome: Outcome<Campaign>) -> CampaignActionBody {
        CampaignActionBody {
            campaign: CampaignBody::render(outcome.record),
            message: outcome.message,
        }
    }
}

#[get("/campaigns")]
#[tracing::instrument(skip(db))]
pub async fn get_campaigns(
    db: Data<Database>,
    query: Query<CampaignQuery>,
) -> Result<Json<Page<CampaignListItemBody>>, Error> {
    let query = query.into_inner();
    let criteria = query.criteria()?;
    let sort = query.sort()?;

    let page = manager::list_campaigns(&db, &criteria, sort, query.page, query.limit).await?;

    Ok(Json(page.map(CampaignListItemBody::render)))
}

#[get("/campaigns/stats")]
#[tracing::instrument(skip(db))]
pub async fn get_campaign_stats(db: Data<Database>) -> Result<Json<CampaignStats>, Error> {
    let stats = manager::campaign_stats(&db).await?;

    Ok(Json(stats))
}

#[post("/campaigns")]
#[tracing::instrument(skip(db))]
pub async fn create_campaign(
    db: Data<Database>,
    body: Json<CreateCampaignBody>,
) -> Result<Json<CampaignActionBody>, Error> {
    let body = body.into_inner();

    let outcome = manager::create_campaign(
        &db,
        NewCampaign {
            partner_id: body.partner_id,
            partner_name: body.partner_name,
            program_id: body.program_id,
            program_name: body.program_name,
            name: body.name,
            campaign_type: body.campaign_type,
            description: body.description,
            start_date: body.start_date,
            end_date: body.end_date,
            active: body.active,
            auto_activate: body.auto_activate,
            auto_deactivate: body.auto_deactivate,
            has_products: body.has_products,
            created_by: body.created_by,
        },
    )
    .await?;

    Ok(Json(CampaignActionBody::render(outcome)))
}

#[get("/campaigns/{campaign_id}")]
#[tracing::instrument(skip(db))]
pub async fn get_campaign_by_id(
    db: Data<Database>,
    params: Path<CampaignId>,
) -> Result<Json<CampaignBody>, Error> {
    let campaign_id = params.into_inner();

    let campaign = manager::get_campaign(&db, campaign_id).await?;

    Ok(Json(CampaignBody::render(campaign)))
}

#[patch("/campaigns/{campaign_id}")]
#[tracing::instrument(skip(db))]
pub async fn update_campaign(
    db: Data<Database>,
    params: Path<CampaignId>,
    body: Json<UpdateCampaignBody>,
) -> Result<Json<CampaignActionBody>, Error> {
    let campaign_id = params.into_inner();
    let body = body.into_inner();

    let patch = CampaignPatch {
        name: body.name,
        campaign_type: body.campaign_type,
        description: body.description,
        start_date: body.start_date,
        end_date: body.end_date,
        active: body.active,
        auto_activate: body.auto_activate,
        auto_deactivate: body.auto_deactivate,
        has_products: body.has_products,
        modified_by: body.modified_by,
        ..Default::default()
    };
    let outcome = manager::update_campaign(&db, campaign_id, patch).await?;

    Ok(Json(CampaignActionBody::render(outcome)))
}

#[post("/campaigns/{campaign_id}/active")]
#[tracing::instrument(skip(db))]
pub async fn set_campaign_active(
    db: Data<Database>,
    params: Path<CampaignId>,
    body: Json<SetActiveBody>,
) -> Result<Json<CampaignActionBody>, Error> {
    let campaign_id = params.into_inner();
    let body = body.into_inner();

    let outcome = manager::set_campaign_active(&db, campaign_id, body.active).await?;

    Ok(Json(CampaignActionBody::render(outcome)))
}

#[post("/campaigns/{campaign_id}/duplicate")]
#[tracing::instrument(skip(db))]
pub async fn duplicate_campaign(
    db: Data<Database>,
    params: Path<CampaignId>,
) -> Result<Json<CampaignActionBody>, Error> {
    let campaign_id = params.into_inner();

    let outcome = manager::duplicate_campaign(&db, campaign_id).await?;

    Ok(Json(CampaignActionBody::render(outcome)))
}
