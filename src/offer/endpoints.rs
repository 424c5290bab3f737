use actix_web::get;
use actix_web::web::{Data, Json, Path, Query};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::Error;
use crate::view::page::Page;

use super::manager;
use super::{Offer, OfferCategory, OfferId, OfferQuery};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OfferBody {
    pub id: OfferId,
    pub merchant: String,
    pub name: String,
    pub category: OfferCategory,
    pub value: u32,
    pub rating: f32,
    pub end_date: DateTime<Utc>,
}

impl OfferBody {
    pub fn render(offer: Offer) -> OfferBody {
        OfferBody {
            id: offer.id,
            merchant: offer.merchant,
            name: offer.name,
            category: offer.category,
            value: offer.value,
            rating: offer.rating,
            end_date: offer.end_date,
        }
    }
}

#[get("/offers")]
#[tracing::instrument(skip(db))]
pub async fn get_offers(
    db: Data<Database>,
    query: Query<OfferQuery>,
) -> Result<Json<Page<OfferBody>>, Error> {
    let query = query.into_inner();
    let criteria = query.criteria()?;
    let sort = query.sort()?;

    let page = manager::list_offers(&db, &criteria, sort, query.page, query.limit).await?;

    Ok(Json(page.map(OfferBody::render)))
}

#[get("/offers/{offer_id}")]
#[tracing::instrument(skip(db))]
pub async fn get_offer_by_id(
    db: Data<Database>,
    params: Path<OfferId>,
) -> Result<Json<OfferBody>, Error> {
    let offer_id = params.into_inner();

    let offer = manager::get_offer(&db, offer_id).await?;

    Ok(Json(OfferBody::render(offer)))
}
