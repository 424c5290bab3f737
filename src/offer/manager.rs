use crate::database::Database;
use crate::error::Error;
use crate::view::page::{paginate, Page};
use crate::view::{derive, Criteria};

use super::{Offer, OfferFilters, OfferId, OfferSort};

#[tracing::instrument(skip(db))]
pub async fn list_offers(
    db: &Database,
    criteria: &Criteria<OfferFilters>,
    sort: OfferSort,
    page: Option<usize>,
    limit: Option<usize>,
) -> Result<Page<Offer>, Error> {
    let offers = {
        let store = db.offers().read().await;
        derive(store.get_all(), criteria, |a, b| sort.compare(a, b))
    };

    Ok(paginate(offers, page, limit))
}

#[tracing::instrument(skip(db))]
pub async fn get_offer(db: &Database, offer_id: OfferId) -> Result<Offer, Error> {
    let store = db.offers().read().await;
    let offer = store.expect(offer_id)?.clone();

    Ok(offer)
}
