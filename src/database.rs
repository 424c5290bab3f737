use std::time::Duration;

use tokio::sync::RwLock;

use crate::campaign::Campaign;
use crate::error::Error;
use crate::offer::Offer;
use crate::seed::Seed;
use crate::store::RecordStore;
use crate::ticket::Ticket;
use crate::view::highlight::Highlighter;

/// All record stores of the dashboard, held in memory for the life of the
/// process.
pub struct Database {
    tickets: RwLock<RecordStore<Ticket>>,
    campaigns: RwLock<RecordStore<Campaign>>,
    offers: RwLock<RecordStore<Offer>>,
    ticket_highlight: Highlighter<Ticket>,
    campaign_highlight: Highlighter<Campaign>,
}

impl Database {
    pub fn new(seed: Seed, highlight_duration: Duration) -> Result<Database, Error> {
        Ok(Database {
            tickets: RwLock::new(RecordStore::with_records(seed.tickets)?),
            campaigns: RwLock::new(RecordStore::with_records(seed.campaigns)?),
            offers: RwLock::new(RecordStore::with_records(seed.offers)?),
            ticket_highlight: Highlighter::new(highlight_duration),
            campaign_highlight: Highlighter::new(highlight_duration),
        })
    }

    pub fn tickets(&self) -> &RwLock<RecordStore<Ticket>> {
        &self.tickets
    }

    pub fn campaigns(&self) -> &RwLock<RecordStore<Campaign>> {
        &self.campaigns
    }

    pub fn offers(&self) -> &RwLock<RecordStore<Offer>> {
        &self.offers
    }

    pub fn ticket_highlight(&self) -> &Highlighter<Ticket> {
        &self.ticket_highlight
    }

    pub fn campaign_highlight(&self) -> &Highlighter<Campaign> {
        &self.campaign_highlight
    }
}
