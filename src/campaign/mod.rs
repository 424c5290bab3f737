use std::borrow::Cow;
use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::store::{Patchable, Record};
use crate::typedid::{TypedId, TypedIdMarker};
use crate::view::filter::{Filterable, Searchable};
use crate::view::sort::SortOrder;
use crate::view::{parse_choice, Criteria, Enumerated, Selection};

pub mod endpoints;
pub mod manager;
pub use endpoints::*;

pub type CampaignId = TypedId<Campaign>;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Campaign {
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

impl Campaign {
    pub fn status_at(&self, now: DateTime<Utc>) -> CampaignStatus {
        CampaignStatus::compute(
            self.active,
            self.auto_activate,
            self.start_date,
            self.end_date,
            now,
        )
    }

    pub fn refresh_status(&mut self, now: DateTime<Utc>) {
        self.status = self.status_at(now);
    }
}

impl TypedIdMarker for Campaign {
    fn tag() -> &'static str {
        "CPN"
    }
}

impl Record for Campaign {
    const KIND: &'static str = "campaign";

    fn id(&self) -> CampaignId {
        self.id
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignType {
    Promotional,
    Targeted,
    Seasonal,
}

impl Enumerated for CampaignType {
    const ALL: &'static [CampaignType] = &[
        CampaignType::Promotional,
        CampaignType::Targeted,
        CampaignType::Seasonal,
    ];

    fn label(&self) -> &'static str {
        match self {
            CampaignType::Promotional => "promotional",
            CampaignType::Targeted => "targeted",
            CampaignType::Seasonal => "seasonal",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Draft,
    Scheduled,
    Active,
    Paused,
    Ended,
}

impl CampaignStatus {
    /// The lifecycle status implied by the activation flags and the date
    /// window at `now`.
    pub fn compute(
        active: bool,
        auto_activate: bool,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> CampaignStatus {
        if now > end_date {
            CampaignStatus::Ended
        } else if now < start_date {
            if active || auto_activate {
                CampaignStatus::Scheduled
            } else {
                CampaignStatus::Draft
            }
        } else if active {
            CampaignStatus::Active
        } else {
            CampaignStatus::Paused
        }
    }
}

impl Enumerated for CampaignStatus {
    const ALL: &'static [CampaignStatus] = &[
        CampaignStatus::Draft,
        CampaignStatus::Scheduled,
        CampaignStatus::Active,
        CampaignStatus::Paused,
        CampaignStatus::Ended,
    ];

    fn label(&self) -> &'static str {
        match self {
            CampaignStatus::Draft => "draft",
            CampaignStatus::Scheduled => "scheduled",
            CampaignStatus::Active => "active",
            CampaignStatus::Paused => "paused",
            CampaignStatus::Ended => "ended",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CampaignFilters {
    pub status: Selection<CampaignStatus>,
    pub campaign_type: Selection<CampaignType>,
    pub partner_id: Option<String>,
}

impl Searchable for Campaign {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = vec![Cow::Borrowed(self.name.as_str())];
        if let Some(description) = &self.description {
            fields.push(Cow::Borrowed(description.as_str()));
        }
        fields.push(Cow::Borrowed(self.partner_name.as_str()));
        fields.push(Cow::Borrowed(self.program_name.as_str()));

        fields
    }
}

impl Filterable for Campaign {
    type Filters = CampaignFilters;

    fn admits(&self, filters: &CampaignFilters) -> bool {
        filters.status.admits(&self.status)
            && filters.campaign_type.admits(&self.campaign_type)
            && filters
                .partner_id
                .as_ref()
                .map_or(true, |partner_id| *partner_id == self.partner_id)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CampaignSortField {
    Name,
    StartDate,
    EndDate,
    CreatedAt,
}

impl Enumerated for CampaignSortField {
    const ALL: &'static [CampaignSortField] = &[
        CampaignSortField::Name,
        CampaignSortField::StartDate,
        CampaignSortField::EndDate,
        CampaignSortField::CreatedAt,
    ];

    fn label(&self) -> &'static str {
        match self {
            CampaignSortField::Name => "name",
            CampaignSortField::StartDate => "start_date",
            CampaignSortField::EndDate => "end_date",
            CampaignSortField::CreatedAt => "created_at",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CampaignSort {
    pub field: CampaignSortField,
    pub order: SortOrder,
}

impl CampaignSort {
    pub fn compare(&self, a: &Campaign, b: &Campaign) -> Ordering {
        let ordering = match self.field {
            CampaignSortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            CampaignSortField::StartDate => a.start_date.cmp(&b.start_date),
            CampaignSortField::EndDate => a.end_date.cmp(&b.end_date),
            CampaignSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        };

        self.order.apply(ordering)
    }
}

impl Default for CampaignSort {
    fn default() -> CampaignSort {
        CampaignSort {
            field: CampaignSortField::CreatedAt,
            order: SortOrder::Desc,
        }
    }
}

/// Raw list query as it arrives from the dashboard.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CampaignQuery {
    #[serde(default)]
    pub search: String,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub campaign_type: Option<String>,
    pub partner_id: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl CampaignQuery {
    pub fn criteria(&self) -> Result<Criteria<CampaignFilters>, Error> {
        let partner_id = self
            .partner_id
            .as_deref()
            .map(str::trim)
            .filter(|partner_id| !partner_id.is_empty() && !partner_id.eq_ignore_ascii_case("all"))
            .map(str::to_string);

        Ok(Criteria {
            search: self.search.clone(),
            filters: CampaignFilters {
                status: Selection::parse("status", self.status.as_deref())?,
                campaign_type: Selection::parse("type", self.campaign_type.as_deref())?,
                partner_id,
            },
        })
    }

    pub fn sort(&self) -> Result<CampaignSort, Error> {
        let default = CampaignSort::default();

        Ok(CampaignSort {
            field: parse_choice("sort_by", self.sort_by.as_deref(), default.field)?,
            order: parse_choice("sort_order", self.sort_order.as_deref(), default.order)?,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CampaignStats {
    pub total: usize,
    pub draft: usize,
    pub scheduled: usize,
    pub active: usize,
    pub paused: usize,
    pub ended: usize,
}

impl CampaignStats {
    pub fn tally(statuses: impl IntoIterator<Item = CampaignStatus>) -> CampaignStats {
        let mut stats = CampaignStats::default();
        for status in statuses {
            stats.total += 1;
            match status {
                CampaignStatus::Draft => stats.draft += 1,
                CampaignStatus::Scheduled => stats.scheduled += 1,
                CampaignStatus::Active => stats.active += 1,
                CampaignStatus::Paused => stats.paused += 1,
                CampaignStatus::Ended => stats.ended += 1,
            }
        }

        stats
    }
}

/// Editable campaign fields. Partner and program are fixed at creation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CampaignPatch {
    pub name: Option<String>,
    pub campaign_type: Option<CampaignType>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub active: Option<bool>,
    pub auto_activate: Option<bool>,
    pub auto_deactivate: Option<bool>,
    pub has_products: Option<bool>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<String>,
}

impl Patchable for Campaign {
    type Patch = CampaignPatch;

    fn merge(&self, patch: CampaignPatch) -> Campaign {
        let mut campaign = self.clone();
        if let Some(name) = patch.name {
            campaign.name = name;
        }
        if let Some(campaign_type) = patch.campaign_type {
            campaign.campaign_type = campaign_type;
        }
        if let Some(description) = patch.description {
            campaign.description = Some(description);
        }
        if let Some(start_date) = patch.start_date {
            campaign.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            campaign.end_date = end_date;
        }
        if let Some(active) = patch.active {
            campaign.active = active;
        }
        if let Some(auto_activate) = patch.auto_activate {
            campaign.auto_activate = auto_activate;
        }
        if let Some(auto_deactivate) = patch.auto_deactivate {
            campaign.auto_deactivate = auto_deactivate;
        }
        if let Some(has_products) = patch.has_products {
            campaign.has_products = has_products;
        }
        if let Some(modified_by) = patch.modified_by {
            campaign.modified_by = Some(modified_by);
        }
        if let Some(modified_at) = patch.modified_at {
            campaign.modified_at = modified_at;
            campaign.refresh_status(modified_at);
        }

        campaign
    }
}
