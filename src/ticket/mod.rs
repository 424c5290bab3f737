use std::borrow::Cow;
use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::store::{Patchable, Record};
use crate::typedid::{TypedId, TypedIdMarker};
use crate::view::filter::{Filterable, Searchable};
use crate::view::{Criteria, Enumerated, Selection};

pub mod endpoints;
pub mod manager;
pub use endpoints::*;

pub type TicketId = TypedId<Ticket>;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Ticket {
    pub id: TicketId,
    pub customer_id: String,
    pub token_id: Option<String>,
    pub subject: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub tier: SupportTier,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub assigned_to: Option<String>,
    pub notes: Vec<String>,
    pub resolution_summary: Option<String>,
}

impl TypedIdMarker for Ticket {
    fn tag() -> &'static str {
        "T"
    }
}

impl Record for Ticket {
    const KIND: &'static str = "ticket";

    fn id(&self) -> TicketId {
        self.id
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum TicketStatus {
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Escalated,
    Resolved,
    Closed,
}

impl Enumerated for TicketStatus {
    const ALL: &'static [TicketStatus] = &[
        TicketStatus::Open,
        TicketStatus::InProgress,
        TicketStatus::Escalated,
        TicketStatus::Resolved,
        TicketStatus::Closed,
    ];

    fn label(&self) -> &'static str {
        match self {
            TicketStatus::Open => "Open",
            TicketStatus::InProgress => "In Progress",
            TicketStatus::Escalated => "Escalated",
            TicketStatus::Resolved => "Resolved",
            TicketStatus::Closed => "Closed",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum TicketPriority {
    High,
    Medium,
    Low,
}

impl TicketPriority {
    pub fn rank(&self) -> u8 {
        match self {
            TicketPriority::High => 0,
            TicketPriority::Medium => 1,
            TicketPriority::Low => 2,
        }
    }
}

impl Enumerated for TicketPriority {
    const ALL: &'static [TicketPriority] = &[
        TicketPriority::High,
        TicketPriority::Medium,
        TicketPriority::Low,
    ];

    fn label(&self) -> &'static str {
        match self {
            TicketPriority::High => "High",
            TicketPriority::Medium => "Medium",
            TicketPriority::Low => "Low",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum SupportTier {
    Tier1,
    Tier2,
}

impl Enumerated for SupportTier {
    const ALL: &'static [SupportTier] = &[SupportTier::Tier1, SupportTier::Tier2];

    fn label(&self) -> &'static str {
        match self {
            SupportTier::Tier1 => "Tier1",
            SupportTier::Tier2 => "Tier2",
        }
    }
}

/// The status tabs of the ticket dashboard.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TicketTab {
    Open,
    Tier1,
    Tier2,
    Escalated,
    Closed,
}

impl TicketTab {
    pub fn admits(&self, ticket: &Ticket) -> bool {
        match self {
            TicketTab::Open => matches!(
                ticket.status,
                TicketStatus::Open | TicketStatus::InProgress
            ),
            TicketTab::Tier1 => {
                ticket.tier == SupportTier::Tier1 && ticket.status != TicketStatus::Closed
            }
            TicketTab::Tier2 => {
                ticket.tier == SupportTier::Tier2 && ticket.status != TicketStatus::Closed
            }
            TicketTab::Escalated => ticket.status == TicketStatus::Escalated,
            TicketTab::Closed => ticket.status == TicketStatus::Closed,
        }
    }
}

impl Enumerated for TicketTab {
    const ALL: &'static [TicketTab] = &[
        TicketTab::Open,
        TicketTab::Tier1,
        TicketTab::Tier2,
        TicketTab::Escalated,
        TicketTab::Closed,
    ];

    fn label(&self) -> &'static str {
        match self {
            TicketTab::Open => "open",
            TicketTab::Tier1 => "tier1",
            TicketTab::Tier2 => "tier2",
            TicketTab::Escalated => "escalated",
            TicketTab::Closed => "closed",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TicketFilters {
    pub status: Selection<TicketStatus>,
    pub tier: Selection<SupportTier>,
    pub tab: Selection<TicketTab>,
}

impl Searchable for Ticket {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = vec![
            Cow::Owned(self.id.to_string()),
            Cow::Borrowed(self.subject.as_str()),
            Cow::Borrowed(self.description.as_str()),
            Cow::Borrowed(self.customer_id.as_str()),
        ];
        fields.extend(self.notes.iter().map(|note| Cow::Borrowed(note.as_str())));

        fields
    }
}

impl Filterable for Ticket {
    type Filters = TicketFilters;

    fn admits(&self, filters: &TicketFilters) -> bool {
        filters.status.admits(&self.status)
            && filters.tier.admits(&self.tier)
            && match filters.tab {
                Selection::All => true,
                Selection::Only(tab) => tab.admits(self),
            }
    }
}

/// Raw list query as it arrives from the dashboard.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct TicketQuery {
    #[serde(default)]
    pub search: String,
    pub status: Option<String>,
    pub tier: Option<String>,
    pub tab: Option<String>,
}

impl TicketQuery {
    pub fn into_criteria(self) -> Result<Criteria<TicketFilters>, Error> {
        Ok(Criteria {
            filters: TicketFilters {
                status: Selection::parse("status", self.status.as_deref())?,
                tier: Selection::parse("tier", self.tier.as_deref())?,
                tab: Selection::parse("tab", self.tab.as_deref())?,
            },
            search: self.search,
        })
    }
}

/// Open tickets first, then by priority; ties keep their store order.
pub fn urgency(a: &Ticket, b: &Ticket) -> Ordering {
    let key = |ticket: &Ticket| (ticket.status != TicketStatus::Open, ticket.priority.rank());
    key(a).cmp(&key(b))
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TicketPatch {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub tier: Option<SupportTier>,
    pub assigned_to: Option<String>,
    pub resolution_summary: Option<String>,
    pub note: Option<String>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl Patchable for Ticket {
    type Patch = TicketPatch;

    fn merge(&self, patch: TicketPatch) -> Ticket {
        let mut ticket = self.clone();
        if let Some(subject) = patch.subject {
            ticket.subject = subject;
        }
        if let Some(description) = patch.description {
            ticket.description = description;
        }
        if let Some(status) = patch.status {
            ticket.status = status;
        }
        if let Some(priority) = patch.priority {
            ticket.priority = priority;
        }
        match (patch.tier, patch.status) {
            (Some(tier), _) => ticket.tier = tier,
            // escalated tickets always sit with tier 2
            (None, Some(TicketStatus::Escalated)) => ticket.tier = SupportTier::Tier2,
            (None, _) => {}
        }
        if let Some(assigned_to) = patch.assigned_to {
            ticket.assigned_to = Some(assigned_to);
        }
        if let Some(resolution_summary) = patch.resolution_summary {
            ticket.resolution_summary = Some(resolution_summary);
        }
        if let Some(note) = patch.note {
            ticket.notes.push(note);
        }
        if let Some(modified_at) = patch.modified_at {
            ticket.modified_at = modified_at;
        }

        ticket
    }
}
