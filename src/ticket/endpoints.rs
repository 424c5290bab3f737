use actix_web::web::{Data, Json, Path, Query};
use actix_web::{get, patch, post};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::action::{ActionMessage, Outcome};
use crate::database::Database;
use crate::error::Error;
use crate::view::highlight::Highlighted;
use crate::view::matches::{segments, MatchSegment};

use super::manager::{self, NewTicket};
use super::{SupportTier, Ticket, TicketId, TicketPatch, TicketPriority, TicketQuery, TicketStatus};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateTicketBody {
    pub customer_id: String,
    pub token_id: Option<String>,
    pub subject: String,
    #[serde(default)]
    pub description: String,
    pub priority: TicketPriority,
    pub tier: SupportTier,
    pub assigned_to: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateTicketBody {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub assigned_to: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddNoteBody {
    pub author: Option<String>,
    pub note: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EscalateTicketBody {
    pub reason: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CloseTicketBody {
    pub resolution: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TicketBody {
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

impl TicketBody {
    pub fn render(ticket: Ticket) -> TicketBody {
        TicketBody {
            id: ticket.id,
            customer_id: ticket.customer_id,
            token_id: ticket.token_id,
            subject: ticket.subject,
            description: ticket.description,
            status: ticket.status,
            priority: ticket.priority,
            tier: ticket.tier,
            created_at: ticket.created_at,
            modified_at: ticket.modified_at,
            assigned_to: ticket.assigned_to,
            notes: ticket.notes,
            resolution_summary: ticket.resolution_summary,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TicketListItemBody {
    #[serde(flatten)]
    pub ticket: TicketBody,
    pub highlighted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_matches: Option<Vec<MatchSegment>>,
}

impl TicketListItemBody {
    pub fn render(item: Highlighted<Ticket>, search: &str) -> TicketListItemBody {
        let subject_matches = if search.trim().is_empty() {
            None
        } else {
            Some(segments(&item.record.subject, search))
        };

        TicketListItemBody {
            ticket: TicketBody::render(item.record),
            highlighted: item.highlighted,
            subject_matches,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TicketActionBody {
    pub ticket: TicketBody,
    pub message: ActionMessage,
}

impl TicketActionBody {
    pub fn render(outcome: Outcome<Ticket>) -> TicketActionBody {
        TicketActionBody {
            ticket: TicketBody::render(outcome.record),
            message: outcome.message,
        }
    }
}

#[get("/tickets")]
#[tracing::instrument(skip(db))]
pub async fn get_tickets(
    db: Data<Database>,
    query: Query<TicketQuery>,
) -> Result<Json<Vec<TicketListItemBody>>, Error> {
    let criteria = query.into_inner().into_criteria()?;

    let tickets = manager::list_tickets(&db, &criteria).await?;

    let body = tickets
        .into_iter()
        .map(|item| TicketListItemBody::render(item, &criteria.search))
        .collect();

    Ok(Json(body))
}

#[post("/tickets")]
#[tracing::instrument(skip(db))]
pub async fn create_ticket(
    db: Data<Database>,
    body: Json<CreateTicketBody>,
) -> Result<Json<TicketActionBody>, Error> {
    let body = body.into_inner();

    let outcome = manager::create_ticket(
        &db,
        NewTicket {
            customer_id: body.customer_id,
            token_id: body.token_id,
            subject: body.subject,
            description: body.description,
            priority: body.priority,
            tier: body.tier,
            assigned_to: body.assigned_to,
        },
    )
    .await?;

    Ok(Json(TicketActionBody::render(outcome)))
}

#[get("/tickets/{ticket_id}")]
#[tracing::instrument(skip(db))]
pub async fn get_ticket_by_id(
    db: Data<Database>,
    params: Path<TicketId>,
) -> Result<Json<TicketBody>, Error> {
    let ticket_id = params.into_inner();

    let ticket = manager::get_ticket(&db, ticket_id).await?;

    Ok(Json(TicketBody::render(ticket)))
}

#[patch("/tickets/{ticket_id}")]
#[tracing::instrument(skip(db))]
pub async fn update_ticket(
    db: Data<Database>,
    params: Path<TicketId>,
    body: Json<UpdateTicketBody>,
) -> Result<Json<TicketActionBody>, Error> {
    let ticket_id = params.into_inner();
    let body = body.into_inner();

    let patch = TicketPatch {
        subject: body.subject,
        description: body.description,
        status: body.status,
        priority: body.priority,
        assigned_to: body.assigned_to,
        ..Default::default()
    };
    let outcome = manager::update_ticket(&db, ticket_id, patch).await?;

    Ok(Json(TicketActionBody::render(outcome)))
}

#[post("/tickets/{ticket_id}/notes")]
#[tracing::instrument(skip(db))]
pub async fn add_note_to_ticket(
    db: Data<Database>,
    params: Path<TicketId>,
    body: Json<AddNoteBody>,
) -> Result<Json<TicketActionBody>, Error> {
    let ticket_id = params.into_inner();
    let body = body.into_inner();

    let outcome = manager::add_note(&db, ticket_id, body.author, body.note).await?;

    Ok(Json(TicketActionBody::render(outcome)))
}

#[post("/tickets/{ticket_id}/escalate")]
#[tracing::instrument(skip(db))]
pub async fn escalate_ticket(
    db: Data<Database>,
    params: Path<TicketId>,
    body: Json<EscalateTicketBody>,
) -> Result<Json<TicketActionBody>, Error> {
    let ticket_id = params.into_inner();
    let body = body.into_inner();

    let outcome = manager::escalate_ticket(&db, ticket_id, body.reason).await?;

    Ok(Json(TicketActionBody::render(outcome)))
}

#[post("/tickets/{ticket_id}/close")]
#[tracing::instrument(skip(db))]
pub async fn close_ticket(
    db: Data<Database>,
    params: Path<TicketId>,
    body: Json<CloseTicketBody>,
) -> Result<Json<TicketActionBody>, Error> {
    let ticket_id = params.into_inner();
    let body = body.into_inner();

    let outcome = manager::close_ticket(&db, ticket_id, body.resolution).await?;

    Ok(Json(TicketActionBody::render(outcome)))
}
