use chrono::Utc;
use tracing::info;

use crate::action::{ActionMessage, Outcome};
use crate::database::Database;
use crate::error::Error;
use crate::view::highlight::{annotate, Highlighted};
use crate::view::{derive, Criteria};

use super::{
    urgency, SupportTier, Ticket, TicketFilters, TicketId, TicketPatch, TicketPriority,
    TicketStatus,
};

#[derive(Clone, Debug)]
pub struct NewTicket {
    pub customer_id: String,
    pub token_id: Option<String>,
    pub subject: String,
    pub description: String,
    pub priority: TicketPriority,
    pub tier: SupportTier,
    pub assigned_to: Option<String>,
}

fn require_text(field: &'static str, text: &str) -> Result<(), Error> {
    if text.trim().is_empty() {
        return Err(Error::MissingText { field });
    }

    Ok(())
}

#[tracing::instrument(skip(db))]
pub async fn list_tickets(
    db: &Database,
    criteria: &Criteria<TicketFilters>,
) -> Result<Vec<Highlighted<Ticket>>, Error> {
    let tickets = {
        let store = db.tickets().read().await;
        derive(store.get_all(), criteria, urgency)
    };
    let current = db.ticket_highlight().current().await;

    Ok(annotate(tickets, current))
}

#[tracing::instrument(skip(db))]
pub async fn get_ticket(db: &Database, ticket_id: TicketId) -> Result<Ticket, Error> {
    let store = db.tickets().read().await;
    let ticket = store.expect(ticket_id)?.clone();

    Ok(ticket)
}

#[tracing::instrument(skip(db))]
pub async fn create_ticket(db: &Database, new: NewTicket) -> Result<Outcome<Ticket>, Error> {
    require_text("subject", &new.subject)?;

    let now = Utc::now();
    let ticket = {
        let mut store = db.tickets().write().await;
        let ticket = Ticket {
            id: store.next_id(),
            customer_id: new.customer_id,
            token_id: new.token_id,
            subject: new.subject,
            description: new.description,
            status: TicketStatus::Open,
            priority: new.priority,
            tier: new.tier,
            created_at: now,
            modified_at: now,
            assigned_to: new.assigned_to,
            notes: vec![],
            resolution_summary: None,
        };
        store.append(ticket.clone())?;
        ticket
    };

    db.ticket_highlight().mark(ticket.id).await;
    info!("created ticket {}", ticket.id);

    Ok(Outcome {
        message: ActionMessage::success(format!(
            "Support ticket {} created successfully",
            ticket.id
        )),
        record: ticket,
    })
}

#[tracing::instrument(skip(db))]
pub async fn update_ticket(
    db: &Database,
    ticket_id: TicketId,
    mut patch: TicketPatch,
) -> Result<Outcome<Ticket>, Error> {
    if let Some(subject) = &patch.subject {
        require_text("subject", subject)?;
    }

    patch.modified_at = Some(Utc::now());
    let ticket = db.tickets().write().await.update(ticket_id, patch)?;

    info!("updated ticket {}", ticket.id);

    Ok(Outcome {
        message: ActionMessage::success(format!("Ticket {} updated", ticket.id)),
        record: ticket,
    })
}

#[tracing::instrument(skip(db))]
pub async fn add_note(
    db: &Database,
    ticket_id: TicketId,
    author: Option<String>,
    note: String,
) -> Result<Outcome<Ticket>, Error> {
    require_text("note", &note)?;

    let author = author
        .filter(|author| !author.trim().is_empty())
        .unwrap_or_else(|| "Agent".to_string());
    let patch = TicketPatch {
        note: Some(format!("{}: {}", author.trim(), note.trim())),
        modified_at: Some(Utc::now()),
        ..Default::default()
    };
    let ticket = db.tickets().write().await.update(ticket_id, patch)?;

    info!("added note to ticket {}", ticket.id);

    Ok(Outcome {
        message: ActionMessage::info(format!("Note added to ticket {}", ticket.id)),
        record: ticket,
    })
}

#[tracing::instrument(skip(db))]
pub async fn escalate_ticket(
    db: &Database,
    ticket_id: TicketId,
    reason: String,
) -> Result<Outcome<Ticket>, Error> {
    require_text("reason", &reason)?;

    let ticket = {
        let mut store = db.tickets().write().await;
        let (status, tier) = {
            let ticket = store.expect(ticket_id)?;
            (ticket.status, ticket.tier)
        };
        if tier != SupportTier::Tier1
            || matches!(status, TicketStatus::Closed | TicketStatus::Escalated)
        {
            return Err(Error::TicketNotEscalatable {
                ticket_id,
                status,
                tier,
            });
        }

        let patch = TicketPatch {
            status: Some(TicketStatus::Escalated),
            tier: Some(SupportTier::Tier2),
            note: Some(format!("Escalated to Tier 2: {}", reason.trim())),
            modified_at: Some(Utc::now()),
            ..Default::default()
        };
        store.update(ticket_id, patch)?
    };

    info!("escalated ticket {} to tier 2", ticket.id);

    Ok(Outcome {
        message: ActionMessage::success(format!("Ticket {} escalated to Tier 2", ticket.id)),
        record: ticket,
    })
}

#[tracing::instrument(skip(db))]
pub async fn close_ticket(
    db: &Database,
    ticket_id: TicketId,
    resolution: String,
) -> Result<Outcome<Ticket>, Error> {
    require_text("resolution", &resolution)?;

    let ticket = {
        let mut store = db.tickets().write().await;
        if store.expect(ticket_id)?.status == TicketStatus::Closed {
            return Err(Error::TicketAlreadyClosed { ticket_id });
        }

        let patch = TicketPatch {
            status: Some(TicketStatus::Closed),
            resolution_summary: Some(resolution.trim().to_string()),
            modified_at: Some(Utc::now()),
            ..Default::default()
        };
        store.update(ticket_id, patch)?
    };

    info!("closed ticket {}", ticket.id);

    Ok(Outcome {
        message: ActionMessage::success(format!("Ticket {} has been closed", ticket.id)),
        record: ticket,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test::database;
    use crate::seed::Seed;
    use crate::ticket::tests::ticket;
    use std::time::Duration;
    use tokio::time;

    fn db() -> Database {
        database(Seed {
            tickets: vec![
                ticket(1, TicketStatus::Open, TicketPriority::High, SupportTier::Tier1),
                ticket(2, TicketStatus::Escalated, TicketPriority::Low, SupportTier::Tier2),
                ticket(3, TicketStatus::Open, TicketPriority::Medium, SupportTier::Tier1),
            ],
            ..Seed::default()
        })
    }

    fn new_ticket(subject: &str) -> NewTicket {
        NewTicket {
            customer_id: "cust004".to_string(),
            token_id: None,
            subject: subject.to_string(),
            description: "Customer updated app and lost tokens".to_string(),
            priority: TicketPriority::Medium,
            tier: SupportTier::Tier1,
            assigned_to: None,
        }
    }

    #[tokio::test]
    async fn list_tickets_orders_by_urgency() {
        let db = db();

        let listed = list_tickets(&db, &Criteria::default()).await.unwrap();

        let ids: Vec<_> = listed.iter().map(|t| t.record.id.number()).collect();
        assert_eq!(ids, vec![1, 3, 2]);
        assert!(listed.iter().all(|t| !t.highlighted));
    }

    #[tokio::test]
    async fn get_ticket_returns_error_if_doesnt_exist() {
        let db = db();

        let result = get_ticket(&db, TicketId::new(42)).await;

        assert_eq!(
            result.unwrap_err(),
            Error::RecordNotFound {
                kind: "ticket",
                id: "T-42".to_string(),
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn created_ticket_is_highlighted_until_expiry() {
        let db = db();

        let outcome = create_ticket(&db, new_ticket("Missing tokens after app update"))
            .await
            .unwrap();

        assert_eq!(outcome.record.id, TicketId::new(4));
        assert_eq!(outcome.record.status, TicketStatus::Open);
        assert_eq!(
            outcome.message.text,
            "Support ticket T-4 created successfully"
        );

        let listed = list_tickets(&db, &Criteria::default()).await.unwrap();
        let highlighted: Vec<_> = listed
            .iter()
            .filter(|t| t.highlighted)
            .map(|t| t.record.id)
            .collect();
        assert_eq!(highlighted, vec![TicketId::new(4)]);

        time::sleep(Duration::from_secs(4)).await;

        let listed = list_tickets(&db, &Criteria::default()).await.unwrap();
        assert!(listed.iter().all(|t| !t.highlighted));
    }

    #[tokio::test]
    async fn create_ticket_requires_subject() {
        let db = db();

        let result = create_ticket(&db, new_ticket("   ")).await;

        assert_eq!(result.unwrap_err(), Error::MissingText { field: "subject" });
        assert_eq!(db.tickets().read().await.len(), 3);
    }

    #[tokio::test]
    async fn add_note_prefixes_author() {
        let db = db();

        let outcome = add_note(&db, TicketId::new(1), Some("Dana".into()), " called back ".into())
            .await
            .unwrap();

        assert_eq!(outcome.record.notes, vec!["Dana: called back".to_string()]);
        let stored = get_ticket(&db, TicketId::new(1)).await.unwrap();
        assert_eq!(stored, outcome.record);
    }

    #[tokio::test]
    async fn add_note_defaults_author() {
        let db = db();

        let outcome = add_note(&db, TicketId::new(3), None, "verified account".into())
            .await
            .unwrap();

        assert_eq!(outcome.record.notes, vec!["Agent: verified account".to_string()]);
    }

    #[tokio::test]
    async fn escalate_moves_ticket_to_tier_two() {
        let db = db();

        let outcome = escalate_ticket(&db, TicketId::new(3), "token records look wrong".into())
            .await
            .unwrap();

        assert_eq!(outcome.record.status, TicketStatus::Escalated);
        assert_eq!(outcome.record.tier, SupportTier::Tier2);
        assert_eq!(
            outcome.record.notes.last().map(String::as_str),
            Some("Escalated to Tier 2: token records look wrong")
        );
        assert_eq!(db.tickets().read().await.len(), 3);
    }

    #[tokio::test]
    async fn escalate_rejects_tier_two_ticket() {
        let db = db();

        let result = escalate_ticket(&db, TicketId::new(2), "again".into()).await;

        assert_eq!(
            result.unwrap_err(),
            Error::TicketNotEscalatable {
                ticket_id: TicketId::new(2),
                status: TicketStatus::Escalated,
                tier: SupportTier::Tier2,
            }
        );
    }

    #[tokio::test]
    async fn close_sets_resolution_and_rejects_second_close() {
        let db = db();

        let outcome = close_ticket(&db, TicketId::new(1), "Reissued reward".into())
            .await
            .unwrap();
        assert_eq!(outcome.record.status, TicketStatus::Closed);
        assert_eq!(
            outcome.record.resolution_summary.as_deref(),
            Some("Reissued reward")
        );
        assert_eq!(outcome.message.text, "Ticket T-1 has been closed");

        let result = close_ticket(&db, TicketId::new(1), "again".into()).await;
        assert_eq!(
            result.unwrap_err(),
            Error::TicketAlreadyClosed {
                ticket_id: TicketId::new(1)
            }
        );
    }

    #[tokio::test]
    async fn mutations_on_missing_ticket_are_not_found() {
        let db = db();

        let result = add_note(&db, TicketId::new(99), None, "hello".into()).await;

        assert!(matches!(
            result,
            Err(Error::RecordNotFound { kind: "ticket", .. })
        ));
    }

    #[tokio::test]
    async fn update_ticket_patches_fields() {
        let db = db();

        let outcome = update_ticket(
            &db,
            TicketId::new(2),
            TicketPatch {
                priority: Some(TicketPriority::High),
                assigned_to: Some("Sarah Johnson".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(outcome.record.priority, TicketPriority::High);
        assert_eq!(outcome.record.assigned_to.as_deref(), Some("Sarah Johnson"));
        assert_eq!(outcome.record.status, TicketStatus::Escalated);
    }

    #[tokio::test]
    async fn update_ticket_to_escalated_moves_to_tier_two() {
        let db = db();

        let outcome = update_ticket(
            &db,
            TicketId::new(1),
            TicketPatch {
                status: Some(TicketStatus::Escalated),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(outcome.record.status, TicketStatus::Escalated);
        assert_eq!(outcome.record.tier, SupportTier::Tier2);

        let stored = get_ticket(&db, TicketId::new(1)).await.unwrap();
        assert_eq!(stored.tier, SupportTier::Tier2);
    }
}
