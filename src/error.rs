use std::fmt::{Debug, Display};
use std::io::Error as IoError;

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError, UrlencodedError};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use chrono::{DateTime, Utc};
use derivative::Derivative;
use serde::{Serialize, Serializer};

use crate::ticket::{SupportTier, TicketId, TicketStatus};

#[derive(Debug, Serialize, Derivative)]
#[derivative(PartialEq)]
#[serde(untagged)]
pub enum Error {
    // 400
    #[serde(serialize_with = "display")]
    InvalidJson(#[derivative(PartialEq = "ignore")] JsonPayloadError),
    #[serde(serialize_with = "display")]
    InvalidPath(#[derivative(PartialEq = "ignore")] PathError),
    #[serde(serialize_with = "display")]
    InvalidForm(#[derivative(PartialEq = "ignore")] UrlencodedError),
    #[serde(serialize_with = "display")]
    InvalidQuery(#[derivative(PartialEq = "ignore")] QueryPayloadError),
    InvalidCriteria {
        dimension: &'static str,
        value: String,
    },
    MissingText {
        field: &'static str,
    },
    InvalidDateRange {
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    },

    // 404
    PathNotFound,
    RecordNotFound {
        kind: &'static str,
        id: String,
    },

    // 409
    DuplicateRecordId {
        kind: &'static str,
        id: String,
    },
    TicketNotEscalatable {
        ticket_id: TicketId,
        status: TicketStatus,
        tier: SupportTier,
    },
    TicketAlreadyClosed {
        ticket_id: TicketId,
    },
    CampaignNameTaken {
        program_id: String,
        name: String,
    },

    // 500
    #[serde(serialize_with = "display")]
    IoError(#[derivative(PartialEq = "ignore")] IoError),
    InvalidConfig {
        key: &'static str,
        value: String,
    },
}

impl Error {
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidJson(_) => "E4001000",
            Error::InvalidPath(_) => "E4001001",
            Error::InvalidForm(_) => "E4001002",
            Error::InvalidQuery(_) => "E4001003",
            Error::InvalidCriteria { .. } => "E4001004",
            Error::MissingText { .. } => "E4001005",
            Error::InvalidDateRange { .. } => "E4001006",
            Error::PathNotFound => "E4041000",
            Error::RecordNotFound { .. } => "E4041001",
            Error::DuplicateRecordId { .. } => "E4091000",
            Error::TicketNotEscalatable { .. } => "E4091001",
            Error::TicketAlreadyClosed { .. } => "E4091002",
            Error::CampaignNameTaken { .. } => "E4091003",
            Error::IoError(_) => "E5001000",
            Error::InvalidConfig { .. } => "E5001001",
        }
    }

    pub fn error_message(&self) -> &'static str {
        match self {
            Error::InvalidJson(_) => "The given json could not be parsed",
            Error::InvalidPath(_) => "The given path could not be parsed",
            Error::InvalidForm(_) => "The given form could not be parsed",
            Error::InvalidQuery(_) => "The given query could not be parsed",
            Error::InvalidCriteria { .. } => {
                "The given filter value is not one of the allowed values"
            }
            Error::MissingText { .. } => "A required text field was empty",
            Error::InvalidDateRange { .. } => "The end date must not be before the start date",
            Error::PathNotFound => "The requested path was not found",
            Error::RecordNotFound { .. } => "The requested record was not found",
            Error::DuplicateRecordId { .. } => "A record with the given id already exists",
            Error::TicketNotEscalatable { .. } => {
                "Only open tier 1 tickets can be escalated to tier 2"
            }
            Error::TicketAlreadyClosed { .. } => "The requested ticket is already closed",
            Error::CampaignNameTaken { .. } => {
                "A campaign with the given name already exists in the program"
            }
            Error::IoError(_) => "An error occurred during an I/O operation",
            Error::InvalidConfig { .. } => "A configuration value could not be used",
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidJson(_) => StatusCode::BAD_REQUEST,
            Error::InvalidPath(_) => StatusCode::BAD_REQUEST,
            Error::InvalidForm(_) => StatusCode::BAD_REQUEST,
            Error::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Error::InvalidCriteria { .. } => StatusCode::BAD_REQUEST,
            Error::MissingText { .. } => StatusCode::BAD_REQUEST,
            Error::InvalidDateRange { .. } => StatusCode::BAD_REQUEST,
            Error::PathNotFound => StatusCode::NOT_FOUND,
            Error::RecordNotFound { .. } => StatusCode::NOT_FOUND,
            Error::DuplicateRecordId { .. } => StatusCode::CONFLICT,
            Error::TicketNotEscalatable { .. } => StatusCode::CONFLICT,
            Error::TicketAlreadyClosed { .. } => StatusCode::CONFLICT,
            Error::CampaignNameTaken { .. } => StatusCode::CONFLICT,
            Error::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::InvalidConfig { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        #[derive(Serialize)]
        struct Dummy<'a> {
            error_code: &'static str,
            error_message: &'static str,
            error_meta: &'a Error,
        }

        HttpResponse::build(self.status_code()).json(&Dummy {
            error_code: self.error_code(),
            error_message: self.error_message(),
            error_meta: self,
        })
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        Debug::fmt(self, f)
    }
}

impl From<IoError> for Error {
    fn from(error: IoError) -> Error {
        Error::IoError(error)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidJson(err) => Some(err),
            Error::InvalidPath(err) => Some(err),
            Error::InvalidForm(err) => Some(err),
            Error::InvalidQuery(err) => Some(err),
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

fn display<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.collect_str(value)
}
