use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::error::StorageError;
use storage::models::HackathonStatus;
use thiserror::Error;
use validator::ValidationErrors;

/// Business-rule violations. Every expected failure of the team-formation
/// core is one of these; each kind maps to a fixed code and HTTP status so
/// the transport layer never needs to inspect messages.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Hackathon not found")]
    HackathonNotFound,
    #[error("Only the organizer of this hackathon may do that")]
    NotOwner,
    #[error("Cannot transition from {from} to {to}")]
    InvalidTransition {
        from: HackathonStatus,
        to: HackathonStatus,
    },
    #[error("End date must be after start date and registration deadline before start date")]
    InvalidDates,
    #[error("Registration is closed")]
    RegistrationClosed,
    #[error("Registration deadline has passed")]
    RegistrationDeadlinePassed,
    #[error("Hackathon has reached max participants")]
    HackathonFull,
    #[error("Already registered for this hackathon")]
    AlreadyRegistered,
    #[error("Not registered for this hackathon")]
    NotRegistered,
    #[error("Leave your team before withdrawing")]
    InTeam,
    #[error("Hackathon is not active")]
    HackathonNotActive,
    #[error("You are already in a team for this hackathon")]
    AlreadyInTeam,
    #[error("Team size is out of allowed range")]
    InvalidTeamSize,
    #[error("Team not found")]
    TeamNotFound,
    #[error("Only the captain may do that")]
    NotCaptain,
    #[error("Team is not in forming status")]
    TeamNotForming,
    #[error("You are not a member of this team")]
    NotAMember,
    #[error("Captain cannot leave the team; disband it instead")]
    CaptainCannotLeave,
    #[error("Team is full")]
    TeamFull,
    #[error("User not found or not a student")]
    InviteeNotFound,
    #[error("User is not registered for this hackathon")]
    InviteeNotRegistered,
    #[error("User is already in a team")]
    InviteeAlreadyInTeam,
    #[error("User already has a pending invitation")]
    AlreadyInvited,
    #[error("Invitation not found")]
    InvitationNotFound,
    #[error("Invitation is no longer pending")]
    InvitationNotPending,
    #[error("Invitation has expired")]
    InvitationExpired,
}

impl DomainError {
    pub fn code(&self) -> &'static str {
        use DomainError::*;
        match self {
            HackathonNotFound => "HACKATHON_NOT_FOUND",
            NotOwner => "NOT_OWNER",
            InvalidTransition { .. } => "INVALID_TRANSITION",
            InvalidDates => "INVALID_DATES",
            RegistrationClosed => "REGISTRATION_CLOSED",
            RegistrationDeadlinePassed => "REGISTRATION_DEADLINE_PASSED",
            HackathonFull => "HACKATHON_FULL",
            AlreadyRegistered => "ALREADY_REGISTERED",
            NotRegistered => "NOT_REGISTERED",
            InTeam => "IN_TEAM",
            HackathonNotActive => "HACKATHON_NOT_ACTIVE",
            AlreadyInTeam => "ALREADY_IN_TEAM",
            InvalidTeamSize => "INVALID_TEAM_SIZE",
            TeamNotFound => "TEAM_NOT_FOUND",
            NotCaptain => "NOT_CAPTAIN",
            TeamNotForming => "TEAM_NOT_FORMING",
            NotAMember => "NOT_A_MEMBER",
            CaptainCannotLeave => "CAPTAIN_CANNOT_LEAVE",
            TeamFull => "TEAM_FULL",
            InviteeNotFound => "INVITEE_NOT_FOUND",
            InviteeNotRegistered => "INVITEE_NOT_REGISTERED",
            InviteeAlreadyInTeam => "INVITEE_ALREADY_IN_TEAM",
            AlreadyInvited => "ALREADY_INVITED",
            InvitationNotFound => "INVITATION_NOT_FOUND",
            InvitationNotPending => "INVITATION_NOT_PENDING",
            InvitationExpired => "INVITATION_EXPIRED",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        use DomainError::*;
        match self {
            HackathonNotFound | TeamNotFound | InvitationNotFound | InviteeNotFound => {
                StatusCode::NOT_FOUND
            }
            NotOwner | NotCaptain | NotAMember => StatusCode::FORBIDDEN,
            AlreadyRegistered | AlreadyInTeam | InviteeAlreadyInTeam | AlreadyInvited => {
                StatusCode::CONFLICT
            }
            InvalidTransition { .. }
            | InvalidDates
            | RegistrationClosed
            | RegistrationDeadlinePassed
            | HackathonFull
            | NotRegistered
            | InTeam
            | HackathonNotActive
            | InvalidTeamSize
            | TeamNotForming
            | CaptainCannotLeave
            | TeamFull
            | InviteeNotRegistered
            | InvitationNotPending
            | InvitationExpired => StatusCode::BAD_REQUEST,
        }
    }
}

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Domain(DomainError),
    Storage(StorageError),
    Validation(ValidationErrors),
    BadRequest(String),
    Unauthorized(&'static str),
    Forbidden(&'static str),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{}", e),
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            Self::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Self::Domain(e) => e.status_code(),
            Self::Storage(StorageError::NotFound) => StatusCode::NOT_FOUND,
            Self::Storage(StorageError::ConstraintViolation(_)) => StatusCode::CONFLICT,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
        };

        let body = match &self {
            Self::Domain(e) => {
                json!({
                    "error": e.code(),
                    "message": e.to_string()
                })
            }
            Self::Storage(StorageError::NotFound) => {
                json!({
                    "error": "NOT_FOUND",
                    "message": "Resource not found"
                })
            }
            Self::Storage(StorageError::ConstraintViolation(msg)) => {
                json!({
                    "error": "CONFLICT",
                    "message": msg
                })
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                json!({
                    "error": "INTERNAL_ERROR",
                    "message": "An internal error occurred"
                })
            }
            Self::Validation(errors) => {
                let field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errors)| {
                        errors.iter().map(move |e| {
                            format!(
                                "{}: {}",
                                field,
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            )
                        })
                    })
                    .collect();

                json!({
                    "error": "VALIDATION_ERROR",
                    "message": "Validation failed",
                    "details": field_errors
                })
            }
            Self::BadRequest(msg) => {
                json!({
                    "error": "BAD_REQUEST",
                    "message": msg
                })
            }
            Self::Unauthorized(msg) => {
                json!({
                    "error": "UNAUTHORIZED",
                    "message": msg
                })
            }
            Self::Forbidden(msg) => {
                json!({
                    "error": "FORBIDDEN",
                    "message": msg
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<DomainError> for WebError {
    fn from(error: DomainError) -> Self {
        Self::Domain(error)
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

pub type WebResult<T> = Result<T, WebError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_kinds_map_to_404() {
        for e in [
            DomainError::HackathonNotFound,
            DomainError::TeamNotFound,
            DomainError::InvitationNotFound,
            DomainError::InviteeNotFound,
        ] {
            assert_eq!(e.status_code(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn authorization_kinds_map_to_403() {
        for e in [
            DomainError::NotOwner,
            DomainError::NotCaptain,
            DomainError::NotAMember,
        ] {
            assert_eq!(e.status_code(), StatusCode::FORBIDDEN);
        }
    }

    #[test]
    fn conflict_kinds_map_to_409() {
        for e in [
            DomainError::AlreadyRegistered,
            DomainError::AlreadyInTeam,
            DomainError::InviteeAlreadyInTeam,
            DomainError::AlreadyInvited,
        ] {
            assert_eq!(e.status_code(), StatusCode::CONFLICT);
        }
    }

    #[test]
    fn rule_violations_map_to_400() {
        for e in [
            DomainError::TeamFull,
            DomainError::CaptainCannotLeave,
            DomainError::InvitationExpired,
            DomainError::RegistrationDeadlinePassed,
        ] {
            assert_eq!(e.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn transition_error_carries_both_states() {
        let e = DomainError::InvalidTransition {
            from: HackathonStatus::Draft,
            to: HackathonStatus::InProgress,
        };
        assert_eq!(e.code(), "INVALID_TRANSITION");
        assert_eq!(e.to_string(), "Cannot transition from draft to in_progress");
    }
}
