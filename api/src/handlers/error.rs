//! Translation of domain failures into localized HTTP error responses.
//!
//! The core classifies every failure with [`ErrorKind`]; this module owns the
//! mapping from kinds to status codes and from error variants to stable error
//! codes and English / Portuguese messages.

use actix_web::{
    http::{header, StatusCode},
    HttpRequest, HttpResponse,
};
use rent_core::errors::{AuthError, DomainError, ErrorKind, RentalError, TokenError, ValidationError};
use rent_core::services::authorization::DenyReason;
use rent_shared::{error_codes, ErrorResponse, Language};

/// Detect language preference from the Accept-Language header
pub fn extract_language(req: &HttpRequest) -> Language {
    req.headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .map(Language::from_accept_language)
        .unwrap_or_default()
}

fn localized(lang: Language, en: &str, pt: &str) -> String {
    match lang {
        Language::English => en.to_string(),
        Language::Portuguese => pt.to_string(),
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn internal(lang: Language) -> ErrorResponse {
    ErrorResponse::new(
        error_codes::INTERNAL_ERROR,
        localized(lang, "An internal error occurred", "Ocorreu um erro interno"),
    )
}

fn auth_body(error: &AuthError, lang: Language) -> ErrorResponse {
    match error {
        AuthError::InvalidCredentials => ErrorResponse::new(
            error_codes::INVALID_CREDENTIALS,
            localized(lang, "Invalid email or password", "Email ou senha inválidos"),
        ),
        AuthError::AccountInactive => ErrorResponse::new(
            error_codes::ACCOUNT_INACTIVE,
            localized(lang, "This account is inactive", "Esta conta está inativa"),
        ),
        AuthError::EmailAlreadyRegistered => ErrorResponse::new(
            error_codes::EMAIL_TAKEN,
            localized(lang, "Email is already registered", "Email já cadastrado"),
        ),
        AuthError::NationalIdAlreadyRegistered => ErrorResponse::new(
            error_codes::NATIONAL_ID_TAKEN,
            localized(lang, "CPF is already registered", "CPF já cadastrado"),
        ),
        AuthError::AuthenticationRequired => ErrorResponse::new(
            error_codes::UNAUTHORIZED,
            localized(lang, "Authentication required", "Autenticação necessária"),
        ),
        AuthError::InsufficientPermissions => ErrorResponse::new(
            error_codes::FORBIDDEN,
            localized(lang, "Insufficient permissions", "Permissão insuficiente"),
        ),
        AuthError::PasswordHashing => internal(lang),
    }
}

fn token_body(error: &TokenError, lang: Language) -> ErrorResponse {
    match error {
        TokenError::TokenExpired => ErrorResponse::new(
            error_codes::TOKEN_EXPIRED,
            localized(lang, "Token has expired", "Token expirado"),
        ),
        TokenError::TokenGenerationFailed => internal(lang),
        _ => ErrorResponse::new(
            error_codes::TOKEN_INVALID,
            localized(lang, "Invalid token", "Token inválido"),
        ),
    }
}

fn rental_body(error: &RentalError, lang: Language) -> ErrorResponse {
    match error {
        RentalError::VehicleUnavailable { vehicle_id } => ErrorResponse::new(
            error_codes::VEHICLE_UNAVAILABLE,
            localized(lang, "Vehicle is not available", "Veículo não está disponível"),
        )
        .add_detail("vehicle_id", vehicle_id),
        RentalError::IllegalTransition { from, to } => ErrorResponse::new(
            error_codes::ILLEGAL_TRANSITION,
            localized(
                lang,
                &format!("Cannot move a {} rental to {}", from, to),
                &format!("Não é possível alterar uma locação {} para {}", from, to),
            ),
        ),
        RentalError::InvalidDateRange => ErrorResponse::new(
            error_codes::INVALID_DATE_RANGE,
            localized(
                lang,
                "Return date must not be before pickup date",
                "A data de devolução não pode ser anterior à data de retirada",
            ),
        ),
        RentalError::HasActiveRentals => ErrorResponse::new(
            error_codes::HAS_ACTIVE_RENTALS,
            localized(lang, "User has active rentals", "Usuário possui locações ativas"),
        ),
        RentalError::VehicleInUse { vehicle_id } | RentalError::VehicleHasActiveRental { vehicle_id } => {
            ErrorResponse::new(
                error_codes::VEHICLE_IN_USE,
                localized(lang, "Vehicle is in use by rentals", "Veículo está em uso por locações"),
            )
            .add_detail("vehicle_id", vehicle_id)
        }
    }
}

fn validation_body(error: &ValidationError, lang: Language) -> ErrorResponse {
    match error {
        ValidationError::DuplicateValue { field } => {
            let code = match field.as_str() {
                "email" => error_codes::EMAIL_TAKEN,
                "national_id" => error_codes::NATIONAL_ID_TAKEN,
                "plate" => error_codes::PLATE_TAKEN,
                _ => error_codes::CONFLICT,
            };
            ErrorResponse::new(code, localized(lang, "Value already in use", "Valor já está em uso"))
                .add_detail("field", field)
        }
        ValidationError::RequiredField { field } => ErrorResponse::new(
            error_codes::VALIDATION_ERROR,
            localized(lang, "Required field is missing", "Campo obrigatório ausente"),
        )
        .add_detail("field", field),
        ValidationError::InvalidFormat { field } => ErrorResponse::new(
            error_codes::VALIDATION_ERROR,
            localized(lang, "Field has an invalid format", "Campo com formato inválido"),
        )
        .add_detail("field", field),
        ValidationError::InvalidLength { field, max, .. } => ErrorResponse::new(
            error_codes::VALIDATION_ERROR,
            localized(lang, "Field is too long", "Campo excede o tamanho máximo"),
        )
        .add_detail("field", field)
        .add_detail("max", max),
        ValidationError::OutOfRange { field } => ErrorResponse::new(
            error_codes::VALIDATION_ERROR,
            localized(lang, "Field is out of range", "Campo fora do intervalo permitido"),
        )
        .add_detail("field", field),
    }
}

fn domain_body(error: &DomainError, lang: Language) -> ErrorResponse {
    match error {
        DomainError::Auth(e) => auth_body(e, lang),
        DomainError::Token(e) => token_body(e, lang),
        DomainError::Rental(e) => rental_body(e, lang),
        DomainError::ValidationErr(e) => validation_body(e, lang),
        DomainError::Validation { message } => ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone()),
        DomainError::BusinessRule { message } => ErrorResponse::new(error_codes::CONFLICT, message.clone()),
        DomainError::NotFound { resource } => ErrorResponse::new(
            error_codes::NOT_FOUND,
            localized(lang, "Resource not found", "Recurso não encontrado"),
        )
        .add_detail("resource", resource),
        DomainError::Unauthorized => ErrorResponse::new(
            error_codes::UNAUTHORIZED,
            localized(lang, "Authentication required", "Autenticação necessária"),
        ),
        DomainError::Internal { .. } => internal(lang),
    }
}

/// Handle domain errors with language support
pub fn handle_domain_error_with_lang(error: &DomainError, lang: Language) -> HttpResponse {
    let kind = error.kind();
    match kind {
        ErrorKind::Internal => tracing::error!(error = %error, "Request failed"),
        _ => tracing::debug!(error = %error, ?kind, "Request refused"),
    }

    HttpResponse::build(status_for(kind)).json(domain_body(error, lang))
}

/// Response for a request the authorization policy refused
pub fn handle_denied(reason: DenyReason, lang: Language) -> HttpResponse {
    match reason {
        DenyReason::Unauthenticated => HttpResponse::Unauthorized().json(ErrorResponse::new(
            error_codes::UNAUTHORIZED,
            localized(lang, "Authentication required", "Autenticação necessária"),
        )),
        DenyReason::Forbidden => HttpResponse::Forbidden().json(ErrorResponse::new(
            error_codes::FORBIDDEN,
            localized(lang, "Access denied", "Acesso negado"),
        )),
    }
}

/// 400 response for request bodies that failed `validator` checks
pub fn handle_validation_errors(errors: &validator::ValidationErrors, lang: Language) -> HttpResponse {
    let mut fields: Vec<&str> = errors.field_errors().keys().copied().collect();
    fields.sort_unstable();

    HttpResponse::BadRequest().json(
        ErrorResponse::new(
            error_codes::VALIDATION_ERROR,
            localized(lang, "Request validation failed", "Falha na validação da requisição"),
        )
        .add_detail("fields", fields),
    )
}

/// 400 response for payloads, paths or queries that could not be parsed
pub fn handle_malformed_request(reason: &str, lang: Language) -> HttpResponse {
    HttpResponse::BadRequest().json(
        ErrorResponse::new(
            error_codes::BAD_REQUEST,
            localized(lang, "Malformed request", "Requisição malformada"),
        )
        .add_detail("reason", reason),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use uuid::Uuid;

    #[test]
    fn test_extract_language_prefers_first_supported_tag() {
        let req = TestRequest::default()
            .insert_header((header::ACCEPT_LANGUAGE, "pt-BR,pt;q=0.9,en;q=0.8"))
            .to_http_request();
        assert_eq!(extract_language(&req), Language::Portuguese);

        let req = TestRequest::default().to_http_request();
        assert_eq!(extract_language(&req), Language::English);
    }

    #[test]
    fn test_kinds_map_to_status_codes() {
        let cases = [
            (DomainError::from(AuthError::InvalidCredentials), StatusCode::UNAUTHORIZED),
            (DomainError::from(AuthError::AccountInactive), StatusCode::FORBIDDEN),
            (DomainError::not_found("rental"), StatusCode::NOT_FOUND),
            (
                DomainError::from(RentalError::VehicleUnavailable { vehicle_id: Uuid::nil() }),
                StatusCode::CONFLICT,
            ),
            (DomainError::from(RentalError::InvalidDateRange), StatusCode::BAD_REQUEST),
            (DomainError::internal("db down"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, status) in cases {
            assert_eq!(handle_domain_error_with_lang(&error, Language::English).status(), status);
        }
    }

    #[test]
    fn test_duplicate_field_selects_specific_code() {
        let error = ValidationError::DuplicateValue {
            field: "plate".to_string(),
        };
        let body = validation_body(&error, Language::English);
        assert_eq!(body.error, error_codes::PLATE_TAKEN);
    }

    #[test]
    fn test_internal_message_does_not_leak_details() {
        let body = domain_body(&DomainError::internal("connection refused"), Language::Portuguese);
        assert_eq!(body.error, error_codes::INTERNAL_ERROR);
        assert!(!body.message.contains("connection"));
        assert_eq!(body.message, "Ocorreu um erro interno");
    }
}
