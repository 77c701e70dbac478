//! Account API handlers
//!
//! Handles endpoints related to account management:
//! - List accounts with their balances
//! - Create account
//! - Delete account

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use common::decimal::Money;
use common::model::{AccountDto, AccountId, Currency};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::response::{ApiListResponse, ApiResponse};
use crate::error::ApiError;
use crate::AppState;

/// Create account request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAccountRequest {
    /// Account name, must not be blank
    pub name: String,
    /// Optional external identifier
    #[serde(default)]
    pub identifier: Option<String>,
    /// Account currency
    pub currency: Currency,
    /// Initial balance as a decimal string, any sign
    #[serde(with = "rust_decimal::serde::str")]
    #[schema(value_type = String, example = "100.00")]
    pub balance: Money,
}

impl CreateAccountRequest {
    /// Check the request before it reaches the account service
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(common::Error::ValidationError("Account name is required".to_string()).into());
        }

        Ok(())
    }
}

/// List all accounts
#[utoipa::path(
    get,
    path = "/api/account",
    responses(
        (status = 200, description = "Accounts with their current balances"),
        (status = 500, description = "Internal server error")
    ),
    tag = "account"
)]
pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
) -> Result<ApiListResponse<AccountDto>, ApiError> {
    let accounts = state.account_service.list_accounts().await?;

    Ok(ApiListResponse::new(accounts))
}

/// Create a new account
#[utoipa::path(
    post,
    path = "/api/account",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account successfully created"),
        (status = 400, description = "Validation failed"),
        (status = 422, description = "Malformed request body"),
        (status = 500, description = "Internal server error")
    ),
    tag = "account"
)]
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let account = state
        .account_service
        .create_account(
            &request.name,
            request.identifier.as_deref(),
            request.currency,
            request.balance,
        )
        .await?;

    let location = format!("/api/account?id={}", account.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        ApiResponse::new(account),
    ))
}

/// Delete an account by ID
#[utoipa::path(
    delete,
    path = "/api/account/{id}",
    params(
        ("id" = i32, Path, description = "Account ID")
    ),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 404, description = "Account not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "account"
)]
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<AccountId>,
) -> Result<StatusCode, ApiError> {
    if state.account_service.delete_account(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Account not found: {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_rejects_blank_name() {
        let request = CreateAccountRequest {
            name: "   ".to_string(),
            identifier: None,
            currency: Currency::USD,
            balance: dec!(1),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_deserialize_without_identifier() {
        let request: CreateAccountRequest =
            serde_json::from_str(r#"{"name":"Cash","currency":"EUR","balance":"12.50"}"#).unwrap();

        assert!(request.validate().is_ok());
        assert_eq!(request.identifier, None);
        assert_eq!(request.currency, Currency::EUR);
        assert_eq!(request.balance, dec!(12.50));
    }

    #[test]
    fn test_numeric_balance_is_rejected() {
        let result = serde_json::from_str::<CreateAccountRequest>(
            r#"{"name":"Cash","currency":"EUR","balance":12345678901234567.89}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_string_balance_keeps_every_digit() {
        let request: CreateAccountRequest = serde_json::from_str(
            r#"{"name":"Cash","currency":"EUR","balance":"12345678901234567.89"}"#,
        )
        .unwrap();
        assert_eq!(request.balance, dec!(12345678901234567.89));
    }
}
