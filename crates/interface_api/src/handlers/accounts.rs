//! Account handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use core_kernel::AccountId;

use crate::dto::account::{AccountRequest, AccountResponse, AddressResponse};
use crate::{error::ApiError, AppState};

fn parse_body(payload: Result<Json<AccountRequest>, JsonRejection>) -> Result<AccountRequest, ApiError> {
    payload
        .map(|Json(request)| request)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// Creates an account with its addresses
pub async fn create_account(
    State(state): State<AppState>,
    payload: Result<Json<AccountRequest>, JsonRejection>,
) -> Result<Json<AccountResponse>, ApiError> {
    let request = parse_body(payload)?;
    let created = state.service.create(request.into()).await?;
    Ok(Json(created.into()))
}

/// Updates names, email and addresses of an account
pub async fn update_account(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<AccountRequest>, JsonRejection>,
) -> Result<Json<AccountResponse>, ApiError> {
    let request = parse_body(payload)?;
    let updated = state.service.update(AccountId::new(id), request.into()).await?;
    Ok(Json(updated.into()))
}

/// Deletes an account; always accepted
pub async fn delete_account(State(state): State<AppState>, Path(id): Path<i64>) -> StatusCode {
    state.service.delete(AccountId::new(id)).await;
    StatusCode::ACCEPTED
}

/// Gets an account by ID
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AccountResponse>, ApiError> {
    let account = state.service.find_by_id(AccountId::new(id)).await?;
    Ok(Json(account.into()))
}

/// Gets an account by its reference ID
pub async fn get_account_by_ref(
    State(state): State<AppState>,
    Path(account_ref_id): Path<String>,
) -> Result<Json<AccountResponse>, ApiError> {
    let account = state.service.find_by_account_ref_id(&account_ref_id).await?;
    Ok(Json(account.into()))
}

/// Lists accounts
pub async fn list_accounts(State(state): State<AppState>) -> Result<Json<Vec<AccountResponse>>, ApiError> {
    let accounts = state.service.find_all().await?;
    Ok(Json(accounts.into_iter().map(AccountResponse::from).collect()))
}

/// Lists the addresses of an account
pub async fn list_addresses(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<AddressResponse>>, ApiError> {
    let addresses = state.service.find_all_addresses_for_account(AccountId::new(id)).await?;
    Ok(Json(addresses.into_iter().map(AddressResponse::from).collect()))
}
