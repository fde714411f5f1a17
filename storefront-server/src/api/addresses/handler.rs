//! Address API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Address, AddressCreate, AddressUpdate};
use crate::db::repository::AddressRepository;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_required_text,
};
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

fn validate_create(payload: &AddressCreate) -> AppResult<()> {
    validate_required_text(&payload.first_name, "first_name", MAX_NAME_LEN)?;
    validate_required_text(&payload.last_name, "last_name", MAX_NAME_LEN)?;
    validate_required_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_required_text(&payload.pincode, "pincode", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.city, "city", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.state, "state", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.phone_number, "phone_number", MAX_SHORT_TEXT_LEN)?;
    Ok(())
}

/// GET /api/addresses - the caller's address book
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Address>>> {
    let repo = AddressRepository::new(state.db.clone());
    let addresses = repo.find_by_user(&user.id).await?;
    Ok(Json(addresses))
}

/// GET /api/addresses/{id} - get one owned address
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Address>> {
    let repo = AddressRepository::new(state.db.clone());
    let address = repo
        .find_by_id_for_user(&id, &user.id)
        .await?
        .ok_or_else(|| AppError::not_found("Address not found"))?;
    Ok(Json(address))
}

/// POST /api/addresses - create an address
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<AddressCreate>,
) -> AppResult<Json<Address>> {
    validate_create(&payload)?;

    let repo = AddressRepository::new(state.db.clone());
    let address = repo.create(&user.id, payload).await?;
    Ok(Json(address))
}

/// PUT /api/addresses/{id} - update an owned address
///
/// Setting `is_primary: true` demotes the caller's other addresses.
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<AddressUpdate>,
) -> AppResult<Json<Address>> {
    let repo = AddressRepository::new(state.db.clone());
    let address = repo.update(&id, &user.id, payload).await?;
    Ok(Json(address))
}

/// DELETE /api/addresses/{id} - delete an owned address
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let repo = AddressRepository::new(state.db.clone());
    if !repo.delete(&id, &user.id).await? {
        return Err(AppError::not_found("Address not found"));
    }
    Ok(ok_with_message((), "Address deleted successfully"))
}
