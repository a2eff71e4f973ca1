use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState, auth::AuthenticatedUser, errors::AppError,
    models::dto::request::UnlockRequest,
};

/// A wrong code is not an error: the response simply reports `unlocked: false`.
#[post("/api/access/unlock")]
async fn unlock_access(
    state: web::Data<AppState>,
    request: web::Json<UnlockRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let response = state
        .access_service
        .unlock(auth.user_id(), &request.code)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}
