use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::{PaginationParams, SubmitQuizRequest},
};

#[get("/api/quiz")]
async fn get_quiz(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let session = state.quiz_service.build_quiz(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(session))
}

#[post("/api/quiz")]
async fn submit_quiz(
    state: web::Data<AppState>,
    request: web::Json<SubmitQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let result = state
        .quiz_service
        .submit_quiz(auth.user_id(), &request.session_id, &request.answers)
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

#[get("/api/attempts")]
async fn list_attempts(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let pagination = query.into_inner();
    pagination.validate()?;

    let page = state
        .quiz_service
        .list_attempts(auth.user_id(), pagination.offset(), pagination.limit())
        .await?;
    Ok(HttpResponse::Ok().json(page))
}
