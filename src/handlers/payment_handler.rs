use actix_web::{post, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState, errors::AppError, middleware::get_request_id,
    services::payment_verifier::SIGNATURE_HEADER,
};

/// Receives payment provider events. The raw body is needed for signature
/// verification, so it is taken as bytes rather than JSON.
#[post("/webhook")]
async fn payment_webhook(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let signature = req
        .headers()
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    let event = state
        .payment_verifier
        .verify(&body, signature)
        .inspect_err(|e| {
            log::warn!(
                "Rejected payment webhook (request {}): {}",
                get_request_id(&req).unwrap_or_default(),
                e
            )
        })?;

    let outcome = state.access_service.apply_payment_event(&event).await?;
    log::info!(
        "Payment event {} ({}) handled: {:?}",
        event.event_id.as_deref().unwrap_or("-"),
        event.event_type,
        outcome
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "received": true,
        "outcome": outcome
    })))
}
