pub mod access_handler;
pub mod payment_handler;
pub mod quiz_handler;
pub mod user_handler;

use actix_web::web;

pub use access_handler::unlock_access;
pub use payment_handler::payment_webhook;
pub use quiz_handler::{get_quiz, list_attempts, submit_quiz};
pub use user_handler::{
    get_current_user, health_check, health_check_live, health_check_ready, register_user,
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(health_check_live)
        .service(health_check_ready)
        .service(register_user)
        .service(get_current_user)
        .service(get_quiz)
        .service(submit_quiz)
        .service(list_attempts)
        .service(unlock_access)
        .service(payment_webhook);
}
