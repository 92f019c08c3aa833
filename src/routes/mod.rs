pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::web;

/// Registers every route under the `/api` scope. The caller wraps the scope
/// with `AuthMiddleware`; public endpoints are on its skip list.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health::health)
        .service(
            web::scope("/auth")
                .service(auth::signup)
                .service(auth::signin)
                .service(auth::forgot_password)
                .service(auth::reset_password)
                .service(auth::me),
        )
        .service(
            web::scope("/tasks")
                .service(tasks::list_tasks)
                .service(tasks::create_task)
                .service(tasks::toggle_task_status)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        );
}
