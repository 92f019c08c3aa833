use crate::{
    auth::{
        generate_token, AuthResponse, ForgotPasswordRequest, Identity, LoginRequest,
        RegisterRequest, ResetPasswordRequest,
    },
    config::Config,
    error::AppError,
    store::UserStore,
};
use actix_web::{get, patch, post, web, HttpResponse, Responder};
use log::info;
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

const RESET_REQUEST_MESSAGE: &str =
    "If a user with that email exists, a password reset link will be sent.";

/// Register a new user
///
/// Creates a new user account and returns its public profile. The password
/// is hashed by the credential store; it is never echoed back.
#[post("/signup")]
pub async fn signup(
    pool: web::Data<PgPool>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    register_data.validate()?;

    let role = register_data.role.unwrap_or_default();
    let user = UserStore::new(&pool)
        .create(
            &register_data.name,
            &register_data.email,
            &register_data.password,
            role,
        )
        .await?;

    Ok(HttpResponse::Created().json(json!({
        "status": "success",
        "data": { "user": user }
    })))
}

/// Login user
///
/// Authenticates a user and returns an authentication token plus profile.
#[post("/signin")]
pub async fn signin(
    pool: web::Data<PgPool>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    login_data.validate()?;

    let user = UserStore::new(&pool)
        .verify_credentials(&login_data.email, &login_data.password)
        .await?;

    let token = generate_token(user.id, user.role)?;
    info!("user logged in: {}", user.id);

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "data": AuthResponse {
            token,
            user: user.profile(),
        }
    })))
}

/// Request a password reset token.
///
/// Always answers with the same generic success, whether or not the email is
/// known, so the endpoint cannot be used to enumerate accounts. Outside
/// production the freshly issued token is included for testing, standing in
/// for out-of-band delivery.
#[post("/forgot-password")]
pub async fn forgot_password(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    body: web::Json<ForgotPasswordRequest>,
) -> Result<impl Responder, AppError> {
    body.validate()?;

    let token = UserStore::new(&pool)
        .request_password_reset(&body.email)
        .await?;

    let mut response = json!({
        "status": "success",
        "message": RESET_REQUEST_MESSAGE
    });

    if !config.is_production() {
        if let Some(token) = token {
            response["dev_only"] = json!({ "reset_token": token });
        }
    }

    Ok(HttpResponse::Ok().json(response))
}

/// Complete a password reset with the token from the reset link.
#[patch("/reset-password/{token}")]
pub async fn reset_password(
    pool: web::Data<PgPool>,
    token: web::Path<String>,
    body: web::Json<ResetPasswordRequest>,
) -> Result<impl Responder, AppError> {
    body.validate()?;

    UserStore::new(&pool)
        .reset_password(&token, &body.password)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "Password reset successful"
    })))
}

/// Current user's profile, resolved from the bearer token.
#[get("/me")]
pub async fn me(pool: web::Data<PgPool>, identity: Identity) -> Result<impl Responder, AppError> {
    let user = UserStore::new(&pool).find_profile(identity.user_id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "data": { "user": user }
    })))
}
