//! Access-control guard applied to the `/api` scope.
//!
//! Requests to public paths pass straight through. Everything else must carry
//! `Authorization: Bearer <token>`: a missing header terminates the request
//! with 401, a token that fails verification with 403. On success the decoded
//! [`Claims`](crate::auth::token::Claims) are attached to the request
//! extensions for the [`Identity`](crate::auth::extractors::Identity)
//! extractor. The guard is stateless and has no side effects beyond rejecting
//! or forwarding.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::verify_token;
use crate::error::AppError;

/// Path prefixes that do not require authentication.
const PUBLIC_PREFIXES: [&str; 5] = [
    "/api/health",
    "/api/auth/signup",
    "/api/auth/signin",
    "/api/auth/forgot-password",
    "/api/auth/reset-password",
];

pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let path = req.path();
        if PUBLIC_PREFIXES.iter().any(|p| path.starts_with(p)) {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let bearer = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        match bearer {
            Some(token) => match verify_token(token) {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                    let fut = self.service.call(req);
                    Box::pin(fut)
                }
                // verify_token already classifies the failure (403 for a bad
                // token, 500 for missing server secret).
                Err(app_err) => Box::pin(async move { Err(app_err.into()) }),
            },
            None => {
                let app_err = AppError::Unauthenticated("Missing token".into());
                Box::pin(async move { Err(app_err.into()) })
            }
        }
    }
}
