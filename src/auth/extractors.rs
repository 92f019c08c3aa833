use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::auth::token::Claims;
use crate::error::AppError;
use crate::models::Role;

/// The authenticated caller: the `(subject id, role)` pair recovered from a
/// verified token by `AuthMiddleware`.
///
/// This extractor is intended to be used on routes protected by the
/// middleware, which validates the JWT and inserts the decoded claims into
/// request extensions. If no claims are present (middleware not applied or a
/// wiring error), extraction fails with `AppError::Unauthenticated`.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: Role,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl FromRequest for Identity {
    type Error = ActixError; // AppError is converted into ActixError via ResponseError
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(Identity {
                user_id: claims.sub,
                role: claims.role,
            })),
            None => {
                // Only reachable if a protected route was registered outside
                // the AuthMiddleware scope.
                let err = AppError::Unauthenticated(
                    "Identity not found in request. Ensure AuthMiddleware is active.".to_string(),
                );
                ready(Err(err.into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::dev::Payload;
    use actix_web::http::StatusCode;
    use actix_web::test;

    #[actix_rt::test]
    async fn test_identity_extractor_success() {
        let req = test::TestRequest::default().to_http_request();
        let user_id = Uuid::new_v4();
        req.extensions_mut().insert(Claims {
            sub: user_id,
            role: Role::Admin,
            iat: 0,
            exp: usize::MAX,
        });

        let mut payload = Payload::None;
        let identity = Identity::from_request(&req, &mut payload).await.unwrap();
        assert_eq!(identity.user_id, user_id);
        assert!(identity.is_admin());
    }

    #[actix_rt::test]
    async fn test_identity_extractor_failure() {
        let req = test::TestRequest::default().to_http_request();
        // No claims inserted into extensions

        let mut payload = Payload::None;
        let result = Identity::from_request(&req, &mut payload).await;
        assert!(result.is_err());

        let err = result.unwrap_err();
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
