use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::ResponseError,
    http::Method,
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;

use crate::auth::token::verify_token;
use crate::error::AppError;
use crate::state::AppState;
use crate::store::Store;

/// Gate between anonymous and identified requests.
///
/// Every request under `/api` must carry a valid token in the `x-auth-token`
/// header, except the two public user endpoints (register and login). On
/// success the token's subject id is inserted into the request extensions
/// for the [`AuthenticatedUser`](crate::auth::extractors::AuthenticatedUser)
/// extractor; otherwise the request is rejected before reaching any handler.
///
/// The middleware does not normally check that the subject still exists in
/// the store, so a deleted user's token stays valid until it expires. Setting
/// `CHECK_TOKEN_SUBJECT=true` turns on that existence check.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Registration and login are the only public routes under /api.
        let path = req.path();
        let public = (path == "/api/user" || path == "/api/user/") && req.method() == Method::POST
            || path == "/api/user/login";

        let token = req
            .headers()
            .get("x-auth-token")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let service = Rc::clone(&self.service);
        Box::pin(async move {
            // Rejections are rendered here rather than propagated as errors,
            // so the response body shape stays under AppError's control.
            let reject = |req: ServiceRequest, error: AppError| {
                Ok(req
                    .into_response(error.error_response())
                    .map_into_right_body())
            };

            if public {
                return service
                    .call(req)
                    .await
                    .map(ServiceResponse::map_into_left_body);
            }

            let token = match token {
                Some(token) => token,
                None => {
                    return reject(
                        req,
                        AppError::Unauthorized("No token, authorization denied".into()),
                    )
                }
            };

            let claims = match verify_token(&token) {
                Ok(claims) => claims,
                // A missing signing secret is a server fault, not a bad token.
                Err(err @ AppError::Internal(_)) => {
                    log::error!("token verification unavailable: {}", err);
                    return reject(req, err);
                }
                Err(err) => {
                    log::warn!("rejected token: {}", err);
                    return reject(req, AppError::Unauthorized("Token is not valid".into()));
                }
            };

            if let Some(state) = req.app_data::<web::Data<AppState>>() {
                if state.check_token_subject {
                    match state.store.find_user_by_id(&claims.user.id).await {
                        Ok(Some(_)) => {}
                        Ok(None) => {
                            log::warn!("token subject {} no longer exists", claims.user.id);
                            return reject(
                                req,
                                AppError::Unauthorized("Token is not valid".into()),
                            );
                        }
                        Err(err) => {
                            log::error!("subject lookup failed: {}", err);
                            return reject(req, AppError::Internal(err.to_string()));
                        }
                    }
                }
            }

            req.extensions_mut().insert(claims.user.id.clone());
            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}
