//! Route authorization middleware.
//!
//! Evaluates the [`AuthorizationPolicy`] table for every request after the
//! access guard ran. A deny short-circuits with a JSON error before any
//! handler is reached.
//!
//! Rules are matched against the router's requoted path, not the raw URI, so
//! percent-encoded spellings of a segment resolve to the same rule as the
//! route they end up on.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use rent_core::services::authorization::{AuthorizationPolicy, Decision};
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use super::access_guard::AuthContext;
use crate::handlers::error::{extract_language, handle_denied};

/// Policy enforcement middleware factory
pub struct PolicyEnforcer {
    policy: Arc<AuthorizationPolicy>,
}

impl PolicyEnforcer {
    pub fn new(policy: Arc<AuthorizationPolicy>) -> Self {
        Self { policy }
    }
}

impl<S, B> Transform<S, ServiceRequest> for PolicyEnforcer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = PolicyEnforcerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(PolicyEnforcerMiddleware {
            service: Rc::new(service),
            policy: Arc::clone(&self.policy),
        }))
    }
}

pub struct PolicyEnforcerMiddleware<S> {
    service: Rc<S>,
    policy: Arc<AuthorizationPolicy>,
}

impl<S, B> Service<ServiceRequest> for PolicyEnforcerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let path = req.match_info().as_str().to_owned();
        let decision = {
            let extensions = req.extensions();
            let identity = extensions.get::<AuthContext>().map(|ctx| &ctx.identity);
            self.policy.evaluate(req.method().as_str(), &path, identity)
        };

        if let Decision::Deny(reason) = decision {
            tracing::debug!(
                method = %req.method(),
                path = %path,
                ?reason,
                "Request denied by authorization policy"
            );
            let lang = extract_language(req.request());
            let response = handle_denied(reason, lang);
            return Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) });
        }

        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
