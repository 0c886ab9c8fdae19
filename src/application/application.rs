use super::{ApplicationMiddleware, ApplicationState};
use crate::routing::routing;
use axum::{extract::DefaultBodyLimit, Router};

pub fn create_application(
    application_state: ApplicationState,
    application_middleware: ApplicationMiddleware,
) -> Router {
    // Body size is bounded by RequestBodyLimitLayer, not axum's 2MB default
    routing()
        .with_state(application_state)
        .layer(DefaultBodyLimit::disable())
        .layer(application_middleware.body_limit)
        .layer(application_middleware.trace)
}
