use crate::cors;
use crate::error::VerificationServiceError;
use crate::metrics::{self, VerificationMetric};
use crate::service::{VerificationOutcome, VerificationRepo, VerificationService};
use crate::state::CertAppState;
use axum::body::Bytes;
use axum::middleware;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use certs_core::model::{CertificationId, Verdict};
use engine::error::EndpointError;
use requests::VerifyRequest;
use responses::VerdictResponse;
use tracing::{debug, info, instrument};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

mod api_doc;
mod requests;
mod responses;
#[cfg(test)]
mod tests;

pub const VERIFY_PATH: &str = "/verify-certification";
const METRICS_PATH: &str = "/metrics";

#[derive(OpenApi)]
#[openapi(
    paths(verify_certification),
    components(schemas(VerifyRequest, Verdict))
)]
struct ApiDoc;

pub fn build<R: VerificationRepo>(app_state: CertAppState<R>) -> Router {
    let cors_policy = app_state.cors.clone();

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(routes(app_state))
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        // outermost so preflights never reach the method router and every response,
        // including fallbacks, carries the headers
        .layer(middleware::from_fn_with_state(
            cors_policy,
            cors::handle_cors,
        ))
}

fn routes<S, R: VerificationRepo>(app_state: CertAppState<R>) -> OpenApiRouter<S> {
    let main_router = OpenApiRouter::new().route(VERIFY_PATH, post(verify_certification::<R>));

    let router = match app_state.metrics.clone() {
        Some(metrics_handle) => {
            info!("metrics enabled, setting up metrics handler");
            main_router
                .route(METRICS_PATH, get(|| async move { metrics_handle.render() }))
                .route_layer(middleware::from_fn(metrics::track_http))
        }
        None => {
            info!("metrics not enabled, setting up service unavailable metrics handler");
            main_router.route(METRICS_PATH, get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "Metrics endpoint is disabled. Metrics must be enabled and the service restarted")}))
        }
    };

    router.with_state(app_state)
}

/// Check whether a certification with the given id exists.
///
/// The body is parsed regardless of the request's content type. Not finding a
/// certification is still a successful lookup and answers 200.
#[utoipa::path(
    post,
    path = VERIFY_PATH,
    request_body = VerifyRequest,
    responses(
        (
            status = OK,
            description = "The lookup ran. `verified` says whether the certification exists",
            body = Verdict,
            examples(
                ("Found" = (value = json!(api_doc::examples::found()))),
                ("NotFound" = (value = json!(api_doc::examples::not_found()))),
            ),
        ),
        (
            status = BAD_REQUEST,
            description = "certificationId was missing or empty, or the body was not a JSON object",
            body = Verdict,
            example = json!(api_doc::examples::id_required()),
        ),
        (
            status = INTERNAL_SERVER_ERROR,
            description = "The certification store could not be queried",
            body = Verdict,
            example = json!(api_doc::examples::lookup_error()),
        ),
    )
)]
#[instrument(skip_all, err(Debug))]
pub async fn verify_certification<R>(
    State(service): State<VerificationService<R>>,
    body: Bytes,
) -> Result<Response, EndpointError<VerificationServiceError>>
where
    R: VerificationRepo,
{
    let request = match parse_request(&body) {
        Ok(request) => request,
        Err(e) => {
            debug!("rejecting unreadable verification request: {e}");
            metrics::increment_verifications(VerificationMetric::Invalid);
            return Ok(VerdictResponse::invalid_body().into_response());
        }
    };

    let Some(id) = request
        .certification_id
        .and_then(|id| CertificationId::new(id).ok())
    else {
        metrics::increment_verifications(VerificationMetric::Invalid);
        return Ok(VerdictResponse::id_required().into_response());
    };

    let outcome = service
        .verify(id)
        .await
        .inspect_err(|_| metrics::increment_verifications(VerificationMetric::Error))?;

    let res = match outcome {
        VerificationOutcome::Verified => {
            metrics::increment_verifications(VerificationMetric::Verified);
            VerdictResponse::verified()
        }
        VerificationOutcome::NotFound => {
            metrics::increment_verifications(VerificationMetric::NotFound);
            VerdictResponse::not_found()
        }
    };

    Ok(res.into_response())
}

// derived Deserialize also accepts a struct written as a sequence, so the object
// shape is checked on the raw value first
fn parse_request(body: &[u8]) -> Result<VerifyRequest, serde_json::Error> {
    let value = serde_json::from_slice::<serde_json::Value>(body)?;
    if !value.is_object() {
        return Err(serde::de::Error::custom("request body is not a JSON object"));
    }

    serde_json::from_value(value)
}
