use crate::checkout::form::{SAVED_MESSAGE, SAVE_FAILED_MESSAGE};
use crate::checkout::{CheckoutForm, PaymentInstructions};
use crate::error::{AppError, AppResult};
use crate::web::pages::IndexPage;
use crate::web::state::AppState;
use askama::Template;
use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use habitpro_types::{ContactSubmission, Notice};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Response of the JSON checkout endpoint
#[derive(Serialize)]
pub struct CheckoutResponse {
    pub notice: Notice,
    pub payment: PaymentInstructions,
}

/// Body returned when the contact could not be saved
#[derive(Serialize)]
pub struct CheckoutFailure {
    pub notice: Notice,
}

fn render_page(form: &CheckoutForm, state: &AppState) -> AppResult<Html<String>> {
    let page = IndexPage::new(form, &state.payment);
    Ok(Html(page.render()?))
}

/// Serve the landing page with an empty form
pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    render_page(&CheckoutForm::new(), &state)
}

/// Handle the HTML form post and re-render the page in its new state
pub async fn checkout(
    State(state): State<AppState>,
    Form(input): Form<ContactSubmission>,
) -> AppResult<Response> {
    let mut form = CheckoutForm::with_values(input.email, input.mobile);

    let status = match form.submit_to(state.store.as_deref()).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            warn!("Checkout not completed: {}", e);
            e.status_code()
        }
    };

    let page = render_page(&form, &state)?;
    Ok((status, page).into_response())
}

/// JSON variant of the checkout for script clients
pub async fn save_contact(
    State(state): State<AppState>,
    Json(input): Json<ContactSubmission>,
) -> AppResult<Response> {
    let mut form = CheckoutForm::with_values(input.email, input.mobile);

    match form.submit_to(state.store.as_deref()).await {
        Ok(()) => {}
        // The visitor sees the form's notice, not the backend's error text
        Err(e @ (AppError::Store(_) | AppError::StoreUnavailable)) => {
            warn!("Checkout not completed: {}", e);
            let notice = form
                .notices()
                .last()
                .cloned()
                .unwrap_or_else(|| Notice::error(SAVE_FAILED_MESSAGE));
            return Ok((e.status_code(), Json(CheckoutFailure { notice })).into_response());
        }
        Err(e) => return Err(e),
    }

    let notice = form
        .notices()
        .last()
        .cloned()
        .unwrap_or_else(|| Notice::success(SAVED_MESSAGE));

    Ok(Json(CheckoutResponse {
        notice,
        payment: PaymentInstructions::new(&state.payment, &form.submission().email),
    })
    .into_response())
}

/// Create the web router
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/checkout", post(checkout))
        .route("/api/contacts", post(save_contact))
        .with_state(state)
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
