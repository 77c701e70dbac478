//! HTTP boundary of the accounts platform

pub mod api;
pub mod error;
pub mod config;

use std::sync::Arc;

use account_service::{AccountService, PostgresAccountRepository, RepositoryType};
use axum::{
    body::Body,
    http::Request,
    routing::{delete, get},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{info, info_span, Level, Span};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    account::{create_account, delete_account, list_accounts},
    health::health,
};
use crate::config::AppConfig;

/// API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        api::account::list_accounts,
        api::account::create_account,
        api::account::delete_account,
        api::health::health,
    ),
    components(
        schemas(
            api::account::CreateAccountRequest,
            api::health::HealthResponse,
            common::model::AccountDto,
            common::model::Currency,
        )
    ),
    tags(
        (name = "account", description = "Account management endpoints"),
        (name = "health", description = "Service health")
    ),
    info(
        title = "MyFinance API",
        version = "1.0.0",
        description = "API for listing, creating and deleting financial accounts"
    )
)]
pub struct ApiDoc;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// App state shared across handlers
pub struct AppState {
    /// Account service
    pub account_service: Arc<AccountService>,
}

impl AppState {
    pub fn new(account_service: AccountService) -> Self {
        Self {
            account_service: Arc::new(account_service),
        }
    }

    /// Build the state from configuration, connecting to PostgreSQL when configured
    pub async fn from_config(config: &AppConfig) -> common::Result<Self> {
        let service = match &config.database_url {
            Some(url) if !config.in_memory() => {
                info!("Using PostgreSQL account repository");
                let service_config = account_service::AccountServiceConfig {
                    database_url: url.clone(),
                    db_pool_size: config.db_pool_size,
                    ..Default::default()
                };
                let repo = PostgresAccountRepository::with_config(&service_config).await?;
                AccountService::new(Arc::new(repo))
            }
            _ => {
                info!("Using in-memory account repository");
                AccountService::with_repository(RepositoryType::InMemory).await?
            }
        };

        Ok(Self::new(service))
    }
}

/// Request span carrying the ID assigned by `SetRequestIdLayer`
fn request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");

    info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

/// Build the application router with all routes and middleware
pub fn app(state: Arc<AppState>) -> Router {
    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/account", get(list_accounts).post(create_account))
        .route("/account/:id", delete(delete_account));

    let swagger_ui = SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health))
        .merge(swagger_ui)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
