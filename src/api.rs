//! HTTP binding for the [`QueryFacade`].
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /get_balance?address=` | [`QueryFacade::get_balance`] |
//! | `POST /get_balance_batch` | [`QueryFacade::get_balance_batch`] |
//! | `GET /get_top?n=` | [`QueryFacade::get_top`] |
//! | `GET /get_top_with_transactions?n=` | [`QueryFacade::get_top_with_transactions`] |
//! | `GET /get_token_info` | [`QueryFacade::get_token_info`] |
//!
//! Query failures are `400 Bad Request` with `{"detail": "<message>"}`.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower::Service;
use tracing::{info, warn};

use crate::chain::TokenContract;
use crate::errors::ExplorerError;
use crate::explorer::{TokenTransfer, TransferQuery};
use crate::facade::{
    BalanceBatchRequest, BalanceResponse, BalancesResponse, FacadeError, QueryFacade, TopResponse,
};
use crate::types::holders::{EnrichedHolderRecord, HolderRecord};
use crate::types::metadata::TokenMetadata;

type SharedFacade<C, S> = Arc<QueryFacade<C, S>>;

#[derive(Debug, Deserialize)]
struct AddressParams {
    address: String,
}

#[derive(Debug, Deserialize)]
struct TopParams {
    n: usize,
}

/// A facade error rendered as `400 {"detail": ...}`.
#[derive(Debug)]
pub struct ApiError(FacadeError);

impl From<FacadeError> for ApiError {
    fn from(err: FacadeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = self.0.to_string();
        warn!(error = %detail, "Request failed");
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "detail": detail })),
        )
            .into_response()
    }
}

/// Build the router for `facade`.
pub fn router<C, S>(facade: SharedFacade<C, S>) -> Router
where
    C: TokenContract + 'static,
    S: Service<TransferQuery, Response = Vec<TokenTransfer>, Error = ExplorerError>
        + Clone
        + Send
        + Sync
        + 'static,
    S::Future: Send,
{
    Router::new()
        .route("/get_balance", get(get_balance::<C, S>))
        .route("/get_balance_batch", post(get_balance_batch::<C, S>))
        .route("/get_top", get(get_top::<C, S>))
        .route(
            "/get_top_with_transactions",
            get(get_top_with_transactions::<C, S>),
        )
        .route("/get_token_info", get(get_token_info::<C, S>))
        .with_state(facade)
}

async fn get_balance<C, S>(
    State(facade): State<SharedFacade<C, S>>,
    Query(params): Query<AddressParams>,
) -> Result<Json<BalanceResponse>, ApiError>
where
    C: TokenContract + 'static,
    S: Service<TransferQuery, Response = Vec<TokenTransfer>, Error = ExplorerError>
        + Clone
        + Send
        + Sync
        + 'static,
    S::Future: Send,
{
    info!(address = %params.address, "Received balance request");
    Ok(Json(facade.get_balance(&params.address).await?))
}

async fn get_balance_batch<C, S>(
    State(facade): State<SharedFacade<C, S>>,
    Json(request): Json<BalanceBatchRequest>,
) -> Result<Json<BalancesResponse>, ApiError>
where
    C: TokenContract + 'static,
    S: Service<TransferQuery, Response = Vec<TokenTransfer>, Error = ExplorerError>
        + Clone
        + Send
        + Sync
        + 'static,
    S::Future: Send,
{
    info!(count = request.addresses.len(), "Received balance batch request");
    Ok(Json(facade.get_balance_batch(&request).await?))
}

async fn get_top<C, S>(
    State(facade): State<SharedFacade<C, S>>,
    Query(params): Query<TopParams>,
) -> Result<Json<TopResponse<HolderRecord>>, ApiError>
where
    C: TokenContract + 'static,
    S: Service<TransferQuery, Response = Vec<TokenTransfer>, Error = ExplorerError>
        + Clone
        + Send
        + Sync
        + 'static,
    S::Future: Send,
{
    info!(n = params.n, "Received top holders request");
    Ok(Json(facade.get_top(params.n).await?))
}

async fn get_top_with_transactions<C, S>(
    State(facade): State<SharedFacade<C, S>>,
    Query(params): Query<TopParams>,
) -> Result<Json<TopResponse<EnrichedHolderRecord>>, ApiError>
where
    C: TokenContract + 'static,
    S: Service<TransferQuery, Response = Vec<TokenTransfer>, Error = ExplorerError>
        + Clone
        + Send
        + Sync
        + 'static,
    S::Future: Send,
{
    info!(n = params.n, "Received top holders with activity request");
    Ok(Json(facade.get_top_with_transactions(params.n).await?))
}

async fn get_token_info<C, S>(
    State(facade): State<SharedFacade<C, S>>,
) -> Result<Json<TokenMetadata>, ApiError>
where
    C: TokenContract + 'static,
    S: Service<TransferQuery, Response = Vec<TokenTransfer>, Error = ExplorerError>
        + Clone
        + Send
        + Sync
        + 'static,
    S::Future: Send,
{
    Ok(Json(facade.get_token_info().await?))
}

/// Starts the API server.
pub async fn serve_api(listener: TcpListener, app: Router) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;

    info!(address = ?addr, "Starting server");

    axum::serve(listener, app).await?;

    Ok(())
}
