//! Bracket routes - validation and generation

use axum::{extract::State, http::StatusCode, response::IntoResponse, response::Response, Json};
use serde::Deserialize;
use std::sync::Arc;

use lanedraft_core::{validate_bracket_pool, Player, PoolValidation};

use super::error_response;
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    pub players: Vec<Player>,
    pub num_teams: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketRequest {
    pub players: Vec<Player>,
    pub room_id: String,
    pub num_teams: usize,
}

pub async fn validate_pool(Json(req): Json<ValidateRequest>) -> Json<PoolValidation> {
    Json(validate_bracket_pool(&req.players, req.num_teams).into())
}

pub async fn generate_bracket(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<BracketRequest>,
) -> Response {
    if let Err(e) = validate_bracket_pool(&req.players, req.num_teams) {
        return error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string());
    }

    let mut matchmaker = state.matchmaker();
    let joined = tokio::task::spawn_blocking(move || {
        matchmaker.generate_bracket_match(&req.players, &req.room_id, req.num_teams)
    })
    .await;

    match joined {
        Ok(Some(result)) => {
            state.record(true);
            Json(result).into_response()
        }
        Ok(None) => {
            state.record(false);
            error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNABLE TO BALANCE TEAMS. Please check role distribution or add more flexible players.",
            )
        }
        Err(e) => {
            tracing::error!("Bracket generation task failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Generation task failed")
        }
    }
}
