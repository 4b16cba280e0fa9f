//! Two-team match route

use axum::{extract::State, http::StatusCode, response::IntoResponse, response::Response, Json};
use serde::Deserialize;
use std::sync::Arc;

use lanedraft_core::matchup::required_players;
use lanedraft_core::{Player, PlayerPool};

use super::error_response;
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    pub players: Vec<Player>,
    pub room_id: String,
    #[serde(default)]
    pub is_coach_mode: bool,
}

pub async fn generate_match(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<MatchRequest>,
) -> Response {
    let required = required_players(req.is_coach_mode);
    let available = PlayerPool::new(&req.players).len();
    if available < required {
        return error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("INSUFFICIENT PLAYERS: Need {} active players.", required),
        );
    }

    let mut matchmaker = state.matchmaker();
    let joined = tokio::task::spawn_blocking(move || {
        matchmaker.generate_match(&req.players, &req.room_id, req.is_coach_mode)
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
                "IMPOSSIBLE COMPOSITION. Too many constrained roles.",
            )
        }
        Err(e) => {
            tracing::error!("Match generation task failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Generation task failed")
        }
    }
}
