use crate::registry::RoomStats;
use crate::signaling::RelayState;
use crate::signaling::router::now_ms;
use axum::Json;
use axum::extract::State;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub room_count: usize,
    pub timestamp: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_rooms: usize,
    pub rooms: Vec<RoomStats>,
}

pub async fn health_handler(State(state): State<RelayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        room_count: state.registry.room_count(),
        timestamp: now_ms(),
    })
}

pub async fn stats_handler(State(state): State<RelayState>) -> Json<StatsResponse> {
    let rooms = state.registry.stats();
    Json(StatsResponse {
        total_rooms: rooms.len(),
        rooms,
    })
}
