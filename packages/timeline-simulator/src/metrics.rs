//! Per-game metrics written by the simulator.

use serde::Serialize;

use crate::simulator::GameResult;

/// Complete game metrics for output.
#[derive(Debug, Clone, Serialize)]
pub struct GameMetrics {
    pub game_id: u32,
    pub seed: u64,
    pub timestamp: String,
    pub config: GameConfig,
    pub result: GameResultMetrics,
    pub player_metrics: Vec<PlayerMetrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameConfig {
    pub players: usize,
    pub difficulty: String,
    pub hand_size: u8,
    pub strategies: Vec<String>,
    pub total_games: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameResultMetrics {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<usize>,
    pub timed_out: bool,
    pub turns: u32,
    pub timeline_len: usize,
    pub final_scores: Vec<i32>,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerMetrics {
    pub seat: usize,
    pub strategy: String,
    pub score: i32,
    pub correct: u32,
    pub incorrect: u32,
    pub accuracy_pct: f64,
    pub cards_left: usize,
}

/// Flat row for the CSV summary.
#[derive(Debug, Clone, Serialize)]
pub struct CsvSummaryRow {
    pub game_id: u32,
    pub seed: u64,
    pub winner: String,
    pub end_reason: String,
    pub turns: u32,
    pub scores: String,
    pub strategies: String,
}

impl From<&GameMetrics> for CsvSummaryRow {
    fn from(m: &GameMetrics) -> Self {
        Self {
            game_id: m.game_id,
            seed: m.seed,
            winner: m
                .result
                .winner
                .map(|w| w.to_string())
                .unwrap_or_default(),
            end_reason: m.result.end_reason.clone().unwrap_or_default(),
            turns: m.result.turns,
            scores: m
                .result
                .final_scores
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(";"),
            strategies: m.config.strategies.join(";"),
        }
    }
}

fn wire_name<T: Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_owned))
        .unwrap_or_default()
}

pub fn build_game_metrics(
    game_id: u32,
    seed: u64,
    strategies: Vec<String>,
    total_games: u32,
    result: &GameResult,
    duration_ms: f64,
) -> GameMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));

    let view = &result.final_view;
    let player_metrics = view
        .seats
        .iter()
        .enumerate()
        .map(|(seat, public)| {
            let tally = result.tallies.get(seat).copied().unwrap_or_default();
            let placed = tally.correct + tally.incorrect;
            let accuracy_pct = if placed == 0 {
                0.0
            } else {
                tally.correct as f64 / placed as f64 * 100.0
            };
            PlayerMetrics {
                seat,
                strategy: strategies.get(seat).cloned().unwrap_or_default(),
                score: public.score,
                correct: tally.correct,
                incorrect: tally.incorrect,
                accuracy_pct,
                cards_left: public.hand_count,
            }
        })
        .collect();

    GameMetrics {
        game_id,
        seed,
        timestamp,
        config: GameConfig {
            players: view.seats.len(),
            difficulty: view.difficulty.to_string(),
            hand_size: view.hand_size,
            strategies,
            total_games,
        },
        result: GameResultMetrics {
            status: wire_name(&view.status),
            end_reason: view.end_reason.as_ref().map(wire_name),
            winner: result.winner_index,
            timed_out: result.timed_out,
            turns: result.turns,
            timeline_len: view.timeline.len(),
            final_scores: view.seats.iter().map(|s| s.score).collect(),
            duration_ms,
        },
        player_metrics,
    }
}
