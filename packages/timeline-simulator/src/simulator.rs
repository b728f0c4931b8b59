//! Drives whole games through the public session service.

use rand::rngs::StdRng;
use rand::SeedableRng;
use timeline_backend::domain::snapshot::SessionView;
use timeline_backend::domain::{Difficulty, PlayerIdentity, SessionId};
use timeline_backend::{AppError, NewSession, SessionService, WinnerSelection};
use tracing::debug;

use crate::strategy::Strategy;

/// Per-seat placement tally.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeatTally {
    pub correct: u32,
    pub incorrect: u32,
}

/// Result of simulating a complete game.
#[derive(Debug, Clone)]
pub struct GameResult {
    pub final_view: SessionView,
    pub turns: u32,
    pub tallies: Vec<SeatTally>,
    /// Index into the seat list of the winner, if any.
    pub winner_index: Option<usize>,
    /// The game hit the turn cap and was ended externally.
    pub timed_out: bool,
}

#[derive(Debug)]
pub enum SimulatorError {
    Engine(AppError),
    Stuck(String),
}

impl std::fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulatorError::Engine(e) => write!(f, "engine error: {e}"),
            SimulatorError::Stuck(msg) => write!(f, "simulation stuck: {msg}"),
        }
    }
}

impl std::error::Error for SimulatorError {}

impl From<AppError> for SimulatorError {
    fn from(e: AppError) -> Self {
        SimulatorError::Engine(e)
    }
}

pub struct Simulator<'a> {
    service: &'a SessionService,
    difficulty: Difficulty,
    max_turns: u32,
}

impl<'a> Simulator<'a> {
    pub fn new(service: &'a SessionService, difficulty: Difficulty, max_turns: u32) -> Self {
        Self {
            service,
            difficulty,
            max_turns,
        }
    }

    /// Play one game with one strategy per seat, in join order.
    pub async fn simulate_game(
        &self,
        strategies: &[&dyn Strategy],
        seed: u64,
    ) -> Result<GameResult, SimulatorError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let identities: Vec<PlayerIdentity> = (1..=strategies.len() as i64)
            .map(PlayerIdentity::user)
            .collect();
        let Some(host) = identities.first() else {
            return Err(SimulatorError::Stuck("no seats configured".into()));
        };

        let created = self
            .service
            .create(NewSession {
                difficulty: self.difficulty,
                categories: Vec::new(),
                max_players: strategies.len() as u8,
                host: host.clone(),
            })
            .await?;
        let session_id: SessionId = created.session_id;
        for identity in &identities[1..] {
            self.service
                .join(created.room_code.as_str(), identity.clone())
                .await?;
        }
        let mut view = self.service.start(session_id, host).await?.view;

        let mut tallies = vec![SeatTally::default(); strategies.len()];
        let mut turns = 0;
        let mut timed_out = false;

        while !view.status.is_terminal() {
            if turns >= self.max_turns {
                view = self
                    .service
                    .end_game(session_id, WinnerSelection::HighestScore)
                    .await?
                    .view;
                timed_out = true;
                break;
            }

            let index = current_index(&view)
                .ok_or_else(|| SimulatorError::Stuck("in-progress session has no turn".into()))?;
            let identity = &identities[index];
            let hand = self.service.hand(session_id, identity).await?;
            let mv = strategies[index]
                .choose(&view, &hand, &mut rng)
                .ok_or_else(|| SimulatorError::Stuck(format!("seat {index} has no cards")))?;

            let placed = self
                .service
                .place_card(session_id, identity, &mv.card, mv.position)
                .await?;
            if placed.is_correct {
                tallies[index].correct += 1;
            } else {
                tallies[index].incorrect += 1;
            }
            debug!(
                %session_id,
                seat = index,
                strategy = strategies[index].name(),
                card = %mv.card,
                position = placed.position,
                is_correct = placed.is_correct,
                "Turn played"
            );

            view = placed.view;
            turns += 1;
        }

        let winner_index = view.winner.as_ref().and_then(|w| {
            view.seats.iter().position(|s| &s.identity == w)
        });

        Ok(GameResult {
            final_view: view,
            turns,
            tallies,
            winner_index,
            timed_out,
        })
    }
}

fn current_index(view: &SessionView) -> Option<usize> {
    let seat = view.current_seat?;
    view.seats.iter().position(|s| s.seat == seat)
}
