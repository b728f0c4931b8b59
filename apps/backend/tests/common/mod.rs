#![allow(dead_code)]

// tests/common/mod.rs
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use backend_test_support::unique_helpers::{unique_guest_name, unique_user_id};
use timeline_backend::catalog::{CardCatalog, CatalogEntry, CatalogError, InMemoryCatalog};
use timeline_backend::domain::{CardId, Difficulty, PlayerIdentity, SessionId, Year};
use timeline_backend::{EngineConfig, NewSession, SessionService};

// Logging is auto-installed for every test binary that uses `common`
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// `count` medium cards with strictly increasing years, ids `m-000`...
pub fn medium_deck(count: usize) -> Vec<CatalogEntry> {
    (0..count)
        .map(|i| {
            CatalogEntry::new(
                format!("m-{i:03}"),
                1500 + 7 * i as Year,
                Difficulty::Medium,
                if i % 2 == 0 { "history" } else { "science" },
            )
        })
        .collect()
}

pub fn memory_catalog(count: usize) -> Arc<InMemoryCatalog> {
    Arc::new(InMemoryCatalog::new(medium_deck(count), 11))
}

pub fn service_over(catalog: Arc<dyn CardCatalog>) -> SessionService {
    SessionService::new(catalog, EngineConfig::default())
}

pub fn user() -> PlayerIdentity {
    PlayerIdentity::user(unique_user_id())
}

pub fn guest(prefix: &str) -> PlayerIdentity {
    PlayerIdentity::guest(&unique_guest_name(prefix)).expect("valid guest name")
}

pub fn new_session(host: &PlayerIdentity, max_players: u8) -> NewSession {
    NewSession {
        difficulty: Difficulty::Medium,
        categories: Vec::new(),
        max_players,
        host: host.clone(),
    }
}

/// Create, fill every seat and start. Identities are returned in join order.
pub async fn started_game(
    service: &SessionService,
    players: u8,
) -> (SessionId, Vec<PlayerIdentity>) {
    let host = user();
    let view = service
        .create(new_session(&host, players))
        .await
        .expect("create");
    let mut identities = vec![host];
    for n in 1..players {
        let identity = guest(&format!("p{n}"));
        service
            .join(view.room_code.as_str(), identity.clone())
            .await
            .expect("join");
        identities.push(identity);
    }
    service
        .start(view.session_id, &identities[0])
        .await
        .expect("start");
    (view.session_id, identities)
}

/// Catalog that deals cards in exactly the order given.
///
/// Resolution can be slowed down or switched off to exercise the lock and
/// failure paths.
pub struct ScriptedCatalog {
    cards: Vec<(CardId, Year)>,
    delay: Option<Duration>,
    unavailable: AtomicBool,
}

impl ScriptedCatalog {
    pub fn new(cards: &[(&str, Year)]) -> Self {
        Self {
            cards: cards.iter().map(|(c, y)| (CardId::from(*c), *y)).collect(),
            delay: None,
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_unavailable(&self, down: bool) {
        self.unavailable.store(down, Ordering::SeqCst);
    }

    fn check_up(&self) -> Result<(), CatalogError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CatalogError::Unavailable("scripted outage".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl CardCatalog for ScriptedCatalog {
    async fn resolve_year(&self, card: &CardId) -> Result<Year, CatalogError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.check_up()?;
        self.cards
            .iter()
            .find(|(id, _)| id == card)
            .map(|(_, y)| *y)
            .ok_or_else(|| CatalogError::UnknownCard(card.clone()))
    }

    async fn sample_by_difficulty(
        &self,
        _difficulty: Difficulty,
        _categories: &[String],
        count: usize,
    ) -> Result<Vec<CardId>, CatalogError> {
        self.check_up()?;
        Ok(self.cards.iter().take(count).map(|(id, _)| id.clone()).collect())
    }
}
