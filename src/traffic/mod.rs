//! Concurrent customer traffic and its analytics.
//!
//! A wave spawns N independent shopping sessions against the shared shop.
//! Sessions race for display slots; the shop's atomic per-call operations
//! decide winners, and losing sessions finish empty-handed. The manager
//! keeps a sample history and re-derives an aggregate traffic level after
//! every wave.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::core::constants::TRAFFIC_RECENT_SAMPLES;
use crate::customer::generation::generate_random_customer;
use crate::session::{SessionConfig, SessionOutcome, ShoppingSession};
use crate::shop::manager::ShopManager;

/// Aggregate descriptor of how busy the shop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TrafficLevel {
    Dead = 0,
    Quiet = 1,
    Steady = 2,
    Busy = 3,
    Thronging = 4,
}

/// Ordered cut points mapping a footfall score to a traffic level.
/// The score blends visitor volume with how often visits convert.
const TRAFFIC_CUTS: [(f64, TrafficLevel); 4] = [
    (10.0, TrafficLevel::Thronging),
    (6.0, TrafficLevel::Busy),
    (3.0, TrafficLevel::Steady),
    (1.0, TrafficLevel::Quiet),
];

impl TrafficLevel {
    pub fn from_score(score: f64) -> Self {
        for (cut, level) in TRAFFIC_CUTS {
            if score >= cut {
                return level;
            }
        }
        TrafficLevel::Dead
    }

    pub fn name(&self) -> &'static str {
        match self {
            TrafficLevel::Dead => "Dead",
            TrafficLevel::Quiet => "Quiet",
            TrafficLevel::Steady => "Steady",
            TrafficLevel::Busy => "Busy",
            TrafficLevel::Thronging => "Thronging",
        }
    }
}

/// One wave's worth of footfall numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficSample {
    pub timestamp: DateTime<Utc>,
    pub visitors: usize,
    pub sales: usize,
    pub revenue: f64,
}

#[derive(Debug, Clone, Default)]
pub struct TrafficConfig {
    /// Passed through to every spawned session.
    pub session: SessionConfig,
}

pub struct TrafficManager {
    shop: Arc<ShopManager>,
    config: TrafficConfig,
    history: Mutex<Vec<TrafficSample>>,
    level_tx: watch::Sender<TrafficLevel>,
    cancel: CancellationToken,
}

impl TrafficManager {
    pub fn new(shop: Arc<ShopManager>, config: TrafficConfig) -> Self {
        let (level_tx, _) = watch::channel(TrafficLevel::Dead);
        Self {
            shop,
            config,
            history: Mutex::new(Vec::new()),
            level_tx,
            cancel: CancellationToken::new(),
        }
    }

    /// Watch the traffic level; the receiver sees every change.
    pub fn level_watch(&self) -> watch::Receiver<TrafficLevel> {
        self.level_tx.subscribe()
    }

    pub fn traffic_level(&self) -> TrafficLevel {
        *self.level_tx.borrow()
    }

    /// Token governing all sessions this manager spawns. Cancelling it
    /// stops every in-flight session before its next thinking delay.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn history(&self) -> Vec<TrafficSample> {
        self.history.lock().expect("traffic history lock").clone()
    }

    /// Runs one wave of `count` concurrent customer sessions to completion
    /// and folds the results into the traffic history.
    pub async fn run_wave(&self, count: usize, rng: &mut impl Rng) -> Vec<SessionOutcome> {
        let mut handles = Vec::with_capacity(count);
        for _ in 0..count {
            let customer = generate_random_customer(rng);
            let session_config = SessionConfig {
                instant: self.config.session.instant,
                // Derive a per-session seed so concurrent sessions stay
                // independently deterministic under a seeded parent.
                seed: self.config.session.seed.map(|_| rng.gen()),
            };
            let session = ShoppingSession::new(
                customer,
                Arc::clone(&self.shop),
                session_config,
                self.cancel.child_token(),
            );
            handles.push(tokio::spawn(session.run()));
        }

        let outcomes: Vec<SessionOutcome> = join_all(handles)
            .await
            .into_iter()
            .filter_map(|joined| joined.ok())
            .collect();

        let sales = outcomes.iter().filter(|o| o.purchase.is_some()).count();
        let revenue: f64 = outcomes
            .iter()
            .filter_map(|o| o.purchase.as_ref().map(|t| t.sale_price))
            .sum();

        debug!(visitors = count, sales, revenue, "traffic wave finished");

        let sample = TrafficSample {
            timestamp: Utc::now(),
            visitors: count,
            sales,
            revenue,
        };

        let level = {
            let mut history = self.history.lock().expect("traffic history lock");
            history.push(sample);
            Self::level_from_recent(&history)
        };

        if level != *self.level_tx.borrow() {
            info!(level = level.name(), "traffic level changed");
            let _ = self.level_tx.send(level);
        }

        outcomes
    }

    /// Derives a level from the recent sample window: average visitors per
    /// wave, weighted up when visits actually convert into sales.
    fn level_from_recent(history: &[TrafficSample]) -> TrafficLevel {
        let window = &history[history.len().saturating_sub(TRAFFIC_RECENT_SAMPLES)..];
        if window.is_empty() {
            return TrafficLevel::Dead;
        }

        let visitors: usize = window.iter().map(|s| s.visitors).sum();
        let sales: usize = window.iter().map(|s| s.sales).sum();
        let avg_visitors = visitors as f64 / window.len() as f64;
        let conversion = if visitors > 0 {
            sales as f64 / visitors as f64
        } else {
            0.0
        };

        TrafficLevel::from_score(avg_visitors * (0.5 + conversion))
    }
}
