// Mock backends standing in for the payment gateway, the SGR seat inventory and
// the wall clock. Handlers only see the traits so tests can swap in
// deterministic versions.

use std::ops::RangeInclusive;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

// Seats reported for any SGR route/date/class
pub const SEAT_RANGE: RangeInclusive<u32> = 10..=59;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub success: bool,
    pub transaction_id: String,
    pub payment_status: PaymentStatus,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync + 'static {
    async fn verify(&self, transaction_id: &str) -> PaymentResponse;
}

// Accepts every transaction. No external system is contacted.
#[derive(Debug, Default, Clone)]
pub struct MockPaymentGateway;

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn verify(&self, transaction_id: &str) -> PaymentResponse {
        debug!(transaction_id, "Mock payment verification");

        PaymentResponse {
            success: true,
            transaction_id: transaction_id.to_string(),
            payment_status: PaymentStatus::Completed,
        }
    }
}

pub trait SeatSource: Send + Sync + 'static {
    fn available_seats(&self) -> u32;
}

// Uniform draw from SEAT_RANGE using the thread-local RNG
#[derive(Debug, Default, Clone)]
pub struct RandomSeatSource;

impl SeatSource for RandomSeatSource {
    fn available_seats(&self) -> u32 {
        rand::thread_rng().gen_range(SEAT_RANGE)
    }
}

// Reproducible sequence of draws for a given seed
pub struct SeededSeatSource {
    rng: Mutex<StdRng>,
}

impl SeededSeatSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl SeatSource for SeededSeatSource {
    fn available_seats(&self) -> u32 {
        self.rng.lock().gen_range(SEAT_RANGE)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedSeatSource(pub u32);

impl SeatSource for FixedSeatSource {
    fn available_seats(&self) -> u32 {
        self.0
    }
}

pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
