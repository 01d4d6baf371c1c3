use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::dataset::Dataset;
use crate::mocks::{
    Clock, MockPaymentGateway, PaymentGateway, RandomSeatSource, SeatSource, SystemClock,
};

// Shared, read-only state handed to every handler. Cloning only bumps the
// reference counts.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub payments: Arc<dyn PaymentGateway>,
    pub seats: Arc<dyn SeatSource>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
            payments: Arc::new(MockPaymentGateway),
            seats: Arc::new(RandomSeatSource),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_seats(mut self, seats: Arc<dyn SeatSource>) -> Self {
        self.seats = seats;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}
