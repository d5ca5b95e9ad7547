use std::sync::{Mutex, RwLock};

use async_trait::async_trait;

use staybook_composer::{BookingGateway, BookingRequest, BookingResponse, GatewayError};

/// How the in-memory desk answers the next submissions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeskMode {
    /// Accept everything.
    #[default]
    Accept,
    /// Reject with a server-side validation message.
    Reject(String),
    /// Simulate a connectivity failure.
    Offline,
}

/// In-memory booking-creation collaborator.
///
/// Records every accepted request so tests can assert on the submitted
/// payload.
#[derive(Debug, Default)]
pub struct InMemoryBookingDesk {
    mode: RwLock<DeskMode>,
    accepted: Mutex<Vec<BookingRequest>>,
}

impl InMemoryBookingDesk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_mode(&self, mode: DeskMode) {
        if let Ok(mut current) = self.mode.write() {
            *current = mode;
        }
    }

    /// Requests the desk has accepted, in submission order.
    pub fn accepted(&self) -> Vec<BookingRequest> {
        self.accepted
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl BookingGateway for InMemoryBookingDesk {
    async fn create_booking(
        &self,
        request: &BookingRequest,
    ) -> Result<BookingResponse, GatewayError> {
        let mode = self
            .mode
            .read()
            .map(|m| m.clone())
            .map_err(|_| GatewayError::Transport("desk state poisoned".into()))?;
        match mode {
            DeskMode::Accept => {
                if let Ok(mut accepted) = self.accepted.lock() {
                    accepted.push(request.clone());
                }
                Ok(BookingResponse::accepted())
            }
            DeskMode::Reject(message) => Ok(BookingResponse::rejected(message)),
            DeskMode::Offline => Err(GatewayError::Transport("injected outage".into())),
        }
    }
}
