//! Wire shapes at the booking-creation boundary.

use serde::{Deserialize, Serialize};

use staybook_core::{CalendarDay, Money, PackageId, RoomId};

/// The submission payload handed to the booking-creation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub event_name: String,
    pub room_ids: Vec<RoomId>,
    pub check_in: CalendarDay,
    pub check_out: CalendarDay,
    pub participants: u32,
    pub package_id: Option<PackageId>,
    pub total_price: Money,
}

/// The collaborator's reply. `success == false` carries the server's
/// validation message (e.g. a concurrently-created conflicting booking).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BookingResponse {
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}
