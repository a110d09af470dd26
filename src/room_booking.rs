//! Room stay quotes and simulated bookings.
//!
//! A quote is the nightly rate times the number of nights plus taxes and
//! fees. Booking is the room-side sibling of cart checkout: it only answers
//! with a confirmation. Nothing is reserved and no booking is stored.

use log::info;
use serde::{Deserialize, Serialize};

use crate::app_response::AppResponse;
use crate::catalog_model::Room;
use crate::formatters::format_price;

/// Taxes and fees charged on top of the room subtotal.
pub const ROOM_TAX_RATE: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingQuote {
    pub nights: u32,
    pub nightly_rate: f64,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub room_id: u32,
    pub room_name: String,
    pub quote: BookingQuote,
    pub formatted_total: String,
    pub message: String,
}

impl Room {
    /// Price of a stay of `nights` nights; fewer than one night is quoted as
    /// one. Rooms that are not available cannot be quoted.
    pub fn booking_quote(&self, nights: u32) -> Result<BookingQuote, AppResponse> {
        if !self.availability {
            return Err(AppResponse::ValidationError(format!(
                "{} is currently unavailable",
                self.name
            )));
        }

        let nights = nights.max(1);
        let subtotal = self.price * f64::from(nights);
        let tax = subtotal * ROOM_TAX_RATE;
        Ok(BookingQuote {
            nights,
            nightly_rate: self.price,
            subtotal,
            tax,
            total: subtotal + tax,
        })
    }

    /// Simulated booking: quotes the stay and answers with a confirmation.
    pub fn book(&self, nights: u32) -> Result<BookingConfirmation, AppResponse> {
        let quote = self.booking_quote(nights)?;
        let plural = if quote.nights > 1 { "s" } else { "" };
        info!(
            "Booking of room {} for {} night(s) at {}",
            self.id, quote.nights, quote.total
        );
        Ok(BookingConfirmation {
            room_id: self.id,
            room_name: self.name.clone(),
            quote,
            formatted_total: format_price(quote.total),
            message: format!(
                "Thank you for booking {} for {} night{plural}!",
                self.name, quote.nights
            ),
        })
    }
}
