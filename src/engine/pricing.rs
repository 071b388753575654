use tracing::warn;

use crate::model::*;

use super::error::{EngineError, Field, Owner, Rule};

/// Minor units per major unit (cents per euro).
pub const MINOR_PER_MAJOR: f64 = 100.0;

/// Fails unless the room's rate is non-negative.
pub fn validate_price(room: &Room) -> Result<(), EngineError> {
    if room.rate < 0 {
        return Err(invalid(Owner::Room, &room.name, Field::Rate, room.rate, Rule::NonNegative));
    }
    Ok(())
}

/// Fails unless `value` is a percentage in `[0, 100]`.
pub fn validate_discount(value: i64, owner: Owner, name: &str) -> Result<(), EngineError> {
    if !(0..=100).contains(&value) {
        return Err(invalid(owner, name, Field::Discount, value, Rule::Percentage));
    }
    Ok(())
}

/// Final price in major units.
///
/// The room discount applies first, then the booking discount on the
/// already discounted rate. Discounts compound; they are never summed.
pub fn calculate_final_price(room: &Room, booking: Option<&Booking>) -> Result<f64, EngineError> {
    validate_price(room)?;
    validate_discount(room.discount, Owner::Room, &room.name)?;
    if let Some(b) = booking
        && let Some(discount) = b.discount
    {
        validate_discount(discount, Owner::Booking, &b.name)?;
    }

    let mut minor = room.rate as f64 * (1.0 - room.discount as f64 / 100.0);
    if let Some(discount) = booking.and_then(|b| b.discount) {
        minor *= 1.0 - discount as f64 / 100.0;
    }
    Ok(minor / MINOR_PER_MAJOR)
}

// ── By room name ─────────────────────────────────────────────────

pub fn find_room<'r>(rooms: &'r [Room], room_name: &str) -> Result<&'r Room, EngineError> {
    rooms
        .iter()
        .find(|r| r.name == room_name)
        .ok_or_else(|| EngineError::RoomNotFound(room_name.to_string()))
}

pub fn price_validation(rooms: &[Room], room_name: &str) -> Result<(), EngineError> {
    validate_price(find_room(rooms, room_name)?)
}

pub fn discount_validation(rooms: &[Room], room_name: &str) -> Result<(), EngineError> {
    let room = find_room(rooms, room_name)?;
    validate_discount(room.discount, Owner::Room, &room.name)
}

pub fn final_price_for(rooms: &[Room], room_name: &str, booking: Option<&Booking>) -> Result<f64, EngineError> {
    calculate_final_price(find_room(rooms, room_name)?, booking)
}

fn invalid(owner: Owner, name: &str, field: Field, value: i64, rule: Rule) -> EngineError {
    warn!(%owner, name, %field, value, rule = rule.label(), "validation failed");
    metrics::counter!(crate::observability::VALIDATION_FAILURES_TOTAL, "rule" => rule.label()).increment(1);
    EngineError::Invalid {
        owner,
        name: name.to_string(),
        field,
        value: value.to_string(),
        rule,
    }
}
