//! Shape checks for raw JSON room and booking records, run before typed
//! deserialization so failures carry the record's name and offending value.

use std::collections::HashSet;

use serde_json::Value;
use tracing::warn;

use crate::engine::{EngineError, Field, Owner, Rule};

pub const ROOM_PROPERTIES: [&str; 3] = ["name", "rate", "discount"];
pub const BOOKING_PROPERTIES: [&str; 4] = ["name", "email", "checkin", "checkout"];

/// Display name of a record, `?` when it has none.
fn record_name(record: &Value) -> String {
    match record.get("name") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "?".to_string(),
    }
}

/// Render a JSON value the way a person would type it: strings unquoted.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn require(record: &Value, owner: Owner, properties: &[&'static str]) -> Result<(), EngineError> {
    for &property in properties {
        if record.get(property).is_none_or(Value::is_null) {
            let name = record_name(record);
            warn!(%owner, name = %name, property, "record is missing a property");
            return Err(EngineError::MissingProperty {
                owner,
                name,
                property,
            });
        }
    }
    Ok(())
}

pub fn validate_room_properties(room: &Value) -> Result<(), EngineError> {
    require(room, Owner::Room, &ROOM_PROPERTIES)
}

pub fn validate_booking_properties(booking: &Value) -> Result<(), EngineError> {
    require(booking, Owner::Booking, &BOOKING_PROPERTIES)?;
    if let Some(discount) = booking.get("discount")
        && !discount.is_null()
    {
        check_integer(Owner::Booking, booking, Field::Discount, discount)?;
    }
    Ok(())
}

/// Every room's `rate` and `discount` must be a JSON integer.
/// Stops at the first offending room.
pub fn validate_room_rates(rooms: &[Value]) -> Result<(), EngineError> {
    for room in rooms {
        if let Some(rate) = room.get("rate") {
            check_integer(Owner::Room, room, Field::Rate, rate)?;
        }
        if let Some(discount) = room.get("discount") {
            check_integer(Owner::Room, room, Field::Discount, discount)?;
        }
    }
    Ok(())
}

/// Room names must be non-empty strings and unique.
pub fn validate_room_names(rooms: &[Value]) -> Result<(), EngineError> {
    let mut seen = HashSet::new();
    for room in rooms {
        let name = match room.get("name") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.as_str(),
            Some(other) if !other.is_string() && !other.is_null() => {
                return Err(rejected(Owner::Room, room, Field::Name, other, Rule::Text));
            }
            _ => {
                return Err(EngineError::MissingProperty {
                    owner: Owner::Room,
                    name: record_name(room),
                    property: "name",
                });
            }
        };
        if !seen.insert(name) {
            return Err(EngineError::DuplicateRoom(name.to_string()));
        }
    }
    Ok(())
}

fn check_integer(owner: Owner, record: &Value, field: Field, value: &Value) -> Result<(), EngineError> {
    if value.is_i64() {
        return Ok(());
    }
    Err(rejected(owner, record, field, value, Rule::Integer))
}

fn rejected(owner: Owner, record: &Value, field: Field, value: &Value, rule: Rule) -> EngineError {
    let name = record_name(record);
    let shown = render(value);
    warn!(%owner, name = %name, %field, value = %shown, %rule, "record field rejected");
    metrics::counter!(crate::observability::VALIDATION_FAILURES_TOTAL, "rule" => rule.label()).increment(1);
    EngineError::Invalid {
        owner,
        name,
        field,
        value: shown,
        rule,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn room_one() -> Value {
        json!({ "name": "Room One", "rate": 15000, "discount": 10 })
    }

    fn room_three() -> Value {
        json!({ "name": "Room Three", "rate": 9000, "discount": 5 })
    }

    #[test]
    fn missing_room_property() {
        let room = json!({ "name": "Room One", "rate": 15000 });
        let err = validate_room_properties(&room).unwrap_err();
        assert_eq!(err.to_string(), "room Room One is missing property discount");
    }

    #[test]
    fn complete_room_passes() {
        assert!(validate_room_properties(&room_one()).is_ok());
    }

    #[test]
    fn null_counts_as_missing() {
        let room = json!({ "name": "Room One", "rate": null, "discount": 0 });
        assert!(matches!(
            validate_room_properties(&room),
            Err(EngineError::MissingProperty { property: "rate", .. })
        ));
    }

    #[test]
    fn non_integer_rate_names_room_and_value() {
        let rooms = vec![room_one(), json!({ "name": "Room Two", "rate": "test", "discount": 50 }), room_three()];
        let err = validate_room_rates(&rooms).unwrap_err();
        assert_eq!(
            err,
            EngineError::Invalid {
                owner: Owner::Room,
                name: "Room Two".into(),
                field: Field::Rate,
                value: "test".into(),
                rule: Rule::Integer,
            }
        );
        let msg = err.to_string();
        assert!(msg.contains("Room Two"));
        assert!(msg.contains("test"));
    }

    #[test]
    fn non_integer_discount_rejected() {
        let rooms = vec![room_one(), json!({ "name": "Room Two", "rate": 13000, "discount": "test" })];
        assert!(matches!(
            validate_room_rates(&rooms),
            Err(EngineError::Invalid { field: Field::Discount, .. })
        ));
    }

    #[test]
    fn fractional_rate_rejected() {
        let rooms = vec![json!({ "name": "Room Two", "rate": 130.5, "discount": 0 })];
        let err = validate_room_rates(&rooms).unwrap_err();
        assert!(err.to_string().contains("130.5"));
    }

    #[test]
    fn valid_rates_pass() {
        assert!(validate_room_rates(&[room_one(), room_three()]).is_ok());
    }

    #[test]
    fn booking_properties() {
        let ok = json!({ "name": "B", "email": "b@b.com", "checkin": "2024-08-01", "checkout": "2024-08-02" });
        assert!(validate_booking_properties(&ok).is_ok());

        let missing = json!({ "name": "B", "checkin": "2024-08-01", "checkout": "2024-08-02" });
        assert_eq!(
            validate_booking_properties(&missing).unwrap_err().to_string(),
            "booking B is missing property email"
        );

        let bad_discount = json!({
            "name": "B", "email": "b@b.com", "checkin": "2024-08-01", "checkout": "2024-08-02", "discount": "ten"
        });
        assert!(matches!(
            validate_booking_properties(&bad_discount),
            Err(EngineError::Invalid { owner: Owner::Booking, .. })
        ));
    }

    #[test]
    fn room_names_unique_and_present() {
        assert!(validate_room_names(&[room_one(), room_three()]).is_ok());
        assert_eq!(
            validate_room_names(&[room_one(), room_one()]),
            Err(EngineError::DuplicateRoom("Room One".into()))
        );
        assert!(validate_room_names(&[json!({ "name": "  ", "rate": 1, "discount": 0 })]).is_err());
    }

    #[test]
    fn non_string_room_name_is_invalid() {
        let err = validate_room_names(&[room_one(), json!({ "name": 5, "rate": 1, "discount": 0 })]).unwrap_err();
        assert_eq!(
            err,
            EngineError::Invalid {
                owner: Owner::Room,
                name: "5".into(),
                field: Field::Name,
                value: "5".into(),
                rule: Rule::Text,
            }
        );
        assert_eq!(err.to_string(), "room 5 has an invalid name: 5 (must be a string)");
    }
}
