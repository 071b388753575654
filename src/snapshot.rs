use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::engine::{self, EngineError, RoomLink};
use crate::model::*;
use crate::schema;

/// Rooms and bookings loaded once and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub rooms: Vec<Room>,
    pub bookings: Vec<Booking>,
}

fn array<'a>(root: &'a Value, key: &str) -> Result<&'a [Value], EngineError> {
    match root.get(key) {
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(EngineError::Snapshot(format!("`{key}` must be an array"))),
        None => Ok(&[]),
    }
}

impl Snapshot {
    pub fn new(rooms: Vec<Room>, bookings: Vec<Booking>) -> Self {
        Self { rooms, bookings }
    }

    /// Parse `{"rooms": [...], "bookings": [...]}`, validating record shape first.
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let root: Value = serde_json::from_str(json).map_err(|e| EngineError::Snapshot(e.to_string()))?;

        let raw_rooms = array(&root, "rooms")?;
        for room in raw_rooms {
            schema::validate_room_properties(room)?;
        }
        schema::validate_room_names(raw_rooms)?;
        schema::validate_room_rates(raw_rooms)?;

        let raw_bookings = array(&root, "bookings")?;
        for booking in raw_bookings {
            schema::validate_booking_properties(booking)?;
        }

        let rooms = raw_rooms
            .iter()
            .map(|v| Room::deserialize(v))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| EngineError::Snapshot(e.to_string()))?;
        let bookings = raw_bookings
            .iter()
            .map(|v| Booking::deserialize(v))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| EngineError::Snapshot(e.to_string()))?;

        info!(rooms = rooms.len(), bookings = bookings.len(), "snapshot loaded");
        Ok(Self { rooms, bookings })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Snapshot(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    pub fn has_booked_rooms(&self) -> bool {
        !self.bookings.is_empty()
    }

    pub fn find_room(&self, name: &str) -> Result<&Room, EngineError> {
        engine::find_room(&self.rooms, name)
    }

    /// True if the room has any booking at all.
    pub fn is_room_booked(&self, name: &str, link: &RoomLink) -> Result<bool, EngineError> {
        let room = self.find_room(name)?;
        Ok(self.bookings.iter().any(|b| link.links(b, room)))
    }

    /// Earliest check-in among the room's bookings.
    pub fn room_check_in_date(&self, name: &str, link: &RoomLink) -> Result<Option<NaiveDate>, EngineError> {
        let room = self.find_room(name)?;
        Ok(link.bookings_for(room, &self.bookings).iter().map(|b| b.checkin).min())
    }

    pub fn is_occupied(&self, date: impl ToDay) -> bool {
        engine::is_occupied(&self.bookings, date)
    }

    pub fn occupancy(&self, room_name: &str, range: &DateRange, link: &RoomLink) -> Result<f64, EngineError> {
        let room = self.find_room(room_name)?;
        Ok(engine::occupancy_percentage_with(room, &self.bookings, range.start, range.end, link))
    }

    /// Share of days in `range` on which any booking is active, whatever its room.
    pub fn hotel_occupancy(&self, range: &DateRange) -> f64 {
        engine::hotel_occupancy_percentage(&self.bookings, range.start, range.end)
    }

    pub fn total_occupancy(&self, range: &DateRange, link: &RoomLink) -> f64 {
        engine::total_occupancy_percentage_with(&self.rooms, &self.bookings, range.start, range.end, link)
    }

    pub fn available_rooms(&self, range: &DateRange, link: &RoomLink) -> Vec<&Room> {
        engine::available_rooms_with(&self.rooms, &self.bookings, range.start, range.end, link)
    }

    /// Validate every room's rate and discount.
    pub fn validate_rooms(&self) -> Result<(), EngineError> {
        for room in &self.rooms {
            engine::validate_price(room)?;
            engine::validate_discount(room.discount, engine::Owner::Room, &room.name)?;
        }
        Ok(())
    }
}
