use crate::model::*;

use super::link::RoomLink;

// ── Availability (half-open overlap) ──────────────────────────────
//
// A room is available for `[start, end)` when none of its stays
// `[checkin, checkout)` overlaps it. This is deliberately not the
// occupancy test: a guest checking out on `start` does not block the
// room, although `is_occupied` reports that day as occupied.
//
// Without a link the match is by `roomName` only. An inverted query
// (`start > end`) overlaps nothing.

/// Rooms with no booking overlapping `[start, end)`, in input order.
pub fn available_rooms<'r>(
    rooms: &'r [Room],
    bookings: &[Booking],
    start: impl ToDay,
    end: impl ToDay,
) -> Vec<&'r Room> {
    available_rooms_with(rooms, bookings, start, end, &RoomLink::explicit())
}

pub fn available_rooms_with<'r>(
    rooms: &'r [Room],
    bookings: &[Booking],
    start: impl ToDay,
    end: impl ToDay,
    link: &RoomLink,
) -> Vec<&'r Room> {
    let query = DateRange::from_days(start, end);
    let by_room = link.group_by_room(rooms, bookings);
    rooms
        .iter()
        .filter(|room| {
            by_room
                .get(room.name.as_str())
                .is_none_or(|own| !own.iter().any(|b| b.stay().overlaps_half_open(&query)))
        })
        .collect()
}

/// True if `room` has no booking overlapping `[start, end)`.
pub fn is_available(room: &Room, bookings: &[Booking], start: impl ToDay, end: impl ToDay) -> bool {
    is_available_with(room, bookings, start, end, &RoomLink::explicit())
}

pub fn is_available_with(
    room: &Room,
    bookings: &[Booking],
    start: impl ToDay,
    end: impl ToDay,
    link: &RoomLink,
) -> bool {
    let query = DateRange::from_days(start, end);
    !link
        .bookings_for(room, bookings)
        .iter()
        .any(|b| b.stay().overlaps_half_open(&query))
}
