use crate::model::*;

use super::link::RoomLink;

// ── Occupancy (inclusive both ends) ───────────────────────────────

/// True if any booking's `[checkin, checkout]` contains `date`'s calendar day.
pub fn is_occupied<'a>(bookings: impl IntoIterator<Item = &'a Booking>, date: impl ToDay) -> bool {
    let day = date.to_day();
    bookings.into_iter().any(|b| b.stay().contains(day))
}

/// Share of days in `[start, end]` on which `room` is occupied, in `[0, 100]`.
pub fn occupancy_percentage(
    room: &Room,
    bookings: &[Booking],
    start: impl ToDay,
    end: impl ToDay,
) -> f64 {
    occupancy_percentage_with(room, bookings, start, end, &RoomLink::default())
}

pub fn occupancy_percentage_with(
    room: &Room,
    bookings: &[Booking],
    start: impl ToDay,
    end: impl ToDay,
    link: &RoomLink,
) -> f64 {
    let own = link.bookings_for(room, bookings);
    day_share(&own, &DateRange::from_days(start, end))
}

/// Share of days in `[start, end]` on which any booking at all is active,
/// regardless of room, in `[0, 100]`.
pub fn hotel_occupancy_percentage(bookings: &[Booking], start: impl ToDay, end: impl ToDay) -> f64 {
    let all: Vec<&Booking> = bookings.iter().collect();
    day_share(&all, &DateRange::from_days(start, end))
}

fn day_share(bookings: &[&Booking], range: &DateRange) -> f64 {
    let mut total_days = 0u32;
    let mut occupied_days = 0u32;
    for day in range.days_iter() {
        total_days += 1;
        if is_occupied(bookings.iter().copied(), day) {
            occupied_days += 1;
        }
    }
    percentage(occupied_days as f64, total_days as f64)
}

/// Days in `range` covered by at least one booking.
///
/// Stays are clamped to the range and merged first, so double bookings
/// count once.
pub fn occupied_days<'a>(bookings: impl IntoIterator<Item = &'a Booking>, range: &DateRange) -> i64 {
    let mut clamped: Vec<DateRange> = bookings
        .into_iter()
        .filter_map(|b| range.clamp(&b.stay()))
        .collect();
    clamped.sort_by_key(|r| r.start);
    merge_overlapping(&clamped).iter().map(DateRange::days).sum()
}

/// Occupied room-days over available room-days across `rooms`, in `[0, 100]`.
pub fn total_occupancy_percentage(
    rooms: &[Room],
    bookings: &[Booking],
    start: impl ToDay,
    end: impl ToDay,
) -> f64 {
    total_occupancy_percentage_with(rooms, bookings, start, end, &RoomLink::default())
}

pub fn total_occupancy_percentage_with(
    rooms: &[Room],
    bookings: &[Booking],
    start: impl ToDay,
    end: impl ToDay,
    link: &RoomLink,
) -> f64 {
    let range = DateRange::from_days(start, end);
    let total_days = range.days();
    if total_days <= 0 || rooms.is_empty() {
        return 0.0;
    }

    let by_room = link.group_by_room(rooms, bookings);
    let occupied: i64 = rooms
        .iter()
        .filter_map(|room| by_room.get(room.name.as_str()))
        .map(|own| occupied_days(own.iter().copied(), &range))
        .sum();
    let room_days = rooms.len() as i64 * total_days;
    percentage(occupied as f64, room_days as f64)
}

/// Merge sorted overlapping inclusive ranges. Adjacent ranges stay separate.
pub(crate) fn merge_overlapping(sorted: &[DateRange]) -> Vec<DateRange> {
    let mut merged: Vec<DateRange> = Vec::new();
    for &range in sorted {
        if let Some(last) = merged.last_mut()
            && range.start <= last.end
        {
            last.end = last.end.max(range.end);
            continue;
        }
        merged.push(range);
    }
    merged
}

/// `part / whole * 100`, `0` when `whole` is zero.
fn percentage(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 {
        0.0
    } else {
        (part / whole * 100.0).clamp(0.0, 100.0)
    }
}
