use std::borrow::Cow;
use std::collections::HashMap;

use tracing::debug;

use crate::model::{Booking, Room};

/// Derives a room name from a booking's display name, e.g. "Booking One" → "Room One".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameConvention {
    pub booking_token: String,
    pub room_token: String,
}

impl NameConvention {
    pub fn new(booking_token: impl Into<String>, room_token: impl Into<String>) -> Self {
        Self {
            booking_token: booking_token.into(),
            room_token: room_token.into(),
        }
    }

    /// Parse `"<booking_token>:<room_token>"`.
    pub fn parse(s: &str) -> Option<Self> {
        let (booking, room) = s.split_once(':')?;
        if booking.is_empty() {
            return None;
        }
        Some(Self::new(booking, room))
    }

    /// Replace the first occurrence of the booking token. `None` if absent.
    pub fn room_name_for(&self, booking_name: &str) -> Option<String> {
        booking_name
            .contains(self.booking_token.as_str())
            .then(|| booking_name.replacen(&self.booking_token, &self.room_token, 1))
    }
}

impl Default for NameConvention {
    fn default() -> Self {
        Self::new("Booking", "Room")
    }
}

/// How bookings find their room.
///
/// `Booking::room_name` always wins. Without it, the optional name
/// convention is tried; convention links are logged since they break
/// as soon as a display name is edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomLink {
    pub convention: Option<NameConvention>,
}

impl Default for RoomLink {
    fn default() -> Self {
        Self {
            convention: Some(NameConvention::default()),
        }
    }
}

impl RoomLink {
    /// Only the explicit `room_name` link.
    pub fn explicit() -> Self {
        Self { convention: None }
    }

    pub fn with_convention(convention: NameConvention) -> Self {
        Self {
            convention: Some(convention),
        }
    }

    /// Name of the room this booking refers to, if any.
    ///
    /// The derived name may not exist; only `bookings_for` and
    /// `group_by_room` resolve it against actual rooms.
    pub fn room_name<'a>(&self, booking: &'a Booking) -> Option<Cow<'a, str>> {
        if let Some(name) = booking.room_name.as_deref() {
            return Some(Cow::Borrowed(name));
        }
        let derived = self.convention.as_ref()?.room_name_for(&booking.name)?;
        Some(Cow::Owned(derived))
    }

    pub fn links(&self, booking: &Booking, room: &Room) -> bool {
        self.room_name(booking).is_some_and(|name| name == room.name)
    }

    /// Bookings belonging to `room`.
    pub fn bookings_for<'a>(&self, room: &Room, bookings: &'a [Booking]) -> Vec<&'a Booking> {
        bookings
            .iter()
            .filter(|b| {
                let linked = self.links(b, room);
                if linked {
                    note_convention_link(b, &room.name);
                }
                linked
            })
            .collect()
    }

    /// Side map room name → bookings. Bookings with no matching room are dropped.
    /// Every room gets an entry, possibly empty.
    pub fn group_by_room<'r, 'b>(
        &self,
        rooms: &'r [Room],
        bookings: &'b [Booking],
    ) -> HashMap<&'r str, Vec<&'b Booking>> {
        let mut map: HashMap<&'r str, Vec<&'b Booking>> =
            rooms.iter().map(|r| (r.name.as_str(), Vec::new())).collect();
        for booking in bookings {
            if let Some(name) = self.room_name(booking)
                && let Some(list) = map.get_mut(&*name)
            {
                note_convention_link(booking, &name);
                list.push(booking);
            }
        }
        map
    }
}

/// Log and count a booking resolved to an existing room without `roomName`.
fn note_convention_link(booking: &Booking, room: &str) {
    if booking.room_name.is_some() {
        return;
    }
    debug!(booking = %booking.name, room, "linked booking by name convention");
    metrics::counter!(crate::observability::CONVENTION_LINKS_TOTAL).increment(1);
}
