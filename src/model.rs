use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};

/// A bookable room. Rates are in minor currency units (cents).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub rate: i64,
    /// Percentage in `[0, 100]`.
    pub discount: i64,
}

impl Room {
    pub fn new(name: impl Into<String>, rate: i64, discount: i64) -> Self {
        Self {
            name: name.into(),
            rate,
            discount,
        }
    }
}

/// A stay from `checkin` to `checkout`, both days inclusive for occupancy.
///
/// `checkin <= checkout` is assumed, never enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub name: String,
    pub email: String,
    #[serde(deserialize_with = "de_day")]
    pub checkin: NaiveDate,
    #[serde(deserialize_with = "de_day")]
    pub checkout: NaiveDate,
    /// Explicit link to `Room::name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_name: Option<String>,
    /// Booking-level percentage, applied after the room discount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<i64>,
}

impl Booking {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        checkin: NaiveDate,
        checkout: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            checkin,
            checkout,
            room_name: None,
            discount: None,
        }
    }

    pub fn for_room(mut self, room_name: impl Into<String>) -> Self {
        self.room_name = Some(room_name.into());
        self
    }

    pub fn with_discount(mut self, discount: i64) -> Self {
        self.discount = Some(discount);
        self
    }

    /// The stay as an inclusive day range.
    pub fn stay(&self) -> DateRange {
        DateRange::new(self.checkin, self.checkout)
    }
}

/// Anything that names a calendar day. Time of day is dropped.
pub trait ToDay: Copy {
    fn to_day(self) -> NaiveDate;
}

impl ToDay for NaiveDate {
    fn to_day(self) -> NaiveDate {
        self
    }
}

impl ToDay for NaiveDateTime {
    fn to_day(self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> ToDay for DateTime<Tz>
where
    Tz::Offset: Copy,
{
    fn to_day(self) -> NaiveDate {
        self.date_naive()
    }
}

/// Closed interval of calendar days `[start, end]`.
///
/// An inverted range (`start > end`) is empty rather than invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn from_days(start: impl ToDay, end: impl ToDay) -> Self {
        Self::new(start.to_day(), end.to_day())
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Number of days covered, `0` when empty.
    pub fn days(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            (self.end - self.start).num_days() + 1
        }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Intersection with another closed range, `None` if disjoint.
    pub fn clamp(&self, other: &DateRange) -> Option<DateRange> {
        let clamped = DateRange::new(self.start.max(other.start), self.end.min(other.end));
        (!clamped.is_empty()).then_some(clamped)
    }

    /// Half-open overlap: `[start, end)` against `[other.start, other.end)`.
    ///
    /// Unlike `contains`, a stay ending on the day another begins does not overlap it.
    pub fn overlaps_half_open(&self, other: &DateRange) -> bool {
        !self.is_empty() && !other.is_empty() && self.start < other.end && other.start < self.end
    }

    /// Every day in the range, in order.
    pub fn days_iter(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        std::iter::successors(Some(self.start), |d| d.succ_opt()).take_while(move |d| *d <= end)
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Parse a calendar day from a date, a naive timestamp or an RFC 3339 timestamp.
pub fn parse_day(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.to_day());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(ToDay::to_day)
}

fn de_day<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_day(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {raw}")))
}
