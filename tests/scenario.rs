use chrono::NaiveDate;

use roomcal::engine::{self, EngineError, Field, Owner, RoomLink, Rule};
use roomcal::model::DateRange;
use roomcal::report::build_report;
use roomcal::snapshot::Snapshot;

// ── Test infrastructure ──────────────────────────────────────

const DEMO: &str = include_str!("../data/snapshot.json");

/// Bookings carry no `roomName`; they reach their room by display name.
const BY_NAME: &str = r#"{
    "rooms": [
        { "name": "Room One", "rate": 15000, "discount": 10 },
        { "name": "Room Two", "rate": 13000, "discount": 50 },
        { "name": "Room Three", "rate": 9000, "discount": 5 }
    ],
    "bookings": [
        { "name": "Booking One", "email": "booking1@booking.com", "checkin": "2024-08-01", "checkout": "2024-09-01" },
        { "name": "Booking Two", "email": "booking2@booking.com", "checkin": "2024-08-10", "checkout": "2024-08-25" },
        { "name": "Booking Three", "email": "booking3@booking.com", "checkin": "2024-08-10", "checkout": "2024-09-05" }
    ]
}"#;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn august() -> DateRange {
    DateRange::new(d("2024-08-01"), d("2024-08-31"))
}

// ── Occupancy ────────────────────────────────────────────────

#[test]
fn total_occupancy_by_name_convention() {
    let snap = Snapshot::from_json_str(BY_NAME).unwrap();
    let pct = snap.total_occupancy(&august(), &RoomLink::default());
    assert!((pct - 74.19).abs() < 0.005, "{pct}");
}

#[test]
fn total_occupancy_explicit_links_only() {
    let snap = Snapshot::from_json_str(BY_NAME).unwrap();
    assert_eq!(snap.total_occupancy(&august(), &RoomLink::explicit()), 0.0);
}

#[test]
fn fleet_occupancy_is_not_room_occupancy() {
    let snap = Snapshot::from_json_str(BY_NAME).unwrap();
    // Any booking covers Sep 2, regardless of room.
    assert!(snap.is_occupied(d("2024-09-02")));
    assert!(!snap.is_occupied(d("2024-09-06")));
    let link = RoomLink::default();
    let range = DateRange::new(d("2024-09-02"), d("2024-09-02"));
    assert_eq!(snap.occupancy("Room One", &range, &link).unwrap(), 0.0);
    assert_eq!(snap.occupancy("Room Three", &range, &link).unwrap(), 100.0);
}

// ── Availability ─────────────────────────────────────────────

#[test]
fn demo_availability() {
    let snap = Snapshot::from_json_str(DEMO).unwrap();
    let window = DateRange::new(d("2024-08-05"), d("2024-08-20"));
    let free: Vec<&str> = snap
        .available_rooms(&window, &RoomLink::explicit())
        .into_iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(free, vec!["Room Three"]);
}

#[test]
fn demo_timestamps_truncate_to_days() {
    let snap = Snapshot::from_json_str(DEMO).unwrap();
    assert_eq!(snap.bookings[2].checkin, d("2024-09-01"));
    assert_eq!(snap.bookings[2].checkout, d("2024-09-30"));
}

// ── Pricing ──────────────────────────────────────────────────

#[test]
fn demo_pricing_with_booking_discount() {
    let snap = Snapshot::from_json_str(DEMO).unwrap();
    let booking = &snap.bookings[1];
    let price = engine::final_price_for(&snap.rooms, "Room Two", Some(booking)).unwrap();
    // 13000 * 0.5 * 0.9 / 100
    assert!((price - 58.5).abs() < 1e-9);
}

#[test]
fn unknown_room_is_not_found() {
    let snap = Snapshot::from_json_str(DEMO).unwrap();
    assert_eq!(
        engine::final_price_for(&snap.rooms, "Penthouse", None),
        Err(EngineError::RoomNotFound("Penthouse".into()))
    );
}

// ── Validation ───────────────────────────────────────────────

#[test]
fn non_integer_rate_rejected_at_load() {
    let json = BY_NAME.replace(r#""rate": 13000"#, r#""rate": "test""#);
    let err = Snapshot::from_json_str(&json).unwrap_err();
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
}

#[test]
fn missing_discount_rejected_at_load() {
    let json = BY_NAME.replace(r#", "discount": 10 }"#, " }");
    let err = Snapshot::from_json_str(&json).unwrap_err();
    assert_eq!(err.to_string(), "room Room One is missing property discount");
}

// ── Report ───────────────────────────────────────────────────

#[test]
fn demo_report() {
    let snap = Snapshot::from_json_str(DEMO).unwrap();
    let report = build_report(&snap, august(), &RoomLink::default()).unwrap();
    // (31 + 16 + 0) / (3 * 31)
    assert!((report.total_occupancy - 47.0 / 93.0 * 100.0).abs() < 1e-9);
    assert_eq!(report.available, vec!["Room Three".to_string()]);
    let names: Vec<&str> = report.rooms.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Room One", "Room Two", "Room Three"]);
}
