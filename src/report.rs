use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use crate::engine::{self, EngineError, RoomLink};
use crate::model::DateRange;
use crate::observability::{self, Op};
use crate::snapshot::Snapshot;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomLine {
    pub name: String,
    pub occupancy: f64,
    /// Room price in major units, room discount applied.
    pub final_price: f64,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccupancyReport {
    pub window: DateRange,
    pub days: i64,
    pub total_occupancy: f64,
    pub rooms: Vec<RoomLine>,
    pub available: Vec<String>,
}

/// Run `f` and record its latency and outcome under `op`.
fn timed<T>(op: Op, f: impl FnOnce() -> Result<T, EngineError>) -> Result<T, EngineError> {
    let start = Instant::now();
    let result = f();
    observability::record_query(op, result.is_ok(), start.elapsed());
    result
}

/// Occupancy, price and availability for every room over `window`.
///
/// Fails on the first room whose rate or discount is invalid.
pub fn build_report(snapshot: &Snapshot, window: DateRange, link: &RoomLink) -> Result<OccupancyReport, EngineError> {
    let total_occupancy = timed(Op::TotalOccupancy, || Ok(snapshot.total_occupancy(&window, link)))?;
    let available: Vec<String> = timed(Op::Availability, || {
        Ok(snapshot
            .available_rooms(&window, link)
            .into_iter()
            .map(|r| r.name.clone())
            .collect())
    })?;

    let mut rooms = Vec::with_capacity(snapshot.rooms.len());
    for room in &snapshot.rooms {
        let occupancy = timed(Op::RoomOccupancy, || {
            Ok(engine::occupancy_percentage_with(
                room,
                &snapshot.bookings,
                window.start,
                window.end,
                link,
            ))
        })?;
        let final_price = timed(Op::Pricing, || engine::calculate_final_price(room, None))?;
        debug!(room = %room.name, occupancy, final_price, "room line");
        rooms.push(RoomLine {
            name: room.name.clone(),
            occupancy,
            final_price,
            available: available.contains(&room.name),
        });
    }

    Ok(OccupancyReport {
        window,
        days: window.days(),
        total_occupancy,
        rooms,
        available,
    })
}
