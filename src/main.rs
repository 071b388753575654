use tracing::info;

use roomcal::config::Config;
use roomcal::report::build_report;
use roomcal::snapshot::Snapshot;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let metrics = roomcal::observability::init(config.metrics);

    info!("roomcal report");
    info!("  snapshot: {}", config.snapshot.display());
    info!("  window: {}", config.window);
    info!(
        "  name convention: {}",
        config.link.convention.as_ref().map_or("off".to_string(), |c| format!(
            "{} -> {}",
            c.booking_token, c.room_token
        ))
    );

    let snapshot = Snapshot::load(&config.snapshot)?;
    if !snapshot.has_booked_rooms() {
        tracing::warn!("snapshot has no bookings");
    }

    let report = build_report(&snapshot, config.window, &config.link)?;
    info!(
        "total occupancy {:.2}% over {} days, {} of {} rooms available",
        report.total_occupancy,
        report.days,
        report.available.len(),
        report.rooms.len()
    );
    println!("{}", serde_json::to_string_pretty(&report)?);

    if let Some(handle) = metrics {
        eprintln!("{}", handle.render());
    }
    Ok(())
}
