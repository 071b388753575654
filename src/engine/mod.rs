//! Pure occupancy, availability and pricing queries over caller-owned
//! rooms and bookings. Nothing here mutates its inputs.

mod availability;
mod error;
mod link;
mod occupancy;
mod pricing;

pub use availability::{available_rooms, available_rooms_with, is_available, is_available_with};
pub use error::{EngineError, Field, Owner, Rule};
pub use link::{NameConvention, RoomLink};
pub use occupancy::{
    hotel_occupancy_percentage, is_occupied, occupancy_percentage, occupancy_percentage_with, occupied_days,
    total_occupancy_percentage, total_occupancy_percentage_with,
};
pub use pricing::{
    calculate_final_price, discount_validation, final_price_for, find_room, price_validation,
    validate_discount, validate_price, MINOR_PER_MAJOR,
};
