pub mod care_type;
pub mod schedule;
pub mod timestamp;
pub mod watering;
