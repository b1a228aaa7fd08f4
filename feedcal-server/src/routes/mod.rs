pub mod calendar;
pub mod events;
