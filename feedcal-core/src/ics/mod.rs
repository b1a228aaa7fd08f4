//! ICS feed parsing and normalization.
//!
//! Parsing turns the raw document into [`RawCalendarComponent`]s; the
//! normalizer maps the VEVENTs among them onto [`crate::Event`].

mod component;
mod normalize;
mod parse;

pub use component::{DateValue, RawCalendarComponent, RawProperty, VEVENT};
pub use normalize::{normalize, normalize_all, normalize_all_in, normalize_in};
pub use parse::{parse, parse_document};
