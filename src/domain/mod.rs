//! Domain modules (vertical slices): wire types, conversions, sub-clients.

pub mod account;
pub mod instrument;
pub mod position;
pub mod price;
