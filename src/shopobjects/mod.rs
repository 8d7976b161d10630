//! Shared value objects parsed out of shop responses.
//!
//! These types never talk to the backend themselves; they are built from
//! JSON fragments by the resource caches and carry no staleness state.

mod image;
mod price;

pub use image::Image;
pub use price::{Price, PriceWithQuantity, Quantity, TaxType};
