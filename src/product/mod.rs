//! Products and product search.
//!
//! The module splits along the resource's seams:
//!
//! - [`ProductFilter`]: validated search criteria and the search itself
//! - [`Product`]: one product with its lazily fetched sub-resources
//! - [`ProductAttribute`]: a custom attribute entry
//! - [`ProductSlideshow`]: the fetch-once slideshow image list

mod attribute;
mod filter;
#[allow(clippy::module_inception)]
mod product;
mod slideshow;

pub use attribute::ProductAttribute;
pub use filter::ProductFilter;
pub use product::Product;
pub use slideshow::ProductSlideshow;
