//! Optional extensions to the base camera controller.

#[cfg(feature = "extension_tour_indicator")]
pub mod tour_indicator;
