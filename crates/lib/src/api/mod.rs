//!
//! Thin backend fetchers.
//!
//! `ships` answers from a static in-crate catalog (the listing endpoint is
//! mocked upstream); `itineraries` fetches voyage geometry through the
//! retrying network layer.

pub mod errors;
pub mod itineraries;
pub mod ships;

pub use errors::ApiError;
pub use itineraries::fetch_itinerary;
pub use ships::{FetchShipsOptions, FetchShipsResponse, Ship, fetch_ships};
