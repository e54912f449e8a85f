pub mod listing;
pub mod reservations;

// Re-export key types for convenience
pub use listing::ListingService;
pub use reservations::ReservationService;
