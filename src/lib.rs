// Travel booking core: catalog, booking lifecycle, payments and refunds

pub mod admin;
pub mod booking;
pub mod catalog;
pub mod config;
pub mod error;
pub mod money;
pub mod payment;
pub mod seed;
pub mod session;
pub mod state;
pub mod users;

// Re-export key types for convenience
pub use admin::{update_hotel_price, update_vehicle_price};
pub use booking::{BookedLineItem, BookingId, BookingSession, LineItemKind};
pub use catalog::{Catalog, Hotel, HotelId, Route, Vehicle, VehicleId};
pub use config::TravelConfig;
pub use error::{ErrorKind, TravelError, TravelResult};
pub use money::Money;
pub use payment::{LedgerEntry, LedgerEntryKind, PaymentLedger, PaymentMethod, PaymentReceipt};
pub use session::{CancellationSummary, Receipt, TravelSession};
pub use state::{transition, BookingEvent, BookingState, BookingStateMachine, Transition};
pub use users::{Capabilities, Role, User, UserDirectory, UserId};
