// Error types for the booking core
use crate::money::Money;
use thiserror::Error;

// Error code reported when a non-admin tries to reprice a hotel
pub const HOTEL_PRICE_NOT_AUTHORIZED: i32 = 101;
// Error code reported when a non-admin tries to reprice a vehicle
pub const VEHICLE_PRICE_NOT_AUTHORIZED: i32 = 1002;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    NotAuthorized,
    InsufficientFunds,
    InvalidInput,
    Unauthenticated,
    Conflict,
    InvalidState,
    Config,
}

#[derive(Error, Debug)]
pub enum TravelError {
    #[error("Hotel not found: {0}")]
    HotelNotFound(u32),

    #[error("Vehicle not found: {0}")]
    VehicleNotFound(u32),

    #[error("User not found: {0}")]
    UserNotFound(u32),

    #[error("User {actor_id} is not an admin")]
    NotAuthorized { code: i32, actor_id: u32 },

    #[error("Insufficient wallet balance: need {required}, have {available}")]
    InsufficientFunds { required: Money, available: Money },

    #[error("Invalid amount: {0}")]
    InvalidAmount(Money),

    #[error("Amount overflow: {0}")]
    AmountOverflow(String),

    #[error("Invalid credentials for user {0}")]
    InvalidCredentials(u32),

    #[error("Please login first")]
    NotLoggedIn,

    #[error("User already exists: {0}")]
    DuplicateUser(u32),

    #[error("Duplicate hotel id in catalog: {0}")]
    DuplicateHotel(u32),

    #[error("No pending booking amount")]
    NothingOwed,

    #[error("No bookings to cancel")]
    NothingToCancel,

    #[error("A charge of {0} is still awaiting payment")]
    OutstandingCharge(Money),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TravelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::HotelNotFound(_) | Self::VehicleNotFound(_) | Self::UserNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::NotAuthorized { .. } => ErrorKind::NotAuthorized,
            Self::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            Self::InvalidAmount(_) | Self::AmountOverflow(_) => ErrorKind::InvalidInput,
            Self::InvalidCredentials(_) | Self::NotLoggedIn => ErrorKind::Unauthenticated,
            Self::DuplicateUser(_) | Self::DuplicateHotel(_) => ErrorKind::Conflict,
            Self::NothingOwed | Self::NothingToCancel | Self::OutstandingCharge(_) => {
                ErrorKind::InvalidState
            }
            Self::Config(_) => ErrorKind::Config,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::NotAuthorized { code, .. } => *code,
            _ => match self.kind() {
                ErrorKind::NotFound => 404,
                ErrorKind::InsufficientFunds => 402,
                ErrorKind::InvalidInput => 400,
                ErrorKind::Unauthenticated => 401,
                ErrorKind::Conflict | ErrorKind::InvalidState => 409,
                ErrorKind::NotAuthorized => 403,
                ErrorKind::Config => 500,
            },
        }
    }
}

impl From<serde_json::Error> for TravelError {
    fn from(err: serde_json::Error) -> Self {
        TravelError::Config(err.to_string())
    }
}

impl From<std::io::Error> for TravelError {
    fn from(err: std::io::Error) -> Self {
        TravelError::Config(err.to_string())
    }
}

pub type TravelResult<T> = Result<T, TravelError>;
