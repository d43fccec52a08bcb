// Travel desk session
// Ties the logged-in user to their booking cycle and the shared payment ledger. Each user keeps
// their own booking across logins. At most one charge per user is outstanding at a time: it must
// be paid (or cancelled) before anything else is booked.

use crate::admin;
use crate::booking::{BookedLineItem, BookingSession};
use crate::catalog::{Catalog, Hotel, HotelId, Vehicle, VehicleId};
use crate::config::TravelConfig;
use crate::error::{TravelError, TravelResult};
use crate::money::Money;
use crate::payment::{PaymentLedger, PaymentMethod, PaymentReceipt};
use crate::state::BookingState;
use crate::users::{User, UserDirectory, UserId};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CancellationSummary {
    pub cancelled_total: Money,
    pub refunded: Money,
    pub wallet_balance: Money,
}

#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    pub booking_id: u32,
    pub user: User,
    pub state: BookingState,
    pub items: Vec<BookedLineItem>,
    pub total: Money,
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "----- Receipt -----")?;
        writeln!(f, "Name: {}", self.user.name)?;
        writeln!(f, "Email: {}", self.user.email)?;
        writeln!(f, "Location: {}", self.user.location)?;
        writeln!(f, "Booking {} [{}]", self.booking_id, self.state.name())?;
        for item in &self.items {
            writeln!(
                f,
                "  {} x{} : {}",
                item.description(),
                item.quantity(),
                item.total_charge()
            )?;
        }
        write!(f, "Total: {}", self.total)
    }
}

// One user's booking and the charge they still owe on it
struct Desk {
    booking: BookingSession,
    outstanding: Money,
}

pub struct TravelSession {
    config: TravelConfig,
    catalog: Arc<Catalog>,
    users: Arc<UserDirectory>,
    ledger: PaymentLedger,
    desks: HashMap<UserId, Desk>,
    logged_in: Option<UserId>,
}

impl TravelSession {
    pub fn new(config: TravelConfig, catalog: Arc<Catalog>, users: Arc<UserDirectory>) -> Self {
        let ledger = PaymentLedger::new(
            config.payment_id,
            config.payment_mode.clone(),
            config.opening_balance,
        );
        Self {
            config,
            catalog,
            users,
            ledger,
            desks: HashMap::new(),
            logged_in: None,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn ledger(&self) -> &PaymentLedger {
        &self.ledger
    }

    // The logged-in user's booking
    pub fn booking(&self) -> Option<&BookingSession> {
        self.current_desk().map(|desk| &desk.booking)
    }

    pub fn logged_in(&self) -> Option<UserId> {
        self.logged_in
    }

    pub fn wallet_balance(&self) -> Money {
        self.ledger.balance()
    }

    pub fn outstanding(&self) -> Money {
        self.current_desk()
            .map_or(Money::ZERO, |desk| desk.outstanding)
    }

    pub fn booking_state(&self) -> Option<BookingState> {
        self.booking().map(BookingSession::state)
    }

    // Registers a new customer and logs them straight in.
    pub fn sign_up(
        &mut self,
        user_id: UserId,
        name: &str,
        email: &str,
        location: &str,
        password: &str,
    ) -> TravelResult<User> {
        self.users
            .sign_up(user_id, name, email, location, password)?;
        self.login(user_id, password)
    }

    // A user's first login opens a booking for them; later logins pick it up where they left it.
    pub fn login(&mut self, user_id: UserId, password: &str) -> TravelResult<User> {
        self.users.login(user_id, password)?;
        let user = self
            .users
            .find(user_id)
            .ok_or(TravelError::UserNotFound(user_id))?;

        let booking_id = self.config.booking_id;
        let catalog = &self.catalog;
        let desk = self.desks.entry(user_id).or_insert_with(|| Desk {
            booking: BookingSession::new(booking_id, user_id, Arc::clone(catalog)),
            outstanding: Money::ZERO,
        });
        debug!(
            user_id,
            items = desk.booking.line_items().count(),
            outstanding = %desk.outstanding,
            "Booking restored"
        );
        self.logged_in = Some(user_id);
        Ok(user)
    }

    pub fn logout(&mut self) {
        if let Some(user_id) = self.logged_in.take() {
            info!(user_id, "Logged out");
        }
    }

    pub fn profile(&self) -> TravelResult<User> {
        let user_id = self.require_login()?;
        self.users
            .find(user_id)
            .ok_or(TravelError::UserNotFound(user_id))
    }

    pub fn change_password(&self, new_password: &str) -> TravelResult<()> {
        let user_id = self.require_login()?;
        self.users.update_password(user_id, new_password)
    }

    pub fn hotels_in(&self, location: &str) -> TravelResult<Vec<Hotel>> {
        self.require_login()?;
        Ok(self.catalog.hotels_in(location))
    }

    pub fn vehicles_between(&self, source: &str, destination: &str) -> TravelResult<Vec<Vehicle>> {
        self.require_login()?;
        Ok(self.catalog.vehicles_between(source, destination))
    }

    pub fn book_hotel(&mut self, hotel_id: HotelId, rooms: u32) -> TravelResult<Money> {
        let desk = self.open_desk()?;
        let charge = desk.booking.book_hotel(hotel_id, rooms)?;
        desk.outstanding = charge;
        Ok(charge)
    }

    pub fn book_vehicle(
        &mut self,
        source: &str,
        destination: &str,
        vehicle_id: VehicleId,
        tickets: u32,
    ) -> TravelResult<Money> {
        let desk = self.open_desk()?;
        let charge = desk
            .booking
            .book_vehicle(source, destination, vehicle_id, tickets)?;
        desk.outstanding = charge;
        Ok(charge)
    }

    pub fn pay(&mut self, method: PaymentMethod) -> TravelResult<PaymentReceipt> {
        let user_id = self.require_login()?;
        let desk = self
            .desks
            .get_mut(&user_id)
            .ok_or(TravelError::NotLoggedIn)?;
        if !desk.outstanding.is_positive() {
            return Err(TravelError::NothingOwed);
        }

        let receipt = self.ledger.authorize(desk.outstanding, method)?;
        desk.outstanding = Money::ZERO;
        Ok(receipt)
    }

    // Cancels the current cycle and returns the money that was actually collected for it.
    pub fn cancel_and_refund(&mut self) -> TravelResult<CancellationSummary> {
        let user_id = self.require_login()?;
        let desk = match self.desks.get_mut(&user_id) {
            Some(desk)
                if !desk.booking.is_empty()
                    && desk.booking.state() != BookingState::Cancelled =>
            {
                desk
            }
            _ => {
                warn!(user_id, "No bookings to cancel");
                return Err(TravelError::NothingToCancel);
            }
        };

        let cancelled_total = desk.booking.total_booked()?;
        let refunded = cancelled_total.saturating_sub(desk.outstanding);
        let wallet_balance = self.ledger.refund(refunded)?;
        desk.booking.cancellation()?;
        desk.outstanding = Money::ZERO;

        Ok(CancellationSummary {
            cancelled_total,
            refunded,
            wallet_balance,
        })
    }

    pub fn receipt(&self) -> TravelResult<Receipt> {
        let user = self.profile()?;
        let booking = self.booking().ok_or(TravelError::NotLoggedIn)?;
        Ok(Receipt {
            booking_id: booking.booking_id(),
            user,
            state: booking.state(),
            items: booking.line_items().cloned().collect(),
            total: booking.total_booked()?,
        })
    }

    pub fn update_hotel_price(&self, hotel_id: HotelId, new_price: Money) -> TravelResult<Hotel> {
        let actor_id = self.require_login()?;
        admin::update_hotel_price(&*self.users, actor_id, &self.catalog, hotel_id, new_price)
    }

    pub fn update_vehicle_price(
        &self,
        vehicle_id: VehicleId,
        new_price: Money,
    ) -> TravelResult<Vehicle> {
        let actor_id = self.require_login()?;
        admin::update_vehicle_price(&*self.users, actor_id, &self.catalog, vehicle_id, new_price)
    }

    fn require_login(&self) -> TravelResult<UserId> {
        self.logged_in.ok_or(TravelError::NotLoggedIn)
    }

    fn current_desk(&self) -> Option<&Desk> {
        self.logged_in.and_then(|user_id| self.desks.get(&user_id))
    }

    fn open_desk(&mut self) -> TravelResult<&mut Desk> {
        let user_id = self.require_login()?;
        let desk = self
            .desks
            .get_mut(&user_id)
            .ok_or(TravelError::NotLoggedIn)?;
        if desk.outstanding.is_positive() {
            return Err(TravelError::OutstandingCharge(desk.outstanding));
        }
        desk.booking.reopen();
        Ok(desk)
    }
}
