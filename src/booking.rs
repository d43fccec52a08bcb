// Booking session: the line items booked in one cycle and the state machine they drive
use crate::catalog::{Catalog, Hotel, HotelId, Vehicle, VehicleId};
use crate::error::{TravelError, TravelResult};
use crate::money::Money;
use crate::state::{BookingState, BookingStateMachine};
use crate::users::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

pub type BookingId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineItemKind {
    Hotel,
    Vehicle,
}

// Snapshot of one booked hotel or vehicle.
// The charge is frozen when the item is booked; later catalog price changes never alter it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookedLineItem {
    source_item_id: u32,
    kind: LineItemKind,
    description: String,
    quantity: u32,
    total_charge: Money,
    booked_at: DateTime<Utc>,
}

impl BookedLineItem {
    fn for_hotel(hotel: &Hotel, rooms: u32) -> TravelResult<Self> {
        let total_charge = charge_for(hotel.price_per_room, rooms)?;
        Ok(Self {
            source_item_id: hotel.id,
            kind: LineItemKind::Hotel,
            description: format!("{} ({})", hotel.name, hotel.location),
            quantity: rooms,
            total_charge,
            booked_at: Utc::now(),
        })
    }

    fn for_vehicle(vehicle: &Vehicle, tickets: u32) -> TravelResult<Self> {
        let total_charge = charge_for(vehicle.unit_price, tickets)?;
        Ok(Self {
            source_item_id: vehicle.id,
            kind: LineItemKind::Vehicle,
            description: format!(
                "{} {} ({} -> {})",
                vehicle.franchise, vehicle.kind, vehicle.source, vehicle.destination
            ),
            quantity: tickets,
            total_charge,
            booked_at: Utc::now(),
        })
    }

    pub fn source_item_id(&self) -> u32 {
        self.source_item_id
    }

    pub fn kind(&self) -> LineItemKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn total_charge(&self) -> Money {
        self.total_charge
    }

    pub fn booked_at(&self) -> DateTime<Utc> {
        self.booked_at
    }
}

pub struct BookingSession {
    booking_id: BookingId,
    user_id: UserId,
    catalog: Arc<Catalog>,
    hotels: Vec<BookedLineItem>,
    vehicles: Vec<BookedLineItem>,
    machine: BookingStateMachine,
}

impl BookingSession {
    pub fn new(booking_id: BookingId, user_id: UserId, catalog: Arc<Catalog>) -> Self {
        Self {
            booking_id,
            user_id,
            catalog,
            hotels: Vec::new(),
            vehicles: Vec::new(),
            machine: BookingStateMachine::new(),
        }
    }

    pub fn booking_id(&self) -> BookingId {
        self.booking_id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn state(&self) -> BookingState {
        self.machine.state()
    }

    pub fn hotel_items(&self) -> &[BookedLineItem] {
        &self.hotels
    }

    pub fn vehicle_items(&self) -> &[BookedLineItem] {
        &self.vehicles
    }

    pub fn line_items(&self) -> impl Iterator<Item = &BookedLineItem> {
        self.hotels.iter().chain(self.vehicles.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.hotels.is_empty() && self.vehicles.is_empty()
    }

    pub fn total_booked(&self) -> TravelResult<Money> {
        Money::checked_sum(self.line_items().map(BookedLineItem::total_charge))
            .ok_or_else(|| self.overflow())
    }

    // Returns the charge for this booking. An unknown hotel yields zero and leaves the
    // state alone.
    pub fn book_hotel(&mut self, hotel_id: HotelId, rooms: u32) -> TravelResult<Money> {
        let Some(hotel) = self.catalog.hotel(hotel_id) else {
            warn!(booking_id = self.booking_id, hotel_id, "Hotel not found");
            return Ok(Money::ZERO);
        };

        let item = BookedLineItem::for_hotel(&hotel, rooms)?;
        let charge = self.admit(&item)?;
        info!(
            booking_id = self.booking_id,
            hotel_id,
            rooms,
            %charge,
            "Hotel booked"
        );
        self.hotels.push(item);
        self.machine.confirm();
        Ok(charge)
    }

    // Returns the charge for this booking. No such vehicle on the route yields zero and leaves
    // the state alone.
    pub fn book_vehicle(
        &mut self,
        source: &str,
        destination: &str,
        vehicle_id: VehicleId,
        tickets: u32,
    ) -> TravelResult<Money> {
        let Some(vehicle) = self.catalog.vehicle_on_route(source, destination, vehicle_id) else {
            warn!(
                booking_id = self.booking_id,
                source,
                destination,
                vehicle_id,
                "Vehicle not found among route matches"
            );
            return Ok(Money::ZERO);
        };

        let item = BookedLineItem::for_vehicle(&vehicle, tickets)?;
        let charge = self.admit(&item)?;
        info!(
            booking_id = self.booking_id,
            vehicle_id,
            tickets,
            %charge,
            "Tickets booked"
        );
        self.vehicles.push(item);
        self.machine.confirm();
        Ok(charge)
    }

    // Cancels the booking and returns the refundable sum of every line item booked in this cycle.
    // An empty booking still transitions to Cancelled and returns zero.
    pub fn cancellation(&mut self) -> TravelResult<Money> {
        let refundable = self.total_booked()?;
        self.machine.cancel();
        info!(booking_id = self.booking_id, %refundable, "Booking cancellation computed");
        Ok(refundable)
    }

    // Starts a new cycle. Items of a cancelled cycle were already refunded, so they are dropped.
    pub fn reopen(&mut self) {
        if self.machine.state() == BookingState::Cancelled {
            self.hotels.clear();
            self.vehicles.clear();
        }
        self.machine.reset();
    }

    // The running total must stay representable so that cancellation can always refund it.
    fn admit(&self, item: &BookedLineItem) -> TravelResult<Money> {
        let charge = item.total_charge();
        self.total_booked()?.checked_add(charge).ok_or_else(|| {
            warn!(booking_id = self.booking_id, %charge, "Booking total would overflow");
            self.overflow()
        })?;
        Ok(charge)
    }

    fn overflow(&self) -> TravelError {
        TravelError::AmountOverflow(format!("booking {} total", self.booking_id))
    }
}

fn charge_for(unit_price: Money, quantity: u32) -> TravelResult<Money> {
    unit_price.checked_times(quantity).ok_or_else(|| {
        TravelError::AmountOverflow(format!("{} x {}", unit_price, quantity))
    })
}
