// Catalog of bookable hotels and transport routes
// Read-mostly. Price updates take the write lock so a reader never observes a half-updated record.

use crate::error::{TravelError, TravelResult};
use crate::money::Money;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub type HotelId = u32;
pub type VehicleId = u32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: HotelId,
    pub name: String,
    pub location: String,
    pub rating: u8,
    pub price_per_room: Money,
}

impl Hotel {
    pub fn new(
        id: HotelId,
        name: impl Into<String>,
        location: impl Into<String>,
        rating: u8,
        price_per_room: Money,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            location: location.into(),
            rating,
            price_per_room,
        }
    }
}

impl fmt::Display for Hotel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hotel {} : {} : {} : Rating={} : Price={}",
            self.id, self.name, self.location, self.rating, self.price_per_room
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub kind: String,
    pub franchise: String,
    pub seating_capacity: u32,
    pub source: String,
    pub destination: String,
    pub unit_price: Money,
}

impl Vehicle {
    pub fn new(
        id: VehicleId,
        kind: impl Into<String>,
        franchise: impl Into<String>,
        seating_capacity: u32,
        source: impl Into<String>,
        destination: impl Into<String>,
        unit_price: Money,
    ) -> Self {
        Self {
            id,
            kind: kind.into(),
            franchise: franchise.into(),
            seating_capacity,
            source: source.into(),
            destination: destination.into(),
            unit_price,
        }
    }

    pub fn runs_between(&self, source: &str, destination: &str) -> bool {
        same_place(&self.source, source) && same_place(&self.destination, destination)
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Vehicle {} : {} : {} : Seats={} : {} -> {} : Price={}",
            self.id,
            self.kind,
            self.franchise,
            self.seating_capacity,
            self.source,
            self.destination,
            self.unit_price
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub source: String,
    pub destination: String,
    pub vehicles: Vec<Vehicle>,
}

impl Route {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            vehicles: Vec::new(),
        }
    }

    pub fn with_vehicle(mut self, vehicle: Vehicle) -> Self {
        self.add_vehicle(vehicle);
        self
    }

    pub fn add_vehicle(&mut self, vehicle: Vehicle) {
        self.vehicles.push(vehicle);
    }
}

// Place names compare case-insensitively
fn same_place(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

struct CatalogData {
    hotels: Vec<Hotel>,
    hotel_index: HashMap<HotelId, usize>,
    routes: Vec<Route>,
}

impl CatalogData {
    fn vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.routes.iter().flat_map(|route| route.vehicles.iter())
    }
}

pub struct Catalog {
    data: RwLock<CatalogData>,
}

impl Catalog {
    // Hotel ids must be unique. Vehicle ids are resolved first-match in route order.
    pub fn new(hotels: Vec<Hotel>, routes: Vec<Route>) -> TravelResult<Self> {
        let mut hotel_index = HashMap::with_capacity(hotels.len());
        for (position, hotel) in hotels.iter().enumerate() {
            if hotel_index.insert(hotel.id, position).is_some() {
                return Err(TravelError::DuplicateHotel(hotel.id));
            }
        }

        Ok(Self {
            data: RwLock::new(CatalogData {
                hotels,
                hotel_index,
                routes,
            }),
        })
    }

    pub fn hotel(&self, hotel_id: HotelId) -> Option<Hotel> {
        let data = self.data.read();
        data.hotel_index
            .get(&hotel_id)
            .map(|&position| data.hotels[position].clone())
    }

    pub fn hotels(&self) -> Vec<Hotel> {
        self.data.read().hotels.clone()
    }

    pub fn hotels_in(&self, location: &str) -> Vec<Hotel> {
        self.data
            .read()
            .hotels
            .iter()
            .filter(|hotel| same_place(&hotel.location, location))
            .cloned()
            .collect()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.data.read().routes.clone()
    }

    pub fn vehicles_between(&self, source: &str, destination: &str) -> Vec<Vehicle> {
        self.data
            .read()
            .vehicles()
            .filter(|vehicle| vehicle.runs_between(source, destination))
            .cloned()
            .collect()
    }

    pub fn vehicle_on_route(
        &self,
        source: &str,
        destination: &str,
        vehicle_id: VehicleId,
    ) -> Option<Vehicle> {
        self.data
            .read()
            .vehicles()
            .find(|vehicle| vehicle.runs_between(source, destination) && vehicle.id == vehicle_id)
            .cloned()
    }

    pub fn vehicle(&self, vehicle_id: VehicleId) -> Option<Vehicle> {
        self.data
            .read()
            .vehicles()
            .find(|vehicle| vehicle.id == vehicle_id)
            .cloned()
    }

    pub(crate) fn set_hotel_price(&self, hotel_id: HotelId, price: Money) -> Option<Hotel> {
        let mut data = self.data.write();
        let position = *data.hotel_index.get(&hotel_id)?;
        let hotel = &mut data.hotels[position];
        hotel.price_per_room = price;
        Some(hotel.clone())
    }

    pub(crate) fn set_vehicle_price(
        &self,
        vehicle_id: VehicleId,
        price: Money,
    ) -> Option<Vehicle> {
        let mut data = self.data.write();
        let vehicle = data
            .routes
            .iter_mut()
            .flat_map(|route| route.vehicles.iter_mut())
            .find(|vehicle| vehicle.id == vehicle_id)?;
        vehicle.unit_price = price;
        Some(vehicle.clone())
    }
}
