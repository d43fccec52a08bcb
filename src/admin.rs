// Privileged catalog price updates
// Already-booked line items keep the price they were booked at.

use crate::catalog::{Catalog, Hotel, HotelId, Vehicle, VehicleId};
use crate::error::{
    TravelError, TravelResult, HOTEL_PRICE_NOT_AUTHORIZED, VEHICLE_PRICE_NOT_AUTHORIZED,
};
use crate::money::Money;
use crate::users::{Capabilities, UserId};
use tracing::{info, warn};

pub fn update_hotel_price<C: Capabilities + ?Sized>(
    capabilities: &C,
    actor_id: UserId,
    catalog: &Catalog,
    hotel_id: HotelId,
    new_price: Money,
) -> TravelResult<Hotel> {
    require_admin(capabilities, actor_id, HOTEL_PRICE_NOT_AUTHORIZED)?;
    require_positive(new_price)?;

    let hotel = catalog
        .set_hotel_price(hotel_id, new_price)
        .ok_or(TravelError::HotelNotFound(hotel_id))?;
    info!(actor_id, hotel_id, price = %new_price, "Hotel price updated");
    Ok(hotel)
}

// Vehicles are scanned route by route; the first vehicle with the id is updated.
pub fn update_vehicle_price<C: Capabilities + ?Sized>(
    capabilities: &C,
    actor_id: UserId,
    catalog: &Catalog,
    vehicle_id: VehicleId,
    new_price: Money,
) -> TravelResult<Vehicle> {
    require_admin(capabilities, actor_id, VEHICLE_PRICE_NOT_AUTHORIZED)?;
    require_positive(new_price)?;

    let vehicle = catalog
        .set_vehicle_price(vehicle_id, new_price)
        .ok_or(TravelError::VehicleNotFound(vehicle_id))?;
    info!(actor_id, vehicle_id, price = %new_price, "Vehicle price updated");
    Ok(vehicle)
}

fn require_admin<C: Capabilities + ?Sized>(
    capabilities: &C,
    actor_id: UserId,
    code: i32,
) -> TravelResult<()> {
    if capabilities.is_admin(actor_id) {
        Ok(())
    } else {
        warn!(actor_id, code, "Price update refused: user is not an admin");
        Err(TravelError::NotAuthorized { code, actor_id })
    }
}

fn require_positive(price: Money) -> TravelResult<()> {
    if price.is_positive() {
        Ok(())
    } else {
        Err(TravelError::InvalidAmount(price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::BookingSession;
    use crate::error::ErrorKind;
    use crate::seed;
    use std::sync::Arc;

    struct Everyone;

    impl Capabilities for Everyone {
        fn is_admin(&self, _user_id: UserId) -> bool {
            true
        }
    }

    #[test]
    fn test_admin_updates_hotel_price() {
        let users = seed::demo_users();
        let catalog = seed::demo_catalog();

        let hotel = update_hotel_price(&users, 1001, &catalog, 2, Money::from_major(3500)).unwrap();
        assert_eq!(hotel.price_per_room, Money::from_major(3500));
        assert_eq!(
            catalog.hotel(2).unwrap().price_per_room,
            Money::from_major(3500)
        );
    }

    #[test]
    fn test_customer_cannot_update_hotel_price() {
        let users = seed::demo_users();
        let catalog = seed::demo_catalog();

        let err = update_hotel_price(&users, 101, &catalog, 1, Money::from_major(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotAuthorized);
        assert_eq!(err.code(), 101);
        assert_eq!(
            catalog.hotel(1).unwrap().price_per_room,
            Money::from_major(5000)
        );
    }

    #[test]
    fn test_customer_cannot_update_vehicle_price() {
        let users = seed::demo_users();
        let catalog = seed::demo_catalog();

        let err =
            update_vehicle_price(&users, 102, &catalog, 1001, Money::from_major(1)).unwrap_err();
        assert_eq!(err.code(), 1002);
        assert_eq!(
            catalog.vehicle(1001).unwrap().unit_price,
            Money::from_major(700)
        );
    }

    #[test]
    fn test_unknown_ids_are_not_found() {
        let catalog = seed::demo_catalog();

        let err = update_hotel_price(&Everyone, 1, &catalog, 99, Money::from_major(1)).unwrap_err();
        assert!(matches!(err, TravelError::HotelNotFound(99)));

        let err =
            update_vehicle_price(&Everyone, 1, &catalog, 99, Money::from_major(1)).unwrap_err();
        assert!(matches!(err, TravelError::VehicleNotFound(99)));
    }

    #[test]
    fn test_non_positive_price_rejected() {
        let catalog = seed::demo_catalog();
        let err = update_vehicle_price(&Everyone, 1, &catalog, 1001, Money::ZERO).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(
            catalog.vehicle(1001).unwrap().unit_price,
            Money::from_major(700)
        );
    }

    #[test]
    fn test_price_update_does_not_touch_booked_items() {
        let users = seed::demo_users();
        let catalog = Arc::new(seed::demo_catalog());
        let mut booking = BookingSession::new(101, 101, Arc::clone(&catalog));
        booking.book_vehicle("Hubli", "Goa", 1001, 2).unwrap();

        update_vehicle_price(&users, 1002, &catalog, 1001, Money::from_major(900)).unwrap();

        assert_eq!(
            booking.vehicle_items()[0].total_charge(),
            Money::from_major(1400)
        );
        assert_eq!(
            booking.book_vehicle("Hubli", "Goa", 1001, 2).unwrap(),
            Money::from_major(1800)
        );
    }
}
