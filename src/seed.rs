// Demo data set: the hotels, routes and users the travel desk starts with
use crate::catalog::{Catalog, Hotel, Route, Vehicle};
use crate::money::Money;
use crate::users::{Role, User, UserDirectory};

pub fn demo_hotels() -> Vec<Hotel> {
    vec![
        Hotel::new(1, "Denissons", "Hubli", 5, Money::from_major(5000)),
        Hotel::new(2, "TravelInn", "Hubli", 4, Money::from_major(3000)),
        Hotel::new(3, "Pavan'sHotel", "Bangalore", 4, Money::from_major(4000)),
        Hotel::new(4, "Richid", "Bangalore", 3, Money::from_major(3800)),
    ]
}

pub fn demo_routes() -> Vec<Route> {
    vec![
        Route::new("Hubli", "Goa")
            .with_vehicle(Vehicle::new(
                1001,
                "Bus",
                "SRS",
                50,
                "Hubli",
                "Goa",
                Money::from_major(700),
            ))
            .with_vehicle(Vehicle::new(
                2001,
                "Flight",
                "SpiceJet",
                180,
                "Hubli",
                "Goa",
                Money::from_major(5000),
            )),
        Route::new("Hubli", "Bangalore").with_vehicle(Vehicle::new(
            3001,
            "Train",
            "RaniChennama",
            1000,
            "Hubli",
            "Bangalore",
            Money::from_major(800),
        )),
    ]
}

pub fn demo_users() -> UserDirectory {
    UserDirectory::with_users([
        User::new(101, "sachin", "sac@gmail.com", "Hubli", "123al", Role::Customer),
        User::new(102, "alwyn", "alw@gmail.com", "Hubli", "123ay", Role::Customer),
        User::new(103, "pavan", "pav123@gmail.com", "Gadag", "pav123", Role::Customer),
        User::new(1001, "ascii", "as@gmail.com", "Bangalore", "qqq", Role::Admin),
        User::new(1002, "robert", "rob@gmail.com", "Belgaum", "aaa", Role::Admin),
    ])
}

pub fn demo_catalog() -> Catalog {
    // Demo hotel ids are distinct, so construction cannot fail
    match Catalog::new(demo_hotels(), demo_routes()) {
        Ok(catalog) => catalog,
        Err(err) => unreachable!("demo catalog is invalid: {}", err),
    }
}
