use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{seq::SliceRandom, thread_rng};
use std::sync::Arc;
use travel_booking_core::{seed, PaymentMethod, TravelConfig, TravelSession};

// Full book / pay / cancel cycles against the demo catalog
pub fn booking_cycle_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("booking_cycle");

    for cycles in [1usize, 10, 100].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(cycles), cycles, |b, &cycles| {
            let catalog = Arc::new(seed::demo_catalog());
            let users = Arc::new(seed::demo_users());
            let hotel_ids = [1u32, 2, 3, 4];

            b.iter(|| {
                let mut session = TravelSession::new(
                    TravelConfig::default(),
                    Arc::clone(&catalog),
                    Arc::clone(&users),
                );
                session.login(101, "123al").unwrap();
                let mut rng = thread_rng();

                for _ in 0..cycles {
                    let hotel_id = *hotel_ids.choose(&mut rng).unwrap();
                    session.book_hotel(hotel_id, 2).unwrap();
                    session.pay(PaymentMethod::External).unwrap();
                    session.book_vehicle("Hubli", "Goa", 1001, 1).unwrap();
                    session.pay(PaymentMethod::External).unwrap();
                    black_box(session.cancel_and_refund().unwrap());
                }

                black_box(session.wallet_balance())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, booking_cycle_benchmark);
criterion_main!(benches);
