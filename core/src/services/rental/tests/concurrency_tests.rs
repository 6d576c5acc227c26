use rust_decimal_macros::dec;
use std::sync::Arc;

use super::engine;
use crate::domain::entities::{RentalStatus, Role};
use crate::errors::{DomainError, RentalError};
use crate::repositories::{RentalRepository, VehicleRepository};
use crate::services::rental::NewRental;
use crate::services::test_support::{date, seed_user, seed_vehicle, store};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_have_one_winner() {
    let store = store();
    seed_user(&store, "ana@example.com", "12345678901", Role::Client).await;
    seed_user(&store, "bia@example.com", "98765432100", Role::Client).await;
    let vehicle = seed_vehicle(&store, "ABC1234", dec!(100)).await;
    let engine = Arc::new(engine(&store));

    let handles: Vec<_> = ["ana@example.com", "bia@example.com"]
        .into_iter()
        .cycle()
        .take(8)
        .map(|email| {
            let engine = engine.clone();
            let vehicle_id = vehicle.id;
            tokio::spawn(async move {
                engine
                    .create(
                        email,
                        NewRental {
                            vehicle_id,
                            pickup_date: date(2024, 1, 1),
                            return_date: date(2024, 1, 3),
                            notes: None,
                        },
                    )
                    .await
            })
        })
        .collect();

    let mut wins = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => wins += 1,
            Err(err) => assert_eq!(
                err,
                DomainError::Rental(RentalError::VehicleUnavailable { vehicle_id: vehicle.id })
            ),
        }
    }
    assert_eq!(wins, 1);

    let active = RentalRepository::find_all(store.as_ref())
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.vehicle_id == vehicle.id && r.status == RentalStatus::Active)
        .count();
    assert_eq!(active, 1);
    let stored = VehicleRepository::find_by_id(store.as_ref(), vehicle.id).await.unwrap().unwrap();
    assert!(!stored.is_available);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_complete_and_cancel_have_one_winner() {
    let store = store();
    seed_user(&store, "ana@example.com", "12345678901", Role::Client).await;
    let vehicle = seed_vehicle(&store, "ABC1234", dec!(100)).await;
    let engine = Arc::new(engine(&store));
    let rental = engine
        .create(
            "ana@example.com",
            NewRental {
                vehicle_id: vehicle.id,
                pickup_date: date(2024, 1, 1),
                return_date: date(2024, 1, 2),
                notes: None,
            },
        )
        .await
        .unwrap();

    let complete = {
        let engine = engine.clone();
        tokio::spawn(async move { engine.complete(rental.id).await })
    };
    let cancel = {
        let engine = engine.clone();
        tokio::spawn(async move { engine.cancel(rental.id).await })
    };

    let results = [complete.await.unwrap(), cancel.await.unwrap()];
    let winners: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(winners.len(), 1);

    let loser = results.iter().find_map(|r| r.as_ref().err()).unwrap();
    assert!(matches!(
        loser,
        DomainError::Rental(RentalError::IllegalTransition { .. })
    ));

    let stored = engine.get(rental.id).await.unwrap();
    assert_eq!(stored.status, winners[0].status);
    assert!(engine.check_availability(vehicle.id).await.unwrap());
}
