use chrono::NaiveDate;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::InMemoryStore;
use crate::domain::entities::{Rental, RentalStatus, Role, User, Vehicle};
use crate::errors::{DomainError, RentalError, ValidationError};
use crate::repositories::{CloseOutcome, RentalRepository, UserRepository, VehicleRepository};

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

fn user(email: &str, national_id: &str) -> User {
    User::new(
        "Test".to_string(),
        email.to_string(),
        national_id.to_string(),
        "hash".to_string(),
        Role::Client,
    )
}

fn vehicle(plate: &str) -> Vehicle {
    Vehicle::new(
        "Fiat".to_string(),
        "Argo".to_string(),
        2022,
        "HATCH".to_string(),
        plate.to_string(),
        dec!(120.00),
    )
}

#[tokio::test]
async fn test_user_save_rejects_duplicate_email_of_other_user() {
    let store = InMemoryStore::new();
    UserRepository::save(&store, user("a@x.com", "11111111111")).await.unwrap();

    let err = UserRepository::save(&store, user("a@x.com", "22222222222"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        DomainError::ValidationErr(ValidationError::DuplicateValue {
            field: "email".to_string()
        })
    );
}

#[tokio::test]
async fn test_user_save_updates_in_place() {
    let store = InMemoryStore::new();
    let mut u = UserRepository::save(&store, user("a@x.com", "11111111111")).await.unwrap();
    u.deactivate();
    UserRepository::save(&store, u.clone()).await.unwrap();

    let found = store.find_by_email("a@x.com").await.unwrap().unwrap();
    assert!(!found.is_active);
    assert!(store.exists_by_national_id("11111111111").await.unwrap());
    assert_eq!(UserRepository::find_all(&store).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_open_claims_vehicle_once() {
    let store = InMemoryStore::new();
    let v = VehicleRepository::save(&store, vehicle("ABC1234")).await.unwrap();
    let owner = Uuid::new_v4();

    let first = Rental::new(owner, v.id, date(1), date(3), None, v.daily_rate);
    let second = Rental::new(owner, v.id, date(5), date(6), None, v.daily_rate);

    assert!(store.open(first).await.unwrap().is_some());
    assert!(store.open(second).await.unwrap().is_none());

    let stored = VehicleRepository::find_by_id(&store, v.id).await.unwrap().unwrap();
    assert!(!stored.is_available);
    assert_eq!(RentalRepository::find_all(&store).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_close_releases_vehicle_and_is_single_shot() {
    let store = InMemoryStore::new();
    let v = VehicleRepository::save(&store, vehicle("ABC1234")).await.unwrap();
    let rental = Rental::new(Uuid::new_v4(), v.id, date(1), date(2), None, v.daily_rate);
    let rental = store.open(rental).await.unwrap().unwrap();

    match store.close(rental.id, RentalStatus::Completed).await.unwrap() {
        CloseOutcome::Closed(r) => assert_eq!(r.status, RentalStatus::Completed),
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(
        store.close(rental.id, RentalStatus::Cancelled).await.unwrap(),
        CloseOutcome::NotActive(RentalStatus::Completed)
    );
    assert_eq!(
        store.close(Uuid::new_v4(), RentalStatus::Cancelled).await.unwrap(),
        CloseOutcome::NotFound
    );

    let stored = VehicleRepository::find_by_id(&store, v.id).await.unwrap().unwrap();
    assert!(stored.is_available);
}

#[tokio::test]
async fn test_rentals_ordered_by_pickup_desc() {
    let store = InMemoryStore::new();
    let owner = Uuid::new_v4();
    for d in [3, 10, 1] {
        let r = Rental::new(owner, Uuid::new_v4(), date(d), date(d + 1), None, dec!(10));
        RentalRepository::save(&store, r).await.unwrap();
    }

    let pickups: Vec<_> = store
        .find_by_user_id(owner)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.pickup_date)
        .collect();
    assert_eq!(pickups, vec![date(10), date(3), date(1)]);
}

#[tokio::test]
async fn test_delete_refuses_referenced_vehicle() {
    let store = InMemoryStore::new();
    let v = VehicleRepository::save(&store, vehicle("ABC1234")).await.unwrap();
    let r = Rental::new(Uuid::new_v4(), v.id, date(1), date(2), None, v.daily_rate);
    store.open(r).await.unwrap();

    let err = store.delete(v.id).await.unwrap_err();
    assert_eq!(err, DomainError::Rental(RentalError::VehicleInUse { vehicle_id: v.id }));
    assert!(!store.delete(Uuid::new_v4()).await.unwrap());
}

#[tokio::test]
async fn test_availability_override_blocked_by_active_rental() {
    let store = InMemoryStore::new();
    let v = VehicleRepository::save(&store, vehicle("ABC1234")).await.unwrap();

    let held = store.set_vehicle_availability(v.id, false).await.unwrap().unwrap();
    assert!(!held.is_available);
    store.set_vehicle_availability(v.id, true).await.unwrap();

    let r = Rental::new(Uuid::new_v4(), v.id, date(1), date(2), None, v.daily_rate);
    store.open(r).await.unwrap();
    assert!(store.set_vehicle_availability(v.id, true).await.is_err());
    assert!(store.set_vehicle_availability(Uuid::new_v4(), true).await.unwrap().is_none());
}

#[tokio::test]
async fn test_vehicle_plate_uniqueness_and_category_filter() {
    let store = InMemoryStore::new();
    VehicleRepository::save(&store, vehicle("ABC1234")).await.unwrap();
    assert!(VehicleRepository::save(&store, vehicle("ABC1234")).await.is_err());

    let mut suv = vehicle("XYZ9876");
    suv.category = "SUV".to_string();
    VehicleRepository::save(&store, suv).await.unwrap();

    assert_eq!(store.find_by_category("SUV").await.unwrap().len(), 1);
    assert_eq!(store.find_by_available_true().await.unwrap().len(), 2);
    assert!(store.exists_by_plate("XYZ9876").await.unwrap());
}

#[tokio::test]
async fn test_modify_applies_to_stored_row_and_rolls_back_on_refusal() {
    let store = InMemoryStore::new();
    let saved = UserRepository::save(&store, user("a@x.com", "11111111111")).await.unwrap();

    let changed = store
        .modify(saved.id, Box::new(|u: &mut User| -> Result<(), DomainError> {
            u.set_role(Role::Staff);
            Ok(())
        }))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(changed.role, Role::Staff);

    let refused = store
        .modify(saved.id, Box::new(|u: &mut User| -> Result<(), DomainError> {
            u.deactivate();
            Err(DomainError::BusinessRule {
                message: "refused".to_string(),
            })
        }))
        .await;
    assert!(refused.is_err());

    let stored = UserRepository::find_by_id(&store, saved.id).await.unwrap().unwrap();
    assert_eq!(stored.role, Role::Staff);
    assert!(stored.is_active);
    assert!(store.modify(Uuid::new_v4(), Box::new(|_: &mut User| -> Result<(), DomainError> { Ok(()) })).await.unwrap().is_none());
}

#[tokio::test]
async fn test_vehicle_save_keeps_stored_availability() {
    let store = InMemoryStore::new();
    let saved = VehicleRepository::save(&store, vehicle("ABC1D23")).await.unwrap();
    let rental = Rental::new(Uuid::new_v4(), saved.id, date(1), date(2), None, saved.daily_rate);
    assert!(store.open(rental).await.unwrap().is_some());

    let mut stale = saved.clone();
    stale.model = "Argo Trekking".to_string();
    let written = VehicleRepository::save(&store, stale).await.unwrap();

    assert!(!written.is_available);
    assert_eq!(written.model, "Argo Trekking");
    assert!(store.find_by_available_true().await.unwrap().is_empty());
}
