//! Integration tests for the SurrealDB store implementations.

use chrono::Utc;
use roost_core::models::{
    CreateFarm, CreateFlock, CreateUser, CreateWorker, Role, UpdateUser,
};
use roost_core::repository::{AccessStore, FarmStore};
use roost_db::{SurrealAccessStore, SurrealFarmStore, run_migrations};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

async fn setup() -> (SurrealAccessStore<Db>, SurrealFarmStore<Db>) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    run_migrations(&db).await.unwrap();

    (
        SurrealAccessStore::new(db.clone()),
        SurrealFarmStore::new(db),
    )
}

#[tokio::test]
async fn principal_resolves_with_projections() {
    let (access, farms) = setup().await;

    let owner = farms
        .create_user(CreateUser {
            name: "Grace".into(),
            email: "grace@example.com".into(),
            role: Role::Farmer,
        })
        .await
        .unwrap();

    let farm = farms
        .create_farm(CreateFarm {
            owner_id: owner.id,
            name: "Sunrise Farm".into(),
            location: "Valley Rd".into(),
        })
        .await
        .unwrap();

    let hand = farms
        .create_user(CreateUser {
            name: "Henry".into(),
            email: "henry@example.com".into(),
            role: Role::Worker,
        })
        .await
        .unwrap();

    farms
        .create_worker(CreateWorker {
            user_id: hand.id,
            farm_id: farm.id,
            title: "caretaker".into(),
            permissions: vec!["feeding".into(), "weight".into()],
        })
        .await
        .unwrap();

    let resolved = access.find_principal(owner.id).await.unwrap().unwrap();
    assert_eq!(resolved.role, Role::Farmer);
    assert!(resolved.is_active);
    assert_eq!(resolved.owned_farms.len(), 1);
    assert_eq!(resolved.owned_farms[0].id, farm.id);
    assert!(resolved.memberships.is_empty());

    let resolved = access.find_principal(hand.id).await.unwrap().unwrap();
    assert!(resolved.owned_farms.is_empty());
    assert_eq!(resolved.memberships.len(), 1);
    assert_eq!(resolved.memberships[0].farm_id, farm.id);
    assert_eq!(
        resolved.memberships[0].permissions,
        vec!["feeding".to_string(), "weight".to_string()]
    );
}

#[tokio::test]
async fn unknown_principal_is_none() {
    let (access, _farms) = setup().await;
    let found = access.find_principal(Uuid::new_v4()).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn user_flag_updates_round_trip() {
    let (access, farms) = setup().await;

    let user = farms
        .create_user(CreateUser {
            name: "Grace".into(),
            email: "grace@example.com".into(),
            role: Role::Farmer,
        })
        .await
        .unwrap();

    farms
        .update_user(
            user.id,
            UpdateUser {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let resolved = access.find_principal(user.id).await.unwrap().unwrap();
    assert!(!resolved.is_active);
    assert!(resolved.is_verified);
}

#[tokio::test]
async fn farm_ownership_lookup_is_owner_scoped() {
    let (access, farms) = setup().await;

    let owner = farms
        .create_user(CreateUser {
            name: "Grace".into(),
            email: "grace@example.com".into(),
            role: Role::Farmer,
        })
        .await
        .unwrap();
    let stranger = farms
        .create_user(CreateUser {
            name: "Sam".into(),
            email: "sam@example.com".into(),
            role: Role::Farmer,
        })
        .await
        .unwrap();

    let farm = farms
        .create_farm(CreateFarm {
            owner_id: owner.id,
            name: "Sunrise Farm".into(),
            location: "Valley Rd".into(),
        })
        .await
        .unwrap();

    let found = access
        .find_farm_owned_by(farm.id, owner.id)
        .await
        .unwrap();
    assert_eq!(found.unwrap().id, farm.id);

    let found = access
        .find_farm_owned_by(farm.id, stranger.id)
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn membership_lookup_skips_inactive() {
    let (access, farms) = setup().await;

    let owner = farms
        .create_user(CreateUser {
            name: "Grace".into(),
            email: "grace@example.com".into(),
            role: Role::Farmer,
        })
        .await
        .unwrap();
    let hand = farms
        .create_user(CreateUser {
            name: "Henry".into(),
            email: "henry@example.com".into(),
            role: Role::Worker,
        })
        .await
        .unwrap();

    let farm = farms
        .create_farm(CreateFarm {
            owner_id: owner.id,
            name: "Sunrise Farm".into(),
            location: "Valley Rd".into(),
        })
        .await
        .unwrap();

    let worker = farms
        .create_worker(CreateWorker {
            user_id: hand.id,
            farm_id: farm.id,
            title: "caretaker".into(),
            permissions: vec!["feeding".into()],
        })
        .await
        .unwrap();

    let found = access
        .find_active_membership(hand.id, farm.id)
        .await
        .unwrap();
    let (membership, farm_ref) = found.unwrap();
    assert_eq!(membership.id, worker.id);
    assert_eq!(farm_ref.id, farm.id);
    assert_eq!(farm_ref.name, "Sunrise Farm");

    farms.deactivate_worker(worker.id).await.unwrap();

    let found = access
        .find_active_membership(hand.id, farm.id)
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn flock_lookup_and_listing() {
    let (access, farms) = setup().await;

    let owner = farms
        .create_user(CreateUser {
            name: "Grace".into(),
            email: "grace@example.com".into(),
            role: Role::Farmer,
        })
        .await
        .unwrap();
    let farm = farms
        .create_farm(CreateFarm {
            owner_id: owner.id,
            name: "Sunrise Farm".into(),
            location: "Valley Rd".into(),
        })
        .await
        .unwrap();

    let flock = farms
        .create_flock(CreateFlock {
            farm_id: farm.id,
            name: "Layer House A".into(),
            breed: "Lohmann Brown".into(),
            bird_count: 1200,
            hatched_on: Utc::now(),
        })
        .await
        .unwrap();

    let found = access.find_flock(flock.id).await.unwrap().unwrap();
    assert_eq!(found.farm_id, farm.id);
    assert_eq!(found.bird_count, 1200);

    assert!(access.find_flock(Uuid::new_v4()).await.unwrap().is_none());

    let flocks = farms.list_flocks(farm.id).await.unwrap();
    assert_eq!(flocks.len(), 1);
    assert_eq!(flocks[0].id, flock.id);
}
