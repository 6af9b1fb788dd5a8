//! Integration tests for the gate pipeline against an in-memory
//! store.

use chrono::Utc;
use roost_access::{DenyCode, FarmAccess, Gatekeeper};
use roost_auth::{TokenConfig, token};
use roost_core::models::{
    CreateFarm, CreateFlock, CreateUser, CreateWorker, Farm, Flock, Principal, Role, UpdateUser,
};
use roost_core::repository::FarmStore;
use roost_db::{SurrealAccessStore, SurrealFarmStore, run_migrations};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

fn test_tokens() -> TokenConfig {
    TokenConfig {
        secret: "test-secret-do-not-use-in-production".into(),
        token_lifetime_secs: 900,
        issuer: "roost-test".into(),
    }
}

async fn setup() -> (Gatekeeper<SurrealAccessStore<Db>>, SurrealFarmStore<Db>) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    run_migrations(&db).await.unwrap();

    let gatekeeper = Gatekeeper::new(SurrealAccessStore::new(db.clone()), test_tokens());
    (gatekeeper, SurrealFarmStore::new(db))
}

async fn seed_user(farms: &SurrealFarmStore<Db>, name: &str, role: Role) -> Principal {
    farms
        .create_user(CreateUser {
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            role,
        })
        .await
        .unwrap()
}

async fn seed_farm(farms: &SurrealFarmStore<Db>, owner_id: Uuid) -> Farm {
    farms
        .create_farm(CreateFarm {
            owner_id,
            name: "Sunrise Farm".into(),
            location: "Valley Rd".into(),
        })
        .await
        .unwrap()
}

async fn seed_flock(farms: &SurrealFarmStore<Db>, farm_id: Uuid) -> Flock {
    farms
        .create_flock(CreateFlock {
            farm_id,
            name: "Layer House A".into(),
            breed: "Lohmann Brown".into(),
            bird_count: 1200,
            hatched_on: Utc::now(),
        })
        .await
        .unwrap()
}

fn bearer(user_id: Uuid) -> String {
    let jwt = token::issue_access_token(user_id, &test_tokens()).unwrap();
    format!("Bearer {jwt}")
}

// -----------------------------------------------------------------------
// Identity stage
// -----------------------------------------------------------------------

#[tokio::test]
async fn missing_token_short_circuits() {
    let (gatekeeper, _farms) = setup().await;
    let denial = gatekeeper.authenticate(None).await.unwrap_err();
    assert_eq!(denial.code, DenyCode::TokenMissing);
    assert_eq!(denial.http_status(), 401);
}

#[tokio::test]
async fn foreign_secret_is_invalid_token() {
    let (gatekeeper, farms) = setup().await;
    let user = seed_user(&farms, "Grace", Role::Farmer).await;

    let foreign = TokenConfig {
        secret: "somebody-elses-secret".into(),
        ..test_tokens()
    };
    let jwt = token::issue_access_token(user.id, &foreign).unwrap();

    let denial = gatekeeper
        .authenticate(Some(&format!("Bearer {jwt}")))
        .await
        .unwrap_err();
    assert_eq!(denial.code, DenyCode::InvalidToken);
    assert_eq!(denial.http_status(), 401);
}

#[tokio::test]
async fn unknown_principal_is_user_not_found() {
    let (gatekeeper, _farms) = setup().await;
    let denial = gatekeeper
        .authenticate(Some(&bearer(Uuid::new_v4())))
        .await
        .unwrap_err();
    assert_eq!(denial.code, DenyCode::UserNotFound);
}

#[tokio::test]
async fn deactivated_principal_rejected_before_authorization() {
    let (gatekeeper, farms) = setup().await;
    let user = seed_user(&farms, "Grace", Role::Farmer).await;
    seed_farm(&farms, user.id).await;

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

    // Owning a farm does not matter; the identity stage rejects first.
    let denial = gatekeeper
        .authenticate(Some(&bearer(user.id)))
        .await
        .unwrap_err();
    assert_eq!(denial.code, DenyCode::UserDeactivated);
    assert_eq!(denial.http_status(), 401);
}

#[tokio::test]
async fn unverified_principal_rejected() {
    let (gatekeeper, farms) = setup().await;
    let user = seed_user(&farms, "Grace", Role::Farmer).await;

    farms
        .update_user(
            user.id,
            UpdateUser {
                is_verified: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let denial = gatekeeper
        .authenticate(Some(&bearer(user.id)))
        .await
        .unwrap_err();
    assert_eq!(denial.code, DenyCode::UserNotVerified);
}

#[tokio::test]
async fn authenticated_context_carries_projections() {
    let (gatekeeper, farms) = setup().await;
    let owner = seed_user(&farms, "Grace", Role::Farmer).await;
    let farm = seed_farm(&farms, owner.id).await;

    let ctx = gatekeeper
        .authenticate(Some(&bearer(owner.id)))
        .await
        .unwrap();
    assert_eq!(ctx.principal.id, owner.id);
    assert_eq!(ctx.principal.owned_farms.len(), 1);
    assert_eq!(ctx.principal.owned_farms[0].id, farm.id);
    assert!(ctx.access.is_none());
    assert!(ctx.flock.is_none());
}

// -----------------------------------------------------------------------
// Farm ownership and worker gates
// -----------------------------------------------------------------------

#[tokio::test]
async fn ownership_gate_allows_owner() {
    let (gatekeeper, farms) = setup().await;
    let owner = seed_user(&farms, "Grace", Role::Farmer).await;
    let farm = seed_farm(&farms, owner.id).await;

    let ctx = gatekeeper
        .authenticate(Some(&bearer(owner.id)))
        .await
        .unwrap();
    let ctx = gatekeeper
        .require_farm_owner(ctx, Some(farm.id))
        .await
        .unwrap();

    match ctx.access.as_ref().unwrap() {
        FarmAccess::Owner(resolved) => assert_eq!(resolved.id, farm.id),
        other => panic!("expected owner access, got {other:?}"),
    }
}

#[tokio::test]
async fn ownership_gate_denies_stranger() {
    let (gatekeeper, farms) = setup().await;
    let owner = seed_user(&farms, "Grace", Role::Farmer).await;
    let stranger = seed_user(&farms, "Sam", Role::Farmer).await;
    let farm = seed_farm(&farms, owner.id).await;

    let ctx = gatekeeper
        .authenticate(Some(&bearer(stranger.id)))
        .await
        .unwrap();
    let denial = gatekeeper
        .require_farm_owner(ctx, Some(farm.id))
        .await
        .unwrap_err();

    assert_eq!(denial.code, DenyCode::FarmAccessDenied);
    assert_eq!(denial.http_status(), 403);
}

#[tokio::test]
async fn worker_gate_is_monotonic_over_ownership() {
    let (gatekeeper, farms) = setup().await;
    let owner = seed_user(&farms, "Grace", Role::Farmer).await;
    let farm = seed_farm(&farms, owner.id).await;

    // Anything the ownership gate allows, the worker gate allows too.
    let ctx = gatekeeper
        .authenticate(Some(&bearer(owner.id)))
        .await
        .unwrap();
    let ctx = gatekeeper
        .require_farm_access(ctx, Some(farm.id))
        .await
        .unwrap();
    assert!(ctx.access.as_ref().unwrap().is_owner());
}

#[tokio::test]
async fn worker_gate_allows_active_membership() {
    let (gatekeeper, farms) = setup().await;
    let owner = seed_user(&farms, "Grace", Role::Farmer).await;
    let hand = seed_user(&farms, "Henry", Role::Worker).await;
    let farm = seed_farm(&farms, owner.id).await;

    farms
        .create_worker(CreateWorker {
            user_id: hand.id,
            farm_id: farm.id,
            title: "caretaker".into(),
            permissions: vec!["feeding".into()],
        })
        .await
        .unwrap();

    let ctx = gatekeeper
        .authenticate(Some(&bearer(hand.id)))
        .await
        .unwrap();
    let ctx = gatekeeper
        .require_farm_access(ctx, Some(farm.id))
        .await
        .unwrap();

    match ctx.access.as_ref().unwrap() {
        FarmAccess::Member { worker, farm: stub } => {
            assert_eq!(worker.user_id, hand.id);
            assert_eq!(stub.id, farm.id);
        }
        other => panic!("expected member access, got {other:?}"),
    }
}

#[tokio::test]
async fn worker_gate_denies_deactivated_membership() {
    let (gatekeeper, farms) = setup().await;
    let owner = seed_user(&farms, "Grace", Role::Farmer).await;
    let hand = seed_user(&farms, "Henry", Role::Worker).await;
    let farm = seed_farm(&farms, owner.id).await;

    let worker = farms
        .create_worker(CreateWorker {
            user_id: hand.id,
            farm_id: farm.id,
            title: "caretaker".into(),
            permissions: vec!["feeding".into()],
        })
        .await
        .unwrap();
    farms.deactivate_worker(worker.id).await.unwrap();

    let ctx = gatekeeper
        .authenticate(Some(&bearer(hand.id)))
        .await
        .unwrap();
    let denial = gatekeeper
        .require_farm_access(ctx, Some(farm.id))
        .await
        .unwrap_err();
    assert_eq!(denial.code, DenyCode::FarmAccessDenied);
}

// -----------------------------------------------------------------------
// Permission gate over resolved access
// -----------------------------------------------------------------------

#[tokio::test]
async fn owner_bypasses_permission_check() {
    let (gatekeeper, farms) = setup().await;
    let owner = seed_user(&farms, "Grace", Role::Farmer).await;
    let farm = seed_farm(&farms, owner.id).await;

    let ctx = gatekeeper
        .authenticate(Some(&bearer(owner.id)))
        .await
        .unwrap();
    let ctx = gatekeeper
        .require_farm_access(ctx, Some(farm.id))
        .await
        .unwrap();

    // Owner holds no explicit permission strings at all.
    assert!(gatekeeper.require_permission(&ctx, &["feeding"]).is_ok());
    assert!(gatekeeper.require_permission(&ctx, &["eggs"]).is_ok());
}

#[tokio::test]
async fn worker_permission_intersection_decides() {
    let (gatekeeper, farms) = setup().await;
    let owner = seed_user(&farms, "Grace", Role::Farmer).await;
    let hand = seed_user(&farms, "Henry", Role::Worker).await;
    let farm = seed_farm(&farms, owner.id).await;

    farms
        .create_worker(CreateWorker {
            user_id: hand.id,
            farm_id: farm.id,
            title: "caretaker".into(),
            permissions: vec!["feeding".into(), "weight".into()],
        })
        .await
        .unwrap();

    let ctx = gatekeeper
        .authenticate(Some(&bearer(hand.id)))
        .await
        .unwrap();
    let ctx = gatekeeper
        .require_farm_access(ctx, Some(farm.id))
        .await
        .unwrap();

    assert!(gatekeeper.require_permission(&ctx, &["weight"]).is_ok());

    let denial = gatekeeper
        .require_permission(&ctx, &["eggs"])
        .unwrap_err();
    assert_eq!(denial.code, DenyCode::InsufficientPermissions);
    assert_eq!(
        denial.required_permissions.as_deref(),
        Some(&["eggs".to_string()][..])
    );
    assert_eq!(
        denial.worker_permissions.as_deref(),
        Some(&["feeding".to_string(), "weight".to_string()][..])
    );
}

// -----------------------------------------------------------------------
// Flock access gate
// -----------------------------------------------------------------------

#[tokio::test]
async fn flock_existence_precedes_authorization() {
    let (gatekeeper, farms) = setup().await;
    // Principal with no rights to any farm at all.
    let nobody = seed_user(&farms, "Sam", Role::Worker).await;

    let ctx = gatekeeper
        .authenticate(Some(&bearer(nobody.id)))
        .await
        .unwrap();
    let denial = gatekeeper
        .require_flock_access(ctx, Some(Uuid::new_v4()))
        .await
        .unwrap_err();

    assert_eq!(denial.code, DenyCode::FlockNotFound);
    assert_eq!(denial.http_status(), 404);
}

#[tokio::test]
async fn flock_gate_denies_outsider() {
    let (gatekeeper, farms) = setup().await;
    let owner = seed_user(&farms, "Grace", Role::Farmer).await;
    let outsider = seed_user(&farms, "Sam", Role::Worker).await;
    let farm = seed_farm(&farms, owner.id).await;
    let flock = seed_flock(&farms, farm.id).await;

    let ctx = gatekeeper
        .authenticate(Some(&bearer(outsider.id)))
        .await
        .unwrap();
    let denial = gatekeeper
        .require_flock_access(ctx, Some(flock.id))
        .await
        .unwrap_err();

    assert_eq!(denial.code, DenyCode::FlockAccessDenied);
    assert_eq!(denial.http_status(), 403);
}

#[tokio::test]
async fn flock_gate_grants_transitively_through_membership() {
    let (gatekeeper, farms) = setup().await;
    let owner = seed_user(&farms, "Grace", Role::Farmer).await;
    let hand = seed_user(&farms, "Henry", Role::Worker).await;
    let farm = seed_farm(&farms, owner.id).await;
    let flock = seed_flock(&farms, farm.id).await;

    farms
        .create_worker(CreateWorker {
            user_id: hand.id,
            farm_id: farm.id,
            title: "caretaker".into(),
            permissions: vec!["feeding".into()],
        })
        .await
        .unwrap();

    let ctx = gatekeeper
        .authenticate(Some(&bearer(hand.id)))
        .await
        .unwrap();
    let ctx = gatekeeper
        .require_flock_access(ctx, Some(flock.id))
        .await
        .unwrap();

    assert_eq!(ctx.flock.as_ref().unwrap().id, flock.id);
    assert!(!ctx.access.as_ref().unwrap().is_owner());
    // The resolved access is on the flock's owning farm.
    assert_eq!(ctx.access.as_ref().unwrap().farm_id(), farm.id);
}

#[tokio::test]
async fn flock_gate_grants_owner_directly() {
    let (gatekeeper, farms) = setup().await;
    let owner = seed_user(&farms, "Grace", Role::Farmer).await;
    let farm = seed_farm(&farms, owner.id).await;
    let flock = seed_flock(&farms, farm.id).await;

    let ctx = gatekeeper
        .authenticate(Some(&bearer(owner.id)))
        .await
        .unwrap();
    let ctx = gatekeeper
        .require_flock_access(ctx, Some(flock.id))
        .await
        .unwrap();

    assert!(ctx.access.as_ref().unwrap().is_owner());
    assert_eq!(ctx.flock.as_ref().unwrap().id, flock.id);
}
