//! The gate pipeline.
//!
//! [`Gatekeeper`] holds the injected store handle and token
//! configuration; each method is one gate. Async gates take the
//! context by value and return the augmented context on allow; pure
//! gates borrow it. Store faults never cross a gate boundary: each
//! gate logs the fault and maps it to its own 500-class code.

use roost_auth::{AuthError, TokenConfig, token};
use roost_core::models::{Principal, Role};
use roost_core::repository::AccessStore;
use tracing::{error, warn};
use uuid::Uuid;

use crate::context::{AccessContext, FarmAccess};
use crate::denial::{Denial, DenyCode};

pub struct Gatekeeper<S> {
    store: S,
    tokens: TokenConfig,
}

impl<S: AccessStore> Gatekeeper<S> {
    pub fn new(store: S, tokens: TokenConfig) -> Self {
        Self { store, tokens }
    }

    /// Identity verification stage.
    ///
    /// Takes the raw `Authorization` header value, verifies the bearer
    /// token, and resolves the principal with its ownership and
    /// membership projections. A deactivated or unverified principal
    /// is rejected here, before any authorization gate runs.
    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<AccessContext, Denial> {
        let raw = authorization
            .and_then(|h| h.strip_prefix("Bearer "))
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Denial::new(DenyCode::TokenMissing, "Access token is required"))?;

        let claims = token::decode_access_token(raw, &self.tokens).map_err(|e| match e {
            AuthError::TokenExpired => Denial::new(DenyCode::TokenExpired, "Token has expired"),
            AuthError::TokenInvalid(_) => Denial::new(DenyCode::InvalidToken, "Invalid token"),
            AuthError::Crypto(msg) => {
                error!(error = %msg, "token verification fault");
                Denial::new(DenyCode::AuthError, "Authentication failed")
            }
        })?;

        let principal_id = claims
            .principal_id()
            .map_err(|_| Denial::new(DenyCode::InvalidToken, "Invalid token"))?;

        let principal = self
            .store
            .find_principal(principal_id)
            .await
            .map_err(|e| {
                error!(error = %e, %principal_id, "principal resolution failed");
                Denial::new(DenyCode::AuthError, "Authentication failed")
            })?
            .ok_or_else(|| Denial::new(DenyCode::UserNotFound, "User not found"))?;

        if !principal.is_active {
            return Err(Denial::new(
                DenyCode::UserDeactivated,
                "Account has been deactivated",
            ));
        }
        if !principal.is_verified {
            return Err(Denial::new(
                DenyCode::UserNotVerified,
                "Account is not verified",
            ));
        }

        Ok(AccessContext::new(principal, claims))
    }

    /// Role gate — pass iff the principal's role is in the allow-list.
    ///
    /// The denial echoes the required-role list and the actual role.
    pub fn require_role(&self, ctx: &AccessContext, allowed: &[Role]) -> Result<(), Denial> {
        let actual = ctx.principal.role;
        if allowed.contains(&actual) {
            return Ok(());
        }
        let names: Vec<&str> = allowed.iter().map(Role::as_str).collect();
        Err(Denial::new(
            DenyCode::InsufficientPermissions,
            format!("Access denied. Required role(s): {}", names.join(", ")),
        )
        .with_roles(allowed, actual))
    }

    /// Farm ownership gate — pass iff the principal owns the farm.
    ///
    /// On success the resolved farm is attached as
    /// [`FarmAccess::Owner`].
    pub async fn require_farm_owner(
        &self,
        mut ctx: AccessContext,
        farm_id: Option<Uuid>,
    ) -> Result<AccessContext, Denial> {
        let farm_id =
            farm_id.ok_or_else(|| Denial::new(DenyCode::FarmIdRequired, "Farm ID is required"))?;

        let farm = self
            .store
            .find_farm_owned_by(farm_id, ctx.principal.id)
            .await
            .map_err(|e| {
                error!(error = %e, %farm_id, "farm ownership lookup failed");
                Denial::new(DenyCode::FarmOwnershipError, "Farm access check failed")
            })?
            .ok_or_else(|| {
                Denial::new(
                    DenyCode::FarmAccessDenied,
                    "You do not have access to this farm",
                )
            })?;

        ctx.access = Some(FarmAccess::Owner(farm));
        Ok(ctx)
    }

    /// Farm worker gate — pass if the principal owns the farm or holds
    /// an active worker membership on it.
    ///
    /// Strictly broader than the ownership gate: anything that gate
    /// allows, this gate allows too.
    pub async fn require_farm_access(
        &self,
        mut ctx: AccessContext,
        farm_id: Option<Uuid>,
    ) -> Result<AccessContext, Denial> {
        let farm_id =
            farm_id.ok_or_else(|| Denial::new(DenyCode::FarmIdRequired, "Farm ID is required"))?;

        let access = self
            .resolve_farm_access(&ctx.principal, farm_id)
            .await
            .map_err(|e| {
                error!(error = %e, %farm_id, "farm access lookup failed");
                Denial::new(DenyCode::FarmAccessError, "Farm access check failed")
            })?
            .ok_or_else(|| {
                Denial::new(
                    DenyCode::FarmAccessDenied,
                    "You do not have access to this farm",
                )
            })?;

        ctx.access = Some(access);
        Ok(ctx)
    }

    /// Permission gate — any one of `required` suffices.
    ///
    /// Owners bypass fine-grained checks entirely. If no farm access
    /// has been established on the context, the gate denies: a chain
    /// that reaches a permission check without first running an
    /// ownership/worker/flock gate is misconfigured, and passing it
    /// through would let a route skip resource resolution.
    pub fn require_permission(&self, ctx: &AccessContext, required: &[&str]) -> Result<(), Denial> {
        match &ctx.access {
            Some(FarmAccess::Owner(_)) => Ok(()),
            Some(FarmAccess::Member { worker, .. }) => {
                if worker
                    .permissions
                    .iter()
                    .any(|held| required.contains(&held.as_str()))
                {
                    Ok(())
                } else {
                    Err(Denial::new(
                        DenyCode::InsufficientPermissions,
                        format!(
                            "Access denied. Required permission(s): {}",
                            required.join(", ")
                        ),
                    )
                    .with_permissions(required, worker.permissions.clone()))
                }
            }
            None => {
                warn!(
                    principal_id = %ctx.principal.id,
                    ?required,
                    "permission gate reached without farm access resolution; denying"
                );
                Err(Denial::new(
                    DenyCode::InsufficientPermissions,
                    "Access denied. No farm access established for this request",
                )
                .with_permissions(required, Vec::new()))
            }
        }
    }

    /// Flock access gate — resolve the flock, then grant through
    /// ownership or active membership on its farm.
    ///
    /// Existence is checked before authorization, so a nonexistent
    /// flock id yields 404 even for a principal with no rights at all.
    pub async fn require_flock_access(
        &self,
        mut ctx: AccessContext,
        flock_id: Option<Uuid>,
    ) -> Result<AccessContext, Denial> {
        let flock_id = flock_id
            .ok_or_else(|| Denial::new(DenyCode::FlockIdRequired, "Flock ID is required"))?;

        let flock = self
            .store
            .find_flock(flock_id)
            .await
            .map_err(|e| {
                error!(error = %e, %flock_id, "flock lookup failed");
                Denial::new(DenyCode::FlockAccessError, "Flock access check failed")
            })?
            .ok_or_else(|| Denial::new(DenyCode::FlockNotFound, "Flock not found"))?;

        let access = self
            .resolve_farm_access(&ctx.principal, flock.farm_id)
            .await
            .map_err(|e| {
                error!(error = %e, %flock_id, "flock access lookup failed");
                Denial::new(DenyCode::FlockAccessError, "Flock access check failed")
            })?
            .ok_or_else(|| {
                Denial::new(
                    DenyCode::FlockAccessDenied,
                    "You do not have access to this flock",
                )
            })?;

        ctx.access = Some(access);
        ctx.flock = Some(flock);
        Ok(ctx)
    }

    /// Resolve the effective access a principal holds on a farm.
    ///
    /// Ownership first (cheaper, grants full rights), membership
    /// second; short-circuits on the first hit. The two lookups are
    /// sequential and dependent, never fanned out.
    async fn resolve_farm_access(
        &self,
        principal: &Principal,
        farm_id: Uuid,
    ) -> roost_core::RoostResult<Option<FarmAccess>> {
        if let Some(farm) = self
            .store
            .find_farm_owned_by(farm_id, principal.id)
            .await?
        {
            return Ok(Some(FarmAccess::Owner(farm)));
        }

        if let Some((worker, farm)) = self
            .store
            .find_active_membership(principal.id, farm_id)
            .await?
        {
            return Ok(Some(FarmAccess::Member { worker, farm }));
        }

        Ok(None)
    }
}
