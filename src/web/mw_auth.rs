//! Enforcement middleware: authentication gate and role gate.

use crate::account::Role;
use crate::prelude::*;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::ctx::Ctx;

/// Turns a failed context resolution into its 401. Must run after
/// `mw_ctx_resolver`.
pub async fn mw_require_auth(ctx: Result<Ctx>, req: Request, next: Next) -> Result<Response> {
    ctx?;
    Ok(next.run(req).await)
}

/// Rejects identities whose role is not in the allowed set. Pure function of
/// the resolved role and the set; stacking several role layers on one route
/// is order-independent.
pub async fn mw_require_role(
    State(allowed): State<&'static [Role]>,
    ctx: Ctx,
    req: Request,
    next: Next,
) -> Result<Response> {
    if !allowed.contains(&ctx.account.role) {
        return Err(Error::ApiForbidden);
    }
    Ok(next.run(req).await)
}

/// Route layer restricting access to the given roles, e.g.
/// `restrict_to!(Role::Admin, Role::LeadGuide)`. Layer it under
/// `mw_require_auth` so the identity is already resolved.
#[macro_export]
macro_rules! restrict_to {
    ($($role:expr),+ $(,)?) => {{
        use $crate::web::mw_auth::mw_require_role;
        axum::middleware::from_fn_with_state(
            &[$($role),+] as &'static [$crate::account::Role],
            mw_require_role,
        )
    }};
}
