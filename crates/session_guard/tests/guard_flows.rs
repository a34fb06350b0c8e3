use session_guard::{
    evaluate_guest, evaluate_protected, GuardState, MemoryStore, Outcome, Role, RouteGuard,
    RouteParams, SessionContext, SessionStore, StoredUser, LOGIN_PATH, TOKEN_KEY, USER_KEY,
};

fn stored(role: Role, approved: bool) -> StoredUser {
    StoredUser {
        id: "u1".to_string(),
        name: "Ada".to_string(),
        email: "a@b.com".to_string(),
        role,
        approved,
    }
}

fn ctx_with(user: &StoredUser) -> SessionContext<MemoryStore> {
    let mut ctx = SessionContext::new(MemoryStore::default());
    ctx.set_session("tok", user);
    ctx
}

#[test]
fn anonymous_user_goes_to_login() {
    let mut ctx = SessionContext::new(MemoryStore::default());
    let outcome = evaluate_protected(&mut ctx, &[Role::Buyer], &RouteParams::none());

    assert_eq!(outcome, Outcome::Redirect(LOGIN_PATH.to_string()));
}

#[test]
fn corrupt_record_clears_and_goes_to_login() {
    let mut store = MemoryStore::default();
    store.write(TOKEN_KEY, "tok");
    store.write(USER_KEY, "][");

    let mut ctx = SessionContext::new(store);
    let outcome = evaluate_protected(&mut ctx, &[Role::Buyer], &RouteParams::none());

    assert_eq!(outcome, Outcome::Redirect(LOGIN_PATH.to_string()));
    assert!(!ctx.has_record());
}

#[test]
fn matching_buyer_is_authorized() {
    let mut ctx = ctx_with(&stored(Role::Buyer, true));
    let outcome = evaluate_protected(
        &mut ctx,
        &[Role::Buyer],
        &RouteParams::new("u1", "a@b.com"),
    );

    assert_eq!(outcome, Outcome::Authorized);
}

#[test]
fn admin_skips_parameter_checks() {
    let admin = StoredUser {
        id: "adm".to_string(),
        name: "Root".to_string(),
        email: "root@skyvault.dev".to_string(),
        role: Role::Admin,
        approved: true,
    };
    let mut ctx = ctx_with(&admin);

    // params belong to somebody else entirely; admins never carry them
    let outcome = evaluate_protected(
        &mut ctx,
        &[Role::Admin],
        &RouteParams::new("u9", "x@y.com"),
    );

    assert_eq!(outcome, Outcome::Authorized);
}

#[test]
fn role_mismatch_redirects_to_own_dashboard() {
    // buyer navigating to /creator/u1/a@b.com
    let mut ctx = ctx_with(&stored(Role::Buyer, true));
    let outcome = evaluate_protected(
        &mut ctx,
        &[Role::Creator],
        &RouteParams::new("u1", "a@b.com"),
    );

    assert_eq!(outcome, Outcome::Redirect("/buyer/u1/a@b.com".to_string()));
}

#[test]
fn parameter_mismatch_repairs_to_canonical_path() {
    // buyer navigating to /buyer/u2/x@y.com
    let mut ctx = ctx_with(&stored(Role::Buyer, true));
    let outcome = evaluate_protected(
        &mut ctx,
        &[Role::Buyer],
        &RouteParams::new("u2", "x@y.com"),
    );

    assert_eq!(outcome, Outcome::Redirect("/buyer/u1/a@b.com".to_string()));
}

#[test]
fn unapproved_creator_is_cleared_on_creator_route() {
    let mut ctx = ctx_with(&stored(Role::Creator, false));
    let outcome = evaluate_protected(
        &mut ctx,
        &[Role::Creator],
        &RouteParams::new("u1", "a@b.com"),
    );

    assert_eq!(outcome, Outcome::Redirect(LOGIN_PATH.to_string()));
    assert!(!ctx.has_record());
}

#[test]
fn unapproved_creator_is_cleared_on_role_mismatch_too() {
    // never bounced to the creator dashboard, not even via repair
    let mut ctx = ctx_with(&stored(Role::Creator, false));
    let outcome = evaluate_protected(&mut ctx, &[Role::Buyer], &RouteParams::none());

    assert_eq!(outcome, Outcome::Redirect(LOGIN_PATH.to_string()));
    assert!(!ctx.has_record());
}

#[test]
fn empty_allowed_set_only_requires_authentication() {
    let mut ctx = ctx_with(&stored(Role::Buyer, true));
    let outcome = evaluate_protected(&mut ctx, &[], &RouteParams::none());

    assert_eq!(outcome, Outcome::Authorized);
}

#[test]
fn guest_guard_sends_signed_in_user_home() {
    let mut ctx = ctx_with(&stored(Role::Creator, true));
    assert_eq!(
        evaluate_guest(&mut ctx),
        Some("/creator/u1/a@b.com".to_string())
    );

    let mut admin_ctx = ctx_with(&StoredUser {
        id: "adm".to_string(),
        name: "Root".to_string(),
        email: "root@skyvault.dev".to_string(),
        role: Role::Admin,
        approved: true,
    });
    assert_eq!(
        evaluate_guest(&mut admin_ctx),
        Some("/admin/dashboard".to_string())
    );
}

#[test]
fn guest_guard_discards_corrupt_record_and_renders_form() {
    let mut store = MemoryStore::default();
    store.write(TOKEN_KEY, "tok");
    store.write(USER_KEY, "{\"role\":42}");

    let mut ctx = SessionContext::new(store);
    assert_eq!(evaluate_guest(&mut ctx), None);
    assert!(!ctx.has_record());
}

#[test]
fn route_guard_state_machine() {
    let mut guard = RouteGuard::new();
    assert_eq!(guard.state(), GuardState::Checking);
    assert_eq!(guard.redirect_target(), None);

    let mut ctx = ctx_with(&stored(Role::Buyer, true));
    let state = guard.resolve(&mut ctx, &[Role::Buyer], &RouteParams::new("u1", "a@b.com"));
    assert_eq!(state, GuardState::Authorized);
    assert_eq!(guard.redirect_target(), None);

    let mut guard = RouteGuard::new();
    let mut anonymous = SessionContext::new(MemoryStore::default());
    let state = guard.resolve(&mut anonymous, &[Role::Buyer], &RouteParams::none());
    assert_eq!(state, GuardState::Redirecting);
    assert_eq!(guard.redirect_target(), Some(LOGIN_PATH));
}
