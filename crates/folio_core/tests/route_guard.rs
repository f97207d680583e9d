use folio_core::{
    AuthData, AuthSnapshot, AuthStateStore, CommitOutcome, Destinations, GuardError, GuardState,
    GuardView, HistoryNavigator, NavigationConfig, RouteGuard, Zone,
};

const HOME: &str = "/home";
const TOP: &str = "/";

fn destinations() -> Destinations {
    NavigationConfig::from_json_str(r#"{ "home": "/home", "top": "/" }"#)
        .unwrap()
        .validate()
        .unwrap()
}

fn mount(
    zone: Zone,
    store: &AuthStateStore,
    history: HistoryNavigator,
) -> RouteGuard<HistoryNavigator> {
    RouteGuard::builder(zone)
        .auth_source(store.clone())
        .navigator(history)
        .destinations(destinations())
        .build()
        .unwrap()
}

fn screen(path: &str) -> HistoryNavigator {
    let mut history = HistoryNavigator::new("/welcome");
    history.push(path);
    history
}

#[test]
fn loading_snapshots_are_pending_for_both_zones_regardless_of_data() {
    let snapshots = [
        AuthSnapshot::loading(),
        AuthSnapshot {
            is_loading: true,
            data: Some(AuthData {
                is_authenticated: true,
            }),
        },
        AuthSnapshot {
            is_loading: true,
            data: Some(AuthData {
                is_authenticated: false,
            }),
        },
    ];

    for snapshot in snapshots {
        let store = AuthStateStore::with_snapshot(snapshot);
        for zone in [Zone::Guest, Zone::Private] {
            let mut guard = mount(zone, &store, screen("/page"));
            assert_eq!(guard.update(), CommitOutcome::Applied(GuardState::Pending));
            assert_eq!(guard.view(|| "page"), GuardView::Loading);
            assert_eq!(guard.navigator().current(), "/page");
        }
    }
}

#[test]
fn resolved_without_data_allows_guest_and_denies_private() {
    let store = AuthStateStore::with_snapshot(AuthSnapshot::resolved(None));

    let mut guest = mount(Zone::Guest, &store, screen("/login"));
    assert_eq!(guest.update(), CommitOutcome::Applied(GuardState::Allowed));
    assert_eq!(guest.view(|| "login form"), GuardView::Content("login form"));

    let mut private = mount(Zone::Private, &store, screen("/notes"));
    assert_eq!(private.update(), CommitOutcome::Redirected(TOP.to_string()));
    assert_eq!(private.state(), GuardState::Denied);
    assert_eq!(private.navigator().current(), TOP);
}

#[test]
fn authenticated_denies_guest_and_allows_private() {
    let store = AuthStateStore::with_snapshot(AuthSnapshot::authenticated());

    let mut guest = mount(Zone::Guest, &store, screen("/login"));
    assert_eq!(guest.update(), CommitOutcome::Redirected(HOME.to_string()));
    assert_eq!(guest.view(|| "login form"), GuardView::Redirecting(HOME));

    let mut private = mount(Zone::Private, &store, screen("/notes"));
    assert_eq!(private.update(), CommitOutcome::Applied(GuardState::Allowed));
    assert_eq!(private.view(|| 42), GuardView::Content(42));
}

#[test]
fn delayed_login_ends_allowed_without_redirecting_on_superseded_tick() {
    let store = AuthStateStore::new();
    let mut guard = mount(Zone::Private, &store, screen("/notes"));

    store.publish(AuthSnapshot::loading());
    assert_eq!(guard.update(), CommitOutcome::Applied(GuardState::Pending));

    store.publish(AuthSnapshot::unauthenticated());
    let denied_tick = guard.render();
    assert_eq!(denied_tick.state, GuardState::Denied);

    store.publish(AuthSnapshot::authenticated());
    assert_eq!(guard.commit(denied_tick), CommitOutcome::Superseded);
    assert_eq!(guard.update(), CommitOutcome::Applied(GuardState::Allowed));

    assert_eq!(guard.state(), GuardState::Allowed);
    assert_eq!(guard.navigator().entries(), ["/welcome", "/notes"]);
}

#[test]
fn coalesced_snapshots_only_reflect_the_latest() {
    let store = AuthStateStore::new();
    let mut guard = mount(Zone::Private, &store, screen("/notes"));

    store.publish(AuthSnapshot::loading());
    store.publish(AuthSnapshot::unauthenticated());
    store.publish(AuthSnapshot::authenticated());

    assert!(guard.needs_render());
    assert_eq!(guard.update(), CommitOutcome::Applied(GuardState::Allowed));
    assert_eq!(guard.navigator().current(), "/notes");
}

#[test]
fn sign_out_flips_open_private_screen_to_denied() {
    let store = AuthStateStore::with_snapshot(AuthSnapshot::authenticated());
    let mut guard = mount(Zone::Private, &store, screen("/notes"));
    assert_eq!(guard.update(), CommitOutcome::Applied(GuardState::Allowed));

    store.publish(AuthSnapshot::resolved(Some(AuthData {
        is_authenticated: false,
    })));
    assert_eq!(guard.update(), CommitOutcome::Redirected(TOP.to_string()));
    assert_eq!(guard.view(|| "notes"), GuardView::Redirecting(TOP));
}

#[test]
fn redirect_replaces_so_back_skips_the_denied_screen() {
    let store = AuthStateStore::with_snapshot(AuthSnapshot::unauthenticated());
    let mut guard = mount(Zone::Private, &store, screen("/notes"));

    guard.update();
    assert_eq!(guard.navigator().len(), 2);
    assert_eq!(guard.navigator().current(), TOP);

    let history = guard.navigator_mut();
    assert_eq!(history.back(), Some("/welcome"));
    assert!(history.entries().iter().all(|entry| entry != "/notes"));
}

#[test]
fn guard_without_auth_source_fails_loudly() {
    let result = RouteGuard::private()
        .navigator(HistoryNavigator::new("/notes"))
        .destinations(destinations())
        .build();

    assert!(matches!(
        result,
        Err(GuardError::MissingAuthState(Zone::Private))
    ));
}

#[test]
fn unmounted_guard_stops_observing() {
    let store = AuthStateStore::new();
    {
        let _guest = mount(Zone::Guest, &store, screen("/login"));
        let _private = mount(Zone::Private, &store, screen("/notes"));
        assert_eq!(store.listener_count(), 2);
    }
    assert_eq!(store.listener_count(), 0);
    store.publish(AuthSnapshot::authenticated());
}
