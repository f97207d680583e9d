//! Stateful route guard bound to an auth source and a navigator.
//!
//! # Responsibility
//! - Re-evaluate the zone's guard state on every render pass.
//! - Perform one replace-redirect per contiguous denied episode.
//! - Drop side effects of render passes superseded by a newer snapshot.
//!
//! # Invariants
//! - A guard without an auth source cannot be built.
//! - Nested content is produced only in `GuardState::Allowed`.
//! - Dropping the guard unsubscribes it from its auth source.

use crate::auth::{AuthStateSource, Revision, SubscriptionId};
use crate::guard::zone::{GuardState, Zone};
use crate::navigation::{Destinations, Navigator};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Guard wiring errors. These are structural mistakes, not runtime states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardError {
    /// Guard built without an auth state source.
    MissingAuthState(Zone),
    MissingNavigator(Zone),
    MissingDestinations(Zone),
}

impl Display for GuardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingAuthState(zone) => {
                write!(f, "{zone} route guard requires an auth state source")
            }
            Self::MissingNavigator(zone) => {
                write!(f, "{zone} route guard requires a navigator")
            }
            Self::MissingDestinations(zone) => {
                write!(f, "{zone} route guard requires configured destinations")
            }
        }
    }
}

impl Error for GuardError {}

/// Result of one render pass, not yet applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardFrame {
    pub state: GuardState,
    /// Source revision the frame was computed from; `None` before any
    /// publication.
    pub revision: Option<Revision>,
}

/// What `commit` did with a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// State applied without navigation.
    Applied(GuardState),
    /// State is `Denied` and a replace-redirect was issued to this path.
    Redirected(String),
    /// A newer snapshot was published after the frame was rendered.
    Superseded,
}

/// Render output of a guard wrapping nested content `C`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardView<'a, C> {
    Loading,
    Content(C),
    /// Denied; the host shows nothing while the redirect lands.
    Redirecting(&'a str),
}

/// Builder injecting the guard's collaborators.
pub struct RouteGuardBuilder<N: Navigator> {
    zone: Zone,
    source: Option<Box<dyn AuthStateSource>>,
    navigator: Option<N>,
    destinations: Option<Destinations>,
}

impl<N: Navigator> RouteGuardBuilder<N> {
    pub fn auth_source(mut self, source: impl AuthStateSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn navigator(mut self, navigator: N) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn destinations(mut self, destinations: Destinations) -> Self {
        self.destinations = Some(destinations);
        self
    }

    /// Mounts the guard and subscribes it to its auth source.
    ///
    /// # Errors
    /// - `MissingAuthState` when no auth source was supplied.
    /// - `MissingNavigator` / `MissingDestinations` for the other
    ///   collaborators.
    pub fn build(self) -> Result<RouteGuard<N>, GuardError> {
        let zone = self.zone;
        let source = self.source.ok_or(GuardError::MissingAuthState(zone))?;
        let navigator = self.navigator.ok_or(GuardError::MissingNavigator(zone))?;
        let destinations = self
            .destinations
            .ok_or(GuardError::MissingDestinations(zone))?;

        let dirty = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&dirty);
        let subscription = source.subscribe(Box::new(move |_| {
            flag.store(true, Ordering::Release);
        }));
        debug!("event=guard_mount module=guard zone={zone} subscription={subscription}");

        Ok(RouteGuard {
            zone,
            source,
            navigator,
            destinations,
            state: GuardState::Pending,
            redirected: false,
            dirty,
            subscription,
        })
    }
}

/// Auth-gated route guard for one zone.
pub struct RouteGuard<N: Navigator> {
    zone: Zone,
    source: Box<dyn AuthStateSource>,
    navigator: N,
    destinations: Destinations,
    state: GuardState,
    /// Redirect already issued for the current denied episode.
    redirected: bool,
    dirty: Arc<AtomicBool>,
    subscription: SubscriptionId,
}

impl<N: Navigator> RouteGuard<N> {
    pub fn builder(zone: Zone) -> RouteGuardBuilder<N> {
        RouteGuardBuilder {
            zone,
            source: None,
            navigator: None,
            destinations: None,
        }
    }

    /// Guest-zone guard builder.
    pub fn guest() -> RouteGuardBuilder<N> {
        Self::builder(Zone::Guest)
    }

    /// Private-zone guard builder.
    pub fn private() -> RouteGuardBuilder<N> {
        Self::builder(Zone::Private)
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Last committed state.
    pub fn state(&self) -> GuardState {
        self.state
    }

    pub fn destinations(&self) -> &Destinations {
        &self.destinations
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    /// Whether a snapshot was published since the last render pass.
    pub fn needs_render(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Computes a frame from the latest snapshot. Has no side effects on
    /// navigation.
    pub fn render(&self) -> GuardFrame {
        self.dirty.store(false, Ordering::Release);
        let latest = self.source.latest();
        GuardFrame {
            state: self
                .zone
                .evaluate(latest.as_ref().map(|published| &published.value)),
            revision: latest.map(|published| published.revision),
        }
    }

    /// Applies a rendered frame.
    ///
    /// Frames rendered before the latest publication are dropped without
    /// touching state or navigation.
    pub fn commit(&mut self, frame: GuardFrame) -> CommitOutcome {
        let current = self.source.latest().map(|published| published.revision);
        if frame.revision != current {
            debug!(
                "event=guard_commit_dropped module=guard zone={} frame_state={} frame_revision={:?} latest_revision={:?}",
                self.zone, frame.state, frame.revision, current
            );
            return CommitOutcome::Superseded;
        }

        if frame.state != self.state {
            info!(
                "event=guard_transition module=guard zone={} from={} to={}",
                self.zone, self.state, frame.state
            );
            self.state = frame.state;
        }

        if self.state != GuardState::Denied {
            self.redirected = false;
            return CommitOutcome::Applied(self.state);
        }
        if self.redirected {
            return CommitOutcome::Applied(self.state);
        }

        let target = self.zone.redirect_target(&self.destinations).to_string();
        self.navigator.navigate_replace(&target);
        self.redirected = true;
        info!(
            "event=guard_redirect module=guard zone={} target={}",
            self.zone, target
        );
        CommitOutcome::Redirected(target)
    }

    /// Renders and commits in one step.
    pub fn update(&mut self) -> CommitOutcome {
        let frame = self.render();
        self.commit(frame)
    }

    /// View for the last committed state; `content` runs only when allowed.
    pub fn view<C>(&self, content: impl FnOnce() -> C) -> GuardView<'_, C> {
        match self.state {
            GuardState::Pending => GuardView::Loading,
            GuardState::Allowed => GuardView::Content(content()),
            GuardState::Denied => {
                GuardView::Redirecting(self.zone.redirect_target(&self.destinations))
            }
        }
    }
}

impl<N: Navigator> Drop for RouteGuard<N> {
    fn drop(&mut self) {
        self.source.unsubscribe(self.subscription);
        debug!(
            "event=guard_unmount module=guard zone={} subscription={}",
            self.zone, self.subscription
        );
    }
}
