// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Auth/onboarding gate.
//!
//! The app shows a loading screen until two things have happened: the auth
//! provider has produced a session (signing in anonymously if needed) and the
//! selected-team preference has loaded. After that the gate decides whether
//! the current screen must be replaced by onboarding or by the main tabs.
//!
//! [`Gate`] is the pure state machine; [`GateRunner`] drives it from an
//! [`AuthProvider`] and a [`PreferenceSource`].

use crate::models::{AppRoute, AuthSession};
use std::future::Future;
use tokio::sync::watch;

/// Auth provider seam: anonymous sign-in plus session change notifications.
pub trait AuthProvider {
    type Error: std::fmt::Display;

    /// Subscribe to session changes. The current value is delivered first.
    fn subscribe(&self) -> watch::Receiver<Option<AuthSession>>;

    /// Start an anonymous session.
    fn sign_in_anonymously(
        &self,
    ) -> impl Future<Output = Result<AuthSession, Self::Error>> + Send;
}

/// Source of the selected-team preference.
pub trait PreferenceSource {
    type Error: std::fmt::Display;

    fn selected_team(&self) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send;
}

/// Whether the app can show its navigation stack yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Auth or preference still loading; show a blocking spinner.
    Initializing,
    Ready,
}

/// Inputs to the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateEvent {
    /// The auth provider reported a session.
    SessionPresent,
    /// The auth provider reported no session.
    SessionAbsent,
    /// Anonymous sign-in failed.
    SignInFailed,
    /// The team preference finished loading.
    PreferenceLoaded(Option<String>),
    /// The user (or a redirect) moved to another screen.
    RouteChanged(AppRoute),
}

/// Actions the gate asks its driver to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateEffect {
    SignInAnonymously,
    /// Emitted once, on the Initializing → Ready transition.
    BecameReady,
    /// Replace the current screen.
    Redirect(AppRoute),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthStatus {
    Waiting,
    SigningIn,
    Initialized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PreferenceStatus {
    Loading,
    Loaded(Option<String>),
}

/// Routing decision once the gate is ready.
///
/// A blank team ID counts as no selection.
pub fn decide_redirect(selected_team: Option<&str>, route: &AppRoute) -> Option<AppRoute> {
    let has_team = selected_team.is_some_and(|t| !t.trim().is_empty());

    match (has_team, route.is_onboarding()) {
        (false, false) => Some(AppRoute::Onboarding),
        (true, true) => Some(AppRoute::Tabs),
        _ => None,
    }
}

/// Auth/onboarding gate state machine.
#[derive(Debug)]
pub struct Gate {
    state: GateState,
    auth: AuthStatus,
    preference: PreferenceStatus,
    route: AppRoute,
    /// Last redirect issued for the condition that is still unmet.
    issued: Option<AppRoute>,
}

impl Gate {
    /// New gate for an app that opened on `route`.
    pub fn new(route: AppRoute) -> Self {
        Self {
            state: GateState::Initializing,
            auth: AuthStatus::Waiting,
            preference: PreferenceStatus::Loading,
            route,
            issued: None,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn route(&self) -> &AppRoute {
        &self.route
    }

    /// Selected team, once loaded.
    pub fn selected_team(&self) -> Option<&str> {
        match &self.preference {
            PreferenceStatus::Loaded(team) => team.as_deref(),
            PreferenceStatus::Loading => None,
        }
    }

    pub fn auth_initialized(&self) -> bool {
        self.auth == AuthStatus::Initialized
    }

    /// Feed one event and collect the resulting effects.
    pub fn handle(&mut self, event: GateEvent) -> Vec<GateEffect> {
        let mut effects = Vec::new();

        match event {
            GateEvent::SessionPresent => self.auth = AuthStatus::Initialized,
            GateEvent::SessionAbsent => {
                if self.auth != AuthStatus::SigningIn {
                    if self.auth == AuthStatus::Waiting {
                        self.auth = AuthStatus::SigningIn;
                    }
                    effects.push(GateEffect::SignInAnonymously);
                }
            }
            // Fail open so the app does not spin forever
            GateEvent::SignInFailed => self.auth = AuthStatus::Initialized,
            GateEvent::PreferenceLoaded(team) => {
                self.preference = PreferenceStatus::Loaded(team);
            }
            GateEvent::RouteChanged(route) => self.route = route,
        }

        if self.state == GateState::Initializing
            && self.auth == AuthStatus::Initialized
            && self.preference != PreferenceStatus::Loading
        {
            self.state = GateState::Ready;
            effects.push(GateEffect::BecameReady);
        }

        if self.state == GateState::Ready {
            effects.extend(self.evaluate_redirect());
        }

        effects
    }

    fn evaluate_redirect(&mut self) -> Option<GateEffect> {
        match decide_redirect(self.selected_team(), &self.route) {
            None => {
                self.issued = None;
                None
            }
            Some(target) if self.issued.as_ref() == Some(&target) => None,
            Some(target) => {
                self.issued = Some(target.clone());
                Some(GateEffect::Redirect(target))
            }
        }
    }
}

/// Drives a [`Gate`] from an auth provider and a preference source.
///
/// The session subscription is taken on construction and released when the
/// runner is dropped.
pub struct GateRunner<A, P> {
    gate: Gate,
    auth: A,
    preferences: P,
    sessions: watch::Receiver<Option<AuthSession>>,
}

impl<A, P> GateRunner<A, P>
where
    A: AuthProvider,
    P: PreferenceSource,
{
    pub fn new(auth: A, preferences: P, route: AppRoute) -> Self {
        let sessions = auth.subscribe();
        Self {
            gate: Gate::new(route),
            auth,
            preferences,
            sessions,
        }
    }

    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    pub fn state(&self) -> GateState {
        self.gate.state()
    }

    /// Run until the gate is ready.
    ///
    /// Returns every effect produced on the way, which includes
    /// [`GateEffect::BecameReady`] and at most one redirect.
    pub async fn initialize(&mut self) -> Vec<GateEffect> {
        // An absent session is signed in (or failed open) inside `apply`, so
        // auth is initialized after this one step.
        let event = session_event(self.sessions.borrow_and_update().is_some());
        let mut effects = self.apply(event).await;

        effects.extend(self.refresh_preference().await);
        effects
    }

    /// Reload the team preference (after onboarding saves a team, for example).
    ///
    /// A failed load counts as no selection.
    pub async fn refresh_preference(&mut self) -> Vec<GateEffect> {
        let team = match self.preferences.selected_team().await {
            Ok(team) => team,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load team preference");
                None
            }
        };
        tracing::debug!(team = ?team, "Team preference loaded");
        self.gate.handle(GateEvent::PreferenceLoaded(team))
    }

    /// The app moved to another screen.
    pub fn navigate(&mut self, route: AppRoute) -> Vec<GateEffect> {
        self.gate.handle(GateEvent::RouteChanged(route))
    }

    /// Wait for the next session change and apply it.
    ///
    /// Returns `None` once the auth provider has gone away.
    pub async fn next_session_change(&mut self) -> Option<Vec<GateEffect>> {
        self.sessions.changed().await.ok()?;
        let event = session_event(self.sessions.borrow_and_update().is_some());
        Some(self.apply(event).await)
    }

    /// Handle an event, performing any sign-in it asks for.
    async fn apply(&mut self, event: GateEvent) -> Vec<GateEffect> {
        let mut effects = self.gate.handle(event);

        if effects.contains(&GateEffect::SignInAnonymously) {
            match self.auth.sign_in_anonymously().await {
                Ok(session) => {
                    tracing::info!(session_id = %session.session_id, "Signed in anonymously");
                    effects.extend(self.gate.handle(GateEvent::SessionPresent));
                }
                Err(e) => {
                    tracing::error!(error = %e, "Anonymous auth failed");
                    effects.extend(self.gate.handle(GateEvent::SignInFailed));
                }
            }
        }

        effects
    }
}

fn session_event(present: bool) -> GateEvent {
    if present {
        GateEvent::SessionPresent
    } else {
        GateEvent::SessionAbsent
    }
}
