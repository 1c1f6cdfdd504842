//! Shared fixtures for integration tests.

#![allow(dead_code)]

use effect_automaton::automaton::{pipe, Automaton, InputSender};
use effect_automaton::builder::{transition, transition_with_effect, TransitionBuilder};
use effect_automaton::core::Guard;
use effect_automaton::effects::{Effect, FlattenStrategy};
use effect_automaton::mapping::{reduce_effects, EffectMapping};
use effect_automaton::state_enum;
use std::time::Duration;

state_enum! {
    pub enum AuthState {
        LoggedOut,
        LoggingIn,
        LoggedIn,
        LoggingOut,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthInput {
    Login,
    LoginOk,
    Logout,
    LogoutOk,
    ForceLogout,
}

pub const EFFECT_DELAY: Duration = Duration::from_secs(1);

/// Sends `LoginOk` after a delay, standing in for a login request.
pub fn login_ok() -> Effect<AuthInput> {
    Effect::delayed(AuthInput::LoginOk, EFFECT_DELAY)
}

/// Sends `LogoutOk` after a delay, standing in for a logout request.
pub fn logout_ok() -> Effect<AuthInput> {
    Effect::delayed(AuthInput::LogoutOk, EFFECT_DELAY)
}

pub fn auth_mappings() -> Vec<EffectMapping<AuthState, AuthInput>> {
    vec![
        transition_with_effect(
            AuthInput::Login,
            AuthState::LoggedOut,
            AuthState::LoggingIn,
            login_ok,
        ),
        transition(AuthInput::LoginOk, AuthState::LoggingIn, AuthState::LoggedIn).into(),
        transition_with_effect(
            AuthInput::Logout,
            AuthState::LoggedIn,
            AuthState::LoggingOut,
            logout_ok,
        ),
        transition(AuthInput::LogoutOk, AuthState::LoggingOut, AuthState::LoggedOut).into(),
        TransitionBuilder::new()
            .on(AuthInput::ForceLogout)
            .from(Guard::one_of([AuthState::LoggingIn, AuthState::LoggedIn]))
            .to(AuthState::LoggingOut)
            .effect(logout_ok)
            .build()
            .unwrap(),
    ]
}

pub fn spawn_auth(
    strategy: FlattenStrategy,
) -> (InputSender<AuthInput>, Automaton<AuthState, AuthInput>) {
    let (sender, inputs) = pipe();
    let automaton = Automaton::new(
        AuthState::LoggedOut,
        inputs,
        reduce_effects(auth_mappings()),
        strategy,
    )
    .unwrap();
    (sender, automaton)
}
