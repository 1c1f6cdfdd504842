//! Login/logout automaton with simulated network round-trips.
//!
//! Run with: cargo run --example auth_flow

use effect_automaton::automaton::{pipe, AutomatonConfig};
use effect_automaton::builder::{AutomatonBuilder, TransitionBuilder};
use effect_automaton::core::Guard;
use effect_automaton::effects::{Effect, FlattenStrategy};
use effect_automaton::state_enum;
use std::time::Duration;

state_enum! {
    enum AuthState {
        LoggedOut,
        LoggingIn,
        LoggedIn,
        LoggingOut,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AuthInput {
    Login,
    LoginOk,
    Logout,
    LogoutOk,
    ForceLogout,
}

fn round_trip(reply: AuthInput) -> Effect<AuthInput> {
    Effect::delayed(reply, Duration::from_millis(300))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    let (sender, inputs) = pipe();
    let automaton = AutomatonBuilder::new()
        .initial(AuthState::LoggedOut)
        .inputs(inputs)
        .config(
            AutomatonConfig::new()
                .name("auth")
                .strategy(FlattenStrategy::Latest),
        )
        .transition(
            TransitionBuilder::new()
                .on(AuthInput::Login)
                .from(AuthState::LoggedOut)
                .to(AuthState::LoggingIn)
                .effect(|| round_trip(AuthInput::LoginOk)),
        )?
        .transition(
            TransitionBuilder::new()
                .on(AuthInput::LoginOk)
                .from(AuthState::LoggingIn)
                .to(AuthState::LoggedIn),
        )?
        .transition(
            TransitionBuilder::new()
                .on(AuthInput::Logout)
                .from(AuthState::LoggedIn)
                .to(AuthState::LoggingOut)
                .effect(|| round_trip(AuthInput::LogoutOk)),
        )?
        .transition(
            TransitionBuilder::new()
                .on(AuthInput::LogoutOk)
                .from(AuthState::LoggingOut)
                .to(AuthState::LoggedOut),
        )?
        .transition(
            TransitionBuilder::new()
                .on(AuthInput::ForceLogout)
                .from(Guard::one_of([AuthState::LoggingIn, AuthState::LoggedIn]))
                .to(AuthState::LoggingOut)
                .effect(|| round_trip(AuthInput::LogoutOk)),
        )?
        .build()?;

    println!("=== Auth Flow ===\n");
    let mut replies = automaton.subscribe();

    let script = [
        (AuthInput::Login, 500),
        (AuthInput::Logout, 500),
        (AuthInput::Login, 100),
        (AuthInput::ForceLogout, 500),
    ];
    for (input, pause) in script {
        sender.send(input)?;
        tokio::time::sleep(Duration::from_millis(pause)).await;
    }
    sender.complete();

    while let Some(reply) = replies.recv().await? {
        match &reply.to_state {
            Some(to) => println!("{:?}: {:?} -> {:?}", reply.input, reply.from_state, to),
            None => println!("{:?}: ignored in {:?}", reply.input, reply.from_state),
        }
    }

    println!("\nFinal state: {:?}", automaton.state());
    println!("Outcome: {:?}", automaton.join().await?);
    Ok(())
}
