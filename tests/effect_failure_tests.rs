//! What a failing effect does to the automaton under each failure policy.

mod common;

use common::{AuthInput, AuthState};
use effect_automaton::automaton::{pipe, AutomatonConfig, AutomatonError};
use effect_automaton::builder::{transition, AutomatonBuilder, TransitionBuilder};
use effect_automaton::effects::{Effect, FailurePolicy};
use futures::stream;

fn failing_login(policy: FailurePolicy) -> AutomatonBuilder<AuthState, AuthInput> {
    AutomatonBuilder::new()
        .initial(AuthState::LoggedOut)
        .on_effect_failure(policy)
        .transition(
            TransitionBuilder::new()
                .on(AuthInput::Login)
                .from(AuthState::LoggedOut)
                .to(AuthState::LoggingIn)
                .effect(|| {
                    Effect::try_from_stream(stream::iter([
                        Ok(AuthInput::LoginOk),
                        Err(anyhow::anyhow!("session store unavailable")),
                        Ok(AuthInput::Logout),
                    ]))
                }),
        )
        .unwrap()
        .mapping(transition(
            AuthInput::LoginOk,
            AuthState::LoggingIn,
            AuthState::LoggedIn,
        ))
        .mapping(transition(
            AuthInput::Logout,
            AuthState::LoggedIn,
            AuthState::LoggingOut,
        ))
}

#[tokio::test]
async fn terminate_policy_stops_the_automaton() {
    let (sender, inputs) = pipe();
    let automaton = failing_login(FailurePolicy::Terminate)
        .inputs(inputs)
        .build()
        .unwrap();
    let mut replies = automaton.subscribe();

    sender.send(AuthInput::Login).unwrap();
    assert_eq!(
        replies.recv().await.unwrap().unwrap().to_state,
        Some(AuthState::LoggingIn)
    );
    assert_eq!(
        replies.recv().await.unwrap().unwrap().to_state,
        Some(AuthState::LoggedIn)
    );

    let error = replies.recv().await.unwrap_err();
    assert!(matches!(error, AutomatonError::EffectFailed(_)));
    assert!(error.to_string().contains("session store unavailable"));
    assert_eq!(replies.recv().await.unwrap(), None);

    assert_eq!(automaton.state(), AuthState::LoggedIn);
    assert!(matches!(
        automaton.join().await,
        Err(AutomatonError::EffectFailed(_))
    ));
    assert!(matches!(
        sender.send(AuthInput::Logout),
        Err(AutomatonError::InputClosed)
    ));
}

#[tokio::test]
async fn isolate_policy_drops_only_the_failing_effect() {
    let (sender, inputs) = pipe();
    let automaton = failing_login(FailurePolicy::Isolate)
        .inputs(inputs)
        .build()
        .unwrap();
    let replies = automaton.subscribe();

    sender.send(AuthInput::Login).unwrap();
    sender.send(AuthInput::Logout).unwrap();
    sender.complete();

    let replies = replies.collect().await.unwrap();
    let inputs: Vec<_> = replies.iter().map(|reply| reply.input).collect();
    // The effect's trailing `Logout` never arrives; the external one does.
    assert_eq!(
        inputs,
        vec![AuthInput::Login, AuthInput::LoginOk, AuthInput::Logout]
    );
    assert_eq!(automaton.state(), AuthState::LoggingOut);
}

#[tokio::test]
async fn failure_policy_can_come_from_config() {
    let config = AutomatonConfig::from_json(
        r#"{ "on_effect_failure": "isolate", "name": "auth", "reply_capacity": 16 }"#,
    )
    .unwrap();
    assert_eq!(config.on_effect_failure, FailurePolicy::Isolate);

    let (sender, inputs) = pipe();
    let automaton = AutomatonBuilder::new()
        .initial(AuthState::LoggedOut)
        .inputs(inputs)
        .config(config)
        .mapping(
            TransitionBuilder::new()
                .on(AuthInput::Login)
                .from_any()
                .to(AuthState::LoggingIn)
                .effect(|| Effect::fail(anyhow::anyhow!("timeout")))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();
    let mut replies = automaton.subscribe();

    sender.send(AuthInput::Login).unwrap();
    sender.send(AuthInput::Login).unwrap();
    assert!(replies.recv().await.unwrap().is_some());
    assert!(replies.recv().await.unwrap().is_some());

    sender.complete();
    assert_eq!(replies.recv().await.unwrap(), None);
}
