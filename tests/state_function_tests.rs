//! Rules whose next state is computed from the current one.

use effect_automaton::automaton::{pipe, Automaton, Completion};
use effect_automaton::builder::{AutomatonBuilder, TransitionBuilder};
use effect_automaton::core::Guard;
use effect_automaton::effects::{Effect, FlattenStrategy};
use effect_automaton::mapping::{reduce, Mapping};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CountInput {
    Increment,
    Decrement,
    Reset,
}

fn step(input: CountInput, map: fn(&i64) -> i64) -> Mapping<i64, CountInput> {
    TransitionBuilder::new()
        .on(input)
        .from_any()
        .map(map)
        .build_mapping()
        .unwrap()
}

#[tokio::test]
async fn increment_and_decrement() {
    let (sender, inputs) = pipe();
    let mapping = reduce([
        step(CountInput::Increment, |n| n + 1),
        step(CountInput::Decrement, |n| n - 1),
    ]);
    let automaton = Automaton::new(0i64, inputs, mapping, FlattenStrategy::Merge).unwrap();
    let mut replies = automaton.subscribe();

    for (input, expected) in [
        (CountInput::Increment, 1),
        (CountInput::Increment, 2),
        (CountInput::Decrement, 1),
        (CountInput::Decrement, 0),
    ] {
        sender.send(input).unwrap();
        replies.recv().await.unwrap();
        assert_eq!(automaton.state(), expected);
    }

    sender.send(CountInput::Reset).unwrap();
    let reply = replies.recv().await.unwrap().unwrap();
    assert_eq!(reply.to_state, None);
    assert_eq!(automaton.state(), 0);
}

#[tokio::test]
async fn guarded_state_function() {
    let (sender, inputs) = pipe();
    let automaton = AutomatonBuilder::new()
        .initial(0i64)
        .inputs(inputs)
        .transition(
            TransitionBuilder::new()
                .on(CountInput::Increment)
                .from(Guard::new(|n: &i64| *n < 2))
                .map(|n: &i64| n + 1),
        )
        .unwrap()
        .transition(TransitionBuilder::new().on(CountInput::Reset).from_any().to(0))
        .unwrap()
        .build()
        .unwrap();
    let replies = automaton.subscribe();

    for input in [
        CountInput::Increment,
        CountInput::Increment,
        CountInput::Increment,
        CountInput::Reset,
    ] {
        sender.send(input).unwrap();
    }
    sender.complete();

    let to_states: Vec<_> = replies
        .collect()
        .await
        .unwrap()
        .into_iter()
        .map(|reply| reply.to_state)
        .collect();
    assert_eq!(to_states, vec![Some(1), Some(2), None, Some(0)]);
    assert_eq!(automaton.join().await.unwrap(), Completion::Finished);
}

#[tokio::test(start_paused = true)]
async fn ticking_effect_counts_up() {
    let (sender, inputs) = pipe();
    let ticks = || {
        Effect::from_stream(futures::stream::iter([CountInput::Increment; 3])).then(Effect::delayed(
            CountInput::Increment,
            Duration::from_millis(50),
        ))
    };
    let automaton = AutomatonBuilder::new()
        .initial(0i64)
        .inputs(inputs)
        .strategy(FlattenStrategy::Latest)
        .transition(
            TransitionBuilder::new()
                .on(CountInput::Reset)
                .from_any()
                .to(100)
                .effect(ticks),
        )
        .unwrap()
        .mapping(step(CountInput::Increment, |n| n + 1))
        .build()
        .unwrap();
    let replies = automaton.subscribe();

    sender.send(CountInput::Reset).unwrap();
    sender.complete();

    let replies = replies.collect().await.unwrap();
    // `then` drops the three leading ticks and keeps the delayed one.
    assert_eq!(replies.len(), 2);
    assert_eq!(automaton.state(), 101);
}
