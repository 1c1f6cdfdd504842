//! Folding rule tables into a single rule.

use crate::mapping::rule::{EffectMapping, Mapping};

/// Fold multiple [`Mapping`]s into one. Preceding rules have higher priority.
///
/// The folded rule evaluates the rules in order and returns the first
/// non-empty result, or `None` if no rule applies.
///
/// # Example
///
/// ```rust
/// use effect_automaton::mapping::{reduce, Mapping};
///
/// let rules = vec![
///     Mapping::new(|_: &u8, i: &char| (*i == 'a').then_some(1)),
///     Mapping::new(|_: &u8, _: &char| Some(2)),
/// ];
/// let mapping = reduce(rules);
///
/// assert_eq!(mapping.apply(&0, &'a'), Some(1));
/// assert_eq!(mapping.apply(&0, &'b'), Some(2));
/// ```
pub fn reduce<S, I, M>(mappings: M) -> Mapping<S, I>
where
    S: 'static,
    I: 'static,
    M: IntoIterator<Item = Mapping<S, I>>,
{
    let table: Vec<Mapping<S, I>> = mappings.into_iter().collect();
    Mapping::new(move |state, input| table.iter().find_map(|rule| rule.apply(state, input)))
}

/// Fold multiple [`EffectMapping`]s into one. Preceding rules have higher
/// priority.
///
/// Only the winning rule's effect is built; later rules are not evaluated.
pub fn reduce_effects<S, I, M>(mappings: M) -> EffectMapping<S, I>
where
    S: 'static,
    I: 'static,
    M: IntoIterator<Item = EffectMapping<S, I>>,
{
    let table: Vec<EffectMapping<S, I>> = mappings.into_iter().collect();
    EffectMapping::new(move |state, input| table.iter().find_map(|rule| rule.apply(state, input)))
}

impl<S: 'static, I: 'static> FromIterator<Mapping<S, I>> for Mapping<S, I> {
    fn from_iter<T: IntoIterator<Item = Mapping<S, I>>>(iter: T) -> Self {
        reduce(iter)
    }
}

impl<S: 'static, I: 'static> FromIterator<EffectMapping<S, I>> for EffectMapping<S, I> {
    fn from_iter<T: IntoIterator<Item = EffectMapping<S, I>>>(iter: T) -> Self {
        reduce_effects(iter)
    }
}
