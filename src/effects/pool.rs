//! The set of currently active effects, flattened into one feedback stream.

use crate::effects::effect::Effect;
use crate::effects::strategy::FlattenStrategy;
use futures::stream::{SelectAll, StreamExt};

/// Active effects combined according to a [`FlattenStrategy`].
///
/// The pool owns every effect pushed into it and is the only thing that
/// polls them. Dropping the pool (or a superseded effect) cancels it.
#[derive(Debug)]
pub enum EffectPool<I> {
    /// All effects run concurrently
    Merge(SelectAll<Effect<I>>),
    /// At most one effect is live
    Latest(Option<Effect<I>>),
}

impl<I: Send + 'static> EffectPool<I> {
    /// Create an empty pool for the given strategy.
    pub fn new(strategy: FlattenStrategy) -> Self {
        match strategy {
            FlattenStrategy::Merge => EffectPool::Merge(SelectAll::new()),
            FlattenStrategy::Latest => EffectPool::Latest(None),
        }
    }

    /// The strategy this pool was created with.
    pub fn strategy(&self) -> FlattenStrategy {
        match self {
            EffectPool::Merge(_) => FlattenStrategy::Merge,
            EffectPool::Latest(_) => FlattenStrategy::Latest,
        }
    }

    /// Start consuming an effect.
    ///
    /// Returns `true` when a still-running effect was cancelled to make
    /// room for this one (latest strategy only).
    pub fn push(&mut self, effect: Effect<I>) -> bool {
        match self {
            EffectPool::Merge(active) => {
                active.push(effect);
                false
            }
            EffectPool::Latest(slot) => slot.replace(effect).is_some(),
        }
    }

    /// Number of effects still running.
    pub fn len(&self) -> usize {
        match self {
            EffectPool::Merge(active) => active.len(),
            EffectPool::Latest(slot) => usize::from(slot.is_some()),
        }
    }

    /// Whether no effect is running.
    pub fn is_idle(&self) -> bool {
        self.len() == 0
    }

    /// Cancel every running effect.
    pub fn clear(&mut self) {
        match self {
            EffectPool::Merge(active) => active.clear(),
            EffectPool::Latest(slot) => *slot = None,
        }
    }

    /// Wait for the next fed-back input.
    ///
    /// Returns `None` once the pool is idle. Finished effects are removed
    /// from the pool as they complete. Cancel safe.
    pub async fn next(&mut self) -> Option<anyhow::Result<I>> {
        match self {
            EffectPool::Merge(active) => active.next().await,
            EffectPool::Latest(slot) => {
                let effect = slot.as_mut()?;
                let item = effect.next().await;
                if item.is_none() {
                    *slot = None;
                }
                item
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn drain(pool: &mut EffectPool<&'static str>) -> Vec<&'static str> {
        let mut seen = Vec::new();
        while let Some(item) = pool.next().await {
            seen.push(item.unwrap());
        }
        seen
    }

    #[tokio::test(start_paused = true)]
    async fn merge_runs_every_effect() {
        let mut pool = EffectPool::new(FlattenStrategy::Merge);
        pool.push(Effect::delayed("slow", Duration::from_secs(2)));
        pool.push(Effect::delayed("fast", Duration::from_secs(1)));

        assert_eq!(pool.len(), 2);
        assert_eq!(drain(&mut pool).await, vec!["fast", "slow"]);
        assert!(pool.is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn latest_cancels_previous_effect() {
        let mut pool = EffectPool::new(FlattenStrategy::Latest);
        assert!(!pool.push(Effect::delayed("first", Duration::from_secs(1))));
        assert!(pool.push(Effect::delayed("second", Duration::from_secs(2))));

        assert_eq!(pool.len(), 1);
        assert_eq!(drain(&mut pool).await, vec!["second"]);
    }

    #[tokio::test]
    async fn latest_slot_empties_when_effect_finishes() {
        let mut pool = EffectPool::new(FlattenStrategy::Latest);
        pool.push(Effect::just("only"));

        assert!(!pool.is_idle());
        assert_eq!(drain(&mut pool).await, vec!["only"]);
        assert!(pool.is_idle());
        assert!(!pool.push(Effect::none()));
    }

    #[tokio::test]
    async fn clear_cancels_everything() {
        let mut pool = EffectPool::new(FlattenStrategy::Merge);
        pool.push(Effect::just("a"));
        pool.push(Effect::just("b"));
        pool.clear();

        assert!(pool.is_idle());
        assert!(pool.next().await.is_none());
    }

    #[test]
    fn reports_strategy() {
        assert_eq!(
            EffectPool::<u8>::new(FlattenStrategy::Latest).strategy(),
            FlattenStrategy::Latest
        );
    }
}
