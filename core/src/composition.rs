//! Reducer composition utilities
//!
//! - **`combine_reducers`**: run several reducers on the same state and action
//! - **`scope_reducer`**: embed a child reducer inside a parent feature. It
//!   focuses the parent state on the child's slice, extracts the child's
//!   actions from the parent action type, narrows the environment, and lifts
//!   any effects the child returns back into parent actions.
//!
//! # Examples
//!
//! ```
//! use tasklist_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//! use tasklist_core::composition::scope_reducer;
//!
//! #[derive(Clone, Default)]
//! struct SubState {
//!     value: i32,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum SubAction {
//!     Add(i32),
//! }
//!
//! struct SubReducer;
//!
//! impl Reducer for SubReducer {
//!     type State = SubState;
//!     type Action = SubAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut SubState, action: SubAction, _env: &()) -> SmallVec<[Effect<SubAction>; 4]> {
//!         let SubAction::Add(n) = action;
//!         state.value += n;
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! #[derive(Default)]
//! struct AppState {
//!     sub: SubState,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum AppAction {
//!     Sub(SubAction),
//!     Other,
//! }
//!
//! fn sub_state(state: &mut AppState) -> &mut SubState {
//!     &mut state.sub
//! }
//!
//! fn sub_action(action: AppAction) -> Option<SubAction> {
//!     match action {
//!         AppAction::Sub(action) => Some(action),
//!         AppAction::Other => None,
//!     }
//! }
//!
//! fn unit_env(env: &()) -> &() {
//!     env
//! }
//!
//! let scoped = scope_reducer(SubReducer, sub_state, sub_action, AppAction::Sub, unit_env);
//!
//! let mut state = AppState::default();
//! let _ = scoped.reduce(&mut state, AppAction::Sub(SubAction::Add(3)), &());
//! let _ = scoped.reduce(&mut state, AppAction::Other, &());
//! assert_eq!(state.sub.value, 3);
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;

/// Boxed reducer that can live inside a [`CombinedReducer`]
pub type BoxedReducer<S, A, E> = Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer sees a clone of the action, in order, and all effects are
/// concatenated in the same order.
///
/// # Examples
///
/// ```
/// use tasklist_core::{effect::Effect, reducer::Reducer, SmallVec};
/// use tasklist_core::composition::{combine_reducers, BoxedReducer};
///
/// #[derive(Default)]
/// struct AppState {
///     counter: i32,
///     logged: bool,
/// }
///
/// #[derive(Clone)]
/// enum AppAction {
///     Increment,
/// }
///
/// struct CounterReducer;
/// struct LoggingReducer;
///
/// impl Reducer for CounterReducer {
///     type State = AppState;
///     type Action = AppAction;
///     type Environment = ();
///
///     fn reduce(&self, state: &mut AppState, _action: AppAction, _env: &()) -> SmallVec<[Effect<AppAction>; 4]> {
///         state.counter += 1;
///         SmallVec::new()
///     }
/// }
///
/// impl Reducer for LoggingReducer {
///     type State = AppState;
///     type Action = AppAction;
///     type Environment = ();
///
///     fn reduce(&self, state: &mut AppState, _action: AppAction, _env: &()) -> SmallVec<[Effect<AppAction>; 4]> {
///         state.logged = true;
///         SmallVec::new()
///     }
/// }
///
/// let reducers: Vec<BoxedReducer<AppState, AppAction, ()>> =
///     vec![Box::new(CounterReducer), Box::new(LoggingReducer)];
/// let combined = combine_reducers(reducers);
///
/// let mut state = AppState::default();
/// let _ = combined.reduce(&mut state, AppAction::Increment, &());
/// assert_eq!(state.counter, 1);
/// assert!(state.logged);
/// ```
#[must_use]
pub fn combine_reducers<S, A, E>(reducers: Vec<BoxedReducer<S, A, E>>) -> CombinedReducer<S, A, E>
where
    A: Clone,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E> {
    reducers: Vec<BoxedReducer<S, A, E>>,
}

impl<S, A, E> CombinedReducer<S, A, E> {
    /// Number of combined reducers
    #[must_use]
    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    /// True when nothing was combined
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl<S, A, E> std::fmt::Debug for CombinedReducer<S, A, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombinedReducer")
            .field("reducers", &self.reducers.len())
            .finish()
    }
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    A: Clone,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut all_effects = SmallVec::new();

        for reducer in &self.reducers {
            all_effects.extend(reducer.reduce(state, action.clone(), env));
        }

        all_effects
    }
}

/// Scopes a child reducer into a parent feature.
///
/// # Type Parameters
///
/// - `S` / `SubS`: parent and child state
/// - `A` / `SubA`: parent and child action
/// - `E` / `SubE`: parent and child environment
///
/// # Arguments
///
/// - `state`: focuses the parent state on the child's slice
/// - `extract`: returns the child action carried by a parent action, if any
/// - `embed`: wraps child actions produced by effects into parent actions
/// - `env`: narrows the parent environment to the child's
#[must_use]
pub fn scope_reducer<S, SubS, A, SubA, E, SubE, R>(
    reducer: R,
    state: fn(&mut S) -> &mut SubS,
    extract: fn(A) -> Option<SubA>,
    embed: fn(SubA) -> A,
    env: fn(&E) -> &SubE,
) -> ScopedReducer<S, SubS, A, SubA, E, SubE, R>
where
    R: Reducer<State = SubS, Action = SubA, Environment = SubE>,
{
    ScopedReducer {
        reducer,
        state,
        extract,
        embed,
        env,
    }
}

/// A child reducer embedded in a parent feature.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, SubS, A, SubA, E, SubE, R>
where
    R: Reducer<State = SubS, Action = SubA, Environment = SubE>,
{
    reducer: R,
    state: fn(&mut S) -> &mut SubS,
    extract: fn(A) -> Option<SubA>,
    embed: fn(SubA) -> A,
    env: fn(&E) -> &SubE,
}

impl<S, SubS, A, SubA, E, SubE, R> Clone for ScopedReducer<S, SubS, A, SubA, E, SubE, R>
where
    R: Reducer<State = SubS, Action = SubA, Environment = SubE> + Clone,
{
    fn clone(&self) -> Self {
        Self {
            reducer: self.reducer.clone(),
            state: self.state,
            extract: self.extract,
            embed: self.embed,
            env: self.env,
        }
    }
}

impl<S, SubS, A, SubA, E, SubE, R> std::fmt::Debug for ScopedReducer<S, SubS, A, SubA, E, SubE, R>
where
    R: Reducer<State = SubS, Action = SubA, Environment = SubE> + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedReducer")
            .field("reducer", &self.reducer)
            .finish_non_exhaustive()
    }
}

impl<S, SubS, A, SubA, E, SubE, R> Reducer for ScopedReducer<S, SubS, A, SubA, E, SubE, R>
where
    R: Reducer<State = SubS, Action = SubA, Environment = SubE>,
    A: Send + 'static,
    SubA: Send + 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let Some(child_action) = (self.extract)(action) else {
            return SmallVec::new();
        };

        self.reducer
            .reduce((self.state)(state), child_action, (self.env)(env))
            .into_iter()
            .map(|effect| effect.map(self.embed))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smallvec;
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct SubState {
        value: i32,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum SubAction {
        Add(i32),
        Multiply(i32),
        Later,
    }

    struct SubReducer;

    impl Reducer for SubReducer {
        type State = SubState;
        type Action = SubAction;
        type Environment = i32;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                SubAction::Add(n) => {
                    state.value += n + env;
                    smallvec![Effect::None]
                },
                SubAction::Multiply(n) => {
                    state.value *= n;
                    smallvec![Effect::None]
                },
                SubAction::Later => {
                    smallvec![Effect::delay(Duration::from_millis(5), SubAction::Add(1))]
                },
            }
        }
    }

    #[derive(Clone, Default)]
    struct ParentState {
        sub: SubState,
        other: String,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum ParentAction {
        Sub(SubAction),
        Rename(String),
    }

    struct ParentEnv {
        bonus: i32,
    }

    fn sub_state(state: &mut ParentState) -> &mut SubState {
        &mut state.sub
    }

    fn sub_action(action: ParentAction) -> Option<SubAction> {
        match action {
            ParentAction::Sub(action) => Some(action),
            ParentAction::Rename(_) => None,
        }
    }

    fn sub_env(env: &ParentEnv) -> &i32 {
        &env.bonus
    }

    fn both_scoped() -> Vec<BoxedReducer<ParentState, ParentAction, ParentEnv>> {
        vec![
            Box::new(scope_reducer(SubReducer, sub_state, sub_action, ParentAction::Sub, sub_env)),
            Box::new(scope_reducer(SubReducer, sub_state, sub_action, ParentAction::Sub, sub_env)),
        ]
    }

    #[test]
    fn test_combine_reducers_runs_in_order() {
        let combined = combine_reducers(both_scoped());
        let mut state = ParentState {
            sub: SubState { value: 1 },
            other: String::new(),
        };

        let _ = combined.reduce(
            &mut state,
            ParentAction::Sub(SubAction::Multiply(3)),
            &ParentEnv { bonus: 0 },
        );

        assert_eq!(combined.len(), 2);
        assert_eq!(state.sub.value, 9);
    }

    #[test]
    fn test_combine_reducers_concatenates_effects() {
        let combined = combine_reducers(both_scoped());
        let mut state = ParentState::default();

        let effects = combined.reduce(
            &mut state,
            ParentAction::Sub(SubAction::Later),
            &ParentEnv { bonus: 0 },
        );

        assert_eq!(effects.len(), 2);
    }

    #[test]
    fn test_combine_nothing() {
        let combined = combine_reducers::<ParentState, ParentAction, ParentEnv>(Vec::new());
        let mut state = ParentState::default();

        let effects = combined.reduce(
            &mut state,
            ParentAction::Rename("x".to_string()),
            &ParentEnv { bonus: 0 },
        );

        assert!(combined.is_empty());
        assert!(effects.is_empty());
    }

    #[test]
    fn test_scope_reducer() {
        let scoped = scope_reducer(SubReducer, sub_state, sub_action, ParentAction::Sub, sub_env);
        let env = ParentEnv { bonus: 0 };

        let mut state = ParentState {
            sub: SubState { value: 5 },
            other: "test".to_string(),
        };

        let _ = scoped.reduce(&mut state, ParentAction::Sub(SubAction::Add(3)), &env);
        assert_eq!(state.sub.value, 8);
        assert_eq!(state.other, "test");

        let _ = scoped.reduce(&mut state, ParentAction::Sub(SubAction::Multiply(2)), &env);
        assert_eq!(state.sub.value, 16);
    }

    #[test]
    fn test_scope_reducer_ignores_foreign_actions() {
        let scoped = scope_reducer(SubReducer, sub_state, sub_action, ParentAction::Sub, sub_env);
        let mut state = ParentState::default();

        let effects = scoped.reduce(
            &mut state,
            ParentAction::Rename("x".to_string()),
            &ParentEnv { bonus: 0 },
        );

        assert!(effects.is_empty());
        assert_eq!(state.sub.value, 0);
    }

    #[test]
    fn test_scope_reducer_narrows_environment() {
        let scoped = scope_reducer(SubReducer, sub_state, sub_action, ParentAction::Sub, sub_env);
        let mut state = ParentState::default();

        let _ = scoped.reduce(
            &mut state,
            ParentAction::Sub(SubAction::Add(1)),
            &ParentEnv { bonus: 10 },
        );

        assert_eq!(state.sub.value, 11);
    }

    #[test]
    fn test_scope_reducer_lifts_effects() {
        let scoped = scope_reducer(SubReducer, sub_state, sub_action, ParentAction::Sub, sub_env);
        let mut state = ParentState::default();

        let effects = scoped.reduce(
            &mut state,
            ParentAction::Sub(SubAction::Later),
            &ParentEnv { bonus: 0 },
        );

        assert_eq!(effects.len(), 1);
        match &effects[0] {
            Effect::Delay { action, .. } => {
                assert_eq!(**action, ParentAction::Sub(SubAction::Add(1)));
            },
            other => unreachable!("expected delay, got {other:?}"),
        }
    }
}
