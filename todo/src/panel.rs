//! Add-item panel: a text buffer plus a slide-in/slide-out lifecycle.
//!
//! The host drives visibility with [`PanelAction::SetVisible`]. Each visibility
//! edge starts a new [`SlideAnimation`] from wherever the panel currently is,
//! and frames are scheduled as delayed [`PanelAction::FrameTick`]s tagged with
//! the edge's generation. When a newer edge supersedes an animation, ticks
//! still in flight for the old generation are ignored, so the last edge always
//! wins.
//!
//! Confirming a non-empty buffer emits [`PanelAction::Submitted`] exactly once
//! through the effect system and starts closing the panel; the host lifts that
//! action into its own domain.

use crate::animation::{OFFSCREEN, RESTING, SlideAnimation};
use crate::config::AnimationConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tasklist_core::{
    effect::Effect,
    environment::Clock,
    reducer::Reducer,
    smallvec, SmallVec,
};
use tasklist_macros::Action;

/// Offsets closer than this are treated as equal
const SETTLE_EPSILON: f64 = 1e-9;

/// Where the panel is in its lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelPhase {
    /// Hidden; nothing rendered
    #[default]
    Closed,
    /// Sliding in
    Opening,
    /// Fully presented and accepting input
    Open,
    /// Sliding out; still rendered until settled
    Closing,
}

impl PanelPhase {
    /// True while a slide is in progress
    #[must_use]
    pub const fn is_animating(self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }

    /// True whenever the panel is at least partly on screen
    #[must_use]
    pub const fn is_presented(self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// State of the add-item panel
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PanelState {
    /// Text buffer, exactly as typed
    pub text: String,
    /// Visibility last requested by the host
    pub visible: bool,
    /// Lifecycle phase
    pub phase: PanelPhase,
    /// Current offset between [`RESTING`] and [`OFFSCREEN`]
    pub offset: f64,
    /// Slide in flight, if any
    pub animation: Option<SlideAnimation>,
    /// Counts visibility edges; stamps animations and their frame ticks
    pub generation: u64,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            text: String::new(),
            visible: false,
            phase: PanelPhase::Closed,
            offset: OFFSCREEN,
            animation: None,
            generation: 0,
        }
    }
}

impl PanelState {
    /// A closed panel with an empty buffer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The buffer with surrounding whitespace removed
    #[must_use]
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }

    /// Whether the confirm affordance is enabled
    #[must_use]
    pub fn confirm_enabled(&self) -> bool {
        !self.trimmed_text().is_empty()
    }

    /// True when no slide is in flight
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.animation.is_none()
    }

    /// Vertical translation for a screen of the given height
    #[must_use]
    pub fn translate_y(&self, screen_height: f64) -> f64 {
        self.offset * screen_height
    }
}

/// Actions for the add-item panel
#[derive(Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PanelAction {
    // ========== Commands ==========
    /// Command: Host sets the desired visibility
    #[command]
    SetVisible {
        /// Desired visibility
        visible: bool,
    },

    /// Command: Buffer edited
    #[command]
    TextChanged {
        /// Full new buffer contents
        text: String,
    },

    /// Command: Confirm (Add button or Enter)
    #[command]
    Confirm,

    /// Command: Cancel button
    #[command]
    Cancel,

    /// Command: Dismissal outside the panel (backdrop, back gesture)
    #[command]
    RequestClose,

    /// Animation frame for the given visibility edge
    FrameTick {
        /// Generation the tick was scheduled for
        generation: u64,
    },

    // ========== Events ==========
    /// Event: A non-empty item was submitted
    #[event]
    Submitted {
        /// Trimmed text
        text: String,
    },
}

/// Environment dependencies for the panel reducer
#[derive(Clone)]
pub struct PanelEnvironment {
    /// Clock sampled on every frame
    pub clock: Arc<dyn Clock>,
    /// Slide timing
    pub animation: AnimationConfig,
}

impl PanelEnvironment {
    /// Creates a new `PanelEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, animation: AnimationConfig) -> Self {
        Self { clock, animation }
    }
}

impl std::fmt::Debug for PanelEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelEnvironment")
            .field("animation", &self.animation)
            .finish_non_exhaustive()
    }
}

/// Reducer for the add-item panel
#[derive(Clone, Debug, Default)]
pub struct PanelReducer;

impl PanelReducer {
    /// Creates a new `PanelReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Handle a visibility request
    ///
    /// Only a change of requested visibility is an edge; repeating the current
    /// value leaves state and any running animation untouched.
    fn set_visible(
        state: &mut PanelState,
        visible: bool,
        env: &PanelEnvironment,
    ) -> SmallVec<[Effect<PanelAction>; 4]> {
        if state.visible == visible {
            return SmallVec::new();
        }

        state.visible = visible;
        state.generation += 1;
        let target = if visible { RESTING } else { OFFSCREEN };

        if (state.offset - target).abs() < SETTLE_EPSILON {
            Self::settle(state, target);
            return SmallVec::new();
        }

        state.phase = if visible {
            PanelPhase::Opening
        } else {
            PanelPhase::Closing
        };
        state.animation = Some(SlideAnimation {
            from: state.offset,
            to: target,
            started_at: env.clock.now(),
            generation: state.generation,
        });
        tracing::debug!(
            visible,
            generation = state.generation,
            from = state.offset,
            "Panel slide started"
        );

        smallvec![Self::schedule_frame(state.generation, env)]
    }

    /// Advance the running animation by one frame
    fn advance(
        state: &mut PanelState,
        generation: u64,
        env: &PanelEnvironment,
    ) -> SmallVec<[Effect<PanelAction>; 4]> {
        let Some(animation) = state.animation else {
            tracing::trace!(generation, "Frame after panel settled");
            return SmallVec::new();
        };

        if animation.generation != generation {
            tracing::trace!(
                generation,
                current = animation.generation,
                "Ignoring superseded panel frame"
            );
            return SmallVec::new();
        }

        let now = env.clock.now();
        if animation.is_finished(now, &env.animation) {
            Self::settle(state, animation.to);
            return SmallVec::new();
        }

        state.offset = animation.offset_at(now, &env.animation);
        smallvec![Self::schedule_frame(generation, env)]
    }

    /// Finish at `offset` and enter the matching resting phase
    fn settle(state: &mut PanelState, offset: f64) {
        state.offset = offset;
        state.animation = None;
        state.phase = if state.visible {
            PanelPhase::Open
        } else {
            PanelPhase::Closed
        };
        tracing::debug!(phase = ?state.phase, generation = state.generation, "Panel settled");
    }

    fn schedule_frame(generation: u64, env: &PanelEnvironment) -> Effect<PanelAction> {
        Effect::delay(
            env.animation.frame_interval(),
            PanelAction::FrameTick { generation },
        )
    }
}

impl Reducer for PanelReducer {
    type State = PanelState;
    type Action = PanelAction;
    type Environment = PanelEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            PanelAction::SetVisible { visible } => Self::set_visible(state, visible, env),

            PanelAction::TextChanged { text } => {
                state.text = text;
                SmallVec::new()
            },

            PanelAction::Confirm => {
                if !state.confirm_enabled() {
                    tracing::trace!("Ignoring confirm with blank buffer");
                    return SmallVec::new();
                }

                let text = state.trimmed_text().to_string();
                state.text.clear();
                tracing::debug!("Panel submitted");

                let mut effects = smallvec![Effect::send(PanelAction::Submitted { text })];
                effects.extend(Self::set_visible(state, false, env));
                effects
            },

            PanelAction::Cancel | PanelAction::RequestClose => {
                state.text.clear();
                Self::set_visible(state, false, env)
            },

            PanelAction::FrameTick { generation } => Self::advance(state, generation, env),

            // Consumed by the host
            PanelAction::Submitted { .. } => SmallVec::new(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)] // Test code can panic
mod tests {
    use super::*;
    use crate::animation::Easing;
    use std::time::Duration;
    use tasklist_testing::{ManualClock, ReducerTest, assertions, test_clock, test_time};

    fn env_with(clock: Arc<dyn Clock>) -> PanelEnvironment {
        PanelEnvironment::new(clock, AnimationConfig::default().with_easing(Easing::Linear))
    }

    fn create_test_env() -> PanelEnvironment {
        env_with(Arc::new(test_clock()))
    }

    fn open_state() -> PanelState {
        PanelState {
            visible: true,
            phase: PanelPhase::Open,
            offset: RESTING,
            generation: 1,
            ..PanelState::default()
        }
    }

    fn show(visible: bool) -> PanelAction {
        PanelAction::SetVisible { visible }
    }

    fn tick(generation: u64) -> PanelAction {
        PanelAction::FrameTick { generation }
    }

    fn typed(text: &str) -> PanelAction {
        PanelAction::TextChanged {
            text: text.to_string(),
        }
    }

    #[test]
    fn test_starts_closed() {
        let state = PanelState::new();
        assert_eq!(state.phase, PanelPhase::Closed);
        assert!((state.offset - OFFSCREEN).abs() < f64::EPSILON);
        assert!(!state.confirm_enabled());
        assert!(state.is_settled());
    }

    #[test]
    fn test_open_starts_animation_and_schedules_frame() {
        ReducerTest::new(PanelReducer::new())
            .with_env(create_test_env())
            .given_state(PanelState::new())
            .when_action(show(true))
            .then_state(|state| {
                assert!(state.visible);
                assert_eq!(state.phase, PanelPhase::Opening);
                assert_eq!(state.generation, 1);
                let animation = state.animation.unwrap_or_else(|| panic!("animation should run"));
                assert!((animation.from - OFFSCREEN).abs() < f64::EPSILON);
                assert!((animation.to - RESTING).abs() < f64::EPSILON);
                assert_eq!(animation.started_at, test_time());
            })
            .then_effects(|effects| {
                assert_eq!(assertions::delayed_actions(effects), vec![&tick(1)]);
            })
            .run();
    }

    #[test]
    fn test_same_visibility_is_noop() {
        ReducerTest::new(PanelReducer::new())
            .with_env(create_test_env())
            .given_state(PanelState::new())
            .when_actions([show(true), show(true)])
            .then_state(|state| {
                assert_eq!(state.generation, 1);
                assert_eq!(state.phase, PanelPhase::Opening);
            })
            .then_effects(assertions::assert_no_effects)
            .run();

        ReducerTest::new(PanelReducer::new())
            .with_env(create_test_env())
            .given_state(PanelState::new())
            .when_action(show(false))
            .then_state(|state| {
                assert_eq!(*state, PanelState::new());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_frames_progress_then_settle_open() {
        let clock = ManualClock::new(test_time());
        let env = env_with(Arc::new(clock.clone()));
        let mut state = PanelState::new();
        let reducer = PanelReducer::new();

        let _ = reducer.reduce(&mut state, show(true), &env);

        clock.advance(Duration::from_millis(150));
        let effects = reducer.reduce(&mut state, tick(1), &env);
        assert!((state.offset - 0.5).abs() < 1e-9);
        assert_eq!(state.phase, PanelPhase::Opening);
        assertions::assert_has_delay_effect(&effects);

        clock.advance(Duration::from_millis(150));
        let effects = reducer.reduce(&mut state, tick(1), &env);
        assert_eq!(state.phase, PanelPhase::Open);
        assert!((state.offset - RESTING).abs() < f64::EPSILON);
        assert!(state.is_settled());
        assertions::assert_no_effects(&effects);
    }

    #[test]
    fn test_tick_after_settle_is_ignored() {
        ReducerTest::new(PanelReducer::new())
            .with_env(create_test_env())
            .given_state(open_state())
            .when_action(tick(1))
            .then_state(|state| {
                assert_eq!(*state, open_state());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_rapid_toggle_settles_closed_with_empty_buffer() {
        let clock = ManualClock::new(test_time());
        let env = env_with(Arc::new(clock.clone()));
        let mut state = PanelState::new();
        let reducer = PanelReducer::new();

        let _ = reducer.reduce(&mut state, show(true), &env);
        let _ = reducer.reduce(&mut state, typed("half typed"), &env);
        clock.advance(Duration::from_millis(100));
        let _ = reducer.reduce(&mut state, tick(1), &env);
        let midway = state.offset;
        assert!(midway < OFFSCREEN && midway > RESTING);

        // Host flips visibility back before the slide in finishes
        let effects = reducer.reduce(&mut state, PanelAction::RequestClose, &env);
        assert_eq!(state.phase, PanelPhase::Closing);
        assert_eq!(state.generation, 2);
        assert!(state.text.is_empty());
        assert_eq!(assertions::delayed_actions(&effects), vec![&tick(2)]);

        // Stale frame from the opening slide
        clock.advance(Duration::from_millis(16));
        let effects = reducer.reduce(&mut state, tick(1), &env);
        assertions::assert_no_effects(&effects);
        assert!((state.offset - midway).abs() < f64::EPSILON);

        clock.advance(Duration::from_millis(300));
        let _ = reducer.reduce(&mut state, tick(2), &env);
        assert_eq!(state.phase, PanelPhase::Closed);
        assert!((state.offset - OFFSCREEN).abs() < f64::EPSILON);
        assert!(state.text.is_empty());
        assert!(!state.visible);
    }

    #[test]
    fn test_closing_reverses_from_current_offset() {
        let clock = ManualClock::new(test_time());
        let env = env_with(Arc::new(clock.clone()));
        let mut state = PanelState::new();
        let reducer = PanelReducer::new();

        let _ = reducer.reduce(&mut state, show(true), &env);
        clock.advance(Duration::from_millis(60));
        let _ = reducer.reduce(&mut state, tick(1), &env);
        let _ = reducer.reduce(&mut state, show(false), &env);

        let animation = state.animation.unwrap_or_else(|| panic!("closing slide should run"));
        assert!((animation.from - state.offset).abs() < f64::EPSILON);
        assert!((animation.from - 0.8).abs() < 1e-9);
        assert!((animation.to - OFFSCREEN).abs() < f64::EPSILON);
    }

    #[test]
    fn test_toggle_before_any_frame_settles_immediately() {
        ReducerTest::new(PanelReducer::new())
            .with_env(create_test_env())
            .given_state(PanelState::new())
            .when_actions([show(true), show(false)])
            .then_state(|state| {
                assert_eq!(state.phase, PanelPhase::Closed);
                assert!(state.is_settled());
                assert_eq!(state.generation, 2);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_text_changed_keeps_raw_text() {
        ReducerTest::new(PanelReducer::new())
            .with_env(create_test_env())
            .given_state(open_state())
            .when_action(typed("  Buy milk "))
            .then_state(|state| {
                assert_eq!(state.text, "  Buy milk ");
                assert_eq!(state.trimmed_text(), "Buy milk");
                assert!(state.confirm_enabled());
            })
            .run();
    }

    #[test]
    fn test_confirm_submits_trimmed_text_and_closes() {
        ReducerTest::new(PanelReducer::new())
            .with_env(create_test_env())
            .given_state(open_state())
            .when_actions([typed("  Buy milk "), PanelAction::Confirm])
            .then_state(|state| {
                assert!(state.text.is_empty());
                assert!(!state.visible);
                assert_eq!(state.phase, PanelPhase::Closing);
            })
            .then_effects(|effects| {
                assert_eq!(effects.len(), 2);
                assertions::assert_has_future_effect(effects);
                assert_eq!(assertions::delayed_actions(effects), vec![&tick(2)]);
            })
            .run();
    }

    #[tokio::test]
    async fn test_confirm_emits_submitted_once() {
        let env = create_test_env();
        let mut state = open_state();
        state.text = " Walk dog ".to_string();

        let effects = PanelReducer::new().reduce(&mut state, PanelAction::Confirm, &env);

        let mut submitted = Vec::new();
        for effect in effects {
            if let Effect::Future(fut) = effect {
                submitted.extend(fut.await);
            }
        }
        assert_eq!(
            submitted,
            vec![PanelAction::Submitted {
                text: "Walk dog".to_string()
            }]
        );
    }

    #[test]
    fn test_confirm_blank_is_noop() {
        let mut initial = open_state();
        initial.text = "   ".to_string();
        let expected = initial.clone();

        ReducerTest::new(PanelReducer::new())
            .with_env(create_test_env())
            .given_state(initial)
            .when_action(PanelAction::Confirm)
            .then_state(move |state| {
                assert_eq!(*state, expected);
                assert!(!state.confirm_enabled());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_cancel_clears_and_closes() {
        ReducerTest::new(PanelReducer::new())
            .with_env(create_test_env())
            .given_state(open_state())
            .when_actions([typed("draft"), PanelAction::Cancel])
            .then_state(|state| {
                assert!(state.text.is_empty());
                assert!(!state.visible);
                assert_eq!(state.phase, PanelPhase::Closing);
            })
            .then_effects(assertions::assert_has_delay_effect)
            .run();
    }

    #[test]
    fn test_request_close_matches_cancel() {
        let env = create_test_env();
        let reducer = PanelReducer::new();

        let mut cancelled = open_state();
        cancelled.text = "draft".to_string();
        let mut dismissed = cancelled.clone();

        let _ = reducer.reduce(&mut cancelled, PanelAction::Cancel, &env);
        let _ = reducer.reduce(&mut dismissed, PanelAction::RequestClose, &env);

        assert_eq!(cancelled, dismissed);
    }

    #[test]
    fn test_reopen_starts_with_empty_buffer() {
        ReducerTest::new(PanelReducer::new())
            .with_env(create_test_env())
            .given_state(open_state())
            .when_actions([typed("draft"), PanelAction::Cancel, show(true)])
            .then_state(|state| {
                // Never left the resting offset, so it is open again at once
                assert!(state.text.is_empty());
                assert_eq!(state.phase, PanelPhase::Open);
                assert!(state.is_settled());
                assert_eq!(state.generation, 3);
            })
            .run();
    }

    #[test]
    fn test_translate_y() {
        let mut state = PanelState::new();
        assert!((state.translate_y(800.0) - 800.0).abs() < f64::EPSILON);
        state.offset = 0.25;
        assert!((state.translate_y(800.0) - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_action_kinds() {
        assert!(PanelAction::Confirm.is_command());
        assert!(PanelAction::Submitted { text: String::new() }.is_event());
        assert!(!tick(1).is_command());
        assert!(!tick(1).is_event());
    }
}
