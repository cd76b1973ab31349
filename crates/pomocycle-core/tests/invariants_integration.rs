//! Property tests: no command sequence breaks the session invariants.

use pomocycle_core::view::View;
use pomocycle_core::{
    Command, DurationPreset, ManualTicker, Mode, PomodoroTimer, SessionEngine, TickSource,
    TOTAL_CYCLES,
};
use proptest::prelude::*;

struct NullView;

impl View for NullView {
    fn render_time(&mut self, _: u64) {}
    fn render_progress(&mut self, _: u32, _: u32) {}
    fn render_mode(&mut self, _: Mode, _: DurationPreset) {}
    fn render_buttons(&mut self, _: bool, _: bool) {}
    fn notify(&mut self, _: &str) {}
    fn set_page_title(&mut self, _: &str) {}
}

#[derive(Debug, Clone)]
enum Step {
    Command(Command),
    Ticks(u16),
    FinishPeriod,
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Command(Command::Start)),
        Just(Step::Command(Command::Pause)),
        Just(Step::Command(Command::Reset)),
        Just(Step::Command(Command::SelectPreset(DurationPreset::Fast))),
        Just(Step::Command(Command::SelectPreset(DurationPreset::Medium))),
        (1u16..600).prop_map(Step::Ticks),
        Just(Step::FinishPeriod),
    ]
}

proptest! {
    #[test]
    fn session_invariants_hold(steps in prop::collection::vec(step_strategy(), 1..60)) {
        let mut timer = PomodoroTimer::new(SessionEngine::default(), NullView, ManualTicker::new());

        for step in steps {
            let preset_before = timer.engine().preset();
            let was_running = timer.engine().is_running();

            match step {
                Step::Command(command) => {
                    timer.dispatch(command);
                }
                Step::Ticks(n) => {
                    for _ in 0..n {
                        timer.on_tick();
                    }
                }
                Step::FinishPeriod => {
                    if timer.engine().is_running() {
                        while timer.on_tick().is_none() {}
                    }
                }
            }

            let engine = timer.engine();
            prop_assert!(engine.remaining_secs() <= engine.period_secs());
            prop_assert!(engine.remaining_secs() > 0);
            prop_assert!((1..=TOTAL_CYCLES).contains(&engine.cycle_index()));
            prop_assert_eq!(engine.period_secs(), engine.mode().duration_secs(engine.preset()));
            prop_assert_eq!(engine.is_running(), timer.ticker().is_active());
            if was_running {
                prop_assert_eq!(engine.preset(), preset_before);
            }
        }
    }
}
