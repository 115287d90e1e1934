use proptest::prelude::*;

use timer_core::{AlertError, AlertSink, CountdownEngine, StopwatchEngine};

#[derive(Default)]
struct CountingSink {
    alerts: usize,
}

impl AlertSink for CountingSink {
    fn play_alert(&mut self) -> Result<(), AlertError> {
        self.alerts += 1;
        Ok(())
    }

    fn notify(&mut self, _title: &str, _body: &str) -> Result<(), AlertError> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum Op {
    Start,
    Pause,
    Lap,
    Query,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![Just(Op::Start), Just(Op::Pause), Just(Op::Lap), Just(Op::Query)]
}

/// Non-negative steps between successive clock readings.
fn steps() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..5_000, 1..60)
}

proptest! {
    #[test]
    fn elapsed_never_decreases_and_holds_while_paused(
        ops in prop::collection::vec(op(), 1..60),
        deltas in steps(),
    ) {
        let mut sw = StopwatchEngine::new();
        let mut now = 0u64;
        let mut last = sw.elapsed_ms(now);

        for (op, delta) in ops.iter().zip(deltas.iter().cycle()) {
            now += delta;
            let before = sw.elapsed_ms(now);
            prop_assert!(before >= last);
            if !sw.is_running() {
                prop_assert_eq!(before, last);
            }
            match op {
                Op::Start => sw.start(now),
                Op::Pause => sw.pause(now),
                Op::Lap => { sw.lap(now); }
                Op::Query => {}
            }
            last = sw.elapsed_ms(now);
            prop_assert_eq!(last, before);
        }
    }

    #[test]
    fn resume_continues_from_pause(t0 in 0u64..10_000, run in 0u64..100_000, gap in 0u64..100_000, after in 0u64..100_000) {
        let mut sw = StopwatchEngine::new();
        sw.start(t0);
        let t1 = t0 + run;
        sw.pause(t1);
        let banked = sw.elapsed_ms(t1);
        let t2 = t1 + gap;
        sw.start(t2);
        let t3 = t2 + after;
        prop_assert_eq!(sw.elapsed_ms(t3), banked + (t3 - t2));
    }

    #[test]
    fn lap_records_current_elapsed(ops in prop::collection::vec(op(), 1..60), deltas in steps()) {
        let mut sw = StopwatchEngine::new();
        let mut now = 0u64;
        for (op, delta) in ops.iter().zip(deltas.iter().cycle()) {
            now += delta;
            match op {
                Op::Start => sw.start(now),
                Op::Pause => sw.pause(now),
                Op::Query => {}
                Op::Lap => {
                    let count = sw.laps().len();
                    let expected = sw.elapsed_ms(now);
                    let running = sw.is_running();
                    let recorded = sw.lap(now);
                    if running {
                        prop_assert_eq!(recorded, Some(expected));
                        prop_assert_eq!(sw.laps().len(), count + 1);
                        prop_assert_eq!(sw.laps().last().copied(), Some(expected));
                    } else {
                        prop_assert_eq!(recorded, None);
                        prop_assert_eq!(sw.laps().len(), count);
                    }
                }
            }
        }
        prop_assert!(sw.laps().windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn countdown_decreases_to_zero_then_completes_once(
        mins in 0i64..3,
        secs in 1i64..60,
        deltas in prop::collection::vec(1u64..3_000, 1..400),
    ) {
        let mut cd = CountdownEngine::new(CountingSink::default());
        cd.configure(0, mins, secs);
        cd.start(0);

        let mut now = 0u64;
        let mut last = cd.remaining_ms();
        let mut edges = 0;
        for delta in deltas {
            now += delta;
            let fired = cd.tick(now);
            prop_assert!(cd.remaining_ms() <= last);
            last = cd.remaining_ms();
            if fired {
                edges += 1;
                prop_assert_eq!(cd.remaining_ms(), 0);
            }
            if cd.is_completed() {
                prop_assert_eq!(cd.remaining_ms(), 0);
                prop_assert!(!cd.is_running());
            }
        }

        let finished = now >= cd.total_ms();
        prop_assert_eq!(cd.is_completed(), finished);
        prop_assert_eq!(edges, usize::from(finished));
        prop_assert_eq!(cd.sink().alerts, usize::from(finished));
    }

    #[test]
    fn configure_always_lands_in_range(h in -1_000i64..1_000, m in -1_000i64..1_000, s in -1_000i64..1_000) {
        let mut cd = CountdownEngine::new(CountingSink::default());
        cd.configure(h, m, s);
        let (ch, cm, cs) = cd.configured();
        prop_assert!(ch <= 99 && cm <= 59 && cs <= 59);
        prop_assert_eq!(cd.total_ms(), (ch as u64 * 3600 + cm as u64 * 60 + cs as u64) * 1000);
        prop_assert_eq!(cd.remaining_ms(), cd.total_ms());
        prop_assert!(!cd.is_completed());
    }
}

#[test]
fn out_of_range_seconds_complete_at_clamped_total() {
    let mut cd = CountdownEngine::new(CountingSink::default());
    cd.configure(0, 0, 73);
    assert_eq!(cd.total_ms(), 59_000);
    cd.start(0);
    assert!(!cd.tick(58_999));
    assert!(cd.tick(59_000));
    assert_eq!(cd.sink().alerts, 1);
}

#[test]
fn clamp_law() {
    let mut cd = CountdownEngine::new(CountingSink::default());
    cd.configure(150, 70, 70);
    assert_eq!(cd.configured(), (99, 59, 59));
}
