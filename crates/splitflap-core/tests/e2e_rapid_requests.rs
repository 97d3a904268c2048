//! End-to-end flap scenarios on a virtual clock.
//!
//! Each test drives a [`FlapEngine`] frame by frame through a host and checks
//! what an observer would see and when completions fire.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use splitflap_core::animation::{FlipSchedule, Leaf};
use splitflap_core::lab::LabHost;
use splitflap_core::{
    Alphabet, Completion, FlapEngine, FlapHost, FlapState, FlapStyle, FlipTicket, Half, Slot,
    SurfaceRef, Token, rotation_duration,
};
use web_time::Duration;

const FRAME: Duration = Duration::from_millis(10);

type Log = Rc<RefCell<Vec<String>>>;

fn note(log: &Log, label: &str) -> Option<Completion> {
    let log = Rc::clone(log);
    let label = label.to_string();
    Some(Box::new(move || log.borrow_mut().push(label)))
}

fn abc() -> Arc<Alphabet> {
    Arc::new(Alphabet::new(["A", "B", "C"]).expect("alphabet"))
}

/// Drive frames, recording each distinct top-half token an observer sees.
///
/// Landings are logged after `flip_finished` returns, so a completion fired
/// by a settling flip appears just before its `landed` entry.
fn run(engine: &mut FlapEngine, host: &mut LabHost, log: &Log, limit: usize) -> Vec<Token> {
    let mut seen: Vec<Token> = host.visible(Half::Top).cloned().into_iter().collect();
    for _ in 0..limit {
        if !engine.is_animating() {
            break;
        }
        if let Some(ticket) = host.advance(FRAME) {
            engine.flip_finished(host, ticket);
            log.borrow_mut().push(format!("landed {}", engine.displayed()));
        }
        if let Some(top) = host.visible(Half::Top)
            && seen.last() != Some(top)
        {
            seen.push(top.clone());
        }
    }
    seen
}

#[test]
fn abc_rolls_to_c_and_completes_after_c() {
    let mut host = LabHost::new();
    let mut engine = FlapEngine::new(abc(), &FlapStyle::default(), &mut host);
    let log: Log = Rc::default();
    let rotation = rotation_duration(0.3).expect("duration");

    engine.display_token(&mut host, Some("C".into()), rotation, note(&log, "done"));
    let seen = run(&mut engine, &mut host, &log, 1_000);

    assert_eq!(seen, vec![Token::from("A"), "B".into(), "C".into()]);
    assert_eq!(
        *log.borrow(),
        vec!["landed B".to_string(), "done".into(), "landed C".into()]
    );
    assert_eq!(host.now(), Duration::from_millis(600));
}

#[test]
fn rapid_double_request_loops_back_to_a() {
    let mut host = LabHost::new();
    let mut engine = FlapEngine::new(abc(), &FlapStyle::default(), &mut host);
    let log: Log = Rc::default();
    let rotation = Duration::from_millis(300);

    engine.display_token(&mut host, Some("B".into()), rotation, note(&log, "cb1"));
    engine.display_token(&mut host, Some("A".into()), rotation, note(&log, "cb2"));
    assert_eq!(*log.borrow(), vec!["cb1".to_string()]);

    run(&mut engine, &mut host, &log, 1_000);
    assert_eq!(
        *log.borrow(),
        vec![
            "cb1".to_string(),
            "landed B".into(),
            "landed C".into(),
            "cb2".into(),
            "landed A".into()
        ]
    );
    assert_eq!(engine.state(), FlapState::Idle);
}

#[test]
fn retarget_mid_chain_shortens_the_roll() {
    let mut host = LabHost::new();
    let mut engine = FlapEngine::new(
        Arc::new(Alphabet::numeric()),
        &FlapStyle::default(),
        &mut host,
    );
    let log: Log = Rc::default();
    let rotation = Duration::from_millis(100);

    engine.display_token(&mut host, Some("9".into()), rotation, note(&log, "nine"));
    // Let two steps land, then ask for 4 instead.
    for _ in 0..20 {
        if let Some(ticket) = host.advance(FRAME) {
            engine.flip_finished(&mut host, ticket);
        }
    }
    assert_eq!(engine.displayed(), &Token::from("2"));
    engine.display_token(&mut host, Some("4".into()), rotation, note(&log, "four"));
    run(&mut engine, &mut host, &log, 1_000);

    assert_eq!(engine.displayed(), &Token::from("4"));
    assert_eq!(engine.steps_taken(), 4);
    let log = log.borrow();
    assert_eq!(log.first().map(String::as_str), Some("nine"));
    assert_eq!(log.iter().filter(|l| *l == "four").count(), 1);
    assert_eq!(log.last().map(String::as_str), Some("landed 4"));
}

#[test]
fn observer_never_sees_a_token_out_of_order() {
    let alphabet = Arc::new(Alphabet::alphanumeric_and_space());
    let mut host = LabHost::new();
    let mut engine = FlapEngine::new(Arc::clone(&alphabet), &FlapStyle::default(), &mut host);
    let log: Log = Rc::default();

    engine.display_token(&mut host, Some("K".into()), Duration::from_millis(40), None);
    let seen = run(&mut engine, &mut host, &log, 10_000);

    let positions: Vec<usize> = seen
        .iter()
        .map(|t| alphabet.position(t).expect("known token"))
        .collect();
    assert!(positions.windows(2).all(|w| w[1] == w[0] + 1), "{seen:?}");
    assert_eq!(seen.last(), Some(&Token::from("K")));
}

/// A host that only records calls, to check the engine's choreography.
#[derive(Default)]
struct ScriptHost {
    calls: Vec<String>,
    last: Option<(FlipTicket, FlipSchedule)>,
}

impl FlapHost for ScriptHost {
    fn apply_style(&mut self, _surface: SurfaceRef, _style: &FlapStyle) {}

    fn paint(&mut self, surface: SurfaceRef, token: &Token) {
        self.calls.push(format!("paint {:?}/{:?} {token}", surface.half, surface.phase));
    }

    fn clear_animations(&mut self, _surface: SurfaceRef) {}

    fn raise(&mut self, surface: SurfaceRef) {
        self.calls.push(format!("raise {:?}/{:?}", surface.half, surface.phase));
    }

    fn schedule(&mut self, ticket: FlipTicket, schedule: &FlipSchedule) {
        self.calls.push(format!("schedule {}", schedule.total().as_millis()));
        self.last = Some((ticket, *schedule));
    }
}

#[test]
fn each_step_paints_hidden_pair_and_flips_over_visible_top() {
    let mut host = ScriptHost::default();
    let mut engine = FlapEngine::new(abc(), &FlapStyle::default(), &mut host);
    host.calls.clear();

    let back = engine.buffers(Half::Top).surface(Slot::Back);
    let front = engine.buffers(Half::Top).surface(Slot::Front);
    engine.display_token(&mut host, Some("B".into()), Duration::from_millis(200), None);

    assert_eq!(
        host.calls,
        vec![
            format!("paint Top/{:?} B", back.phase),
            format!("paint Bottom/{:?} B", back.phase),
            format!("raise Top/{:?}", front.phase),
            format!("raise Bottom/{:?}", back.phase),
            "schedule 200".to_string(),
        ]
    );

    let (ticket, schedule) = host.last.expect("scheduled");
    assert_eq!(schedule.top().leaf, Leaf::Top);
    assert_eq!(schedule.top().surface, front);
    assert_eq!(schedule.bottom().surface.phase, back.phase);
    assert_eq!(schedule.bottom().start_offset, Duration::from_millis(150));

    engine.flip_finished(&mut host, ticket);
    assert_eq!(engine.buffers(Half::Top).visible_phase(), back.phase);
    assert_eq!(engine.buffers(Half::Bottom).visible_token(), Some(&Token::from("B")));
}
