#![no_main]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use splitflap_core::lab::LabHost;
use splitflap_core::{Alphabet, FlapEngine, FlapStyle, Token};
use web_time::Duration;

#[derive(Arbitrary, Debug)]
enum FuzzOp {
    Request { token: u8, millis: u16 },
    Halt { millis: u16 },
    Unknown { millis: u16 },
    Tick { millis: u16 },
    Land,
}

type Calls = Rc<RefCell<Vec<u32>>>;

fn request(
    engine: &mut FlapEngine,
    host: &mut LabHost,
    calls: &Calls,
    target: Option<Token>,
    millis: u16,
) {
    let id = calls.borrow().len();
    calls.borrow_mut().push(0);
    let calls = Rc::clone(calls);
    engine.display_token(
        host,
        target,
        Duration::from_millis(u64::from(millis)),
        Some(Box::new(move || calls.borrow_mut()[id] += 1)),
    );
}

fuzz_target!(|ops: Vec<FuzzOp>| {
    let alphabet = Arc::new(Alphabet::numeric());
    let mut host = LabHost::new();
    let mut engine = FlapEngine::new(Arc::clone(&alphabet), &FlapStyle::default(), &mut host);
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));

    for op in ops.into_iter().take(256) {
        match op {
            FuzzOp::Request { token, millis } => {
                let target = alphabet.get(usize::from(token) % alphabet.len()).cloned();
                request(&mut engine, &mut host, &calls, target, millis);
            }
            FuzzOp::Halt { millis } => request(&mut engine, &mut host, &calls, None, millis),
            FuzzOp::Unknown { millis } => {
                request(&mut engine, &mut host, &calls, Some(Token::from("?")), millis);
            }
            FuzzOp::Tick { millis } => {
                if let Some(ticket) = host.advance(Duration::from_millis(u64::from(millis))) {
                    engine.flip_finished(&mut host, ticket);
                }
            }
            FuzzOp::Land => {
                if let Some(ticket) = host.finish_now() {
                    engine.flip_finished(&mut host, ticket);
                }
            }
        }
        assert!(calls.borrow().iter().all(|&n| n <= 1));
        assert_eq!(engine.is_animating(), host.in_flight().is_some());
    }

    while let Some(ticket) = host.finish_now() {
        engine.flip_finished(&mut host, ticket);
    }
    assert!(!engine.is_animating());
    assert!(calls.borrow().iter().all(|&n| n == 1));
});
