//! Chain dispatch behavior across both hook flavors.

use kedja::kedja_core::{SLOT_CAPACITY, Tc, TcVerdict, Xdp, XdpVerdict};
use kedja::testing::{CountingStage, RecordingStage};
use kedja::{Dispatcher, DispatcherBuilder, ProceedOn};

fn xdp_chain(n: usize) -> (Dispatcher<Xdp, Vec<u8>>, Vec<CountingStage<XdpVerdict>>) {
    let mut builder = DispatcherBuilder::<Xdp, Vec<u8>>::new();
    let mut counters = Vec::new();
    for _ in 0..n {
        let counter = CountingStage::new(XdpVerdict::Pass);
        counters.push(counter.clone());
        builder = builder.stage(counter, ProceedOn::new([XdpVerdict::Pass]));
    }
    (builder.build().unwrap(), counters)
}

#[test]
fn full_continue_chain_returns_accept_after_n_invocations() {
    for n in 0..=SLOT_CAPACITY {
        let (dispatcher, counters) = xdp_chain(n);
        assert_eq!(dispatcher.dispatch(Some(&vec![0u8; 64])), XdpVerdict::Pass);

        let invocations: usize = counters.iter().map(|c| c.count()).sum();
        assert_eq!(invocations, n, "chain of {n} stages");
        assert!(counters.iter().all(|c| c.count() == 1));
    }
}

#[test]
fn empty_chain_invokes_nothing_and_accepts() {
    let (dispatcher, _) = xdp_chain(0);
    assert_eq!(dispatcher.dispatch(Some(&vec![])), XdpVerdict::Pass);

    let empty = DispatcherBuilder::<Tc, Vec<u8>>::new().build().unwrap();
    assert_eq!(empty.dispatch(Some(&vec![])), TcVerdict::Ok);
}

#[test]
fn short_circuit_returns_the_stopping_verdict() {
    for stop_at in 0..SLOT_CAPACITY {
        let mut builder = DispatcherBuilder::<Xdp, Vec<u8>>::new();
        let mut counters = Vec::new();
        for i in 0..SLOT_CAPACITY {
            let verdict = if i == stop_at {
                // Drop is not in this slot's continuation set.
                XdpVerdict::Drop
            } else {
                XdpVerdict::Pass
            };
            let counter = CountingStage::new(verdict);
            counters.push(counter.clone());
            builder = builder.stage(counter, ProceedOn::new([XdpVerdict::Pass]));
        }
        let dispatcher = builder.build().unwrap();

        assert_eq!(dispatcher.dispatch(Some(&vec![0u8; 64])), XdpVerdict::Drop);
        for (i, counter) in counters.iter().enumerate() {
            let expected = if i <= stop_at { 1 } else { 0 };
            assert_eq!(counter.count(), expected, "slot {i}, stop at {stop_at}");
        }
    }
}

#[test]
fn continue_signaling_verdict_is_not_propagated_off_the_end() {
    // Every stage returns Tx with Tx in the mask; falling off the end
    // must yield Pass, not the last stage's Tx.
    let dispatcher = DispatcherBuilder::<Xdp, Vec<u8>>::new()
        .stage(|_: &Vec<u8>| XdpVerdict::Tx, ProceedOn::new([XdpVerdict::Tx]))
        .stage(|_: &Vec<u8>| XdpVerdict::Tx, ProceedOn::new([XdpVerdict::Tx]))
        .build()
        .unwrap();
    assert_eq!(dispatcher.dispatch(Some(&vec![])), XdpVerdict::Pass);
}

#[test]
fn absent_frame_aborts_at_slot_zero() {
    let (dispatcher, counters) = xdp_chain(5);
    assert_eq!(dispatcher.dispatch(None), XdpVerdict::Aborted);
    assert!(counters.iter().all(|c| c.count() == 0));

    // Same hard-stop even when the abort verdict is in the mask.
    let counter = CountingStage::new(TcVerdict::Pipe);
    let dispatcher = DispatcherBuilder::<Tc, Vec<u8>>::new()
        .stage(
            |_: &Vec<u8>| TcVerdict::Pipe,
            ProceedOn::new([TcVerdict::Pipe, TcVerdict::Shot]),
        )
        .stage(counter.clone(), ProceedOn::default())
        .build()
        .unwrap();
    assert_eq!(dispatcher.dispatch(None), TcVerdict::Shot);
    assert_eq!(counter.count(), 0);
}

#[test]
fn unbound_slot_stops_the_chain_with_the_sentinel() {
    // The compat probe activates all ten tiers without binding stages,
    // so slot 0 is an active stub: its sentinel hits an empty mask and
    // becomes the final verdict.
    let dispatcher = DispatcherBuilder::<Xdp, Vec<u8>>::new()
        .compat_probe()
        .build()
        .unwrap();
    assert_eq!(
        dispatcher.dispatch(Some(&vec![])),
        XdpVerdict::DispatcherReturn
    );

    // With the default proceed-on, the sentinel is masked and the chain
    // runs past it.
    let dispatcher = DispatcherBuilder::<Xdp, Vec<u8>>::new()
        .stage(
            |_: &Vec<u8>| XdpVerdict::DispatcherReturn,
            ProceedOn::default(),
        )
        .build()
        .unwrap();
    assert_eq!(dispatcher.dispatch(Some(&vec![])), XdpVerdict::Pass);
}

#[test]
fn mixed_verdict_scenario_stops_at_the_second_stage() {
    // N=3: stage 0 continues, stage 1 stops, stage 2 must not run.
    let first = CountingStage::new(TcVerdict::Pipe);
    let second = CountingStage::new(TcVerdict::Shot);
    let third = CountingStage::new(TcVerdict::Pipe);

    let dispatcher = DispatcherBuilder::<Tc, Vec<u8>>::new()
        .stage(first.clone(), ProceedOn::new([TcVerdict::Pipe]))
        .stage(second.clone(), ProceedOn::new([TcVerdict::Pipe]))
        .stage(third.clone(), ProceedOn::new([TcVerdict::Pipe]))
        .build()
        .unwrap();

    assert_eq!(dispatcher.dispatch(Some(&vec![0u8; 60])), TcVerdict::Shot);
    assert_eq!(first.count(), 1);
    assert_eq!(second.count(), 1);
    assert_eq!(third.count(), 0);
}

#[test]
fn compat_slot_verdict_never_becomes_final() {
    // Ten stages, all continuing, with the compatibility tier enabled:
    // the eleventh (stub) slot runs but its sentinel is discarded.
    let mut builder = DispatcherBuilder::<Xdp, Vec<u8>>::new().compat_probe();
    for _ in 0..SLOT_CAPACITY {
        builder = builder.stage(
            |_: &Vec<u8>| XdpVerdict::Pass,
            ProceedOn::new([XdpVerdict::Pass]),
        );
    }
    let dispatcher = builder.build().unwrap();

    assert_eq!(dispatcher.num_enabled(), (SLOT_CAPACITY + 1) as u8);
    assert!(!dispatcher.slot(SLOT_CAPACITY).unwrap().is_bound());
    assert_eq!(dispatcher.dispatch(Some(&vec![])), XdpVerdict::Pass);
}

#[test]
fn stages_see_the_frame_in_slot_order() {
    let first = RecordingStage::new(TcVerdict::Pipe);
    let second = RecordingStage::new(TcVerdict::Ok);

    let dispatcher = DispatcherBuilder::<Tc, Vec<u8>>::new()
        .stage(first.clone(), ProceedOn::new([TcVerdict::Pipe]))
        .stage(second.clone(), ProceedOn::new([TcVerdict::Pipe]))
        .build()
        .unwrap();

    let frame = vec![0xde, 0xad, 0xbe, 0xef];
    assert_eq!(dispatcher.dispatch(Some(&frame)), TcVerdict::Ok);
    assert_eq!(first.frames(), vec![frame.clone()]);
    assert_eq!(second.frames(), vec![frame]);
}

#[test]
fn configuration_is_frozen_across_dispatches() {
    let (dispatcher, _) = xdp_chain(4);
    let before = *dispatcher.config();
    for _ in 0..16 {
        dispatcher.dispatch(Some(&vec![0u8; 64]));
        dispatcher.dispatch(None);
    }
    assert_eq!(*dispatcher.config(), before);
}

#[test]
fn dispatcher_is_shareable_across_threads() {
    let (dispatcher, counters) = xdp_chain(3);
    let dispatcher = std::sync::Arc::new(dispatcher);

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let dispatcher = dispatcher.clone();
            scope.spawn(move || {
                for _ in 0..100 {
                    assert_eq!(dispatcher.dispatch(Some(&vec![0u8; 64])), XdpVerdict::Pass);
                }
            });
        }
    });

    assert!(counters.iter().all(|c| c.count() == 400));
}
