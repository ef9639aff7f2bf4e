#![no_main]

// Drives a `TreeVec` the way the sweep line drives its status: entries are
// kept sorted, inserted at their `partition_point`, and removed by value.

use arbitrary::{Arbitrary, Unstructured};

use libfuzzer_sys::fuzz_target;
use sweepclip::treevec::TreeVec;

#[derive(Arbitrary, Debug)]
enum Step {
    Enter(i16),
    Leave(i16),
    Neighbors(i16),
}

fn position(status: &TreeVec<i16, 4>, key: i16) -> Option<usize> {
    let idx = status.partition_point(|x| *x < key);
    (status.get(idx) == Some(&key)).then_some(idx)
}

fn check(mut u: Unstructured) -> Result<(), arbitrary::Error> {
    let mut status = TreeVec::<i16, 4>::new();
    let mut model: Vec<i16> = Vec::new();

    for step in u.arbitrary_iter::<Step>()? {
        match step? {
            Step::Enter(key) => {
                let idx = status.partition_point(|x| *x <= key);
                assert_eq!(idx, model.partition_point(|x| *x <= key));
                status.insert(idx, key);
                model.insert(idx, key);
            }
            Step::Leave(key) => {
                let found = position(&status, key);
                assert_eq!(found, model.iter().position(|x| *x == key));
                if let Some(idx) = found {
                    assert_eq!(status.remove(idx), model.remove(idx));
                }
            }
            Step::Neighbors(key) => {
                let idx = model.partition_point(|x| *x < key);
                let below = idx.checked_sub(1).and_then(|i| status.get(i));
                assert_eq!(below, idx.checked_sub(1).and_then(|i| model.get(i)));
                let window = idx.saturating_sub(1)..(idx + 1).min(model.len());
                let around: Vec<_> = status.range(window.clone()).copied().collect();
                assert_eq!(around, model[window]);
            }
        }
        status.check_invariants();
        assert_eq!(status.len(), model.len());
    }
    assert!(status.iter().copied().eq(model.iter().copied()));
    Ok(())
}

fuzz_target!(|data: &[u8]| {
    let _ = check(Unstructured::new(data));
});
