#![no_main]

use arbitrary::Unstructured;

use libfuzzer_sys::fuzz_target;
use sweepclip::treevec::TreeVec;

fn check(mut u: Unstructured) -> Result<(), arbitrary::Error> {
    let len = u.arbitrary_len::<i32>()?;
    let mut vec: Vec<i32> = std::iter::repeat_with(|| u.arbitrary())
        .take(len)
        .collect::<Result<_, _>>()?;
    vec.sort();

    let mut tree_vec = TreeVec::<i32, 4>::new();
    for &x in &vec {
        tree_vec.insert(tree_vec.len(), x);
    }

    let search: i32 = u.arbitrary()?;
    assert_eq!(
        vec.partition_point(|x| x <= &search),
        tree_vec.partition_point(|x| x <= &search)
    );
    Ok(())
}

fuzz_target!(|data: &[u8]| {
    let _ = check(Unstructured::new(data));
});
