#![no_main]

use arbitrary::Unstructured;

use libfuzzer_sys::fuzz_target;
use sweepclip::{arbitrary::multi_polygon, area, boolean_op, BooleanOp, MultiPolygon};

fn run(mut u: Unstructured) -> Result<(), arbitrary::Error> {
    let a = multi_polygon(4, &mut u)?;
    let b = multi_polygon(4, &mut u)?;
    let op = *u.choose(&[
        BooleanOp::Union,
        BooleanOp::Intersection,
        BooleanOp::Difference,
        BooleanOp::Xor,
    ])?;

    let out = boolean_op(op, &a, &b).expect("operation failed");
    for polygon in &out {
        for ring in polygon {
            assert!(ring.len() >= 4);
            assert_eq!(ring.first(), ring.last());
        }
    }

    // Intersection never covers more than either operand.
    if op == BooleanOp::Intersection {
        let norm = |m: &MultiPolygon| boolean_op(BooleanOp::Union, m, &[]).expect("normalize failed");
        let limit = area(&norm(&a)).min(area(&norm(&b)));
        assert!(area(&out) <= limit * (1.0 + 1e-9) + 1e-9);
    }
    Ok(())
}

fuzz_target!(|data: &[u8]| {
    let _ = run(Unstructured::new(data));
});
