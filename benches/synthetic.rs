use criterion::{black_box, criterion_group, criterion_main, Criterion};

use sweepclip::{
    boolean_op, boolean_op_multi,
    generators::{checkerboard, slanted_checkerboard, slanties},
    BooleanOp,
};

fn checkerboard_ops(c: &mut Criterion) {
    let (even, odd) = checkerboard(10);

    for op in [BooleanOp::Union, BooleanOp::Intersection, BooleanOp::Xor] {
        c.bench_function(&format!("checkerboard {op:?}"), |b| {
            b.iter(|| black_box(boolean_op(op, &even, &odd)))
        });
    }

    // One operand with everything in it, so that all the overlaps are
    // within a single operand.
    let all: Vec<_> = even.iter().chain(&odd).cloned().collect();
    c.bench_function("checkerboard normalize", |b| {
        b.iter(|| black_box(boolean_op(BooleanOp::Union, &all, &[])))
    });
}

fn slanted(c: &mut Criterion) {
    let (even, odd) = slanted_checkerboard(10);
    c.bench_function("slanted checkerboard xor", |b| {
        b.iter(|| black_box(boolean_op(BooleanOp::Xor, &even, &odd)))
    });

    let (even, odd) = slanties(20);
    c.bench_function("slanties xor", |b| {
        b.iter(|| black_box(boolean_op(BooleanOp::Xor, &even, &odd)))
    });
}

fn multi(c: &mut Criterion) {
    let (even, odd) = checkerboard(6);
    let pieces: Vec<Vec<_>> = odd.into_iter().map(|p| vec![p]).collect();
    c.bench_function("union one at a time", |b| {
        b.iter(|| black_box(boolean_op_multi(BooleanOp::Union, &even, &pieces)))
    });
}

criterion_group!(benches, checkerboard_ops, slanted, multi);
criterion_main!(benches);
