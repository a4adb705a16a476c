use std::ops::RangeInclusive;

use rand::Rng;

use crate::kinds::{
    ALL_OPERATIONS, AddTask, Binary, BoardSize, ClearBoard, CountWithResult, ObjectCounter,
};
use crate::registry::Registry;
use crate::task::BoxedTask;

pub const OPERAND_RANGE: RangeInclusive<i64> = 1..=20;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TaskKind {
    Binary,
    Add,
    Clear,
    CountWithResult,
    ObjectCounter,
    BoardSize,
}

pub const ALL_KINDS: [TaskKind; 6] = [
    TaskKind::Binary,
    TaskKind::Add,
    TaskKind::Clear,
    TaskKind::CountWithResult,
    TaskKind::ObjectCounter,
    TaskKind::BoardSize,
];

/// Build a task of a uniformly chosen kind.
///
/// `Add` wraps another freshly generated task.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, registry: &Registry) -> BoxedTask {
    let kind = ALL_KINDS[rng.random_range(0..ALL_KINDS.len())];
    build(kind, rng, registry)
}

pub fn build<R: Rng + ?Sized>(kind: TaskKind, rng: &mut R, registry: &Registry) -> BoxedTask {
    match kind {
        TaskKind::Binary => {
            let op = ALL_OPERATIONS[rng.random_range(0..ALL_OPERATIONS.len())];
            let lhs = rng.random_range(OPERAND_RANGE);
            let rhs = rng.random_range(OPERAND_RANGE);
            Box::new(Binary::new(registry, op, lhs, rhs))
        }
        TaskKind::Add => {
            let inner = generate(rng, registry);
            Box::new(AddTask::new(registry, inner))
        }
        TaskKind::Clear => Box::new(ClearBoard::new(registry)),
        TaskKind::CountWithResult => Box::new(CountWithResult::new(registry)),
        TaskKind::ObjectCounter => Box::new(ObjectCounter::new(registry)),
        TaskKind::BoardSize => Box::new(BoardSize::new(registry)),
    }
}
