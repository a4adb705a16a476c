mod error;
mod generate;
mod kinds;
mod registry;
mod run;
mod task;

pub use error::TaskError;
pub use generate::{ALL_KINDS, OPERAND_RANGE, TaskKind, build, generate};
pub use kinds::{
    ALL_OPERATIONS, AddTask, Binary, BoardSize, ClearBoard, CountWithResult, ObjectCounter,
    Operation,
};
pub use registry::{Registry, Tracker};
pub use run::{RunSummary, run};
pub use task::{Board, BoxedTask, Task};
