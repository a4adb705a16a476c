use crate::error::TaskError;
use crate::registry::{Registry, Tracker};
use crate::task::{Board, BoxedTask, Task};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

pub const ALL_OPERATIONS: [Operation; 4] = [
    Operation::Add,
    Operation::Subtract,
    Operation::Multiply,
    Operation::Divide,
];

impl Operation {
    pub fn symbol(self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Subtract => '-',
            Operation::Multiply => '*',
            Operation::Divide => '/',
        }
    }

    pub fn apply(self, lhs: i64, rhs: i64) -> Result<i64, TaskError> {
        let value = match self {
            Operation::Add => lhs.checked_add(rhs),
            Operation::Subtract => lhs.checked_sub(rhs),
            Operation::Multiply => lhs.checked_mul(rhs),
            Operation::Divide => {
                if rhs == 0 {
                    return Err(TaskError::ZeroDivision { lhs });
                }
                lhs.checked_div(rhs)
            }
        };
        value.ok_or(TaskError::Overflow {
            lhs,
            op: self.symbol(),
            rhs,
        })
    }
}

/// Binary arithmetic over two operands.
#[derive(Debug)]
pub struct Binary {
    op: Operation,
    lhs: i64,
    rhs: i64,
    result: Option<i64>,
    _tracker: Tracker,
}

impl Binary {
    pub fn new(registry: &Registry, op: Operation, lhs: i64, rhs: i64) -> Self {
        Self {
            op,
            lhs,
            rhs,
            result: None,
            _tracker: registry.track(),
        }
    }

    pub fn result(&self) -> Option<i64> {
        self.result
    }
}

impl Task for Binary {
    fn name(&self) -> &'static str {
        "Binary operation"
    }

    fn has_result(&self) -> bool {
        true
    }

    fn execute(&mut self, _board: &mut Board) -> Result<(), TaskError> {
        self.result = Some(self.op.apply(self.lhs, self.rhs)?);
        Ok(())
    }

    fn describe(&self) -> Option<String> {
        let result = self.result?;
        Some(format!(
            "{}: {} {} {} = {}",
            self.name(),
            self.lhs,
            self.op.symbol(),
            self.rhs,
            result
        ))
    }
}

/// Appends the wrapped task to the back of the board.
#[derive(Debug)]
pub struct AddTask {
    task: Option<BoxedTask>,
    _tracker: Tracker,
}

impl AddTask {
    pub fn new(registry: &Registry, task: BoxedTask) -> Self {
        Self {
            task: Some(task),
            _tracker: registry.track(),
        }
    }
}

impl Task for AddTask {
    fn name(&self) -> &'static str {
        "Add task"
    }

    fn has_result(&self) -> bool {
        false
    }

    fn execute(&mut self, board: &mut Board) -> Result<(), TaskError> {
        if let Some(task) = self.task.take() {
            board.push(task);
        }
        Ok(())
    }

    fn describe(&self) -> Option<String> {
        Some("Added task in container".to_owned())
    }
}

/// Drops every task on the board.
#[derive(Debug)]
pub struct ClearBoard {
    _tracker: Tracker,
}

impl ClearBoard {
    pub fn new(registry: &Registry) -> Self {
        Self {
            _tracker: registry.track(),
        }
    }
}

impl Task for ClearBoard {
    fn name(&self) -> &'static str {
        "Clear container"
    }

    fn has_result(&self) -> bool {
        false
    }

    fn execute(&mut self, board: &mut Board) -> Result<(), TaskError> {
        board.clear();
        Ok(())
    }

    fn describe(&self) -> Option<String> {
        Some("Container is cleared".to_owned())
    }
}

/// Counts tasks on the board that carry a result, itself included.
#[derive(Debug)]
pub struct CountWithResult {
    count: Option<usize>,
    _tracker: Tracker,
}

impl CountWithResult {
    pub fn new(registry: &Registry) -> Self {
        Self {
            count: None,
            _tracker: registry.track(),
        }
    }
}

impl Task for CountWithResult {
    fn name(&self) -> &'static str {
        "Count tasks with result"
    }

    fn has_result(&self) -> bool {
        true
    }

    fn execute(&mut self, board: &mut Board) -> Result<(), TaskError> {
        self.count = Some(board.count_with_result());
        Ok(())
    }

    fn describe(&self) -> Option<String> {
        let count = self.count?;
        Some(format!("Count of tasks with result in container: {count}"))
    }
}

/// Reads how many task objects are alive in the registry.
#[derive(Debug)]
pub struct ObjectCounter {
    count: Option<usize>,
    _tracker: Tracker,
}

impl ObjectCounter {
    pub fn new(registry: &Registry) -> Self {
        Self {
            count: None,
            _tracker: registry.track(),
        }
    }
}

impl Task for ObjectCounter {
    fn name(&self) -> &'static str {
        "Count objects"
    }

    fn has_result(&self) -> bool {
        true
    }

    fn execute(&mut self, board: &mut Board) -> Result<(), TaskError> {
        self.count = Some(board.registry().live());
        Ok(())
    }

    fn describe(&self) -> Option<String> {
        let count = self.count?;
        Some(format!("Count of all objects: {count}"))
    }
}

/// Reads how many tasks are on the board, itself included.
#[derive(Debug)]
pub struct BoardSize {
    size: Option<usize>,
    _tracker: Tracker,
}

impl BoardSize {
    pub fn new(registry: &Registry) -> Self {
        Self {
            size: None,
            _tracker: registry.track(),
        }
    }
}

impl Task for BoardSize {
    fn name(&self) -> &'static str {
        "Count objects in container"
    }

    fn has_result(&self) -> bool {
        true
    }

    fn execute(&mut self, board: &mut Board) -> Result<(), TaskError> {
        self.size = Some(board.len());
        Ok(())
    }

    fn describe(&self) -> Option<String> {
        let size = self.size?;
        Some(format!("Count of objects in container: {size}"))
    }
}
