use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TaskError {
    #[error("zero division: {lhs} / 0")]
    ZeroDivision { lhs: i64 },
    #[error("overflow: {lhs} {op} {rhs}")]
    Overflow { lhs: i64, op: char, rhs: i64 },
}
