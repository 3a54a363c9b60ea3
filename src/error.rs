// Rejection taxonomy for state transitions
//
// Every transition either applies atomically or returns one of these.
// The terminal shell treats them as silent no-ops.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplitterError {
    #[error("friend name is empty")]
    EmptyName,

    #[error("image URL is empty")]
    EmptyImageUrl,

    #[error("bill value is missing or zero")]
    MissingBill,

    #[error("your expense is missing or zero")]
    MissingExpense,

    #[error("not a finite number: {0:?}")]
    InvalidAmount(String),

    #[error("expense {expense} exceeds bill {bill}")]
    ExpenseExceedsBill { expense: f64, bill: f64 },

    #[error("no friend is selected")]
    NoSelection,

    #[error("add-friend form is not open")]
    FormClosed,

    #[error("friend not found: {0}")]
    UnknownFriend(String),

    #[error("duplicate friend id: {0}")]
    DuplicateFriendId(String),
}

pub type SplitterResult<T> = Result<T, SplitterError>;
