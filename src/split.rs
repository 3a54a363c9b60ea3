// 💵 Split-Bill Calculator
//
// Three inputs per submission: bill value, your expense, who is paying.
// The friend's expense is derived (bill - your expense) and never stored.
//
// Edits that don't parse to a finite number are refused and the previous
// value kept, same as an expense larger than the bill. NaN can never reach
// a balance.

use crate::error::{SplitterError, SplitterResult};
use serde::{Deserialize, Serialize};

// ============================================================================
// PAYER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Payer {
    #[default]
    User,
    Friend,
}

impl Payer {
    pub fn toggle(&self) -> Self {
        match self {
            Payer::User => Payer::Friend,
            Payer::Friend => Payer::User,
        }
    }

    /// Option label in the payer selector
    pub fn label<'a>(&self, friend_name: &'a str) -> &'a str {
        match self {
            Payer::User => "You",
            Payer::Friend => friend_name,
        }
    }
}

// ============================================================================
// AMOUNT INPUT
// ============================================================================

/// Text field holding a numeric amount.
///
/// `text` is what the user typed, `value` is its parsed form (None when empty).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmountInput {
    text: String,
    value: Option<f64>,
}

impl AmountInput {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Zero and empty both count as absent
    pub fn is_present(&self) -> bool {
        matches!(self.value, Some(v) if v != 0.0)
    }
}

/// Parse user text into an optional finite amount.
pub fn parse_amount(text: &str) -> SplitterResult<Option<f64>> {
    let trimmed = text.trim();
    // A lone "." is the start of ".5", not a number yet
    if trimmed.is_empty() || trimmed == "." {
        return Ok(None);
    }

    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(SplitterError::InvalidAmount(text.to_string())),
    }
}

// ============================================================================
// SPLIT FORM
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitField {
    Bill,
    YourExpense,
    Payer,
}

impl SplitField {
    pub fn next(&self) -> Self {
        match self {
            SplitField::Bill => SplitField::YourExpense,
            SplitField::YourExpense => SplitField::Payer,
            SplitField::Payer => SplitField::Bill,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SplitBillForm {
    bill: AmountInput,
    paid_by_user: AmountInput,
    pub who_is_paying: Payer,
    pub focus: SplitField,
}

impl Default for SplitBillForm {
    fn default() -> Self {
        Self::new()
    }
}

impl SplitBillForm {
    pub fn new() -> Self {
        SplitBillForm {
            bill: AmountInput::default(),
            paid_by_user: AmountInput::default(),
            who_is_paying: Payer::User,
            focus: SplitField::Bill,
        }
    }

    pub fn bill(&self) -> &AmountInput {
        &self.bill
    }

    pub fn paid_by_user(&self) -> &AmountInput {
        &self.paid_by_user
    }

    pub fn set_bill(&mut self, text: &str) -> SplitterResult<()> {
        let value = parse_amount(text)?;
        self.bill = AmountInput {
            text: text.to_string(),
            value,
        };
        Ok(())
    }

    /// Set your expense. Refused when larger than the current bill
    /// (an empty bill counts as 0).
    pub fn set_paid_by_user(&mut self, text: &str) -> SplitterResult<()> {
        let value = parse_amount(text)?;
        let bill = self.bill.value.unwrap_or(0.0);

        if let Some(expense) = value {
            if expense > bill {
                return Err(SplitterError::ExpenseExceedsBill { expense, bill });
            }
        }

        self.paid_by_user = AmountInput {
            text: text.to_string(),
            value,
        };
        Ok(())
    }

    pub fn set_payer(&mut self, payer: Payer) {
        self.who_is_paying = payer;
    }

    /// Friend's share; unset while there is no bill
    pub fn paid_by_friend(&self) -> Option<f64> {
        if !self.bill.is_present() {
            return None;
        }
        let bill = self.bill.value.unwrap_or(0.0);
        Some(bill - self.paid_by_user.value.unwrap_or(0.0))
    }

    /// Signed amount to add to the selected friend's balance.
    pub fn delta(&self) -> SplitterResult<f64> {
        if !self.bill.is_present() {
            return Err(SplitterError::MissingBill);
        }
        if !self.paid_by_user.is_present() {
            return Err(SplitterError::MissingExpense);
        }

        let paid_by_user = self.paid_by_user.value.unwrap_or(0.0);
        match self.who_is_paying {
            Payer::User => Ok(self.paid_by_friend().unwrap_or(0.0)),
            Payer::Friend => Ok(-paid_by_user),
        }
    }

    /// Type one character into the focused field
    pub fn push_char(&mut self, c: char) -> SplitterResult<()> {
        match self.focus {
            SplitField::Bill => {
                let text = format!("{}{}", self.bill.text, c);
                self.set_bill(&text)
            }
            SplitField::YourExpense => {
                let text = format!("{}{}", self.paid_by_user.text, c);
                self.set_paid_by_user(&text)
            }
            SplitField::Payer => Ok(()),
        }
    }

    /// Delete the last character of the focused field.
    ///
    /// Shortening never checks against the bill, so an expense left above a
    /// lowered bill can still be erased.
    pub fn pop_char(&mut self) {
        let input = match self.focus {
            SplitField::Bill => &mut self.bill,
            SplitField::YourExpense => &mut self.paid_by_user,
            SplitField::Payer => return,
        };
        *input = shortened(&input.text);
    }
}

/// Drop trailing characters until what is left parses (empty always does).
fn shortened(text: &str) -> AmountInput {
    let mut text = text.to_string();
    loop {
        text.pop();
        if let Ok(value) = parse_amount(&text) {
            return AmountInput { text, value };
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
