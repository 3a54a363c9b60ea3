// Bill Splitter - Core Library
// State container and transitions; the terminal shell lives in the binary

pub mod entities;
pub mod error;
pub mod split;
pub mod add_friend;
pub mod mode;
pub mod activity;
pub mod config;
pub mod logging;
pub mod app;

// Re-export commonly used types
pub use entities::{BalanceStatus, BalanceTotals, Friend, FriendId, FriendRegistry};
pub use error::{SplitterError, SplitterResult};
pub use split::{parse_amount, AmountInput, Payer, SplitBillForm, SplitField};
pub use add_friend::{
    build_friend, toggle_label, AddFriendDraft, AddFriendField, DEFAULT_PLACEHOLDER_IMAGE,
};
pub use mode::{select_label, UiMode};
pub use activity::{ActivityEvent, ActivityKind, ActivityLog};
pub use config::{default_friends, Config};
pub use app::Splitter;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
