// Entity Models
//
// A friend has a stable identity (id) and one changing value (balance).
// The registry keeps them in display order.

pub mod friend;

pub use friend::{BalanceStatus, BalanceTotals, Friend, FriendId, FriendRegistry};
