// 👫 Friend Entity - Stable identity + running balance
//
// "Friend id is IDENTITY (never changes), balance is a VALUE (moves with each split)"
//
// - id, name and image are fixed at creation
// - balance is the only field that ever changes
// - registry order is display order (insertion order, never sorted)

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// FRIEND ID
// ============================================================================

/// Opaque friend identifier.
///
/// Seed friends keep their literal ids, new friends get a UUID v4.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FriendId(String);

impl FriendId {
    pub fn new(id: impl Into<String>) -> Self {
        FriendId(id.into())
    }

    /// Fresh random identifier
    pub fn generate() -> Self {
        FriendId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FriendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// BALANCE STATUS
// ============================================================================

/// Display classification of a balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BalanceStatus {
    /// The user owes the friend this (positive) amount
    YouOwe(f64),

    /// The friend owes the user this (positive) amount
    OwesYou(f64),

    /// Settled
    Even,
}

impl BalanceStatus {
    pub fn from_balance(balance: f64) -> Self {
        if balance < 0.0 {
            BalanceStatus::YouOwe(balance.abs())
        } else if balance > 0.0 {
            BalanceStatus::OwesYou(balance)
        } else {
            BalanceStatus::Even
        }
    }

    /// Row text shown under the friend's name
    pub fn describe(&self, name: &str) -> String {
        match self {
            BalanceStatus::YouOwe(amount) => format!("You owe {} ${}", name, amount),
            BalanceStatus::OwesYou(amount) => format!("{} owes you ${}", name, amount),
            BalanceStatus::Even => format!("You and {} are even", name),
        }
    }
}

// ============================================================================
// FRIEND ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Friend {
    /// Stable identity - NEVER changes
    pub id: FriendId,

    pub name: String,

    /// Avatar URL
    pub image: String,

    /// Negative = you owe them, positive = they owe you
    #[serde(default)]
    pub balance: f64,
}

impl Friend {
    pub fn new(id: FriendId, name: impl Into<String>, image: impl Into<String>, balance: f64) -> Self {
        Friend {
            id,
            name: name.into(),
            image: image.into(),
            balance,
        }
    }

    pub fn status(&self) -> BalanceStatus {
        BalanceStatus::from_balance(self.balance)
    }

    pub fn status_text(&self) -> String {
        self.status().describe(&self.name)
    }

    /// Copy of this friend with `delta` added to the balance
    pub fn with_delta(&self, delta: f64) -> Friend {
        Friend {
            balance: self.balance + delta,
            ..self.clone()
        }
    }
}

// ============================================================================
// FRIEND REGISTRY
// ============================================================================

/// Aggregate of all balances, split by direction.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BalanceTotals {
    /// Sum of what the user owes (positive number)
    pub you_owe: f64,
    /// Sum of what friends owe the user
    pub owed_to_you: f64,
    pub settled_count: usize,
}

impl BalanceTotals {
    pub fn net(&self) -> f64 {
        self.owed_to_you - self.you_owe
    }
}

/// Ordered list of friends for the session.
#[derive(Debug, Default, Clone)]
pub struct FriendRegistry {
    friends: Vec<Friend>,
}

impl FriendRegistry {
    pub fn new() -> Self {
        FriendRegistry { friends: Vec::new() }
    }

    pub fn with_friends(friends: Vec<Friend>) -> Self {
        FriendRegistry { friends }
    }

    /// Add a friend to the end. Ids are assumed unique.
    pub fn append(&mut self, friend: Friend) {
        tracing::debug!(id = %friend.id, name = %friend.name, "friend appended");
        self.friends.push(friend);
    }

    /// Replace the matching entry with a copy whose balance moved by `delta`.
    ///
    /// Returns `false` when no entry has `target`; nothing changes then.
    pub fn apply_delta(&mut self, target: &FriendId, delta: f64) -> bool {
        match self.friends.iter_mut().find(|f| &f.id == target) {
            Some(slot) => {
                let updated = slot.with_delta(delta);
                tracing::debug!(
                    id = %target,
                    old = slot.balance,
                    new = updated.balance,
                    "balance updated"
                );
                *slot = updated;
                true
            }
            None => {
                tracing::warn!(id = %target, "apply_delta: no such friend");
                false
            }
        }
    }

    /// Friends in insertion order
    pub fn friends(&self) -> &[Friend] {
        &self.friends
    }

    pub fn get(&self, id: &FriendId) -> Option<&Friend> {
        self.friends.iter().find(|f| &f.id == id)
    }

    pub fn position(&self, id: &FriendId) -> Option<usize> {
        self.friends.iter().position(|f| &f.id == id)
    }

    pub fn contains(&self, id: &FriendId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.friends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.friends.is_empty()
    }

    pub fn totals(&self) -> BalanceTotals {
        let mut totals = BalanceTotals::default();

        for friend in &self.friends {
            match friend.status() {
                BalanceStatus::YouOwe(amount) => totals.you_owe += amount,
                BalanceStatus::OwesYou(amount) => totals.owed_to_you += amount,
                BalanceStatus::Even => totals.settled_count += 1,
            }
        }

        totals
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn friend(id: &str, name: &str, balance: f64) -> Friend {
        Friend::new(FriendId::new(id), name, "https://i.pravatar.cc/48", balance)
    }

    #[test]
    fn test_status_text() {
        assert_eq!(friend("1", "Clark", -7.0).status_text(), "You owe Clark $7");
        assert_eq!(friend("2", "Sarah", 20.0).status_text(), "Sarah owes you $20");
        assert_eq!(friend("3", "Anthony", 0.0).status_text(), "You and Anthony are even");
        assert_eq!(friend("4", "Dana", 12.5).status_text(), "Dana owes you $12.5");
    }

    #[test]
    fn test_append_keeps_insertion_order() {
        let mut registry = FriendRegistry::new();
        registry.append(friend("b", "Bob", 0.0));
        registry.append(friend("a", "Alice", 5.0));
        registry.append(friend("c", "Carol", -3.0));

        let names: Vec<&str> = registry.friends().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Alice", "Carol"]);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.position(&FriendId::new("c")), Some(2));
    }

    #[test]
    fn test_apply_delta_touches_only_target() {
        let mut registry = FriendRegistry::with_friends(vec![
            friend("1", "Clark", -7.0),
            friend("2", "Sarah", 20.0),
            friend("3", "Anthony", 0.0),
        ]);
        let before: Vec<u64> = registry.friends().iter().map(|f| f.balance.to_bits()).collect();

        assert!(registry.apply_delta(&FriendId::new("2"), 60.0));

        let after = registry.friends();
        assert_eq!(after[0].balance.to_bits(), before[0]);
        assert_eq!(after[1].balance, 80.0);
        assert_eq!(after[2].balance.to_bits(), before[2]);
    }

    #[test]
    fn test_apply_delta_unknown_id_is_noop() {
        let mut registry = FriendRegistry::with_friends(vec![friend("1", "Clark", -7.0)]);

        assert!(!registry.apply_delta(&FriendId::new("missing"), 10.0));
        assert_eq!(registry.friends()[0].balance, -7.0);
    }

    #[test]
    fn test_totals() {
        let registry = FriendRegistry::with_friends(vec![
            friend("1", "Clark", -7.0),
            friend("2", "Sarah", 20.0),
            friend("3", "Anthony", 0.0),
        ]);

        let totals = registry.totals();
        assert_eq!(totals.you_owe, 7.0);
        assert_eq!(totals.owed_to_you, 20.0);
        assert_eq!(totals.settled_count, 1);
        assert_eq!(totals.net(), 13.0);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = FriendId::generate();
        let b = FriendId::generate();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }
}
