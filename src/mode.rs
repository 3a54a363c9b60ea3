// 🎯 Selection Controller - one UI mode at a time
//
// Idle / adding a friend / splitting with one friend. The add form and a
// selection can't both be open: any selection change closes the add form,
// and opening the add form drops the selection.

use crate::add_friend::AddFriendDraft;
use crate::entities::FriendId;
use crate::split::SplitBillForm;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum UiMode {
    #[default]
    Idle,
    AddingFriend(AddFriendDraft),
    Splitting {
        friend: FriendId,
        form: SplitBillForm,
    },
}

impl UiMode {
    pub fn selected(&self) -> Option<&FriendId> {
        match self {
            UiMode::Splitting { friend, .. } => Some(friend),
            _ => None,
        }
    }

    pub fn is_selected(&self, id: &FriendId) -> bool {
        self.selected() == Some(id)
    }

    pub fn is_adding_friend(&self) -> bool {
        matches!(self, UiMode::AddingFriend(_))
    }

    /// Same friend → back to Idle, different friend → switch to it.
    ///
    /// Switching always starts a fresh split form.
    pub fn toggle_select(&mut self, id: &FriendId) {
        *self = if self.is_selected(id) {
            UiMode::Idle
        } else {
            UiMode::Splitting {
                friend: id.clone(),
                form: SplitBillForm::new(),
            }
        };
    }

    /// Open or close the add-friend form with a fresh draft.
    pub fn toggle_add_form(&mut self, placeholder_image: &str) {
        *self = if self.is_adding_friend() {
            UiMode::Idle
        } else {
            UiMode::AddingFriend(AddFriendDraft::new(placeholder_image))
        };
    }

    pub fn clear(&mut self) {
        *self = UiMode::Idle;
    }
}

/// Label of the per-row select button
pub fn select_label(is_selected: bool) -> &'static str {
    if is_selected {
        "Close"
    } else {
        "Select"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_same_friend_twice_returns_to_idle() {
        let clark = FriendId::new("118836");
        let mut mode = UiMode::Idle;

        mode.toggle_select(&clark);
        assert!(mode.is_selected(&clark));

        mode.toggle_select(&clark);
        assert_eq!(mode, UiMode::Idle);
    }

    #[test]
    fn test_toggle_different_friend_switches() {
        let clark = FriendId::new("118836");
        let sarah = FriendId::new("933372");
        let mut mode = UiMode::Idle;

        mode.toggle_select(&clark);
        mode.toggle_select(&sarah);
        assert_eq!(mode.selected(), Some(&sarah));
    }

    #[test]
    fn test_selection_closes_add_form() {
        let clark = FriendId::new("118836");
        let mut mode = UiMode::Idle;

        mode.toggle_add_form("https://i.pravatar.cc/48");
        assert!(mode.is_adding_friend());

        mode.toggle_select(&clark);
        assert!(!mode.is_adding_friend());
        assert!(mode.is_selected(&clark));
    }

    #[test]
    fn test_add_form_drops_selection() {
        let clark = FriendId::new("118836");
        let mut mode = UiMode::Idle;

        mode.toggle_select(&clark);
        mode.toggle_add_form("p");
        assert!(mode.is_adding_friend());
        assert_eq!(mode.selected(), None);

        mode.toggle_add_form("p");
        assert_eq!(mode, UiMode::Idle);
    }

    #[test]
    fn test_select_label() {
        assert_eq!(select_label(true), "Close");
        assert_eq!(select_label(false), "Select");
    }
}
