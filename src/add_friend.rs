// ➕ Add-Friend Workflow
//
// Draft fields live only while the form is open. A submit with an empty
// name or image URL is refused and leaves the draft untouched.

use crate::entities::{Friend, FriendId};
use crate::error::{SplitterError, SplitterResult};

/// Avatar service used when nothing else is configured
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://i.pravatar.cc/48";

/// Label of the button that opens/closes the form
pub fn toggle_label(form_visible: bool) -> &'static str {
    if form_visible {
        "Close"
    } else {
        "Add Friend"
    }
}

/// Which draft field receives typed characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddFriendField {
    Name,
    ImageUrl,
}

impl AddFriendField {
    pub fn next(&self) -> Self {
        match self {
            AddFriendField::Name => AddFriendField::ImageUrl,
            AddFriendField::ImageUrl => AddFriendField::Name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddFriendDraft {
    pub name: String,
    pub image_url: String,
    pub focus: AddFriendField,
    placeholder: String,
}

impl AddFriendDraft {
    pub fn new(placeholder: impl Into<String>) -> Self {
        let placeholder = placeholder.into();
        AddFriendDraft {
            name: String::new(),
            image_url: placeholder.clone(),
            focus: AddFriendField::Name,
            placeholder,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_image_url(&mut self, url: impl Into<String>) {
        self.image_url = url.into();
    }

    /// Mutable access to the focused field, for key-by-key editing
    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            AddFriendField::Name => &mut self.name,
            AddFriendField::ImageUrl => &mut self.image_url,
        }
    }

    pub fn reset(&mut self) {
        self.name.clear();
        self.image_url = self.placeholder.clone();
        self.focus = AddFriendField::Name;
    }

    /// Build a friend from the current draft and reset it on success.
    pub fn submit(&mut self) -> SplitterResult<Friend> {
        let friend = build_friend(&self.name, &self.image_url)?;
        self.reset();
        Ok(friend)
    }
}

/// Create a new friend with a fresh id and zero balance.
///
/// The id is appended to the image URL so friends sharing a base URL still
/// get distinct avatars.
pub fn build_friend(name: &str, image_url: &str) -> SplitterResult<Friend> {
    if name.is_empty() {
        return Err(SplitterError::EmptyName);
    }
    if image_url.is_empty() {
        return Err(SplitterError::EmptyImageUrl);
    }

    let id = FriendId::generate();
    let image = format!("{}?={}", image_url, id);

    Ok(Friend::new(id, name, image, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_label() {
        assert_eq!(toggle_label(true), "Close");
        assert_eq!(toggle_label(false), "Add Friend");
    }

    #[test]
    fn test_build_friend() {
        let friend = build_friend("Bob", "https://i.pravatar.cc/48").unwrap();

        assert_eq!(friend.name, "Bob");
        assert_eq!(friend.balance, 0.0);
        assert!(friend.image.starts_with("https://i.pravatar.cc/48?="));
        assert!(friend.image.ends_with(friend.id.as_str()));
    }

    #[test]
    fn test_build_friend_rejects_empty_fields() {
        assert_eq!(build_friend("", "https://x"), Err(SplitterError::EmptyName));
        assert_eq!(build_friend("Bob", ""), Err(SplitterError::EmptyImageUrl));
    }

    #[test]
    fn test_shared_base_url_gives_distinct_images() {
        let a = build_friend("A", DEFAULT_PLACEHOLDER_IMAGE).unwrap();
        let b = build_friend("B", DEFAULT_PLACEHOLDER_IMAGE).unwrap();
        assert_ne!(a.image, b.image);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_draft_submit_resets_on_success() {
        let mut draft = AddFriendDraft::new(DEFAULT_PLACEHOLDER_IMAGE);
        draft.set_name("Bob");
        draft.set_image_url("https://example.com/a.png");
        draft.focus = AddFriendField::ImageUrl;

        let friend = draft.submit().unwrap();
        assert_eq!(friend.name, "Bob");
        assert!(friend.image.starts_with("https://example.com/a.png?="));
        assert_eq!(draft.name, "");
        assert_eq!(draft.image_url, DEFAULT_PLACEHOLDER_IMAGE);
        assert_eq!(draft.focus, AddFriendField::Name);
    }

    #[test]
    fn test_draft_submit_keeps_values_on_rejection() {
        let mut draft = AddFriendDraft::new(DEFAULT_PLACEHOLDER_IMAGE);
        draft.set_image_url("");
        draft.set_name("Bob");

        assert_eq!(draft.submit(), Err(SplitterError::EmptyImageUrl));
        assert_eq!(draft.name, "Bob");
        assert_eq!(draft.image_url, "");
    }

    #[test]
    fn test_focused_mut_follows_focus() {
        let mut draft = AddFriendDraft::new("p");
        draft.focused_mut().push('Z');
        draft.focus = draft.focus.next();
        draft.focused_mut().push('!');

        assert_eq!(draft.name, "Z");
        assert_eq!(draft.image_url, "p!");
    }
}
