// 🧭 Splitter - the single state container
//
// Owns the friend registry, the UI mode and the activity log. The methods
// below are the only way state changes; renderers get `&Splitter`.
//
// A rejected transition leaves everything exactly as it was.

use crate::activity::{ActivityEvent, ActivityKind, ActivityLog};
use crate::add_friend::{self, AddFriendDraft};
use crate::config::Config;
use crate::entities::{Friend, FriendId, FriendRegistry};
use crate::error::{SplitterError, SplitterResult};
use crate::mode::UiMode;
use crate::split::SplitBillForm;

pub struct Splitter {
    registry: FriendRegistry,
    mode: UiMode,
    activity: ActivityLog,
    placeholder_image: String,
}

impl Default for Splitter {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Splitter {
    pub fn new(config: &Config) -> Self {
        Self {
            registry: FriendRegistry::with_friends(config.friends.clone()),
            mode: UiMode::Idle,
            activity: ActivityLog::new(),
            placeholder_image: config.placeholder_image.clone(),
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn friends(&self) -> &[Friend] {
        self.registry.friends()
    }

    pub fn registry(&self) -> &FriendRegistry {
        &self.registry
    }

    pub fn mode(&self) -> &UiMode {
        &self.mode
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn selected_friend(&self) -> Option<&Friend> {
        self.mode.selected().and_then(|id| self.registry.get(id))
    }

    pub fn is_selected(&self, id: &FriendId) -> bool {
        self.mode.is_selected(id)
    }

    pub fn form_visible(&self) -> bool {
        self.mode.is_adding_friend()
    }

    pub fn add_button_label(&self) -> &'static str {
        add_friend::toggle_label(self.form_visible())
    }

    pub fn add_friend_draft(&self) -> Option<&AddFriendDraft> {
        match &self.mode {
            UiMode::AddingFriend(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn split_form(&self) -> Option<&SplitBillForm> {
        match &self.mode {
            UiMode::Splitting { form, .. } => Some(form),
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    pub fn toggle_add_friend_form(&mut self) {
        self.mode.toggle_add_form(&self.placeholder_image);
        tracing::debug!(visible = self.form_visible(), "add-friend form toggled");
    }

    /// Select `id`, or deselect it when it is already selected.
    pub fn toggle_select(&mut self, id: &FriendId) -> SplitterResult<()> {
        if !self.registry.contains(id) {
            return Err(SplitterError::UnknownFriend(id.to_string()));
        }
        self.mode.toggle_select(id);
        tracing::debug!(friend = %id, selected = self.is_selected(id), "selection toggled");
        Ok(())
    }

    pub fn add_friend_draft_mut(&mut self) -> Option<&mut AddFriendDraft> {
        match &mut self.mode {
            UiMode::AddingFriend(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn split_form_mut(&mut self) -> Option<&mut SplitBillForm> {
        match &mut self.mode {
            UiMode::Splitting { form, .. } => Some(form),
            _ => None,
        }
    }

    /// Create a friend from explicit values and close the add form.
    pub fn add_friend(&mut self, name: &str, image_url: &str) -> SplitterResult<FriendId> {
        let friend = add_friend::build_friend(name, image_url)?;
        Ok(self.commit_new_friend(friend))
    }

    /// Submit the open add-friend form's draft.
    pub fn submit_add_friend(&mut self) -> SplitterResult<FriendId> {
        let friend = match &mut self.mode {
            UiMode::AddingFriend(draft) => draft.submit()?,
            _ => return Err(SplitterError::FormClosed),
        };
        Ok(self.commit_new_friend(friend))
    }

    fn commit_new_friend(&mut self, friend: Friend) -> FriendId {
        let id = friend.id.clone();
        self.activity
            .record(ActivityEvent::new(&id, &friend.name, ActivityKind::FriendAdded));
        self.registry.append(friend);
        if self.mode.is_adding_friend() {
            self.mode.clear();
        }
        id
    }

    /// Apply the open split form to the selected friend, then deselect.
    ///
    /// Returns the delta that was added to the balance.
    pub fn submit_split(&mut self) -> SplitterResult<f64> {
        let (friend_id, form) = match &self.mode {
            UiMode::Splitting { friend, form } => (friend.clone(), form),
            _ => return Err(SplitterError::NoSelection),
        };

        let delta = form.delta()?;
        let kind = ActivityKind::BillSplit {
            bill: form.bill().value().unwrap_or(0.0),
            paid_by_user: form.paid_by_user().value().unwrap_or(0.0),
            payer: form.who_is_paying,
            delta,
        };

        if !self.registry.apply_delta(&friend_id, delta) {
            return Err(SplitterError::UnknownFriend(friend_id.to_string()));
        }

        let name = self
            .registry
            .get(&friend_id)
            .map(|f| f.name.clone())
            .unwrap_or_default();
        self.activity.record(ActivityEvent::new(&friend_id, &name, kind));
        self.mode.clear();

        Ok(delta)
    }
}
