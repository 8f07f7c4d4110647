//! Application state for the shopping list.
//!
//! [`App`] is the list manager: it owns the list for as long as it is
//! mounted, applies user operations to it, queues the notifications those
//! operations raise, and writes a fresh snapshot after every mutation.

use crate::domain::{
    ItemId, Item, Notification, ShoppingList, SpendingLimit, ValidationResult,
    build_email_body, build_mailto_link, validate_item,
};
use crate::infrastructure::SnapshotStore;
use rust_decimal::Decimal;
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// Text typed into the name and price fields but not yet submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingItem {
    pub name: String,
    pub price: String,
}

impl PendingItem {
    pub fn clear(&mut self) {
        self.name.clear();
        self.price.clear();
    }
}

/// Mounted shopping list and the state around it.
///
/// # Examples
///
/// ```
/// use shoplist::application::App;
/// use shoplist::domain::SpendingLimit;
/// use shoplist::infrastructure::MemoryStore;
///
/// let mut app = App::mount(MemoryStore::new(), SpendingLimit::default());
/// app.add_item("Coffee", "2.00").unwrap();
/// assert_eq!(app.list().len(), 1);
/// assert!(app.take_notifications().is_empty());
/// ```
#[derive(Debug)]
pub struct App<S: SnapshotStore> {
    list: ShoppingList,
    /// Pending name and price input
    pub pending: PendingItem,
    /// Advisory limit checked after each add
    pub spending_limit: SpendingLimit,
    /// Address placed in the mail link, if any
    pub email_recipient: Option<String>,
    notifications: VecDeque<Notification>,
    store: S,
}

impl<S: SnapshotStore> App<S> {
    /// Rehydrates the list from `store`, starting empty if it cannot be read.
    pub fn mount(store: S, spending_limit: SpendingLimit) -> Self {
        let list = match store.load() {
            Ok(list) => list,
            Err(e) => {
                warn!(error = %e, "could not load saved list, starting empty");
                ShoppingList::new()
            }
        };
        info!(items = list.len(), "mounted shopping list");

        Self {
            list,
            pending: PendingItem::default(),
            spending_limit,
            email_recipient: None,
            notifications: VecDeque::new(),
            store,
        }
    }

    /// Saves the list one last time and hands back the store.
    pub fn unmount(self) -> S {
        self.persist();
        debug!(items = self.list.len(), "unmounted shopping list");
        self.store
    }

    pub fn list(&self) -> &ShoppingList {
        &self.list
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn set_pending_name(&mut self, name: impl Into<String>) {
        self.pending.name = name.into();
    }

    pub fn set_pending_price(&mut self, price: impl Into<String>) {
        self.pending.price = price.into();
    }

    /// Adds the pending name and price as a new item.
    pub fn submit(&mut self) -> ValidationResult<ItemId> {
        let PendingItem { name, price } = self.pending.clone();
        self.add_item(&name, &price)
    }

    /// Validates and appends a new, unselected item.
    ///
    /// On failure the list and pending input are left as they were and
    /// [`Notification::InvalidItem`] is queued. On success the pending input
    /// is cleared, and [`Notification::LimitExceeded`] is queued if the new
    /// total is over the spending limit. The item is kept either way.
    pub fn add_item(&mut self, name: &str, price: &str) -> ValidationResult<ItemId> {
        let item = match validate_item(name, price) {
            Ok(item) => item,
            Err(e) => {
                debug!(error = %e, "rejected item");
                self.notify(Notification::from(&e));
                return Err(e);
            }
        };

        debug!(name = %item.name, price = %item.price, "adding item");
        let id = self.list.push(item);
        self.pending.clear();
        self.persist();

        if self.is_over_limit() {
            info!(total = %self.total(), limit = %self.spending_limit, "spending limit exceeded");
            self.notify(Notification::LimitExceeded);
        }
        Ok(id)
    }

    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let removed = self.list.remove(id);
        match &removed {
            Some(item) => {
                debug!(name = %item.name, "removed item");
                self.persist();
            }
            None => debug!(%id, "remove ignored, no such item"),
        }
        removed
    }

    pub fn remove_at(&mut self, position: usize) -> Option<Item> {
        let id = self.resolve(position)?;
        self.remove(id)
    }

    /// Flips the purchased mark. Returns the new state.
    pub fn toggle_selected(&mut self, id: ItemId) -> Option<bool> {
        let selected = self.list.toggle_selected(id);
        if selected.is_some() {
            self.persist();
        } else {
            debug!(%id, "toggle ignored, no such item");
        }
        selected
    }

    pub fn toggle_selected_at(&mut self, position: usize) -> Option<bool> {
        let id = self.resolve(position)?;
        self.toggle_selected(id)
    }

    pub fn move_up(&mut self, id: ItemId) -> bool {
        let moved = self.list.move_up(id);
        if moved {
            self.persist();
        }
        moved
    }

    pub fn move_up_at(&mut self, position: usize) -> bool {
        self.resolve(position).is_some_and(|id| self.move_up(id))
    }

    pub fn move_down(&mut self, id: ItemId) -> bool {
        let moved = self.list.move_down(id);
        if moved {
            self.persist();
        }
        moved
    }

    pub fn move_down_at(&mut self, position: usize) -> bool {
        self.resolve(position).is_some_and(|id| self.move_down(id))
    }

    pub fn id_at(&self, position: usize) -> Option<ItemId> {
        self.list.id_at(position)
    }

    pub fn position_of(&self, id: ItemId) -> Option<usize> {
        self.list.position_of(id)
    }

    pub fn total(&self) -> Decimal {
        self.list.total()
    }

    pub fn is_over_limit(&self) -> bool {
        self.spending_limit.is_exceeded_by(&self.list)
    }

    /// Emailing is only offered once the list has something in it.
    pub fn can_email(&self) -> bool {
        !self.list.is_empty()
    }

    pub fn email_body(&self) -> String {
        build_email_body(&self.list)
    }

    pub fn email_link(&self) -> Option<String> {
        build_mailto_link(&self.list, self.email_recipient.as_deref())
    }

    /// Drains queued notifications, oldest first.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push_back(notification);
    }

    fn resolve(&self, position: usize) -> Option<ItemId> {
        let id = self.list.id_at(position);
        if id.is_none() {
            debug!(position, len = self.list.len(), "position out of range");
        }
        id
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.list) {
            warn!(error = %e, "failed to save shopping list");
        }
    }
}
