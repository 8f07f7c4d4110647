use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identity of an item, stable across reorders and removals.
///
/// Ids live only for the lifetime of a mounted list; they are not part of
/// the persisted snapshot, so a reloaded item gets a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Highest price a single item may carry.
///
/// Keeps every realistic list total far from `Decimal::MAX` and every price
/// within the digits an `f64` snapshot round trip preserves.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Prices are kept to whole pence.
pub const PRICE_SCALE: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(skip, default = "ItemId::new")]
    pub id: ItemId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub selected: bool,
}

impl Item {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            price,
            selected: false,
        }
    }
}

/// Ordered collection of items. Display order is list order.
///
/// The total is never stored; it is folded from the items on every call so
/// it cannot drift from the list.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use shoplist::domain::{Item, ShoppingList};
///
/// let mut list = ShoppingList::new();
/// list.push(Item::new("Coffee", Decimal::new(200, 2)));
/// list.push(Item::new("Oranges", Decimal::new(150, 2)));
/// assert_eq!(list.total(), Decimal::new(350, 2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShoppingList {
    items: Vec<Item>,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Item> {
        self.items.get(position)
    }

    pub fn find(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn id_at(&self, position: usize) -> Option<ItemId> {
        self.items.get(position).map(|item| item.id)
    }

    pub fn position_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Appends an item to the end of the list and returns its id.
    pub fn push(&mut self, item: Item) -> ItemId {
        let id = item.id;
        self.items.push(item);
        id
    }

    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let position = self.position_of(id)?;
        Some(self.items.remove(position))
    }

    /// Flips the purchased mark of an item, returning the new state.
    pub fn toggle_selected(&mut self, id: ItemId) -> Option<bool> {
        let item = self.items.iter_mut().find(|item| item.id == id)?;
        item.selected = !item.selected;
        Some(item.selected)
    }

    /// Swaps an item with its predecessor. Returns false at the top of the
    /// list or when the id is unknown.
    pub fn move_up(&mut self, id: ItemId) -> bool {
        match self.position_of(id) {
            Some(position) if position > 0 => {
                self.items.swap(position - 1, position);
                true
            }
            _ => false,
        }
    }

    /// Swaps an item with its successor. Returns false at the bottom of the
    /// list or when the id is unknown.
    pub fn move_down(&mut self, id: ItemId) -> bool {
        match self.position_of(id) {
            Some(position) if position + 1 < self.items.len() => {
                self.items.swap(position, position + 1);
                true
            }
            _ => false,
        }
    }

    /// Sum of all prices. Saturates at `Decimal::MAX` rather than panicking.
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .try_fold(Decimal::ZERO, |total, item| total.checked_add(item.price))
            .unwrap_or(Decimal::MAX)
    }
}

impl<'a> IntoIterator for &'a ShoppingList {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pounds(pence: i64) -> Decimal {
        Decimal::new(pence, 2)
    }

    fn sample_list() -> ShoppingList {
        let mut list = ShoppingList::new();
        list.push(Item::new("Coffee", pounds(200)));
        list.push(Item::new("Oranges", pounds(150)));
        list.push(Item::new("Bread", pounds(95)));
        list
    }

    fn names(list: &ShoppingList) -> Vec<&str> {
        list.iter().map(|item| item.name.as_str()).collect()
    }

    fn arb_list() -> impl Strategy<Value = ShoppingList> {
        prop::collection::vec(("[A-Za-z]{1,10}", 0i64..10_000_000), 0..12).prop_map(|entries| {
            ShoppingList::from_items(
                entries
                    .into_iter()
                    .map(|(name, pence)| Item::new(name, pounds(pence)))
                    .collect(),
            )
        })
    }

    #[test]
    fn test_new_item_is_unselected() {
        let item = Item::new("Coffee", pounds(200));
        assert!(!item.selected);
        assert_eq!(item.name, "Coffee");
    }

    #[test]
    fn test_item_ids_are_unique() {
        let a = Item::new("Coffee", pounds(200));
        let b = Item::new("Coffee", pounds(200));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_duplicates_are_permitted() {
        let mut list = ShoppingList::new();
        list.push(Item::new("Milk", pounds(100)));
        list.push(Item::new("Milk", pounds(100)));
        assert_eq!(list.len(), 2);
        assert_eq!(list.total(), pounds(200));
    }

    #[test]
    fn test_move_up_swaps_with_predecessor() {
        let mut list = sample_list();
        let oranges = list.id_at(1).unwrap();
        assert!(list.move_up(oranges));
        assert_eq!(names(&list), ["Oranges", "Coffee", "Bread"]);
        assert_eq!(list.position_of(oranges), Some(0));
    }

    #[test]
    fn test_move_down_swaps_with_successor() {
        let mut list = sample_list();
        let coffee = list.id_at(0).unwrap();
        assert!(list.move_down(coffee));
        assert_eq!(names(&list), ["Oranges", "Coffee", "Bread"]);
    }

    #[test]
    fn test_moves_at_boundaries_are_noops() {
        let mut list = sample_list();
        let first = list.id_at(0).unwrap();
        let last = list.id_at(2).unwrap();
        assert!(!list.move_up(first));
        assert!(!list.move_down(last));
        assert_eq!(names(&list), ["Coffee", "Oranges", "Bread"]);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let mut list = sample_list();
        let stranger = ItemId::new();
        assert!(list.remove(stranger).is_none());
        assert!(list.toggle_selected(stranger).is_none());
        assert!(!list.move_up(stranger));
        assert!(!list.move_down(stranger));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_id_survives_reorder_and_removal() {
        let mut list = sample_list();
        let bread = list.id_at(2).unwrap();
        let coffee = list.id_at(0).unwrap();
        list.move_up(bread);
        list.remove(coffee);
        assert_eq!(list.find(bread).map(|item| item.name.as_str()), Some("Bread"));
        assert_eq!(list.position_of(bread), Some(0));
    }

    #[test]
    fn test_toggle_does_not_change_total() {
        let mut list = sample_list();
        let before = list.total();
        let id = list.id_at(1).unwrap();
        assert_eq!(list.toggle_selected(id), Some(true));
        assert_eq!(list.total(), before);
        assert_eq!(list.toggle_selected(id), Some(false));
    }

    #[test]
    fn test_total_saturates_instead_of_overflowing() {
        let mut list = ShoppingList::new();
        list.push(Item::new("Yacht", Decimal::MAX));
        list.push(Item::new("Yacht", Decimal::MAX));
        assert_eq!(list.total(), Decimal::MAX);
    }

    #[test]
    fn test_empty_list_total_is_zero() {
        assert_eq!(ShoppingList::new().total(), Decimal::ZERO);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let mut list = ShoppingList::new();
        list.push(Item::new("Coffee", pounds(200)));
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "name": "Coffee", "price": 2.0, "selected": false }])
        );
    }

    proptest! {
        #[test]
        fn prop_push_appends_unselected(mut list in arb_list(), pence in 0i64..100_000) {
            let before = list.len();
            let id = list.push(Item::new("Tea", pounds(pence)));
            prop_assert_eq!(list.len(), before + 1);
            prop_assert_eq!(list.position_of(id), Some(before));
            prop_assert!(!list.items()[before].selected);
        }

        #[test]
        fn prop_total_is_sum_of_prices(list in arb_list()) {
            let mut expected = Decimal::ZERO;
            for item in &list {
                expected += item.price;
            }
            prop_assert_eq!(list.total(), expected);
        }

        #[test]
        fn prop_remove_then_readd_restores_total(mut list in arb_list(), index in any::<prop::sample::Index>()) {
            prop_assume!(!list.is_empty());
            let before = list.total();
            let id = list.id_at(index.index(list.len())).unwrap();
            let removed = list.remove(id).unwrap();
            prop_assert_eq!(list.total(), before - removed.price);
            list.push(Item::new(removed.name, removed.price));
            prop_assert_eq!(list.total(), before);
        }

        #[test]
        fn prop_move_up_then_down_is_identity(mut list in arb_list(), index in any::<prop::sample::Index>()) {
            prop_assume!(list.len() >= 2);
            let position = 1 + index.index(list.len() - 1);
            let original = list.clone();
            let id = list.id_at(position).unwrap();
            prop_assert!(list.move_up(id));
            prop_assert!(list.move_down(id));
            prop_assert_eq!(list, original);
        }

        #[test]
        fn prop_boundary_moves_are_noops(mut list in arb_list()) {
            prop_assume!(!list.is_empty());
            let original = list.clone();
            let first = list.id_at(0).unwrap();
            let last = list.id_at(list.len() - 1).unwrap();
            prop_assert!(!list.move_up(first));
            prop_assert!(!list.move_down(last));
            prop_assert_eq!(list, original);
        }
    }
}
