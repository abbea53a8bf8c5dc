use crate::domain::model::{CartEntry, CatalogItem};

/// Item id → entry mapping. The only mutators are [`Cart::add`],
/// [`Cart::set_quantity`] and [`Cart::remove`]; every stored quantity is
/// positive. Entries iterate in first-add order.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, item_id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.item.id == item_id)
    }

    /// Adds `quantity` of `item`, summing into an existing entry. Adding zero
    /// never creates an entry.
    pub fn add(&mut self, item: &CatalogItem, quantity: u32) -> &mut Self {
        match self.position(&item.id) {
            Some(index) => {
                let entry = &mut self.entries[index];
                entry.item = item.clone();
                entry.quantity = entry.quantity.saturating_add(quantity);
            }
            None if quantity > 0 => self.entries.push(CartEntry {
                item: item.clone(),
                quantity,
            }),
            None => {}
        }
        self
    }

    /// Replaces the quantity of an existing entry; zero or less removes it.
    /// Unknown ids are ignored.
    pub fn set_quantity(&mut self, item_id: &str, quantity: i64) -> &mut Self {
        if let Some(index) = self.position(item_id) {
            if quantity <= 0 {
                self.entries.remove(index);
            } else {
                self.entries[index].quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
            }
        }
        self
    }

    pub fn remove(&mut self, item_id: &str) -> &mut Self {
        if let Some(index) = self.position(item_id) {
            self.entries.remove(index);
        }
        self
    }

    pub fn get(&self, item_id: &str) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.item.id == item_id)
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_quantity(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.quantity)).sum()
    }

    pub fn grand_total(&self) -> f64 {
        self.entries.iter().map(CartEntry::line_total).sum()
    }
}
