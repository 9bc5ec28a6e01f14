use serde::{Deserialize, Serialize};

/// A quantity of one item. Stored stacks always have `quantity > 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub id: String,
    pub name: String,
    pub quantity: u32,
}

impl ItemStack {
    pub fn new(id: impl Into<String>, name: impl Into<String>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity,
        }
    }
}

/// Ordered list of item stacks keyed by item id, with no capacity ceiling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemLedger {
    stacks: Vec<ItemStack>,
}

impl ItemLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from saved stacks, merging duplicate ids and
    /// dropping empty stacks.
    pub fn from_stacks(stacks: impl IntoIterator<Item = ItemStack>) -> Self {
        let mut ledger = Self::new();
        for stack in stacks {
            if !ledger.add(&stack.id, &stack.name, stack.quantity) {
                log::warn!("dropping {} {}: stack would overflow", stack.quantity, stack.id);
            }
        }
        ledger
    }

    pub fn total_quantity(&self) -> u64 {
        self.stacks.iter().map(|s| s.quantity as u64).sum()
    }

    pub fn get(&self, id: &str) -> Option<&ItemStack> {
        self.stacks.iter().find(|s| s.id == id)
    }

    pub fn quantity_of(&self, id: &str) -> u32 {
        self.get(id).map_or(0, |s| s.quantity)
    }

    pub fn has_item(&self, id: &str, quantity: u32) -> bool {
        self.get(id).is_some_and(|s| s.quantity >= quantity)
    }

    /// How many more units of `id` a single stack can take.
    pub fn room_for(&self, id: &str) -> u32 {
        u32::MAX - self.quantity_of(id)
    }

    /// Merges into an existing stack or appends a new one. Returns false
    /// with no mutation if the stack would overflow.
    pub fn add(&mut self, id: &str, name: &str, quantity: u32) -> bool {
        if quantity == 0 {
            return true;
        }
        if let Some(stack) = self.stacks.iter_mut().find(|s| s.id == id) {
            match stack.quantity.checked_add(quantity) {
                Some(total) => stack.quantity = total,
                None => return false,
            }
        } else {
            self.stacks.push(ItemStack::new(id, name, quantity));
        }
        true
    }

    /// Removes `quantity` of an item. Fails without mutation when the stack
    /// is missing or too small; an emptied stack is deleted.
    pub fn remove(&mut self, id: &str, quantity: u32) -> bool {
        let Some(index) = self.stacks.iter().position(|s| s.id == id) else {
            return false;
        };
        let stack = &mut self.stacks[index];
        if stack.quantity < quantity {
            return false;
        }
        stack.quantity -= quantity;
        if stack.quantity == 0 {
            self.stacks.remove(index);
        }
        true
    }

    pub fn stacks(&self) -> &[ItemStack] {
        &self.stacks
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }
}

/// Player inventory. Total units never exceed `capacity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inventory {
    capacity: u32,
    items: ItemLedger,
}

impl Inventory {
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            items: ItemLedger::new(),
        }
    }

    /// Restores a saved inventory. Stacks that would overflow the capacity
    /// are truncated rather than kept in an invalid state.
    pub fn restore(capacity: u32, stacks: impl IntoIterator<Item = ItemStack>) -> Self {
        let mut inventory = Self::new(capacity);
        for stack in ItemLedger::from_stacks(stacks).stacks() {
            let fits = stack.quantity.min(inventory.free_space());
            if fits < stack.quantity {
                log::warn!(
                    "saved inventory over capacity: dropping {}x {}",
                    stack.quantity - fits,
                    stack.id
                );
            }
            inventory.items.add(&stack.id, &stack.name, fits);
        }
        inventory
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn count(&self) -> u32 {
        self.items.total_quantity().min(u32::MAX as u64) as u32
    }

    pub fn free_space(&self) -> u32 {
        self.capacity.saturating_sub(self.count())
    }

    pub fn has_space(&self, quantity: u32) -> bool {
        self.count() as u64 + quantity as u64 <= self.capacity as u64
    }

    pub fn has_item(&self, id: &str, quantity: u32) -> bool {
        self.items.has_item(id, quantity)
    }

    pub fn quantity_of(&self, id: &str) -> u32 {
        self.items.quantity_of(id)
    }

    pub fn get(&self, id: &str) -> Option<&ItemStack> {
        self.items.get(id)
    }

    /// Adds items if they fit. Returns false with no mutation otherwise.
    pub fn add_item(&mut self, id: &str, name: &str, quantity: u32) -> bool {
        if !self.has_space(quantity) {
            return false;
        }
        self.items.add(id, name, quantity)
    }

    pub fn remove_item(&mut self, id: &str, quantity: u32) -> bool {
        self.items.remove(id, quantity)
    }

    pub fn stacks(&self) -> &[ItemStack] {
        self.items.stacks()
    }
}

/// Bank storage: unbounded item stacks plus a separate gold counter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    #[serde(default)]
    pub gold: u64,
    #[serde(default)]
    pub items: ItemLedger,
}

impl Bank {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Moves up to `requested` units from `available`, returning how much moved.
pub fn clamp_transfer(requested: u64, available: u64) -> u64 {
    requested.min(available)
}
