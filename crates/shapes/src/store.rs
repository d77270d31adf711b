use std::marker::PhantomData;

/// Handle to an item pushed into a [`Store`].
pub struct Index<T> {
    pos: usize,
    generation: u32,
    _marker: PhantomData<T>,
}

impl<T> Clone for Index<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Index<T> {}

impl<T> PartialEq for Index<T> {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos && self.generation == other.generation
    }
}
impl<T> Eq for Index<T> {}

impl<T> std::fmt::Debug for Index<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Index")
            .field("pos", &self.pos)
            .field("generation", &self.generation)
            .finish()
    }
}

impl<T> Index<T> {
    /// Position of the item in insertion order.
    pub fn position(&self) -> usize {
        self.pos
    }
}

/// Append only, ordered storage.
#[derive(Debug, Clone)]
pub struct Store<T> {
    items: Vec<T>,
    // bumped by `clear`, so indexes from before it stop resolving
    generation: u32,
}

impl<T> Store<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            generation: 0,
        }
    }

    pub fn push(&mut self, item: T) -> Index<T> {
        self.items.push(item);
        Index {
            pos: self.items.len() - 1,
            generation: self.generation,
            _marker: PhantomData,
        }
    }

    /// `None` for an index handed out before the last [`clear`](Self::clear).
    pub fn get(&self, index: Index<T>) -> Option<&T> {
        if index.generation != self.generation {
            return None;
        }
        self.items.get(index.pos)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Invalidates every index handed out so far.
    pub fn clear(&mut self) {
        self.items.clear();
        self.generation = self.generation.wrapping_add(1);
    }
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn indices() {
    let mut store = Store::new();
    let a = store.push('a');
    let b = store.push('b');
    let again = store.push('a');

    assert_eq!(store.len(), 3);
    assert_eq!(store.get(b), Some(&'b'));
    assert_eq!(store.get(again), Some(&'a'));
    assert_ne!(a, again);
    assert_eq!(store.iter().collect::<String>(), "aba");

    store.clear();
    assert!(store.is_empty());
    assert_eq!(store.get(a), None);
}

#[test]
fn stale_indices_after_clear() {
    let mut store = Store::new();
    let old = store.push(1);
    store.clear();
    let new = store.push(99);

    assert_eq!(old.position(), new.position());
    assert_ne!(old, new);
    assert_eq!(store.get(old), None);
    assert_eq!(store.get(new), Some(&99));
}
