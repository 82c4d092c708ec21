use std::collections::HashMap;

/// Disjoint sets over string ids, union by rank with path compression
#[derive(Debug, Clone, Default)]
pub struct UnionFind {
    index: HashMap<String, usize>,
    parent: Vec<usize>,
    rank: Vec<u8>,
    components: usize,
}

impl UnionFind {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with every id in its own set
    pub fn with_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Self {
        let mut sets = Self::new();
        for id in ids {
            sets.insert(id);
        }
        sets
    }

    /// Add `id` as a singleton set; no-op if already present
    pub fn insert(&mut self, id: &str) -> usize {
        if let Some(&i) = self.index.get(id) {
            return i;
        }
        let i = self.parent.len();
        self.index.insert(id.to_string(), i);
        self.parent.push(i);
        self.rank.push(0);
        self.components += 1;
        i
    }

    /// Representative of `id`'s set, or `None` if unknown
    pub fn find(&mut self, id: &str) -> Option<usize> {
        let i = *self.index.get(id)?;
        Some(self.root(i))
    }

    fn root(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut current = i;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merge the sets of `a` and `b`, inserting unknown ids
    ///
    /// Returns `false` when they were already in the same set.
    pub fn union(&mut self, a: &str, b: &str) -> bool {
        let (ia, ib) = (self.insert(a), self.insert(b));
        let (ra, rb) = (self.root(ia), self.root(ib));
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] = self.rank[ra].saturating_add(1);
            }
        }
        self.components -= 1;
        true
    }

    /// Number of disjoint sets
    pub fn components(&self) -> usize {
        self.components
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }
}
