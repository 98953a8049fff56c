//! # Disjoint Sets
//!
//! Union-find over cell indices, used by the maze carver to answer "are
//! these two cells already connected" in amortized near-constant time.
//! Iterative two-pass path compression plus union by rank.

/// Disjoint-set forest over `0..len` elements.
pub struct DisjointSets {
    /// Parent pointer per element; roots point at themselves.
    parents: Vec<usize>,
    /// Rank (tree-height upper bound) per root.
    ranks: Vec<u8>,
}

impl DisjointSets {
    /// Creates `len` singleton sets.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            parents: (0..len).collect(),
            ranks: vec![0; len],
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Checks whether the forest has no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Finds the set root of an element, compressing the path walked.
    ///
    /// First pass walks to the root, second pass repoints every node on the
    /// path directly at it.
    pub fn find(&mut self, element: usize) -> usize {
        let mut root = element;
        while self.parents[root] != root {
            root = self.parents[root];
        }

        let mut current = element;
        while self.parents[current] != root {
            let parent = self.parents[current];
            self.parents[current] = root;
            current = parent;
        }

        root
    }

    /// Merges the sets containing `a` and `b`.
    ///
    /// Returns `false` if they were already the same set. The lower-rank
    /// root is attached beneath the higher-rank one; on equal ranks the
    /// second root wins and its rank grows.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);

        if root_a == root_b {
            return false;
        }

        if self.ranks[root_a] > self.ranks[root_b] {
            self.parents[root_b] = root_a;
        } else {
            self.parents[root_a] = root_b;
            if self.ranks[root_a] == self.ranks[root_b] {
                self.ranks[root_b] += 1;
            }
        }

        true
    }

    /// Checks whether two elements share a set.
    pub fn same_set(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Counts distinct roots among the given elements.
    ///
    /// Handy for verifying connectivity: a spanning structure over the
    /// elements has exactly one root.
    pub fn count_roots(&mut self, elements: impl Iterator<Item = usize>) -> usize {
        let mut roots: Vec<usize> = elements.map(|e| self.find(e)).collect();
        roots.sort_unstable();
        roots.dedup();
        roots.len()
    }
}
