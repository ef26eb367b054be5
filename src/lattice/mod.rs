//! Triangular lattice storage shared by price and value grids.
//!
//! A recombining binomial tree over `M` steps has `M + 1` time columns, with
//! column `t` holding `t + 1` nodes. Cell `(j, t)` is the node reached after
//! `t` steps with `j` down-moves, so the valid region is the triangle
//! `j <= t`. Storage is a freshly allocated flat buffer per request; cells
//! outside the triangle carry a zero sentinel that the accessors never
//! surface, so a consumer cannot mistake padding for a price of zero.

/// Immutable triangular grid of `f64` node values.
///
/// # Examples
/// ```
/// use ferrictree::lattice::Lattice;
///
/// let lattice = Lattice::build(2, |j, t| (10 * t + j) as f64);
/// assert_eq!(lattice.get(0, 0), Some(0.0));
/// assert_eq!(lattice.get(1, 2), Some(21.0));
/// assert_eq!(lattice.get(2, 1), None);
/// assert_eq!(lattice.column(2), Some(&[20.0, 21.0, 22.0][..]));
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Lattice {
    steps: usize,
    cells: Vec<f64>,
}

impl Lattice {
    /// Builds a lattice by evaluating `node(j, t)` over the triangle `j <= t`.
    pub fn build<F>(steps: usize, mut node: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut lattice = Self::zeroed(steps);
        for t in 0..=steps {
            for j in 0..=t {
                lattice.set(j, t, node(j, t));
            }
        }
        lattice
    }

    pub(crate) fn zeroed(steps: usize) -> Self {
        Self {
            steps,
            cells: vec![0.0; (steps + 1) * (steps + 1)],
        }
    }

    #[inline]
    fn index(&self, j: usize, t: usize) -> usize {
        t * (self.steps + 1) + j
    }

    #[inline]
    pub(crate) fn set(&mut self, j: usize, t: usize, value: f64) {
        debug_assert!(j <= t && t <= self.steps);
        let idx = self.index(j, t);
        self.cells[idx] = value;
    }

    /// Unchecked triangle read for engine loops.
    #[inline]
    pub(crate) fn at(&self, j: usize, t: usize) -> f64 {
        debug_assert!(j <= t && t <= self.steps);
        self.cells[self.index(j, t)]
    }

    /// Number of time steps `M`.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of columns (and of nodes in the terminal column), `M + 1`.
    #[inline]
    pub fn size(&self) -> usize {
        self.steps + 1
    }

    /// Node value at `(j, t)`, or `None` outside the triangle `j <= t <= M`.
    #[inline]
    pub fn get(&self, j: usize, t: usize) -> Option<f64> {
        (j <= t && t <= self.steps).then(|| self.cells[self.index(j, t)])
    }

    /// Root node value `(0, 0)`.
    #[inline]
    pub fn root(&self) -> f64 {
        self.cells[0]
    }

    /// The `t + 1` valid nodes of time column `t`, or `None` past the grid.
    #[inline]
    pub fn column(&self, t: usize) -> Option<&[f64]> {
        (t <= self.steps).then(|| {
            let start = self.index(0, t);
            &self.cells[start..start + t + 1]
        })
    }

    /// All time columns as owned rows of increasing length, for tabular
    /// display.
    pub fn columns(&self) -> Vec<Vec<f64>> {
        (0..=self.steps)
            .map(|t| self.column(t).unwrap_or_default().to_vec())
            .collect()
    }
}
