//! Dense score surface over template placements.

/// Scores for every top-left placement of a template over a source,
/// `(W - w + 1) x (H - h + 1)` in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl Surface {
    pub(crate) fn from_vec(data: Vec<f32>, width: usize, height: usize) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self { width, height, data }
    }

    /// Number of horizontal placements.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of vertical placements.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Returns `(x, y, score)` of the best placement.
    ///
    /// Comparison is strict, so the first occurrence in row-major order wins
    /// ties. Non-finite scores are ignored.
    pub fn extremum(&self, higher_is_better: bool) -> Option<(usize, usize, f32)> {
        let mut best: Option<(usize, f32)> = None;
        for (idx, &score) in self.data.iter().enumerate() {
            if !score.is_finite() {
                continue;
            }
            let better = match best {
                None => true,
                Some((_, current)) if higher_is_better => score > current,
                Some((_, current)) => score < current,
            };
            if better {
                best = Some((idx, score));
            }
        }
        best.map(|(idx, score)| (idx % self.width, idx / self.width, score))
    }

    /// Overwrites the window of half extents `(half_w, half_h)` centred on
    /// `(cx, cy)` with `value`, clipped to the surface.
    pub fn suppress(&mut self, cx: usize, cy: usize, half_w: usize, half_h: usize, value: f32) {
        if cx >= self.width || cy >= self.height {
            return;
        }
        let x0 = cx.saturating_sub(half_w);
        let y0 = cy.saturating_sub(half_h);
        let x1 = cx.saturating_add(half_w).min(self.width - 1);
        let y1 = cy.saturating_add(half_h).min(self.height - 1);
        for y in y0..=y1 {
            let row = &mut self.data[y * self.width..(y + 1) * self.width];
            for slot in &mut row[x0..=x1] {
                *slot = value;
            }
        }
    }
}
