//! Grid search candidates and the best-candidate selection rule.
//!
//! A candidate replaces the incumbent only when its residual is strictly
//! smaller. Because radii are swept in increasing order, ties keep the
//! earliest (smallest) radius. A residual that is NaN or infinite never
//! wins, which matches starting the search from an infinite residual.

/// One evaluated grid point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    /// Position of the candidate in sweep order
    pub index: usize,
    /// Candidate radius in metres
    pub radius: f64,
    /// Mass implied by the measurements at this radius, in kilograms
    pub mass: f64,
    /// Sum of squared acceleration residuals
    pub residual: f64,
}

impl Candidate {
    /// Whether this candidate would replace `incumbent` in a sequential sweep.
    pub fn improves_on(&self, incumbent: Option<&Self>) -> bool {
        let best_residual = incumbent.map_or(f64::INFINITY, |c| c.residual);
        self.residual < best_residual
    }

    /// Order-independent merge of two partial results.
    ///
    /// Picks the smaller residual and, on equal residuals, the smaller sweep
    /// index, so sharded reductions agree with the sequential sweep.
    pub fn preferred(a: Option<Self>, b: Option<Self>) -> Option<Self> {
        match (a, b) {
            (None, other) | (other, None) => other.filter(|c| c.residual < f64::INFINITY),
            (Some(a), Some(b)) => {
                if !(a.residual < f64::INFINITY) {
                    return Self::preferred(None, Some(b));
                }
                if !(b.residual < f64::INFINITY) {
                    return Some(a);
                }
                if b.residual < a.residual || (b.residual == a.residual && b.index < a.index) {
                    Some(b)
                } else {
                    Some(a)
                }
            }
        }
    }
}

/// The mutable state of a sequential grid search.
#[derive(Debug, Clone, Default)]
pub struct BestCandidate {
    best: Option<Candidate>,
}

impl BestCandidate {
    /// Creates an empty tracker; the first finite residual always wins.
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers a candidate. Returns `true` when it became the new best.
    pub fn offer(&mut self, candidate: Candidate) -> bool {
        if candidate.improves_on(self.best.as_ref()) {
            self.best = Some(candidate);
            true
        } else {
            false
        }
    }

    /// Current best candidate, if any finite residual was offered.
    pub fn get(&self) -> Option<&Candidate> {
        self.best.as_ref()
    }

    /// Consumes the tracker.
    pub fn into_inner(self) -> Option<Candidate> {
        self.best
    }
}
