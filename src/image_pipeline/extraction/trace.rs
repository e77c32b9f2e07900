//! Fitted fiber traces

use std::ops::Range;

use crate::image_pipeline::extraction::polynomial::Polynomial;

/// One fiber's center row as a polynomial in column, valid over `domain`.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub fiber_id: usize,
    pub center: Polynomial,
    /// Columns where the fit is valid, half-open.
    pub domain: Range<usize>,
}

impl Trace {
    pub fn new(fiber_id: usize, coeffs: Vec<f64>, domain: Range<usize>) -> Self {
        Self {
            fiber_id,
            center: Polynomial::new(coeffs),
            domain,
        }
    }

    pub fn center_at(&self, col: f64) -> f64 {
        self.center.eval(col)
    }
}

/// Traces ordered by increasing center row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraceMap {
    traces: Vec<Trace>,
}

impl TraceMap {
    pub fn new(traces: Vec<Trace>) -> Self {
        Self { traces }
    }

    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    /// Intersection of every trace's column domain; `None` if empty.
    pub fn shared_domain(&self) -> Option<Range<usize>> {
        let start = self.traces.iter().map(|t| t.domain.start).max()?;
        let end = self.traces.iter().map(|t| t.domain.end).min()?;
        (start < end).then_some(start..end)
    }
}

impl FromIterator<Trace> for TraceMap {
    fn from_iter<I: IntoIterator<Item = Trace>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
