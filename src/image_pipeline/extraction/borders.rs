use std::ops::Range;

use tracing::debug;

use crate::image_pipeline::common::error::{ReductionError, Result};
use crate::image_pipeline::extraction::polynomial::Polynomial;
use crate::image_pipeline::extraction::trace::TraceMap;

/// Row interval assigned to one fiber, as two curves in column.
#[derive(Debug, Clone, PartialEq)]
pub struct BorderPair {
    pub fiber_id: usize,
    pub lower: Polynomial,
    pub upper: Polynomial,
    pub domain: Range<usize>,
}

impl BorderPair {
    pub fn at(&self, col: f64) -> (f64, f64) {
        (self.lower.eval(col), self.upper.eval(col))
    }
}

fn check_monotonic(trace_map: &TraceMap) -> Result<Range<usize>> {
    let domain = trace_map.shared_domain().ok_or_else(|| {
        ReductionError::ValidationError("traces share no column domain".to_string())
    })?;

    for pair in trace_map.traces().windows(2) {
        let (below, above) = (&pair[0], &pair[1]);
        for col in domain.clone() {
            let x = col as f64;
            if above.center_at(x) <= below.center_at(x) {
                return Err(ReductionError::ValidationError(format!(
                    "trace of fiber {} is not above fiber {} at column {col}",
                    above.fiber_id, below.fiber_id
                )));
            }
        }
    }
    Ok(domain)
}

/// Splits the rows between adjacent traces into one border pair per fiber.
///
/// Interior borders are the midpoint curves of neighbouring traces. The
/// outermost borders mirror the nearest interior border about the edge
/// fiber's own trace. Adjacent pairs share the same curve, so there is no
/// gap or overlap between fibers.
pub fn resolve_borders(trace_map: &TraceMap) -> Result<Vec<BorderPair>> {
    let traces = trace_map.traces();
    if traces.len() < 2 {
        return Err(ReductionError::ValidationError(format!(
            "need at least 2 traces to resolve borders, got {}",
            traces.len()
        )));
    }
    let domain = check_monotonic(trace_map)?;

    let first = &traces[0].center;
    let mut lower = first.combine(1.5, &traces[1].center, -0.5);
    let mut pairs = Vec::with_capacity(traces.len());

    for pair in traces.windows(2) {
        let upper = pair[0].center.combine(0.5, &pair[1].center, 0.5);
        pairs.push(BorderPair {
            fiber_id: pair[0].fiber_id,
            lower: lower.clone(),
            upper: upper.clone(),
            domain: domain.clone(),
        });
        lower = upper;
    }

    let last = &traces[traces.len() - 1];
    let upper = last.center.combine(2.0, &lower, -1.0);
    pairs.push(BorderPair {
        fiber_id: last.fiber_id,
        lower,
        upper,
        domain: domain.clone(),
    });

    debug!(fibers = pairs.len(), ?domain, "resolved fiber borders");
    Ok(pairs)
}
