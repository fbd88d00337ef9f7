//! Lower envelope of parabolas for the column sweeps
//!
//! Along a column, every row `r` with a finite row-pass value `b_r`
//! contributes the parabola `f_r(s) = (s - r)^2 + b_r`. The squared
//! distance at row `s` is the minimum over all of them. A sweep keeps the
//! part of that lower envelope not yet passed as a stack of curves.
//!
//! Positions inside a sweep are *steps*: the row index for the top-down
//! sweep and `height - 1 - row` for the bottom-up sweep, so both
//! directions share the same arithmetic and a curve's validity always
//! ends at a larger step. The bottom-up end sentinel `step == height`
//! corresponds to row `-1`.

use super::lookup::SquaredDistanceLookup;
use super::{CHANNELS, INFINITY, UNSET_COORD};

/// Direction of a column sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SweepDirection {
    /// Rows `0..height`
    TopDown,
    /// Rows `height-1..=0`
    BottomUp,
}

impl SweepDirection {
    /// Map a step to an image row (the mapping is its own inverse).
    #[inline]
    pub(crate) fn row(self, step: i32, height: i32) -> i32 {
        match self {
            SweepDirection::TopDown => step,
            SweepDirection::BottomUp => height - 1 - step,
        }
    }
}

/// One parabola of the envelope: `(s - apex)^2 + base`, lowest on
/// `[start, valid_end)` where `start` is the previous curve's `valid_end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EnvelopeCurve {
    /// Step of the row that produced the curve
    pub apex: i32,
    /// First step at which a later curve is lower
    pub valid_end: i32,
    /// Squared column distance from the source row
    pub base: i32,
    /// Column of the source edge pixel
    pub source_col: i32,
}

impl EnvelopeCurve {
    #[inline]
    fn value_at(&self, step: i32, lookup: &SquaredDistanceLookup) -> i32 {
        lookup[(step - self.apex) as usize] + self.base
    }
}

/// Smallest step at which `newer` is strictly below `older`.
///
/// Requires `older.apex < newer.apex`. The difference
/// `newer(s) - older(s)` falls as `s` grows, so the crossing is the
/// first integer `s` with `2s(p - a) > b_new - b_old + p^2 - a^2`.
#[inline]
fn crossing(older: &EnvelopeCurve, newer: &EnvelopeCurve, lookup: &SquaredDistanceLookup) -> i64 {
    let a = older.apex as usize;
    let p = newer.apex as usize;
    let numerator = newer.base as i64 - older.base as i64 + lookup[p] as i64 - lookup[a] as i64;
    let denominator = 2 * (p as i64 - a as i64);
    numerator.div_euclid(denominator) + 1
}

/// Curves ordered by increasing apex; the front curve is the one lowest
/// at the current step.
///
/// Backed by one vector reused for every column: `head` indexes the
/// front, the vector's end is the back.
#[derive(Debug, Clone, Default)]
pub(crate) struct CurveStack {
    curves: Vec<EnvelopeCurve>,
    head: usize,
}

impl CurveStack {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            curves: Vec::with_capacity(capacity),
            head: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.curves.len() - self.head
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.curves.clear();
        self.head = 0;
    }

    /// Replace the whole envelope with a single curve.
    #[inline]
    pub(crate) fn reset_to(&mut self, curve: EnvelopeCurve) {
        self.clear();
        self.curves.push(curve);
    }

    #[inline]
    pub(crate) fn front(&self) -> Option<&EnvelopeCurve> {
        self.curves.get(self.head)
    }

    /// Drop front curves whose validity ended at or before `step`.
    #[inline]
    pub(crate) fn retire(&mut self, step: i32) {
        while self.len() > 1 && self.curves[self.head].valid_end <= step {
            self.head += 1;
        }
    }

    /// Insert a curve whose apex is the current step and which is not
    /// strictly below the front curve there.
    ///
    /// Back curves that the new one undercuts over their whole range are
    /// popped. The front curve is never popped. Returns `false` when the
    /// new curve would only win at or past `limit`.
    pub(crate) fn insert(
        &mut self,
        mut curve: EnvelopeCurve,
        limit: i32,
        lookup: &SquaredDistanceLookup,
    ) -> bool {
        debug_assert!(self.len() > 0);
        loop {
            let top = self.curves.len() - 1;
            let start = crossing(&self.curves[top], &curve, lookup);
            if top > self.head && start <= self.curves[top - 1].valid_end as i64 {
                self.curves.pop();
                continue;
            }
            if start >= limit as i64 {
                return false;
            }
            self.curves[top].valid_end = start as i32;
            curve.valid_end = limit;
            self.curves.push(curve);
            return true;
        }
    }
}

/// Inputs shared by every column sweep of one transform.
pub(crate) struct SweepContext<'a> {
    /// Edge flags, row-major, one per pixel
    pub mask: &'a [bool],
    /// Intermediate row-pass buffer, row-major, three values per pixel
    pub rows: &'a [i32],
    pub lookup: &'a SquaredDistanceLookup,
    pub width: usize,
    pub height: usize,
}

impl SweepContext<'_> {
    /// Run one sweep over column `x`.
    ///
    /// `column` holds `height * 3` values (distance, row, column per row).
    /// With `merge == false` every entry is overwritten; with
    /// `merge == true` an entry is replaced only when the new distance is
    /// strictly smaller, which includes entries still at `INFINITY`.
    pub(crate) fn sweep(
        &self,
        x: usize,
        direction: SweepDirection,
        merge: bool,
        stack: &mut CurveStack,
        column: &mut [i32],
    ) {
        let height = self.height as i32;
        let col = x as i32;
        stack.clear();

        for step in 0..height {
            let y = direction.row(step, height) as usize;
            let pixel = y * self.width + x;
            stack.retire(step);

            if self.mask[pixel] {
                stack.reset_to(EnvelopeCurve {
                    apex: step,
                    valid_end: height,
                    base: 0,
                    source_col: col,
                });
            } else {
                let base = self.rows[pixel * CHANNELS];
                if base != INFINITY {
                    let candidate = EnvelopeCurve {
                        apex: step,
                        valid_end: height,
                        base,
                        source_col: self.rows[pixel * CHANNELS + 2],
                    };
                    let envelope = stack.front().map(|f| f.value_at(step, self.lookup));
                    match envelope {
                        Some(value) if base >= value => {
                            stack.insert(candidate, height, self.lookup);
                        }
                        _ => stack.reset_to(candidate),
                    }
                }
            }

            let (distance, row, source_col) = match stack.front() {
                Some(front) => (
                    front.value_at(step, self.lookup),
                    direction.row(front.apex, height),
                    front.source_col,
                ),
                None => (INFINITY, UNSET_COORD, UNSET_COORD),
            };

            let cell = &mut column[y * CHANNELS..(y + 1) * CHANNELS];
            if !merge || distance < cell[0] {
                cell[0] = distance;
                cell[1] = row;
                cell[2] = source_col;
            }
        }
    }
}
