// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.


use crate::stats::SearchStatistics;
use talker_core::num::cost::CostValue;
use talker_model::bundle::BundleSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// Every ordering of the search space was enumerated.
    Exhausted,
    /// A budget or an interrupt stopped the enumeration early.
    /// The string names the monitor's reason.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::Exhausted => write!(f, "Exhausted"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// The best bundles a search found, why it stopped, and what it cost.
///
/// An aborted search still carries the best bundles seen before it stopped.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome<T, C> {
    pub bundles: BundleSet<T, C>,
    pub reason: TerminationReason,
    pub statistics: SearchStatistics,
}

impl<T, C> SearchOutcome<T, C>
where
    C: CostValue,
{
    #[inline]
    pub fn new(bundles: BundleSet<T, C>, reason: TerminationReason, statistics: SearchStatistics) -> Self {
        Self {
            bundles,
            reason,
            statistics,
        }
    }

    #[inline]
    pub fn is_exhaustive(&self) -> bool {
        matches!(self.reason, TerminationReason::Exhausted)
    }

    #[inline]
    pub fn is_aborted(&self) -> bool {
        matches!(self.reason, TerminationReason::Aborted(_))
    }

    #[inline]
    pub fn has_bundles(&self) -> bool {
        !self.bundles.is_empty()
    }

    #[inline]
    pub fn best_cost(&self) -> Option<C> {
        self.bundles.best().map(|b| b.cost())
    }
}

impl<T, C> std::fmt::Display for SearchOutcome<T, C>
where
    C: CostValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchOutcome({}, bundles: {}", self.reason, self.bundles.len())?;
        if let Some(cost) = self.best_cost() {
            write!(f, ", best: {}", cost)?;
        }
        write!(f, ")")
    }
}
