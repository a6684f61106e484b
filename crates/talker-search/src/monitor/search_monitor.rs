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


use crate::eval::EvaluationError;
use talker_core::num::cost::CostValue;

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl SearchCommand {
    #[inline]
    pub fn is_terminate(&self) -> bool {
        matches!(self, SearchCommand::Terminate(_))
    }
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// The slice of the ordering space a search is about to walk.
///
/// A parallel search hands every worker its own `SearchSpace`; `range` is the
/// block of global ordering indices that worker enumerates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchSpace {
    committed: usize,
    new: usize,
    bundle_size: usize,
    range: std::ops::Range<u64>,
}

impl SearchSpace {
    #[inline]
    pub fn new(committed: usize, new: usize, bundle_size: usize, range: std::ops::Range<u64>) -> Self {
        Self {
            committed,
            new,
            bundle_size,
            range,
        }
    }

    #[inline]
    pub fn num_committed(&self) -> usize {
        self.committed
    }

    #[inline]
    pub fn num_new(&self) -> usize {
        self.new
    }

    #[inline]
    pub fn bundle_size(&self) -> usize {
        self.bundle_size
    }

    #[inline]
    pub fn range(&self) -> std::ops::Range<u64> {
        self.range.clone()
    }

    /// Number of orderings in this space.
    #[inline]
    pub fn len(&self) -> u64 {
        self.range.end.saturating_sub(self.range.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Display for SearchSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchSpace(committed: {}, new: {}, orderings: {}..{})",
            self.committed, self.new, self.range.start, self.range.end
        )
    }
}

pub trait SearchMonitor<C>
where
    C: CostValue,
{
    fn name(&self) -> &str;
    fn on_enter_search(&mut self, space: &SearchSpace);
    fn on_exit_search(&mut self);
    fn on_bundle_evaluated(&mut self, index: u64, cost: C);
    fn on_evaluation_failed(&mut self, index: u64, error: &EvaluationError);
    fn on_step(&mut self);
    fn search_command(&self) -> SearchCommand;
}

impl<C, M> SearchMonitor<C> for &mut M
where
    C: CostValue,
    M: SearchMonitor<C> + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn on_enter_search(&mut self, space: &SearchSpace) {
        (**self).on_enter_search(space)
    }

    fn on_exit_search(&mut self) {
        (**self).on_exit_search()
    }

    fn on_bundle_evaluated(&mut self, index: u64, cost: C) {
        (**self).on_bundle_evaluated(index, cost)
    }

    fn on_evaluation_failed(&mut self, index: u64, error: &EvaluationError) {
        (**self).on_evaluation_failed(index, error)
    }

    #[inline]
    fn on_step(&mut self) {
        (**self).on_step()
    }

    #[inline]
    fn search_command(&self) -> SearchCommand {
        (**self).search_command()
    }
}

impl<C> std::fmt::Debug for dyn SearchMonitor<C>
where
    C: CostValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

impl<C> std::fmt::Display for dyn SearchMonitor<C>
where
    C: CostValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}
