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


use crate::{
    eval::EvaluationError,
    monitor::search_monitor::{SearchCommand, SearchMonitor, SearchSpace},
};
use talker_core::num::cost::CostValue;

/// Observes nothing and never terminates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOpMonitor;

impl NoOpMonitor {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl<C> SearchMonitor<C> for NoOpMonitor
where
    C: CostValue,
{
    fn name(&self) -> &str {
        "NoOpMonitor"
    }

    fn on_enter_search(&mut self, _space: &SearchSpace) {}
    fn on_exit_search(&mut self) {}
    fn on_bundle_evaluated(&mut self, _index: u64, _cost: C) {}
    fn on_evaluation_failed(&mut self, _index: u64, _error: &EvaluationError) {}
    fn on_step(&mut self) {}

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        SearchCommand::Continue
    }
}
