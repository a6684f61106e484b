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
use std::sync::atomic::AtomicBool;
use talker_core::num::cost::CostValue;

/// Terminates the search once the shared flag is raised. Raising the flag
/// from another thread stops every worker holding a reference to it.
#[derive(Debug, Clone)]
pub struct InterruptMonitor<'a> {
    stop_flag: &'a AtomicBool,
}

impl<'a> InterruptMonitor<'a> {
    #[inline(always)]
    pub fn new(stop_flag: &'a AtomicBool) -> Self {
        Self { stop_flag }
    }
}

impl<'a, C> SearchMonitor<C> for InterruptMonitor<'a>
where
    C: CostValue,
{
    fn name(&self) -> &str {
        "InterruptMonitor"
    }

    fn on_enter_search(&mut self, _space: &SearchSpace) {}
    fn on_exit_search(&mut self) {}
    fn on_bundle_evaluated(&mut self, _index: u64, _cost: C) {}
    fn on_evaluation_failed(&mut self, _index: u64, _error: &EvaluationError) {}
    fn on_step(&mut self) {}

    fn search_command(&self) -> SearchCommand {
        if self.stop_flag.load(std::sync::atomic::Ordering::Relaxed) {
            SearchCommand::Terminate("interrupt signal received".to_string())
        } else {
            SearchCommand::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::InterruptMonitor;
    use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_interrupt_monitor_continues_when_flag_is_clear() {
        let flag = AtomicBool::new(false);
        let monitor = InterruptMonitor::new(&flag);

        match SearchMonitor::<f64>::search_command(&monitor) {
            SearchCommand::Continue => {}
            other => panic!("expected Continue, got {:?}", other),
        }
    }

    #[test]
    fn test_interrupt_monitor_terminates_when_flag_is_set() {
        let flag = AtomicBool::new(false);
        let monitor = InterruptMonitor::new(&flag);

        flag.store(true, Ordering::Relaxed);

        match SearchMonitor::<i64>::search_command(&monitor) {
            SearchCommand::Terminate(reason) => {
                assert_eq!(reason, "interrupt signal received");
            }
            other => panic!("expected Terminate, got {:?}", other),
        }
    }
}
