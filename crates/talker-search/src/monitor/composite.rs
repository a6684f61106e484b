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
    monitor::{
        index::MonitorIndex,
        search_monitor::{SearchCommand, SearchMonitor, SearchSpace},
    },
};
use talker_core::num::cost::CostValue;

/// Forwards every event to all contained monitors. The first monitor asking
/// to terminate decides the command.
pub struct CompositeMonitor<'a, C> {
    monitors: Vec<Box<dyn SearchMonitor<C> + Send + 'a>>,
}

impl<'a, C> CompositeMonitor<'a, C> {
    fn names(&self) -> String
    where
        C: CostValue,
    {
        self.monitors
            .iter()
            .map(|m| m.name())
            .collect::<Vec<&str>>()
            .join(", ")
    }
}

impl<'a, C> std::fmt::Debug for CompositeMonitor<'a, C>
where
    C: CostValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeMonitor")
            .field("monitors", &self.names())
            .finish()
    }
}

impl<'a, C> std::fmt::Display for CompositeMonitor<'a, C>
where
    C: CostValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CompositeMonitor([{}])", self.names())
    }
}

impl<'a, C> Default for CompositeMonitor<'a, C>
where
    C: CostValue,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, C> CompositeMonitor<'a, C>
where
    C: CostValue,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn from_vec(monitors: Vec<Box<dyn SearchMonitor<C> + Send + 'a>>) -> Self {
        Self { monitors }
    }

    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: SearchMonitor<C> + Send + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    #[inline]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn SearchMonitor<C> + Send + 'a>) {
        self.monitors.push(monitor);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    /// Returns the monitor at `monitor_index`.
    ///
    /// # Panics
    ///
    /// Panics if `monitor_index` is out of bounds.
    #[inline]
    pub fn monitor(&self, monitor_index: MonitorIndex) -> &(dyn SearchMonitor<C> + Send + 'a) {
        let index = monitor_index.get();
        assert!(
            index < self.monitors.len(),
            "called `CompositeMonitor::monitor` with monitor index out of bounds: the len is {} but the index is {}",
            self.monitors.len(),
            index
        );
        self.monitors[index].as_ref()
    }
}

impl<'a, C> FromIterator<Box<dyn SearchMonitor<C> + Send + 'a>> for CompositeMonitor<'a, C>
where
    C: CostValue,
{
    fn from_iter<I: IntoIterator<Item = Box<dyn SearchMonitor<C> + Send + 'a>>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<'a, C> SearchMonitor<C> for CompositeMonitor<'a, C>
where
    C: CostValue,
{
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter_search(&mut self, space: &SearchSpace) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_enter_search(space);
        }
    }

    fn on_exit_search(&mut self) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_exit_search();
        }
    }

    fn on_bundle_evaluated(&mut self, index: u64, cost: C) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_bundle_evaluated(index, cost);
        }
    }

    fn on_evaluation_failed(&mut self, index: u64, error: &EvaluationError) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_evaluation_failed(index, error);
        }
    }

    #[inline]
    fn on_step(&mut self) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_step();
        }
    }

    fn search_command(&self) -> SearchCommand {
        for monitor in &self.monitors {
            if let command @ SearchCommand::Terminate(_) = monitor.search_command() {
                return command;
            }
        }
        SearchCommand::Continue
    }
}
