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


//! # Task Board
//!
//! A borrowed, read-only view of one bundling request: the start pose, the
//! committed tasks and the new tasks. Enumeration and selection work on
//! `TaskRef` orderings; the board turns those back into tasks for cost
//! evaluation and for building the response.

use crate::{
    index::{CommittedIndex, NewTaskIndex, TaskRef},
    pose::Pose2d,
    task::Task,
};

#[derive(Debug)]
pub struct TaskBoard<'a, M> {
    start: Pose2d,
    committed: &'a [Task<M>],
    new_tasks: &'a [Task<M>],
}

impl<'a, M> Clone for TaskBoard<'a, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, M> Copy for TaskBoard<'a, M> {}

impl<'a, M> TaskBoard<'a, M> {
    #[inline]
    pub fn new(start: Pose2d, committed: &'a [Task<M>], new_tasks: &'a [Task<M>]) -> Self {
        Self {
            start,
            committed,
            new_tasks,
        }
    }

    #[inline]
    pub fn start(&self) -> &Pose2d {
        &self.start
    }

    #[inline]
    pub fn num_committed(&self) -> usize {
        self.committed.len()
    }

    #[inline]
    pub fn num_new(&self) -> usize {
        self.new_tasks.len()
    }

    #[inline]
    pub fn committed_tasks(&self) -> &'a [Task<M>] {
        self.committed
    }

    #[inline]
    pub fn new_tasks(&self) -> &'a [Task<M>] {
        self.new_tasks
    }

    /// The committed tasks as references, in their committed order.
    pub fn committed_refs(&self) -> Vec<TaskRef> {
        (0..self.committed.len()).map(TaskRef::committed).collect()
    }

    /// The new tasks as references, in input order.
    pub fn new_refs(&self) -> Vec<TaskRef> {
        (0..self.new_tasks.len()).map(TaskRef::new_task).collect()
    }

    /// Returns the committed task at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn committed(&self, index: CommittedIndex) -> &'a Task<M> {
        &self.committed[index.get()]
    }

    /// Returns the new task at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn new_task(&self, index: NewTaskIndex) -> &'a Task<M> {
        &self.new_tasks[index.get()]
    }

    /// Resolves a reference to the task it names.
    ///
    /// # Panics
    ///
    /// Panics if the reference does not belong to this board.
    #[inline]
    pub fn resolve(&self, task: TaskRef) -> &'a Task<M> {
        match task {
            TaskRef::Committed(index) => self.committed(index),
            TaskRef::New(index) => self.new_task(index),
        }
    }

    /// Returns the task for `task`, or `None` if it does not belong to this board.
    #[inline]
    pub fn get(&self, task: TaskRef) -> Option<&'a Task<M>> {
        match task {
            TaskRef::Committed(index) => self.committed.get(index.get()),
            TaskRef::New(index) => self.new_tasks.get(index.get()),
        }
    }

    /// Resolves a whole ordering, preserving its order.
    pub fn resolve_all<'r, I>(&self, ordering: I) -> impl Iterator<Item = &'a Task<M>>
    where
        I: IntoIterator<Item = &'r TaskRef>,
    {
        let board = *self;
        ordering.into_iter().map(move |&task| board.resolve(task))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_fixture() -> (Vec<Task<&'static str>>, Vec<Task<&'static str>>) {
        let committed = vec![
            Task::new(Pose2d::new(-7.0, 7.0, 0.0), "c0"),
            Task::new(Pose2d::new(-5.0, -1.0, 0.0), "c1"),
        ];
        let new_tasks = vec![Task::new(Pose2d::new(-6.0, -5.0, 0.0), "n0")];
        (committed, new_tasks)
    }

    #[test]
    fn test_refs_follow_input_order() {
        let (committed, new_tasks) = board_fixture();
        let board = TaskBoard::new(Pose2d::default(), &committed, &new_tasks);

        assert_eq!(
            board.committed_refs(),
            vec![TaskRef::committed(0), TaskRef::committed(1)]
        );
        assert_eq!(board.new_refs(), vec![TaskRef::new_task(0)]);
        assert_eq!(board.num_committed(), 2);
        assert_eq!(board.num_new(), 1);
    }

    #[test]
    fn test_resolve_maps_refs_to_payloads() {
        let (committed, new_tasks) = board_fixture();
        let board = TaskBoard::new(Pose2d::default(), &committed, &new_tasks);

        assert_eq!(*board.resolve(TaskRef::committed(1)).metadata(), "c1");
        assert_eq!(*board.resolve(TaskRef::new_task(0)).metadata(), "n0");

        let ordering = [
            TaskRef::committed(0),
            TaskRef::new_task(0),
            TaskRef::committed(1),
        ];
        let labels: Vec<_> = board.resolve_all(&ordering).map(|t| *t.metadata()).collect();
        assert_eq!(labels, vec!["c0", "n0", "c1"]);
    }

    #[test]
    fn test_get_rejects_foreign_refs() {
        let (committed, new_tasks) = board_fixture();
        let board = TaskBoard::new(Pose2d::default(), &committed, &new_tasks);

        assert!(board.get(TaskRef::committed(2)).is_none());
        assert!(board.get(TaskRef::new_task(1)).is_none());
        assert!(board.get(TaskRef::new_task(0)).is_some());
    }
}
