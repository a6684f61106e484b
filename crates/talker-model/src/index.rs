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


use talker_core::utils::index::{TypedIndex, TypedIndexTag};

/// A tag type for positions in the committed task list.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct CommittedIndexTag;

impl TypedIndexTag for CommittedIndexTag {
    const NAME: &'static str = "CommittedIndex";
}

/// A typed index into the committed task list.
pub type CommittedIndex = TypedIndex<CommittedIndexTag>;

/// A tag type for positions in the new task list.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NewTaskIndexTag;

impl TypedIndexTag for NewTaskIndexTag {
    const NAME: &'static str = "NewTaskIndex";
}

/// A typed index into the new task list.
pub type NewTaskIndex = TypedIndex<NewTaskIndexTag>;

/// The identity of a task within one request.
///
/// Enumerated orderings are sequences of `TaskRef`s. Whether an element
/// originated from the committed list or from the new tasks is therefore
/// known exactly, independent of the task payloads.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum TaskRef {
    Committed(CommittedIndex),
    New(NewTaskIndex),
}

impl TaskRef {
    #[inline(always)]
    pub const fn committed(index: usize) -> Self {
        TaskRef::Committed(CommittedIndex::new(index))
    }

    #[inline(always)]
    pub const fn new_task(index: usize) -> Self {
        TaskRef::New(NewTaskIndex::new(index))
    }

    #[inline(always)]
    pub const fn is_committed(&self) -> bool {
        matches!(self, TaskRef::Committed(_))
    }

    #[inline(always)]
    pub const fn is_new(&self) -> bool {
        matches!(self, TaskRef::New(_))
    }
}

impl std::fmt::Display for TaskRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskRef::Committed(index) => write!(f, "C{}", index.get()),
            TaskRef::New(index) => write!(f, "N{}", index.get()),
        }
    }
}
