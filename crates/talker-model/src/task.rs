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


use crate::pose::Pose2d;

/// A task: a target pose plus metadata the bundling pipeline never looks at.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Task<M = ()> {
    pose: Pose2d,
    metadata: M,
}

impl Task<()> {
    /// Creates a task without metadata.
    #[inline]
    pub fn at(x: f64, y: f64, theta: f64) -> Self {
        Self::new(Pose2d::new(x, y, theta), ())
    }
}

impl<M> Task<M> {
    #[inline]
    pub fn new(pose: Pose2d, metadata: M) -> Self {
        Self { pose, metadata }
    }

    #[inline]
    pub fn pose(&self) -> &Pose2d {
        &self.pose
    }

    #[inline]
    pub fn metadata(&self) -> &M {
        &self.metadata
    }

    #[inline]
    pub fn into_parts(self) -> (Pose2d, M) {
        (self.pose, self.metadata)
    }
}

impl<M> std::fmt::Display for Task<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task{}", self.pose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_carries_metadata_unchanged() {
        let task = Task::new(Pose2d::new(1.0, 2.0, 0.5), "pick-up #4".to_string());
        assert_eq!(task.metadata(), "pick-up #4");
        assert_eq!(task.pose().x, 1.0);

        let (pose, metadata) = task.into_parts();
        assert_eq!(pose, Pose2d::new(1.0, 2.0, 0.5));
        assert_eq!(metadata, "pick-up #4");
    }

    #[test]
    fn test_display_shows_target() {
        assert_eq!(Task::at(11.0, -8.0, 0.0).to_string(), "Task[11 -8 0]");
    }
}
