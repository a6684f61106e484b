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


/// Counters collected while searching for bundles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Orderings decoded from the enumeration, including the ones that failed evaluation.
    pub orderings_enumerated: u64,
    /// Orderings the evaluator priced successfully.
    pub bundles_evaluated: u64,
    /// Orderings dropped because evaluation failed or returned an unusable cost.
    pub evaluations_failed: u64,
    /// Bundles discarded because an identical ordering was already kept.
    pub duplicates_discarded: u64,
    /// Number of worker threads used.
    pub used_threads: usize,
    /// Wall-clock duration of the search.
    pub duration: std::time::Duration,
}

impl SearchStatistics {
    /// Combines the counters of two workers. Threads add up; the duration is the longer one.
    pub fn combine(&self, other: &SearchStatistics) -> SearchStatistics {
        SearchStatistics {
            orderings_enumerated: self.orderings_enumerated + other.orderings_enumerated,
            bundles_evaluated: self.bundles_evaluated + other.bundles_evaluated,
            evaluations_failed: self.evaluations_failed + other.evaluations_failed,
            duplicates_discarded: self.duplicates_discarded + other.duplicates_discarded,
            used_threads: self.used_threads + other.used_threads,
            duration: self.duration.max(other.duration),
        }
    }
}

impl Default for SearchStatistics {
    fn default() -> Self {
        SearchStatisticsBuilder::new().build()
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Search Statistics:")?;
        writeln!(f, "  Orderings Enumerated: {}", self.orderings_enumerated)?;
        writeln!(f, "  Bundles Evaluated: {}", self.bundles_evaluated)?;
        writeln!(f, "  Evaluations Failed: {}", self.evaluations_failed)?;
        writeln!(f, "  Duplicates Discarded: {}", self.duplicates_discarded)?;
        writeln!(f, "  Used Threads: {}", self.used_threads)?;
        writeln!(f, "  Duration (secs): {:.3}", self.duration.as_secs_f64())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchStatisticsBuilder {
    orderings_enumerated: u64,
    bundles_evaluated: u64,
    evaluations_failed: u64,
    duplicates_discarded: u64,
    used_threads: usize,
    duration: std::time::Duration,
}

impl Default for SearchStatisticsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchStatisticsBuilder {
    #[inline]
    pub fn new() -> Self {
        Self {
            orderings_enumerated: 0,
            bundles_evaluated: 0,
            evaluations_failed: 0,
            duplicates_discarded: 0,
            used_threads: 1,
            duration: std::time::Duration::ZERO,
        }
    }

    #[inline]
    pub fn orderings_enumerated(mut self, orderings_enumerated: u64) -> Self {
        self.orderings_enumerated = orderings_enumerated;
        self
    }

    #[inline]
    pub fn bundles_evaluated(mut self, bundles_evaluated: u64) -> Self {
        self.bundles_evaluated = bundles_evaluated;
        self
    }

    #[inline]
    pub fn evaluations_failed(mut self, evaluations_failed: u64) -> Self {
        self.evaluations_failed = evaluations_failed;
        self
    }

    #[inline]
    pub fn duplicates_discarded(mut self, duplicates_discarded: u64) -> Self {
        self.duplicates_discarded = duplicates_discarded;
        self
    }

    #[inline]
    pub fn used_threads(mut self, used_threads: usize) -> Self {
        self.used_threads = used_threads;
        self
    }

    #[inline]
    pub fn duration(mut self, duration: std::time::Duration) -> Self {
        self.duration = duration;
        self
    }

    #[inline]
    pub fn build(self) -> SearchStatistics {
        SearchStatistics {
            orderings_enumerated: self.orderings_enumerated,
            bundles_evaluated: self.bundles_evaluated,
            evaluations_failed: self.evaluations_failed,
            duplicates_discarded: self.duplicates_discarded,
            used_threads: self.used_threads,
            duration: self.duration,
        }
    }
}
