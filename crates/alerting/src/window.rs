//! Trailing time window of latched posture samples

use std::collections::VecDeque;

use posture::PostureState;
use serde::{Deserialize, Serialize};

/// One latched posture state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostureSample {
    /// Session clock when the sample was taken (milliseconds)
    pub timestamp_ms: u64,
    pub state: PostureState,
    /// Seconds this sample stands for
    pub duration_sec: u32,
}

/// Cumulative seconds per state across the window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowTotals {
    pub good_secs: u32,
    pub bad_secs: u32,
}

impl WindowTotals {
    /// Bad strictly outweighs good; ties go to good
    pub fn bad_majority(&self) -> bool {
        self.bad_secs > self.good_secs
    }
}

/// Time-ordered samples, appended at the tail and trimmed at the head
#[derive(Debug, Clone)]
pub struct SampleWindow {
    samples: VecDeque<PostureSample>,
    window_ms: u64,
}

impl SampleWindow {
    pub fn new(window_ms: u64) -> Self {
        Self {
            samples: VecDeque::new(),
            window_ms,
        }
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Append a sample. Callers push in timestamp order.
    pub fn push(&mut self, sample: PostureSample) {
        self.samples.push_back(sample);
    }

    /// Drop samples older than `now_ms - window_ms`
    pub fn evict(&mut self, now_ms: u64) {
        let cutoff = now_ms.saturating_sub(self.window_ms);
        while self
            .samples
            .front()
            .is_some_and(|s| s.timestamp_ms < cutoff)
        {
            self.samples.pop_front();
        }
    }

    pub fn totals(&self) -> WindowTotals {
        self.samples
            .iter()
            .fold(WindowTotals::default(), |mut acc, s| {
                match s.state {
                    PostureState::Good => acc.good_secs += s.duration_sec,
                    PostureState::Bad => acc.bad_secs += s.duration_sec,
                }
                acc
            })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn oldest(&self) -> Option<&PostureSample> {
        self.samples.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PostureSample> {
        self.samples.iter()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample(secs: u64, state: PostureState) -> PostureSample {
        PostureSample {
            timestamp_ms: secs * 1000,
            state,
            duration_sec: 1,
        }
    }

    #[test]
    fn test_eviction_keeps_trailing_window() {
        let mut window = SampleWindow::new(30_000);
        for t in 0..=40 {
            window.push(sample(t, PostureState::Good));
            window.evict(t * 1000);
        }

        assert!(window.iter().all(|s| s.timestamp_ms >= 10_000));
        assert_eq!(window.oldest().unwrap().timestamp_ms, 10_000);
        assert_eq!(window.len(), 31);
    }

    #[test]
    fn test_evict_before_window_fills() {
        let mut window = SampleWindow::new(30_000);
        window.push(sample(1, PostureState::Bad));
        window.evict(5_000);
        assert_eq!(window.len(), 1);
    }

    #[test]
    fn test_totals() {
        let mut window = SampleWindow::new(30_000);
        window.push(sample(0, PostureState::Good));
        window.push(sample(1, PostureState::Bad));
        window.push(sample(2, PostureState::Bad));

        let totals = window.totals();
        assert_eq!(totals, WindowTotals { good_secs: 1, bad_secs: 2 });
        assert!(totals.bad_majority());
    }

    proptest! {
        #[test]
        fn prop_window_is_self_bounding(
            steps in proptest::collection::vec((1u64..5_000, any::<bool>()), 1..200),
        ) {
            let mut window = SampleWindow::new(30_000);
            let mut now = 0u64;
            for (gap, bad) in steps {
                now += gap;
                let state = if bad { PostureState::Bad } else { PostureState::Good };
                window.push(PostureSample { timestamp_ms: now, state, duration_sec: 1 });
                window.evict(now);

                prop_assert!(window.iter().all(|s| s.timestamp_ms + 30_000 >= now));
                let ts: Vec<u64> = window.iter().map(|s| s.timestamp_ms).collect();
                prop_assert!(ts.windows(2).all(|w| w[0] <= w[1]));
                let totals = window.totals();
                prop_assert_eq!((totals.good_secs + totals.bad_secs) as usize, window.len());
            }
        }
    }

    #[test]
    fn test_tie_is_not_bad_majority() {
        let totals = WindowTotals {
            good_secs: 15,
            bad_secs: 15,
        };
        assert!(!totals.bad_majority());
    }
}
