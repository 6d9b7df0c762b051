//! Win distributions: every way to hand out a fixed number of event wins
//! across an ordered list of competitors.

/// Wins per competitor for one event type, in competitor order.
pub type WinDistribution = Vec<u32>;

/// Lazy generator over all win distributions of `event_count` wins among
/// `competitor_count` competitors.
///
/// Distributions come out in lexicographic order, from
/// `[0, .., 0, event_count]` up to `[event_count, 0, .., 0]`. The iterator
/// holds only the current distribution, so regenerating from scratch is a
/// matter of constructing a new one.
#[derive(Clone, Debug)]
pub struct WinDistributions {
    current: Option<WinDistribution>,
}

impl WinDistributions {
    pub fn new(event_count: u32, competitor_count: usize) -> Self {
        let current = if competitor_count == 0 {
            None
        } else {
            let mut first = vec![0; competitor_count];
            first[competitor_count - 1] = event_count;
            Some(first)
        };
        WinDistributions { current }
    }

    /// Advance `dist` to its lexicographic successor in place.
    /// Returns false when `dist` was the last distribution.
    fn advance(dist: &mut [u32]) -> bool {
        let last = dist.len() - 1;
        if last == 0 {
            return false;
        }

        // Bump the rightmost position whose tail still holds a win to give.
        let pivot = if dist[last] > 0 {
            last - 1
        } else {
            match dist[..last].iter().rposition(|&w| w > 0) {
                Some(0) | None => return false,
                Some(j) => j - 1,
            }
        };

        let tail: u32 = dist[pivot + 1..].iter().sum();
        dist[pivot] += 1;
        dist[pivot + 1..].fill(0);
        dist[last] = tail - 1;
        true
    }
}

impl Iterator for WinDistributions {
    type Item = WinDistribution;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.take()?;
        let mut successor = current.clone();
        if Self::advance(&mut successor) {
            self.current = Some(successor);
        }
        Some(current)
    }
}

/// Collect every win distribution for one event type.
pub fn win_distributions(event_count: u32, competitor_count: usize) -> Vec<WinDistribution> {
    WinDistributions::new(event_count, competitor_count).collect()
}

/// Number of win distributions, `C(event_count + n - 1, n - 1)`.
///
/// Saturates at `u128::MAX` instead of overflowing so callers can compare
/// against a ceiling before generating anything.
pub fn distribution_count(event_count: u32, competitor_count: usize) -> u128 {
    if competitor_count == 0 {
        return 0;
    }
    let n = event_count as u128 + competitor_count as u128 - 1;
    let k = (competitor_count as u128 - 1).min(event_count as u128);

    let mut result: u128 = 1;
    for i in 1..=k {
        // result * (n - k + i) is divisible by i at every step
        result = match result.checked_mul(n - k + i) {
            Some(v) => v / i,
            None => return u128::MAX,
        };
    }
    result
}
