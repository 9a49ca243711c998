//! Load-factor policy for the bucket tables behind `HashSet` and `HashMap`.

use crate::error::ConfigError;

/// When and how far a bucket table resizes.
///
/// Fill is `size * 100 / buckets`. Going above `max_fill_percent`
/// multiplies the bucket count by `growth_percent / 100`; dropping below
/// `min_fill_percent` divides it by the same factor, never under
/// `min_buckets`. Every resize is a full rehash.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadPolicy {
    min_buckets: usize,
    min_fill_percent: u32,
    max_fill_percent: u32,
    growth_percent: u32,
}

impl LoadPolicy {
    pub const DEFAULT: LoadPolicy = LoadPolicy {
        min_buckets: 16,
        min_fill_percent: 20,
        max_fill_percent: 80,
        growth_percent: 200,
    };

    pub fn new(
        min_buckets: usize,
        min_fill_percent: u32,
        max_fill_percent: u32,
        growth_percent: u32,
    ) -> Result<Self, ConfigError> {
        if min_buckets == 0 {
            return Err(ConfigError::ZeroMinBuckets);
        }
        if min_fill_percent == 0 || min_fill_percent >= max_fill_percent {
            return Err(ConfigError::FillBounds {
                min: min_fill_percent,
                max: max_fill_percent,
            });
        }
        if growth_percent <= 100 {
            return Err(ConfigError::Growth(growth_percent));
        }
        // A shrink must land under the max fill or the table would flip back.
        if u64::from(min_fill_percent) * u64::from(growth_percent)
            >= u64::from(max_fill_percent) * 100
        {
            return Err(ConfigError::Oscillation);
        }
        let policy = Self {
            min_buckets,
            min_fill_percent,
            max_fill_percent,
            growth_percent,
        };
        log::debug!("custom load policy {:?}", policy);
        Ok(policy)
    }

    pub fn min_buckets(&self) -> usize {
        self.min_buckets
    }
    pub fn min_fill_percent(&self) -> u32 {
        self.min_fill_percent
    }
    pub fn max_fill_percent(&self) -> u32 {
        self.max_fill_percent
    }
    pub fn growth_percent(&self) -> u32 {
        self.growth_percent
    }

    /// Smallest bucket count (a multiple of growth steps from
    /// `min_buckets`) that holds `len` elements without exceeding the
    /// maximum fill.
    pub(crate) fn buckets_for(&self, len: usize) -> usize {
        let mut buckets = self.min_buckets;
        while self.over_max(len, buckets) {
            buckets = self.grow(buckets);
        }
        buckets
    }

    /// Bucket count the table should move to, or `None` to stay put.
    pub(crate) fn target(&self, len: usize, buckets: usize) -> Option<usize> {
        if self.over_max(len, buckets) {
            let mut next = self.grow(buckets);
            while self.over_max(len, next) {
                next = self.grow(next);
            }
            Some(next)
        } else if buckets > self.min_buckets && self.under_min(len, buckets) {
            let next = self.shrink(buckets).max(self.min_buckets);
            (next != buckets).then_some(next)
        } else {
            None
        }
    }

    fn over_max(&self, len: usize, buckets: usize) -> bool {
        (len as u128) * 100 > (buckets as u128) * u128::from(self.max_fill_percent)
    }

    fn under_min(&self, len: usize, buckets: usize) -> bool {
        (len as u128) * 100 < (buckets as u128) * u128::from(self.min_fill_percent)
    }

    fn grow(&self, buckets: usize) -> usize {
        let next = (buckets as u128) * u128::from(self.growth_percent) / 100;
        (next as usize).max(buckets + 1)
    }

    fn shrink(&self, buckets: usize) -> usize {
        ((buckets as u128) * 100 / u128::from(self.growth_percent)) as usize
    }
}

impl Default for LoadPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_parameters() {
        assert_eq!(LoadPolicy::new(0, 20, 80, 200), Err(ConfigError::ZeroMinBuckets));
        assert_eq!(
            LoadPolicy::new(8, 80, 20, 200),
            Err(ConfigError::FillBounds { min: 80, max: 20 })
        );
        assert_eq!(
            LoadPolicy::new(8, 0, 20, 200),
            Err(ConfigError::FillBounds { min: 0, max: 20 })
        );
        assert_eq!(LoadPolicy::new(8, 20, 80, 100), Err(ConfigError::Growth(100)));
        assert_eq!(LoadPolicy::new(8, 50, 80, 200), Err(ConfigError::Oscillation));
        assert!(LoadPolicy::new(4, 10, 90, 150).is_ok());
    }

    /// Invariant: growth triggers only above the max fill and reaches a
    /// bucket count under it in one step.
    #[test]
    fn grows_past_max_fill() {
        let p = LoadPolicy::DEFAULT;
        assert_eq!(p.target(12, 16), None);
        assert_eq!(p.target(13, 16), Some(32));
        assert_eq!(p.target(100, 16), Some(128));
    }

    /// Invariant: shrinking stops at `min_buckets` and never happens at the floor.
    #[test]
    fn shrinks_under_min_fill() {
        let p = LoadPolicy::DEFAULT;
        assert_eq!(p.target(0, 16), None);
        assert_eq!(p.target(5, 64), Some(32));
        assert_eq!(p.target(1, 32), Some(16));
        assert_eq!(p.target(10, 32), None);
    }

    #[test]
    fn presizing_respects_max_fill() {
        let p = LoadPolicy::DEFAULT;
        assert_eq!(p.buckets_for(0), 16);
        assert_eq!(p.buckets_for(12), 16);
        assert_eq!(p.buckets_for(13), 32);
        assert!(!p.over_max(1000, p.buckets_for(1000)));
    }
}
