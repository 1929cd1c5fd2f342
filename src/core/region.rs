//! Genomic region algebra
//!
//! A [`Region`] is a chromosome interval in 1-based, closed coordinates
//! `[start, end]`. Regions are plain values: the only in-place mutators are
//! [`Region::pad`], [`Region::translate`] and [`Region::extend`], and each has
//! a pure counterpart where one is useful.
//!
//! No `start <= end` invariant is enforced. Padding with a negative amount can
//! invert a region; every operation treats an inverted region as empty instead
//! of failing.

use crate::core::error::RegionParseError;
use std::cmp::{max, min};
use std::fmt;
use std::str::FromStr;

/// Chromosome interval, 1-based and inclusive on both ends
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Region {
    /// Chromosome (sequence) name
    pub chrom: String,
    /// First base (1-based, inclusive)
    pub start: i64,
    /// Last base (1-based, inclusive)
    pub end: i64,
}

impl Region {
    /// Create a new region
    pub fn new(chrom: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            end,
        }
    }

    /// Number of bases covered (`end - start + 1`), 0 for inverted regions
    ///
    /// Saturates at `u64::MAX` for a region spanning all of `i64`.
    ///
    /// # Examples
    /// ```
    /// use mini_chrom::core::Region;
    ///
    /// assert_eq!(Region::new("chr1", 10, 20).len(), 11);
    /// assert_eq!(Region::new("chr1", 5, 5).len(), 1);
    /// assert_eq!(Region::new("chr1", 20, 10).len(), 0);
    /// ```
    pub fn len(&self) -> u64 {
        if self.end < self.start {
            0
        } else {
            u64::try_from(self.end as i128 - self.start as i128 + 1).unwrap_or(u64::MAX)
        }
    }

    /// Check whether the region covers no bases
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Closed-interval overlap test
    ///
    /// Regions on different chromosomes never overlap.
    ///
    /// # Examples
    /// ```
    /// use mini_chrom::core::Region;
    ///
    /// let a = Region::new("chr1", 10, 20);
    /// assert!(a.overlaps(&Region::new("chr1", 20, 30)));
    /// assert!(!a.overlaps(&Region::new("chr1", 21, 30)));
    /// assert!(!a.overlaps(&Region::new("chr2", 10, 20)));
    /// ```
    pub fn overlaps(&self, other: &Region) -> bool {
        self.chrom == other.chrom && self.start <= other.end && self.end >= other.start
    }

    /// Shared part of two regions, `None` unless they overlap
    pub fn intersection(&self, other: &Region) -> Option<Region> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Region::new(
            self.chrom.clone(),
            max(self.start, other.start),
            min(self.end, other.end),
        ))
    }

    /// Grow this region to cover `other` as well
    ///
    /// Does nothing when the chromosomes differ.
    ///
    /// # Examples
    /// ```
    /// use mini_chrom::core::Region;
    ///
    /// let mut r = Region::new("chr1", 10, 20);
    /// r.extend(&Region::new("chr1", 15, 25));
    /// assert_eq!(r, Region::new("chr1", 10, 25));
    ///
    /// r.extend(&Region::new("chr2", 1, 100));
    /// assert_eq!(r, Region::new("chr1", 10, 25));
    /// ```
    pub fn extend(&mut self, other: &Region) {
        if self.chrom != other.chrom {
            return;
        }
        self.start = min(self.start, other.start);
        self.end = max(self.end, other.end);
    }

    /// Widen both ends by `n` bases (shrink when `n` is negative)
    ///
    /// No clamping: the result may start below 1 or be inverted. Bounds
    /// saturate at the limits of `i64`.
    pub fn pad(&mut self, n: i64) {
        self.start = self.start.saturating_sub(n);
        self.end = self.end.saturating_add(n);
    }

    /// Shift both ends by `n` bases, saturating at the limits of `i64`
    pub fn translate(&mut self, n: i64) {
        self.start = self.start.saturating_add(n);
        self.end = self.end.saturating_add(n);
    }

    /// Padded copy of this region
    pub fn padded(&self, n: i64) -> Region {
        let mut region = self.clone();
        region.pad(n);
        region
    }

    /// Translated copy of this region
    pub fn translated(&self, n: i64) -> Region {
        let mut region = self.clone();
        region.translate(n);
        region
    }

    /// Slice of `seq` covered by this region in `seq`'s local frame
    ///
    /// The region must already be translated so that 0 is the first
    /// character of `seq`. Bounds partially outside `[0, seq.len())` are
    /// truncated; a region entirely outside (or inverted) yields `""`.
    ///
    /// # Examples
    /// ```
    /// use mini_chrom::core::Region;
    ///
    /// let line = "ACGTACGTAC";
    /// assert_eq!(Region::new("chr1", 2, 4).mask_str(line), "GTA");
    /// assert_eq!(Region::new("chr1", -3, 1).mask_str(line), "AC");
    /// assert_eq!(Region::new("chr1", 8, 20).mask_str(line), "AC");
    /// assert_eq!(Region::new("chr1", 10, 20).mask_str(line), "");
    /// ```
    pub fn mask_str<'a>(&self, seq: &'a str) -> &'a str {
        let len = seq.len() as i64;
        if self.end < 0 || self.start >= len || self.start > self.end {
            return "";
        }
        let lo = max(self.start, 0) as usize;
        let hi = min(self.end.saturating_add(1), len) as usize;
        seq.get(lo..hi).unwrap_or("")
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.end)
    }
}

impl FromStr for Region {
    type Err = RegionParseError;

    /// Parse `chrom:start-end`
    ///
    /// The chromosome is everything before the last `:`; start and end are
    /// unsigned decimal integers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RegionParseError::InvalidFormat(s.to_string());

        let (chrom, range) = s.rsplit_once(':').ok_or_else(invalid)?;
        if chrom.is_empty() || chrom.chars().any(char::is_whitespace) {
            return Err(invalid());
        }
        let (start, end) = range.split_once('-').ok_or_else(invalid)?;
        let parse_pos = |value: &str| -> Result<i64, RegionParseError> {
            if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            value.parse::<i64>().map_err(|_| invalid())
        };

        Ok(Region::new(chrom, parse_pos(start)?, parse_pos(end)?))
    }
}
