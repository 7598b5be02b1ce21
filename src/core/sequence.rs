/// Value stored after the last base of every sequence
pub const SENTINEL: u8 = 0;

/// Helper function to convert usize count to f64 with explicit precision loss allowance
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Uppercase bases of a single chromosome.
///
/// The buffer is allocated at exactly `len + 1` bytes: the bases followed by a
/// [`SENTINEL`] terminator. It is never modified after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChromosomeSequence {
    bases: Box<[u8]>,
}

impl ChromosomeSequence {
    /// Copy `bases` into a new right-sized, sentinel-terminated buffer.
    ///
    /// The bases are stored as given; case folding is the loader's job.
    #[must_use]
    pub fn from_bases(bases: &[u8]) -> Self {
        let mut buf = Vec::with_capacity(bases.len() + 1);
        buf.extend_from_slice(bases);
        buf.push(SENTINEL);
        Self {
            bases: buf.into_boxed_slice(),
        }
    }

    /// Number of bases, excluding the sentinel
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bases.len() - 1
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The bases without the sentinel
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bases[..self.len()]
    }

    /// The full buffer including the trailing sentinel
    #[inline]
    #[must_use]
    pub fn as_bytes_with_sentinel(&self) -> &[u8] {
        &self.bases
    }

    /// Base at a 0-based position
    #[inline]
    #[must_use]
    pub fn base_at(&self, pos: usize) -> Option<u8> {
        self.as_bytes().get(pos).copied()
    }

    /// Half-open slice `[start, end)`, or `None` if the range is empty-reversed
    /// or extends past the end of the chromosome
    #[must_use]
    pub fn subsequence(&self, start: usize, end: usize) -> Option<&[u8]> {
        if start > end {
            return None;
        }
        self.as_bytes().get(start..end)
    }

    /// Fraction of G/C among unambiguous (A/C/G/T) bases. Returns 0.0 when
    /// the sequence has no unambiguous bases.
    #[must_use]
    pub fn gc_fraction(&self) -> f64 {
        let mut gc = 0usize;
        let mut acgt = 0usize;
        for base in self.as_bytes() {
            match base {
                b'G' | b'C' => {
                    gc += 1;
                    acgt += 1;
                }
                b'A' | b'T' => acgt += 1,
                _ => {}
            }
        }
        if acgt == 0 {
            0.0
        } else {
            count_to_f64(gc) / count_to_f64(acgt)
        }
    }

    /// Lowercase hex MD5 of the stored bases.
    ///
    /// Bases are stored uppercase, so this matches the `M5` convention used in
    /// SAM headers and sequence dictionaries.
    #[must_use]
    pub fn md5(&self) -> String {
        format!("{:x}", md5::compute(self.as_bytes()))
    }
}

impl AsRef<[u8]> for ChromosomeSequence {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
