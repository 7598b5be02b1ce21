use std::collections::HashSet;

/// Prefix every canonically named chromosome starts with
pub const CHROMOSOME_PREFIX: &str = "chr";

/// Rule deciding which FASTA records are kept in the reference index.
///
/// The filter is applied to the record identifier, i.e. the header line with
/// the leading `>` removed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChromosomeFilter {
    /// `chr` followed by one or two characters, the first of which is
    /// `X`, `Y`, or a digit `1`-`9`.
    ///
    /// This keeps `chr1`..`chr22`, `chrX` and `chrY` from a UCSC-style
    /// reference and drops `chrM`, unplaced/unlocalized scaffolds and ALT
    /// contigs. It is a character-level rule, so two-character tokens such as
    /// `chr1A` or `chrXY` are kept as well.
    #[default]
    Canonical,

    /// Keep only identifiers contained in the set (exact match)
    AllowList(HashSet<String>),

    /// Keep every record
    All,
}

impl ChromosomeFilter {
    /// Build an allow-list filter from any collection of names
    pub fn allow_list<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::AllowList(names.into_iter().map(Into::into).collect())
    }

    /// Check whether a record with this identifier should be kept
    #[must_use]
    pub fn accepts(&self, name: &str) -> bool {
        match self {
            Self::Canonical => is_canonical_chromosome(name),
            Self::AllowList(names) => names.contains(name),
            Self::All => true,
        }
    }
}

/// The canonical chromosome rule, see [`ChromosomeFilter::Canonical`].
#[must_use]
pub fn is_canonical_chromosome(name: &str) -> bool {
    let Some(suffix) = name.strip_prefix(CHROMOSOME_PREFIX) else {
        return false;
    };

    match suffix.as_bytes() {
        [first] | [first, _] => matches!(*first, b'X' | b'Y' | b'1'..=b'9'),
        _ => false,
    }
}
