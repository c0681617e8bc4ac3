//! HTTP Range header module
//!
//! Resolves single `bytes=` ranges against a known file size (RFC 7233).
//! Multi-range requests and non-byte units are ignored rather than
//! rejected, falling back to a full response.

/// A fully resolved byte range, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    /// Number of bytes the range covers
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start + 1
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false // start <= end is guaranteed by construction
    }
}

/// Outcome of resolving a Range header against a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOutcome {
    /// No Range header, malformed syntax, or unsupported form: serve the
    /// whole file with 200
    Full,
    /// Serve the given slice with 206
    Partial(ByteRange),
    /// Range cannot be satisfied for this file: respond 416
    Unsatisfiable,
}

/// Resolve a Range header value against a file of `len` bytes.
///
/// Supported forms:
/// - `bytes=start-end`
/// - `bytes=start-` (to end of file)
/// - `bytes=-suffix` (last `suffix` bytes)
///
/// # Examples
/// ```
/// use freshd::http::range::{resolve_range, ByteRange, RangeOutcome};
///
/// assert_eq!(
///     resolve_range(Some("bytes=0-99"), 1000),
///     RangeOutcome::Partial(ByteRange { start: 0, end: 99 })
/// );
/// assert_eq!(resolve_range(None, 1000), RangeOutcome::Full);
/// ```
pub fn resolve_range(header: Option<&str>, len: usize) -> RangeOutcome {
    let Some(spec) = header.and_then(|h| h.strip_prefix("bytes=")) else {
        return RangeOutcome::Full;
    };

    // Single range only; multi-range would need a multipart body
    if spec.contains(',') {
        return RangeOutcome::Full;
    }

    let Some((start_str, end_str)) = spec.split_once('-') else {
        return RangeOutcome::Full;
    };
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    if start_str.is_empty() {
        return resolve_suffix(end_str, len);
    }

    let Ok(start) = start_str.parse::<usize>() else {
        return RangeOutcome::Full;
    };
    if start >= len {
        return RangeOutcome::Unsatisfiable;
    }

    let end = if end_str.is_empty() {
        len - 1
    } else {
        let Ok(end) = end_str.parse::<usize>() else {
            return RangeOutcome::Full;
        };
        if end < start {
            return RangeOutcome::Unsatisfiable;
        }
        end.min(len - 1)
    };

    RangeOutcome::Partial(ByteRange { start, end })
}

/// Resolve a suffix form (`bytes=-N`): the last N bytes of the file
fn resolve_suffix(suffix_str: &str, len: usize) -> RangeOutcome {
    let Ok(suffix) = suffix_str.parse::<usize>() else {
        return RangeOutcome::Full;
    };
    if suffix == 0 || len == 0 {
        return RangeOutcome::Unsatisfiable;
    }
    RangeOutcome::Partial(ByteRange {
        start: len.saturating_sub(suffix),
        end: len - 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_header() {
        assert_eq!(resolve_range(None, 100), RangeOutcome::Full);
    }

    #[test]
    fn test_bounded_range() {
        let outcome = resolve_range(Some("bytes=10-19"), 100);
        assert_eq!(
            outcome,
            RangeOutcome::Partial(ByteRange { start: 10, end: 19 })
        );
        if let RangeOutcome::Partial(r) = outcome {
            assert_eq!(r.len(), 10);
        }
    }

    #[test]
    fn test_open_ended_range() {
        assert_eq!(
            resolve_range(Some("bytes=50-"), 100),
            RangeOutcome::Partial(ByteRange { start: 50, end: 99 })
        );
    }

    #[test]
    fn test_end_clamped_to_file() {
        assert_eq!(
            resolve_range(Some("bytes=90-500"), 100),
            RangeOutcome::Partial(ByteRange { start: 90, end: 99 })
        );
    }

    #[test]
    fn test_suffix_range() {
        assert_eq!(
            resolve_range(Some("bytes=-25"), 100),
            RangeOutcome::Partial(ByteRange { start: 75, end: 99 })
        );
        // Suffix longer than the file covers the whole file
        assert_eq!(
            resolve_range(Some("bytes=-500"), 100),
            RangeOutcome::Partial(ByteRange { start: 0, end: 99 })
        );
    }

    #[test]
    fn test_unsatisfiable() {
        assert_eq!(
            resolve_range(Some("bytes=100-"), 100),
            RangeOutcome::Unsatisfiable
        );
        assert_eq!(
            resolve_range(Some("bytes=30-20"), 100),
            RangeOutcome::Unsatisfiable
        );
        assert_eq!(
            resolve_range(Some("bytes=-0"), 100),
            RangeOutcome::Unsatisfiable
        );
        assert_eq!(
            resolve_range(Some("bytes=-5"), 0),
            RangeOutcome::Unsatisfiable
        );
    }

    #[test]
    fn test_ignored_forms_fall_back_to_full() {
        // Non-byte unit
        assert_eq!(resolve_range(Some("items=0-5"), 100), RangeOutcome::Full);
        // Multi-range
        assert_eq!(
            resolve_range(Some("bytes=0-9,20-29"), 100),
            RangeOutcome::Full
        );
        // Garbage
        assert_eq!(resolve_range(Some("bytes=a-b"), 100), RangeOutcome::Full);
        assert_eq!(resolve_range(Some("bytes=--"), 100), RangeOutcome::Full);
    }
}
