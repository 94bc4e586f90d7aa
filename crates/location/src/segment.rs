//! Fragment splitting and per-segment escaping.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::borrow::Cow;

/// Separators recognised inside a fragment, regardless of host platform.
///
/// Work directories scanned on Windows arrive with `\`, everything else with
/// `/`; both must produce the same segments.
pub const SEPARATORS: [char; 2] = ['/', '\\'];

/// Bytes escaped when a segment is placed into a URL.
///
/// Everything except ASCII alphanumerics and the URI "mark" characters
/// `- _ . ! ~ * ' ( )`, which is the component escape (not the query escape:
/// space becomes `%20`, never `+`).
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Splits a fragment into its atomic segments.
///
/// Leading, trailing and repeated separators produce nothing, so an empty
/// fragment yields no segments at all.
///
/// ```
/// use kikoeru_location::segments;
/// let parts = segments("second\\RJ290139//mp3/").collect::<Vec<_>>();
/// assert_eq!(parts, ["second", "RJ290139", "mp3"]);
/// assert_eq!(segments("").count(), 0);
/// ```
pub fn segments(fragment: &str) -> impl Iterator<Item = &str> {
    fragment.split(SEPARATORS).filter(|segment| !segment.is_empty())
}

/// Percent-encodes a single segment as UTF-8.
///
/// ```
/// use kikoeru_location::encode_segment;
/// assert_eq!(encode_segment("t4 おやすみ.mp3"), "t4%20%E3%81%8A%E3%82%84%E3%81%99%E3%81%BF.mp3");
/// assert_eq!(encode_segment("ok?.mp3"), "ok%3F.mp3");
/// ```
pub fn encode_segment(segment: &str) -> Cow<'_, str> {
    utf8_percent_encode(segment, SEGMENT).into()
}
