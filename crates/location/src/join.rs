use tracing::instrument;

use crate::location::Location;
use crate::segment::{SEPARATORS, encode_segment, segments};

/// Appends path fragments to a base [`Location`].
///
/// Every fragment is split on both `/` and `\`, empty pieces are dropped, and
/// the remaining segments are appended in order with a single `/` between
/// each component. The base's own trailing separators are ignored, so
/// `/media/stream` and `/media/stream/` give the same result.
///
/// For [`Location::Url`] each appended segment is percent-encoded on its own
/// (see [`encode_segment`](crate::encode_segment)); the base is left as
/// configured. For [`Location::FsPath`] segments are appended verbatim, always
/// separated by `/`.
///
/// ```
/// use kikoeru_location::{Location, join};
/// let local: Location = "/media/stream/".parse().unwrap();
/// assert_eq!(
///     join(&local, ["VoiceWork", "RJ157474", "", "t4 おやすみ.mp3"]),
///     "/media/stream/VoiceWork/RJ157474/t4 おやすみ.mp3",
/// );
/// let cdn: Location = "https://cdn.example.com/media/stream".parse().unwrap();
/// assert_eq!(
///     join(&cdn, ["VoiceWork", "RJ157474", "", "t4 おやすみ.mp3"]),
///     "https://cdn.example.com/media/stream/VoiceWork/RJ157474/t4%20%E3%81%8A%E3%82%84%E3%81%99%E3%81%BF.mp3",
/// );
/// ```
#[instrument(level = "trace", skip_all, fields(base = %base))]
pub fn join<I, S>(base: &Location, fragments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = base.as_str().trim_end_matches(SEPARATORS).to_string();
    for fragment in fragments {
        for segment in segments(fragment.as_ref()) {
            joined.push('/');
            match base {
                Location::Url(_) => joined.push_str(&encode_segment(segment)),
                Location::FsPath(_) => joined.push_str(segment),
            }
        }
    }
    // A base made only of separators ("/", "//", "\\") trims to nothing; it is the root.
    if joined.is_empty() {
        joined.push('/');
    }
    joined
}
