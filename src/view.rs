//! Terminal rendering of highlighted buffers

use crate::markup::RangeMarker;

/// SGR reset sequence
pub const RESET: &str = "\x1b[0m";

/// Render `text` with every marker's foreground as ANSI truecolor
///
/// `markers` must be sorted by start offset. Markers that overlap an earlier
/// one or do not fall on char boundaries are skipped.
pub fn render_ansi(text: &str, markers: &[RangeMarker]) -> String {
    let mut out = String::with_capacity(text.len() + markers.len() * 24);
    let mut pos = 0;

    for marker in markers {
        let (start, end) = (marker.start, marker.end);
        if start < pos
            || end > text.len()
            || !text.is_char_boundary(start)
            || !text.is_char_boundary(end)
        {
            continue;
        }
        out.push_str(&text[pos..start]);
        out.push_str(&marker.attributes.foreground.ansi_fg());
        out.push_str(&text[start..end]);
        out.push_str(RESET);
        pos = end;
    }

    out.push_str(&text[pos..]);
    out
}
