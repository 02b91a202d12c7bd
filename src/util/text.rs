use std::borrow::Cow;

fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r')
}

fn is_stripped_control(c: char) -> bool {
    c.is_control() && c != '\t' && !is_line_break(c)
}

/// Makes a title safe to embed in a single `# <title>` comment line.
///
/// - Runs of line feeds and carriage returns collapse to one space, so a
///   title can never spill onto a line the feed reader would take as a URL.
///   Tabs are kept.
/// - ANSI escape sequences (CSI `ESC [ ... final` and OSC `ESC ] ... BEL|ST`)
///   are removed entirely.
/// - Every other control character (C0, DEL, C1) is dropped.
///
/// Returns `Cow::Borrowed` when the title is already clean.
///
/// # Examples
///
/// ```
/// use opml2feedlist::util::sanitize_title;
///
/// assert_eq!(sanitize_title("Plain Title"), "Plain Title");
/// assert_eq!(sanitize_title("Two\nLines"), "Two Lines");
/// assert_eq!(sanitize_title("\x1b[31mRed\x1b[0m"), "Red");
/// ```
pub fn sanitize_title(s: &str) -> Cow<'_, str> {
    if !s.chars().any(|c| c.is_control() && c != '\t') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    let mut in_break = false;

    while let Some(c) = chars.next() {
        if is_line_break(c) {
            if !in_break {
                out.push(' ');
                in_break = true;
            }
            continue;
        }
        in_break = false;

        if c == '\x1b' {
            match chars.peek() {
                Some('[') => {
                    chars.next();
                    // Parameter and intermediate bytes run until the final byte
                    for c in chars.by_ref() {
                        if ('\x40'..='\x7e').contains(&c) {
                            break;
                        }
                    }
                }
                Some(']') => {
                    chars.next();
                    while let Some(c) = chars.next() {
                        if c == '\x07' {
                            break;
                        }
                        if c == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
            continue;
        }

        if !is_stripped_control(c) {
            out.push(c);
        }
    }

    Cow::Owned(out)
}
