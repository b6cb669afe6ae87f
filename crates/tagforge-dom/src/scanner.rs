//! Lightweight start-tag scanner.
//!
//! The render core only needs the flat list of elements and their
//! attributes from committed markup - it never walks a tree. This scanner
//! extracts start tags with their attribute lists and ignores everything
//! else (text, closing tags, comments). It is deliberately lenient:
//! malformed markup yields fewer elements, never an error.

pub(crate) struct ScannedTag {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
}

fn is_tag_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-'
}

fn is_name_end(b: u8) -> bool {
    b == b'=' || b == b'>' || b == b'/' || b.is_ascii_whitespace()
}

/// Scans markup for start tags, returning those carrying attributes.
pub(crate) fn scan(markup: &str) -> Vec<ScannedTag> {
    let bytes = markup.as_bytes();
    let len = bytes.len();
    let mut out = Vec::new();
    let mut i = 0;

    while i < len {
        if bytes[i] != b'<' {
            i += 1;
            continue;
        }
        i += 1;
        if i >= len {
            break;
        }
        // Closing tags, comments and doctypes carry nothing we need.
        if bytes[i] == b'/' || bytes[i] == b'!' {
            while i < len && bytes[i] != b'>' {
                i += 1;
            }
            continue;
        }
        if !bytes[i].is_ascii_alphabetic() {
            continue;
        }

        let tag_start = i;
        while i < len && is_tag_char(bytes[i]) {
            i += 1;
        }
        let tag = markup[tag_start..i].to_string();

        let mut attributes = Vec::new();
        loop {
            while i < len && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
                i += 1;
            }
            if i >= len {
                break;
            }
            if bytes[i] == b'>' {
                i += 1;
                break;
            }

            let name_start = i;
            while i < len && !is_name_end(bytes[i]) {
                i += 1;
            }
            let name = markup[name_start..i].to_string();

            while i < len && bytes[i].is_ascii_whitespace() {
                i += 1;
            }

            let value = if i < len && bytes[i] == b'=' {
                i += 1;
                while i < len && bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                if i < len && (bytes[i] == b'"' || bytes[i] == b'\'') {
                    let quote = bytes[i];
                    i += 1;
                    let value_start = i;
                    while i < len && bytes[i] != quote {
                        i += 1;
                    }
                    let value = markup[value_start..i].to_string();
                    if i < len {
                        i += 1;
                    }
                    value
                } else {
                    let value_start = i;
                    while i < len && bytes[i] != b'>' && !bytes[i].is_ascii_whitespace() {
                        i += 1;
                    }
                    markup[value_start..i].to_string()
                }
            } else {
                // Bare attribute: presence with an empty value.
                String::new()
            };

            if !name.is_empty() {
                attributes.push((name, value));
            }
        }

        if !attributes.is_empty() {
            out.push(ScannedTag { tag, attributes });
        }
    }

    out
}
