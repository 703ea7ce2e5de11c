//! Comment and literal blanking for C-family source text.
//!
//! The sanitized mirror has the same byte length as the input and keeps every
//! newline at its original offset, so regex matches found in the mirror can
//! be mapped straight back to lines and offsets of the raw text. Every other
//! byte inside a comment or a string/char literal becomes a space.

use std::iter::Peekable;
use std::str::Chars;

/// Language-dependent lexical rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanitizeRules {
    /// Character that, immediately followed by `"` (or by `$"` for an
    /// interpolated form), opens a verbatim string literal in which `""` is
    /// the only escape (C# `@"..."`, `@$"..."`).
    pub verbatim_prefix: Option<char>,
}

impl SanitizeRules {
    /// Rules for C#: `@"..."` verbatim strings, interpolated either way round.
    pub const CSHARP: SanitizeRules = SanitizeRules {
        verbatim_prefix: Some('@'),
    };

    /// Rules for Java: no raw string form.
    pub const JAVA: SanitizeRules = SanitizeRules {
        verbatim_prefix: None,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Normal,
    LineComment,
    BlockComment,
    Str,
    VerbatimStr,
    Char,
}

/// Output buffer that blanks characters while keeping byte length.
struct Mirror {
    out: String,
}

impl Mirror {
    fn with_capacity(n: usize) -> Self {
        Self {
            out: String::with_capacity(n),
        }
    }

    fn keep(&mut self, ch: char) {
        self.out.push(ch);
    }

    /// Newlines survive blanking; everything else becomes one space per byte.
    fn blank(&mut self, ch: char) {
        if ch == '\n' {
            self.out.push('\n');
        } else {
            for _ in 0..ch.len_utf8() {
                self.out.push(' ');
            }
        }
    }
}

/// Blank comments and string/char literals out of `code`.
///
/// Total over all input: unterminated comments or literals simply blank the
/// rest of the text.
///
/// # Examples
/// ```
/// use meridian::ingest::sanitize::{sanitize, SanitizeRules};
///
/// let code = "int x = 1; // note\nstring s = \"a{b\";";
/// let clean = sanitize(code, SanitizeRules::CSHARP);
/// assert_eq!(clean.len(), code.len());
/// assert_eq!(clean, "int x = 1;        \nstring s =      ;");
/// ```
pub fn sanitize(code: &str, rules: SanitizeRules) -> String {
    let mut mirror = Mirror::with_capacity(code.len());
    let mut state = LexState::Normal;
    let mut chars = code.chars().peekable();

    while let Some(ch) = chars.next() {
        let next = chars.peek().copied();
        match state {
            LexState::LineComment => {
                if ch == '\n' {
                    state = LexState::Normal;
                }
                mirror.blank(ch);
            }
            LexState::BlockComment => {
                if ch == '*' && next == Some('/') {
                    chars.next();
                    mirror.blank('*');
                    mirror.blank('/');
                    state = LexState::Normal;
                } else {
                    mirror.blank(ch);
                }
            }
            LexState::VerbatimStr => {
                if ch == '"' && next == Some('"') {
                    chars.next();
                    mirror.blank('"');
                    mirror.blank('"');
                } else {
                    if ch == '"' {
                        state = LexState::Normal;
                    }
                    mirror.blank(ch);
                }
            }
            LexState::Str | LexState::Char => {
                let close = if state == LexState::Str { '"' } else { '\'' };
                match (ch, next) {
                    ('\\', Some(escaped)) => {
                        chars.next();
                        mirror.blank(ch);
                        mirror.blank(escaped);
                    }
                    _ => {
                        if ch == close {
                            state = LexState::Normal;
                        }
                        mirror.blank(ch);
                    }
                }
            }
            LexState::Normal => match (ch, next) {
                ('/', Some('/')) => {
                    chars.next();
                    mirror.blank('/');
                    mirror.blank('/');
                    state = LexState::LineComment;
                }
                ('/', Some('*')) => {
                    chars.next();
                    mirror.blank('/');
                    mirror.blank('*');
                    state = LexState::BlockComment;
                }
                (c, Some('"')) if Some(c) == rules.verbatim_prefix => {
                    chars.next();
                    mirror.blank(c);
                    mirror.blank('"');
                    state = LexState::VerbatimStr;
                }
                (c, Some('$')) if Some(c) == rules.verbatim_prefix && quote_after_next(&chars) => {
                    chars.next();
                    chars.next();
                    mirror.blank(c);
                    mirror.blank('$');
                    mirror.blank('"');
                    state = LexState::VerbatimStr;
                }
                ('"', _) => {
                    mirror.blank(ch);
                    state = LexState::Str;
                }
                ('\'', _) => {
                    mirror.blank(ch);
                    state = LexState::Char;
                }
                _ => mirror.keep(ch),
            },
        }
    }

    mirror.out
}

/// Whether the character after the peeked one is `"`.
fn quote_after_next(chars: &Peekable<Chars<'_>>) -> bool {
    let mut ahead = chars.clone();
    ahead.next();
    ahead.next() == Some('"')
}
