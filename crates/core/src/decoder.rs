//! Decoding of raw terminal input into [`KeyEvent`]s.
//!
//! A single read from a raw-mode terminal may carry several keys (fast typing,
//! pastes) or one multi-byte escape sequence. [`decode`] splits such a chunk
//! into keys, consuming each recognizable sequence completely before moving on.
//! Sequences it cannot classify are reported as errors instead of being dropped.

use crate::error::{Error, Result};
use crate::key::{KeyCode, KeyEvent};

const ESC: u8 = 0x1b;

/// Decodes one chunk of raw input into key events, in order.
///
/// # Errors
///
/// Returns [`Error::UnrecognizedSequence`] for escape sequences that are
/// truncated or unknown, and [`Error::InvalidUtf8`] for bytes that do not form
/// a character.
///
/// # Examples
///
/// ```
/// use ekko_core::decoder::decode;
/// use ekko_core::key::KeyCode;
///
/// let keys = decode(b"a\x1b[B\r")?;
/// let codes: Vec<KeyCode> = keys.iter().map(|k| k.code).collect();
/// assert_eq!(codes, vec![KeyCode::Char('a'), KeyCode::Down, KeyCode::Enter]);
/// # Ok::<(), ekko_core::error::Error>(())
/// ```
pub fn decode(input: &[u8]) -> Result<Vec<KeyEvent>> {
    let (keys, held) = decode_partial(input)?;
    if held > 0 {
        return Err(Error::InvalidUtf8 {
            byte: input[input.len() - held],
        });
    }

    Ok(keys)
}

/// Like [`decode`], but a character cut off at the end of the chunk is not an
/// error. Returns the keys together with the number of trailing bytes that
/// start a character but do not complete it; the caller prepends them to the
/// next chunk.
///
/// # Errors
///
/// Same as [`decode`], except for the incomplete trailing character.
///
/// # Examples
///
/// ```
/// use ekko_core::decoder::decode_partial;
///
/// let bytes = "a日".as_bytes();
/// let (keys, held) = decode_partial(&bytes[..2])?;
/// assert_eq!(keys.len(), 1);
/// assert_eq!(held, 1);
/// # Ok::<(), ekko_core::error::Error>(())
/// ```
pub fn decode_partial(input: &[u8]) -> Result<(Vec<KeyEvent>, usize)> {
    let mut decoder = Decoder {
        bytes: input,
        pos: 0,
    };

    let mut keys = Vec::new();
    while decoder.pos < input.len() {
        if let Some(held) = decoder.incomplete_char() {
            return Ok((keys, held));
        }
        keys.push(decoder.next_key()?);
    }

    Ok((keys, 0))
}

struct Decoder<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Decoder<'_> {
    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn sequence(&self, start: usize) -> String {
        String::from_utf8_lossy(&self.bytes[start..self.pos]).into_owned()
    }

    /// Length of the rest of the chunk when it is the start of a character
    /// whose remaining bytes have not arrived yet.
    fn incomplete_char(&self) -> Option<usize> {
        let rest = &self.bytes[self.pos..];
        match rest.first() {
            Some(byte) if !byte.is_ascii() && rest.len() <= 3 => {}
            _ => return None,
        }

        match std::str::from_utf8(rest) {
            Err(e) if e.valid_up_to() == 0 && e.error_len().is_none() => Some(rest.len()),
            _ => None,
        }
    }

    fn next_key(&mut self) -> Result<KeyEvent> {
        if self.peek(0) == Some(ESC) {
            self.escape()
        } else {
            self.single()
        }
    }

    fn escape(&mut self) -> Result<KeyEvent> {
        let start = self.pos;

        match self.peek(1) {
            None => {
                self.pos += 1;
                Ok(KeyEvent::new(KeyCode::Escape, "\x1b"))
            }
            Some(b'[') => self.csi(start),
            Some(b'O') if self.peek(2).is_some() => self.ss3(start),
            Some(ESC) => {
                self.pos += 1;
                let mut key = self.escape()?.with_meta();
                key.sequence.insert(0, '\x1b');
                Ok(key)
            }
            Some(_) => {
                self.pos += 1;
                let mut key = self.single()?.with_meta();
                key.sequence.insert(0, '\x1b');
                Ok(key)
            }
        }
    }

    /// `ESC [ params final`, plus the linux console `ESC [ [ A..E` function keys.
    fn csi(&mut self, start: usize) -> Result<KeyEvent> {
        let mut i = start + 2;

        if self.bytes.get(i) == Some(&b'[') {
            let code = match self.bytes.get(i + 1) {
                Some(&letter @ b'A'..=b'E') => KeyCode::F(letter - b'A' + 1),
                _ => {
                    let end = (i + 2).min(self.bytes.len());
                    return Err(Error::unrecognized(&self.bytes[start..end]));
                }
            };
            self.pos = i + 2;
            return Ok(KeyEvent::new(code, self.sequence(start)));
        }

        while matches!(self.bytes.get(i), Some(0x30..=0x3f)) {
            i += 1;
        }
        let params_end = i;

        let final_byte = match self.bytes.get(i) {
            Some(&byte @ 0x40..=0x7e) => byte,
            Some(_) => return Err(Error::unrecognized(&self.bytes[start..=i])),
            None => return Err(Error::unrecognized(&self.bytes[start..])),
        };
        self.pos = i + 1;

        let params: Vec<Option<u32>> = std::str::from_utf8(&self.bytes[start + 2..params_end])
            .unwrap_or_default()
            .split(';')
            .map(|param| param.parse().ok())
            .collect();
        let first = params.first().copied().flatten();
        let modifier = params.get(1).copied().flatten();

        let code = match final_byte {
            b'A' => KeyCode::Up,
            b'B' => KeyCode::Down,
            b'C' => KeyCode::Right,
            b'D' => KeyCode::Left,
            b'H' => KeyCode::Home,
            b'F' => KeyCode::End,
            b'Z' => KeyCode::BackTab,
            b'P' => KeyCode::F(1),
            b'Q' => KeyCode::F(2),
            b'R' => KeyCode::F(3),
            b'S' => KeyCode::F(4),
            b'~' => match first {
                Some(1 | 7) => KeyCode::Home,
                Some(2) => KeyCode::Insert,
                Some(3) => KeyCode::Delete,
                Some(4 | 8) => KeyCode::End,
                Some(5) => KeyCode::PageUp,
                Some(6) => KeyCode::PageDown,
                Some(n @ 11..=15) => KeyCode::F((n - 10) as u8),
                Some(n @ 17..=21) => KeyCode::F((n - 11) as u8),
                Some(n @ 23..=24) => KeyCode::F((n - 12) as u8),
                _ => return Err(Error::unrecognized(&self.bytes[start..self.pos])),
            },
            _ => return Err(Error::unrecognized(&self.bytes[start..self.pos])),
        };

        let mut key = KeyEvent::new(code, self.sequence(start));
        if code == KeyCode::BackTab {
            key.shift = true;
        }
        if let Some(modifier) = modifier {
            apply_modifier(&mut key, modifier);
        }

        Ok(key)
    }

    /// `ESC O x`, sent by terminals in application cursor mode.
    fn ss3(&mut self, start: usize) -> Result<KeyEvent> {
        let code = match self.peek(2) {
            Some(b'A') => KeyCode::Up,
            Some(b'B') => KeyCode::Down,
            Some(b'C') => KeyCode::Right,
            Some(b'D') => KeyCode::Left,
            Some(b'H') => KeyCode::Home,
            Some(b'F') => KeyCode::End,
            Some(b'P') => KeyCode::F(1),
            Some(b'Q') => KeyCode::F(2),
            Some(b'R') => KeyCode::F(3),
            Some(b'S') => KeyCode::F(4),
            _ => return Err(Error::unrecognized(&self.bytes[start..start + 3])),
        };
        self.pos = start + 3;

        Ok(KeyEvent::new(code, self.sequence(start)))
    }

    /// A key that does not start with ESC: a control byte or one character.
    fn single(&mut self) -> Result<KeyEvent> {
        let start = self.pos;
        let Some(byte) = self.peek(0) else {
            return Err(Error::unrecognized(&self.bytes[start..]));
        };

        let (code, ctrl) = match byte {
            b'\r' | b'\n' => (KeyCode::Enter, false),
            b'\t' => (KeyCode::Tab, false),
            0x08 | 0x7f => (KeyCode::Backspace, false),
            ESC => (KeyCode::Escape, false),
            0x00 => (KeyCode::Char(' '), true),
            0x01..=0x1a => (KeyCode::Char(char::from(byte - 1 + b'a')), true),
            0x1c..=0x1f => (KeyCode::Char(char::from(byte - 0x1c + b'4')), true),
            0x20..=0x7e => (KeyCode::Char(char::from(byte)), false),
            _ => return self.utf8_char(),
        };
        self.pos += 1;

        let mut key = KeyEvent::new(code, self.sequence(start));
        key.ctrl = ctrl;
        key.shift = byte.is_ascii_uppercase();

        Ok(key)
    }

    fn utf8_char(&mut self) -> Result<KeyEvent> {
        let rest = &self.bytes[self.pos..];
        let valid = match std::str::from_utf8(rest) {
            Ok(text) => text,
            Err(e) => std::str::from_utf8(&rest[..e.valid_up_to()]).unwrap_or_default(),
        };

        let Some(c) = valid.chars().next() else {
            return Err(Error::InvalidUtf8 { byte: rest[0] });
        };
        self.pos += c.len_utf8();

        let mut key = KeyEvent::new(KeyCode::Char(c), c.to_string());
        key.shift = c.is_uppercase();

        Ok(key)
    }
}

/// xterm modifier parameter: `1 + (shift | alt << 1 | ctrl << 2 | meta << 3)`.
fn apply_modifier(key: &mut KeyEvent, modifier: u32) {
    let bits = modifier.saturating_sub(1);
    key.shift |= bits & 1 != 0;
    key.meta |= bits & 2 != 0 || bits & 8 != 0;
    key.ctrl |= bits & 4 != 0;
}
