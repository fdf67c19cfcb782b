//! Move scripts that stand in for a keyboard.
//!
//! Each character is one poll tick with a single key held: `w a s d` or the
//! arrows `↑ ← ↓ →`. A `.` is a tick with nothing held. Brackets hold several
//! keys on the same tick, so `[wd]` steps diagonally. Whitespace is skipped.

use pixel_adventure_rendering::HeldKeys;
use thiserror::Error;

/// Script text that does not describe a sequence of held keys.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ScriptError {
    #[error("unknown key {key:?} at offset {offset}")]
    UnknownKey { key: char, offset: usize },
    #[error("key group opened at offset {offset} is never closed")]
    UnclosedGroup { offset: usize },
    #[error("unexpected {symbol:?} at offset {offset}")]
    Unexpected { symbol: char, offset: usize },
}

/// Converts a script into the keys held on each poll tick.
pub(crate) fn parse_script(script: &str) -> Result<Vec<HeldKeys>, ScriptError> {
    let mut frames = Vec::new();
    let mut group: Option<(usize, HeldKeys)> = None;

    for (offset, symbol) in script.char_indices() {
        if symbol.is_whitespace() {
            continue;
        }
        match symbol {
            '[' if group.is_none() => group = Some((offset, HeldKeys::default())),
            ']' if group.is_some() => {
                if let Some((_, keys)) = group.take() {
                    frames.push(keys);
                }
            }
            '[' | ']' => return Err(ScriptError::Unexpected { symbol, offset }),
            '.' if group.is_none() => frames.push(HeldKeys::default()),
            '.' => return Err(ScriptError::Unexpected { symbol, offset }),
            key => match group.as_mut() {
                Some((_, keys)) => hold(keys, key, offset)?,
                None => {
                    let mut keys = HeldKeys::default();
                    hold(&mut keys, key, offset)?;
                    frames.push(keys);
                }
            },
        }
    }

    match group {
        Some((offset, _)) => Err(ScriptError::UnclosedGroup { offset }),
        None => Ok(frames),
    }
}

fn hold(keys: &mut HeldKeys, key: char, offset: usize) -> Result<(), ScriptError> {
    match key.to_ascii_lowercase() {
        'w' | '↑' => keys.up = true,
        's' | '↓' => keys.down = true,
        'a' | '←' => keys.left = true,
        'd' | '→' => keys.right = true,
        _ => return Err(ScriptError::UnknownKey { key, offset }),
    }
    Ok(())
}
