//! String splitting utilities used as building blocks for column bisection.
//! Positions are counted in characters, not bytes.

/// Splits a string at character position `position`, returning the two halves.
/// A negative position counts from the end of the string; positions beyond
/// either end clamp to the nearest boundary.
pub fn split_at(position: isize, value: &str) -> (String, String) {
    let length = value.chars().count();
    let split = if position < 0 {
        length.saturating_sub(position.unsigned_abs())
    } else {
        (position as usize).min(length)
    };
    let index = value
        .char_indices()
        .nth(split)
        .map(|(index, _)| index)
        .unwrap_or(value.len());
    (value[..index].to_owned(), value[index..].to_owned())
}

/// Splits off the first character of a string.
/// Equivalent to `split_at(1, value)`.
#[inline]
pub fn head_tail(value: &str) -> (String, String) {
    split_at(1, value)
}
