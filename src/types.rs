//! Shared primitive aliases and grid-square constants.

/// Amateur-radio station callsign as written in the log.
pub type Callsign = String;
/// Five-character grid-square area token, e.g. `F12TA`.
pub type AreaToken = String;
/// Two-character region key: the trailing characters of an [`AreaToken`].
pub type RegionKey = String;

/// Exact length of a valid area token.
pub const AREA_TOKEN_LEN: usize = 5;
/// Length of the region-key suffix of an area token.
pub const REGION_KEY_LEN: usize = 2;

/// Returns the region-key suffix of `token`, or `None` when it is shorter
/// than [`REGION_KEY_LEN`] characters.
pub fn region_key_of(token: &str) -> Option<&str> {
    let start = token
        .char_indices()
        .rev()
        .nth(REGION_KEY_LEN - 1)
        .map(|(idx, _)| idx)?;
    Some(&token[start..])
}
