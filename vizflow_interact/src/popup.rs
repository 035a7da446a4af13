// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popup content.

use kurbo::Point;
use vizflow_core::MarkId;

/// The popup currently shown. There is at most one.
#[derive(Clone, Debug, PartialEq)]
pub struct Popup {
    /// Datum key of the hovered element.
    pub target: u64,
    /// Mark the popup follows.
    pub mark: MarkId,
    /// Top-left corner in screen coordinates.
    pub anchor: Point,
    /// Content lines.
    pub lines: Vec<String>,
}

/// Formats a delimited ranking as popup lines: `header`, then `"{rank}: {name}"` per entry.
///
/// Empty entries are skipped and ranks count only the entries kept.
///
/// ```
/// let lines = vizflow_interact::ranked_list("Votes given to:", "Messi|Xavi", '|');
/// assert_eq!(lines, ["Votes given to:", "1: Messi", "2: Xavi"]);
/// ```
pub fn ranked_list(header: &str, raw: &str, delimiter: char) -> Vec<String> {
    std::iter::once(header.to_owned())
        .chain(
            raw.split(delimiter)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .enumerate()
                .map(|(i, name)| format!("{}: {name}", i + 1)),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_skip_blank_entries() {
        assert_eq!(
            ranked_list("Votes given to:", "Messi| |Iniesta|", '|'),
            ["Votes given to:", "1: Messi", "2: Iniesta"]
        );
        assert_eq!(ranked_list("Votes given to:", "", '|'), ["Votes given to:"]);
    }
}
