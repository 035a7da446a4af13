// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number formatting for labels and popups.

extern crate alloc;

use alloc::format;
use alloc::string::String;

/// Formats `value` with `decimals` fraction digits and comma-grouped thousands.
///
/// Non-finite values format as `"NaN"`, `"∞"` or `"-∞"`.
pub fn format_grouped(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return non_finite(value);
    }
    let raw = format!("{:.*}", decimals, value);
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int, frac) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut out = String::with_capacity(raw.len() + int.len() / 3);
    out.push_str(sign);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Formats a ratio as a percentage, e.g. `0.1234` with one decimal as `"12.3%"`.
pub fn format_percent(ratio: f64, decimals: usize) -> String {
    if !ratio.is_finite() {
        return non_finite(ratio);
    }
    format!("{:.*}%", decimals, ratio * 100.0)
}

/// Formats a whole-dollar amount, e.g. `"$1,234,567"`.
pub fn format_dollar(value: f64) -> String {
    let grouped = format_grouped(value, 0);
    match grouped.strip_prefix('-') {
        Some(rest) => format!("-${rest}"),
        None => format!("${grouped}"),
    }
}

/// Formats a time value as a whole step (for example a year).
pub fn format_step(value: f64) -> String {
    if !value.is_finite() {
        return non_finite(value);
    }
    format!("{:.0}", value)
}

fn non_finite(value: f64) -> String {
    if value.is_nan() {
        String::from("NaN")
    } else if value > 0.0 {
        String::from("∞")
    } else {
        String::from("-∞")
    }
}
