// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

/// Strip all ANSI escape sequences from a string
fn strip_ansi(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
        } else {
            result.push(c);
        }
    }
    result
}

#[test]
fn start_sequences_match_codes() {
    assert_eq!(codes::HEADER_START, format!("\x1b[38;5;{}m", codes::HEADER));
    assert_eq!(codes::LITERAL_START, format!("\x1b[38;5;{}m", codes::LITERAL));
    assert_eq!(codes::CONTEXT_START, format!("\x1b[38;5;{}m", codes::CONTEXT));
}

#[parameterized(
    two_spaces = { "cmd  desc", Some(3) },
    many_spaces = { "jseed setup     Run setup", Some(11) },
    single_spaces_only = { "jseed setup hierarchy", None },
    trailing_spaces = { "jseed check   ", None },
)]
fn description_start(line: &str, expected: Option<usize>) {
    assert_eq!(find_description_start(line), expected);
}

#[test]
fn colorize_command_keeps_text() {
    let cmd = "jseed onboard <PROJECT>";
    assert_eq!(strip_ansi(&colorize_command(cmd)), cmd);
}

#[test]
fn examples_keeps_text() {
    let text = "Examples:\n  jseed setup hierarchy  Build the hierarchy\n  plain line";
    assert_eq!(strip_ansi(&examples(text)), text);
}

#[test]
fn painted_text_round_trips_through_strip() {
    for painted in [header("Setup:"), literal("setup"), context("<SHELL>"), warn("3 errors")] {
        let plain = strip_ansi(&painted);
        assert!(!plain.contains('\x1b'));
        assert!(painted.ends_with(&plain) || painted.ends_with(codes::RESET));
    }
}
