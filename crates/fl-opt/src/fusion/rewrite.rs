/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Scope-aware text surgery on foreign kernel source.
//!
//! The kernel database guarantees well-formed sources, so a balanced-brace
//! scanner is all the parsing that happens here. Both entry points are
//! deliberately small and independent of the fusion logic so they can be
//! tested on raw strings.

use crate::OptError;

///Characters that may delimit an identifier in kernel source. A parameter
/// occurrence is only substituted when both neighbors are one of these (or
/// the string edge), which keeps `x` from corrupting `maxIdx`.
const TOKEN_BOUNDARIES: &[char] = &[
    ' ', '\t', '\n', ',', '(', ')', '[', ']', '+', '-', '*', '/', '%', ';', '^',
];

fn is_boundary(c: Option<char>) -> bool {
    match c {
        None => true,
        Some(c) => TOKEN_BOUNDARIES.contains(&c),
    }
}

///Replaces every token-boundary-delimited occurrence of `from` with `to`.
/// Occurrences embedded in longer identifiers are left untouched.
pub(crate) fn replace_token(source: &str, from: &str, to: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut copied = 0;
    let mut search = 0;

    while let Some(pos) = source[search..].find(from) {
        let start = search + pos;
        let end = start + from.len();
        let before = source[..start].chars().next_back();
        let after = source[end..].chars().next();

        if is_boundary(before) && is_boundary(after) {
            out.push_str(&source[copied..start]);
            out.push_str(to);
            copied = end;
            search = end;
        } else {
            //partial-token hit, step past its first byte only so an
            //adjacent real occurrence is still found
            search = start + 1;
        }
    }

    out.push_str(&source[copied..]);
    out
}

///Extracts the brace-matched body of the kernel function named `kernel`
/// from `source`, without the outer braces.
pub(crate) fn kernel_body<'a>(source: &'a str, kernel: &str) -> Result<&'a str, OptError> {
    let malformed = |reason: &str| OptError::MalformedKernelSource {
        kernel: kernel.to_string(),
        reason: reason.to_string(),
    };

    let mut search = 0;
    while let Some(pos) = source[search..].find(kernel) {
        let start = search + pos;
        let end = start + kernel.len();
        search = end;

        //must be a declaration: the name stands alone and is followed by
        //its parameter list
        let standalone = source[..start]
            .chars()
            .next_back()
            .map(|c| c.is_whitespace())
            .unwrap_or(true);
        let trailing = source[end..].trim_start();
        if !standalone || !trailing.starts_with('(') {
            continue;
        }

        let paren_open = end + (source[end..].len() - trailing.len());
        let paren_close = find_matching(source, paren_open, '(', ')')
            .ok_or_else(|| malformed("unbalanced parameter list"))?;

        let after_params = source[paren_close + 1..].trim_start();
        if !after_params.starts_with('{') {
            //a call or prototype, keep searching
            continue;
        }
        let brace_open = paren_close + 1 + (source[paren_close + 1..].len() - after_params.len());
        let brace_close = find_matching(source, brace_open, '{', '}')
            .ok_or_else(|| malformed("unbalanced body braces"))?;

        return Ok(&source[brace_open + 1..brace_close]);
    }

    Err(malformed("no kernel definition found in source"))
}

///Index of the character closing the group opened at `open_idx`.
fn find_matching(source: &str, open_idx: usize, open: char, close: char) -> Option<usize> {
    let mut depth = 0usize;
    for (off, c) in source[open_idx..].char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some(open_idx + off);
            }
        }
    }
    None
}
