// This file is part of RazzShell.
// Copyright (C) 2026 The RazzShell authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Evaluates a `[[ ... ]]` test expression's opaque token sequence
//! (`spec.md` §4.6): file predicates, string comparisons, and integer
//! comparisons. The grammar only tokenizes the interior; this is where the
//! supported operators are actually interpreted.

use crate::error::{ExecError, Result};
use std::path::Path;

/// Evaluates `tokens` (already word-expanded by the caller) and returns
/// whether the test succeeded. Exit status 0 means success, 1 means
/// failure, matching how the executor turns this into a `Node::Test`'s
/// exit status.
pub fn evaluate(tokens: &[String]) -> Result<bool> {
    match tokens {
        [op, operand] if op.starts_with('-') && op.len() == 2 => unary(op, operand),
        [lhs, op, rhs] => binary(lhs, op, rhs),
        [single] => Ok(!single.is_empty()),
        [] => Ok(false),
        _ => Err(ExecError::MalformedTest(tokens.join(" "))),
    }
}

fn unary(op: &str, operand: &str) -> Result<bool> {
    let path = Path::new(operand);
    Ok(match op {
        "-f" => path.is_file(),
        "-d" => path.is_dir(),
        "-e" => path.exists(),
        "-r" => is_accessible(path, 0o444),
        "-w" => is_accessible(path, 0o222),
        "-x" => is_accessible(path, 0o111),
        "-z" => operand.is_empty(),
        "-n" => !operand.is_empty(),
        _ => return Err(ExecError::MalformedTest(format!("{op} {operand}"))),
    })
}

fn is_accessible(path: &Path, bits: u32) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|meta| meta.permissions().mode() & bits != 0)
        .unwrap_or(false)
}

fn binary(lhs: &str, op: &str, rhs: &str) -> Result<bool> {
    match op {
        "=" | "==" => Ok(lhs == rhs),
        "!=" => Ok(lhs != rhs),
        "-eq" | "-ne" | "-lt" | "-le" | "-gt" | "-ge" => {
            let l: i64 = lhs
                .parse()
                .map_err(|_| ExecError::MalformedTest(format!("{lhs}: not an integer")))?;
            let r: i64 = rhs
                .parse()
                .map_err(|_| ExecError::MalformedTest(format!("{rhs}: not an integer")))?;
            Ok(match op {
                "-eq" => l == r,
                "-ne" => l != r,
                "-lt" => l < r,
                "-le" => l <= r,
                "-gt" => l > r,
                "-ge" => l >= r,
                _ => unreachable!(),
            })
        }
        _ => Err(ExecError::MalformedTest(format!("{lhs} {op} {rhs}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn string_equality() {
        assert!(evaluate(&toks("foo = foo")).unwrap());
        assert!(!evaluate(&toks("foo = bar")).unwrap());
        assert!(evaluate(&toks("foo != bar")).unwrap());
    }

    #[test]
    fn integer_comparisons() {
        assert!(evaluate(&toks("3 -lt 5")).unwrap());
        assert!(evaluate(&toks("5 -ge 5")).unwrap());
        assert!(!evaluate(&toks("5 -gt 5")).unwrap());
    }

    #[test]
    fn string_predicates() {
        assert!(evaluate(&["-z".into(), String::new()]).unwrap());
        assert!(!evaluate(&["-z".into(), "x".into()]).unwrap());
        assert!(evaluate(&["-n".into(), "x".into()]).unwrap());
    }

    #[test]
    fn file_predicate_on_nonexistent_path() {
        assert!(!evaluate(&["-f".into(), "/no/such/file/ever".into()]).unwrap());
        assert!(!evaluate(&["-e".into(), "/no/such/file/ever".into()]).unwrap());
    }

    #[test]
    fn single_token_is_true_iff_nonempty() {
        assert!(evaluate(&["x".into()]).unwrap());
        assert!(!evaluate(&[String::new()]).unwrap());
    }

    #[test]
    fn malformed_integer_comparison_errors() {
        assert!(evaluate(&toks("abc -eq 1")).is_err());
    }
}
