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

//! Word expansion, applied by the executor before dispatch (`spec.md` §4.6):
//! tilde expansion on the first segment, parameter expansion, command
//! substitution, escape processing, and quote removal — in that order,
//! within a single left-to-right scan of the lexeme.
//!
//! Field splitting does not apply here: the lexer already split the line
//! into words, and nothing downstream re-splits them.

use crate::error::{ExecError, Result};

/// The two things word expansion needs from its caller: variable lookup
/// and (recursive) command substitution. Bundled into one trait, rather
/// than two, because the executor's implementation needs `&mut self`
/// access to the whole shell state for a substitution's fork+exec, which
/// would conflict with a second, separately-borrowed lookup closure over
/// the same state.
pub trait Expander {
    fn get(&mut self, name: &str) -> Option<String>;
    fn run(&mut self, command_text: &str) -> Result<String>;
}

#[cfg(test)]
struct ClosureExpander<F, G> {
    vars: F,
    subst: G,
}

#[cfg(test)]
impl<F: FnMut(&str) -> Option<String>, G: FnMut(&str) -> Result<String>> Expander
    for ClosureExpander<F, G>
{
    fn get(&mut self, name: &str) -> Option<String> {
        (self.vars)(name)
    }

    fn run(&mut self, command_text: &str) -> Result<String> {
        (self.subst)(command_text)
    }
}

/// Expands one already-tokenized word: `spec.md` §4.6's exact order.
pub fn expand_word(raw: &str, expander: &mut dyn Expander, nounset: bool) -> Result<String> {
    let with_tilde = expand_leading_tilde(raw, expander);
    let chars: Vec<char> = with_tilde.chars().collect();
    let mut out = String::new();
    let mut i = 0usize;
    let mut in_single = false;
    let mut in_double = false;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\'' if !in_double => {
                in_single = !in_single;
                i += 1;
            }
            '"' if !in_single => {
                in_double = !in_double;
                i += 1;
            }
            '\\' if !in_single => {
                i += 1;
                if i < chars.len() {
                    // Inside double quotes only `\$`, `` \` ``, `\"`, `\\`
                    // are special; everything else keeps its backslash.
                    // Outside quotes every `\<any>` is a literal escape.
                    if in_double && !matches!(chars[i], '$' | '`' | '"' | '\\') {
                        out.push('\\');
                    }
                    out.push(chars[i]);
                    i += 1;
                } else {
                    out.push('\\');
                }
            }
            '$' if !in_single => {
                i += 1;
                if i < chars.len() && chars[i] == '(' {
                    let (inner, consumed) = extract_balanced(&chars[i..], '(', ')')?;
                    i += consumed;
                    let result = expander.run(&inner)?;
                    out.push_str(result.trim_end_matches('\n'));
                } else if i < chars.len() && chars[i] == '{' {
                    let end = find_unescaped(&chars, i, '}')
                        .ok_or(ExecError::UnterminatedSubstitution)?;
                    let name: String = chars[i + 1..end].iter().collect();
                    i = end + 1;
                    out.push_str(&resolve_var(&name, expander, nounset)?);
                } else {
                    let start = i;
                    while i < chars.len() && is_name_byte(chars[i]) {
                        i += 1;
                    }
                    if start == i {
                        out.push('$');
                    } else {
                        let name: String = chars[start..i].iter().collect();
                        out.push_str(&resolve_var(&name, expander, nounset)?);
                    }
                }
            }
            '`' if !in_single => {
                i += 1;
                let start = i;
                while i < chars.len() && chars[i] != '`' {
                    if chars[i] == '\\' && i + 1 < chars.len() {
                        i += 1;
                    }
                    i += 1;
                }
                if i >= chars.len() {
                    return Err(ExecError::UnterminatedSubstitution);
                }
                let inner: String = chars[start..i].iter().collect();
                i += 1; // closing backtick
                let result = expander.run(&inner)?;
                out.push_str(result.trim_end_matches('\n'));
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    Ok(out)
}

fn is_name_byte(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

fn resolve_var(name: &str, expander: &mut dyn Expander, nounset: bool) -> Result<String> {
    match expander.get(name) {
        Some(value) => Ok(value),
        None if nounset => Err(ExecError::UnsetVariable(name.to_string())),
        None => Ok(String::new()),
    }
}

/// Expands a leading, unquoted `~` (optionally followed by `/...`) to
/// `$HOME`. `spec.md` only asks for expansion "on the first segment",
/// which this crate reads as the bare current-user form; `~user` is not
/// supported (no user database lookup in scope).
fn expand_leading_tilde(raw: &str, expander: &mut dyn Expander) -> String {
    if raw.starts_with('\'') || raw.starts_with('"') {
        return raw.to_string();
    }
    match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => match expander.get("HOME") {
            Some(home) => format!("{home}{rest}"),
            None => raw.to_string(),
        },
        _ => raw.to_string(),
    }
}

/// Finds the index of the first unescaped occurrence of `target` at or
/// after `from`.
fn find_unescaped(chars: &[char], from: usize, target: char) -> Option<usize> {
    let mut i = from;
    while i < chars.len() {
        if chars[i] == '\\' {
            i += 2;
            continue;
        }
        if chars[i] == target {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Given the slice starting right after `$(`'s opening paren marker (i.e.
/// `chars[0] == open`), returns the text between the balanced pair and how
/// many characters were consumed including both delimiters, tracking
/// nested parens so an inner subshell's own `(...)` doesn't terminate the
/// substitution early.
fn extract_balanced(chars: &[char], open: char, close: char) -> Result<(String, usize)> {
    debug_assert_eq!(chars[0], open);
    let mut depth = 0i32;
    let mut i = 0usize;
    loop {
        if i >= chars.len() {
            return Err(ExecError::UnterminatedSubstitution);
        }
        match chars[i] {
            c if c == open => depth += 1,
            c if c == close => {
                depth -= 1;
                if depth == 0 {
                    let inner: String = chars[1..i].iter().collect();
                    return Ok((inner, i + 1));
                }
            }
            _ => {}
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_subst() -> impl FnMut(&str) -> Result<String> {
        |_cmd: &str| panic!("command substitution should not run in this test")
    }

    fn expander_of(
        map: HashMap<String, String>,
        subst: impl FnMut(&str) -> Result<String>,
    ) -> ClosureExpander<impl FnMut(&str) -> Option<String>, impl FnMut(&str) -> Result<String>>
    {
        ClosureExpander {
            vars: move |name: &str| map.get(name).cloned(),
            subst,
        }
    }

    #[test]
    fn plain_word_is_unchanged() {
        let mut e = expander_of([("X".into(), "unused".into())].into(), no_subst());
        assert_eq!(expand_word("hello", &mut e, false).unwrap(), "hello");
    }

    #[test]
    fn parameter_expansion_substitutes_value() {
        let mut e = expander_of([("FOO".into(), "bar".into())].into(), no_subst());
        assert_eq!(expand_word("$FOO", &mut e, false).unwrap(), "bar");
        assert_eq!(expand_word("${FOO}baz", &mut e, false).unwrap(), "barbaz");
    }

    #[test]
    fn nounset_rejects_unset_variable() {
        let mut e = expander_of(HashMap::new(), no_subst());
        let err = expand_word("$MISSING", &mut e, true).unwrap_err();
        assert!(matches!(err, ExecError::UnsetVariable(name) if name == "MISSING"));
    }

    #[test]
    fn unset_variable_expands_empty_without_nounset() {
        let mut e = expander_of(HashMap::new(), no_subst());
        assert_eq!(expand_word("[$MISSING]", &mut e, false).unwrap(), "[]");
    }

    #[test]
    fn single_quotes_suppress_all_expansion() {
        let mut e = expander_of([("FOO".into(), "bar".into())].into(), no_subst());
        assert_eq!(expand_word("'$FOO'", &mut e, false).unwrap(), "$FOO");
    }

    #[test]
    fn double_quotes_still_expand_parameters() {
        let mut e = expander_of([("FOO".into(), "bar".into())].into(), no_subst());
        assert_eq!(
            expand_word("\"$FOO baz\"", &mut e, false).unwrap(),
            "bar baz"
        );
    }

    #[test]
    fn tilde_expands_to_home_at_word_start_only() {
        let mut e = expander_of([("HOME".into(), "/home/razz".into())].into(), no_subst());
        assert_eq!(expand_word("~/bin", &mut e, false).unwrap(), "/home/razz/bin");
        assert_eq!(expand_word("a~b", &mut e, false).unwrap(), "a~b");
    }

    #[test]
    fn command_substitution_runs_and_trims_trailing_newline() {
        let mut e = expander_of(
            HashMap::new(),
            |cmd: &str| -> Result<String> {
                assert_eq!(cmd, "echo hi");
                Ok("hi\n".to_string())
            },
        );
        assert_eq!(expand_word("$(echo hi)", &mut e, false).unwrap(), "hi");
    }

    #[test]
    fn nested_parens_in_command_substitution_are_balanced() {
        let mut e = expander_of(
            HashMap::new(),
            |cmd: &str| -> Result<String> {
                assert_eq!(cmd, "(echo hi)");
                Ok("hi".to_string())
            },
        );
        assert_eq!(expand_word("$((echo hi))", &mut e, false).unwrap(), "hi");
    }

    #[test]
    fn backtick_substitution_runs_inner_command() {
        let mut e = expander_of(
            HashMap::new(),
            |cmd: &str| -> Result<String> {
                assert_eq!(cmd, "echo hi");
                Ok("hi\n".to_string())
            },
        );
        assert_eq!(expand_word("`echo hi`", &mut e, false).unwrap(), "hi");
    }

    #[test]
    fn unterminated_command_substitution_is_an_error() {
        let mut e = expander_of(HashMap::new(), no_subst());
        let err = expand_word("$(echo hi", &mut e, false).unwrap_err();
        assert!(matches!(err, ExecError::UnterminatedSubstitution));
    }

    #[test]
    fn unquoted_escape_consumes_the_following_byte() {
        let mut e = expander_of(HashMap::new(), no_subst());
        assert_eq!(expand_word(r"a\ b", &mut e, false).unwrap(), "a b");
    }
}
