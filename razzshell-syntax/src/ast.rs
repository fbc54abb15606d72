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

//! Abstract syntax tree for the RazzShell command language.
//!
//! This is a pure value layer: every [`Node`] owns its substructure
//! exclusively (no sharing, no cycles), so dropping a node recursively drops
//! its descendants for free — there is no manual destructor to get wrong.
//! Constructors enforce the invariants `spec.md` §4.2 requires (non-empty
//! `argv`, pipelines of at least two stages, valid identifier names) so an
//! `Node` that exists at all is known-good.

pub mod syntax {
    use std::fmt;

    /// Name + value pair assigned either as a standalone command or as a
    /// pre-command assignment on a [`Command`].
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub struct Assignment {
        pub name: String,
        pub value: String,
    }

    impl Assignment {
        /// Builds an assignment, rejecting names that are not of the form
        /// `[A-Za-z_][A-Za-z0-9_]*`.
        pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self, AstError> {
            let name = name.into();
            if !is_identifier(&name) {
                return Err(AstError::InvalidIdentifier(name));
            }
            Ok(Assignment {
                name,
                value: value.into(),
            })
        }
    }

    pub fn is_identifier(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
            _ => return false,
        }
        chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
    }

    /// Kind of a [`Redirection`].
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum RedirKind {
        Input,
        Output,
        Append,
        Error,
        Both,
        HereDoc,
        HereDocStrip,
    }

    impl fmt::Display for RedirKind {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let op = match self {
                RedirKind::Input => "<",
                RedirKind::Output => ">",
                RedirKind::Append => ">>",
                RedirKind::Error => "2>",
                RedirKind::Both => "&>",
                RedirKind::HereDoc => "<<",
                RedirKind::HereDocStrip => "<<-",
            };
            f.write_str(op)
        }
    }

    /// A single redirection on a command.
    ///
    /// `content` is populated only for `HereDoc`/`HereDocStrip`: the
    /// captured body text. Redirections on a command form an ordered list
    /// because later redirections may `dup2` over earlier ones.
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub struct Redirection {
        pub kind: RedirKind,
        pub target: String,
        pub content: Option<String>,
    }

    impl Redirection {
        pub fn new(kind: RedirKind, target: impl Into<String>) -> Self {
            Redirection {
                kind,
                target: target.into(),
                content: None,
            }
        }

        pub fn here_doc(kind: RedirKind, delimiter: impl Into<String>, content: String) -> Self {
            Redirection {
                kind,
                target: delimiter.into(),
                content: Some(content),
            }
        }
    }

    /// A simple command: an ordered, non-empty argument list plus the
    /// assignments and redirections attached to it.
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub struct Command {
        pub argv: Vec<String>,
        pub assignments: Vec<Assignment>,
        pub redirections: Vec<Redirection>,
        pub background: bool,
    }

    impl Command {
        /// Builds a command. `argv` must be non-empty: a bare set of
        /// assignments or redirections with no command word is represented
        /// as [`Node::Assignment`] or is a parser error, never an empty
        /// `Command`.
        pub fn new(argv: Vec<String>) -> Result<Self, AstError> {
            if argv.is_empty() {
                return Err(AstError::EmptyArgv);
            }
            Ok(Command {
                argv,
                assignments: Vec::new(),
                redirections: Vec::new(),
                background: false,
            })
        }
    }

    /// Opaque ordered sequence of tokens between `[[` and `]]`.
    ///
    /// The grammar does not parse the interior of a test expression further
    /// than tokenization; `razzshell-semantics` interprets the supported
    /// operators (file predicates, string/integer comparisons) at execution
    /// time.
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub struct Test {
        pub tokens: Vec<String>,
    }

    /// A captured here-document body, referenced by a [`Redirection`] whose
    /// `content` field duplicates `content` here for commands that embed the
    /// heredoc as a statement of their own (see `spec.md` §3, `HEREDOC`).
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub struct HereDoc {
        pub delimiter: String,
        pub content: String,
        pub strip_tabs: bool,
    }

    /// Reserved keywords that are part of the AST vocabulary but are never
    /// constructed by the parser and never executed: `spec.md` §1 and §3
    /// call out `if`/`while`/`for`/`case`/functions as out of scope for this
    /// version of the shell. Kept here only so a future grammar extension
    /// has a home to grow into.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum ReservedKeyword {
        Function,
        If,
        While,
        For,
        Case,
    }

    /// A pipe sequence: two or more commands or subshells joined by `|`.
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub struct Pipeline {
        pub stages: Vec<Node>,
        pub negated: bool,
    }

    impl Pipeline {
        /// Builds a pipeline. `stages` must have at least two elements and
        /// each must be a [`Node::Command`] or [`Node::Subshell`].
        pub fn new(stages: Vec<Node>, negated: bool) -> Result<Self, AstError> {
            if stages.len() < 2 {
                return Err(AstError::PipelineTooShort(stages.len()));
            }
            for stage in &stages {
                if !matches!(stage, Node::Command(_) | Node::Subshell(_)) {
                    return Err(AstError::InvalidPipelineStage);
                }
            }
            Ok(Pipeline { stages, negated })
        }
    }

    /// Tagged sum over every kind of AST node the parser can build.
    ///
    /// `List` never wraps a single child: a lone item is represented
    /// directly rather than boxed in a one-element `List`, so `List(v)`
    /// always has `v.len() >= 2` except for the degenerate empty-line case,
    /// which the parser never constructs (an empty line yields no AST at
    /// all; see `spec.md` §4.8).
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub enum Node {
        Command(Command),
        Pipeline(Pipeline),
        List(Vec<Node>),
        AndList(Box<Node>, Box<Node>),
        OrList(Box<Node>, Box<Node>),
        Subshell(Box<Node>),
        Assignment(Assignment),
        Test(Test),
        HereDoc(HereDoc),
        /// Placeholder for a reserved-but-unimplemented compound command.
        Reserved(ReservedKeyword),
    }

    /// Errors a constructor can raise when asked to build an invalid node.
    #[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
    pub enum AstError {
        #[error("command must have at least one argument word")]
        EmptyArgv,
        #[error("pipeline must have at least two stages, got {0}")]
        PipelineTooShort(usize),
        #[error("pipeline stages must be commands or subshells")]
        InvalidPipelineStage,
        #[error("`{0}` is not a valid identifier")]
        InvalidIdentifier(String),
    }

    impl fmt::Display for Node {
        /// Renders an indented textual representation used by the parser's
        /// round-trip tests (`spec.md` §8, property 4).
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write_node(f, self, 0)
        }
    }

    fn indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            f.write_str("  ")?;
        }
        Ok(())
    }

    fn write_node(f: &mut fmt::Formatter<'_>, node: &Node, depth: usize) -> fmt::Result {
        indent(f, depth)?;
        match node {
            Node::Command(c) => {
                write!(f, "COMMAND {:?}", c.argv)?;
                if c.background {
                    write!(f, " &")?;
                }
                for a in &c.assignments {
                    write!(f, " {}={}", a.name, a.value)?;
                }
                for r in &c.redirections {
                    write!(f, " {}{}", r.kind, r.target)?;
                }
                writeln!(f)
            }
            Node::Pipeline(p) => {
                writeln!(f, "PIPELINE negated={}", p.negated)?;
                for stage in &p.stages {
                    write_node(f, stage, depth + 1)?;
                }
                Ok(())
            }
            Node::List(items) => {
                writeln!(f, "LIST")?;
                for item in items {
                    write_node(f, item, depth + 1)?;
                }
                Ok(())
            }
            Node::AndList(l, r) => {
                writeln!(f, "AND_LIST")?;
                write_node(f, l, depth + 1)?;
                write_node(f, r, depth + 1)
            }
            Node::OrList(l, r) => {
                writeln!(f, "OR_LIST")?;
                write_node(f, l, depth + 1)?;
                write_node(f, r, depth + 1)
            }
            Node::Subshell(inner) => {
                writeln!(f, "SUBSHELL")?;
                write_node(f, inner, depth + 1)
            }
            Node::Assignment(a) => writeln!(f, "ASSIGNMENT {}={}", a.name, a.value),
            Node::Test(t) => writeln!(f, "TEST {:?}", t.tokens),
            Node::HereDoc(h) => writeln!(f, "HEREDOC {} strip={}", h.delimiter, h.strip_tabs),
            Node::Reserved(k) => writeln!(f, "RESERVED {k:?}"),
        }
    }
}

pub use syntax::{
    AstError, Assignment, Command, HereDoc, Node, Pipeline, RedirKind, Redirection,
    ReservedKeyword, Test,
};

#[cfg(test)]
mod tests {
    use super::syntax::*;

    #[test]
    fn command_rejects_empty_argv() {
        assert_eq!(Command::new(vec![]), Err(AstError::EmptyArgv));
    }

    #[test]
    fn pipeline_rejects_fewer_than_two_stages() {
        let one = vec![Node::Command(Command::new(vec!["true".into()]).unwrap())];
        assert_eq!(
            Pipeline::new(one, false),
            Err(AstError::PipelineTooShort(1))
        );
    }

    #[test]
    fn assignment_rejects_bad_identifier() {
        assert!(Assignment::new("1FOO", "bar").is_err());
        assert!(Assignment::new("FOO_1", "bar").is_ok());
    }

    #[test]
    fn display_is_indented_and_recursive() {
        let pipeline = Node::Pipeline(
            Pipeline::new(
                vec![
                    Node::Command(Command::new(vec!["a".into()]).unwrap()),
                    Node::Command(Command::new(vec!["b".into()]).unwrap()),
                ],
                false,
            )
            .unwrap(),
        );
        let text = pipeline.to_string();
        assert!(text.starts_with("PIPELINE"));
        assert!(text.contains("  COMMAND"));
    }
}
