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

//! The core built-in commands (C9's in-scope slice of `spec.md` §6): one
//! module per built-in, each exporting a `main` function matching
//! `razzshell_env::BuiltinHandler`'s signature.
//!
//! The approximately seventy cosmetic built-ins that shell out to standard
//! utilities, `RazzFetch`, the ANSI-art screens, line editing/history UI,
//! the AI-query built-in, and session-save/bookmarks are deliberately not
//! here; [`register_core`] only wires up what `spec.md` calls in scope.
//! Everything else attaches to the same [`razzshell_env::Registry`] through
//! [`razzshell_env::BuiltinEntry`] the way this crate does.

pub mod alias;
pub mod aliases;
pub mod bg;
pub mod cd;
pub mod commands;
pub mod echo;
pub mod exit;
pub mod fg;
pub mod history_clear;
pub mod jobs;
pub mod kill;
pub mod loadplugin;
pub mod mode;
pub mod printenv;
pub mod pwd;
pub mod repeat;
pub mod set;
pub mod setenv;
#[cfg(test)]
pub mod test_support;
pub mod unalias;
pub mod unloadplugin;
pub mod unsetenv;

use razzshell_env::{BuiltinEntry, Registry};

/// Registers every core built-in under its `spec.md` §6 contract name, plus
/// (for the handful with a distinct entry in `original_source/src/
/// posix_compat.c`) a second registration under that original RazzShell
/// name, so the same handler resolves both directly in `Native` mode and
/// after POSIX→native translation in `Posix`/`Bash` mode — see
/// `razzshell-env::posix_compat` and `DESIGN.md`'s note on this naming
/// decision.
pub fn register_core(registry: &mut Registry) {
    let entries: &[BuiltinEntry] = &[
        BuiltinEntry {
            name: "cd",
            handler: cd::main,
            description: "change the working directory",
        },
        BuiltinEntry {
            name: "exit",
            handler: exit::main,
            description: "terminate the shell with the last (or given) exit status",
        },
        BuiltinEntry {
            name: "pwd",
            handler: pwd::main,
            description: "print the working directory",
        },
        BuiltinEntry {
            name: "echo",
            handler: echo::main,
            description: "print arguments separated by spaces",
        },
        BuiltinEntry {
            name: "jobs",
            handler: jobs::main,
            description: "list the job table",
        },
        BuiltinEntry {
            name: "fg",
            handler: fg::main,
            description: "resume a stopped job in the foreground",
        },
        BuiltinEntry {
            name: "bg",
            handler: bg::main,
            description: "resume a stopped job in the background",
        },
        BuiltinEntry {
            name: "kill",
            handler: kill::main,
            description: "send SIGTERM to a process",
        },
        BuiltinEntry {
            name: "alias",
            handler: alias::main,
            description: "define an alias",
        },
        BuiltinEntry {
            name: "unalias",
            handler: unalias::main,
            description: "remove an alias",
        },
        BuiltinEntry {
            name: "aliases",
            handler: aliases::main,
            description: "list all aliases",
        },
        BuiltinEntry {
            name: "setenv",
            handler: setenv::main,
            description: "set an environment variable",
        },
        BuiltinEntry {
            name: "unsetenv",
            handler: unsetenv::main,
            description: "unset an environment variable",
        },
        BuiltinEntry {
            name: "printenv",
            handler: printenv::main,
            description: "print the environment",
        },
        BuiltinEntry {
            name: "loadplugin",
            handler: loadplugin::main,
            description: "load a plugin module",
        },
        BuiltinEntry {
            name: "unloadplugin",
            handler: unloadplugin::main,
            description: "unload a plugin module",
        },
        BuiltinEntry {
            name: "mode",
            handler: mode::main,
            description: "show or change the shell's interpretation mode",
        },
        BuiltinEntry {
            name: "set",
            handler: set::main,
            description: "toggle shell option flags",
        },
        BuiltinEntry {
            name: "history_clear",
            handler: history_clear::main,
            description: "clear the command history",
        },
        BuiltinEntry {
            name: "commands",
            handler: commands::main,
            description: "list the command history",
        },
        BuiltinEntry {
            name: "repeat",
            handler: repeat::main,
            description: "re-parse and execute a command n times",
        },
    ];
    for entry in entries {
        registry.register_builtin(*entry);
    }

    // `original_source/src/posix_compat.c` gives these handlers a second,
    // distinct native name (`cd`→`change`, `echo`→`say`, ...); registering
    // both means the same built-in resolves whether the user types the
    // familiar spelling directly (bypassed translation in `Native` mode) or
    // reaches it through POSIX translation in `Posix`/`Bash` mode.
    let native_aliases: &[BuiltinEntry] = &[
        BuiltinEntry {
            name: "change",
            handler: cd::main,
            description: "change the working directory",
        },
        BuiltinEntry {
            name: "quit",
            handler: exit::main,
            description: "terminate the shell with the last (or given) exit status",
        },
        BuiltinEntry {
            name: "where",
            handler: pwd::main,
            description: "print the working directory",
        },
        BuiltinEntry {
            name: "say",
            handler: echo::main,
            description: "print arguments separated by spaces",
        },
        BuiltinEntry {
            name: "viewjobs",
            handler: jobs::main,
            description: "list the job table",
        },
        BuiltinEntry {
            name: "bringtofront",
            handler: fg::main,
            description: "resume a stopped job in the foreground",
        },
        BuiltinEntry {
            name: "sendtoback",
            handler: bg::main,
            description: "resume a stopped job in the background",
        },
        BuiltinEntry {
            name: "terminate",
            handler: kill::main,
            description: "send SIGTERM to a process",
        },
        BuiltinEntry {
            name: "makealias",
            handler: alias::main,
            description: "define an alias",
        },
        BuiltinEntry {
            name: "removealias",
            handler: unalias::main,
            description: "remove an alias",
        },
    ];
    for entry in native_aliases {
        registry.register_builtin(*entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use razzshell_env::{Mode, Resolution};

    #[test]
    fn posix_mode_reaches_cd_through_its_native_alias() {
        let mut registry = Registry::new();
        register_core(&mut registry);
        assert!(matches!(
            registry.resolve("cd", Mode::Native),
            Resolution::Builtin(_)
        ));
        assert!(matches!(
            registry.resolve("cd", Mode::Posix),
            Resolution::Builtin(_)
        ));
    }

    #[test]
    fn every_contract_name_from_spec_section_6_is_registered() {
        let mut registry = Registry::new();
        register_core(&mut registry);
        for name in [
            "cd",
            "exit",
            "pwd",
            "echo",
            "jobs",
            "fg",
            "bg",
            "kill",
            "alias",
            "unalias",
            "aliases",
            "setenv",
            "unsetenv",
            "printenv",
            "loadplugin",
            "unloadplugin",
            "mode",
            "set",
            "history_clear",
            "commands",
            "repeat",
        ] {
            assert!(
                matches!(registry.resolve(name, Mode::Native), Resolution::Builtin(_)),
                "{name} should resolve to a builtin"
            );
        }
    }
}
