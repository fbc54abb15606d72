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

//! Shell mode and the `set`-controlled option flags (`spec.md` §4.4, C4).
//!
//! `ShellConfig` is the single configuration surface: there is no config
//! file (an explicit Non-goal), only CLI flags at startup and the `mode`/
//! `set` built-ins at runtime.

use std::fmt;

/// The three interpretation modes a session can run in.
///
/// Switching modes updates the published `RAZZSHELL_MODE` environment
/// variable (`spec.md` §4.4) and, in `Posix`/`Bash`, turns on POSIX command
/// name translation in the registry (`spec.md` §4.5).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Mode {
    Native,
    Posix,
    Bash,
}

impl Mode {
    /// Parses the argument to the `mode` built-in or a startup flag.
    pub fn parse(s: &str) -> Option<Mode> {
        match s {
            "razzshell" | "native" => Some(Mode::Native),
            "posix" => Some(Mode::Posix),
            "bash" => Some(Mode::Bash),
            _ => None,
        }
    }

    /// String form published as `RAZZSHELL_MODE` and printed by `mode`.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Native => "razzshell",
            Mode::Posix => "posix",
            Mode::Bash => "bash",
        }
    }

    /// Whether the POSIX→native translation table applies in this mode
    /// (`spec.md` §4.5: bypassed in `Native`, applied in `Posix`/`Bash`).
    pub fn translates_posix_names(self) -> bool {
        !matches!(self, Mode::Native)
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Native
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `set`-controlled flags (`spec.md` §4.4). All default off.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct ShellFlags {
    /// `-e`: tear the REPL down after a non-zero top-level pipeline status.
    pub errexit: bool,
    /// `-o pipefail`: a pipeline's status is its last non-zero stage's,
    /// rather than only the final stage's.
    pub pipefail: bool,
    /// `-u`: expanding an unset variable is a failure.
    pub nounset: bool,
    /// `-v`: echo each line before executing it.
    pub verbose: bool,
    /// `-x`: echo each simple command (post-expansion) with a `+ ` prefix.
    pub xtrace: bool,
}

/// Process-wide shell configuration: mode plus the `set` flags.
///
/// Mutated only by the `mode` and `set` built-ins, per `spec.md` §3.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct ShellConfig {
    pub mode: Mode,
    pub flags: ShellFlags,
}

impl ShellConfig {
    pub fn new(mode: Mode) -> Self {
        ShellConfig {
            mode,
            flags: ShellFlags::default(),
        }
    }

    /// Parses one `set` flag letter (`e`, `u`, `v`, `x`) or long option
    /// (`pipefail`), returning whether it was recognized.
    pub fn apply_flag(&mut self, letter: char, on: bool) -> bool {
        match letter {
            'e' => self.flags.errexit = on,
            'u' => self.flags.nounset = on,
            'v' => self.flags.verbose = on,
            'x' => self.flags.xtrace = on,
            _ => return false,
        }
        true
    }

    pub fn apply_long_option(&mut self, name: &str, on: bool) -> bool {
        match name {
            "pipefail" => self.flags.pipefail = on,
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_round_trips_through_parse_and_display() {
        for mode in [Mode::Native, Mode::Posix, Mode::Bash] {
            assert_eq!(Mode::parse(mode.as_str()), Some(mode));
        }
    }

    #[test]
    fn native_mode_bypasses_translation() {
        assert!(!Mode::Native.translates_posix_names());
        assert!(Mode::Posix.translates_posix_names());
        assert!(Mode::Bash.translates_posix_names());
    }

    #[test]
    fn set_flags_default_off_and_toggle() {
        let mut config = ShellConfig::default();
        assert!(!config.flags.errexit);
        assert!(config.apply_flag('e', true));
        assert!(config.flags.errexit);
        assert!(config.apply_flag('e', false));
        assert!(!config.flags.errexit);
        assert!(!config.apply_flag('q', true));
    }

    #[test]
    fn pipefail_is_a_long_option_not_a_letter() {
        let mut config = ShellConfig::default();
        assert!(config.apply_long_option("pipefail", true));
        assert!(config.flags.pipefail);
    }
}
