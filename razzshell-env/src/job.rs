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

//! The job table (`spec.md` §3, §4.6).
//!
//! Job IDs are small positive integers assigned monotonically and reused
//! once a slot frees up, which is exactly [`slab::Slab`]'s key discipline
//! (keys are `usize`; we publish `key + 1` so job IDs start at 1 and 0 is
//! never a valid job ID, matching shells' convention that job 0 means
//! "none").

use nix::unistd::Pid;
use slab::Slab;

/// `original_source/razzshell.c`'s bounded job-table capacity.
pub const MAX_JOBS: usize = 100;

/// A job's position in the state machine described in `spec.md` §4.6.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum JobState {
    /// Spawned and running (or never yet reported stopped/exited).
    Running,
    /// Stopped by `SIGTSTP` from the terminal; resumes on `bg`/`fg`.
    Stopped,
    /// Exited or was killed by a signal; pending removal from the table.
    Reaped,
}

/// One entry in the job table: `{id, pid, command-text, background-flag}`
/// plus the state-machine position `spec.md`'s diagram calls for.
#[derive(Clone, Debug)]
pub struct Job {
    pub id: usize,
    /// Process ID of the job's process-group leader.
    pub pid: Pid,
    pub command_text: String,
    pub background: bool,
    pub state: JobState,
}

/// Error returned when the job table is already at [`MAX_JOBS`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("job table is full (max {MAX_JOBS} jobs)")]
pub struct JobTableFull;

/// Bounded table of jobs, keyed by monotonically assigned, slot-reused IDs.
#[derive(Clone, Debug, Default)]
pub struct JobTable {
    slots: Slab<Job>,
}

impl JobTable {
    pub fn new() -> Self {
        JobTable { slots: Slab::new() }
    }

    /// Records a new job, returning its assigned ID.
    pub fn insert(
        &mut self,
        pid: Pid,
        command_text: impl Into<String>,
        background: bool,
    ) -> Result<usize, JobTableFull> {
        if self.slots.len() >= MAX_JOBS {
            return Err(JobTableFull);
        }
        let command_text = command_text.into();
        let entry = self.slots.vacant_entry();
        let id = entry.key() + 1;
        entry.insert(Job {
            id,
            pid,
            command_text,
            background,
            state: JobState::Running,
        });
        Ok(id)
    }

    pub fn get(&self, id: usize) -> Option<&Job> {
        id.checked_sub(1).and_then(|key| self.slots.get(key))
    }

    pub fn get_mut(&mut self, id: usize) -> Option<&mut Job> {
        id.checked_sub(1).and_then(|key| self.slots.get_mut(key))
    }

    pub fn find_by_pid(&self, pid: Pid) -> Option<&Job> {
        self.slots.iter().map(|(_, job)| job).find(|job| job.pid == pid)
    }

    pub fn find_by_pid_mut(&mut self, pid: Pid) -> Option<&mut Job> {
        self.slots.iter_mut().map(|(_, job)| job).find(|job| job.pid == pid)
    }

    /// Removes a job (used once a job is reaped and the user has seen it,
    /// or immediately on the next `jobs` listing after reaping).
    pub fn remove(&mut self, id: usize) -> Option<Job> {
        let key = id.checked_sub(1)?;
        if self.slots.contains(key) {
            Some(self.slots.remove(key))
        } else {
            None
        }
    }

    /// Removes every job that has reached [`JobState::Reaped`], returning
    /// them so the REPL can print "Done" notices before the next prompt.
    pub fn drain_reaped(&mut self) -> Vec<Job> {
        let reaped_keys: Vec<usize> = self
            .slots
            .iter()
            .filter(|(_, job)| job.state == JobState::Reaped)
            .map(|(key, _)| key)
            .collect();
        reaped_keys
            .into_iter()
            .map(|key| self.slots.remove(key))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.slots.iter().map(|(_, job)| job)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(n: i32) -> Pid {
        Pid::from_raw(n)
    }

    #[test]
    fn ids_are_assigned_monotonically_starting_at_one() {
        let mut table = JobTable::new();
        let a = table.insert(pid(100), "sleep 10", true).unwrap();
        let b = table.insert(pid(101), "sleep 20", true).unwrap();
        assert_eq!(a, 1);
        assert_eq!(b, 2);
    }

    #[test]
    fn freed_slot_is_reused() {
        let mut table = JobTable::new();
        let a = table.insert(pid(100), "sleep 10", true).unwrap();
        table.remove(a);
        let b = table.insert(pid(200), "sleep 20", true).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn table_rejects_insert_past_capacity() {
        let mut table = JobTable::new();
        for i in 0..MAX_JOBS {
            table.insert(pid(i as i32 + 1), "x", true).unwrap();
        }
        assert_eq!(table.insert(pid(9999), "x", true), Err(JobTableFull));
    }

    #[test]
    fn find_by_pid_locates_the_right_job() {
        let mut table = JobTable::new();
        table.insert(pid(10), "a", true).unwrap();
        let id = table.insert(pid(20), "b", true).unwrap();
        let job = table.find_by_pid(pid(20)).unwrap();
        assert_eq!(job.id, id);
    }

    #[test]
    fn drain_reaped_removes_only_reaped_jobs() {
        let mut table = JobTable::new();
        let a = table.insert(pid(10), "a", true).unwrap();
        let b = table.insert(pid(20), "b", true).unwrap();
        table.get_mut(a).unwrap().state = JobState::Reaped;
        let drained = table.drain_reaped();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].id, a);
        assert!(table.get(a).is_none());
        assert!(table.get(b).is_some());
    }
}
