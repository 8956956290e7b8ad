//! Enumerations and field types for the task lifecycle.
//!
//! This module defines the status values a task can hold, the theme preference
//! modes, and the sort keys available when listing tasks.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Task lifecycle status.
///
/// `Todo`, `InProgress` and `Done` form an ordered line; `Frozen` is a
/// side-state a task can be parked in from anywhere on the line except `Done`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    Todo,
    InProgress,
    Done,
    Frozen,
}

impl Status {
    /// The next status along the `todo -> inProgress -> done` line, if any.
    /// Frozen tasks never move along the line implicitly.
    pub fn next_on_line(self) -> Option<Status> {
        match self {
            Status::Todo => Some(Status::InProgress),
            Status::InProgress => Some(Status::Done),
            Status::Done | Status::Frozen => None,
        }
    }

    /// The previous status along the line, if any.
    pub fn prev_on_line(self) -> Option<Status> {
        match self {
            Status::Done => Some(Status::InProgress),
            Status::InProgress => Some(Status::Todo),
            Status::Todo | Status::Frozen => None,
        }
    }

    /// Board column index, also used by `--sort status`.
    pub fn column_order(self) -> usize {
        match self {
            Status::Todo => 0,
            Status::InProgress => 1,
            Status::Done => 2,
            Status::Frozen => 3,
        }
    }
}

/// Theme preference for the TUI board.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    System,
}

/// Available sorting options for task lists.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortKey {
    Created,
    Status,
    Title,
}
