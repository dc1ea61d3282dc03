// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Level {
    Info,
    Error,
}

/// A user-facing message, shown once per outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: Level,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn info(title: &str, description: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            title: title.to_string(),
            description: description.into(),
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            title: "Error".to_string(),
            description: description.into(),
        }
    }
}

pub trait Notifier {
    fn notify(&mut self, n: Notification);
}

/// Prints notifications: info to stdout, errors to stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, n: Notification) {
        match n.level {
            Level::Info => {
                debug!(title = %n.title, "{}", n.description);
                println!("{}: {}", n.title, n.description);
            }
            Level::Error => {
                debug!(title = %n.title, "{}", n.description);
                eprintln!("{}: {}", n.title, n.description);
            }
        }
    }
}
