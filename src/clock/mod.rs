use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::schedule::ScheduledTask;

pub mod endpoints;
pub use endpoints::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum Greeting {
    #[serde(rename = "Good morning")]
    Morning,
    #[serde(rename = "Good afternoon")]
    Afternoon,
    #[serde(rename = "Good evening")]
    Evening,
}

impl Greeting {
    pub fn at(hour: u32) -> Greeting {
        match hour {
            0..=11 => Greeting::Morning,
            12..=17 => Greeting::Afternoon,
            _ => Greeting::Evening,
        }
    }
}

/// The dashboard header: formatted time, long date and a greeting.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClockSnapshot {
    pub time: String,
    pub date: String,
    pub greeting: Greeting,
}

impl ClockSnapshot {
    pub fn at<Tz: TimeZone>(now: &DateTime<Tz>) -> ClockSnapshot
    where
        Tz::Offset: std::fmt::Display,
    {
        ClockSnapshot {
            time: now.format("%-I:%M %p").to_string(),
            date: now.format("%A, %B %-d, %Y").to_string(),
            greeting: Greeting::at(now.hour()),
        }
    }
}

/// The latest clock snapshot, shared between the refresh task and readers.
#[derive(Clone, Debug)]
pub struct Clock {
    snapshot: Arc<RwLock<ClockSnapshot>>,
}

impl Clock {
    pub fn new() -> Clock {
        Clock {
            snapshot: Arc::new(RwLock::new(ClockSnapshot::at(&Local::now()))),
        }
    }

    pub async fn snapshot(&self) -> ClockSnapshot {
        self.snapshot.read().await.clone()
    }

    pub async fn refresh(&self) {
        let snapshot = ClockSnapshot::at(&Local::now());
        debug!("clock refreshed to {}", snapshot.time);
        *self.snapshot.write().await = snapshot;
    }

    /// Refreshes the snapshot every `period` until the returned task is dropped.
    pub fn start(&self, period: Duration) -> ScheduledTask {
        let clock = self.clone();
        ScheduledTask::every(period, move || {
            let clock = clock.clone();
            async move { clock.refresh().await }
        })
    }
}

impl Default for Clock {
    fn default() -> Clock {
        Clock::new()
    }
}
