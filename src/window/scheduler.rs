//! Daily rotation timer
//!
//! One background thread sleeps until the next fire time, runs the job, and
//! repeats. Fire times are computed in a fixed UTC offset, independent of the
//! host's local zone. Fires missed while the process was down are not
//! replayed.

use chrono::{DateTime, Duration as ChronoDuration, FixedOffset, NaiveTime, TimeZone, Utc};
use crossbeam::channel::{self, RecvTimeoutError, Sender};
use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Wall-clock time of day at which rotation fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationSchedule {
    pub time: NaiveTime,
    pub utc_offset: FixedOffset,
}

impl RotationSchedule {
    #[must_use]
    pub const fn new(time: NaiveTime, utc_offset: FixedOffset) -> Self {
        Self { time, utc_offset }
    }

    /// First fire strictly after `now`
    #[must_use]
    pub fn next_fire_after(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let local_date = now.with_timezone(&self.utc_offset).date_naive();
        let local_fire = local_date.and_time(self.time);
        let offset = ChronoDuration::seconds(i64::from(self.utc_offset.local_minus_utc()));
        let fire = Utc.from_utc_datetime(&(local_fire - offset));

        if fire > now {
            fire
        } else {
            fire + ChronoDuration::days(1)
        }
    }

    /// How long to wait from `now` until the next fire
    #[must_use]
    pub fn delay_from(&self, now: DateTime<Utc>) -> Duration {
        (self.next_fire_after(now) - now)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}

enum Command {
    Shutdown,
}

/// Handle to the running timer thread
///
/// Dropping the handle stops the thread.
pub struct RotationScheduler {
    tx: Sender<Command>,
    thread: Option<JoinHandle<()>>,
}

impl RotationScheduler {
    /// Start firing `job` once per day on `schedule`
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the thread cannot be spawned.
    pub fn start<F>(schedule: RotationSchedule, job: F) -> std::io::Result<Self>
    where
        F: FnMut() + Send + 'static,
    {
        Self::start_with_clock(schedule, Utc::now, job)
    }

    /// Same as [`start`](Self::start), reading the time from `clock`
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the thread cannot be spawned.
    pub fn start_with_clock<C, F>(
        schedule: RotationSchedule,
        clock: C,
        job: F,
    ) -> std::io::Result<Self>
    where
        C: Fn() -> DateTime<Utc> + Send + 'static,
        F: FnMut() + Send + 'static,
    {
        let (tx, rx) = channel::bounded(1);
        let thread = thread::Builder::new()
            .name("puzzle-rotation".to_string())
            .spawn(move || run_schedule_loop(schedule, &clock, job, &rx))?;

        tracing::info!(
            time = %schedule.time,
            utc_offset = %schedule.utc_offset,
            "rotation scheduler started"
        );
        Ok(Self {
            tx,
            thread: Some(thread),
        })
    }

    /// Stop the timer and wait for the thread to exit
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let _ = self.tx.send(Command::Shutdown);
        if let Some(thread) = self.thread.take()
            && thread.join().is_err()
        {
            tracing::error!("rotation scheduler thread panicked");
        }
    }
}

impl Drop for RotationScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_schedule_loop<C, F>(
    schedule: RotationSchedule,
    clock: &C,
    mut job: F,
    rx: &channel::Receiver<Command>,
) where
    C: Fn() -> DateTime<Utc>,
    F: FnMut(),
{
    loop {
        let now = clock();
        let delay = schedule.delay_from(now);
        tracing::debug!(
            next_fire = %schedule.next_fire_after(now),
            delay_secs = delay.as_secs(),
            "waiting for next rotation"
        );

        match rx.recv_timeout(delay) {
            Err(RecvTimeoutError::Timeout) => {
                tracing::info!("scheduled rotation triggered");
                if panic::catch_unwind(AssertUnwindSafe(&mut job)).is_err() {
                    tracing::error!("rotation job panicked; will retry at next fire");
                }
            }
            Ok(Command::Shutdown) | Err(RecvTimeoutError::Disconnected) => {
                tracing::info!("rotation scheduler stopped");
                return;
            }
        }
    }
}
