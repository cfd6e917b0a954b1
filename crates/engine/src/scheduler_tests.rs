// SPDX-License-Identifier: MIT

use super::*;
use crate::job_slice::JobSlice;
use chrono::{Duration, Utc};
use fc_core::clock::FakeClock;
use fc_core::job::{Job, JobStatus, NewJob};

fn job_with(status: JobStatus, time: chrono::DateTime<Utc>) -> Job {
    let new: NewJob = NewJob::builder().status(status).build();
    let now = Utc::now();
    Job {
        id: fc_core::JobId::from_raw(1),
        plugin_id: new.plugin_id,
        agent_host: new.agent_host,
        status: new.status,
        time,
        config: new.config,
        bucket_name: new.bucket_name,
        info: new.info,
        reconn_attempts: new.reconn_attempts,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

#[tokio::test]
async fn a_due_scheduled_job_is_sent_on_the_channel() {
    let clock = FakeClock::new(Utc::now());
    let jobs = JobSlice::from_jobs(vec![job_with(JobStatus::Scheduled, clock.now() - Duration::seconds(1))]);
    let (tx, mut rx) = mpsc::channel(1);
    let cancel = CancellationToken::new();

    tick_once(&jobs, &clock, &tx, &cancel).await.unwrap();

    let ready = rx.try_recv().expect("a ready job was sent");
    assert_eq!(ready.guard.id, fc_core::JobId::from_raw(1));
}

#[tokio::test]
async fn a_job_scheduled_in_the_future_is_not_sent() {
    let clock = FakeClock::new(Utc::now());
    let jobs = JobSlice::from_jobs(vec![job_with(JobStatus::Scheduled, clock.now() + Duration::seconds(60))]);
    let (tx, mut rx) = mpsc::channel(1);
    let cancel = CancellationToken::new();

    tick_once(&jobs, &clock, &tx, &cancel).await.unwrap();

    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn a_non_scheduled_job_is_never_sent_even_if_due() {
    let clock = FakeClock::new(Utc::now());
    let jobs = JobSlice::from_jobs(vec![job_with(JobStatus::Running, clock.now() - Duration::seconds(1))]);
    let (tx, mut rx) = mpsc::channel(1);
    let cancel = CancellationToken::new();

    tick_once(&jobs, &clock, &tx, &cancel).await.unwrap();

    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn releasing_the_guard_without_sending_leaves_the_job_lockable() {
    let clock = FakeClock::new(Utc::now());
    let jobs = JobSlice::from_jobs(vec![job_with(JobStatus::Running, clock.now() - Duration::seconds(1))]);
    let (tx, _rx) = mpsc::channel(1);
    let cancel = CancellationToken::new();

    tick_once(&jobs, &clock, &tx, &cancel).await.unwrap();

    let cells = jobs.snapshot_cells();
    let guard = tokio::time::timeout(std::time::Duration::from_millis(50), cells[0].lock())
        .await
        .expect("lock was released after the tick, not held past it");
    drop(guard);
}

#[tokio::test]
async fn cancellation_during_send_stops_the_tick_cleanly() {
    let clock = FakeClock::new(Utc::now());
    let jobs = JobSlice::from_jobs(vec![job_with(JobStatus::Scheduled, clock.now() - Duration::seconds(1))]);
    let (tx, _rx) = mpsc::channel(1);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = tick_once(&jobs, &clock, &tx, &cancel).await;
    assert!(result.is_ok());
}
