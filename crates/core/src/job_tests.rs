use super::*;
use chrono::Duration;
use yare::parameterized;

fn make_job(status: JobStatus, reconn_attempts: u32) -> Job {
    let new = NewJob::builder()
        .status(status)
        .reconn_attempts(reconn_attempts)
        .build();
    Job {
        id: JobId::from_raw(1),
        plugin_id: new.plugin_id,
        agent_host: new.agent_host,
        status: new.status,
        time: new.time,
        config: new.config,
        bucket_name: new.bucket_name,
        info: new.info,
        reconn_attempts: new.reconn_attempts,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        deleted_at: None,
    }
}

#[test]
fn ready_when_scheduled_and_time_elapsed() {
    let now = Utc::now();
    let mut job = make_job(JobStatus::Scheduled, 0);
    job.time = now - Duration::seconds(1);
    assert!(job.is_ready(now));
}

#[test]
fn not_ready_when_time_in_future() {
    let now = Utc::now();
    let mut job = make_job(JobStatus::Scheduled, 0);
    job.time = now + Duration::seconds(60);
    assert!(!job.is_ready(now));
}

#[parameterized(
    below_cap = { 5, false, JobStatus::Scheduled },
    at_cap_boundary = { 8, false, JobStatus::Scheduled },
    reaches_cap = { 9, true, JobStatus::Failed },
)]
fn reconn_attempts_cap_at_ten(start: u32, expect_failed: bool, expect_status: JobStatus) {
    let mut job = make_job(JobStatus::Scheduled, start);
    let now = Utc::now();
    let failed = job.record_unavailable(now);
    assert_eq!(failed, expect_failed);
    assert_eq!(job.status, expect_status);
    if !expect_failed {
        assert_eq!(job.reconn_attempts, start + 1);
    }
}

#[test]
fn nine_further_ticks_after_first_failure_reaches_failed() {
    let mut job = make_job(JobStatus::Scheduled, 0);
    let now = Utc::now();
    for _ in 0..10 {
        let failed = job.record_unavailable(now);
        if job.reconn_attempts < MAX_RECONN_ATTEMPTS {
            assert!(!failed);
        }
    }
    assert_eq!(job.status, JobStatus::Failed);
}

#[test]
fn append_info_prefixes_newline() {
    let mut job = make_job(JobStatus::Running, 0);
    job.info = "first".to_string();
    job.append_info("second");
    assert_eq!(job.info, "first\nsecond");
}

#[test]
fn storage_invariants_reject_zero_plugin_id() {
    let mut job = make_job(JobStatus::Scheduled, 0);
    job.plugin_id = PluginId::from_raw(0);
    job.bucket_name = "drlm-x".to_string();
    assert!(!job.upholds_storage_invariants());
}

#[test]
fn storage_invariants_reject_bad_bucket_prefix() {
    let mut job = make_job(JobStatus::Scheduled, 0);
    job.bucket_name = "other-bucket".to_string();
    assert!(!job.upholds_storage_invariants());
}

#[test]
fn storage_invariants_hold_for_well_formed_job() {
    let mut job = make_job(JobStatus::Scheduled, 0);
    job.bucket_name = "drlm-agent-1-name".to_string();
    assert!(job.upholds_storage_invariants());
}

#[test]
fn dispatch_success_transitions_to_running() {
    let mut job = make_job(JobStatus::Scheduled, 0);
    job.record_dispatched(Utc::now());
    assert_eq!(job.status, JobStatus::Running);
}

#[test]
fn start_failure_records_error_and_fails() {
    let mut job = make_job(JobStatus::Scheduled, 0);
    job.record_start_failure("boom", Utc::now());
    assert_eq!(job.status, JobStatus::Failed);
    assert!(job.info.contains("boom"));
}
