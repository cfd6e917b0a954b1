// SPDX-License-Identifier: MIT

use super::*;
use chrono::Utc;
use fc_core::job::NewJob;

fn job(id: i64) -> Job {
    let new: NewJob = NewJob::builder().build();
    let now = Utc::now();
    Job {
        id: fc_core::JobId::from_raw(id),
        plugin_id: new.plugin_id,
        agent_host: new.agent_host,
        status: new.status,
        time: new.time,
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
async fn starts_empty() {
    let slice = JobSlice::new();
    assert!(slice.is_empty());
    assert!(slice.list().await.is_empty());
}

#[tokio::test]
async fn from_jobs_seeds_the_slice_and_append_grows_it() {
    let slice = JobSlice::from_jobs(vec![job(1), job(2)]);
    assert_eq!(slice.len(), 2);

    slice.append(job(3));
    assert_eq!(slice.len(), 3);

    let listed = slice.list().await;
    let mut ids: Vec<i64> = listed.iter().map(|j| j.id.get()).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn snapshot_cells_share_identity_with_the_stored_job() {
    let slice = JobSlice::from_jobs(vec![job(1)]);
    let cells = slice.snapshot_cells();
    assert_eq!(cells.len(), 1);
    {
        let mut guard = cells[0].lock().await;
        guard.reconn_attempts = 5;
    }
    let listed = slice.list().await;
    assert_eq!(listed[0].reconn_attempts, 5);
}
