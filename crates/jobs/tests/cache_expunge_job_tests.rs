use iterdns_application::use_cases::ExpungeExpiredRecordsUseCase;
use iterdns_jobs::CacheExpungeJob;
use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tokio_util::sync::CancellationToken;

mod helpers;
use helpers::MockRecordCache;

fn make_job(cache: Arc<MockRecordCache>) -> CacheExpungeJob {
    CacheExpungeJob::new(Arc::new(ExpungeExpiredRecordsUseCase::new(cache)))
}

#[tokio::test]
async fn test_expunge_runs_immediately_on_start() {
    let cache = Arc::new(MockRecordCache::with_expired(3));
    let job = Arc::new(make_job(cache.clone()).with_interval(3600));

    job.start().await;
    sleep(Duration::from_millis(50)).await;

    assert_eq!(cache.expunge_calls(), 1);
}

#[tokio::test]
async fn test_expunge_fires_on_interval() {
    let cache = Arc::new(MockRecordCache::new());
    let job = Arc::new(make_job(cache.clone()).with_interval(1));

    job.start().await;
    sleep(Duration::from_millis(1100)).await;

    assert!(
        cache.expunge_calls() >= 2,
        "Expunge should have run at start and after one interval"
    );
}

#[tokio::test]
async fn test_expunge_error_is_non_fatal() {
    let cache = Arc::new(MockRecordCache::new());
    cache.set_should_fail(true).await;
    let job = Arc::new(make_job(cache.clone()).with_interval(1));

    job.start().await;
    sleep(Duration::from_millis(1100)).await;

    assert!(
        cache.expunge_calls() >= 2,
        "Job should keep running after a failed expunge"
    );
}

#[tokio::test]
async fn test_expunge_stops_on_cancellation() {
    let cache = Arc::new(MockRecordCache::new());
    let token = CancellationToken::new();
    let job = Arc::new(
        make_job(cache.clone())
            .with_interval(1)
            .with_cancellation(token.clone()),
    );

    job.start().await;
    sleep(Duration::from_millis(50)).await;
    token.cancel();
    sleep(Duration::from_millis(50)).await;

    let calls_at_cancel = cache.expunge_calls();
    sleep(Duration::from_millis(1100)).await;

    assert_eq!(calls_at_cancel, 1);
    assert_eq!(cache.expunge_calls(), calls_at_cancel);
}

#[tokio::test]
async fn test_use_case_reports_removed_count() {
    let cache = Arc::new(MockRecordCache::with_expired(7));
    let use_case = ExpungeExpiredRecordsUseCase::new(cache.clone());

    assert_eq!(use_case.execute().await.unwrap(), 7);
    assert_eq!(use_case.execute().await.unwrap(), 0);
}
