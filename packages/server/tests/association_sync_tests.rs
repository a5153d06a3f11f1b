//! Integration tests for association sync against Postgres.
//!
//! Covers:
//! - replacing a content item's department set with a new one
//! - idempotent resubmission (no writes)
//! - clearing with an empty set
//! - isolation across taxonomy kinds and content items
//! - validation of unknown ids
//! - a failed write rolls back the whole sync
//! - clearing and deleting content drop its rows

mod common;

use std::collections::BTreeSet;

use crate::common::{
    create_test_blog_post, create_test_department, create_test_treatment, create_test_video, TestHarness,
};
use hospital_core::domains::associations::{ContentAssociation, SyncError};
use hospital_core::domains::content::{activities, ContentKind, ContentRef};
use hospital_core::domains::taxonomy::TaxonomyKind;
use test_context::test_context;
use uuid::Uuid;

fn set(ids: &[Uuid]) -> BTreeSet<Uuid> {
    ids.iter().copied().collect()
}

// =============================================================================
// Sync semantics
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn resubmitting_checkboxes_replaces_department_set(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let cardiology = create_test_department(pool, "Cardiology").await.unwrap().into_uuid();
    let ent = create_test_department(pool, "ENT").await.unwrap().into_uuid();
    let oncology = create_test_department(pool, "Oncology").await.unwrap().into_uuid();
    let post = ContentRef::from(create_test_blog_post(pool, "Heart health basics").await.unwrap());
    let sync = ctx.state().synchronizer;

    let first = sync
        .sync(post, TaxonomyKind::Department, [cardiology, ent])
        .await
        .unwrap();
    assert_eq!(first.added, 2);

    let second = sync
        .sync(post, TaxonomyKind::Department, [ent, oncology])
        .await
        .unwrap();
    assert_eq!(second.added, 1);
    assert_eq!(second.removed, 1);
    assert_eq!(second.unchanged, 1);

    let stored = ContentAssociation::taxonomy_ids(post, TaxonomyKind::Department, pool)
        .await
        .unwrap();
    assert_eq!(stored, set(&[ent, oncology]));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn identical_resubmission_writes_nothing(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let dept = create_test_department(pool, "Neurology").await.unwrap().into_uuid();
    let post = ContentRef::from(create_test_blog_post(pool, "Migraine triggers").await.unwrap());
    let sync = ctx.state().synchronizer;

    sync.sync(post, TaxonomyKind::Department, [dept]).await.unwrap();
    let before = ContentAssociation::find_for_content(post, pool).await.unwrap();

    let outcome = sync.sync(post, TaxonomyKind::Department, [dept]).await.unwrap();
    assert!(outcome.is_noop());

    // Untouched rows keep their original insert timestamp
    let after = ContentAssociation::find_for_content(post, pool).await.unwrap();
    assert_eq!(before.len(), 1);
    assert_eq!(before[0].created_at, after[0].created_at);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn empty_submission_clears_associations(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let dept = create_test_department(pool, "Urology").await.unwrap().into_uuid();
    let video = ContentRef::from(create_test_video(pool, "Kidney stone care").await.unwrap());
    let sync = ctx.state().synchronizer;

    sync.sync(video, TaxonomyKind::Department, [dept]).await.unwrap();
    let outcome = sync
        .sync(video, TaxonomyKind::Department, Vec::<Uuid>::new())
        .await
        .unwrap();

    assert_eq!(outcome.removed, 1);
    assert!(sync
        .associations(video, TaxonomyKind::Department)
        .await
        .unwrap()
        .is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn sync_touches_only_one_content_item_and_kind(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let dept_a = create_test_department(pool, "Pediatrics").await.unwrap().into_uuid();
    let dept_b = create_test_department(pool, "Dermatology").await.unwrap().into_uuid();
    let treatment = create_test_treatment(pool, "Vaccination").await.unwrap().into_uuid();
    let post = ContentRef::from(create_test_blog_post(pool, "Child vaccines").await.unwrap());
    let other_post = ContentRef::from(create_test_blog_post(pool, "Eczema myths").await.unwrap());
    // Same raw id space as the post, different content kind
    let video = ContentRef::new(ContentKind::Video, create_test_video(pool, "Clinic tour").await.unwrap().into_uuid());
    let sync = ctx.state().synchronizer;

    sync.sync(post, TaxonomyKind::Department, [dept_a]).await.unwrap();
    sync.sync(post, TaxonomyKind::Treatment, [treatment]).await.unwrap();
    sync.sync(other_post, TaxonomyKind::Department, [dept_a]).await.unwrap();
    sync.sync(video, TaxonomyKind::Department, [dept_a]).await.unwrap();

    sync.sync(post, TaxonomyKind::Department, [dept_b]).await.unwrap();

    assert_eq!(
        sync.associations(post, TaxonomyKind::Treatment).await.unwrap(),
        set(&[treatment])
    );
    assert_eq!(
        sync.associations(other_post, TaxonomyKind::Department).await.unwrap(),
        set(&[dept_a])
    );
    assert_eq!(
        sync.associations(video, TaxonomyKind::Department).await.unwrap(),
        set(&[dept_a])
    );

    let posts_for_a =
        ContentAssociation::find_content_ids_for_node(TaxonomyKind::Department, dept_a, ContentKind::BlogPost, pool)
            .await
            .unwrap();
    assert_eq!(posts_for_a, vec![other_post.id]);
}

// =============================================================================
// Validation
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn unknown_department_id_is_rejected_without_writes(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let dept = create_test_department(pool, "Gynecology").await.unwrap().into_uuid();
    let post = ContentRef::from(create_test_blog_post(pool, "Prenatal checkups").await.unwrap());
    let sync = ctx.state().synchronizer;
    sync.sync(post, TaxonomyKind::Department, [dept]).await.unwrap();

    let bogus = Uuid::now_v7();
    let err = sync
        .sync(post, TaxonomyKind::Department, [bogus])
        .await
        .unwrap_err();

    match err {
        SyncError::Validation { kind, unknown_ids } => {
            assert_eq!(kind, TaxonomyKind::Department);
            assert_eq!(unknown_ids, vec![bogus]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(
        sync.associations(post, TaxonomyKind::Department).await.unwrap(),
        set(&[dept])
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn treatment_id_is_not_a_department(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let treatment = create_test_treatment(pool, "Dialysis").await.unwrap().into_uuid();
    let post = ContentRef::from(create_test_blog_post(pool, "Living with CKD").await.unwrap());

    let err = ctx
        .state()
        .synchronizer
        .sync(post, TaxonomyKind::Department, [treatment])
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::Validation { .. }));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn syncing_missing_content_is_not_found(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let dept = create_test_department(pool, "Pulmonology").await.unwrap().into_uuid();
    let ghost = ContentRef::new(ContentKind::BlogPost, Uuid::now_v7());

    let err = ctx
        .state()
        .synchronizer
        .sync(ghost, TaxonomyKind::Department, [dept])
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::ContentNotFound(content) if content == ghost));
}

// =============================================================================
// Transactional apply
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn failed_insert_rolls_back_the_whole_sync(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let old = create_test_department(pool, "Hematology").await.unwrap().into_uuid();
    let new = create_test_department(pool, "Oncology").await.unwrap().into_uuid();
    let post = ContentRef::from(create_test_blog_post(pool, "Anemia explained").await.unwrap());
    let sync = ctx.state().synchronizer;
    sync.sync(post, TaxonomyKind::Department, [old]).await.unwrap();

    // Reject inserts for this post only; other tests share the table
    let guard = format!("reject_inserts_{}", post.id.simple());
    sqlx::raw_sql(&format!(
        r#"
        CREATE FUNCTION {guard}() RETURNS trigger AS $$
        BEGIN
            IF NEW.content_id = '{id}' THEN
                RAISE EXCEPTION 'association inserts disabled';
            END IF;
            RETURN NEW;
        END;
        $$ LANGUAGE plpgsql;
        CREATE TRIGGER {guard} BEFORE INSERT ON content_associations
            FOR EACH ROW EXECUTE FUNCTION {guard}();
        "#,
        id = post.id
    ))
    .execute(pool)
    .await
    .unwrap();

    let result = sync.sync(post, TaxonomyKind::Department, [new]).await;

    sqlx::raw_sql(&format!(
        "DROP TRIGGER {guard} ON content_associations; DROP FUNCTION {guard}();"
    ))
    .execute(pool)
    .await
    .unwrap();

    let err = result.unwrap_err();
    assert!(matches!(err, SyncError::Storage(_)), "expected storage error, got {err:?}");
    assert!(err.is_retryable());
    assert_eq!(
        ContentAssociation::taxonomy_ids(post, TaxonomyKind::Department, pool)
            .await
            .unwrap(),
        set(&[old])
    );

    // Once inserts work again the same submission goes through
    let outcome = sync.sync(post, TaxonomyKind::Department, [new]).await.unwrap();
    assert_eq!((outcome.added, outcome.removed), (1, 1));
}

// =============================================================================
// Clearing and content deletion
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn clear_removes_both_kinds_and_keeps_the_item(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let dept = create_test_department(pool, "Endocrinology").await.unwrap().into_uuid();
    let treatment = create_test_treatment(pool, "Insulin therapy").await.unwrap().into_uuid();
    let video = ContentRef::from(create_test_video(pool, "Managing diabetes").await.unwrap());
    let other = ContentRef::from(create_test_video(pool, "Thyroid basics").await.unwrap());
    let sync = ctx.state().synchronizer;

    sync.sync(video, TaxonomyKind::Department, [dept]).await.unwrap();
    sync.sync(video, TaxonomyKind::Treatment, [treatment]).await.unwrap();
    sync.sync(other, TaxonomyKind::Department, [dept]).await.unwrap();

    assert_eq!(sync.clear(video).await.unwrap(), 2);

    assert!(ContentAssociation::find_for_content(video, pool)
        .await
        .unwrap()
        .is_empty());
    assert!(video.exists(pool).await.unwrap());
    assert_eq!(
        sync.associations(other, TaxonomyKind::Department).await.unwrap(),
        set(&[dept])
    );
}


#[test_context(TestHarness)]
#[tokio::test]
async fn deleting_content_clears_its_associations(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let dept = create_test_department(pool, "Nephrology").await.unwrap().into_uuid();
    let treatment = create_test_treatment(pool, "Transplant").await.unwrap().into_uuid();
    let post_id = create_test_blog_post(pool, "Transplant journeys").await.unwrap();
    let post = ContentRef::from(post_id);
    let sync = ctx.state().synchronizer;

    sync.sync(post, TaxonomyKind::Department, [dept]).await.unwrap();
    sync.sync(post, TaxonomyKind::Treatment, [treatment]).await.unwrap();

    assert!(activities::delete_blog_post(post_id, pool).await.unwrap());

    assert!(ContentAssociation::find_for_content(post, pool)
        .await
        .unwrap()
        .is_empty());
    assert!(!activities::delete_blog_post(post_id, pool).await.unwrap());
}
