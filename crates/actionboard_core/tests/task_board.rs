use actionboard_core::{
    InsightBundle, MemoryTaskStore, Scope, ScopeError, StoreError, StoreResult, SynthesisConfig,
    Task, TaskBoardService, TaskError, TaskStatus, TaskStore, TaskSynthesizer, ThemeMetrics,
};
use uuid::Uuid;

fn scope() -> Scope {
    Scope::new("biz-42", "2024-Q3").unwrap()
}

fn service_with(config: SynthesisConfig) -> TaskBoardService<MemoryTaskStore> {
    TaskBoardService::new(MemoryTaskStore::new(), TaskSynthesizer::new(config).unwrap())
}

fn service() -> TaskBoardService<MemoryTaskStore> {
    service_with(SynthesisConfig::default())
}

fn insights(recommendations: &[&str], improve: &[&str]) -> InsightBundle {
    InsightBundle {
        recommendations: recommendations.iter().map(|value| value.to_string()).collect(),
        improve: improve.iter().map(|value| value.to_string()).collect(),
    }
}

fn seeded(service: &mut TaskBoardService<MemoryTaskStore>, scope: &Scope) -> Vec<Task> {
    service
        .refresh(
            scope,
            &insights(
                &["Add a second host during weekend brunch"],
                &["Cleanliness needs attention (-0.15) with declining trend."],
            ),
            &ThemeMetrics::new(),
        )
        .unwrap()
}

#[test]
fn refresh_persists_merged_set() {
    let mut service = service();
    let scope = scope();

    let tasks = seeded(&mut service, &scope);
    assert_eq!(tasks.len(), 2);
    assert_eq!(service.list_tasks(&scope).unwrap(), tasks);
}

#[test]
fn four_advances_return_to_start_and_each_step_is_persisted() {
    let mut service = service();
    let scope = scope();
    let task_id = seeded(&mut service, &scope)[0].id;

    let expected = [
        TaskStatus::InProgress,
        TaskStatus::InReview,
        TaskStatus::Done,
        TaskStatus::Backlog,
    ];
    for status in expected {
        let updated = service.advance_status(&scope, task_id).unwrap();
        assert_eq!(updated.status, status);
        assert_eq!(service.get_task(&scope, task_id).unwrap().status, status);
    }
}

#[test]
fn progress_adjustments_clamp() {
    let mut service = service();
    let scope = scope();
    let task_id = seeded(&mut service, &scope)[0].id;

    assert_eq!(service.adjust_progress(&scope, task_id, -1000).unwrap().progress, 0);
    assert_eq!(service.adjust_progress(&scope, task_id, 1000).unwrap().progress, 100);
    assert_eq!(service.adjust_progress(&scope, task_id, -30).unwrap().progress, 70);
    assert_eq!(service.get_task(&scope, task_id).unwrap().progress, 70);
}

#[test]
fn set_status_jumps_directly() {
    let mut service = service();
    let scope = scope();
    let task_id = seeded(&mut service, &scope)[1].id;

    let done = service.set_status(&scope, task_id, TaskStatus::Done).unwrap();
    assert_eq!(done.status, TaskStatus::Done);
    let back = service
        .set_status(&scope, task_id, TaskStatus::InProgress)
        .unwrap();
    assert_eq!(back.status, TaskStatus::InProgress);
}

#[test]
fn unknown_task_returns_not_found_without_writing() {
    let mut service = service();
    let scope = scope();
    let before = seeded(&mut service, &scope);
    let missing = Uuid::new_v4();

    let err = service.advance_status(&scope, missing).unwrap_err();
    assert!(matches!(err, TaskError::NotFound(id) if id == missing));
    let err = service.adjust_progress(&scope, missing, 10).unwrap_err();
    assert!(matches!(err, TaskError::NotFound(_)));
    assert!(matches!(
        service.get_task(&scope, missing),
        Err(TaskError::NotFound(_))
    ));

    assert_eq!(service.list_tasks(&scope).unwrap(), before);
}

#[test]
fn refresh_preserves_user_edits() {
    let mut service = service();
    let scope = scope();
    let first = seeded(&mut service, &scope);
    let task_id = first[0].id;

    service.set_status(&scope, task_id, TaskStatus::InReview).unwrap();
    service.adjust_progress(&scope, task_id, 60).unwrap();

    let refreshed = seeded(&mut service, &scope);
    assert_eq!(refreshed[0].id, task_id);
    assert_eq!(refreshed[0].status, TaskStatus::InReview);
    assert_eq!(refreshed[0].progress, 60);
    assert_eq!(refreshed[0].created_at, first[0].created_at);
    assert_eq!(refreshed[1].id, first[1].id);
}

#[test]
fn scopes_do_not_share_tasks() {
    let mut service = service();
    let q3 = scope();
    let q4 = Scope::new("biz-42", "2024-Q4").unwrap();
    let task_id = seeded(&mut service, &q3)[0].id;

    assert!(service.list_tasks(&q4).unwrap().is_empty());
    assert!(matches!(
        service.advance_status(&q4, task_id),
        Err(TaskError::NotFound(_))
    ));
}

#[test]
fn into_store_hands_back_every_scope_written() {
    let mut service = service();
    let q3 = scope();
    let q4 = Scope::new("biz-42", "2024-Q4").unwrap();
    let tasks = seeded(&mut service, &q3);
    seeded(&mut service, &q4);
    assert_eq!(service.store().scope_count(), 2);

    let store = service.into_store();
    assert_eq!(store.scope_count(), 2);
    assert_eq!(store.load(&q3).unwrap(), tasks);
}

#[test]
fn superseded_tasks_drop_by_default() {
    let mut service = service();
    let scope = scope();
    seeded(&mut service, &scope);

    let next = service
        .refresh(
            &scope,
            &insights(&["Add a second host during weekend brunch"], &[]),
            &ThemeMetrics::new(),
        )
        .unwrap();
    assert_eq!(next.len(), 1);
    assert_eq!(service.list_tasks(&scope).unwrap(), next);
}

#[test]
fn superseded_tasks_can_be_retained_in_store() {
    let mut service = service_with(SynthesisConfig {
        retain_superseded: true,
        ..SynthesisConfig::default()
    });
    let scope = scope();
    let first = seeded(&mut service, &scope);

    let next = service
        .refresh(
            &scope,
            &insights(&["Add a second host during weekend brunch"], &[]),
            &ThemeMetrics::new(),
        )
        .unwrap();
    assert_eq!(next.len(), 1);

    let persisted = service.list_tasks(&scope).unwrap();
    assert_eq!(persisted.len(), 2);
    assert_eq!(persisted[0].id, first[0].id);
    assert_eq!(persisted[1].id, first[1].id);
}

#[test]
fn summary_reflects_persisted_state() {
    let mut service = service();
    let scope = scope();
    let tasks = seeded(&mut service, &scope);
    service.set_status(&scope, tasks[1].id, TaskStatus::Done).unwrap();
    service.adjust_progress(&scope, tasks[0].id, 50).unwrap();

    let summary = service.summary(&scope).unwrap();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.backlog, 1);
    assert_eq!(summary.done, 1);
    assert_eq!(summary.average_progress, 25);
    assert_eq!(summary.open_high_impact, 0);
}

#[test]
fn borrowed_store_keeps_state_after_service_drops() {
    let mut store = MemoryTaskStore::new();
    let scope = scope();
    {
        let mut service = TaskBoardService::new(
            &mut store,
            TaskSynthesizer::new(SynthesisConfig::default()).unwrap(),
        );
        service
            .refresh(
                &scope,
                &insights(&["Play quieter music in the evening"], &[]),
                &ThemeMetrics::new(),
            )
            .unwrap();
    }
    assert_eq!(store.load(&scope).unwrap().len(), 1);
}

#[test]
fn blank_scope_is_invalid_input() {
    let err = Scope::new("", "2024-Q3").map_err(TaskError::from).unwrap_err();
    assert!(matches!(
        err,
        TaskError::InvalidInput(ScopeError::BlankBusinessId)
    ));
}

struct FailingSaveStore;

impl TaskStore for FailingSaveStore {
    fn load(&self, _scope: &Scope) -> StoreResult<Vec<Task>> {
        Ok(Vec::new())
    }

    fn save(&mut self, _scope: &Scope, _tasks: &[Task]) -> StoreResult<()> {
        Err(StoreError::InvalidData("disk full".to_string()))
    }
}

#[test]
fn store_failures_propagate_unchanged() {
    let mut service = TaskBoardService::new(
        FailingSaveStore,
        TaskSynthesizer::new(SynthesisConfig::default()).unwrap(),
    );
    let err = service
        .refresh(&scope(), &insights(&["Repaint the front door"], &[]), &ThemeMetrics::new())
        .unwrap_err();
    match err {
        TaskError::Store(StoreError::InvalidData(message)) => assert_eq!(message, "disk full"),
        other => panic!("unexpected error: {other}"),
    }
}
