mod common;

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveTime};

use stride_core::goals::{GoalRepository, GoalRepositoryTrait, GoalService, GoalServiceTrait, NewGoal};
use stride_core::sweep::{FixedClock, SweepService};
use stride_core::templates::{
    NewQuestion, NewTemplate, TemplateRepository, TemplateService, TemplateServiceTrait,
    ASK_EVERY_CYCLE, RESPONSE_TYPE_TEXT,
};
use stride_core::users::{User, UserRepository, UserRepositoryTrait, UserService, UserServiceTrait};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn reaper_removes_only_stale_unverified_accounts_and_cascades() {
    let db = common::setup_test_db();
    let today = date(2024, 3, 10);
    let clock: Arc<FixedClock> = Arc::new(FixedClock::new(today));

    let user_repo = Arc::new(UserRepository::new(db.pool.clone()));
    let template_repo = Arc::new(TemplateRepository::new(db.pool.clone()));
    let goal_repo = Arc::new(GoalRepository::new(db.pool.clone()));

    let user_service = UserService::new(user_repo.clone(), clock.clone());
    let template_service = TemplateService::new(template_repo.clone());
    let goal_service = GoalService::new(goal_repo.clone(), clock.clone());
    let sweep_service = SweepService::new(goal_repo.clone(), user_repo.clone(), clock.clone());

    let midnight = |d: NaiveDate| d.and_time(NaiveTime::MIN);

    // A verified long-time user: never reaped.
    let veteran = user_repo
        .insert_new_user(User {
            id: "veteran".to_string(),
            username: "veteran".to_string(),
            email: "veteran@example.com".to_string(),
            pw_hash: "hash".to_string(),
            pw_salt: "salt".to_string(),
            is_verified: true,
            created_at: midnight(today - Duration::days(30)),
        })
        .unwrap();

    // An unverified signup from 6 days ago: past the retention window.
    let stale = user_repo
        .insert_new_user(User {
            id: "stale".to_string(),
            username: "stale".to_string(),
            email: "stale@example.com".to_string(),
            pw_hash: "hash".to_string(),
            pw_salt: "salt".to_string(),
            is_verified: false,
            created_at: midnight(today - Duration::days(6)),
        })
        .unwrap();

    // A fresh unverified signup from today: still within the window.
    let fresh = user_service
        .create_user(stride_core::users::NewUser {
            username: "fresh".to_string(),
            email: "fresh@example.com".to_string(),
            pw_hash: "hash".to_string(),
            pw_salt: "salt".to_string(),
        })
        .unwrap();

    // The stale user owns a template and a goal that must cascade away.
    let template = template_service
        .create_template(
            &stale.id,
            NewTemplate {
                name: "Doomed".to_string(),
                questions: vec![NewQuestion {
                    text: "Progress?".to_string(),
                    response_type: RESPONSE_TYPE_TEXT.to_string(),
                    check_in_num: ASK_EVERY_CYCLE,
                }],
            },
        )
        .unwrap();
    let goal = goal_service
        .create_goal(
            &stale.id,
            NewGoal {
                goal_name: "Doomed goal".to_string(),
                template_id: template.id.clone(),
                check_in_period: 7,
                is_public: false,
                group_id: None,
            },
        )
        .unwrap();

    let outcome = sweep_service.run();
    assert_eq!(outcome.accounts_reaped, 1);

    assert!(user_repo.get_by_id(&stale.id).is_err());
    assert!(user_repo.get_by_id(&veteran.id).is_ok());
    assert!(user_repo.get_by_id(&fresh.id).is_ok());

    // The stale user's goal went with the account.
    assert!(goal_repo.get_by_id(&goal.id).is_err());

    // Running the sweep again finds nothing left to reap.
    let outcome = sweep_service.run();
    assert_eq!(outcome.accounts_reaped, 0);
}

#[test]
fn verified_accounts_survive_indefinitely() {
    let db = common::setup_test_db();
    let today = date(2024, 3, 10);
    let clock: Arc<FixedClock> = Arc::new(FixedClock::new(today));

    let user_repo = Arc::new(UserRepository::new(db.pool.clone()));
    let goal_repo = Arc::new(GoalRepository::new(db.pool.clone()));
    let sweep_service = SweepService::new(goal_repo, user_repo.clone(), clock.clone());

    let user = user_repo
        .insert_new_user(User {
            id: "old-unverified".to_string(),
            username: "old".to_string(),
            email: "old@example.com".to_string(),
            pw_hash: "hash".to_string(),
            pw_salt: "salt".to_string(),
            is_verified: false,
            created_at: date(2024, 1, 1).and_time(NaiveTime::MIN),
        })
        .unwrap();

    // Verification at the last minute saves the account.
    user_repo.mark_verified(&user.id).unwrap();
    let outcome = sweep_service.run();

    assert_eq!(outcome.accounts_reaped, 0);
    assert!(user_repo.get_by_id(&user.id).is_ok());
}
