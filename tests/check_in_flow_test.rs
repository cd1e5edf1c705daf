mod common;

use std::sync::Arc;

use chrono::NaiveDate;

use stride_core::checkins::{
    CheckInAnswer, CheckInError, CheckInRepository, CheckInRepositoryTrait, CheckInService,
    CheckInServiceTrait, CheckInSubmission,
};
use stride_core::goals::{
    GoalRepository, GoalRepositoryTrait, GoalService, GoalServiceTrait, GoalState, NewGoal,
};
use stride_core::sweep::{FixedClock, SweepService};
use stride_core::templates::{
    NewQuestion, NewTemplate, Template, TemplateRepository, TemplateService, TemplateServiceTrait,
    ASK_EVERY_CYCLE, RESPONSE_TYPE_TEXT,
};
use stride_core::users::{NewUser, UserRepository, UserService, UserServiceTrait};

struct Fixture {
    _db: common::TestDb,
    clock: Arc<FixedClock>,
    goal_repo: Arc<GoalRepository>,
    checkin_repo: Arc<CheckInRepository>,
    user_service: UserService<UserRepository>,
    template_service: TemplateService<TemplateRepository>,
    goal_service: GoalService<GoalRepository>,
    checkin_service: CheckInService<GoalRepository, TemplateRepository, CheckInRepository>,
    sweep_service: SweepService<GoalRepository, UserRepository>,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn fixture(today: NaiveDate) -> Fixture {
    let db = common::setup_test_db();
    let clock: Arc<FixedClock> = Arc::new(FixedClock::new(today));

    let user_repo = Arc::new(UserRepository::new(db.pool.clone()));
    let template_repo = Arc::new(TemplateRepository::new(db.pool.clone()));
    let goal_repo = Arc::new(GoalRepository::new(db.pool.clone()));
    let checkin_repo = Arc::new(CheckInRepository::new(db.pool.clone()));

    Fixture {
        clock: clock.clone(),
        goal_repo: goal_repo.clone(),
        checkin_repo: checkin_repo.clone(),
        user_service: UserService::new(user_repo.clone(), clock.clone()),
        template_service: TemplateService::new(template_repo.clone()),
        goal_service: GoalService::new(goal_repo.clone(), clock.clone()),
        checkin_service: CheckInService::new(
            goal_repo.clone(),
            template_repo,
            checkin_repo.clone(),
            clock.clone(),
        ),
        sweep_service: SweepService::new(goal_repo, user_repo, clock),
        _db: db,
    }
}

/// Seeds a user with a two-question template and returns (user_id, template).
fn seed_user_and_template(f: &Fixture, username: &str) -> (String, Template) {
    let user = f
        .user_service
        .create_user(NewUser {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            pw_hash: "hash".to_string(),
            pw_salt: "salt".to_string(),
        })
        .unwrap();

    let template = f
        .template_service
        .create_template(
            &user.id,
            NewTemplate {
                name: "Weekly run".to_string(),
                questions: vec![
                    NewQuestion {
                        text: "How many kilometers?".to_string(),
                        response_type: RESPONSE_TYPE_TEXT.to_string(),
                        check_in_num: ASK_EVERY_CYCLE,
                    },
                    NewQuestion {
                        text: "How do you feel?".to_string(),
                        response_type: RESPONSE_TYPE_TEXT.to_string(),
                        check_in_num: ASK_EVERY_CYCLE,
                    },
                ],
            },
        )
        .unwrap();

    (user.id, template)
}

fn seed_goal(f: &Fixture, user_id: &str, template_id: &str, period: i32) -> stride_core::goals::Goal {
    f.goal_service
        .create_goal(
            user_id,
            NewGoal {
                goal_name: "Run weekly".to_string(),
                template_id: template_id.to_string(),
                check_in_period: period,
                is_public: false,
                group_id: None,
            },
        )
        .unwrap()
}

fn all_answers(f: &Fixture, user_id: &str, goal_id: &str) -> Vec<CheckInAnswer> {
    f.checkin_service
        .get_check_in_questions(user_id, goal_id)
        .unwrap()
        .into_iter()
        .map(|q| CheckInAnswer {
            question_id: q.id,
            text: "5k, felt great".to_string(),
        })
        .collect()
}

#[test]
fn full_cycle_create_sweep_check_in() {
    // Goal created on day D with a 7-day period.
    let f = fixture(date(2024, 3, 1));
    let (user_id, template) = seed_user_and_template(&f, "ayla");
    let goal = seed_goal(&f, &user_id, &template.id, 7);

    assert_eq!(goal.next_check_in, date(2024, 3, 8));
    assert!(!goal.can_check_in);

    // Sweep on D+6: not yet due.
    f.clock.set_today(date(2024, 3, 7));
    f.sweep_service.run();
    assert!(!f.goal_repo.get_by_id(&goal.id).unwrap().can_check_in);

    // Sweep on D+7: due, and visible in the due list.
    f.clock.set_today(date(2024, 3, 8));
    f.sweep_service.run();
    let due = f.goal_service.list_due_goals(&user_id).unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].state(), GoalState::ActiveDue);

    // Check-in on D+7 completes cycle 1 and schedules D+14.
    let answers = all_answers(&f, &user_id, &goal.id);
    let updated = f
        .checkin_service
        .submit_check_in(
            &user_id,
            CheckInSubmission {
                goal_id: goal.id.clone(),
                answers,
            },
        )
        .unwrap();

    assert_eq!(updated.check_in_num, 1);
    assert_eq!(updated.next_check_in, date(2024, 3, 15));
    assert!(!updated.can_check_in);

    let responses = f.checkin_service.get_responses(&user_id, &goal.id).unwrap();
    assert_eq!(responses.len(), 2);
    assert!(responses.iter().all(|r| r.check_in_number == 1));
}

#[test]
fn sweep_is_idempotent_within_a_day() {
    let f = fixture(date(2024, 3, 1));
    let (user_id, template) = seed_user_and_template(&f, "ayla");
    let goal = seed_goal(&f, &user_id, &template.id, 7);

    f.clock.set_today(date(2024, 3, 8));
    f.sweep_service.run();
    let first = f.goal_repo.get_by_id(&goal.id).unwrap();
    f.sweep_service.run();
    let second = f.goal_repo.get_by_id(&goal.id).unwrap();

    assert_eq!(first, second);
    assert!(second.can_check_in);
}

#[test]
fn pause_excludes_goal_until_unpause_rederives() {
    let f = fixture(date(2024, 3, 1));
    let (user_id, template) = seed_user_and_template(&f, "ayla");
    let goal = seed_goal(&f, &user_id, &template.id, 7);

    // Paused on D+3, before it is due.
    f.clock.set_today(date(2024, 3, 4));
    f.goal_service.set_paused(&user_id, &goal.id, true).unwrap();

    // Sweep on D+7 leaves it excluded.
    f.clock.set_today(date(2024, 3, 8));
    f.sweep_service.run();
    let paused = f.goal_repo.get_by_id(&goal.id).unwrap();
    assert_eq!(paused.state(), GoalState::Paused);
    assert!(!paused.can_check_in);

    // Unpaused on D+10: immediately due, without waiting for a sweep.
    f.clock.set_today(date(2024, 3, 11));
    let resumed = f
        .goal_service
        .set_paused(&user_id, &goal.id, false)
        .unwrap();
    assert_eq!(resumed.state(), GoalState::ActiveDue);
}

#[test]
fn invalid_question_id_writes_nothing() {
    let f = fixture(date(2024, 3, 1));
    let (user_id, template) = seed_user_and_template(&f, "ayla");
    let goal = seed_goal(&f, &user_id, &template.id, 7);

    f.clock.set_today(date(2024, 3, 8));
    f.sweep_service.run();

    let mut answers = all_answers(&f, &user_id, &goal.id);
    answers.push(CheckInAnswer {
        question_id: "not-a-question".to_string(),
        text: "oops".to_string(),
    });

    let result = f.checkin_service.submit_check_in(
        &user_id,
        CheckInSubmission {
            goal_id: goal.id.clone(),
            answers,
        },
    );
    assert!(matches!(result, Err(CheckInError::InvalidData(_))));

    let responses = f.checkin_service.get_responses(&user_id, &goal.id).unwrap();
    assert!(responses.is_empty());
    let unchanged = f.goal_repo.get_by_id(&goal.id).unwrap();
    assert_eq!(unchanged.check_in_num, 0);
    assert!(unchanged.can_check_in);
}

#[test]
fn concurrent_cycle_advance_is_guarded_in_the_transaction() {
    let f = fixture(date(2024, 3, 1));
    let (user_id, template) = seed_user_and_template(&f, "ayla");
    let goal = seed_goal(&f, &user_id, &template.id, 7);

    f.clock.set_today(date(2024, 3, 8));
    f.sweep_service.run();

    let answers = all_answers(&f, &user_id, &goal.id);
    f.checkin_service
        .submit_check_in(
            &user_id,
            CheckInSubmission {
                goal_id: goal.id.clone(),
                answers,
            },
        )
        .unwrap();

    // A stale second submission for the same cycle rolls back.
    let result = f
        .checkin_repo
        .record_check_in(&goal.id, 1, date(2024, 3, 15), vec![]);
    assert!(matches!(result, Err(CheckInError::Conflict(_))));
    assert_eq!(f.goal_repo.get_by_id(&goal.id).unwrap().check_in_num, 1);
}

#[test]
fn check_in_against_non_due_goal_is_rejected() {
    let f = fixture(date(2024, 3, 1));
    let (user_id, template) = seed_user_and_template(&f, "ayla");
    let goal = seed_goal(&f, &user_id, &template.id, 7);

    // No sweep has run; the goal is still waiting.
    let questions = f
        .checkin_service
        .get_check_in_questions(&user_id, &goal.id)
        .unwrap();
    let result = f.checkin_service.submit_check_in(
        &user_id,
        CheckInSubmission {
            goal_id: goal.id.clone(),
            answers: vec![CheckInAnswer {
                question_id: questions[0].id.clone(),
                text: "too early".to_string(),
            }],
        },
    );
    assert!(matches!(result, Err(CheckInError::Conflict(_))));
}

#[test]
fn achieved_goal_no_longer_accepts_check_ins() {
    let f = fixture(date(2024, 3, 1));
    let (user_id, template) = seed_user_and_template(&f, "ayla");
    let goal = seed_goal(&f, &user_id, &template.id, 7);

    f.clock.set_today(date(2024, 3, 8));
    f.sweep_service.run();
    f.goal_service.achieve_goal(&user_id, &goal.id).unwrap();

    let result = f.checkin_service.submit_check_in(
        &user_id,
        CheckInSubmission {
            goal_id: goal.id.clone(),
            answers: vec![],
        },
    );
    assert!(matches!(result, Err(CheckInError::Conflict(_))));

    // And later sweeps never resurrect it.
    f.clock.set_today(date(2024, 6, 1));
    f.sweep_service.run();
    assert_eq!(
        f.goal_repo.get_by_id(&goal.id).unwrap().state(),
        GoalState::Achieved
    );
}

#[test]
fn deleting_a_goal_cascades_to_its_responses() {
    let f = fixture(date(2024, 3, 1));
    let (user_id, template) = seed_user_and_template(&f, "ayla");
    let goal = seed_goal(&f, &user_id, &template.id, 7);

    f.clock.set_today(date(2024, 3, 8));
    f.sweep_service.run();
    let answers = all_answers(&f, &user_id, &goal.id);
    f.checkin_service
        .submit_check_in(
            &user_id,
            CheckInSubmission {
                goal_id: goal.id.clone(),
                answers,
            },
        )
        .unwrap();

    f.goal_service.delete_goal(&user_id, &goal.id).unwrap();
    assert!(f.goal_repo.get_by_id(&goal.id).is_err());
    assert!(f
        .checkin_repo
        .load_responses(&goal.id)
        .unwrap()
        .is_empty());
}
