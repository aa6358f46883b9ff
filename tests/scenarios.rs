//! End-to-end scheduling scenarios.

use chrono::{NaiveDate, NaiveDateTime};
use court_schedule::models::{Participant, Setting, Team, Tournament, TournamentDay};
use court_schedule::problem::{build, TournamentScheduler};
use court_schedule::solver::SolveOutcome;
use court_schedule::TournamentBuilder;

fn p(id: u32) -> Participant {
    Participant::new(id, format!("P{id}"))
}

fn settings(courts: u32, start_hour: u32, end_hour: u32) -> Setting {
    Setting::new(
        60,
        30,
        courts,
        vec![TournamentDay::new("2024-05-04", start_hour, end_hour).unwrap()],
    )
    .unwrap()
}

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 4)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn minutes_between(a: NaiveDateTime, b: NaiveDateTime) -> i64 {
    (a - b).num_minutes().abs()
}

#[test]
fn single_match_on_single_court() {
    let t = TournamentBuilder::new(settings(1, 9, 20))
        .with_category(
            "mens_single",
            vec![
                Team::single("mens_single", p(1)),
                Team::single("mens_single", p(2)),
            ],
        )
        .build()
        .unwrap();

    let solutions = TournamentScheduler::new(&t).solve().unwrap();
    assert_eq!(solutions.len(), 1);

    let fixtures = &solutions[0].fixtures;
    assert_eq!(fixtures.len(), 1);
    assert_eq!(fixtures[0].court, 0);
    assert_eq!(fixtures[0].slot, at(9, 0));
    assert_eq!(fixtures[0].title, "P1 vs P2");
}

#[test]
fn final_waits_for_both_semifinals() {
    // Eight participants as four doubles teams: two opening matches and a final.
    let t = TournamentBuilder::new(settings(1, 9, 20))
        .with_subscriptions(
            "mens_double",
            (0..4).map(|i| vec![p(2 * i + 1), p(2 * i + 2)]).collect(),
        )
        .build()
        .unwrap();
    assert_eq!(t.playable_matches().len(), 3);

    let group = t.group("mens_double").unwrap();
    let final_id = group.future[0];
    assert_eq!(t.get_match(final_id).unwrap().round, 1);

    let solutions = TournamentScheduler::new(&t).solve().unwrap();
    assert!(!solutions.is_empty());

    let s = &solutions[0];
    let final_slot = s.fixture_for_match(final_id).unwrap().slot;
    for &semi in &group.initial {
        let semi_slot = s.fixture_for_match(semi).unwrap().slot;
        assert!(final_slot > semi_slot);
        assert!(minutes_between(final_slot, semi_slot) >= 90);
    }
    assert!(s.is_valid(&t));
}

#[test]
fn too_short_day_yields_no_solution() {
    // 09:00-09:00 offers a single start time on a single court.
    let t = TournamentBuilder::new(settings(1, 9, 9))
        .with_category(
            "mens_single",
            vec![
                Team::single("mens_single", p(1)),
                Team::single("mens_single", p(2)),
            ],
        )
        .with_category(
            "womens_single",
            vec![
                Team::single("womens_single", p(3)),
                Team::single("womens_single", p(4)),
            ],
        )
        .build()
        .unwrap();

    let (solutions, stats) = TournamentScheduler::new(&t)
        .with_max_solutions(10)
        .solve_with_statistics()
        .unwrap();
    assert!(solutions.is_empty());
    assert_eq!(stats.outcome, SolveOutcome::Exhausted);
}

#[test]
fn cross_category_player_gets_rest() {
    let t = TournamentBuilder::new(settings(2, 9, 20))
        .with_category(
            "mixed_single",
            vec![
                Team::single("mixed_single", p(1)),
                Team::single("mixed_single", p(2)),
            ],
        )
        .with_category(
            "mens_single",
            vec![
                Team::single("mens_single", p(1)),
                Team::single("mens_single", p(3)),
            ],
        )
        .build()
        .unwrap();
    assert_eq!(t.multi_tournament_participants(), vec![p(1)]);

    let solutions = TournamentScheduler::new(&t).with_max_solutions(20).solve().unwrap();
    assert_eq!(solutions.len(), 20);
    for s in &solutions {
        let slots: Vec<NaiveDateTime> = s.fixtures.iter().map(|f| f.slot).collect();
        assert_eq!(slots.len(), 2);
        assert!(minutes_between(slots[0], slots[1]) >= 90);
        assert!(s.is_valid(&t));
    }
}

fn club_tournament() -> Tournament {
    // P1 and P2 also play mixed doubles; P9 plays women's singles and mixed.
    let mens = (1..=8).map(|i| Team::single("mens_single", p(i))).collect();
    let womens = (9..=12).map(|i| Team::single("womens_single", p(i))).collect();
    let mixed = vec![
        Team::double("mixed_double", p(1), p(9)),
        Team::double("mixed_double", p(2), p(13)),
        Team::double("mixed_double", p(14), p(15)),
    ];
    TournamentBuilder::new(settings(2, 9, 20))
        .with_category("mens_single", mens)
        .with_category("womens_single", womens)
        .with_category("mixed_double", mixed)
        .with_draw_seed(2024)
        .build()
        .unwrap()
}

#[test]
fn club_tournament_solutions_are_valid() {
    let t = club_tournament();
    // 7 + 3 + 2 playable (the mixed bye is not scheduled)
    assert_eq!(t.playable_matches().len(), 12);
    // The men's final sits on six earlier matches
    let mens_final = *t.group("mens_single").unwrap().future.last().unwrap();
    assert_eq!(t.get_match(mens_final).unwrap().round, 3);

    let (solutions, stats) = TournamentScheduler::new(&t)
        .with_max_solutions(3)
        .solve_with_statistics()
        .unwrap();
    assert_eq!(solutions.len(), 3);
    assert_eq!(stats.solutions, 3);
    assert!(stats.nodes >= 12);

    let offered = t.settings().timeslots();
    for s in &solutions {
        assert_eq!(s.len(), 12);
        assert!(s.violations(&t).is_empty(), "{:?}", s.violations(&t));
        for f in &s.fixtures {
            assert!(offered.contains(&f.timeslot()));
        }
        assert!(s.fixtures.windows(2).all(|w| w[0].slot <= w[1].slot));
    }
}

#[test]
fn solver_is_deterministic() {
    let first = TournamentScheduler::new(&club_tournament())
        .with_max_solutions(2)
        .solve()
        .unwrap();
    let second = TournamentScheduler::new(&club_tournament())
        .with_max_solutions(2)
        .solve()
        .unwrap();
    let fixtures = |s: &Vec<court_schedule::models::Solution>| -> Vec<_> {
        s.iter().map(|x| x.fixtures.clone()).collect()
    };
    assert_eq!(fixtures(&first), fixtures(&second));
}

#[test]
fn built_solver_respects_solution_cap() {
    let t = club_tournament();
    let mut solver = build(&t).unwrap();
    solver.set_max_solutions(0);
    assert_eq!(solver.solve().len(), 1);
    assert_eq!(solver.statistics().outcome, SolveOutcome::SolutionLimit);
}
