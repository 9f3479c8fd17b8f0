mod common;

use anyhow::Result;
use common::{delivery, match_row};
use ipl_terminal::dataset::RollingStatsRow;
use ipl_terminal::normalize::AliasMap;
use ipl_terminal::predict::{
    self, BatterContext, BatterFeatures, FormRunsModel, MatchContext, MatchFeatures, RunsModel,
    WinRateModel, WinnerModel,
};
use ipl_terminal::rolling;
use ipl_terminal::snapshot::Snapshot;

fn context_for(team1: &str, team2: &str) -> MatchContext {
    MatchContext {
        team1: Some(team1.to_string()),
        team2: Some(team2.to_string()),
        venue: Some("Wankhede Stadium".to_string()),
        toss_winner: Some(team1.to_string()),
        toss_decision: Some("bat".to_string()),
    }
}

#[test]
fn winner_label_is_passed_through_unmodified() {
    struct Fixed;
    impl WinnerModel for Fixed {
        fn predict(&self, _: &MatchFeatures) -> Result<String> {
            Ok("Chennai Super Kings".to_string())
        }
    }
    let out = predict::predict_winner(&Fixed, context_for("Mumbai Indians", "Chennai Super Kings"))
        .unwrap();
    assert_eq!(out, "Chennai Super Kings");
}

#[test]
fn incomplete_context_fails_before_model_invocation() {
    struct Counts(std::cell::Cell<usize>);
    impl WinnerModel for Counts {
        fn predict(&self, _: &MatchFeatures) -> Result<String> {
            self.0.set(self.0.get() + 1);
            Ok("X".to_string())
        }
    }
    let model = Counts(std::cell::Cell::new(0));
    let mut ctx = context_for("Mumbai Indians", "Chennai Super Kings");
    ctx.toss_winner = None;

    assert!(predict::predict_winner(&model, ctx).is_err());
    assert_eq!(model.0.get(), 0);
}

#[test]
fn win_rate_baseline_prefers_the_stronger_side() {
    let matches = vec![
        match_row(1, "2019", Some("Mumbai Indians")),
        match_row(2, "2020", Some("Mumbai Indians")),
        match_row(3, "2021", Some("Chennai Super Kings")),
    ];
    let snap = Snapshot::build(matches, Vec::new(), &AliasMap::default_ipl()).unwrap();
    let model = WinRateModel::from_snapshot(&snap);

    let out = predict::predict_winner(&model, context_for("Chennai Super Kings", "Mumbai Indians"))
        .unwrap();
    assert_eq!(out, "Mumbai Indians");
}

#[test]
fn win_rate_baseline_breaks_ties_with_the_toss() {
    let snap = Snapshot::build(Vec::new(), Vec::new(), &AliasMap::default_ipl()).unwrap();
    let model = WinRateModel::from_snapshot(&snap);

    let mut ctx = context_for("Mumbai Indians", "Chennai Super Kings");
    ctx.toss_winner = Some("Chennai Super Kings".to_string());
    let out = predict::predict_winner(&model, ctx).unwrap();
    assert_eq!(out, "Chennai Super Kings");
}

#[test]
fn derived_form_flows_into_runs_prediction() {
    let matches = vec![match_row(1, "2019", None), match_row(2, "2020", None)];
    let deliveries = vec![
        delivery(1, "V Kohli", "X", 30),
        delivery(2, "V Kohli", "X", 50),
    ];
    let snap = Snapshot::build(matches, deliveries, &AliasMap::default_ipl()).unwrap();
    let form = rolling::batter_form(&snap, "V Kohli");
    assert!(form.is_some());

    let out = predict::predict_batter_runs(
        &FormRunsModel,
        BatterContext {
            batter: Some("V Kohli".to_string()),
            opponent: Some("Chennai Super Kings".to_string()),
            venue: Some("Wankhede Stadium".to_string()),
            form,
        },
    )
    .unwrap();
    // Both windows average 40; the blend stays at 40, already one-decimal.
    assert!((out - 40.0).abs() < 1e-9);
}

#[test]
fn form_opponent_and_venue_are_sufficient_context() {
    // The batter's name is not part of the model schema; a context carrying
    // only trailing form, the opposing side and the venue must predict.
    let out = predict::predict_batter_runs(
        &FormRunsModel,
        BatterContext {
            batter: None,
            opponent: Some("Mumbai Indians".to_string()),
            venue: Some("Wankhede Stadium".to_string()),
            form: Some(rolling::RollingForm {
                avg_last_5: 45.0,
                avg_last_10: 35.0,
            }),
        },
    )
    .unwrap();
    assert!((out - 41.0).abs() < 1e-9);
}

#[test]
fn precomputed_form_table_flows_into_runs_prediction() {
    let rows = vec![RollingStatsRow {
        player_id: "RR Pant".to_string(),
        avg_last_5: 38.4,
        avg_last_10: 33.1,
    }];
    let index = rolling::form_index(&rows);

    let out = predict::predict_batter_runs(
        &FormRunsModel,
        BatterContext {
            batter: Some("RR Pant".to_string()),
            opponent: Some("Chennai Super Kings".to_string()),
            venue: Some("Wankhede Stadium".to_string()),
            form: index.get("RR Pant").copied(),
        },
    )
    .unwrap();
    // 0.6 * 38.4 + 0.4 * 33.1 = 36.28, rounded to one decimal.
    assert!((out - 36.3).abs() < 1e-9);
}

#[test]
fn rounding_happens_at_the_adapter_not_the_model() {
    struct Precise;
    impl RunsModel for Precise {
        fn predict(&self, _: &BatterFeatures) -> Result<f64> {
            Ok(33.333_333)
        }
    }
    let out = predict::predict_batter_runs(
        &Precise,
        BatterContext {
            batter: Some("A".to_string()),
            opponent: Some("B".to_string()),
            venue: Some("V".to_string()),
            form: Some(rolling::RollingForm {
                avg_last_5: 0.0,
                avg_last_10: 0.0,
            }),
        },
    )
    .unwrap();
    assert!((out - 33.3).abs() < 1e-9);
}
