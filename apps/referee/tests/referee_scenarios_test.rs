mod common;

use std::time::{Duration, Instant};

use referee::domain::{render, replay};
use referee::{
    run_match, run_match_blocking, AgentEndpoint, AgentHandle, ForfeitReason, MatchOutcome,
    MatchRecord, Referee, RefereeConfig, ScriptedAgent, Side, TransportError,
};

use crate::common::{quick_config, OVERHEAD};

#[tokio::test]
async fn horizontal_race_is_won_by_side_two() {
    // Side one wastes moves stacking column 6; side two lays a floor row.
    let mut a = ScriptedAgent::from_moves("a", [6, 6, 6, 5]);
    let mut b = ScriptedAgent::from_moves("b", [0, 1, 2, 3]);
    let report = Referee::default().play(&mut a, &mut b).await;

    assert_eq!(report.outcome, MatchOutcome::connected(Side::Two));
    assert_eq!(report.moves, vec![6, 0, 6, 1, 6, 2, 5, 3]);
    assert_eq!(replay(&report.moves).unwrap(), report.board);
}

#[tokio::test]
async fn diagonal_win_is_detected() {
    // Builds a rising diagonal for side one at (5,0) (4,1) (3,2) (2,3).
    let mut a = ScriptedAgent::from_moves("a", [0, 1, 2, 3, 2, 3]);
    let mut b = ScriptedAgent::from_moves("b", [1, 2, 3, 3, 6, 6]);
    let report = Referee::default().play(&mut a, &mut b).await;

    assert_eq!(report.outcome, MatchOutcome::connected(Side::One));
    assert_eq!(report.moves.len(), 11);
    let picture = render(&report.board);
    assert!(picture.ends_with("0 1 2 3 4 5 6\n"), "{picture}");
}

#[tokio::test]
async fn second_mover_forfeits_on_protocol_error() {
    let mut a = ScriptedAgent::repeating("a", 3);
    let mut b = ScriptedAgent::failing("b", TransportError::protocol("garbage"));
    let report = Referee::default().play(&mut a, &mut b).await;

    assert_eq!(
        report.outcome,
        MatchOutcome::forfeit(Side::Two, ForfeitReason::ProtocolError)
    );
    assert_eq!(report.moves, vec![3]);
}

#[tokio::test]
async fn stalled_second_mover_forfeits_within_watchdog() {
    let config = quick_config();
    let mut a = ScriptedAgent::repeating("a", 3);
    let mut b = ScriptedAgent::repeating("b", 0).stalling(Duration::from_secs(30));

    let started = Instant::now();
    let report = Referee::new(config.clone()).play(&mut a, &mut b).await;

    assert_eq!(
        report.outcome,
        MatchOutcome::forfeit(Side::Two, ForfeitReason::Timeout)
    );
    assert!(started.elapsed() < config.watchdog() + OVERHEAD);
}

#[tokio::test]
async fn record_names_the_winner_and_keeps_the_log() {
    let mut a = ScriptedAgent::repeating("a", 3);
    let mut b = ScriptedAgent::repeating("b", 0);
    let report = Referee::default().play(&mut a, &mut b).await;

    let record = MatchRecord::from_report("alpha", "beta", &report);
    assert_eq!(record.winner.as_deref(), Some("alpha"));
    assert_eq!(record.move_log, vec![3, 0, 3, 0, 3, 0, 3]);

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["participant1"], "alpha");
    assert_eq!(json["moveLog"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn unspawnable_agent_forfeits_with_crash() {
    let missing = AgentHandle::new(
        "ghost",
        AgentEndpoint::parse("/nonexistent/agent-binary --fast").unwrap(),
    );
    let other = AgentHandle::new(
        "ghost-too",
        AgentEndpoint::parse("/nonexistent/other-binary").unwrap(),
    );
    let report = run_match(&missing, &other, &quick_config()).await.unwrap();

    assert_eq!(
        report.outcome,
        MatchOutcome::forfeit(Side::One, ForfeitReason::Crash)
    );
    assert!(report.moves.is_empty());
}

#[test]
fn blocking_entry_point_runs_without_a_runtime() {
    let first = AgentHandle::new("a", AgentEndpoint::parse("/nonexistent/a").unwrap());
    let second = AgentHandle::new("b", AgentEndpoint::parse("/nonexistent/b").unwrap());
    let report = run_match_blocking(&first, &second, &quick_config()).unwrap();
    assert!(report.outcome.is_forfeit());
}

#[tokio::test]
async fn invalid_config_is_rejected_before_any_agent_starts() {
    let first = AgentHandle::new("a", AgentEndpoint::parse("/nonexistent/a").unwrap());
    let second = AgentHandle::new("b", AgentEndpoint::parse("/nonexistent/b").unwrap());
    let config = RefereeConfig {
        max_plies: 0,
        ..RefereeConfig::default()
    };
    assert!(run_match(&first, &second, &config).await.is_err());
}
