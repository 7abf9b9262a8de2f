//! Property tests for the referee loop over in-process agents.
//!
//! Properties tested:
//! - Replaying the move log reproduces the referee's final board
//! - Games between always-legal agents end by connection or draw, never forfeit
//! - An illegal answer never reaches the board or the move log

mod common;

use async_trait::async_trait;
use proptest::prelude::*;
use referee::domain::{has_four, replay, COLS};
use referee::{
    AgentTransport, Board, ForfeitReason, MatchOutcome, Referee, ScriptedAgent, Side,
    TransportError, WinReason,
};

/// Agent that always plays legally: it starts from its next preference and
/// rotates right until it finds a column with room.
struct PreferenceAgent {
    prefs: Vec<usize>,
    turn: usize,
}

#[async_trait]
impl AgentTransport for PreferenceAgent {
    async fn request_move(&mut self, board: &Board, _side: Side) -> Result<i64, TransportError> {
        let pref = self.prefs.get(self.turn).copied().unwrap_or(0);
        self.turn += 1;
        (0..COLS)
            .map(|offset| (pref + offset) % COLS)
            .find(|&c| board.is_legal(c))
            .map(|c| c as i64)
            .ok_or_else(|| TransportError::protocol("no legal column"))
    }

    fn describe(&self) -> String {
        "preference".to_string()
    }
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

proptest! {
    #![proptest_config(common::proptest_prelude::proptest_prelude_config())]

    /// Property: legal games replay exactly and never end in a forfeit
    #[test]
    fn prop_legal_games_replay_and_never_forfeit(
        prefs1 in prop::collection::vec(0..COLS, 21),
        prefs2 in prop::collection::vec(0..COLS, 21),
    ) {
        let mut a = PreferenceAgent { prefs: prefs1, turn: 0 };
        let mut b = PreferenceAgent { prefs: prefs2, turn: 0 };
        let report = block_on(Referee::default().play(&mut a, &mut b));

        prop_assert_eq!(replay(&report.moves), Ok(report.board));
        prop_assert!(!report.outcome.is_forfeit());
        match report.outcome {
            MatchOutcome::Win { winner, reason } => {
                prop_assert_eq!(reason, WinReason::Connected);
                prop_assert!(has_four(&report.board, winner));
                prop_assert_eq!(winner, Side::for_ply(report.moves.len() - 1));
            }
            MatchOutcome::Draw => {
                prop_assert!(report.board.is_full());
                prop_assert_eq!(report.moves.len(), 42);
            }
        }
    }

    /// Property: arbitrary answers (some off the board) never corrupt the log
    #[test]
    fn prop_illegal_answers_never_reach_the_board(
        cols1 in prop::collection::vec(-2i64..9, 21),
        cols2 in prop::collection::vec(-2i64..9, 21),
    ) {
        let mut a = ScriptedAgent::from_moves("a", cols1);
        let mut b = ScriptedAgent::from_moves("b", cols2);
        let report = block_on(Referee::default().play(&mut a, &mut b));

        prop_assert_eq!(replay(&report.moves), Ok(report.board));
        prop_assert_eq!(report.board.mark_count(), report.moves.len());
        prop_assert!(report.moves.iter().all(|&c| usize::from(c) < COLS));
        if let MatchOutcome::Win { winner, reason: WinReason::Forfeit(ForfeitReason::IllegalMove) } = report.outcome {
            // The offender is whoever was due to move next.
            prop_assert_eq!(winner.other(), Side::for_ply(report.moves.len()));
        }
    }
}
