use holdem_engine::agents::{
    decide, AgentTable, BotAgent, BotProfile, Difficulty, PlayerAgent,
};
use holdem_engine::config::TableConfig;
use holdem_engine::game::{Game, PlayerStatus, RoundError};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn mk_game(n: usize, seed: u64) -> Game {
    let cfg = TableConfig::default().with_players(n).with_human_seat(None).with_seed(seed);
    Game::new(cfg).unwrap()
}

#[test]
fn non_bot_seat_noop() {
    let mut g = mk_game(3, 1);
    g.start_new_round().unwrap();
    let cur = g.current().unwrap();
    let other = (cur + 1) % g.players().len();
    let mut bot = BotAgent::new(BotProfile::default());
    assert!(!bot.on_turn(&mut g, other).unwrap());
    assert_eq!(g.current(), Some(cur), "current should not advance for another seat");
    assert_eq!(g.history().len(), 2, "only the blinds are recorded");
}

#[test]
fn bot_acts_when_current_is_bot() {
    let mut g = mk_game(3, 1);
    g.start_new_round().unwrap();
    let cur = g.current().unwrap();
    let mut bot = BotAgent::new(BotProfile::default().with_seed(2));
    assert!(bot.on_turn(&mut g, cur).unwrap());
    assert_eq!(g.history().len(), 3);
    assert_eq!(g.history()[2].seat, cur);
    assert_ne!(g.current(), Some(cur), "turn should advance after bot acts");
}

#[test]
fn decisions_are_always_legal() {
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let profile = BotProfile::for_difficulty(difficulty);
        let mut rng = StdRng::seed_from_u64(99);
        let mut g = mk_game(6, 7);
        for _ in 0..15 {
            if g.start_new_round().is_err() {
                break;
            }
            while let Some(seat) = g.current().filter(|_| g.stage().is_betting()) {
                let snap = g.snapshot();
                let d = decide(&snap, seat, &profile, &mut rng);
                assert!(
                    snap.legal_actions(seat).contains(&d.action),
                    "{difficulty}: {:?} not legal at {}",
                    d.action,
                    snap.stage
                );
                g.try_action(d.action, d.amount).unwrap();
            }
        }
    }
}

fn play_session(seed: u64) -> (Vec<u64>, usize) {
    let mut g = mk_game(5, seed);
    let mut table = AgentTable::with_bots(5, None, &BotProfile::default(), Some(seed));
    let mut rounds = 0;
    for _ in 0..40 {
        match g.start_new_round() {
            Ok(_) => {}
            Err(RoundError::NotEnoughPlayers(_)) => break,
            Err(e) => panic!("{e}"),
        }
        table.run_until_blocked(&mut g, 1_000).unwrap();
        assert!(g.snapshot().round_over());
        assert_eq!(g.chips_in_play(), 5_000);
        rounds += 1;
    }
    (g.players().iter().map(|p| p.chips()).collect(), rounds)
}

#[test]
fn bot_only_session_conserves_chips() {
    let (stacks, rounds) = play_session(31);
    assert!(rounds > 0);
    assert_eq!(stacks.iter().sum::<u64>(), 5_000);
}

#[test]
fn seeded_sessions_replay_exactly() {
    assert_eq!(play_session(12), play_session(12));
}

#[test]
fn busted_bots_are_skipped() {
    let mut g = mk_game(3, 3);
    let mut table = AgentTable::with_bots(3, None, &BotProfile::default(), Some(3));
    for _ in 0..200 {
        if g.start_new_round().is_err() {
            break;
        }
        for (seat, p) in g.players().iter().enumerate() {
            if p.chips() == 0 && p.bet() == 0 {
                assert_eq!(p.status(), PlayerStatus::Folded);
                assert_ne!(g.current(), Some(seat));
            }
        }
        table.run_until_blocked(&mut g, 1_000).unwrap();
    }
}
