use holdem_engine::config::TableConfig;
use holdem_engine::game::{Action, Game, Stage};

fn mk_game(n: usize) -> Game {
    Game::new(TableConfig::default().with_players(n).with_human_seat(None).with_seed(5)).unwrap()
}

fn fold_to_blind(g: &mut Game) {
    while g.stage().is_betting() {
        g.try_action(Action::Fold, 0).unwrap();
    }
}

#[test]
fn dealer_button_moves_one_seat_per_round() {
    let mut g = mk_game(4);
    let mut dealers = Vec::new();
    for _ in 0..4 {
        g.start_new_round().unwrap();
        dealers.push(g.dealer());
        fold_to_blind(&mut g);
    }
    assert_eq!(dealers, vec![1, 2, 3, 0]);
}

#[test]
fn blinds_follow_the_button_and_utg_opens() {
    let mut g = mk_game(5);
    g.start_new_round().unwrap();
    assert_eq!(g.dealer(), 1);
    assert_eq!(g.sb_pos(), Some(2));
    assert_eq!(g.bb_pos(), Some(3));
    assert_eq!(g.players()[2].bet(), 5);
    assert_eq!(g.players()[3].bet(), 10);
    assert_eq!(g.current_bet(), 10);
    assert_eq!(g.current(), Some(4));
}

#[test]
fn preflop_limps_close_after_big_blind_checks() {
    let mut g = mk_game(5);
    g.start_new_round().unwrap();
    for _ in 0..4 {
        g.try_action(Action::Call, 0).unwrap();
    }
    assert_eq!(g.stage(), Stage::Preflop);
    assert_eq!(g.current(), g.bb_pos());
    g.try_action(Action::Check, 0).unwrap();
    assert_eq!(g.stage(), Stage::Flop);
    assert_eq!(g.board().len(), 3);
    assert_eq!(g.pot(), 50);
}

#[test]
fn raise_round_ends_when_everyone_matches() {
    let mut g = mk_game(5);
    g.start_new_round().unwrap();
    g.try_action(Action::Raise, 20).unwrap();
    assert_eq!(g.current_bet(), 20);
    for _ in 0..4 {
        g.try_action(Action::Call, 0).unwrap();
    }
    assert_eq!(g.stage(), Stage::Flop);
    assert_eq!(g.pot(), 100);
}

#[test]
fn postflop_action_starts_left_of_dealer() {
    let mut g = mk_game(5);
    g.start_new_round().unwrap();
    for _ in 0..4 {
        g.try_action(Action::Call, 0).unwrap();
    }
    g.try_action(Action::Check, 0).unwrap();
    assert_eq!(g.stage(), Stage::Flop);
    assert_eq!(g.current(), Some(2));
}

#[test]
fn postflop_skips_folded_seats() {
    let mut g = mk_game(5);
    g.start_new_round().unwrap();
    // seat 4 calls, 0 calls, dealer calls, small blind folds, big blind checks
    g.try_action(Action::Call, 0).unwrap();
    g.try_action(Action::Call, 0).unwrap();
    g.try_action(Action::Call, 0).unwrap();
    g.try_action(Action::Fold, 0).unwrap();
    g.try_action(Action::Check, 0).unwrap();
    assert_eq!(g.stage(), Stage::Flop);
    assert_eq!(g.current(), Some(3));
}

#[test]
fn heads_up_order() {
    let mut g = mk_game(2);
    g.start_new_round().unwrap();
    let dealer = g.dealer();
    let other = (dealer + 1) % 2;
    assert_eq!(g.sb_pos(), Some(other));
    assert_eq!(g.bb_pos(), Some(dealer));
    assert_eq!(g.current(), Some(other));

    g.try_action(Action::Call, 0).unwrap();
    assert_eq!(g.current(), Some(dealer));
    g.try_action(Action::Check, 0).unwrap();
    assert_eq!(g.stage(), Stage::Flop);
    assert_eq!(g.current(), Some(other));
}
