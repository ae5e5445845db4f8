use crate::cards::DealtCard;
use crate::config::{ConfigError, ShowdownRule, TableConfig};
use crate::deck::{Deck, DeckError};
use crate::evaluator::{evaluate_holdem, Evaluation};
use crate::hand::{Board, HoleCards};
use crate::snapshot::{GameSnapshot, PlayerView};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlayerStatus {
    Active,
    Folded,
    AllIn,
}

/// Round lifecycle. `Waiting` is both the state before the first round and
/// the state after a pot was won without a showdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Stage {
    Waiting,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Stage {
    /// A street is being bet.
    pub const fn is_betting(self) -> bool {
        matches!(self, Stage::Preflop | Stage::Flop | Stage::Turn | Stage::River)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Stage::Waiting => "waiting",
            Stage::Preflop => "preflop",
            Stage::Flop => "flop",
            Stage::Turn => "turn",
            Stage::River => "river",
            Stage::Showdown => "showdown",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Fold => "fold",
            Action::Check => "check",
            Action::Call => "call",
            Action::Bet => "bet",
            Action::Raise => "raise",
        })
    }
}

impl FromStr for Action {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fold" | "f" => Ok(Action::Fold),
            "check" | "x" => Ok(Action::Check),
            "call" | "c" => Ok(Action::Call),
            "bet" | "b" => Ok(Action::Bet),
            "raise" | "r" => Ok(Action::Raise),
            _ => Err(ActionError::Unknown(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandHistoryVerb {
    SmallBlind,
    BigBlind,
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    Win,
    Split,
}

impl HandHistoryVerb {
    pub fn label(self) -> &'static str {
        match self {
            HandHistoryVerb::SmallBlind => "SB",
            HandHistoryVerb::BigBlind => "BB",
            HandHistoryVerb::Fold => "Fold",
            HandHistoryVerb::Check => "Check",
            HandHistoryVerb::Call => "Call",
            HandHistoryVerb::Bet => "Bet",
            HandHistoryVerb::Raise => "Raise",
            HandHistoryVerb::Win => "Win",
            HandHistoryVerb::Split => "Split",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct HandHistoryEntry {
    pub seat: usize,
    pub verb: HandHistoryVerb,
    pub amount: Option<u64>,
    pub stage: Stage,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("no round in progress")]
    NoRoundInProgress,
    #[error("cannot check facing a bet of {to_call}")]
    CheckFacingBet { to_call: u64 },
    #[error("nothing to call")]
    NothingToCall,
    #[error("bet and raise need a positive amount")]
    InvalidAmount,
    #[error("unknown action: '{0}'")]
    Unknown(String),
    #[error(transparent)]
    Deck(#[from] DeckError),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoundError {
    #[error("need at least 2 players with chips, have {0}")]
    NotEnoughPlayers(usize),
    #[error(transparent)]
    Deck(#[from] DeckError),
}

#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Player {
    pub(crate) name: String,
    pub(crate) is_human: bool,
    pub(crate) chips: u64,
    pub(crate) hole_cards: Vec<DealtCard>,
    pub(crate) bet: u64,
    pub(crate) contributed: u64,
    pub(crate) status: PlayerStatus,
    pub(crate) acted: bool,
    pub(crate) hand: Option<Evaluation>,
}

impl Player {
    fn new(name: String, is_human: bool, chips: u64) -> Self {
        Self {
            name,
            is_human,
            chips,
            hole_cards: Vec::with_capacity(2),
            bet: 0,
            contributed: 0,
            status: PlayerStatus::Active,
            acted: false,
            hand: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_human(&self) -> bool {
        self.is_human
    }

    pub fn chips(&self) -> u64 {
        self.chips
    }

    /// Chips put in during the current street.
    pub fn bet(&self) -> u64 {
        self.bet
    }

    /// Chips put in during the whole round.
    pub fn contributed(&self) -> u64 {
        self.contributed
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn hole_cards(&self) -> &[DealtCard] {
        &self.hole_cards
    }

    pub fn hole(&self) -> Option<HoleCards> {
        match self.hole_cards.as_slice() {
            [a, b] => HoleCards::try_new(a.card, b.card).ok(),
            _ => None,
        }
    }

    /// Showdown result, if this player reached one.
    pub fn hand(&self) -> Option<&Evaluation> {
        self.hand.as_ref()
    }

    fn can_act(&self) -> bool {
        self.status == PlayerStatus::Active && self.chips > 0
    }

    fn in_hand(&self) -> bool {
        self.status != PlayerStatus::Folded
    }

    /// Move up to `amount` chips from the stack into the current bet.
    fn commit(&mut self, amount: u64) -> u64 {
        let pay = self.chips.min(amount);
        self.chips -= pay;
        self.bet += pay;
        self.contributed += pay;
        if self.chips == 0 {
            self.status = PlayerStatus::AllIn;
        }
        pay
    }

    fn reset_for_round(&mut self) {
        self.hole_cards.clear();
        self.bet = 0;
        self.contributed = 0;
        self.acted = false;
        self.hand = None;
        // busted players sit the round out
        self.status = if self.chips == 0 { PlayerStatus::Folded } else { PlayerStatus::Active };
    }

    fn view(&self) -> PlayerView {
        PlayerView {
            name: self.name.clone(),
            is_human: self.is_human,
            chips: self.chips,
            hole_cards: self.hole_cards.clone(),
            bet: self.bet,
            folded: self.status == PlayerStatus::Folded,
            all_in: self.status == PlayerStatus::AllIn,
            acted: self.acted,
            hand_rank: self.hand.map(|h| h.category()),
            hand_description: self.hand.map(|h| h.description()),
        }
    }
}

/// The table: seats, chip stacks, and the round being played.
///
/// ```
/// use holdem_engine::config::TableConfig;
/// use holdem_engine::game::{Action, Game, Stage};
///
/// let mut game = Game::new(TableConfig::default().with_seed(1)).unwrap();
/// let snap = game.start_new_round().unwrap();
/// assert_eq!(snap.stage, Stage::Preflop);
/// assert_eq!(snap.dealer, 1);
///
/// // everyone but the big blind folds
/// for _ in 0..3 {
///     game.player_action(Action::Fold, 0);
/// }
/// assert_eq!(game.stage(), Stage::Waiting);
/// ```
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Game {
    pub(crate) config: TableConfig,
    pub(crate) players: Vec<Player>,
    pub(crate) deck: Deck,
    rng: ChaCha8Rng,
    pub(crate) board: Board,
    /// Chips collected from finished streets.
    pub(crate) pot: u64,
    pub(crate) current_bet: u64,
    pub(crate) dealer: usize,
    pub(crate) current: Option<usize>,
    pub(crate) stage: Stage,
    pub(crate) sb_pos: Option<usize>,
    pub(crate) bb_pos: Option<usize>,
    /// Winners of the last completed round, in seat order.
    pub(crate) winners: Vec<usize>,
    history: Vec<HandHistoryEntry>,
}

impl Game {
    pub fn new(config: TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let players = (0..config.players)
            .map(|i| {
                Player::new(config.player_name(i), config.human_seat == Some(i), config.starting_chips)
            })
            .collect();
        Ok(Self {
            config,
            players,
            deck: Deck::standard(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            board: Board::default(),
            pot: 0,
            current_bet: 0,
            dealer: 0,
            current: None,
            stage: Stage::Waiting,
            sb_pos: None,
            bb_pos: None,
            winners: Vec::new(),
            history: Vec::new(),
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn pot(&self) -> u64 {
        self.pot
    }

    pub fn current_bet(&self) -> u64 {
        self.current_bet
    }

    pub fn dealer(&self) -> usize {
        self.dealer
    }

    /// Seat to act, `None` when nobody can.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn sb_pos(&self) -> Option<usize> {
        self.sb_pos
    }

    pub fn bb_pos(&self) -> Option<usize> {
        self.bb_pos
    }

    pub fn winners(&self) -> &[usize] {
        &self.winners
    }

    pub fn history(&self) -> &[HandHistoryEntry] {
        &self.history
    }

    /// Every chip at the table: stacks, street bets and the pot.
    pub fn chips_in_play(&self) -> u64 {
        self.pot + self.players.iter().map(|p| p.chips + p.bet).sum::<u64>()
    }

    pub fn to_call(&self, seat: usize) -> u64 {
        self.players.get(seat).map_or(0, |p| self.current_bet.saturating_sub(p.bet))
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            players: self.players.iter().map(Player::view).collect(),
            community: self.board.as_slice().to_vec(),
            pot: self.pot,
            current_bet: self.current_bet,
            stage: self.stage,
            current: self.current,
            dealer: self.dealer,
            small_blind: self.config.small_blind,
            big_blind: self.config.big_blind,
            winners: self.winners.clone(),
        }
    }

    /// Shuffle, rotate the button, post blinds and deal hole cards.
    ///
    /// A round still in progress is abandoned first and every
    /// contribution is returned to its owner.
    pub fn start_new_round(&mut self) -> Result<GameSnapshot, RoundError> {
        if self.stage.is_betting() {
            warn!(stage = %self.stage, "abandoning round in progress");
            self.refund_contributions();
        }
        let funded = self.players.iter().filter(|p| p.chips > 0).count();
        if funded < 2 {
            return Err(RoundError::NotEnoughPlayers(funded));
        }
        let backup = self.clone();
        if let Err(e) = self.deal_round() {
            *self = backup;
            return Err(e.into());
        }
        Ok(self.snapshot())
    }

    fn deal_round(&mut self) -> Result<(), DeckError> {
        self.deck.reset();
        self.deck.shuffle_with(&mut self.rng);
        self.board.clear();
        self.pot = 0;
        self.current_bet = 0;
        self.winners.clear();
        self.history.clear();
        for p in &mut self.players {
            p.reset_for_round();
        }

        self.dealer = self.next_funded_from(self.dealer);
        let sb = self.next_funded_from(self.dealer);
        let bb = self.next_funded_from(sb);
        self.sb_pos = Some(sb);
        self.bb_pos = Some(bb);
        self.stage = Stage::Preflop;
        info!(dealer = self.dealer, sb, bb, "round started");

        self.post_blind(sb, self.config.small_blind, HandHistoryVerb::SmallBlind);
        self.post_blind(bb, self.config.big_blind, HandHistoryVerb::BigBlind);
        self.current_bet = self.players.iter().map(|p| p.bet).max().unwrap_or(0);

        self.deal_hole_cards()?;
        self.advance(bb)
    }

    fn post_blind(&mut self, seat: usize, amount: u64, verb: HandHistoryVerb) {
        let paid = self.players[seat].commit(amount);
        debug!(seat, paid, verb = verb.label(), "blind posted");
        self.record_history(seat, verb, Some(paid));
    }

    /// Two passes around the table starting left of the dealer.
    fn deal_hole_cards(&mut self) -> Result<(), DeckError> {
        let n = self.players.len();
        for _ in 0..2 {
            for k in 1..=n {
                let seat = (self.dealer + k) % n;
                let p = &mut self.players[seat];
                if p.in_hand() {
                    p.hole_cards.push(self.deck.draw_card(p.is_human)?);
                }
            }
        }
        Ok(())
    }

    /// Apply `action` for the current seat, or explain why it is illegal.
    /// Illegal input leaves the game untouched.
    pub fn try_action(&mut self, action: Action, amount: u64) -> Result<GameSnapshot, ActionError> {
        let seat = match self.current {
            Some(seat) if self.stage.is_betting() => seat,
            _ => return Err(ActionError::NoRoundInProgress),
        };
        let to_call = self.to_call(seat);
        match action {
            Action::Check if to_call > 0 => return Err(ActionError::CheckFacingBet { to_call }),
            Action::Call if to_call == 0 => return Err(ActionError::NothingToCall),
            Action::Bet | Action::Raise if amount == 0 => return Err(ActionError::InvalidAmount),
            _ => {}
        }

        let backup = self.clone();
        self.apply(seat, action, amount, to_call);
        if let Err(e) = self.advance(seat) {
            *self = backup;
            return Err(e.into());
        }
        Ok(self.snapshot())
    }

    /// Like [`Game::try_action`], but illegal actions are logged and ignored.
    pub fn player_action(&mut self, action: Action, amount: u64) -> GameSnapshot {
        match self.try_action(action, amount) {
            Ok(snap) => snap,
            Err(e) => {
                warn!(%action, amount, error = %e, "action ignored");
                self.snapshot()
            }
        }
    }

    fn apply(&mut self, seat: usize, action: Action, amount: u64, to_call: u64) {
        match action {
            Action::Fold => {
                self.players[seat].status = PlayerStatus::Folded;
                self.record_history(seat, HandHistoryVerb::Fold, None);
            }
            Action::Check => self.record_history(seat, HandHistoryVerb::Check, None),
            Action::Call => {
                let paid = self.players[seat].commit(to_call);
                self.record_history(seat, HandHistoryVerb::Call, Some(paid));
            }
            Action::Bet | Action::Raise => {
                let verb =
                    if self.current_bet == 0 { HandHistoryVerb::Bet } else { HandHistoryVerb::Raise };
                let chips = self.players[seat].chips;
                let min = self.min_raise_for(seat).min(chips);
                // short amounts are lifted to the minimum, long ones capped at the stack
                let paid = self.players[seat].commit(amount.max(min).min(chips));
                self.record_history(seat, verb, Some(paid));
                let new_bet = self.players[seat].bet;
                if new_bet > self.current_bet {
                    self.current_bet = new_bet;
                    for (i, p) in self.players.iter_mut().enumerate() {
                        if i != seat {
                            p.acted = false;
                        }
                    }
                }
            }
        }
        self.players[seat].acted = true;
    }

    fn min_raise_for(&self, seat: usize) -> u64 {
        if self.current_bet == 0 {
            self.config.big_blind
        } else {
            (self.current_bet * 2).saturating_sub(self.players[seat].bet)
        }
    }

    /// Settle the consequences of the last action taken by `from`:
    /// award an uncontested pot, close finished streets, or pass the turn.
    fn advance(&mut self, mut from: usize) -> Result<(), DeckError> {
        loop {
            if self.players.iter().filter(|p| p.in_hand()).count() == 1 {
                self.award_uncontested();
                return Ok(());
            }
            if !self.street_complete() {
                self.current = self.next_eligible_from(from);
                return Ok(());
            }
            self.collect_bets();
            if self.stage == Stage::River {
                self.showdown();
                return Ok(());
            }
            self.deal_next_street()?;
            from = self.dealer;
        }
    }

    fn street_complete(&self) -> bool {
        let eligible: Vec<&Player> = self.players.iter().filter(|p| p.can_act()).collect();
        match eligible.as_slice() {
            [] => true,
            [only] => only.bet >= self.current_bet,
            all => all.iter().all(|p| p.bet == self.current_bet && p.acted),
        }
    }

    fn collect_bets(&mut self) {
        for p in &mut self.players {
            self.pot += p.bet;
            p.bet = 0;
        }
        self.current_bet = 0;
    }

    fn deal_next_street(&mut self) -> Result<(), DeckError> {
        let (next, count) = match self.stage {
            Stage::Preflop => (Stage::Flop, 3),
            Stage::Flop => (Stage::Turn, 1),
            _ => (Stage::River, 1),
        };
        self.deck.burn()?;
        for _ in 0..count {
            self.board.push(self.deck.draw_card(true)?.card);
        }
        self.stage = next;
        for p in &mut self.players {
            p.acted = false;
        }
        debug!(stage = %self.stage, board = self.board.len(), pot = self.pot, "street dealt");
        Ok(())
    }

    fn award_uncontested(&mut self) {
        self.collect_bets();
        self.current = None;
        self.stage = Stage::Waiting;
        let Some(seat) = self.players.iter().position(|p| p.in_hand()) else {
            return;
        };
        let amount = std::mem::take(&mut self.pot);
        self.players[seat].chips += amount;
        self.record_history(seat, HandHistoryVerb::Win, Some(amount));
        self.winners = vec![seat];
        info!(seat, amount, "pot awarded uncontested");
    }

    fn showdown(&mut self) {
        self.stage = Stage::Showdown;
        self.current = None;
        for p in &mut self.players {
            for c in &mut p.hole_cards {
                c.face_up = true;
            }
            p.hand = match p.hole() {
                Some(hole) if p.in_hand() => evaluate_holdem(&hole, &self.board).ok(),
                _ => None,
            };
        }
        let winners = self.determine_winners();
        self.distribute_pot(&winners);
    }

    /// Seats holding the best hand among players still in the round.
    ///
    /// By default only the hand category is compared, so every player
    /// sharing the top category wins; [`ShowdownRule::FullRank`] also
    /// compares kickers. Empty while several players remain and the board
    /// is incomplete.
    pub fn determine_winners(&self) -> Vec<usize> {
        let contenders: Vec<usize> = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.in_hand() && p.hole().is_some())
            .map(|(i, _)| i)
            .collect();
        if contenders.len() <= 1 {
            return contenders;
        }
        let rule = self.config.showdown;
        let scored: Vec<(usize, u64)> = contenders
            .iter()
            .filter_map(|&i| {
                let hole = self.players[i].hole()?;
                let eval = evaluate_holdem(&hole, &self.board).ok()?;
                let key = match rule {
                    ShowdownRule::FullRank => eval.value().raw(),
                    _ => u64::from(eval.category().ordinal()),
                };
                Some((i, key))
            })
            .collect();
        let Some(best) = scored.iter().map(|(_, k)| *k).max() else {
            return Vec::new();
        };
        scored.into_iter().filter(|(_, k)| *k == best).map(|(i, _)| i).collect()
    }

    fn distribute_pot(&mut self, winners: &[usize]) {
        if winners.is_empty() {
            warn!(pot = self.pot, "no winner found, returning contributions");
            self.refund_contributions();
            return;
        }
        let shares = split_pot(self.pot, winners.len());
        let verb = if winners.len() > 1 { HandHistoryVerb::Split } else { HandHistoryVerb::Win };
        for (&seat, &share) in winners.iter().zip(&shares) {
            self.players[seat].chips += share;
            self.record_history(seat, verb, Some(share));
            info!(seat, share, "pot awarded at showdown");
        }
        self.pot = 0;
        self.winners = winners.to_vec();
    }

    fn refund_contributions(&mut self) {
        for p in &mut self.players {
            p.chips += p.contributed;
            p.contributed = 0;
            p.bet = 0;
        }
        self.pot = 0;
        self.current_bet = 0;
        self.current = None;
        self.stage = Stage::Waiting;
    }

    fn next_funded_from(&self, start: usize) -> usize {
        let n = self.players.len();
        (1..=n).map(|k| (start + k) % n).find(|&i| self.players[i].chips > 0).unwrap_or(start)
    }

    fn next_eligible_from(&self, start: usize) -> Option<usize> {
        let n = self.players.len();
        (1..=n).map(|k| (start + k) % n).find(|&i| self.players[i].can_act())
    }

    fn record_history(&mut self, seat: usize, verb: HandHistoryVerb, amount: Option<u64>) {
        let entry = HandHistoryEntry { seat, verb, amount, stage: self.stage };
        self.history.push(entry);
    }
}

/// Split `pot` across `winners` shares. Integer division; the remainder
/// goes to the first winner.
///
/// ```
/// use holdem_engine::game::split_pot;
///
/// assert_eq!(split_pot(10, 3), vec![4, 3, 3]);
/// ```
pub fn split_pot(pot: u64, winners: usize) -> Vec<u64> {
    if winners == 0 {
        return Vec::new();
    }
    let n = winners as u64;
    let mut shares = vec![pot / n; winners];
    shares[0] += pot % n;
    shares
}
