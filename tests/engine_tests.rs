use gridlunge::rules::{AP_CAP, START_HP};
use gridlunge::{apply_generated, apply_move, legal_moves, rng_for_run, Fighter, GameState, Move, Player, Pos};

fn fighter(row: u8, col: u8, hp: u8, ap: u8) -> Fighter {
    let mut f = Fighter::new(Pos::new(row, col));
    f.hp = hp;
    f.ap = ap;
    f
}

#[test]
fn opening_position_layout() {
    let s = GameState::initial();
    assert_eq!(s.current, Player::One);
    assert_eq!(s.players[0].pos, Pos::new(0, 1));
    assert_eq!(s.players[1].pos, Pos::new(2, 1));
    for f in s.players {
        assert_eq!(f.hp, START_HP);
        assert_eq!(f.max_hp, START_HP);
        assert_eq!(f.ap, 0);
        assert!(!f.stunned);
    }
    assert_eq!(s.board.get(Pos::new(0, 1)), Some(Player::One));
    assert_eq!(s.board.get(Pos::new(2, 1)), Some(Player::Two));
    assert_eq!(s.board.occupied_count(), 2);
    assert!(!s.game_over);
}

#[test]
fn opening_allows_only_rest() {
    // 0 ap: no moves, strikes or lunge; ending the turn idle is pruned
    let s = GameState::initial();
    assert_eq!(legal_moves(&s), vec![Move::Rest]);
}

#[test]
fn legal_move_ordering() {
    let s = GameState::with_fighters(fighter(1, 1, 7, 3), fighter(0, 1, 7, 0), Player::One);
    let moves = legal_moves(&s);
    assert_eq!(moves[0], Move::Rest);
    // ap == turn start ap and below cap: no end turn
    assert!(!moves.contains(&Move::EndTurn));
    let strike_at = moves.iter().position(|m| *m == Move::Strike(Pos::new(0, 1))).expect("strike");
    let lunge_at = moves.iter().position(|m| *m == Move::Lunging).expect("lunge");
    let last_move = moves.iter().rposition(|m| matches!(m, Move::Move(_))).expect("moves");
    assert!(last_move < strike_at && strike_at < lunge_at);
}

#[test]
fn center_reaches_every_empty_cell() {
    // From the center every other cell is 1 square away along a line
    let s = GameState::with_fighters(fighter(1, 1, 7, 1), fighter(0, 0, 7, 0), Player::One);
    let targets: Vec<Pos> = legal_moves(&s)
        .into_iter()
        .filter_map(|m| match m {
            Move::Move(p) => Some(p),
            _ => None,
        })
        .collect();
    assert_eq!(targets.len(), 7);
    assert!(!targets.contains(&Pos::new(0, 0)));
    assert!(!targets.contains(&Pos::new(1, 1)));
}

#[test]
fn corner_moves_follow_lines_only() {
    // (0,0): knight-like squares (1,2) and (2,1) are off every line
    let s = GameState::with_fighters(fighter(0, 0, 7, 1), fighter(0, 2, 7, 0), Player::One);
    let targets: Vec<Pos> = legal_moves(&s)
        .into_iter()
        .filter_map(|m| match m {
            Move::Move(p) => Some(p),
            _ => None,
        })
        .collect();
    assert_eq!(
        targets,
        vec![Pos::new(0, 1), Pos::new(1, 0), Pos::new(1, 1), Pos::new(2, 0), Pos::new(2, 2)]
    );
}

#[test]
fn strike_scenario_damages_without_ending_turn() {
    let s = GameState::with_fighters(fighter(0, 1, 7, 2), fighter(1, 1, 7, 0), Player::One);
    let mut rng = rng_for_run(1, 0);
    let ns = apply_move(&s, Move::Strike(Pos::new(1, 1)), &mut rng).expect("strike is legal");

    assert_eq!(ns.players[1].hp, 5);
    assert_eq!(ns.players[0].ap, 1);
    assert_eq!(ns.current, Player::One, "strike must not end the turn");
    assert!(!ns.game_over);
    // Something happened this turn, so ending it is now legal
    assert!(legal_moves(&ns).contains(&Move::EndTurn));
}

#[test]
fn lethal_strike_sets_game_over() {
    let s = GameState::with_fighters(fighter(0, 1, 7, 1), fighter(1, 1, 2, 0), Player::One);
    let mut rng = rng_for_run(1, 0);
    let ns = apply_move(&s, Move::Strike(Pos::new(1, 1)), &mut rng).expect("strike");
    assert_eq!(ns.players[1].hp, 0);
    assert!(ns.game_over);
    assert!(ns.is_terminal());
    assert_eq!(ns.winner(), Some(Player::One));
}

#[test]
fn rest_heals_and_passes_turn() {
    let s = GameState::with_fighters(fighter(0, 1, 5, 2), fighter(2, 1, 7, 3), Player::One);
    let mut rng = rng_for_run(1, 0);
    let ns = apply_move(&s, Move::Rest, &mut rng).expect("rest");
    assert_eq!(ns.players[0].hp, 6);
    // +1 from resting, +1 for ending the turn
    assert_eq!(ns.players[0].ap, 4);
    assert_eq!(ns.current, Player::Two);
    assert_eq!(ns.turn_start_ap, 3);
    assert_eq!(ns.last_position, None);
}

#[test]
fn rest_respects_caps() {
    let s = GameState::with_fighters(fighter(0, 1, 7, AP_CAP), fighter(2, 1, 7, 0), Player::One);
    let mut rng = rng_for_run(1, 0);
    let ns = apply_move(&s, Move::Rest, &mut rng).expect("rest");
    assert_eq!(ns.players[0].hp, 7);
    assert_eq!(ns.players[0].ap, AP_CAP);
}

#[test]
fn move_relocates_and_blocks_backtracking() {
    let s = GameState::with_fighters(fighter(0, 1, 7, 2), fighter(2, 2, 7, 0), Player::One);
    let mut rng = rng_for_run(1, 0);
    let ns = apply_move(&s, Move::Move(Pos::new(1, 1)), &mut rng).expect("move");

    assert_eq!(ns.players[0].pos, Pos::new(1, 1));
    assert_eq!(ns.players[0].ap, 1);
    assert_eq!(ns.current, Player::One);
    assert_eq!(ns.last_position, Some(Pos::new(0, 1)));
    assert_eq!(ns.board.get(Pos::new(0, 1)), None);
    assert_eq!(ns.board.get(Pos::new(1, 1)), Some(Player::One));

    let moves = legal_moves(&ns);
    assert!(!moves.contains(&Move::Move(Pos::new(0, 1))), "vacated square is pruned");
    assert!(moves.contains(&Move::Move(Pos::new(0, 0))));

    // Ending the turn clears the record
    let ended = apply_move(&ns, Move::EndTurn, &mut rng).expect("end turn");
    assert_eq!(ended.last_position, None);
    assert_eq!(ended.current, Player::Two);
    assert_eq!(ended.players[0].ap, 2);
}

#[test]
fn idle_end_turn_is_pruned() {
    let s = GameState::with_fighters(fighter(0, 1, 7, 3), fighter(2, 1, 7, 0), Player::One);
    assert_eq!(s.turn_start_ap, 3);
    assert!(!legal_moves(&s).contains(&Move::EndTurn));

    let mut rng = rng_for_run(1, 0);
    let err = apply_move(&s, Move::EndTurn, &mut rng);
    assert!(err.is_err(), "idle end turn must be rejected");
}

#[test]
fn end_turn_allowed_at_ap_cap() {
    let s = GameState::with_fighters(fighter(0, 1, 7, AP_CAP), fighter(2, 1, 7, 0), Player::One);
    assert!(legal_moves(&s).contains(&Move::EndTurn));
}

#[test]
fn stunned_mover_may_only_end_turn() {
    let mut p1 = fighter(0, 1, 7, 5);
    p1.stunned = true;
    let s = GameState::with_fighters(p1, fighter(1, 1, 7, 0), Player::One);
    assert_eq!(legal_moves(&s), vec![Move::EndTurn]);
}

#[test]
fn out_of_range_targets_are_rejected() {
    let s = GameState::with_fighters(fighter(0, 1, 7, 2), fighter(2, 1, 7, 0), Player::One);
    let mut rng = rng_for_run(1, 0);
    assert!(apply_move(&s, Move::Strike(Pos::new(2, 1)), &mut rng).is_err());
    assert!(apply_move(&s, Move::Move(Pos::new(2, 1)), &mut rng).is_err());
    assert!(apply_move(&s, Move::Lunging, &mut rng).is_err());
}

#[test]
fn move_descriptions() {
    assert_eq!(Move::Rest.description(), "Rest");
    assert_eq!(Move::Move(Pos::new(1, 2)).description(), "Move to (1,2)");
    assert_eq!(Move::Strike(Pos::new(0, 0)).description(), "Strike (0,0)");
    assert_eq!(Move::Lunging.description(), "Lunging");
    assert_eq!(Move::EndTurn.description(), "End turn");
}

#[test]
fn generated_moves_apply_like_apply_move() {
    let s = GameState::initial();
    let mut a = rng_for_run(3, 0);
    let mut b = rng_for_run(3, 0);
    let direct = apply_move(&s, Move::Rest, &mut a).expect("rest is legal");
    assert_eq!(apply_generated(&s, Move::Rest, &mut b), direct);
}

#[test]
#[should_panic(expected = "generated move rejected")]
fn applying_an_ungenerated_move_is_fatal() {
    // The opening only allows Rest
    let mut rng = rng_for_run(3, 0);
    let _ = apply_generated(&GameState::initial(), Move::EndTurn, &mut rng);
}
