use gridlunge::{
    apply_move, has_instant_win, legal_moves, lunge_sequence, rng_for_run, Fighter, GameState,
    Move, Player, Pos,
};

fn fighter(row: u8, col: u8, hp: u8, ap: u8) -> Fighter {
    let mut f = Fighter::new(Pos::new(row, col));
    f.hp = hp;
    f.ap = ap;
    f
}

fn assert_board_consistent(s: &GameState) {
    assert_eq!(s.board.occupied_count(), 2);
    assert_eq!(s.board.get(s.players[0].pos), Some(Player::One));
    assert_eq!(s.board.get(s.players[1].pos), Some(Player::Two));
}

/// Adjacent at the first hit: all three hits land before the single reposition.
#[test]
fn lunge_adjacent_hits_three_times() {
    for seed in 0..16u64 {
        let mut s = GameState::with_fighters(fighter(1, 1, 7, 3), fighter(0, 1, 7, 0), Player::One);
        let mut rng = rng_for_run(seed, 0);
        lunge_sequence(&mut s, &mut rng);

        assert_eq!(s.players[1].hp, 1, "3 x 2 damage");
        assert_eq!(s.players[0].ap, 0);
        assert!(s.players[0].stunned);
        assert!(s.players[0].stunned_this_turn);
        assert!(!s.game_over);
        assert_ne!(s.players[0].pos, Pos::new(1, 1), "final combo repositions");
        assert_board_consistent(&s);
    }
}

#[test]
fn lunge_stops_when_opponent_falls() {
    let mut s = GameState::with_fighters(fighter(1, 1, 7, 4), fighter(0, 1, 5, 0), Player::One);
    let mut rng = rng_for_run(3, 0);
    lunge_sequence(&mut s, &mut rng);

    assert_eq!(s.players[1].hp, 0);
    assert!(s.game_over);
    assert_eq!(s.players[0].ap, 1);
    assert_eq!(s.players[0].pos, Pos::new(1, 1), "no reposition before the final combo");
    assert!(!s.players[0].stunned);
}

#[test]
fn lunge_from_range_deals_even_damage() {
    for seed in 0..32u64 {
        let mut s = GameState::with_fighters(fighter(0, 0, 7, 3), fighter(2, 2, 7, 0), Player::One);
        let mut rng = rng_for_run(seed, 7);
        lunge_sequence(&mut s, &mut rng);

        let hp = s.players[1].hp;
        assert!(hp == 7 || hp == 5 || hp == 3 || hp == 1, "unexpected hp {hp}");
        assert_eq!(s.players[0].ap, 0);
        assert!(s.players[0].stunned && s.players[0].stunned_this_turn);
        assert_board_consistent(&s);
    }
}

#[test]
fn lunge_stun_lasts_one_round_trip() {
    let s = GameState::with_fighters(fighter(1, 1, 7, 3), fighter(0, 1, 7, 0), Player::One);
    let mut rng = rng_for_run(11, 0);

    let s = apply_move(&s, Move::Lunging, &mut rng).expect("lunge");
    assert_eq!(s.current, Player::Two);
    assert!(s.players[0].stunned, "stun survives the turn it was applied");
    assert!(!s.players[0].stunned_this_turn);
    assert_eq!(s.players[0].ap, 1, "end of turn grants +1");

    // Opponent has 0 ap and nothing changed: rest is the only option
    assert_eq!(legal_moves(&s), vec![Move::Rest]);
    let s = apply_move(&s, Move::Rest, &mut rng).expect("rest");

    assert_eq!(s.current, Player::One);
    assert_eq!(legal_moves(&s), vec![Move::EndTurn]);
    let s = apply_move(&s, Move::EndTurn, &mut rng).expect("end turn");
    assert!(!s.players[0].stunned, "stun clears at the end of the stunned turn");
    assert_eq!(s.players[0].ap, 2);
}

#[test]
fn instant_win_when_adjacent_with_four_ap() {
    let s = GameState::with_fighters(fighter(0, 1, 7, 4), fighter(1, 1, 7, 0), Player::One);
    assert!(has_instant_win(&s));

    let short = GameState::with_fighters(fighter(0, 1, 7, 3), fighter(1, 1, 7, 0), Player::One);
    assert!(!has_instant_win(&short));
}

#[test]
fn instant_win_after_approach_needs_five_ap() {
    let s = GameState::with_fighters(fighter(0, 0, 7, 5), fighter(2, 2, 7, 0), Player::One);
    assert!(has_instant_win(&s), "(0,0) -> (1,1) lands next to (2,2)");

    let short = GameState::with_fighters(fighter(0, 0, 7, 4), fighter(2, 2, 7, 0), Player::One);
    assert!(!has_instant_win(&short));
}

#[test]
fn instant_win_respects_backtrack_pruning() {
    // From (0,2) the only line square next to (2,0) is (1,1)
    let mut s = GameState::with_fighters(fighter(0, 2, 7, 5), fighter(2, 0, 7, 0), Player::One);
    assert!(has_instant_win(&s));
    s.last_position = Some(Pos::new(1, 1));
    assert!(!has_instant_win(&s));
}

#[test]
fn no_instant_win_while_stunned() {
    let mut p1 = fighter(0, 1, 7, 6);
    p1.stunned = true;
    let s = GameState::with_fighters(p1, fighter(1, 1, 7, 0), Player::One);
    assert!(!has_instant_win(&s));
}

#[test]
fn instant_win_is_sound_against_four_strikes() {
    // The shortcut's claim holds: four strikes finish a 7 hp opponent
    let mut s = GameState::with_fighters(fighter(0, 1, 7, 4), fighter(1, 1, 7, 0), Player::One);
    assert!(has_instant_win(&s));
    let mut rng = rng_for_run(0, 0);
    for _ in 0..4 {
        if s.is_terminal() {
            break;
        }
        s = apply_move(&s, Move::Strike(Pos::new(1, 1)), &mut rng).expect("strike");
    }
    assert_eq!(s.winner(), Some(Player::One));
}
