#![allow(non_snake_case)]
use proptest::prelude::*;
use six_chamber::{
    Chamber,
    FireOutcome,
    GameState,
    Phase,
};

fn ready_with_bullet(bullet: Chamber) -> GameState {
    let mut state = GameState::default();
    state.start_game();
    state.begin_spin();
    state.resolve_spin(bullet);
    state
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn fire_gun__safe_prefix_then_terminal((bullet, pulls) in (0u8..6, 0usize..20)) {
        let bullet = Chamber::new(bullet).unwrap();
        let mut state = ready_with_bullet(bullet);

        for _ in 0..pulls {
            state.fire_gun();
        }

        let safe_fires = pulls.min(usize::from(bullet.index()));
        let expected: Vec<Chamber> = (0..safe_fires as u8)
            .map(|i| Chamber::new(i).unwrap())
            .collect();
        prop_assert_eq!(state.tried_safe_chambers(), expected.as_slice());
        prop_assert_eq!(state.is_over(), pulls > usize::from(bullet.index()));
        if !state.is_over() {
            prop_assert_eq!(state.current_chamber().index() as usize, safe_fires);
        } else {
            prop_assert_eq!(state.current_chamber(), bullet);
        }
    }

    #[test]
    fn reset_game__matches_fresh_record_from_any_reachable_state(
        (bullet, pulls, stage) in (0u8..6, 0usize..10, 0u8..4)
    ) {
        let mut state = GameState::default();
        if stage >= 1 {
            state.start_game();
        }
        if stage >= 2 {
            state.begin_spin();
            state.rotate(1.5);
        }
        if stage >= 3 {
            state.resolve_spin(Chamber::new(bullet).unwrap());
            for _ in 0..pulls {
                state.fire_gun();
            }
        }

        state.reset_game();

        prop_assert_eq!(&state, &GameState::default());
        prop_assert_eq!(state.phase(), Phase::Idle);
    }
}

#[test]
fn fire_gun__bullet_in_fourth_slot_scenario() {
    // given
    let mut state = ready_with_bullet(Chamber::new(3).unwrap());

    // when
    let outcomes: Vec<FireOutcome> = (0..6).map(|_| state.fire_gun()).collect();

    // then
    let chamber = |i| Chamber::new(i).unwrap();
    assert_eq!(
        outcomes,
        vec![
            FireOutcome::Safe(chamber(0)),
            FireOutcome::Safe(chamber(1)),
            FireOutcome::Safe(chamber(2)),
            FireOutcome::Fatal(chamber(3)),
            FireOutcome::Ignored,
            FireOutcome::Ignored,
        ]
    );
    assert_eq!(state.tried_safe_chambers(), &[chamber(0), chamber(1), chamber(2)]);
    assert!(state.is_over());
    assert_eq!(state.bullet_chamber(), Some(chamber(3)));
}
