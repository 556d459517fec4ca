//! Unit tests for ix-core primitives.

#[cfg(test)]
mod direction {
    use crate::{Direction, Turn};

    #[test]
    fn index_roundtrip() {
        for d in Direction::ALL {
            assert_eq!(Direction::from_index(d.index()), d);
        }
        assert_eq!(Direction::from_index(5), Direction::East);
    }

    #[test]
    fn display() {
        assert_eq!(Direction::West.to_string(), "west");
        assert_eq!(Turn::classify(Direction::North, Direction::North).to_string(), "u-turn");
    }

    #[test]
    fn turn_classification_from_north() {
        use Direction::*;
        assert_eq!(Turn::classify(North, West), Turn::Right);
        assert_eq!(Turn::classify(North, South), Turn::Straight);
        assert_eq!(Turn::classify(North, East), Turn::Left);
        assert_eq!(Turn::classify(North, North), Turn::UTurn);
    }
}

#[cfg(test)]
mod right_turns {
    use crate::{Direction, Trajectory, Turn, is_right_turn};

    #[test]
    fn exactly_four_right_turns() {
        use Direction::*;
        let rights: Vec<Trajectory> = Trajectory::all().filter(|t| t.is_right_turn()).collect();
        assert_eq!(
            rights,
            vec![
                Trajectory::new(North, West),
                Trajectory::new(East, North),
                Trajectory::new(South, East),
                Trajectory::new(West, South),
            ]
        );
        assert_eq!(Trajectory::all().count(), 16);
    }

    #[test]
    fn agrees_with_turn_classification() {
        for t in Trajectory::all() {
            assert_eq!(
                is_right_turn(t.origin(), t.destination()),
                t.turn() == Turn::Right,
                "{t}"
            );
        }
    }
}

#[cfg(test)]
mod conflicts {
    use crate::{Direction, Trajectory, conflicts};
    use crate::Direction::*;

    /// Row `i`, column `j` is `X` when `all()[i]` conflicts with `all()[j]`.
    /// Order is origin-major, compass order N, E, S, W for both components.
    const TRUTH_TABLE: [&str; 16] = [
        "....XXXXX.XXXX.X", // N->N
        ".....XXXXXXXXX.X", // N->E
        ".....XXX..XXXXXX", // N->S
        ".......X...X...X", // N->W
        "X.......X...X...", // E->N
        "XXX.....XXXXXX.X", // E->E
        "XXX.....X.XXXXXX", // E->S
        "XXXX....X.XXX..X", // E->W
        "XX..XXXX....XX.X", // S->N
        ".X...X.......X..", // S->E
        "XXX..XXX....XXXX", // S->S
        "XXXX.XXX....XX.X", // S->W
        "XXX.XXXXX.XX....", // W->N
        "XXX..XX.XXXX....", // W->E
        "..X...X...X.....", // W->S
        "XXXX.XXXX.XX....", // W->W
    ];

    fn t(o: Direction, d: Direction) -> Trajectory {
        Trajectory::new(o, d)
    }

    #[test]
    fn full_truth_table() {
        let all: Vec<Trajectory> = Trajectory::all().collect();
        for (i, a) in all.iter().enumerate() {
            let row = TRUTH_TABLE[i].as_bytes();
            for (j, b) in all.iter().enumerate() {
                assert_eq!(conflicts(*a, *b), row[j] == b'X', "{a} vs {b}");
            }
        }
    }

    #[test]
    fn symmetric() {
        for a in Trajectory::all() {
            for b in Trajectory::all() {
                assert_eq!(conflicts(a, b), conflicts(b, a), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn same_origin_never_conflicts() {
        for o in Direction::ALL {
            for d1 in Direction::ALL {
                for d2 in Direction::ALL {
                    assert!(!conflicts(t(o, d1), t(o, d2)));
                }
            }
        }
    }

    #[test]
    fn opposite_pairs_pass() {
        assert!(!conflicts(t(North, South), t(South, North)));
        assert!(!conflicts(t(East, West), t(West, East)));
        // Opposite turning pairs fall under the same rule.
        assert!(!conflicts(t(North, East), t(East, North)));
    }

    #[test]
    fn right_turn_relief() {
        assert!(!conflicts(t(North, West), t(East, South)));
        assert!(conflicts(t(North, East), t(East, South)));
    }

    #[test]
    fn right_turns_into_same_exit_conflict() {
        // N->W turns right into west; S->W goes left into west.
        assert!(conflicts(t(North, West), t(South, West)));
        assert!(conflicts(t(North, West), t(East, West)));
    }

    #[test]
    fn crossing_straights_conflict() {
        assert!(conflicts(t(North, South), t(East, West)));
        assert!(conflicts(t(West, East), t(South, North)));
    }

    #[test]
    fn method_form_matches() {
        assert!(t(North, East).conflicts_with(t(East, South)));
        assert!(!t(North, West).conflicts_with(t(East, South)));
    }
}

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use crate::{Direction, Trajectory, conflicts};

    fn arb_direction() -> impl Strategy<Value = Direction> {
        (0usize..4).prop_map(Direction::from_index)
    }

    fn arb_trajectory() -> impl Strategy<Value = Trajectory> {
        (arb_direction(), arb_direction()).prop_map(|(o, d)| Trajectory::new(o, d))
    }

    fn arb_right_turn() -> impl Strategy<Value = Trajectory> {
        arb_direction().prop_map(|o| Trajectory::new(o, Direction::from_index(o.index() + 3)))
    }

    proptest! {
        #[test]
        fn conflict_is_symmetric(a in arb_trajectory(), b in arb_trajectory()) {
            prop_assert_eq!(conflicts(a, b), conflicts(b, a));
        }

        #[test]
        fn trajectory_never_conflicts_with_itself(a in arb_trajectory()) {
            prop_assert!(!conflicts(a, a));
        }

        #[test]
        fn right_turn_only_conflicts_on_shared_exit(a in arb_right_turn(), b in arb_trajectory()) {
            prop_assert!(a.is_right_turn());
            if conflicts(a, b) {
                prop_assert_eq!(a.destination(), b.destination());
            }
        }
    }
}

#[cfg(test)]
mod ids {
    use crate::VehicleId;

    #[test]
    fn index_roundtrip() {
        let id = VehicleId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(VehicleId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert!(VehicleId::try_from(u32::MAX as usize).is_ok());
        assert!(VehicleId::try_from(u32::MAX as usize + 1).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(VehicleId(7).to_string(), "VehicleId(7)");
    }
}

#[cfg(test)]
mod rng {
    use crate::{VehicleId, VehicleRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = VehicleRng::new(12345, VehicleId(0));
        let mut r2 = VehicleRng::new(12345, VehicleId(0));
        for _ in 0..100 {
            assert_eq!(r1.trajectory(true), r2.trajectory(true));
        }
    }

    #[test]
    fn different_vehicles_differ() {
        let mut r0 = VehicleRng::new(1, VehicleId(0));
        let mut r1 = VehicleRng::new(1, VehicleId(1));
        let a: Vec<u64> = (0..8).map(|_| r0.gen_range(0..u64::MAX)).collect();
        let b: Vec<u64> = (0..8).map(|_| r1.gen_range(0..u64::MAX)).collect();
        assert_ne!(a, b, "seeds for adjacent vehicles should diverge");
    }

    #[test]
    fn no_u_turns_when_disallowed() {
        let mut rng = VehicleRng::new(7, VehicleId(3));
        for _ in 0..1000 {
            let t = rng.trajectory(false);
            assert_ne!(t.origin(), t.destination());
        }
    }

    #[test]
    fn every_trajectory_is_reachable() {
        let mut rng = VehicleRng::new(99, VehicleId(0));
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2000 {
            seen.insert(rng.trajectory(true));
        }
        assert_eq!(seen.len(), 16);
    }
}
