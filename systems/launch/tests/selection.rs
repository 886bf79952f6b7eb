use diamond_siege_core::{
    CellCoord, Command, Player, StationaryLayout, StationaryUnit, UnitCatalog, UnitKind,
};
use diamond_siege_system_launch::LaunchSelector;
use diamond_siege_system_threat::ThreatEstimator;
use diamond_siege_world::{self as world, World};

/// Layout with a single hostile turret that reaches exactly one cell.
struct SingleCellThreat {
    covered: CellCoord,
    turret: StationaryUnit,
}

impl SingleCellThreat {
    fn covering(covered: CellCoord) -> Self {
        let turret = StationaryUnit {
            kind: UnitKind::Turret,
            owner: Player::Opponent,
            cell: CellCoord::new(13, 14),
            range: 3.0,
            damage: 2.0,
        };
        Self { covered, turret }
    }
}

impl StationaryLayout for SingleCellThreat {
    fn contains_stationary_unit(&self, _cell: CellCoord) -> bool {
        false
    }

    fn attackers(&self, cell: CellCoord, defender: Player) -> Vec<StationaryUnit> {
        if cell == self.covered && defender == Player::Own {
            vec![self.turret]
        } else {
            Vec::new()
        }
    }
}

#[test]
fn launch_avoiding_the_covered_cell_wins() {
    let layout = SingleCellThreat::covering(CellCoord::new(13, 1));
    let mut selector = LaunchSelector::new(ThreatEstimator::new(2.0));

    let exposed = selector.evaluate(CellCoord::new(13, 0), &layout);
    assert!(exposed.path.cells().contains(&CellCoord::new(13, 1)));
    assert_eq!(exposed.damage.value(), 2.0);

    let choice = selector
        .select_best(&[CellCoord::new(13, 0), CellCoord::new(14, 0)], &layout)
        .expect("two candidates");
    assert_eq!(choice.cell, CellCoord::new(14, 0));
    assert_eq!(choice.damage.value(), 0.0);
}

#[test]
fn cheaper_candidate_wins_regardless_of_order() {
    let layout = SingleCellThreat::covering(CellCoord::new(13, 1));
    let mut selector = LaunchSelector::new(ThreatEstimator::new(2.0));

    let forward = selector
        .select_best(&[CellCoord::new(14, 0), CellCoord::new(13, 0)], &layout)
        .expect("choice");
    let reverse = selector
        .select_best(&[CellCoord::new(13, 0), CellCoord::new(14, 0)], &layout)
        .expect("choice");
    assert_eq!(forward.cell, CellCoord::new(14, 0));
    assert_eq!(forward, reverse);
}

#[test]
fn repeated_selection_is_stable() {
    let layout = SingleCellThreat::covering(CellCoord::new(20, 20));
    let mut selector = LaunchSelector::new(ThreatEstimator::new(2.0));
    let candidates = [CellCoord::new(14, 0), CellCoord::new(13, 0)];

    let first = selector.select_best(&candidates, &layout).expect("choice");
    for _ in 0..5 {
        let again = selector.select_best(&candidates, &layout).expect("choice");
        assert_eq!(again, first);
    }
    assert_eq!(first.cell, CellCoord::new(14, 0));
}

#[test]
fn selector_steers_away_from_the_world_turret() {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::PlaceStationary {
            kind: UnitKind::Turret,
            owner: Player::Opponent,
            cell: CellCoord::new(14, 20),
        },
        &mut events,
    );

    let mut selector = LaunchSelector::new(ThreatEstimator::from_catalog(&UnitCatalog::default()));
    let choice = selector
        .select_best(
            &[
                CellCoord::new(13, 0),
                CellCoord::new(12, 1),
                CellCoord::new(11, 2),
            ],
            &world,
        )
        .expect("choice");

    assert_eq!(choice.cell, CellCoord::new(11, 2));
    assert_eq!(choice.damage.value(), 4.0);
}
