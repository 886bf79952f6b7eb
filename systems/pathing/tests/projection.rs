use std::collections::HashSet;

use diamond_siege_core::{CellCoord, Command, Edge, Player, StationaryLayout, StationaryUnit, UnitKind};
use diamond_siege_system_pathing::{project_path, PathOutcome, PathProjection, PathProjector};
use diamond_siege_world::{self as world, World};

#[derive(Default)]
struct Blocked {
    cells: HashSet<CellCoord>,
}

impl Blocked {
    fn with(cells: &[CellCoord]) -> Self {
        Self {
            cells: cells.iter().copied().collect(),
        }
    }
}

impl StationaryLayout for Blocked {
    fn contains_stationary_unit(&self, cell: CellCoord) -> bool {
        self.cells.contains(&cell)
    }

    fn attackers(&self, _cell: CellCoord, _defender: Player) -> Vec<StationaryUnit> {
        Vec::new()
    }
}

fn assert_contiguous(projection: &PathProjection) {
    let cells = projection.cells();
    for pair in cells.windows(2) {
        assert_eq!(
            pair[0].manhattan_distance(pair[1]),
            1,
            "{:?} -> {:?} is not a single step",
            pair[0],
            pair[1]
        );
    }
    let unique: HashSet<_> = cells.iter().collect();
    assert_eq!(unique.len(), cells.len(), "projection revisits a cell");
}

#[test]
fn open_board_launches_reach_the_opposite_edge() {
    let layout = Blocked::default();
    for edge in [Edge::BottomLeft, Edge::BottomRight] {
        for launch in edge.cells() {
            let projection = project_path(launch, &layout);
            assert_eq!(projection.launch(), launch);
            assert_eq!(
                projection.outcome(),
                PathOutcome::ReachedEdge(edge.opposite())
            );
            assert!(edge.opposite().contains(projection.destination()));
            assert!(
                projection.steps() <= 28,
                "{launch:?} took {} steps",
                projection.steps()
            );
            assert_contiguous(&projection);
        }
    }
}

#[test]
fn corner_launches_climb_their_own_column() {
    let layout = Blocked::default();

    let left = project_path(CellCoord::new(13, 0), &layout);
    assert_eq!(left.steps(), 28);
    assert!(left.cells()[..28].iter().all(|cell| cell.column() == 13));
    assert_eq!(left.destination(), CellCoord::new(14, 27));

    let right = project_path(CellCoord::new(14, 0), &layout);
    assert_eq!(right.steps(), 28);
    assert_eq!(right.destination(), CellCoord::new(13, 27));
    assert_eq!(right.outcome(), PathOutcome::ReachedEdge(Edge::TopLeft));
}

#[test]
fn boxed_in_launch_ends_at_the_launch_cell() {
    let layout = Blocked::with(&[CellCoord::new(13, 1), CellCoord::new(14, 0)]);
    let projection = project_path(CellCoord::new(13, 0), &layout);
    assert_eq!(projection.cells(), &[CellCoord::new(13, 0)]);
    assert_eq!(projection.outcome(), PathOutcome::DeadEnd);
}

#[test]
fn obstacles_force_a_lateral_detour_toward_the_target() {
    let layout = Blocked::with(&[CellCoord::new(13, 5)]);
    let projection = project_path(CellCoord::new(13, 0), &layout);

    assert!(!projection.cells().contains(&CellCoord::new(13, 5)));
    let detour = projection
        .cells()
        .iter()
        .position(|cell| *cell == CellCoord::new(13, 4))
        .expect("walk passes below the obstacle");
    assert_eq!(projection.cells()[detour + 1], CellCoord::new(14, 4));
    assert_eq!(projection.outcome(), PathOutcome::ReachedEdge(Edge::TopRight));
    assert_contiguous(&projection);
}

#[test]
fn off_edge_launch_yields_single_cell() {
    let projection = project_path(CellCoord::new(13, 5), &Blocked::default());
    assert_eq!(projection.cells(), &[CellCoord::new(13, 5)]);
    assert_eq!(projection.outcome(), PathOutcome::OffEdgeLaunch);
}

#[test]
fn projecting_twice_against_the_world_is_idempotent() {
    let mut world = World::new();
    let mut events = Vec::new();
    for (column, row) in [(13, 8), (14, 8), (12, 8), (15, 8), (16, 8), (11, 8)] {
        world::apply(
            &mut world,
            Command::PlaceStationary {
                kind: UnitKind::Wall,
                owner: Player::Own,
                cell: CellCoord::new(column, row),
            },
            &mut events,
        );
    }

    let mut projector = PathProjector::default();
    let first = projector.project(CellCoord::new(14, 0), &world);
    let second = projector.project(CellCoord::new(14, 0), &world);
    assert_eq!(first, second);
    assert_eq!(first, project_path(CellCoord::new(14, 0), &world));
    assert!(first
        .cells()
        .iter()
        .all(|cell| !world.contains_stationary_unit(*cell)));
    assert_contiguous(&first);
}
