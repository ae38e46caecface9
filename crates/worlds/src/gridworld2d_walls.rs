use rustc_hash::FxHashSet;
use serde::Deserialize;
use serde::Serialize;

use transalg_world::Primitive;
use transalg_world::World;
use transalg_world::WorldError;
use transalg_world::WorldState;

use crate::GridPosition;
use crate::Gridworld2D;
use crate::Move2D;
use crate::UndefinedActionStrategy;

/// A wall on the border between two neighbouring cells.
///
/// Walls are stored at doubled coordinates, a wall between cells (x, y) and
/// (x + 1, y) lies at (2x + 1, 2y).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wall {
    crossing: (usize, usize),
}

impl Wall {
    /// The wall between the position and its eastern neighbour.
    pub fn east_of((x, y): GridPosition) -> Wall {
        Wall {
            crossing: (2 * x + 1, 2 * y),
        }
    }

    /// The wall between the position and its northern neighbour.
    pub fn north_of((x, y): GridPosition) -> Wall {
        Wall {
            crossing: (2 * x, 2 * y + 1),
        }
    }
}

/// A cyclic grid with walls, moving into a wall is handled by the
/// [UndefinedActionStrategy].
#[derive(Clone, Debug)]
pub struct Gridworld2DWalls {
    grid: Gridworld2D,
    walls: FxHashSet<Wall>,
    strategy: UndefinedActionStrategy,
}

impl Gridworld2DWalls {
    pub fn new(
        grid: Gridworld2D,
        walls: impl IntoIterator<Item = Wall>,
        strategy: UndefinedActionStrategy,
    ) -> Result<Gridworld2DWalls, WorldError> {
        let (width, height) = grid.shape();
        let walls: FxHashSet<Wall> = walls.into_iter().collect();

        if let Some(wall) = walls
            .iter()
            .find(|wall| wall.crossing.0 >= 2 * width || wall.crossing.1 >= 2 * height)
        {
            return Err(WorldError::InvalidWorld(format!(
                "wall {:?} lies outside the grid of shape {:?}",
                wall,
                grid.shape()
            )));
        }

        Ok(Gridworld2DWalls { grid, walls, strategy })
    }

    pub fn grid(&self) -> &Gridworld2D {
        &self.grid
    }

    /// Returns the border that is crossed by the move.
    fn crossing(&self, (x, y): GridPosition, movement: Move2D) -> Option<Wall> {
        let (width, height) = self.grid.shape();
        let crossing = match movement {
            Move2D::Stay => return None,
            Move2D::North => (2 * x, (2 * y + 1) % (2 * height)),
            Move2D::East => ((2 * x + 1) % (2 * width), 2 * y),
            Move2D::South => (2 * x, (2 * y + 2 * height - 1) % (2 * height)),
            Move2D::West => ((2 * x + 2 * width - 1) % (2 * width), 2 * y),
        };

        Some(Wall { crossing })
    }

    pub(crate) fn is_blocked(&self, position: GridPosition, movement: Move2D) -> bool {
        self.crossing(position, movement)
            .is_some_and(|wall| self.walls.contains(&wall))
    }
}

impl World for Gridworld2DWalls {
    type State = GridPosition;

    fn primitive_actions(&self) -> &[Primitive] {
        self.grid.primitive_actions()
    }

    fn states(&self) -> &[GridPosition] {
        self.grid.states()
    }

    fn transition(&self, state: &GridPosition, primitive: Primitive) -> Result<WorldState<GridPosition>, WorldError> {
        let movement = self.grid.movement(primitive)?;
        if self.is_blocked(*state, movement) {
            return Ok(self.strategy.apply(*state));
        }

        Ok(WorldState::Defined(self.grid.step(*state, movement)))
    }

    fn is_valid_state(&self, state: &GridPosition) -> bool {
        self.grid.is_valid_state(state)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;
    use test_log::test;

    use super::*;

    #[test_case(UndefinedActionStrategy::Identity, WorldState::Defined((0, 0)) ; "identity")]
    #[test_case(UndefinedActionStrategy::Masked, WorldState::Undefined ; "masked")]
    fn test_wall_strategy(strategy: UndefinedActionStrategy, expected: WorldState<GridPosition>) {
        let grid = Gridworld2D::new((2, 2)).unwrap();
        let world = Gridworld2DWalls::new(grid, [Wall::east_of((0, 0))], strategy).unwrap();

        assert_eq!(world.transition(&(0, 0), 'E'), Ok(expected));
    }

    #[test]
    fn test_wall_blocks_both_sides_only() {
        let grid = Gridworld2D::new((2, 2)).unwrap();
        let world = Gridworld2DWalls::new(grid, [Wall::east_of((0, 0))], UndefinedActionStrategy::Masked).unwrap();

        // The same wall seen from the other side.
        assert_eq!(world.transition(&(1, 0), 'W'), Ok(WorldState::Undefined));

        // Wrapping around crosses a different border.
        assert_eq!(world.transition(&(0, 0), 'W'), Ok(WorldState::Defined((1, 0))));
        assert_eq!(world.transition(&(0, 1), 'E'), Ok(WorldState::Defined((1, 1))));
    }

    #[test]
    fn test_wall_on_the_cyclic_border() {
        let grid = Gridworld2D::new((3, 3)).unwrap();
        let world = Gridworld2DWalls::new(grid, [Wall::north_of((1, 2))], UndefinedActionStrategy::Identity).unwrap();

        assert_eq!(world.transition(&(1, 2), 'N'), Ok(WorldState::Defined((1, 2))));
        assert_eq!(world.transition(&(1, 0), 'S'), Ok(WorldState::Defined((1, 0))));
        assert_eq!(world.transition(&(1, 1), 'N'), Ok(WorldState::Defined((1, 2))));
    }

    #[test]
    fn test_wall_outside_grid() {
        let grid = Gridworld2D::new((2, 2)).unwrap();
        assert!(Gridworld2DWalls::new(grid, [Wall::east_of((2, 0))], UndefinedActionStrategy::Identity).is_err());
    }
}
