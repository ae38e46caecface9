use serde::Deserialize;
use serde::Serialize;

use transalg_world::Primitive;
use transalg_world::World;
use transalg_world::WorldError;
use transalg_world::WorldState;

/// A position (x, y) in a two dimensional grid.
pub type GridPosition = (usize, usize);

/// The moves available in a two dimensional grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move2D {
    Stay,
    North,
    East,
    South,
    West,
}

impl Move2D {
    /// Maps the symbols '1', 'N', 'E', 'S' and 'W' to their moves.
    pub fn from_symbol(symbol: Primitive) -> Option<Move2D> {
        match symbol {
            '1' => Some(Move2D::Stay),
            'N' => Some(Move2D::North),
            'E' => Some(Move2D::East),
            'S' => Some(Move2D::South),
            'W' => Some(Move2D::West),
            _ => None,
        }
    }
}

/// A cyclic grid in which the agent can move in the four compass directions,
/// leaving the grid on one side enters it on the opposite side.
#[derive(Clone, Debug)]
pub struct Gridworld2D {
    shape: (usize, usize),
    primitives: Vec<Primitive>,
    states: Vec<GridPosition>,
}

impl Gridworld2D {
    /// The default order of the primitive actions.
    pub const PRIMITIVES: [Primitive; 5] = ['1', 'N', 'E', 'S', 'W'];

    pub fn new(shape: (usize, usize)) -> Result<Gridworld2D, WorldError> {
        Self::with_primitives(shape, Self::PRIMITIVES.to_vec())
    }

    /// Creates a grid whose primitive actions are given in a specific order.
    pub fn with_primitives(shape: (usize, usize), primitives: Vec<Primitive>) -> Result<Gridworld2D, WorldError> {
        if shape.0 == 0 || shape.1 == 0 {
            return Err(WorldError::InvalidWorld(format!("grid of shape {:?} has no cells", shape)));
        }

        if let Some(&unknown) = primitives.iter().find(|symbol| Move2D::from_symbol(**symbol).is_none()) {
            return Err(WorldError::UnknownPrimitive(unknown));
        }

        let mut states = Vec::with_capacity(shape.0 * shape.1);
        for x in 0..shape.0 {
            for y in 0..shape.1 {
                states.push((x, y));
            }
        }

        Ok(Gridworld2D {
            shape,
            primitives,
            states,
        })
    }

    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    /// Returns the position after the move, wrapping around the borders.
    pub fn step(&self, (x, y): GridPosition, movement: Move2D) -> GridPosition {
        let (width, height) = self.shape;
        match movement {
            Move2D::Stay => (x, y),
            Move2D::North => (x, (y + 1) % height),
            Move2D::East => ((x + 1) % width, y),
            Move2D::South => (x, (y + height - 1) % height),
            Move2D::West => ((x + width - 1) % width, y),
        }
    }

    pub(crate) fn movement(&self, primitive: Primitive) -> Result<Move2D, WorldError> {
        Move2D::from_symbol(primitive).ok_or(WorldError::UnknownPrimitive(primitive))
    }
}

impl World for Gridworld2D {
    type State = GridPosition;

    fn primitive_actions(&self) -> &[Primitive] {
        &self.primitives
    }

    fn states(&self) -> &[GridPosition] {
        &self.states
    }

    fn transition(&self, state: &GridPosition, primitive: Primitive) -> Result<WorldState<GridPosition>, WorldError> {
        let movement = self.movement(primitive)?;
        Ok(WorldState::Defined(self.step(*state, movement)))
    }

    fn is_valid_state(&self, &(x, y): &GridPosition) -> bool {
        x < self.shape.0 && y < self.shape.1
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;
    use test_log::test;

    use transalg_world::Action;
    use transalg_world::Simulator;

    use super::*;

    #[test_case((0, 0), 'N', (0, 1) ; "north")]
    #[test_case((0, 2), 'N', (0, 0) ; "north wraps")]
    #[test_case((0, 0), 'S', (0, 2) ; "south wraps")]
    #[test_case((1, 1), 'E', (0, 1) ; "east wraps")]
    #[test_case((0, 1), 'W', (1, 1) ; "west wraps")]
    #[test_case((1, 2), '1', (1, 2) ; "stay")]
    fn test_cyclic_moves(start: GridPosition, primitive: Primitive, expected: GridPosition) {
        let world = Gridworld2D::new((2, 3)).unwrap();
        assert_eq!(world.transition(&start, primitive), Ok(WorldState::Defined(expected)));
    }

    #[test]
    fn test_action_sequences() {
        let world = Gridworld2D::new((3, 3)).unwrap();
        let mut simulator = Simulator::new(&world, WorldState::Defined((0, 0))).unwrap();

        // Applied right to left: east, east, north.
        simulator.apply_action_sequence(&Action::from("NEE")).unwrap();
        assert_eq!(simulator.state(), &WorldState::Defined((2, 1)));

        assert!(simulator.set_state(WorldState::Defined((3, 0))).is_err());
    }

    #[test]
    fn test_invalid_grids() {
        assert!(matches!(Gridworld2D::new((0, 2)), Err(WorldError::InvalidWorld(_))));
        assert_eq!(
            Gridworld2D::with_primitives((2, 2), vec!['N', 'X']).unwrap_err(),
            WorldError::UnknownPrimitive('X')
        );
    }
}
