use transalg_world::Primitive;
use transalg_world::World;
use transalg_world::WorldError;
use transalg_world::WorldState;

use crate::GridPosition;
use crate::Gridworld2D;

/// The positions of the agent and the block.
pub type AgentBlock = (GridPosition, GridPosition);

/// A cyclic grid containing an agent and a block, the agent pushes the block
/// one cell ahead when it moves into it.
#[derive(Clone, Debug)]
pub struct Gridworld2DBlock {
    grid: Gridworld2D,
    states: Vec<AgentBlock>,
}

impl Gridworld2DBlock {
    pub fn new(grid: Gridworld2D) -> Result<Gridworld2DBlock, WorldError> {
        if grid.states().len() < 2 {
            return Err(WorldError::InvalidWorld(
                "a block world needs room for both the agent and the block".to_string(),
            ));
        }

        let mut states = Vec::new();
        for agent in grid.states() {
            for block in grid.states() {
                if agent != block {
                    states.push((*agent, *block));
                }
            }
        }

        Ok(Gridworld2DBlock { grid, states })
    }
}

impl World for Gridworld2DBlock {
    type State = AgentBlock;

    fn primitive_actions(&self) -> &[Primitive] {
        self.grid.primitive_actions()
    }

    fn states(&self) -> &[AgentBlock] {
        &self.states
    }

    fn transition(&self, &(agent, block): &AgentBlock, primitive: Primitive) -> Result<WorldState<AgentBlock>, WorldError> {
        let movement = self.grid.movement(primitive)?;
        let next = self.grid.step(agent, movement);

        if next == block {
            Ok(WorldState::Defined((next, self.grid.step(block, movement))))
        } else {
            Ok(WorldState::Defined((next, block)))
        }
    }

    fn is_valid_state(&self, (agent, block): &AgentBlock) -> bool {
        agent != block && self.grid.is_valid_state(agent) && self.grid.is_valid_state(block)
    }
}
