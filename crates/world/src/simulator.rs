use crate::Action;
use crate::World;
use crate::WorldError;
use crate::WorldState;

/// Keeps a current state of a world and updates it by applying actions.
pub struct Simulator<'a, W: World> {
    world: &'a W,
    state: WorldState<W::State>,
}

impl<'a, W: World> Simulator<'a, W> {
    /// Creates a simulator that starts in the given state.
    pub fn new(world: &'a W, state: WorldState<W::State>) -> Result<Self, WorldError> {
        let mut simulator = Simulator {
            world,
            state: WorldState::Undefined,
        };
        simulator.set_state(state)?;
        Ok(simulator)
    }

    /// Changes the current state, fails for states outside the world.
    pub fn set_state(&mut self, state: WorldState<W::State>) -> Result<(), WorldError> {
        if let WorldState::Defined(inner) = &state {
            if !self.world.is_valid_state(inner) {
                return Err(WorldError::InvalidState(format!("{:?}", inner)));
            }
        }

        self.state = state;
        Ok(())
    }

    pub fn state(&self) -> &WorldState<W::State> {
        &self.state
    }

    pub fn into_state(self) -> WorldState<W::State> {
        self.state
    }

    /// Applies the action to the current state, right to left.
    pub fn apply_action_sequence(&mut self, action: &Action) -> Result<(), WorldError> {
        self.state = self.world.apply_action(&self.state, action)?;
        Ok(())
    }

    pub fn world(&self) -> &W {
        self.world
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::Primitive;

    /// Two rooms connected by a door 'd', 'x' leaves the building.
    struct Rooms;

    impl World for Rooms {
        type State = u8;

        fn primitive_actions(&self) -> &[Primitive] {
            &['d', 'x']
        }

        fn states(&self) -> &[u8] {
            &[0, 1]
        }

        fn transition(&self, state: &u8, primitive: Primitive) -> Result<WorldState<u8>, WorldError> {
            match primitive {
                'd' => Ok(WorldState::Defined(1 - state)),
                'x' => Ok(WorldState::Undefined),
                _ => Err(WorldError::UnknownPrimitive(primitive)),
            }
        }
    }

    #[test]
    fn test_simulator_applies_sequences() {
        let mut simulator = Simulator::new(&Rooms, WorldState::Defined(0)).unwrap();

        simulator.apply_action_sequence(&Action::from("ddd")).unwrap();
        assert_eq!(simulator.state(), &WorldState::Defined(1));

        simulator.apply_action_sequence(&Action::from("dx")).unwrap();
        assert_eq!(simulator.state(), &WorldState::Undefined);

        simulator.apply_action_sequence(&Action::from("d")).unwrap();
        assert_eq!(simulator.state(), &WorldState::Undefined);
    }

    #[test]
    fn test_simulator_rejects_invalid_state() {
        let mut simulator = Simulator::new(&Rooms, WorldState::Defined(1)).unwrap();

        assert_eq!(
            simulator.set_state(WorldState::Defined(2)),
            Err(WorldError::InvalidState("2".to_string()))
        );
        assert_eq!(simulator.state(), &WorldState::Defined(1));
    }
}
