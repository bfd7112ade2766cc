//! Bevy ECS integration: drives a [`LoadStateMachine`] from a schedule.
//!
//! The page driver writes [`LoadEventMessage`]s, [`drive_load_state`] folds
//! them into the [`LoadStateResource`] and emits one [`LoadStateChanged`] per
//! published state, which overlay systems read.

use bevy_ecs::{event::Events, prelude::*};

use crate::{
    config::LoadConfig,
    event::LoadEvent,
    machine::{LoadStateMachine, Transition},
    state::LoadState,
};

/// Current load state owned by the ECS world.
#[derive(Resource, Debug, Default)]
pub struct LoadStateResource(pub LoadStateMachine);

impl LoadStateResource {
    pub fn current(&self) -> &LoadState {
        self.0.current()
    }
}

/// Driver or connectivity event entering the world.
#[derive(Event, Debug, Clone)]
pub struct LoadEventMessage(pub LoadEvent);

/// A newly published load state.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct LoadStateChanged(pub LoadState);

/// Inserts the resource and both event queues.
pub fn init_load_state(world: &mut World, config: &LoadConfig) {
    world.insert_resource(LoadStateResource(LoadStateMachine::from_config(config)));
    world.init_resource::<Events<LoadEventMessage>>();
    world.init_resource::<Events<LoadStateChanged>>();
}

pub fn drive_load_state(
    mut incoming: EventReader<LoadEventMessage>,
    mut machine: ResMut<LoadStateResource>,
    mut changed: EventWriter<LoadStateChanged>,
) {
    for LoadEventMessage(event) in incoming.read() {
        if let Transition::Changed { to, .. } = machine.0.apply(event.clone()) {
            changed.write(LoadStateChanged(to));
        }
    }
}
