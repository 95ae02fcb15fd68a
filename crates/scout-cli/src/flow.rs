//! Wizard step machine: machine → location → map.
//!
//! Transitions are a pure function of the current state and one event, so
//! the interactive loop only does I/O. Events that make no sense in the
//! current step leave the state untouched. Going back keeps earlier
//! selections so they can be re-confirmed; reset clears them.

use scout_core::{EquipmentProfile, LocationQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Machine,
    Location,
    Map,
}

impl Step {
    pub(crate) fn heading(self) -> &'static str {
        match self {
            Step::Machine => "1. Elige tu Modelo",
            Step::Location => "2. Define Ubicación",
            Step::Map => "3. Análisis de Mercado",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Event {
    SelectMachine(EquipmentProfile),
    LocationResolved(LocationQuery),
    Back,
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WizardState {
    pub step: Step,
    pub machine: Option<EquipmentProfile>,
    pub location: Option<LocationQuery>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            step: Step::Machine,
            machine: None,
            location: None,
        }
    }
}

pub(crate) fn transition(state: WizardState, event: Event) -> WizardState {
    match (state.step, event) {
        (Step::Machine, Event::SelectMachine(machine)) => WizardState {
            step: Step::Location,
            machine: Some(machine),
            ..state
        },
        (Step::Location, Event::LocationResolved(location)) if state.machine.is_some() => {
            WizardState {
                step: Step::Map,
                location: Some(location),
                ..state
            }
        }
        (Step::Location, Event::Back) => WizardState {
            step: Step::Machine,
            ..state
        },
        (Step::Map, Event::Back) => WizardState {
            step: Step::Location,
            ..state
        },
        (_, Event::Reset) => WizardState::default(),
        (_, _) => state,
    }
}
