//! End-to-end declarations of complete machines.

use statekit::builder::{build_state_machine, BuildError, StateMachine};
use statekit::core::{EntityKind, NamedEntity, StateId};
use statekit::effects::EvaluationError;

/// The secret panel controller: the light must be toggled three times
/// before it turns on, then the drawer opens the panel.
fn secret_panel() -> StateMachine {
    build_state_machine(|m| {
        let idle = m.declare_state(|s| {
            s.initial().name("idle").command("unlockDoor").command("lockPanel");
        })?;
        let active = m.declare_state(|s| {
            s.name("activeState");
        })?;
        let waiting_for_light = m.declare_state(|s| {
            s.name("waitingForLightState");
        })?;
        let waiting_for_drawer = m.declare_state(|s| {
            s.name("waitingForDrawerState");
        })?;
        let unlocked_panel = m.declare_state(|s| {
            s.name("unlockedPanelState")
                .command("unlockPanel")
                .command("lockDoor");
        })?;

        let toggles = m.declare_counter(|c| {
            c.initial_value(0).name("toggles");
        })?;

        let door_closed = m.declare_event(|e| {
            e.name("doorClosed");
        })?;
        let drawer_opened = m.declare_event(|e| {
            e.name("drawerOpened");
        })?;
        let toggle_light = m.declare_event(|e| {
            e.name("toggleLight")
                .guard(move |c| Ok(*c.get(toggles)? < 3))
                .effect(move |c| c.increment(toggles, 1).map(|_| ()));
        })?;
        let lights_on = m.declare_event(|e| {
            e.name("lightsOn").guard(move |c| Ok(*c.get(toggles)? >= 3));
        })?;
        let panel_closed = m.declare_event(|e| {
            e.name("panelClosed");
        })?;

        m.declare_transitions(|t| {
            t.from(idle, |p| {
                p.on(door_closed).to(active);
            });
            t.from(active, |p| {
                p.on(drawer_opened).to(waiting_for_light);
            });
            t.from(active, |p| {
                p.add(lights_on.leads_to(waiting_for_drawer));
            });
            t.from(waiting_for_light, |p| {
                p.on(lights_on).to(unlocked_panel);
            });
            t.from(waiting_for_drawer, |p| {
                p.on(drawer_opened).to(unlocked_panel);
            });
            t.from(unlocked_panel, |p| {
                p.on(panel_closed).to(idle).on(toggle_light).to(unlocked_panel);
            });
        })?;
        Ok(())
    })
    .expect("secret panel machine should build")
}

fn state(machine: &StateMachine, name: &str) -> StateId {
    machine.find_state(name).expect("state should be declared")
}

#[test]
fn secret_panel_structure() {
    let machine = secret_panel();

    assert_eq!(machine.states().len(), 5);
    assert_eq!(machine.events().len(), 5);
    assert_eq!(machine.counters().len(), 1);
    assert_eq!(machine.transitions().len(), 7);
    assert_eq!(machine.initial_state(), Some(state(&machine, "idle")));
    assert!(machine.is_complete());

    let active = state(&machine, "activeState");
    let leaving_active = machine
        .transitions()
        .iter()
        .filter(|t| t.source() == active)
        .count();
    assert_eq!(leaving_active, 2);
}

#[test]
fn secret_panel_display_forms() {
    let machine = secret_panel();
    let idle = machine.state(state(&machine, "idle")).unwrap();

    assert_eq!(idle.to_string(), "s(idle,cs([c(unlockDoor), c(lockPanel)]))");

    let first = machine.display_transition(&machine.transitions()[0]).unwrap();
    assert_eq!(
        first.to_string(),
        "s(idle,cs([c(unlockDoor), c(lockPanel)])) -e(doorClosed)-> s(activeState,cs([]))"
    );

    let event = machine.event(machine.find_event("lightsOn").unwrap()).unwrap();
    assert_eq!(event.to_string(), "e(lightsOn)");
}

#[test]
fn secret_panel_walkthrough() {
    let mut machine = secret_panel();
    let idle = state(&machine, "idle");
    let active = state(&machine, "activeState");
    let waiting_for_drawer = state(&machine, "waitingForDrawerState");
    let unlocked = state(&machine, "unlockedPanelState");
    let door_closed = machine.find_event("doorClosed").unwrap();
    let lights_on = machine.find_event("lightsOn").unwrap();
    let drawer_opened = machine.find_event("drawerOpened").unwrap();
    let toggle_light = machine.find_event("toggleLight").unwrap();
    let panel_closed = machine.find_event("panelClosed").unwrap();

    assert_eq!(machine.fire(idle, door_closed).unwrap(), Some(active));
    assert_eq!(machine.fire(active, lights_on).unwrap(), None);
    let waiting_for_light = state(&machine, "waitingForLightState");
    assert_eq!(machine.fire(active, drawer_opened).unwrap(), Some(waiting_for_light));

    for _ in 0..3 {
        assert_eq!(machine.fire(unlocked, toggle_light).unwrap(), Some(unlocked));
    }
    assert_eq!(machine.fire(unlocked, toggle_light).unwrap(), None);

    assert_eq!(machine.fire(active, lights_on).unwrap(), Some(waiting_for_drawer));
    assert_eq!(machine.fire(waiting_for_drawer, drawer_opened).unwrap(), Some(unlocked));
    assert_eq!(machine.fire(unlocked, panel_closed).unwrap(), Some(idle));
}

#[test]
fn duplicate_and_conflicting_transitions_are_allowed() {
    let mut ids = None;
    let machine = build_state_machine(|m| {
        let a = m.declare_state(|s| {
            s.initial().name("a");
        })?;
        let b = m.declare_state(|s| {
            s.name("b");
        })?;
        let c = m.declare_state(|s| {
            s.name("c");
        })?;
        let go = m.declare_event(|e| {
            e.name("go");
        })?;
        m.declare_transitions(|t| {
            t.from(a, |p| {
                p.on(go).to(b).on(go).to(b);
            });
            t.from(a, |p| {
                p.on(go).to(c);
            });
        })?;
        ids = Some((a, b, c, go));
        Ok(())
    })
    .unwrap();

    let (a, b, c, go) = ids.unwrap();
    let triples: Vec<_> = machine
        .transitions()
        .iter()
        .map(|t| (t.source(), t.trigger(), t.target()))
        .collect();

    assert_eq!(triples, vec![(a, go, b), (a, go, b), (a, go, c)]);
    assert!(machine.is_complete());
}

#[test]
fn transitions_block_replaces_previous_block() {
    let mut ids = None;
    let machine = build_state_machine(|m| {
        let a = m.declare_state(|s| {
            s.initial().name("a");
        })?;
        let b = m.declare_state(|s| {
            s.name("b");
        })?;
        let go = m.declare_event(|e| {
            e.name("go");
        })?;
        let back = m.declare_event(|e| {
            e.name("back");
        })?;
        m.declare_transitions(|t| {
            t.from(a, |p| {
                p.on(go).to(b);
            });
        })?;
        m.declare_transitions(|t| {
            t.from(b, |p| {
                p.on(back).to(a);
            });
        })?;
        ids = Some((a, b, back));
        Ok(())
    })
    .unwrap();

    let (a, b, back) = ids.unwrap();
    assert_eq!(machine.transitions().len(), 1);
    let only = machine.transitions()[0];
    assert_eq!((only.source(), only.trigger(), only.target()), (b, back, a));
}

#[test]
fn handle_from_another_machine_aborts_construction() {
    let other = secret_panel();
    let foreign = state(&other, "idle");

    let result = build_state_machine(|m| {
        let a = m.declare_state(|s| {
            s.initial().name("a");
        })?;
        let go = m.declare_event(|e| {
            e.name("go");
        })?;
        m.declare_transitions(|t| {
            t.from(a, |p| {
                p.on(go).to(foreign);
            });
        })?;
        Ok(())
    });

    match result {
        Err(BuildError::ForeignHandle { owner, machine, .. }) => {
            assert_eq!(owner, other.tag());
            assert_ne!(machine, other.tag());
        }
        other => panic!("expected a foreign handle error, got {other:?}"),
    }
}

#[test]
fn handle_from_a_machine_built_inside_the_block_is_foreign() {
    let mut inner_tag = None;
    let result = build_state_machine(|m| {
        let a = m.declare_state(|s| {
            s.initial().name("a");
        })?;
        let mut only_in_inner = None;
        let inner = build_state_machine(|inner| {
            inner.declare_state(|s| {
                s.initial().name("a");
            })?;
            only_in_inner = Some(inner.declare_state(|s| {
                s.name("onlyInInner");
            })?);
            Ok(())
        })?;
        inner_tag = Some(inner.tag());
        let only_in_inner = only_in_inner.unwrap();

        m.declare_state(|s| {
            s.name("onlyInOuter");
        })?;
        let go = m.declare_event(|e| {
            e.name("go");
        })?;
        m.declare_transitions(|t| {
            t.from(a, |p| {
                p.on(go).to(only_in_inner);
            });
        })?;
        Ok(())
    });

    match result {
        Err(BuildError::ForeignHandle { owner, machine, .. }) => {
            assert_eq!(Some(owner), inner_tag);
            assert_ne!(machine, owner);
        }
        other => panic!("expected a foreign handle error, got {other:?}"),
    }
}

#[test]
fn renaming_a_counter_aborts_construction() {
    let result = build_state_machine(|m| {
        m.declare_counter(|c| {
            c.name("toggles").name("Toggles");
        })?;
        Ok(())
    });

    assert!(matches!(
        result,
        Err(BuildError::AlreadyNamed {
            kind: EntityKind::Counter,
            ..
        })
    ));
}

#[test]
fn caller_errors_from_effects_propagate() {
    let mut ids = None;
    let mut machine = build_state_machine(|m| {
        let a = m.declare_state(|s| {
            s.initial().name("a");
        })?;
        let jam = m.declare_event(|e| {
            e.name("jam")
                .effect(|_| Err(EvaluationError::Failed("motor jammed".to_string())));
        })?;
        m.declare_transitions(|t| {
            t.from(a, |p| {
                p.on(jam).to(a);
            });
        })?;
        ids = Some((a, jam));
        Ok(())
    })
    .unwrap();

    let (a, jam) = ids.unwrap();
    assert_eq!(
        machine.fire(a, jam),
        Err(EvaluationError::Failed("motor jammed".to_string()))
    );
}

#[test]
fn snapshot_of_secret_panel() {
    let machine = secret_panel();
    let snapshot = machine.snapshot();

    assert_eq!(snapshot.machine, machine.tag());
    assert_eq!(snapshot.transitions.len(), 7);
    assert_eq!(
        snapshot.transitions[0].display,
        "s(idle,cs([c(unlockDoor), c(lockPanel)])) -e(doorClosed)-> s(activeState,cs([]))"
    );
    assert_eq!(snapshot.counters[0].name.as_deref(), Some("toggles"));
}
