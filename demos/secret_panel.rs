//! Secret Panel Controller
//!
//! This example declares the classic secret compartment controller and
//! prints it.
//!
//! Key concepts:
//! - One declaration block builds the whole machine
//! - A counter guards the light toggles
//! - Transitions are grouped by source state
//!
//! Run with: RUST_LOG=statekit=debug cargo run --example secret_panel

use statekit::builder::build_state_machine;
use statekit::core::NamedEntity;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("statekit=info".parse()?))
        .init();

    let machine = build_state_machine(|m| {
        let idle = m.declare_state(|s| {
            s.initial().name("idle");
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
            s.name("unlockedPanelState");
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
        m.declare_event(|e| {
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
                p.on(panel_closed).to(idle);
            });
        })?;
        Ok(())
    })?;

    println!("{machine}");
    Ok(())
}
