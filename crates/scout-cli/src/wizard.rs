//! `scout wizard`: the interactive three-step flow.

use std::io::Write as _;

use scout_core::{AppConfig, Catalog};
use scout_osm::{LocationInput, MarketScout};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::analyze::Site;
use crate::flow::{transition, Event, Step, WizardState};
use crate::render;

/// What the user typed at a prompt, before it becomes an [`Event`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Command {
    Quit,
    Back,
    Reset,
    Here,
    Text(String),
}

pub(crate) fn parse_command(line: &str) -> Command {
    match line.trim() {
        "q" | "salir" => Command::Quit,
        "b" | "volver" => Command::Back,
        "r" | "reiniciar" => Command::Reset,
        "aqui" | "aquí" => Command::Here,
        other => Command::Text(other.to_string()),
    }
}

/// Drive the step machine from stdin until the user quits or input ends.
///
/// # Errors
///
/// Returns an error if the HTTP clients cannot be built or stdin fails.
pub(crate) async fn run_wizard(config: &AppConfig, catalog: &Catalog) -> anyhow::Result<()> {
    let scout = MarketScout::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build OpenStreetMap clients: {e}"))?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut state = WizardState::default();

    loop {
        let event = match state.step {
            Step::Machine => {
                println!("{}", Step::Machine.heading());
                render::print_machine_menu(catalog);
                let Some(command) = prompt(&mut lines, "número de modelo (q para salir)").await? else {
                    break;
                };
                match command {
                    Command::Quit => break,
                    Command::Reset => Event::Reset,
                    Command::Text(choice) => match pick_machine(catalog, &choice) {
                        Some(machine) => Event::SelectMachine(machine.clone()),
                        None => {
                            println!("Elige un número entre 1 y {}.", catalog.len());
                            continue;
                        }
                    },
                    Command::Back | Command::Here => continue,
                }
            }
            Step::Location => {
                println!("{}", Step::Location.heading());
                let Some(command) =
                    prompt(&mut lines, "dirección, 'aquí' para tu ubicación, 'b' para volver").await?
                else {
                    break;
                };
                let site = match command {
                    Command::Quit => break,
                    Command::Back => {
                        state = transition(state, Event::Back);
                        continue;
                    }
                    Command::Reset => {
                        state = transition(state, Event::Reset);
                        continue;
                    }
                    Command::Here => Site::Here,
                    Command::Text(text) if text.is_empty() => continue,
                    Command::Text(text) => Site::Given(LocationInput::Address(text)),
                };
                let located = match site.into_input(&scout).await {
                    Ok(input) => scout.locate(&input).await,
                    Err(e) => Err(e),
                };
                match located {
                    Ok(location) => Event::LocationResolved(location),
                    Err(e) => {
                        tracing::debug!(error = %e, "site not resolved");
                        println!("{}", e.retry_prompt());
                        continue;
                    }
                }
            }
            Step::Map => {
                if let (Some(machine), Some(location)) = (&state.machine, &state.location) {
                    println!("{}", Step::Map.heading());
                    println!("Escaneando zona\u{2026}");
                    let result = scout.run_analysis(location.coordinate, machine.category).await;
                    render::print_result(location, machine, scout.radius_m(), &result);
                }
                loop {
                    match prompt(&mut lines, "'b' otra ubicación, 'r' nuevo análisis, 'q' salir").await? {
                        None | Some(Command::Quit) => return Ok(()),
                        Some(Command::Back) => break Event::Back,
                        Some(Command::Reset) => break Event::Reset,
                        Some(Command::Here | Command::Text(_)) => println!("Usa 'b', 'r' o 'q'."),
                    }
                }
            }
        };
        state = transition(state, event);
    }

    Ok(())
}

/// Accepts a 1-based menu number or a machine id.
pub(crate) fn pick_machine<'a>(
    catalog: &'a Catalog,
    choice: &str,
) -> Option<&'a scout_core::EquipmentProfile> {
    match choice.parse::<usize>() {
        Ok(n) if n >= 1 => catalog.machines().get(n - 1),
        Ok(_) => None,
        Err(_) => catalog.get(choice),
    }
}

async fn prompt(
    lines: &mut Lines<BufReader<Stdin>>,
    hint: &str,
) -> anyhow::Result<Option<Command>> {
    print!("{hint} > ");
    std::io::stdout().flush()?;
    Ok(lines.next_line().await?.as_deref().map(parse_command))
}
