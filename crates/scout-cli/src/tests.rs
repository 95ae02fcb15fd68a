use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["scout"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_machines_command() {
    let cli = Cli::try_parse_from(["scout", "machines"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Machines)));
}

#[test]
fn parses_wizard_command() {
    let cli = Cli::try_parse_from(["scout", "wizard"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Wizard)));
}

#[test]
fn parses_analyze_with_address() {
    let cli = Cli::try_parse_from([
        "scout",
        "analyze",
        "--machine",
        "icesupply-hielo",
        "--address",
        "Av. Insurgentes Sur 1000, CDMX",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Some(Commands::Analyze {
            machine,
            address,
            lat,
            here,
            radius,
            json,
            ..
        }) => {
            assert_eq!(machine, "icesupply-hielo");
            assert_eq!(address.as_deref(), Some("Av. Insurgentes Sur 1000, CDMX"));
            assert!(lat.is_none());
            assert!(!here);
            assert!(radius.is_none());
            assert!(!json);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parses_analyze_with_negative_longitude() {
    let cli = Cli::try_parse_from([
        "scout",
        "analyze",
        "--machine",
        "agranel-agua",
        "--lat",
        "19.4326",
        "--lon",
        "-99.1332",
        "--radius",
        "500",
        "--json",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Analyze {
            lat: Some(_),
            lon: Some(_),
            radius: Some(500),
            json: true,
            ..
        })
    ));
}

#[test]
fn parses_analyze_here() {
    let cli = Cli::try_parse_from(["scout", "analyze", "--machine", "agranel-duo", "--here"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Analyze { here: true, .. })
    ));
}

#[test]
fn analyze_requires_a_site() {
    let result = Cli::try_parse_from(["scout", "analyze", "--machine", "agranel-duo"]);
    assert!(result.is_err());
}

#[test]
fn analyze_rejects_two_sites() {
    let result = Cli::try_parse_from([
        "scout",
        "analyze",
        "--machine",
        "agranel-duo",
        "--address",
        "Centro",
        "--here",
    ]);
    assert!(result.is_err());
}

#[test]
fn analyze_lat_requires_lon() {
    let result = Cli::try_parse_from([
        "scout",
        "analyze",
        "--machine",
        "agranel-duo",
        "--lat",
        "19.4",
    ]);
    assert!(result.is_err());
}

#[test]
fn analyze_rejects_zero_radius() {
    let result = Cli::try_parse_from([
        "scout",
        "analyze",
        "--machine",
        "agranel-duo",
        "--here",
        "--radius",
        "0",
    ]);
    assert!(result.is_err());
}

#[test]
fn help_is_answered_by_the_parser_alone() {
    // `main` parses before loading env config.
    let err = Cli::try_parse_from(["scout", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}
