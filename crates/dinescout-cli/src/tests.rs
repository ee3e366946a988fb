use super::*;

#[test]
fn parses_db_ping_command() {
    let cli = Cli::try_parse_from(["dinescout-cli", "db", "ping"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn parses_db_migrate_command() {
    let cli =
        Cli::try_parse_from(["dinescout-cli", "db", "migrate"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Migrate
        })
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["dinescout-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_import_with_path() {
    let cli = Cli::try_parse_from(["dinescout-cli", "import", "data/file1.json"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Import { ref path, dry_run: false }) if path == &PathBuf::from("data/file1.json")
    ));
}

#[test]
fn parses_import_dry_run() {
    let cli =
        Cli::try_parse_from(["dinescout-cli", "import", "dump.json", "--dry-run"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Import { dry_run: true, .. })
    ));
}

#[test]
fn import_requires_a_path() {
    assert!(Cli::try_parse_from(["dinescout-cli", "import"]).is_err());
}

#[test]
fn parses_classify_command() {
    let cli = Cli::try_parse_from(["dinescout-cli", "classify", "dish.jpg"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Classify { ref path }) if path == &PathBuf::from("dish.jpg")
    ));
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["dinescout-cli", "serve"]).is_err());
}
