use super::*;

#[test]
fn parses_db_ping_command() {
    let cli = Cli::try_parse_from(["spdb-cli", "db", "ping"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn parses_db_migrate_command() {
    let cli = Cli::try_parse_from(["spdb-cli", "db", "migrate"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Migrate
        })
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["spdb-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn extract_defaults() {
    let cli = Cli::try_parse_from([
        "spdb-cli",
        "extract",
        "--url",
        "https://www.instagram.com/natgeo/",
        "--html-file",
        "page.html",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Extract {
            ref url,
            ref html_file,
            save: false,
            compact: false,
            ..
        }) if url == "https://www.instagram.com/natgeo/" && html_file.to_str() == Some("page.html")
    ));
}

#[test]
fn extract_with_save_and_compact() {
    let cli = Cli::try_parse_from([
        "spdb-cli",
        "extract",
        "--url",
        "https://www.linkedin.com/in/jane/",
        "--html-file",
        "jane.html",
        "--save",
        "--compact",
        "--min-html-len",
        "10",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Extract {
            save: true,
            compact: true,
            min_html_len: 10,
            ..
        })
    ));
}

#[test]
fn extract_requires_html_file() {
    let result = Cli::try_parse_from(["spdb-cli", "extract", "--url", "https://x.test/"]);
    assert!(result.is_err());
}

#[test]
fn parses_detect_command() {
    let cli = Cli::try_parse_from(["spdb-cli", "detect", "https://instagram.com/jo"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Detect { ref url }) if url == "https://instagram.com/jo"
    ));
}

#[test]
fn parses_platforms_command() {
    let cli = Cli::try_parse_from(["spdb-cli", "platforms"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Platforms)));
}

#[test]
fn list_parses_platform_and_default_limit() {
    let cli = Cli::try_parse_from(["spdb-cli", "list", "Instagram"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::List {
            platform: Platform::Instagram,
            limit: 20
        })
    ));
}

#[test]
fn list_with_limit() {
    let cli = Cli::try_parse_from(["spdb-cli", "list", "linkedin", "--limit", "5"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::List {
            platform: Platform::LinkedIn,
            limit: 5
        })
    ));
}

#[test]
fn list_rejects_unknown_platform() {
    let result = Cli::try_parse_from(["spdb-cli", "list", "myspace"]);
    assert!(result.is_err());
}
