use crate::config::Settings;
use crate::error::{Error, Result};
use crate::logger::{Logger, Policy};
use crate::resolver::resolve;
use crate::snapshot;
use crate::transport::{HttpTransport, Transport};
use crate::tree::{Format, NodeId, Tree};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

/// Mirror the directory tree of an ArcGIS REST services endpoint.
#[derive(Parser, Debug, PartialEq)]
#[command(name = "arcmirror", version, about, arg_required_else_help = true)]
pub struct Args {
    /// Server base URL; the directory is crawled from {server}/arcgis/rest/services
    #[arg(long, env = "SOURCE_ARCGIS_SERVER_URL", global = true)]
    pub server: Option<String>,

    /// Crawl from this folder URL instead
    #[arg(long, global = true)]
    pub root: Option<String>,

    /// Snapshot file, loaded when present and saved after every crawl
    #[arg(long, env = "ARCMIRROR_SNAPSHOT", global = true)]
    pub snapshot: Option<PathBuf>,

    /// Crawl even if the snapshot exists
    #[arg(long, global = true)]
    pub refresh: bool,

    /// Only print results, not progress
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Clone)]
pub enum Command {
    /// Crawl the server (always) and print what was found
    Crawl,

    /// Print every node as an indented outline
    Outline,

    /// Count the nodes of each kind
    Stats,

    /// Print the path from the root down to a node
    Crumbs {
        /// Node URL, or just its path
        url: String,
    },

    /// Print a node's own document
    Show {
        /// Node URL, or just its path
        url: String,

        /// Indent the JSON (pjson)
        #[arg(long)]
        pretty: bool,
    },
}

/// What we decide to do based on CLI arguments
#[derive(PartialEq, Debug)]
pub enum Behavior {
    Help(String),
    Version,
    UnexpectedArg(String),
    Run(Args),
}

/// Takes the full argument list, program name first.
pub fn parse<I, S>(args: I) -> Behavior
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
{
    match Args::try_parse_from(args) {
        Ok(args) => Behavior::Run(args),
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                Behavior::Help(e.render().to_string())
            }
            ErrorKind::DisplayVersion => Behavior::Version,
            _ => Behavior::UnexpectedArg(e.render().to_string()),
        },
    }
}

pub fn execute(behavior: Behavior, log: &mut Logger) -> ExitCode {
    let result = match behavior {
        Behavior::Help(usage) => write!(log.stdout, "{}", usage).map_err(Error::Output),
        Behavior::Version => {
            write!(log.stdout, "{}\n", env!("CARGO_PKG_VERSION")).map_err(Error::Output)
        }
        Behavior::UnexpectedArg(msg) => {
            write!(log.stderr, "{}", msg).expect("Failed to print usage error");
            return ExitCode::from(2);
        }
        Behavior::Run(args) => run_live(args, log),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            write!(log.stderr, "Failed to execute: {}\n", e).expect("Failed to print failure msg");
            ExitCode::from(1)
        }
    }
}

fn run_live(args: Args, log: &mut Logger) -> Result<()> {
    let settings = Settings::from_args(&args);
    let transport = HttpTransport::new().map_err(Error::Client)?;
    run(&args.command, &settings, &transport, log)
}

/// Carry out one command against whatever `transport` reaches.
pub fn run<T: Transport>(
    command: &Command,
    settings: &Settings,
    transport: &T,
    log: &mut Logger,
) -> Result<()> {
    if settings.quiet {
        log.pol.status = Policy::Silent;
    }
    let tree = match command {
        Command::Crawl => crawl(settings, transport, log)?,
        _ => obtain(settings, transport, log)?,
    };

    match command {
        Command::Crawl | Command::Stats => write!(log.report(), "{}\n", tree.stats())?,
        Command::Outline => write!(log.report(), "{}", tree.outline())?,
        Command::Crumbs { url } => {
            for crumb in tree.ancestors(lookup(&tree, url)?) {
                write!(log.report(), "{}\n", crumb)?;
            }
        }
        Command::Show { url, pretty } => {
            let format = match *pretty {
                true => Format::PrettyJson,
                false => Format::Json,
            };
            let doc = tree
                .document(lookup(&tree, url)?, format)
                .map_err(|e| Error::Output(e.into()))?;
            write!(log.report(), "{}\n", doc)?;
        }
    }
    Ok(())
}

/// The snapshot if we have one, otherwise a fresh crawl.
fn obtain<T: Transport>(settings: &Settings, transport: &T, log: &mut Logger) -> Result<Tree> {
    match &settings.snapshot {
        Some(path) if !settings.refresh && path.exists() => {
            write!(log.status(), "--- Load {} ---\n", path.display())?;
            snapshot::load(path)
        }
        _ => crawl(settings, transport, log),
    }
}

fn crawl<T: Transport>(settings: &Settings, transport: &T, log: &mut Logger) -> Result<Tree> {
    let root = settings.root_url()?;
    write!(log.status(), "--- Crawl {} ---\n", root)?;
    let tree = resolve(transport, root)?;
    if let Some(path) = &settings.snapshot {
        snapshot::save(&tree, path)?;
        write!(log.status(), "--- Save {} ---\n", path.display())?;
    }
    Ok(tree)
}

/// A full URL, or a bare path like `/arcgis/rest/services/Parks/FeatureServer`.
fn lookup(tree: &Tree, target: &str) -> Result<NodeId> {
    let found = match target.starts_with('/') {
        true => tree.find_path(target),
        false => tree.find(target),
    };
    found.ok_or_else(|| Error::NotFound(target.into()))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::memtransport::MemTransport;
    use crate::test_tools::*;
    use indoc::indoc;
    use rusty_fork::rusty_fork_test;
    use tempfile::tempdir;

    fn settings() -> Settings {
        Settings {
            root_url: Some(ROOT.into()),
            ..Settings::default()
        }
    }

    fn recorded(log: &Logger) -> String {
        log.stdout.recorded().unwrap()
    }

    #[test]
    fn parse_empty() {
        assert!(matches!(parse(["arcmirror"]), Behavior::Help(_)));
    }

    #[test]
    fn parse_help() {
        match parse(["arcmirror", "--help"]) {
            Behavior::Help(usage) => {
                assert!(usage.contains("Usage: arcmirror"));
                assert!(usage.contains("crumbs"));
            }
            other => panic!("Expected help, got {:?}", other),
        }
    }

    #[test]
    fn parse_version() {
        assert_eq!(parse(["arcmirror", "--version"]), Behavior::Version);
    }

    #[test]
    fn parse_unexpected() {
        match parse(["arcmirror", "--bogus", "outline"]) {
            Behavior::UnexpectedArg(msg) => assert!(msg.contains("--bogus")),
            other => panic!("Expected unexpected arg, got {:?}", other),
        }
        assert!(matches!(
            parse(["arcmirror", "show"]),
            Behavior::UnexpectedArg(_)
        ));
    }

    #[test]
    fn parse_run() {
        match parse(["arcmirror", "show", "--pretty", "/x/Parks/FeatureServer", "--root", ROOT, "-q"]) {
            Behavior::Run(args) => {
                assert_eq!(args.root.as_deref(), Some(ROOT));
                assert!(args.quiet);
                assert!(!args.refresh);
                assert_eq!(
                    args.command,
                    Command::Show {
                        url: "/x/Parks/FeatureServer".into(),
                        pretty: true,
                    }
                );
            }
            other => panic!("Expected run, got {:?}", other),
        }
    }

    #[test]
    fn execute_help() {
        let mut log = Logger::new_vec();
        let code = execute(Behavior::Help("usage text\n".into()), &mut log);
        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(recorded(&log), "usage text\n");
    }

    #[test]
    fn execute_version() {
        let mut log = Logger::new_vec();
        execute(Behavior::Version, &mut log);
        assert_eq!(recorded(&log), env!("CARGO_PKG_VERSION").to_owned() + "\n");
    }

    #[test]
    fn execute_unexpected_arg() {
        let mut log = Logger::new_vec();
        let code = execute(Behavior::UnexpectedArg("error: xyz\n".into()), &mut log);
        assert_eq!(code, ExitCode::from(2));
        assert_eq!(recorded(&log), "");
        assert_eq!(log.stderr.recorded().unwrap(), "error: xyz\n");
    }

    #[test]
    fn execute_failure() {
        let mut log = Logger::new_vec();
        let args = Args {
            server: None,
            root: None,
            snapshot: None,
            refresh: false,
            quiet: false,
            command: Command::Stats,
        };
        let code = execute(Behavior::Run(args), &mut log);
        assert_eq!(code, ExitCode::from(1));
        assert!(log
            .stderr
            .recorded()
            .unwrap()
            .starts_with("Failed to execute: no server to crawl"));
    }

    #[test]
    fn outline() -> Result<()> {
        let mut log = Logger::new_vec();
        run(&Command::Outline, &settings(), &server(), &mut log)?;
        assert_eq!(
            recorded(&log),
            format!("--- Crawl {} ---\n", ROOT) + &resolve(&server(), ROOT)?.outline()
        );
        Ok(())
    }

    #[test]
    fn crumbs() -> Result<()> {
        let mut log = Logger::new_vec();
        let settings = Settings {
            quiet: true,
            ..settings()
        };
        let target = Command::Crumbs {
            url: "/arcgis/rest/services/Parks/FeatureServer/2".into(),
        };
        run(&target, &settings, &server(), &mut log)?;
        assert_eq!(
            recorded(&log),
            indoc! {"
                services <https://gis.example.com/arcgis/rest/services>
                Parks <https://gis.example.com/arcgis/rest/services/Parks/FeatureServer>
                Inspections <https://gis.example.com/arcgis/rest/services/Parks/FeatureServer/2>
            "}
        );
        Ok(())
    }

    #[test]
    fn show() -> Result<()> {
        let mut log = Logger::new_vec();
        let settings = Settings {
            quiet: true,
            ..settings()
        };
        let target = Command::Show {
            url: url("/Utilities/Routing/GPServer"),
            pretty: false,
        };
        run(&target, &settings, &server(), &mut log)?;
        assert_eq!(
            recorded(&log),
            "{\"serviceDescription\":\"Network routing\",\"tasks\":[\"FindRoute\"]}\n"
        );
        Ok(())
    }

    #[test]
    fn show_missing() {
        let mut log = Logger::new_vec();
        let target = Command::Show {
            url: url("/Nowhere/MapServer"),
            pretty: true,
        };
        match run(&target, &settings(), &server(), &mut log) {
            Err(Error::NotFound(what)) => assert_eq!(what, url("/Nowhere/MapServer")),
            other => panic!("Expected not found, got {:?}", other),
        }
    }

    #[test]
    fn snapshot_reuse() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("mirror.json");
        let settings = Settings {
            snapshot: Some(path.clone()),
            ..settings()
        };

        let mut log = Logger::new_vec();
        run(&Command::Crawl, &settings, &server(), &mut log)?;
        assert_eq!(
            recorded(&log),
            format!(
                "--- Crawl {} ---\n--- Save {} ---\n2 folders, 4 services, 3 layers, 1 tables\n",
                ROOT,
                path.display()
            )
        );
        assert!(path.exists());

        // Second time around, nothing hits the network.
        let offline = MemTransport::new();
        let mut log = Logger::new_vec();
        run(&Command::Stats, &settings, &offline, &mut log)?;
        assert_eq!(offline.requests(), Vec::<String>::new());
        assert_eq!(
            recorded(&log),
            format!(
                "--- Load {} ---\n2 folders, 4 services, 3 layers, 1 tables\n",
                path.display()
            )
        );
        Ok(())
    }

    #[test]
    fn snapshot_refresh() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("mirror.json");
        let settings = Settings {
            snapshot: Some(path.clone()),
            refresh: true,
            ..settings()
        };
        snapshot::save(&resolve(&server(), ROOT)?, &path)?;

        let transport = server();
        run(&Command::Outline, &settings, &transport, &mut Logger::new_vec())?;
        assert_eq!(transport.requests().len(), 10);
        Ok(())
    }

    rusty_fork_test! {

        #[test]
        fn server_from_env() {
            std::env::set_var("SOURCE_ARCGIS_SERVER_URL", "https://gis.example.com/");
            std::env::remove_var("ARCMIRROR_SNAPSHOT");
            let Behavior::Run(args) = parse(["arcmirror", "stats"]) else {
                panic!("Expected to run");
            };
            let settings = Settings::from_args(&args);
            assert_eq!(settings.root_url().unwrap(), ROOT);
            assert_eq!(settings.snapshot, None);

            let mut log = Logger::new_vec();
            run(&args.command, &settings, &server(), &mut log).unwrap();
            assert!(recorded(&log).ends_with("2 folders, 4 services, 3 layers, 1 tables\n"));
        }
    }
}
