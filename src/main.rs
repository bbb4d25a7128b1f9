//! manila-conformance command-line entry point

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Notify;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use manila_conformance::config::Config;
use manila_conformance::resource::ResourceKind;
use manila_conformance::roles::{ClientManager, Role};
use manila_conformance::version::{ApiVersion, VersionRange};

/// Print usage information
fn print_usage() {
    eprintln!("Usage: manila-conformance <config.yaml> <command>");
    eprintln!();
    eprintln!("manila-conformance - conformance toolkit for the shared file systems API");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  check                             Authenticate every role, compare API versions");
    eprintln!("  wait <kind> <id> <state>[,...]    Poll a resource until it reaches a state");
    eprintln!("       [--field <name>] [--role <role>]");
    eprintln!("       state \"deleted\" waits for the resource to disappear");
    eprintln!();
    eprintln!("Example:");
    eprintln!("  manila-conformance /etc/manila-conformance.yaml wait share 7c1e... available");
}

enum Command {
    Check,
    Wait {
        kind: ResourceKind,
        id: String,
        states: Vec<String>,
        field: Option<String>,
        role: Role,
    },
}

fn parse_command(args: &[String]) -> Result<Command, String> {
    match args.first().map(String::as_str) {
        Some("check") if args.len() == 1 => Ok(Command::Check),
        Some("wait") => {
            if args.len() < 4 {
                return Err("wait needs <kind> <id> <state>".to_string());
            }
            let kind = args[1].parse::<ResourceKind>().map_err(|e| e.to_string())?;
            let id = args[2].clone();
            let states: Vec<String> = args[3]
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            if states.is_empty() {
                return Err("wait needs at least one state".to_string());
            }

            let mut field = None;
            let mut role = Role::Member;
            let mut rest = args[4..].iter();
            while let Some(flag) = rest.next() {
                let value = rest.next().ok_or_else(|| format!("{} needs a value", flag))?;
                match flag.as_str() {
                    "--field" => field = Some(value.clone()),
                    "--role" => role = value.parse::<Role>().map_err(|e| e.to_string())?,
                    other => return Err(format!("Unknown option {}", other)),
                }
            }

            Ok(Command::Wait {
                kind,
                id,
                states,
                field,
                role,
            })
        }
        Some(other) => Err(format!("Unknown command {:?}", other)),
        None => Err("Missing command".to_string()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse arguments
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        print_usage();
        std::process::exit(1);
    }

    let config_path = PathBuf::from(&args[1]);
    let command = match parse_command(&args[2..]) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    // Load configuration
    let config = match Config::from_file(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    }

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Loaded configuration from {:?}", config_path);

    let manager = ClientManager::new(Arc::new(config))?;

    // Ctrl-C drops whatever is in flight
    let shutdown = Arc::new(Notify::new());
    let s = shutdown.clone();
    ctrlc::set_handler(move || {
        s.notify_one();
    })?;

    let ok = tokio::select! {
        ok = run(&manager, command) => ok,
        _ = shutdown.notified() => {
            warn!("Interrupted");
            false
        }
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

async fn run(manager: &ClientManager, command: Command) -> bool {
    match command {
        Command::Check => check(manager).await,
        Command::Wait {
            kind,
            id,
            states,
            field,
            role,
        } => wait(manager, kind, &id, &states, field.as_deref(), role).await,
    }
}

/// Authenticate every role, then compare the configured and advertised ranges
async fn check(manager: &ClientManager) -> bool {
    let mut ok = true;

    for role in manager.roles() {
        let tokens = match manager.token_provider(role) {
            Ok(t) => t,
            Err(e) => {
                error!(role = %role, "{}", e);
                ok = false;
                continue;
            }
        };
        match tokens.token().await {
            Ok(_) => info!(role = %role, "Authenticated"),
            Err(e) => {
                error!(role = %role, "Authentication failed: {}", e);
                ok = false;
            }
        }
    }

    let Some(role) = manager.roles().into_iter().next() else {
        error!("No roles configured");
        return false;
    };
    let advertised = match manager.client(role) {
        Ok(client) => client.supported_versions().await,
        Err(e) => Err(e),
    };
    match advertised {
        Ok(server) => {
            let api = &manager.config().api;
            info!(min = %server.min(), max = %server.max(), "Service advertises API versions");
            if !range_within(api.min_version, api.max_version, server) {
                error!(
                    "Configured range {}..={} is not inside the service's {}..={}",
                    api.min_version,
                    api.max_version,
                    server.min(),
                    server.max()
                );
                ok = false;
            }
        }
        Err(e) => {
            error!("Failed to read the API version document: {}", e);
            ok = false;
        }
    }

    if ok {
        info!("Check passed");
    }
    ok
}

fn range_within(min: ApiVersion, max: ApiVersion, server: VersionRange) -> bool {
    server.contains(min) && server.contains(max)
}

async fn wait(
    manager: &ClientManager,
    kind: ResourceKind,
    id: &str,
    states: &[String],
    field: Option<&str>,
    role: Role,
) -> bool {
    let waiter = match manager.waiter(role) {
        Ok(w) => w,
        Err(e) => {
            error!("{}", e);
            return false;
        }
    };

    if states.iter().any(|s| s == "deleted") {
        return match waiter.wait_for_deletion(kind, id).await {
            Ok(()) => {
                info!(resource = %kind, id, "Deleted");
                true
            }
            Err(e) => {
                error!("{}", e);
                false
            }
        };
    }

    let accepted: Vec<&str> = states.iter().map(String::as_str).collect();
    let outcome = match field {
        Some(field) => waiter.wait_for_field(kind, id, field, &accepted).await,
        None => waiter.wait_for_status(kind, id, &accepted).await,
    };
    match outcome {
        Ok(resource) => {
            info!(
                resource = %kind,
                id,
                state = field.and_then(|f| resource.str_field(f)).or(resource.status()),
                "Reached expected state"
            );
            true
        }
        Err(e) => {
            error!("{}", e);
            false
        }
    }
}
