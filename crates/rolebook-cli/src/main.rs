//! Rolebook CLI - immutable role permissions
//!
//! # Configuration
//!
//! Configuration is loaded from multiple sources with priority:
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`ROLEBOOK_*`)
//! 3. Project config (`.rolebook/config.toml` in the project directory)
//! 4. Global config (`~/.rolebook/config.toml`, or `--config`)
//! 5. Default values (built-in admin/guest roles)
//!
//! # Output
//!
//! Reports go to stdout. Logs and rejected writes go to stderr.

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use rolebook_auth::{BindMode, PermissionView, RoleRegistry};
use rolebook_runtime::config::{ConfigLoader, ConfigResolver, ReportFormat, RolebookConfig};
use rolebook_runtime::report::{render_roles, render_view};
use rolebook_runtime::scenario::{attempt_tamper, run_demo, DemoLine, Tamper};
use rolebook_types::Subject;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Rolebook CLI - immutable role permissions
#[derive(Parser, Debug)]
#[command(name = "rolebook")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Project root directory (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    project: Option<PathBuf>,

    /// Global config file (defaults to ~/.rolebook/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List roles and their permission flags
    Roles {
        #[command(flatten)]
        format: FormatArgs,
    },
    /// Bind a user to a role and report granted permissions
    Report(BindArgs),
    /// Try to modify a bound user's permissions (always rejected)
    Tamper(TamperArgs),
    /// Replay the admin/guest walkthrough
    Demo {
        #[command(flatten)]
        mode: ModeArgs,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[derive(ClapArgs, Debug)]
struct BindArgs {
    /// Role to bind
    #[arg(short, long)]
    role: String,

    /// User name
    #[arg(short, long)]
    name: String,

    /// Extra user attribute, `key=value` (repeatable)
    #[arg(long = "attr", value_name = "KEY=VALUE", value_parser = parse_attr)]
    attrs: Vec<(String, String)>,

    #[command(flatten)]
    mode: ModeArgs,

    #[command(flatten)]
    format: FormatArgs,
}

#[derive(ClapArgs, Debug, Default)]
struct ModeArgs {
    /// Bind with an independent copy of the role's set
    #[arg(long, conflicts_with = "shared")]
    copy: bool,

    /// Bind to the role's shared set
    #[arg(long)]
    shared: bool,
}

impl ModeArgs {
    fn mode(&self) -> Option<BindMode> {
        match (self.copy, self.shared) {
            (true, _) => Some(BindMode::Copy),
            (_, true) => Some(BindMode::Shared),
            _ => None,
        }
    }
}

#[derive(ClapArgs, Debug, Default)]
struct FormatArgs {
    /// Print JSON
    #[arg(long, conflicts_with = "text")]
    json: bool,

    /// Print plain text lines
    #[arg(long)]
    text: bool,
}

impl FormatArgs {
    fn format(&self) -> Option<ReportFormat> {
        match (self.json, self.text) {
            (true, _) => Some(ReportFormat::Json),
            (_, true) => Some(ReportFormat::Text),
            _ => None,
        }
    }
}

#[derive(ClapArgs, Debug)]
struct TamperArgs {
    #[command(flatten)]
    bind: BindArgs,

    /// Capability flag to overwrite
    #[arg(long)]
    flag: Option<String>,

    /// Value to write into --flag
    #[arg(long, action = ArgAction::Set, default_value_t = true, requires = "flag")]
    value: bool,

    /// Role whose whole permission set should be swapped in
    #[arg(long, value_name = "ROLE")]
    reassign: Option<String>,
}

fn parse_attr(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

/// CLI-based configuration resolver.
///
/// Merges file/env config via [`ConfigLoader`] and applies CLI argument
/// overrides as the highest-priority layer.
struct CliConfigResolver {
    project_root: PathBuf,
    global_config: Option<PathBuf>,
    debug: bool,
    mode: Option<BindMode>,
    format: Option<ReportFormat>,
}

impl CliConfigResolver {
    fn from_args(args: &Args) -> Self {
        let project_root = args.project.clone().unwrap_or_else(|| {
            std::env::current_dir().unwrap_or_else(|e| {
                eprintln!("Warning: failed to get current directory ({e}), using '.'");
                PathBuf::from(".")
            })
        });

        let (mode, format) = match &args.command {
            Command::Roles { format } => (None, format.format()),
            Command::Report(bind) => (bind.mode.mode(), bind.format.format()),
            Command::Tamper(tamper) => (tamper.bind.mode.mode(), tamper.bind.format.format()),
            Command::Demo { mode } => (mode.mode(), None),
            Command::Config => (None, None),
        };

        Self {
            project_root,
            global_config: args.config.clone(),
            debug: args.debug,
            mode,
            format,
        }
    }

    fn load(&self) -> Result<RolebookConfig> {
        let mut loader = ConfigLoader::new().with_project_root(&self.project_root);
        if let Some(ref path) = self.global_config {
            loader = loader.with_global_config(path);
        }

        let mut config = loader.load().context("config error")?;
        self.apply(&mut config);
        Ok(config)
    }
}

impl ConfigResolver for CliConfigResolver {
    fn apply(&self, config: &mut RolebookConfig) {
        if self.debug {
            config.debug = true;
        }
        if let Some(mode) = self.mode {
            config.bind.mode = mode;
        }
        if let Some(format) = self.format {
            config.report.format = format;
        }
    }
}

fn init_tracing(args: &Args, config: &RolebookConfig) {
    // --debug > --verbose > RUST_LOG > config logging.level
    let filter = if args.debug || config.debug {
        EnvFilter::new("debug")
    } else if args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.logging.level))
    };

    let layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry().with(layer).init();
}

fn bind(registry: &RoleRegistry, args: &BindArgs, mode: BindMode) -> Result<PermissionView> {
    let role = registry.lookup_role(&args.role)?;
    let subject = args
        .attrs
        .iter()
        .fold(Subject::new(args.name.as_str()), |s, (k, v)| s.with_attr(k.as_str(), v));
    Ok(PermissionView::bind_role(subject, role, mode))
}

fn print_report(view: &PermissionView, format: ReportFormat) -> Result<()> {
    let rendered = render_view(view, format)?;
    if !rendered.is_empty() {
        println!("{rendered}");
    }
    Ok(())
}

fn run(args: &Args, config: &RolebookConfig) -> Result<()> {
    let registry = config.registry().context("config error")?;
    let mode = config.bind.mode;
    let format = config.report.format;

    match &args.command {
        Command::Roles { .. } => {
            println!("{}", render_roles(&registry, format)?);
        }
        Command::Report(bind_args) => {
            let view = bind(&registry, bind_args, mode)?;
            print_report(&view, format)?;
        }
        Command::Tamper(tamper) => {
            let mut attempts = Vec::new();
            if let Some(ref capability) = tamper.flag {
                attempts.push(Tamper::SetFlag {
                    capability: capability.clone(),
                    value: tamper.value,
                });
            }
            if let Some(ref role) = tamper.reassign {
                attempts.push(Tamper::Reassign { role: role.clone() });
            }
            if attempts.is_empty() {
                bail!("nothing to attempt: pass --flag and/or --reassign");
            }

            let view = bind(&registry, &tamper.bind, mode)?;
            for outcome in attempt_tamper(&registry, &view, &attempts)? {
                match outcome.result {
                    Err(err) => eprintln!("rejected: {err}"),
                    Ok(()) => eprintln!("accepted: {:?}", outcome.attempt),
                }
            }
            print_report(&view, format)?;
        }
        Command::Demo { .. } => {
            for line in run_demo(&registry, mode)? {
                match line {
                    DemoLine::Out(text) => println!("{text}"),
                    DemoLine::Rejected(text) => eprintln!("{text}"),
                }
            }
        }
        Command::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let resolver = CliConfigResolver::from_args(&args);
    let config = resolver.load()?;

    init_tracing(&args, &config);

    info!(
        path = %resolver.project_root.display(),
        mode = %config.bind.mode,
        roles = config.roles.as_ref().map_or(0, |r| r.len()),
        "Configuration resolved"
    );

    run(&args, &config)
}
