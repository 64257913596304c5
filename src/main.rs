use anyhow::Result;
use clap::{Parser, Subcommand};

use semvertag::commands;
use semvertag::config::{self, Config};
use semvertag::git::{GitTagStore, TagStore};
use semvertag::ui;
use semvertag::version::BumpField;

#[derive(Parser)]
#[command(
    name = "semvertag",
    about = "Tags a git repository with the next release number"
)]
struct Args {
    #[arg(long, help = "Git repo location")]
    cwd: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the latest tag matching the prefix and stage
    Latest {
        #[arg(long, help = "Optional release stage we are working on. Specify only if not a production release. I.e.: patch, feature, alpha, beta")]
        stage: Option<String>,

        #[arg(long, help = "Optional tag prefix. I.e.: v, app-, base-")]
        prefix: Option<String>,
    },
    /// Print the next version, bumping one segment of the latest tag
    Bump {
        #[arg(long, help = "Optional release stage we are working on. Specify only if not a production release. I.e.: patch, feature, alpha, beta")]
        stage: Option<String>,

        #[arg(long, help = "Optional tag prefix. I.e.: v, app-, base-")]
        prefix: Option<String>,

        #[arg(long, help = "Tag current HEAD with bumped version")]
        tag: bool,

        #[arg(value_enum, help = "Which version segment to bump (default: build)")]
        field: Option<BumpField>,
    },
    /// Assign an arbitrary tag verbatim and push it to the remote
    Tag {
        #[arg(value_name = "tag_to_assign", help = "New tag to assign and push to remote")]
        tag: String,
    },
    /// List tags matching the prefix and stage
    List {
        #[arg(long, help = "Optional release stage we are working on. Specify only if not a production release. I.e.: patch, feature, alpha, beta")]
        stage: Option<String>,

        #[arg(long, help = "Optional tag prefix. I.e.: v, app-, base-")]
        prefix: Option<String>,

        #[arg(long, help = "Reverse the sort order (descending by default) when listing tags")]
        reverse: bool,

        #[arg(long, help = "Use a comma to separate tags when listing")]
        csv: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let store = match GitTagStore::open(args.cwd.as_deref().unwrap_or(".")) {
        Ok(store) => store,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    let response = match dispatch(args.command, &config, &store) {
        Ok(response) => response,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    println!("{}", response);
    Ok(())
}

/// Resolve CLI arguments against the config defaults and run the
/// subcommand against the tag store.
fn dispatch(command: Command, config: &Config, store: &dyn TagStore) -> Result<String> {
    match command {
        Command::Latest { stage, prefix } => {
            let prefix = prefix.unwrap_or_else(|| config.defaults.prefix.clone());
            let stage = stage.or_else(|| config.defaults.stage.clone());
            Ok(commands::latest(store, &prefix, stage.as_deref())?)
        }
        Command::Bump {
            stage,
            prefix,
            tag,
            field,
        } => {
            let prefix = prefix.unwrap_or_else(|| config.defaults.prefix.clone());
            let stage = stage.or_else(|| config.defaults.stage.clone());
            let field = match field {
                Some(field) => field,
                None => config.default_field()?,
            };
            Ok(commands::bump(
                store,
                config,
                &prefix,
                stage.as_deref(),
                field,
                tag,
            )?)
        }
        Command::Tag { tag } => Ok(commands::tag(store, config, &tag)?),
        Command::List {
            stage,
            prefix,
            reverse,
            csv,
        } => {
            let prefix = prefix.unwrap_or_else(|| config.defaults.prefix.clone());
            let stage = stage.or_else(|| config.defaults.stage.clone());
            Ok(commands::list(
                store,
                &prefix,
                stage.as_deref(),
                reverse,
                csv,
            )?)
        }
    }
}
