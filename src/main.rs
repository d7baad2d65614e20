use anyhow::Result;
use clap::Parser;

use git_changelog::config::{self, Config};
use git_changelog::generator::Generator;
use git_changelog::git::{EmptyRepository, Git2Repository, Repository};
use git_changelog::ui;

#[derive(clap::Parser)]
#[command(
    name = "git-changelog",
    about = "Generate a Keep-a-Changelog document from git history"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Output file path (default: CHANGELOG.md)")]
    output: Option<String>,

    #[arg(long, help = "Repository URL used for commit and comparison links")]
    repo_url: Option<String>,

    #[arg(long, help = "Emit a flat commit list instead of category groups")]
    flat: bool,

    #[arg(long, help = "Skip the Unreleased section")]
    no_unreleased: bool,

    #[arg(long, help = "Override the current version used in comparison links")]
    latest_version: Option<String>,

    #[arg(long, help = "Regenerate the whole document instead of appending")]
    full: bool,

    #[arg(long, help = "Print the document to stdout without writing the file")]
    dry_run: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

/// Fold CLI flags over the loaded configuration; flags win.
fn apply_cli_overrides(mut config: Config, args: &Args) -> Config {
    if let Some(output) = &args.output {
        config.output_file = output.clone();
    }
    if let Some(repo_url) = &args.repo_url {
        config.repo_url = Some(repo_url.clone());
    }
    if let Some(latest_version) = &args.latest_version {
        config.latest_version = Some(latest_version.clone());
    }
    if args.flat {
        config.group_by_type = false;
    }
    if args.no_unreleased {
        config.include_unreleased = false;
    }
    if args.full {
        config.append = false;
    }
    config
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("git-changelog {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };
    let config = apply_cli_overrides(config, &args);

    // A missing repository is "no released versions yet", not a failure
    let repo: Box<dyn Repository> = match Git2Repository::open(".") {
        Ok(repo) => Box::new(repo),
        Err(e) => {
            ui::display_status(&format!(
                "No git repository found ({}); generating from empty history",
                e
            ));
            Box::new(EmptyRepository)
        }
    };

    let output_file = config.output_file.clone();
    let generator = Generator::new(repo.as_ref(), config);

    if args.dry_run {
        let existing = std::fs::read_to_string(&output_file).ok();
        let outcome = generator.build(existing.as_deref());

        for warning in &outcome.warnings {
            ui::display_boundary_warning(warning);
        }

        print!("{}", outcome.document);
        return Ok(());
    }

    ui::display_status(&format!("Generating {}", output_file));

    // Only the final write is fatal
    match generator.run() {
        Ok(outcome) => {
            for warning in &outcome.warnings {
                ui::display_boundary_warning(warning);
            }
            ui::display_run_summary(&outcome, &output_file);
            Ok(())
        }
        Err(e) => {
            ui::display_error(&format!("Failed to write '{}': {}", output_file, e));
            std::process::exit(1);
        }
    }
}
