use anyhow::Result;
use clap::Parser;

use addon_bump::config;
use addon_bump::coordinator::ReleaseCoordinator;
use addon_bump::git::Git2Repository;
use addon_bump::ui;

#[derive(clap::Parser)]
#[command(
    name = "addon-bump",
    about = "Bump addon manifest versions based on uncommitted changes"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(long, help = "Show the protected branches and exit")]
    list: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("addon-bump {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.list {
        ui::display_protected_branches();
        return Ok(());
    }

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let repo = match Git2Repository::open(".") {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    let coordinator = ReleaseCoordinator::new(&repo, &config);
    match coordinator.run(args.dry_run) {
        Ok(report) => {
            ui::display_run_report(&report, args.dry_run);
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
