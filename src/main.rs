use clap::{Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::eyre;
use std::path::PathBuf;

use flashkit::config::{self, ConfigResult};
use flashkit::fetch::{FetchClient, FetchOptions};
use flashkit::script::{PageScript, ScriptedPage};
use flashkit::spinner::{hide_spinner, show_spinner};
use flashkit::surface::{NodeSpec, RenderSurface, render_html};

/// Flash banners and navigation for server-rendered pages
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Replay flash banner sessions and fetch JSON with error banners"
)]
struct Args {
    /// Config file (default: ~/.config/flashkit/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a page script and print the resulting page
    Run {
        /// Page script (JSON)
        page: PathBuf,
    },
    /// Fetch JSON through the wrapper; failures are shown on the page
    Fetch {
        url: String,
        /// Page to report failures on (default: an empty flash page)
        #[arg(long)]
        page: Option<PathBuf>,
        /// JSON request body; sends a POST
        #[arg(long)]
        data: Option<String>,
    },
}

fn main() -> Result<()> {
    init_logging()?;

    color_eyre::install()?;

    let args = Args::parse();

    let config_result = match &args.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    };

    let result = match args.command {
        Command::Run { page } => run_page(&page, config_result),
        Command::Fetch { url, page, data } => {
            fetch(&url, page.as_deref(), data.as_deref(), config_result)
        }
    };

    #[cfg(debug_assertions)]
    log::debug!("=== FLASHKIT DEBUG SESSION ENDED ===");

    result
}

/// Debug builds write everything to `$TMPDIR/flashkit-debug.log`; release
/// builds log warnings to stderr unless `RUST_LOG` says otherwise
fn init_logging() -> Result<()> {
    let mut builder = env_logger::Builder::new();

    #[cfg(debug_assertions)]
    {
        let path = std::env::temp_dir().join("flashkit-debug.log");
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| eyre!("Failed to open {}: {}", path.display(), e))?;

        builder
            .filter_level(log::LevelFilter::Debug)
            .target(env_logger::Target::Pipe(Box::new(log_file)));
    }

    #[cfg(not(debug_assertions))]
    {
        builder
            .filter_level(log::LevelFilter::Warn)
            .parse_env("RUST_LOG");
    }

    builder
        .format(|buf, record| {
            use std::io::Write;
            use std::time::SystemTime;
            let datetime: chrono::DateTime<chrono::Local> = SystemTime::now().into();
            writeln!(
                buf,
                "[{}] [{}] {}",
                datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .init();

    #[cfg(debug_assertions)]
    log::debug!("=== FLASHKIT DEBUG SESSION STARTED ===");

    Ok(())
}

fn run_page(path: &std::path::Path, config_result: ConfigResult) -> Result<()> {
    let script = PageScript::load(path)?;

    let mut page = script.open(config_result.config.flash);
    report_config_warning(&mut page, config_result.warning);
    flashkit::script::replay(&mut page, &script.steps)?;

    print!("{}", render_html(page.surface(), page.surface().root()));
    Ok(())
}

fn fetch(
    url: &str,
    page: Option<&std::path::Path>,
    data: Option<&str>,
    config_result: ConfigResult,
) -> Result<()> {
    let script = match page {
        Some(path) => PageScript::load(path)?,
        None => default_page(),
    };
    let options = match data {
        Some(data) => FetchOptions::post(serde_json::from_str(data)?),
        None => FetchOptions::default(),
    };

    let client = FetchClient::new(&config_result.config.fetch)?;
    let mut page = script.open(config_result.config.flash);
    report_config_warning(&mut page, config_result.warning);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let container = page.flash.resolve_container(None);
    let spinner = show_spinner(page.surface_mut(), container);
    let result = rt.block_on(client.fetch_json(url, &options, &mut page.flash));
    hide_spinner(page.surface_mut(), spinner);

    match result {
        Ok(json) => {
            println!("{}", serde_json::to_string_pretty(&json)?);
            Ok(())
        }
        Err(e) => {
            print!("{}", render_html(page.surface(), page.surface().root()));
            Err(eyre!("Fetch failed: {}", e))
        }
    }
}

/// `<main class="container"><div id="flash-container"></div></main>`
fn default_page() -> PageScript {
    PageScript {
        body: vec![
            NodeSpec::new("main")
                .with_class("container")
                .with_child(NodeSpec::new("div").with_id("flash-container")),
        ],
        steps: Vec::new(),
    }
}

fn report_config_warning(page: &mut ScriptedPage, warning: Option<String>) {
    if let Some(warning) = warning {
        page.flash.show_warning(&warning);
    }
}
