//! Find songs similar to a given title/artist using the recommendation
//! webhook, with a bundled fallback list when the webhook is unavailable.
//!
//! Usage:
//!   songmatch --title "Blinding Lights" --artist "The Weeknd"
//!   songmatch --example queen --json
//!   songmatch --from-url "https://songs.example/?title=Take+On+Me&artist=a-ha" --listen 1
//!   songmatch --interactive

use std::io::{self, BufRead, Write};
use std::process;

use clap::Parser;
use songmatch::config::Config;
use songmatch::presets::{self, Preset, DEFAULT_EXAMPLE, PRESETS};
use songmatch::{listen, render_results, Error, ResultSlot, Searcher, SongQuery, WebhookBackend};

#[derive(Parser, Debug)]
#[command(name = "songmatch")]
#[command(about = "Find similar songs via the recommendation webhook")]
#[command(version)]
struct Cli {
    /// Song title to search for
    #[arg(short, long)]
    title: Option<String>,

    /// Artist to search for
    #[arg(short, long)]
    artist: Option<String>,

    /// Use an example song (name or number, see --list-examples)
    #[arg(short, long, conflicts_with_all = ["title", "artist", "from_url"])]
    example: Option<String>,

    /// Take title and artist from a shared link's query parameters
    #[arg(long)]
    from_url: Option<String>,

    /// Recommendation webhook endpoint
    #[arg(long)]
    webhook_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Print the recommendations as JSON instead of cards
    #[arg(long)]
    json: bool,

    /// Open the video search for recommendation N (1-based) after searching
    #[arg(long, value_name = "N")]
    listen: Option<usize>,

    /// Prompt for searches until "quit"
    #[arg(short, long)]
    interactive: bool,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,

    /// Print listen links instead of opening a browser
    #[arg(long)]
    no_browser: bool,

    /// List the example songs and exit
    #[arg(long)]
    list_examples: bool,

    /// Show effective configuration and exit
    #[arg(long)]
    show_defaults: bool,

    /// Show saved configuration from file and exit
    #[arg(long)]
    show_saved_defaults: bool,

    /// Save the configuration options given on this command line as defaults
    #[arg(long)]
    save_defaults: bool,

    /// Debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Config options given on the command line
    fn config_overlay(&self) -> Config {
        let mut config = Config::new();
        config.webhook_url = self.webhook_url.clone();
        config.timeout_secs = self.timeout;
        if self.no_color {
            config.color = Some(false);
        }
        if self.no_browser {
            config.open_browser = Some(false);
        }
        if self.verbose {
            config.log_level = Some("debug".to_string());
        } else if self.quiet {
            config.log_level = Some("warn".to_string());
        }
        config
    }

    /// Title and artist to start from: example, link, flags, or the default example.
    fn initial_fields(&self) -> Result<(String, String), Error> {
        if let Some(key) = &self.example {
            let preset = presets::find_preset(key)
                .ok_or_else(|| Error::Config(format!("unknown example '{}'", key)))?;
            return Ok((preset.title.to_string(), preset.artist.to_string()));
        }

        let prefill = self.from_url.as_deref().and_then(presets::parse_prefill);
        if self.from_url.is_some() && prefill.is_none() {
            log::warn!("Link carries no title or artist parameter");
        }

        let title = self.title.clone().or_else(|| prefill.as_ref().map(|p| p.title.clone()));
        let artist = self.artist.clone().or_else(|| prefill.as_ref().map(|p| p.artist.clone()));

        match (title, artist) {
            (None, None) => Ok((DEFAULT_EXAMPLE.title.to_string(), DEFAULT_EXAMPLE.artist.to_string())),
            (title, artist) => Ok((title.unwrap_or_default(), artist.unwrap_or_default())),
        }
    }
}

fn print_examples() {
    println!("Examples:");
    for (i, p) in PRESETS.iter().enumerate() {
        println!("  {}. {:<10} {} by {}", i + 1, p.name, p.title, p.artist);
    }
}

fn main() {
    let cli = Cli::parse();

    let (saved, load_error) = match Config::load() {
        Ok(c) => (c, None),
        Err(e) => (Config::new(), Some(e)),
    };
    let overlay = cli.config_overlay();

    let mut config = Config::builtin();
    config.merge(&saved);
    config.merge(&Config::from_env());
    config.merge(&overlay);

    let mut clog = colog::default_builder();
    clog.filter(None, config.log_filter());
    clog.init();

    if let Some(e) = load_error {
        log::warn!("Ignoring saved defaults: {}", e);
    }

    if cli.list_examples {
        print_examples();
        return;
    }
    if cli.show_saved_defaults {
        saved.print("Saved defaults");
        return;
    }
    if cli.show_defaults {
        config.print("Effective configuration");
        return;
    }
    if cli.save_defaults {
        let mut to_save = saved.clone();
        to_save.merge(&overlay);
        match to_save.save() {
            Ok(path) => println!("Saved defaults to {}", path.display()),
            Err(e) => {
                eprintln!("Error: could not save defaults: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    if let Err(e) = run(&cli, &config) {
        eprintln!("Error: {}", e);
        let code = if matches!(e, Error::EmptyQuery) { 2 } else { 1 };
        process::exit(code);
    }
}

fn run(cli: &Cli, config: &Config) -> songmatch::Result<()> {
    let backend = WebhookBackend::with_timeout(config.webhook_url()?, config.timeout());
    log::debug!("Using webhook {}", backend.url());

    let session = Session {
        searcher: Searcher::new(backend),
        slot: ResultSlot::new(),
        color: config.color_enabled() && !cli.json,
        open_browser: config.browser_enabled(),
        json: cli.json,
    };

    let (title, artist) = cli.initial_fields()?;

    if cli.interactive {
        return session.interactive(title, artist);
    }

    session.search(&title, &artist)?;
    if let Some(n) = cli.listen {
        session.listen(n)?;
    }
    Ok(())
}

struct Session {
    searcher: Searcher<WebhookBackend>,
    slot: ResultSlot,
    color: bool,
    open_browser: bool,
    json: bool,
}

impl Session {
    fn search(&self, title: &str, artist: &str) -> songmatch::Result<()> {
        let query = SongQuery::new(title, artist)?;
        let result = self.searcher.search(&query);
        if !self.slot.offer(result) {
            return Ok(());
        }

        let Some(shown) = self.slot.current() else {
            return Ok(());
        };

        let mut stdout = io::stdout();
        if self.json {
            let text = serde_json::to_string_pretty(&shown.recommendations).map_err(io::Error::from)?;
            writeln!(stdout, "{}", text)?;
        } else {
            render_results(&mut stdout, &shown, self.color)?;
        }
        Ok(())
    }

    fn listen(&self, n: usize) -> songmatch::Result<()> {
        let rec = self
            .slot
            .recommendation(n)
            .ok_or_else(|| Error::Config(format!("no recommendation number {}", n)))?;

        if self.open_browser {
            let url = listen::open_search(&rec.title, &rec.artist)?;
            println!("Opening: {}", url);
        } else {
            println!("{}", listen::search_url(&rec.title, &rec.artist));
        }
        Ok(())
    }

    fn interactive(&self, mut title: String, mut artist: String) -> songmatch::Result<()> {
        println!("songmatch - type 'help' for commands");
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            print!("songmatch> ");
            io::stdout().flush()?;

            let Some(line) = lines.next() else {
                println!();
                return Ok(());
            };
            let line = line?;
            let mut parts = line.trim().splitn(2, char::is_whitespace);
            let command = parts.next().unwrap_or("");
            let arg = parts.next().unwrap_or("").trim();

            let outcome = match command {
                "" => continue,
                "quit" | "exit" | "q" => return Ok(()),
                "help" | "?" => {
                    print_help();
                    Ok(())
                }
                "examples" => {
                    print_examples();
                    Ok(())
                }
                "search" | "s" => self.search(&title, &artist),
                "edit" | "e" => {
                    title = prompt(&mut lines, "Song title", &title)?;
                    artist = prompt(&mut lines, "Artist", &artist)?;
                    self.search(&title, &artist)
                }
                "example" => match presets::find_preset(arg) {
                    Some(Preset { title: t, artist: a, .. }) => {
                        title = t.to_string();
                        artist = a.to_string();
                        self.search(&title, &artist)
                    }
                    None => Err(Error::Config(format!("unknown example '{}'", arg))),
                },
                "listen" | "l" => match arg.parse::<usize>() {
                    Ok(n) => self.listen(n),
                    Err(_) => Err(Error::Config("usage: listen <N>".to_string())),
                },
                other => Err(Error::Config(format!("unknown command '{}'", other))),
            };

            if let Err(e) = outcome {
                eprintln!("{}", e);
            }
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  search           Search with the current title and artist");
    println!("  edit             Change title and artist, then search");
    println!("  example <N|name> Search for an example song");
    println!("  examples         List the example songs");
    println!("  listen <N>       Open the video search for recommendation N");
    println!("  quit             Leave");
}

/// Ask for a field, keeping `current` when the answer is empty.
fn prompt<I>(lines: &mut I, label: &str, current: &str) -> songmatch::Result<String>
where
    I: Iterator<Item = io::Result<String>>,
{
    print!("{} [{}]: ", label, current);
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => {
            let line = line?;
            let answer = line.trim();
            if answer.is_empty() {
                Ok(current.to_string())
            } else if answer == "-" {
                Ok(String::new())
            } else {
                Ok(answer.to_string())
            }
        }
        None => Ok(current.to_string()),
    }
}
