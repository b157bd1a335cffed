use std::path::Path;
use std::process;

use clap::{Args, Parser, Subcommand};

use vrkb_cli::commands::{config_ops, convert_ops, layout_ops, memo_ops, replay_ops};
use vrkb_cli::script::parse_mode;
use vrkb_core::layout::InputMode;

#[derive(Parser)]
#[command(name = "kbtool", about = "Virtual keyboard diagnostics")]
struct Cli {
    /// Settings TOML file (default: embedded settings)
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Write a JSON-lines trace to this directory (requires --features trace)
    #[arg(long, global = true)]
    trace_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct ReplayArgs {
    /// Keystrokes, e.g. "neko<convert><cand:1><submit>"
    script: String,
    /// Offline candidates as reading=cand1,cand2 (repeatable)
    #[arg(long = "candidates")]
    candidates: Vec<String>,
    /// Fetch candidates from the HTTP transliteration service
    #[arg(long)]
    http: bool,
    /// Memo save file, loaded before and written after the replay
    #[arg(long)]
    memos: Option<String>,
    /// Start in the memo browser
    #[arg(long)]
    list: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a keystroke script and print the resulting state
    Replay {
        #[command(flatten)]
        args: ReplayArgs,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Replay a keystroke script and write the final frame as PPM
    Render {
        #[command(flatten)]
        args: ReplayArgs,
        /// Output PPM file
        #[arg(short, long, default_value = "panel.ppm")]
        output: String,
    },
    /// Print the key layout for a mode
    Layout {
        /// hiragana, katakana, alphabet or symbols
        #[arg(long, default_value = "hiragana")]
        mode: String,
        /// Upper-case letters (alphabet mode)
        #[arg(long)]
        upper: bool,
        /// Output placed keys as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve a panel point to a key
    Hit {
        x: f32,
        y: f32,
        #[arg(long, default_value = "hiragana")]
        mode: String,
    },
    /// Fetch conversion candidates for a kana reading over HTTP
    Convert {
        /// Kana reading
        reading: String,
        /// Service URL (default: Google Transliterate)
        #[arg(long)]
        url: Option<String>,
    },
    /// Romaji table tools
    Romaji {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Settings tools
    Settings {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Inspect a memo save file
    Memos {
        #[command(subcommand)]
        action: MemoAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the embedded defaults as TOML
    Export,
    /// Validate a custom TOML file
    Validate {
        /// Path to the TOML file
        file: String,
    },
}

#[derive(Subcommand)]
enum MemoAction {
    /// List memos
    List {
        /// Memo save file (JSON)
        file: String,
        #[arg(long)]
        json: bool,
    },
    /// Show the "move to" viewpoint for a memo
    Viewpoint {
        /// Memo save file (JSON)
        file: String,
        /// Memo id
        id: u64,
    },
}

fn mode_arg(s: &str) -> InputMode {
    parse_mode(s).unwrap_or_else(|| {
        eprintln!("Error: unknown mode {s:?} (hiragana, katakana, alphabet, symbols)");
        process::exit(1);
    })
}

fn replay_options<'a>(args: &'a ReplayArgs, settings: Option<&str>) -> replay_ops::ReplayOptions<'a> {
    replay_ops::ReplayOptions {
        settings: config_ops::load_settings(settings),
        candidates: &args.candidates,
        http: args.http,
        memos: args.memos.as_deref(),
        list: args.list,
    }
}

fn main() {
    let cli = Cli::parse();
    if let Some(dir) = cli.trace_dir.as_deref() {
        if cfg!(not(feature = "trace")) {
            eprintln!("warning: built without the trace feature; --trace-dir ignored");
        }
        vrkb_engine::init_tracing(Path::new(dir));
    }
    let settings_file = cli.settings.as_deref();

    match cli.command {
        Command::Replay { args, json } => {
            replay_ops::replay_cmd(&args.script, replay_options(&args, settings_file), json)
        }
        Command::Render { args, output } => {
            replay_ops::render_cmd(&args.script, replay_options(&args, settings_file), &output)
        }
        Command::Layout { mode, upper, json } => layout_ops::layout_cmd(
            &config_ops::load_settings(settings_file),
            mode_arg(&mode),
            upper,
            json,
        ),
        Command::Hit { x, y, mode } => layout_ops::hit_cmd(
            &config_ops::load_settings(settings_file),
            mode_arg(&mode),
            x,
            y,
        ),
        Command::Convert { reading, url } => convert_ops::convert_cmd(&reading, url.as_deref()),
        Command::Romaji { action } => match action {
            ConfigAction::Export => config_ops::romaji_export(),
            ConfigAction::Validate { file } => config_ops::romaji_validate(&file),
        },
        Command::Settings { action } => match action {
            ConfigAction::Export => config_ops::settings_export(),
            ConfigAction::Validate { file } => config_ops::settings_validate(&file),
        },
        Command::Memos { action } => {
            let distance = config_ops::load_settings(settings_file).viewpoint.distance;
            match action {
                MemoAction::List { file, json } => memo_ops::memos_list(&file, json),
                MemoAction::Viewpoint { file, id } => {
                    memo_ops::memos_viewpoint(&file, id, distance)
                }
            }
        }
    }
}
