use std::fs;
use std::path::Path;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use vrkb_core::geometry::Vec3;
use vrkb_core::layout::InputMode;
use vrkb_core::settings::Settings;
use vrkb_engine::candidate_service::{CandidateService, GoogleTransliterate, StaticCandidates};
use vrkb_engine::host::KeyboardHost;
use vrkb_engine::memo_store::InMemoryMemoStore;
use vrkb_session::VoiceCommand;

use crate::script::parse_script;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

const CANDIDATE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct ReplayOptions<'a> {
    pub settings: Settings,
    /// `reading=cand1,cand2` entries for the offline candidate service.
    pub candidates: &'a [String],
    /// Use the HTTP service instead of `candidates`.
    pub http: bool,
    /// Memo save file to load before and write back after the replay.
    pub memos: Option<&'a str>,
    /// Start in the memo browser instead of a new memo.
    pub list: bool,
}

#[derive(Serialize)]
struct ReplayOutput {
    visible: bool,
    text: Option<String>,
    cursor: Option<usize>,
    pending: Option<String>,
    mode: Option<InputMode>,
    submissions: Vec<String>,
    memo_count: usize,
}

pub fn replay_cmd(script: &str, opts: ReplayOptions<'_>, json: bool) {
    let mut host = run(script, &opts);
    let submissions = host.take_submissions().into_iter().map(|s| s.text).collect();
    let kb = host.keyboard();
    let session = kb.session();
    let out = ReplayOutput {
        visible: kb.is_visible(),
        text: session.map(|s| s.text().to_string()),
        cursor: session.map(|s| s.cursor()),
        pending: session.map(|s| s.pending().to_string()),
        mode: session.map(|s| s.mode()),
        submissions,
        memo_count: host.store().len(),
    };

    if json {
        println!("{}", die!(serde_json::to_string_pretty(&out), "Error: {}"));
        return;
    }
    for s in &out.submissions {
        println!("submitted: {s:?}");
    }
    match (&out.text, out.cursor) {
        (Some(text), Some(cursor)) => {
            println!("text: {text:?}");
            println!("cursor: {cursor}");
            if let Some(p) = out.pending.as_deref().filter(|p| !p.is_empty()) {
                println!("pending: {p:?}");
            }
        }
        _ if out.visible => println!("(memo list open)"),
        _ => println!("(keyboard closed)"),
    }
    println!("memos: {}", out.memo_count);
}

/// Replay `script`, draw the final frame and write it as PPM.
pub fn render_cmd(script: &str, opts: ReplayOptions<'_>, output: &str) {
    let mut host = run(script, &opts);
    host.tick();
    die!(
        fs::write(output, host.raster().to_ppm()),
        "Error writing {output}: {}"
    );
    println!(
        "wrote {output}: {} frames, {} text ops",
        host.frames(),
        host.raster().text_ops().len()
    );
}

fn run(script: &str, opts: &ReplayOptions<'_>) -> KeyboardHost {
    let keys = die!(parse_script(script), "Error: {}");
    let store = match opts.memos {
        Some(path) if Path::new(path).exists() => die!(
            InMemoryMemoStore::load(Path::new(path)),
            "Error loading {path}: {}"
        ),
        _ => InMemoryMemoStore::new(),
    };
    let service: Arc<dyn CandidateService> = if opts.http {
        Arc::new(GoogleTransliterate::new())
    } else {
        Arc::new(die!(static_service(opts.candidates), "Error: {}"))
    };
    let mut host = die!(
        KeyboardHost::new(store, opts.settings.clone(), service),
        "Error starting candidate worker: {}"
    );

    if opts.list {
        host.show_memo_list();
    } else {
        host.show_for_new(Vec3::default());
    }
    for key in keys {
        let resp = host.press(key);
        if resp.async_request.is_some() && !host.wait_for_candidates(CANDIDATE_TIMEOUT) {
            eprintln!("warning: no candidates within {CANDIDATE_TIMEOUT:?}");
        }
        match resp.voice {
            Some(VoiceCommand::Start { .. }) => eprintln!("note: voice input is not available here"),
            Some(VoiceCommand::Abort) | None => {}
        }
        if let Some(v) = resp.viewpoint {
            println!(
                "move to: ({:.2}, {:.2}, {:.2}) yaw={:.3} pitch={:.3}",
                v.position.x, v.position.y, v.position.z, v.yaw, v.pitch
            );
        }
    }

    if let Some(path) = opts.memos {
        die!(
            host.store().save(Path::new(path)),
            "Error saving {path}: {}"
        );
    }
    host
}

fn static_service(entries: &[String]) -> Result<StaticCandidates, String> {
    let mut service = StaticCandidates::new();
    for entry in entries {
        let (reading, list) = entry
            .split_once('=')
            .ok_or_else(|| format!("expected reading=cand1,cand2, got {entry:?}"))?;
        let cands: Vec<&str> = list.split(',').filter(|c| !c.is_empty()).collect();
        service = service.with(reading, &cands);
    }
    Ok(service)
}
