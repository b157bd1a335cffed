use std::process;

use vrkb_engine::candidate_service::{CandidateService, GoogleTransliterate};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Look up conversion candidates for a kana reading over HTTP.
pub fn convert_cmd(reading: &str, url: Option<&str>) {
    let service = match url {
        Some(url) => GoogleTransliterate::with_url(url),
        None => GoogleTransliterate::new(),
    };
    let candidates = die!(service.fetch(reading), "Error: {}");
    if candidates.is_empty() {
        println!("(no candidates)");
    }
    for (i, c) in candidates.iter().enumerate() {
        println!("#{:>2}: {c}", i + 1);
    }
}
