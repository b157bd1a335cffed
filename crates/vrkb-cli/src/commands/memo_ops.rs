use std::path::Path;
use std::process;

use vrkb_core::geometry::viewpoint_for;
use vrkb_core::memo::{preview, MemoId, MemoStore};
use vrkb_engine::memo_store::InMemoryMemoStore;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn memos_list(file: &str, json: bool) {
    let store = die!(
        InMemoryMemoStore::load(Path::new(file)),
        "Error loading {file}: {}"
    );
    if json {
        println!("{}", die!(store.to_json(), "Error: {}"));
        return;
    }
    let memos = store.get_all();
    println!("{} memos", memos.len());
    for m in &memos {
        let p = m.position;
        println!(
            "{:>4}  ({:.2}, {:.2}, {:.2})  {}",
            m.id.0,
            p.x,
            p.y,
            p.z,
            preview(&m.text, 40)
        );
    }
}

/// Print where the viewer would be placed by "move to" for memo `id`.
pub fn memos_viewpoint(file: &str, id: u64, distance: f32) {
    let store = die!(
        InMemoryMemoStore::load(Path::new(file)),
        "Error loading {file}: {}"
    );
    let Some(memo) = store.get(MemoId(id)) else {
        eprintln!("Error: no memo with id {id}");
        process::exit(1);
    };
    let v = viewpoint_for(memo.position, memo.rotation, distance);
    println!(
        "position=({:.3}, {:.3}, {:.3}) yaw={:.3} pitch={:.3}",
        v.position.x, v.position.y, v.position.z, v.yaw, v.pitch
    );
}
