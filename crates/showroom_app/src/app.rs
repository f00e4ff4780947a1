//! Driver loop
//!
//! Headless stand-in for the rendering surface: reads dot-namespaced
//! commands from stdin, routes them through the session, and echoes the
//! resulting display set and gallery window. Transition steps armed by
//! the navigation controller come back over the tokio step feed and are
//! fed into the session as they fire, exactly as a frame loop would.

use anyhow::Result;
use showroom_core::{
    visibility_feed, CategoryTree, Command, EngineConfig, FetchState, JsonRecordSource,
    MediaRecord, RecordId, RecordSource, Session, StaticRecordSource, TokioStepTimer,
};
use tokio::io::AsyncBufReadExt;

pub fn run(config: EngineConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(drive(config))
}

async fn drive(config: EngineConfig) -> Result<()> {
    let (timer, mut steps) = TokioStepTimer::new();
    let (vis_tx, vis_rx) = visibility_feed();

    let source: Box<dyn RecordSource + Send + Sync> = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!(%path, "using JSON record source");
            Box::new(JsonRecordSource::new(path))
        }
        None => Box::new(StaticRecordSource::new(sample_records())),
    };

    let mut session = Session::mount(config, CategoryTree::builtin(), timer, source, vis_rx);
    session.flags.set_footer_contact(Box::new(|| {
        println!("(scrolling to footer contact form)");
    }));

    println!("showroom - type 'help' for commands");
    print_state(&session);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let line = line.trim().to_string();
                match line.as_str() {
                    "" => continue,
                    "quit" | "exit" => break,
                    "help" => print_help(),
                    "show" => print_state(&session),
                    "scroll" => {
                        // Simulate the sentinel passing through the viewport
                        let _ = vis_tx.send(true);
                        let _ = vis_tx.send(false);
                        let fired = session.pump_visibility();
                        tracing::debug!(fired, "scroll cycle pumped");
                        print_state(&session);
                    }
                    _ => match Command::parse(&line) {
                        Ok(command) => {
                            session.dispatch(command);
                            print_state(&session);
                        }
                        Err(e) => println!("error: {}", e),
                    },
                }
            }
            Some(step) = steps.recv() => {
                session.on_step(step);
                if !session.navigation.is_locked() {
                    // Transition settled: show the swapped-in display set
                    print_state(&session);
                }
            }
        }
    }

    session.unmount();
    Ok(())
}

fn print_help() {
    println!(
        "commands:\n  \
         nav.select <id> | nav.back\n  \
         gallery.room <value|all> | gallery.style <value|all> | gallery.clear\n  \
         gallery.more | gallery.retry | gallery.refresh | gallery.open <record-id>\n  \
         overlay.close | app.contact | app.mute\n  \
         scroll | show | help | quit"
    );
}

fn print_state(session: &Session<TokioStepTimer>) {
    let nav = &session.navigation;
    let locked = if nav.is_locked() { " [transitioning]" } else { "" };
    println!("-- {}{}", session.navigation.prompt(), locked);

    for id in nav.display() {
        let Some(node) = session.catalog.get(*id) else {
            continue;
        };
        let marker = if *id == nav.active() { ">" } else { " " };
        let label = nav
            .sublevel_label()
            .map(|l| format!("[{}] ", l))
            .unwrap_or_default();
        println!("  {} {} {}{} - {}", marker, id, label, node.title, node.subtitle);
    }

    match session.gallery.fetch_state() {
        FetchState::Failed(e) => {
            println!("gallery: unavailable ({}); use gallery.retry", e);
        }
        _ => {
            let filters = session.gallery.filters();
            println!(
                "gallery: {}/{} visible (room={}, style={}){}",
                session.gallery.visible_count(),
                session.gallery.filtered_count(),
                filters.room.as_deref().unwrap_or("all"),
                filters.style.as_deref().unwrap_or("all"),
                if session.gallery.exhausted() { ", exhausted" } else { "" },
            );
            for record in session.gallery.visible_records() {
                println!("    {} ({} / {})", record.id, record.room, record.style);
            }
        }
    }

    if let Some(item) = session.overlay.current() {
        println!("overlay: {:?} (scroll locked)", item);
    }
}

/// Built-in demo collection used when no JSON path is given
fn sample_records() -> Vec<MediaRecord> {
    let seed: &[(&str, &str, &str)] = &[
        ("Eclipse", "Kitchen", "Modern"),
        ("Nova", "Kitchen", "Modern"),
        ("Zenith", "Kitchen", "Traditional"),
        ("Vertex", "Kitchen", "Art Deco"),
        ("Prism", "Living", "Modern"),
        ("Quantum", "Living", "Traditional"),
        ("Nebula", "Dining", "Modern"),
        ("Aurora", "Dining", "Art Deco"),
        ("Apex", "Bedroom", "Modern"),
        ("Horizon", "Bedroom", "Traditional"),
        ("Celestial", "Lighting", "Modern"),
        ("Cosmos", "Bath", "Modern"),
        ("Stellar", "Outdoor", "Modern"),
        ("Galaxy", "Kitchen", "Modern"),
    ];

    seed.iter()
        .enumerate()
        .map(|(i, (name, room, style))| MediaRecord {
            id: RecordId(format!("rec_{:03}", i + 1)),
            title: name.to_string(),
            room: room.to_string(),
            style: style.to_string(),
            image: format!("assets/records/{}.avif", name.to_lowercase()),
            extra_images: vec![
                format!("assets/records/{}_2.avif", name.to_lowercase()),
                format!("assets/records/{}_3.avif", name.to_lowercase()),
            ],
        })
        .collect()
}
