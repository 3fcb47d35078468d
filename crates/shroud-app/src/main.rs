//! The binary entry point: a headless host for the entity filter.

use std::cell::RefCell;
use std::rc::Rc;

use clap::Parser;
use shroud_app::game_loop::GameLoop;
use shroud_app::platform::PlatformDirs;
use shroud_app::render::render_frame;
use shroud_app::scene::{SHARED_INDEX, ScriptedScene};
use shroud_config::{CONFIG_GROUP, CliArgs, Config};
use shroud_filter::{EntityHider, EventBus, HostEvent, MenuEntry};
use tracing::{debug, error, info, warn};

/// Simulated display refresh rate.
const FRAME_TIME: f64 = 1.0 / 144.0;

/// Ticks between checks of `config.ron` for edits.
const RELOAD_INTERVAL: u64 = 100;

/// Ticks between simulated right-clicks on the dragon slot.
const MENU_PROBE_INTERVAL: u64 = 25;

/// Action code of the "Attack" option.
const ATTACK: i32 = 10;

fn main() {
    let args = CliArgs::parse();

    let dirs = match args.config.clone() {
        Some(dir) => PlatformDirs::with_config_dir(dir),
        None => match PlatformDirs::resolve() {
            Ok(dirs) => dirs,
            Err(e) => {
                eprintln!("Failed to resolve platform directories: {e}");
                std::process::exit(1);
            }
        },
    };
    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to create platform directories: {e}");
        std::process::exit(1);
    }

    // Reload detection compares against the file as written, before CLI overrides.
    let (mut on_disk, load_error) = match Config::load_or_create(&dirs.config_dir) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let mut config = on_disk.clone();
    config.apply_cli_overrides(&args);

    shroud_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    if let Some(e) = load_error {
        warn!("Using default config: {e}");
    }
    info!(config_dir = %dirs.config_dir.display(), ticks = args.ticks, "Shroud host starting");

    let hider = Rc::new(RefCell::new(EntityHider::new()));
    hider.borrow_mut().start_up(&config.filter);

    let mut bus = EventBus::new();
    let subscriber = Rc::clone(&hider);
    bus.register(move |event: &HostEvent| subscriber.borrow_mut().handle(event));

    let mut scene = ScriptedScene::new();
    let mut clock = GameLoop::new();
    let mut tick: u64 = 0;
    let mut culled_frames: u64 = 0;

    while tick < args.ticks {
        let steps = clock.advance(FRAME_TIME);

        for _ in 0..steps.ticks {
            for event in scene.step(tick) {
                bus.publish(&event);
            }

            if tick > 0 && tick % MENU_PROBE_INTERVAL == 0 {
                probe_menu(&hider.borrow(), &scene);
            }

            if tick > 0 && tick % RELOAD_INTERVAL == 0 {
                match on_disk.reload(&dirs.config_dir) {
                    Ok(Some(reloaded)) => {
                        let mut effective = reloaded.clone();
                        effective.apply_cli_overrides(&args);
                        bus.publish(&HostEvent::ConfigChanged {
                            group: CONFIG_GROUP.to_string(),
                            config: effective.filter,
                        });
                        on_disk = reloaded;
                    }
                    Ok(None) => {}
                    Err(e) => error!("Config reload failed: {e}"),
                }
            }

            tick += 1;
        }

        let frame = render_frame(&hider.borrow(), &scene.renderables());
        if frame.culled > 0 {
            culled_frames += 1;
        }
    }

    let stats = hider.borrow().stats();
    info!(
        ticks = clock.update_count(),
        frames = clock.frame_count(),
        culled_frames,
        hidden = stats.hidden,
        animation_hidden = stats.animation_hidden,
        "Run complete"
    );
    hider.borrow_mut().shut_down();
}

/// Offer "Attack" on whatever occupies the dragon slot, as a right-click would.
fn probe_menu(hider: &EntityHider, scene: &ScriptedScene) {
    let cache = scene.entity_cache();
    let mut entries = vec![
        MenuEntry::new("Walk here", "", 23, 0),
        MenuEntry::new("Attack", "", ATTACK, SHARED_INDEX),
    ];
    let removed = hider.filter_menu_actions(&mut entries, cache.as_slice());
    debug!(removed, remaining = entries.len(), "Menu probe");
}
