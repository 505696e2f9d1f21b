//! Boss Rush entry point
//!
//! On the web this wires the DOM to a [`Game`] and draws each frame by
//! positioning elements from the simulation snapshot. Natively it plays a
//! headless session with a simple autopilot and logs the outcome.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlMediaElement, PageTransitionEvent};

    use boss_rush::platform::{KeyDir, VideoCommand, VideoCue};
    use boss_rush::platform::web::{AnimationLoop, on_event, setup_keyboard, setup_touch_button};
    use boss_rush::sim::{Direction, Snapshot};
    use boss_rush::{Game, STAGES, Settings, validate_stages};

    thread_local! {
        /// Kept alive for the page's lifetime; dropped on `pagehide`
        static ANIMATION: RefCell<Option<AnimationLoop>> = const { RefCell::new(None) };
    }

    fn show(el: &Element, visible: bool) {
        let classes = el.class_list();
        let _ = if visible {
            classes.remove_1("hidden")
        } else {
            classes.add_1("hidden")
        };
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_style(document: &Document, id: &str, style: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("style", style);
        }
    }

    fn health_percent(health: u32, max: u32) -> f32 {
        if max == 0 {
            0.0
        } else {
            health as f32 / max as f32 * 100.0
        }
    }

    /// Update the DOM from a snapshot
    fn render(document: &Document, snap: &Snapshot) {
        set_text(
            document,
            "stage-banner",
            &format!("Stage {}: {}", snap.stage.id, snap.stage.name),
        );
        set_style(
            document,
            "arena-background",
            &format!("background-image: url('{}')", snap.stage.background),
        );

        set_style(
            document,
            "player",
            &format!("left: {}px; top: {}px", snap.player.x, snap.player.y),
        );
        set_style(
            document,
            "player-health-fill",
            &format!(
                "width: {}%",
                health_percent(snap.player.health, snap.player.max_health)
            ),
        );

        if let Some(boss) = document.get_element_by_id("boss") {
            show(&boss, !snap.game_won);
            let _ = boss.set_attribute(
                "style",
                &format!("left: {}px; top: {}px", snap.boss.x, snap.boss.y),
            );
        }
        if let Some(sprite) = document.get_element_by_id("boss-sprite") {
            let _ = sprite.set_attribute("src", snap.boss.sprite);
        }
        set_text(document, "boss-name", snap.boss.name);
        set_style(
            document,
            "boss-health-fill",
            &format!(
                "width: {}%",
                health_percent(snap.boss.health, snap.boss.max_health)
            ),
        );

        if let Some(layer) = document.get_element_by_id("projectiles") {
            let html: String = snap
                .projectiles
                .iter()
                .map(|p| {
                    let flip = if p.direction == Direction::Left {
                        "transform: scaleX(-1);"
                    } else {
                        ""
                    };
                    format!(
                        "<img class=\"projectile\" src=\"{}\" style=\"left: {}px; top: {}px; {}\">",
                        p.kind.sprite(),
                        p.x,
                        p.y,
                        flip
                    )
                })
                .collect();
            layer.set_inner_html(&html);
        }

        if let Some(el) = document.get_element_by_id("game-over") {
            show(&el, snap.game_over);
        }
        if let Some(el) = document.get_element_by_id("victory-message") {
            show(&el, snap.game_won && !snap.victory_video_shown);
        }
        if let Some(el) = document.get_element_by_id("victory-video") {
            show(&el, snap.game_won && snap.victory_video_shown);
        }
    }

    fn victory_video(document: &Document) -> Option<HtmlMediaElement> {
        document
            .get_element_by_id("victory-video")?
            .dyn_into::<HtmlMediaElement>()
            .ok()
    }

    fn apply_video(document: &Document, command: VideoCommand) {
        let Some(video) = victory_video(document) else {
            return;
        };
        match command {
            VideoCommand::Play => match video.play() {
                Ok(_) => log::info!("Playing victory video"),
                Err(e) => log::warn!("Victory video refused to play: {:?}", e),
            },
            VideoCommand::Rewind => {
                if let Err(e) = video.pause() {
                    log::warn!("Could not pause victory video: {:?}", e);
                }
                video.set_current_time(0.0);
            }
        }
    }

    /// Apply presentation settings to the page chrome
    fn apply_settings(window: &web_sys::Window, document: &Document, settings: &Settings) {
        let touch_device = window.navigator().max_touch_points() > 0;
        if let Some(el) = document.get_element_by_id("touch-controls") {
            show(&el, settings.touch_controls.visible(touch_device));
        }
        if let Some(el) = document.get_element_by_id("controls-hint") {
            show(&el, settings.show_controls_hint);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Boss Rush starting...");

        validate_stages(STAGES).map_err(|e| {
            log::error!("Invalid stage table: {}", e);
            JsValue::from_str(&e.to_string())
        })?;

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let settings = Settings::load();
        apply_settings(&window, &document, &settings);

        let game = Rc::new(RefCell::new(Game::new()));

        // Input
        setup_keyboard(&window, game.clone())?;
        setup_touch_button(&document, "btn-up", KeyDir::Up, game.clone())?;
        setup_touch_button(&document, "btn-down", KeyDir::Down, game.clone())?;

        // End screens
        on_event(&document, "restart-btn", "click", game.clone(), Game::restart)?;
        on_event(&document, "play-again-btn", "click", game.clone(), Game::restart)?;
        on_event(&document, "victory-video", "ended", game.clone(), Game::restart)?;
        on_event(
            &document,
            "proceed-btn",
            "click",
            game.clone(),
            Game::proceed_to_victory,
        )?;

        // An `autoplay` attribute in the page must not start the video early
        apply_video(&document, VideoCommand::Rewind);

        // Start game loop
        let frame_game = game.clone();
        let mut video_cue = VideoCue::new();
        let animation = AnimationLoop::start(move |dt| {
            let mut g = frame_game.borrow_mut();
            g.frame(dt);
            let snap = g.snapshot();
            if let Some(command) = video_cue.update(snap.victory_video_shown) {
                apply_video(&document, command);
            }
            render(&document, &snap);
        })?;
        ANIMATION.with(|slot| *slot.borrow_mut() = Some(animation));

        // Pages kept in the back-forward cache only pause; anything else
        // tears the loop down so no frame outlives the page
        let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
            ANIMATION.with(|slot| {
                let mut slot = slot.borrow_mut();
                if event.persisted() {
                    if let Some(animation) = slot.as_ref() {
                        animation.stop();
                    }
                    log::info!("Animation loop paused");
                } else {
                    slot.take();
                    log::info!("Animation loop stopped");
                }
            });
        });
        window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())?;
        closure.forget();

        let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
            if !event.persisted() {
                return;
            }
            ANIMATION.with(|slot| {
                if let Some(animation) = slot.borrow().as_ref() {
                    animation.resume();
                    log::info!("Animation loop resumed");
                }
            });
        });
        window.add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref())?;
        closure.forget();

        render_initial(&game);
        log::info!("Boss Rush running!");
        Ok(())
    }

    /// Draw the starting positions before the first animation frame lands
    fn render_initial(game: &Rc<RefCell<Game>>) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            render(&document, &game.borrow().snapshot());
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Boss Rush (native) starting...");
    log::info!("Native mode runs a headless session - build for wasm32 to play");

    if let Err(e) = boss_rush::validate_stages(boss_rush::STAGES) {
        log::error!("Invalid stage table: {}", e);
        std::process::exit(1);
    }

    let outcome = headless::run(headless::MAX_FRAMES);
    println!("\n{}", outcome);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use boss_rush::platform::{Driver, KeyDir, ManualScheduler};
    use boss_rush::sim::{Direction, GamePhase, GameState};
    use boss_rush::{Game, consts::*};

    /// Synthetic 60 Hz frame timestamps
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Ten minutes of play
    pub const MAX_FRAMES: u32 = 36_000;

    /// Autopilot: dodge the nearest incoming shot, otherwise line up with the boss
    fn steer(game: &mut Game) {
        let state = &game.state;
        let target = dodge_target(state).unwrap_or(state.boss.y + BOSS_SIZE / 2.0 - PLAYER_SIZE / 2.0);
        let center = state.player.y;
        let (up, down) = if target < center - 4.0 {
            (true, false)
        } else if target > center + 4.0 {
            (false, true)
        } else {
            (false, false)
        };
        game.input.touch(KeyDir::Up, up);
        game.input.touch(KeyDir::Down, down);
    }

    /// Where to stand to avoid the closest boss shot heading our way
    fn dodge_target(state: &GameState) -> Option<f32> {
        let threat = state
            .projectiles
            .iter()
            .filter(|p| p.direction == Direction::Left && p.pos.x > PLAYER_X)
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))?;
        if threat.pos.x - (PLAYER_X + PLAYER_SIZE) > 200.0 {
            return None;
        }
        let shot_center = threat.pos.y + PROJECTILE_SIZE / 2.0;
        let clearance = PLAYER_SIZE / 2.0 + PROJECTILE_SIZE / 2.0 + 8.0;
        // Step to whichever side has room
        let above = shot_center - clearance - PLAYER_SIZE / 2.0;
        if above >= 0.0 {
            Some(above)
        } else {
            Some(shot_center + clearance - PLAYER_SIZE / 2.0)
        }
    }

    /// Play until the session ends or `max_frames` elapse
    pub fn run(max_frames: u32) -> String {
        let mut game = Game::new();
        let mut driver = Driver::new(ManualScheduler::new());
        driver.start();

        let mut now = 0.0;
        let mut frames = 0;
        while driver.scheduler().armed().is_some() && frames < max_frames {
            steer(&mut game);
            driver.on_frame(now, |dt| {
                game.frame(dt);
            });
            if game.phase() != GamePhase::Playing {
                driver.stop();
            }
            now += FRAME_MS;
            frames += 1;
        }

        let snap = game.snapshot();
        let seconds = now / 1000.0;
        match game.phase() {
            GamePhase::GameWon => format!(
                "Victory after {:.1}s with {} hp left",
                seconds, snap.player.health
            ),
            GamePhase::GameOver => format!(
                "Game over after {:.1}s on stage {} ({}, boss at {}/{} hp)",
                seconds, snap.stage.id, snap.stage.name, snap.boss.health, snap.boss.max_health
            ),
            GamePhase::Playing => format!(
                "Stopped after {:.1}s on stage {} (player {} hp, boss {} hp)",
                seconds, snap.stage.id, snap.player.health, snap.boss.health
            ),
        }
    }
}
