//! Cosmic Drift entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use cosmic_drift::hub;
    use cosmic_drift::scene::{Scene, SceneError, SceneHost};
    use cosmic_drift::sim::{FrameView, GamePhase, ObstacleKind, PowerUpKind, Session, TrackEntity};
    use cosmic_drift::{Action, Settings, track_to_world};

    /// Depth (in units ahead of the player) drawn at the far end of the tunnel
    const VIEW_DEPTH: f32 = 20.0;

    /// 2D canvas rendering of the wormhole, looking down the travel axis
    struct CanvasScene {
        canvas_id: &'static str,
        ctx: Option<CanvasRenderingContext2d>,
        size: (f64, f64),
        streaks: bool,
    }

    impl CanvasScene {
        fn new(canvas_id: &'static str, streaks: bool) -> Self {
            Self {
                canvas_id,
                ctx: None,
                size: (0.0, 0.0),
                streaks,
            }
        }

        /// Project a track-space point relative to the player onto the canvas.
        /// Returns (x, y, scale) or None if behind the camera.
        fn project(&self, view: &FrameView<'_>, pos: glam::Vec3) -> Option<(f64, f64, f64)> {
            let rel = track_to_world(pos) - track_to_world(glam::Vec3::new(0.0, 0.0, view.forward));
            let depth = -rel.z + 2.0;
            if depth <= 0.1 {
                return None;
            }
            let (w, h) = self.size;
            let focal = h * 0.6;
            let scale = focal / depth as f64;
            let x = w / 2.0 + (rel.x - view.lateral * 0.5) as f64 * scale;
            let y = h * 0.45 + (1.0 - rel.y) as f64 * scale * 0.5;
            Some((x, y, scale))
        }
    }

    fn obstacle_color(kind: ObstacleKind) -> &'static str {
        match kind {
            ObstacleKind::Ring => "#ff3df0",
            ObstacleKind::Spike => "#ff5a36",
            ObstacleKind::Crystal => "#7a5cff",
        }
    }

    fn power_up_color(kind: PowerUpKind) -> &'static str {
        match kind {
            PowerUpKind::Flux => "#36f1ff",
            PowerUpKind::Quantum => "#4dff88",
            PowerUpKind::Phase => "#ffe14d",
            PowerUpKind::Hyper => "#ff8a1f",
            PowerUpKind::Nebula => "#c58cff",
        }
    }

    impl Scene for CanvasScene {
        fn build(&mut self) -> Result<(), SceneError> {
            let document = web_sys::window()
                .and_then(|w| w.document())
                .ok_or_else(|| SceneError::Build("no document".into()))?;
            let canvas: HtmlCanvasElement = document
                .get_element_by_id(self.canvas_id)
                .ok_or_else(|| SceneError::Build(format!("no #{} element", self.canvas_id)))?
                .dyn_into()
                .map_err(|_| SceneError::Build("element is not a canvas".into()))?;

            let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
            let width = (canvas.client_width() as f64 * dpr) as u32;
            let height = (canvas.client_height() as f64 * dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);

            let ctx: CanvasRenderingContext2d = canvas
                .get_context("2d")
                .map_err(|e| SceneError::Build(format!("{:?}", e)))?
                .ok_or_else(|| SceneError::Build("2d context unavailable".into()))?
                .dyn_into()
                .map_err(|_| SceneError::Build("unexpected context type".into()))?;

            self.size = (width as f64, height as f64);
            self.ctx = Some(ctx);
            log::info!("Canvas scene ready ({}x{})", width, height);
            Ok(())
        }

        fn draw(&mut self, view: &FrameView<'_>) -> Result<(), SceneError> {
            let ctx = self
                .ctx
                .as_ref()
                .ok_or_else(|| SceneError::Draw("scene not built".into()))?;
            let (w, h) = self.size;

            ctx.set_fill_style_str("#07021a");
            ctx.fill_rect(0.0, 0.0, w, h);

            // Tunnel rings every 2 units, scrolling with the player
            ctx.set_stroke_style_str("rgba(120, 80, 255, 0.35)");
            let phase = view.forward % 2.0;
            let mut d = 2.0 - phase;
            while d < VIEW_DEPTH {
                let center = glam::Vec3::new(0.0, 1.0, view.forward + d);
                if let Some((x, y, scale)) = self.project(view, center) {
                    ctx.begin_path();
                    let _ = ctx.arc(x, y, 2.5 * scale, 0.0, std::f64::consts::TAU);
                    ctx.stroke();
                }
                d += 2.0;
            }

            if self.streaks && view.phase == GamePhase::Playing {
                ctx.set_stroke_style_str("rgba(255, 255, 255, 0.15)");
                for i in 0..12 {
                    let angle = i as f64 / 12.0 * std::f64::consts::TAU;
                    let len = 40.0 + (view.forward as f64 * 37.0 + i as f64 * 13.0) % 60.0;
                    ctx.begin_path();
                    ctx.move_to(w / 2.0 + angle.cos() * h * 0.3, h * 0.45 + angle.sin() * h * 0.3);
                    ctx.line_to(
                        w / 2.0 + angle.cos() * (h * 0.3 + len),
                        h * 0.45 + angle.sin() * (h * 0.3 + len),
                    );
                    ctx.stroke();
                }
            }

            // Far to near so closer entities overlap distant ones
            let mut sprites: Vec<(f32, glam::Vec3, f32, &'static str)> = view
                .obstacles
                .iter()
                .map(|o| (o.z(), o.pos(), o.radius(), obstacle_color(o.kind)))
                .chain(
                    view.power_ups
                        .iter()
                        .map(|p| (p.z(), p.pos(), p.radius(), power_up_color(p.kind))),
                )
                .collect();
            sprites.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

            for (_, pos, radius, color) in sprites {
                if let Some((x, y, scale)) = self.project(view, pos) {
                    ctx.set_fill_style_str(color);
                    ctx.begin_path();
                    let _ = ctx.arc(x, y, radius as f64 * scale * 0.5, 0.0, std::f64::consts::TAU);
                    ctx.fill();
                }
            }

            // Player ship
            let player = glam::Vec3::new(view.lateral, 0.0, view.forward);
            if let Some((x, y, scale)) = self.project(view, player) {
                ctx.set_fill_style_str("#e8f7ff");
                ctx.begin_path();
                ctx.move_to(x, y - 0.3 * scale);
                ctx.line_to(x - 0.35 * scale, y + 0.2 * scale);
                ctx.line_to(x + 0.35 * scale, y + 0.2 * scale);
                ctx.close_path();
                ctx.fill();
            }

            Ok(())
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        host: SceneHost<CanvasScene>,
        settings: Settings,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        last_phase: GamePhase,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            let mut session = Session::new(seed);
            session.set_spawn_mode(settings.spawn_mode);
            Self {
                session,
                host: SceneHost::new(CanvasScene::new("canvas", settings.streaks_enabled())),
                settings,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                last_phase: GamePhase::Idle,
            }
        }

        fn update(&mut self, dt: f32, time: f64) {
            if self.host.accepts_frames() {
                let dt = self.settings.clamp_delta(dt);
                self.session.tick(dt);
            }

            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }

            let phase = self.session.phase();
            if phase != self.last_phase {
                log::info!("Phase {:?} -> {:?}", self.last_phase, phase);
                self.last_phase = phase;
            }
        }

        /// Switch spawn model mid-run and remember the choice
        fn toggle_spawn_mode(&mut self) {
            let mode = self.settings.toggle_spawn_mode();
            self.session.set_spawn_mode(mode);
            self.settings.save();
        }

        fn render(&mut self) {
            let view = self.session.view();
            self.host.frame(&view);
        }

        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let hud = self.session.state().snapshot();

            let set_text = |selector: &str, text: &str| {
                if let Some(el) = document.query_selector(selector).ok().flatten() {
                    el.set_text_content(Some(text));
                }
            };
            let set_visible = |id: &str, visible: bool| {
                if let Some(el) = document.get_element_by_id(id) {
                    let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
                }
            };

            set_text("#hud-score .hud-value", &hud.score.to_string());
            set_text(
                "#hud-health .hud-value",
                &format!("{}/{}", hud.health, hud.max_health),
            );
            if self.settings.show_distance {
                set_text("#hud-distance .hud-value", &format!("{:.0}", hud.distance));
            }
            if self.settings.show_fps {
                set_text("#hud-fps .hud-value", &self.fps.to_string());
            }
            set_text(
                "#play-button",
                if hud.is_playing { "Pause" } else { "Play" },
            );

            let phase = self.session.phase();
            set_visible("start-prompt", phase == GamePhase::Idle);
            set_visible("pause-menu", phase == GamePhase::Paused);
            set_visible("game-over", phase == GamePhase::GameOver);
            if phase == GamePhase::GameOver {
                set_text("#final-score", &hud.score.to_string());
                set_text("#final-distance", &format!("{:.0}", hud.distance));
            }
            set_text("#spawn-mode-button", self.settings.spawn_mode.as_str());
            set_visible("scene-error", self.host.is_faulted());
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Cosmic Drift starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }
        setup_hub(&window, &document);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));
        log::info!("Game initialized with seed: {}", seed);

        game.borrow_mut().host.ensure_built();

        setup_input_handlers(game.clone());
        setup_buttons(game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Cosmic Drift running!");
    }

    /// Title the page after the routed game and fill the catalogue list
    fn setup_hub(window: &web_sys::Window, document: &web_sys::Document) {
        let path = window.location().pathname().unwrap_or_default();
        match hub::find(&path) {
            Some(entry) => {
                document.set_title(&format!("{} | Game Hub", entry.title));
                log::info!("Route {} -> {} ({})", path, entry.id, entry.status.label());
            }
            None => log::info!("Route {} is not a game page", path),
        }
        if let Some(list) = document.get_element_by_id("hub-list") {
            list.set_inner_html(&hub::catalogue_html());
        }
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            let key = event.key();
            if key == "Enter" {
                g.session.start();
                return;
            }
            if key == "m" || key == "M" {
                g.toggle_spawn_mode();
                return;
            }
            if let Some(action) = Action::from_key(&key) {
                event.prevent_default();
                g.session.apply(action);
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn on_click(id: &str, game: Rc<RefCell<Game>>, handler: fn(&mut Game)) {
        let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
        else {
            log::warn!("Missing #{} button", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            handler(&mut game.borrow_mut());
        });
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        on_click("play-button", game.clone(), |g| {
            if !g.session.start() {
                g.session.toggle_pause();
            }
        });
        on_click("reset-button", game.clone(), |g| {
            let seed = js_sys::Date::now() as u64;
            g.session.restart(seed);
        });
        on_click("spawn-mode-button", game.clone(), |g| {
            g.toggle_spawn_mode();
        });
        on_click("retry-button", game, |g| {
            g.host.retry();
        });
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            let mut g = game.borrow_mut();
            if g.session.pause() {
                log::info!("Auto-paused (window blur)");
            }
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use cosmic_drift::hub;
    use cosmic_drift::scene::{Scene, SceneError, SceneHost};
    use cosmic_drift::sim::{FrameView, GamePhase, Session, TrackEntity};
    use cosmic_drift::{Action, Settings, SpawnRateMode, Tuning};

    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Ten simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    /// Scene that logs the HUD every few seconds instead of drawing
    #[derive(Debug, Default)]
    struct LogScene {
        frames: u32,
    }

    impl Scene for LogScene {
        fn build(&mut self) -> Result<(), SceneError> {
            Ok(())
        }

        fn draw(&mut self, view: &FrameView<'_>) -> Result<(), SceneError> {
            self.frames += 1;
            if self.frames % 300 == 0 {
                log::info!(
                    "distance {:>7.1}  score {:>6}  health {}/{}  entities {}+{}",
                    view.hud.distance,
                    view.hud.score,
                    view.hud.health,
                    view.hud.max_health,
                    view.obstacles.len(),
                    view.power_ups.len()
                );
            }
            Ok(())
        }
    }

    /// Dodge the nearest obstacle in our lane, otherwise drift toward power-ups
    fn autopilot(view: &FrameView<'_>) -> Option<Action> {
        let lane_clear = |x: f32| {
            view.obstacles.iter().all(|o| {
                let dz = o.z() - view.forward;
                !(0.0..4.0).contains(&dz) || (o.pos().x - x).abs() > o.radius() + 0.45
            })
        };

        if !lane_clear(view.lateral) {
            let left = view.lateral - 0.6;
            let right = view.lateral + 0.6;
            return if right <= 2.0 && (lane_clear(right) || left < -2.0) {
                Some(Action::MoveRight)
            } else {
                Some(Action::MoveLeft)
            };
        }

        let target = view
            .power_ups
            .iter()
            .filter(|p| p.z() > view.forward)
            .min_by(|a, b| a.z().partial_cmp(&b.z()).unwrap_or(std::cmp::Ordering::Equal))?;
        let dx = target.pos().x - view.lateral;
        if dx.abs() < 0.1 || !lane_clear(view.lateral + dx.signum() * 0.15) {
            None
        } else if dx > 0.0 {
            Some(Action::MoveRight)
        } else {
            Some(Action::MoveLeft)
        }
    }

    /// Command line: `[--spawn-mode <mode>] [seed] [tuning.json]`
    #[derive(Debug, PartialEq)]
    struct RunArgs {
        seed: u64,
        tuning_path: Option<String>,
        spawn_mode: Option<SpawnRateMode>,
    }

    fn parse_args(args: impl IntoIterator<Item = String>) -> Result<RunArgs, String> {
        let mut positional = Vec::new();
        let mut spawn_mode = None;
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            if arg == "--spawn-mode" {
                let value = args.next().ok_or("--spawn-mode needs a value")?;
                let mode = SpawnRateMode::from_str(&value)
                    .ok_or_else(|| format!("unknown spawn mode `{}`", value))?;
                spawn_mode = Some(mode);
            } else {
                positional.push(arg);
            }
        }
        let mut positional = positional.into_iter();
        let seed = match positional.next() {
            Some(s) => s.parse::<u64>().map_err(|e| format!("bad seed `{}`: {}", s, e))?,
            None => 42,
        };
        Ok(RunArgs {
            seed,
            tuning_path: positional.next(),
            spawn_mode,
        })
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let args = parse_args(std::env::args().skip(1))?;
        let seed = args.seed;
        let tuning = match args.tuning_path {
            Some(path) => Tuning::from_json(&std::fs::read_to_string(path)?)?,
            None => Tuning::default(),
        };
        let settings = Settings::load();
        let spawn_mode = args.spawn_mode.unwrap_or(settings.spawn_mode);

        for entry in hub::catalogue() {
            log::info!("{} [{}] {}", entry.title, entry.status.label(), entry.route);
        }
        log::info!("Spawn mode {}", spawn_mode.as_str());

        let mut session = Session::with_config(seed, tuning, spawn_mode, Default::default());
        let mut host = SceneHost::new(LogScene::default());
        session.start();

        let mut frames = 0;
        while frames < MAX_FRAMES && session.phase() != GamePhase::GameOver {
            let action = autopilot(&session.view());
            if let Some(action) = action {
                session.apply(action);
            }
            if host.accepts_frames() {
                session.tick(settings.clamp_delta(FRAME_DT));
            }
            host.frame(&session.view());
            frames += 1;
        }

        let hud = session.state().snapshot();
        log::info!(
            "Run finished after {:.1}s: distance {:.1}, score {}, health {}",
            frames as f32 * FRAME_DT,
            hud.distance,
            hud.score,
            hud.health
        );
        println!("seed {seed}: score {} distance {:.1}", hud.score, hud.distance);
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn args(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }

        #[test]
        fn test_parse_args_defaults() {
            let parsed = parse_args(args(&[])).unwrap();
            assert_eq!(parsed.seed, 42);
            assert_eq!(parsed.tuning_path, None);
            assert_eq!(parsed.spawn_mode, None);
        }

        #[test]
        fn test_parse_args_spawn_mode_anywhere() {
            let parsed = parse_args(args(&["7", "--spawn-mode", "fixed", "t.json"])).unwrap();
            assert_eq!(parsed.seed, 7);
            assert_eq!(parsed.tuning_path.as_deref(), Some("t.json"));
            assert_eq!(parsed.spawn_mode, Some(SpawnRateMode::FixedTick));
        }

        #[test]
        fn test_parse_args_rejects_bad_input() {
            assert!(parse_args(args(&["--spawn-mode", "sometimes"])).is_err());
            assert!(parse_args(args(&["--spawn-mode"])).is_err());
            assert!(parse_args(args(&["seven"])).is_err());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Cosmic Drift (native) starting headless autopilot run...");
    log::info!("Run with `trunk serve` for the web version");

    if let Err(e) = headless::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
