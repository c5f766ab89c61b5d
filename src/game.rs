//! Frame orchestrator
//!
//! [`Game`] owns the world and everything around it: balance, player
//! settings, the high score and its store, and the frame loop. The host
//! calls [`Game::frame`] once per display refresh and forwards shell
//! buttons and input to the transition methods.

use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::platform::input::Intent;
use crate::platform::scheduler::{FrameHost, FrameLoop, LoopState};
use crate::renderer::{Canvas2d, render_frame};
use crate::settings::Settings;
use crate::sim::state::{GameEvent, RunPhase, World};
use crate::sim::tick::{TickInput, tick};
use crate::tuning::Tuning;

/// Called once with the floored score when a run ends
pub type ScoreReporter = Box<dyn FnMut(u64)>;

pub struct Game {
    world: World,
    tuning: Tuning,
    settings: Settings,
    high_score: HighScore,
    store: Box<dyn KeyValueStore>,
    reporter: Option<ScoreReporter>,
    input: TickInput,
    frame_loop: FrameLoop<Box<dyn FrameHost>>,
    /// Fixed seed base for reproducible runs; entropy when `None`
    seed: Option<u64>,
    runs: u64,
    /// Game over already reported for the current run
    reported: bool,
    width: f32,
    height: f32,
}

impl Game {
    /// Load tuning, settings and the high score from `store`. The world
    /// waits in the start phase until [`Game::start`].
    pub fn new(
        host: Box<dyn FrameHost>,
        store: Box<dyn KeyValueStore>,
        width: f32,
        height: f32,
    ) -> Self {
        let tuning = Tuning::load(store.as_ref());
        let settings = Settings::load(store.as_ref());
        let high_score = HighScore::load(store.as_ref());

        let mut game = Self {
            world: World::unseeded(tuning.clone(), width, height),
            tuning,
            settings,
            high_score,
            store,
            reporter: None,
            input: TickInput::default(),
            frame_loop: FrameLoop::new(host),
            seed: None,
            runs: 0,
            reported: false,
            width,
            height,
        };
        game.world.particles.set_capacity(game.settings.max_particles());
        game
    }

    /// Use deterministic seeds (`seed`, `seed + 1`, ...) for every run
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.runs = 0;
        self.world = self.fresh_world();
        self.world.particles.set_capacity(self.settings.max_particles());
        self
    }

    /// Install the game-over callback
    pub fn on_game_over(mut self, reporter: impl FnMut(u64) + 'static) -> Self {
        self.reporter = Some(Box::new(reporter));
        self
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn phase(&self) -> RunPhase {
        self.world.phase
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn loop_state(&self) -> LoopState {
        self.frame_loop.state()
    }

    pub fn frame_loop(&self) -> &FrameLoop<Box<dyn FrameHost>> {
        &self.frame_loop
    }

    /// Begin requesting frames. Call once the host can deliver them.
    pub fn mount(&mut self) {
        if self.frame_loop.start() {
            log::info!("Frame loop started");
        }
    }

    /// Stop for good (page teardown)
    pub fn unmount(&mut self) {
        self.frame_loop.cancel();
    }

    /// Start → Playing with a fresh run
    pub fn start(&mut self) -> bool {
        if self.world.phase != RunPhase::Start {
            return false;
        }
        self.begin_run();
        true
    }

    /// Playing → Paused; no frames are requested until resumed
    pub fn pause(&mut self) -> bool {
        if self.world.phase != RunPhase::Playing {
            return false;
        }
        self.world.phase = RunPhase::Paused;
        self.input = TickInput::default();
        self.frame_loop.suspend();
        log::info!("Paused at score {}", self.world.floored_score());
        true
    }

    /// Paused → Playing, continuing the same run
    pub fn resume(&mut self) -> bool {
        if self.world.phase != RunPhase::Paused {
            return false;
        }
        self.world.phase = RunPhase::Playing;
        self.frame_loop.resume();
        log::info!("Resumed");
        true
    }

    /// Throw away the current run and start a new one, from any phase
    pub fn restart(&mut self) {
        self.begin_run();
        if self.frame_loop.state() == LoopState::Suspended {
            self.frame_loop.resume();
        }
    }

    /// Handle a normalized input. A jump on the start screen starts the
    /// run; after game over only the restart button starts a new one.
    pub fn handle_intent(&mut self, intent: Intent) {
        match intent {
            Intent::Jump => match self.world.phase {
                RunPhase::Start => {
                    self.start();
                }
                RunPhase::Playing => self.input.jump = true,
                RunPhase::Paused | RunPhase::GameOver => {}
            },
        }
    }

    /// Replace the settings, persist them and apply the particle cap
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.settings.save(self.store.as_mut());
        self.world.particles.set_capacity(self.settings.max_particles());
    }

    /// One display refresh: simulate, settle events, draw, schedule the
    /// next frame. Does nothing while the loop is not running.
    pub fn frame(&mut self, canvas: Option<&mut dyn Canvas2d>) {
        if !self.frame_loop.begin_frame() {
            return;
        }

        match canvas {
            Some(canvas) => {
                let input = std::mem::take(&mut self.input);
                tick(&mut self.world, &input);
                for event in self.world.take_events() {
                    self.handle_event(event);
                }
                render_frame(canvas, &self.world, self.high_score.best(), &self.settings);
            }
            None => log::debug!("No drawing context, frame skipped"),
        }

        self.frame_loop.finish_frame();
    }

    fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::GameOver { score } => {
                if self.reported {
                    return;
                }
                self.reported = true;
                log::info!("Game over with score {}", score);
                self.high_score.submit(score, self.store.as_mut());
                if let Some(reporter) = self.reporter.as_mut() {
                    reporter(score);
                }
            }
            GameEvent::PickedUp { kind } => log::debug!("Picked up {}", kind.name()),
            GameEvent::Smashed { kind } => log::debug!("Smashed {}", kind.name()),
            GameEvent::LifeLost { remaining } => log::debug!("Hit, {} lives left", remaining),
            GameEvent::Jumped { .. } | GameEvent::Spawned { .. } => {}
        }
    }

    fn fresh_world(&mut self) -> World {
        let world = match self.seed {
            Some(seed) => World::new(
                seed.wrapping_add(self.runs),
                self.tuning.clone(),
                self.width,
                self.height,
            ),
            None => World::unseeded(self.tuning.clone(), self.width, self.height),
        };
        self.runs += 1;
        world
    }

    fn begin_run(&mut self) {
        self.world = self.fresh_world();
        self.world.particles.set_capacity(self.settings.max_particles());
        self.world.phase = RunPhase::Playing;
        self.input = TickInput::default();
        self.reported = false;
        log::info!("Run {} started", self.runs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::persistence::MemoryStore;
    use crate::platform::scheduler::ManualHost;
    use crate::renderer::DrawList;
    use crate::settings::QualityPreset;
    use crate::sim::collision::Rect;
    use crate::sim::state::{Entity, EntityKind};
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Store whose contents stay visible to the test after being boxed
    #[derive(Clone, Default)]
    struct SharedStore(Rc<RefCell<MemoryStore>>);

    impl KeyValueStore for SharedStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.borrow().get(key)
        }

        fn set(&mut self, key: &str, value: &str) {
            self.0.borrow_mut().set(key, value);
        }
    }

    fn game_with(store: SharedStore) -> (Game, Rc<RefCell<Vec<u64>>>) {
        let reports = Rc::new(RefCell::new(Vec::new()));
        let sink = reports.clone();
        let mut game = Game::new(Box::new(ManualHost::new()), Box::new(store), CANVAS_WIDTH, CANVAS_HEIGHT)
            .with_seed(77)
            .on_game_over(move |score| sink.borrow_mut().push(score));
        game.mount();
        (game, reports)
    }

    fn game() -> Game {
        game_with(SharedStore::default()).0
    }

    fn step(game: &mut Game, canvas: &mut DrawList) {
        canvas.clear();
        game.frame(Some(canvas as &mut dyn Canvas2d));
    }

    #[test]
    fn test_start_screen_renders_without_simulating() {
        let mut g = game();
        let mut canvas = DrawList::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        step(&mut g, &mut canvas);
        assert_eq!(g.phase(), RunPhase::Start);
        assert_eq!(g.world().frame, 0);
        assert!(!canvas.commands.is_empty());
    }

    #[test]
    fn test_jump_starts_then_jumps() {
        let mut g = game();
        g.handle_intent(Intent::Jump);
        assert_eq!(g.phase(), RunPhase::Playing);
        assert_eq!(g.world().player.vel.y, 0.0);

        g.handle_intent(Intent::Jump);
        let mut canvas = DrawList::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        step(&mut g, &mut canvas);
        assert!(g.world().player.vel.y < 0.0);
        assert_eq!(g.world().frame, 1);
    }

    #[test]
    fn test_pause_suspends_loop() {
        let mut g = game();
        g.start();
        let mut canvas = DrawList::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        step(&mut g, &mut canvas);

        assert!(g.pause());
        assert_eq!(g.loop_state(), LoopState::Suspended);
        assert!(g.frame_loop().pending().is_none());

        // A stray callback does nothing
        step(&mut g, &mut canvas);
        assert!(canvas.commands.is_empty());
        assert_eq!(g.world().frame, 1);

        // Jumps while paused are dropped
        g.handle_intent(Intent::Jump);
        assert!(g.resume());
        assert_eq!(g.loop_state(), LoopState::Running);
        step(&mut g, &mut canvas);
        assert_eq!(g.world().frame, 2);
        assert_eq!(g.world().player.vel.y, 0.0);
    }

    #[test]
    fn test_one_life_run_reports_once_and_saves_record() {
        let store = SharedStore::default();
        let (mut g, reports) = game_with(store.clone());
        g.start();
        g.world.lives = 1;
        g.world.score = 41.5;
        g.world.next_spawn_frame = f32::INFINITY;
        let p = g.world.player.rect;
        let id = g.world.next_entity_id();
        g.world.entities.push(Entity::new(
            id,
            EntityKind::Cactus { large: true },
            Rect::new(p.x, p.y, 35.0, 47.0),
            Vec2::ZERO,
        ));

        let mut canvas = DrawList::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        for _ in 0..30 {
            step(&mut g, &mut canvas);
        }

        assert_eq!(g.phase(), RunPhase::GameOver);
        assert_eq!(*reports.borrow(), vec![41]);
        assert_eq!(g.high_score(), 41);
        assert_eq!(store.get(HighScore::STORAGE_KEY).as_deref(), Some("41"));
        // The game-over frame already shows the new record
        assert_eq!(canvas.texts().last(), Some(&"HI 00041  00041"));
    }

    #[test]
    fn test_lower_score_keeps_record() {
        let store = SharedStore::default();
        store.clone().set(HighScore::STORAGE_KEY, "500");
        let (mut g, reports) = game_with(store.clone());
        assert_eq!(g.high_score(), 500);

        g.start();
        g.world.lives = 1;
        let p = g.world.player.rect;
        let id = g.world.next_entity_id();
        g.world
            .entities
            .push(Entity::new(id, EntityKind::Spike, p, Vec2::ZERO));
        let mut canvas = DrawList::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        step(&mut g, &mut canvas);

        assert_eq!(*reports.borrow(), vec![0]);
        assert_eq!(store.get(HighScore::STORAGE_KEY).as_deref(), Some("500"));
    }

    #[test]
    fn test_restart_after_game_over() {
        let (mut g, reports) = game_with(SharedStore::default());
        g.start();
        g.world.lives = 1;
        let p = g.world.player.rect;
        let id = g.world.next_entity_id();
        g.world
            .entities
            .push(Entity::new(id, EntityKind::Meteor, p, Vec2::ZERO));
        let mut canvas = DrawList::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        step(&mut g, &mut canvas);
        assert_eq!(g.phase(), RunPhase::GameOver);

        // Jump cannot leave game over
        g.handle_intent(Intent::Jump);
        assert_eq!(g.phase(), RunPhase::GameOver);

        g.restart();
        assert_eq!(g.phase(), RunPhase::Playing);
        assert_eq!(g.world().lives, MAX_LIVES);
        assert_eq!(g.world().frame, 0);
        assert!(g.world().entities.is_empty());
        assert_eq!(reports.borrow().len(), 1);
    }

    #[test]
    fn test_restart_from_pause_resumes_loop() {
        let mut g = game();
        g.start();
        g.pause();
        g.restart();
        assert_eq!(g.phase(), RunPhase::Playing);
        assert_eq!(g.loop_state(), LoopState::Running);
        assert!(g.frame_loop().pending().is_some());
    }

    #[test]
    fn test_missing_canvas_skips_frame() {
        let mut g = game();
        g.start();
        g.frame(None);
        assert_eq!(g.world().frame, 0);
        assert_eq!(g.loop_state(), LoopState::Running);
        assert!(g.frame_loop().pending().is_some());
    }

    #[test]
    fn test_settings_cap_particles_and_persist() {
        let store = SharedStore::default();
        let (mut g, _) = game_with(store.clone());
        assert_eq!(g.world().particles.capacity(), 500);

        g.set_settings(Settings::from_preset(QualityPreset::Low));
        assert_eq!(g.world().particles.capacity(), 100);
        assert!(store.get(Settings::STORAGE_KEY).is_some());

        g.set_settings(Settings {
            particles: false,
            ..Settings::default()
        });
        g.start();
        g.handle_intent(Intent::Jump);
        let mut canvas = DrawList::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        step(&mut g, &mut canvas);
        assert!(g.world().particles.is_empty());
    }

    #[test]
    fn test_tuning_overrides_from_store() {
        let store = SharedStore::default();
        store
            .clone()
            .set(Tuning::STORAGE_KEY, r#"{"max_lives": 5}"#);
        let (mut g, _) = game_with(store);
        assert_eq!(g.tuning().max_lives, 5);
        g.start();
        assert_eq!(g.world().lives, 5);
    }

    #[test]
    fn test_unmount_stops_frames() {
        let mut g = game();
        g.start();
        g.unmount();
        assert_eq!(g.loop_state(), LoopState::Cancelled);
        let mut canvas = DrawList::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        step(&mut g, &mut canvas);
        assert_eq!(g.world().frame, 0);
        assert!(canvas.commands.is_empty());
    }
}
