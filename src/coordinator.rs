//! Routes ticks to the active screen and switches screens.

use log::info;
use rand::Rng;

use crate::animation::SpriteSheet;
use crate::canvas::Surface;
use crate::entities::{Flow, ScreenId, Session, TickInput};
use crate::error::{Error, Result};
use crate::screens::{GameScreen, TitleScreen};

/// One of the screens of the game.
#[derive(Clone, Debug)]
pub enum Scene {
    Title(TitleScreen),
    Game(GameScreen),
}

impl Scene {
    pub fn update(&mut self, input: &TickInput, session: &mut Session, rng: &mut impl Rng) -> Flow {
        match self {
            Scene::Title(title) => title.update(input),
            Scene::Game(game) => game.update(input, session, rng),
        }
    }

    pub fn draw(&self, surface: &mut impl Surface, sheet: &SpriteSheet, session: &Session) {
        match self {
            Scene::Title(title) => title.draw(surface, sheet, session),
            Scene::Game(game) => game.draw(surface, sheet),
        }
    }
}

/// Owns every screen, the session and the sprite sheet they draw with.
#[derive(Debug)]
pub struct Coordinator {
    /// Indexed by [`ScreenId`].
    screens: Vec<Scene>,
    active: ScreenId,
    session: Session,
    sheet: SpriteSheet,
    fullscreen: bool,
}

impl Coordinator {
    pub fn new(sheet: SpriteSheet) -> Self {
        let tags = sheet.tags();
        let screens = vec![
            Scene::Title(TitleScreen::new(tags)),
            Scene::Game(GameScreen::new(tags)),
        ];
        debug_assert_eq!(screens.len(), ScreenId::COUNT);
        Self {
            screens,
            active: ScreenId::Title,
            session: Session::default(),
            sheet,
            fullscreen: false,
        }
    }

    /// Runs one tick of the active screen.
    ///
    /// Returns [`Error::Quit`] when the player asks to leave; no screen logic
    /// runs on that tick.
    pub fn update(&mut self, input: &TickInput, rng: &mut impl Rng) -> Result<()> {
        if input.quit {
            return Err(Error::Quit);
        }
        if input.fullscreen {
            self.fullscreen = !self.fullscreen;
        }

        let flow = self.screens[self.active.index()].update(input, &mut self.session, rng);
        if let Flow::EndOfScreen(next) = flow {
            self.switch_to(next);
        }
        Ok(())
    }

    /// Draws the active screen.
    pub fn draw(&self, surface: &mut impl Surface) {
        self.screens[self.active.index()].draw(surface, &self.sheet, &self.session);
    }

    /// Rebuilds the game screen, so no entity or animation state carries over
    /// between runs, then activates `next`.
    fn switch_to(&mut self, next: ScreenId) {
        self.screens[ScreenId::Game.index()] = Scene::Game(GameScreen::new(self.sheet.tags()));
        info!("switching screen {:?} -> {:?}", self.active, next);
        self.active = next;
    }

    pub fn active(&self) -> ScreenId {
        self.active
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn game_screen(&self) -> Option<&GameScreen> {
        match &self.screens[ScreenId::Game.index()] {
            Scene::Game(game) => Some(game),
            Scene::Title(_) => None,
        }
    }

    pub fn game_screen_mut(&mut self) -> Option<&mut GameScreen> {
        match &mut self.screens[ScreenId::Game.index()] {
            Scene::Game(game) => Some(game),
            Scene::Title(_) => None,
        }
    }

    pub fn title_screen(&self) -> Option<&TitleScreen> {
        match &self.screens[ScreenId::Title.index()] {
            Scene::Title(title) => Some(title),
            Scene::Game(_) => None,
        }
    }
}
