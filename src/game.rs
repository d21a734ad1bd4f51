use rand::Rng;
use std::fmt;

pub const CHAMBER_COUNT: u8 = 6;

/// Index of one of the six cylinder positions, always in `0..CHAMBER_COUNT`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Chamber(u8);

impl Chamber {
    pub fn new(index: u8) -> Option<Self> {
        (index < CHAMBER_COUNT).then_some(Chamber(index))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// One-based number painted inside the chamber.
    pub fn label(self) -> u8 {
        self.0 + 1
    }

    pub fn next(self) -> Self {
        Chamber((self.0 + 1) % CHAMBER_COUNT)
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Chamber(rng.random_range(0..CHAMBER_COUNT))
    }

    pub fn all() -> impl Iterator<Item = Chamber> {
        (0..CHAMBER_COUNT).map(Chamber)
    }
}

impl fmt::Display for Chamber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    Idle,
    Loading,
    Spinning,
    Ready,
    GameOver,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "Idle",
            Phase::Loading => "Loading",
            Phase::Spinning => "Spinning",
            Phase::Ready => "Ready",
            Phase::GameOver => "Game Over",
        };
        write!(f, "{name}")
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FireOutcome {
    /// Trigger pulled outside of `Phase::Ready`; nothing changed.
    Ignored,
    Safe(Chamber),
    Fatal(Chamber),
}

/// The whole game record. Every transition is total: calls that are not
/// valid for the current phase leave the record untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    bullet_chamber: Option<Chamber>,
    current_chamber: Chamber,
    tried_safe_chambers: Vec<Chamber>,
    bullet_loaded: bool,
    bullet_concealed: bool,
    is_spinning: bool,
    is_over: bool,
    has_started: bool,
    rotation_angle: f64,
}

impl Default for GameState {
    fn default() -> Self {
        GameState {
            bullet_chamber: None,
            current_chamber: Chamber::default(),
            tried_safe_chambers: Vec::new(),
            bullet_loaded: false,
            bullet_concealed: false,
            is_spinning: false,
            is_over: false,
            has_started: false,
            rotation_angle: 0.0,
        }
    }
}

impl GameState {
    pub fn chamber_count(&self) -> u8 {
        CHAMBER_COUNT
    }

    pub fn bullet_chamber(&self) -> Option<Chamber> {
        self.bullet_chamber
    }

    pub fn current_chamber(&self) -> Chamber {
        self.current_chamber
    }

    pub fn tried_safe_chambers(&self) -> &[Chamber] {
        &self.tried_safe_chambers
    }

    pub fn bullet_loaded(&self) -> bool {
        self.bullet_loaded
    }

    pub fn bullet_concealed(&self) -> bool {
        self.bullet_concealed
    }

    pub fn is_spinning(&self) -> bool {
        self.is_spinning
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    pub fn has_started(&self) -> bool {
        self.has_started
    }

    pub fn rotation_angle(&self) -> f64 {
        self.rotation_angle
    }

    pub fn phase(&self) -> Phase {
        if self.is_over {
            Phase::GameOver
        } else if !self.has_started {
            Phase::Idle
        } else if self.is_spinning {
            Phase::Spinning
        } else if self.bullet_chamber.is_none() {
            Phase::Loading
        } else {
            Phase::Ready
        }
    }

    /// The loaded bullet sits visibly in chamber 0 until the spin resolves.
    /// Purely cosmetic; the real bullet chamber is drawn later.
    pub fn shows_bullet_placeholder(&self) -> bool {
        self.bullet_loaded && !self.bullet_concealed && self.bullet_chamber.is_none()
    }

    /// Returns `false` when the game was already started.
    pub fn start_game(&mut self) -> bool {
        if self.phase() != Phase::Idle {
            return false;
        }
        self.has_started = true;
        self.load_bullet();
        true
    }

    fn load_bullet(&mut self) {
        if self.bullet_loaded {
            return;
        }
        self.bullet_loaded = true;
        self.bullet_concealed = false;
    }

    pub fn begin_spin(&mut self) -> bool {
        if self.phase() != Phase::Loading {
            return false;
        }
        self.is_spinning = true;
        true
    }

    pub fn rotate(&mut self, delta: f64) {
        if self.is_spinning {
            self.rotation_angle += delta;
        }
    }

    /// Ends the spin and commits the bullet chamber. The chamber is only
    /// ever assigned once per game.
    pub fn resolve_spin(&mut self, bullet: Chamber) -> bool {
        if self.phase() != Phase::Spinning {
            return false;
        }
        self.is_spinning = false;
        self.bullet_concealed = true;
        self.bullet_chamber.get_or_insert(bullet);
        true
    }

    pub fn fire_gun(&mut self) -> FireOutcome {
        if self.phase() != Phase::Ready {
            return FireOutcome::Ignored;
        }
        let chamber = self.current_chamber;
        if self.bullet_chamber == Some(chamber) {
            self.is_over = true;
            return FireOutcome::Fatal(chamber);
        }
        self.tried_safe_chambers.push(chamber);
        self.current_chamber = chamber.next();
        FireOutcome::Safe(chamber)
    }

    pub fn reset_game(&mut self) {
        *self = GameState::default();
    }

    pub fn is_tried_safe(&self, chamber: Chamber) -> bool {
        self.tried_safe_chambers.contains(&chamber)
    }
}
