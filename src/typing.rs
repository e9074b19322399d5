//! Typewriter effect
//!
//! Cycles through a fixed list of phrases forever:
//! Typing -> Paused -> Erasing -> (next phrase) Typing -> ...

use crate::consts::{ERASE_STEP_MS, PHRASE_DWELL_MS, TYPE_STEP_MS};
use crate::dom::{Dom, NodeId};
use crate::schedule::{Spawn, Task, Wake};

/// Element receiving the typed text
pub const TARGET: &str = ".typing-text";

/// Current phase of the effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingState {
    /// Revealing characters left to right
    Typing,
    /// Full phrase shown, dwelling
    Paused,
    /// Removing characters right to left
    Erasing,
}

/// Typewriter state machine
#[derive(Debug)]
pub struct TypingEffect {
    target: NodeId,
    phrases: Vec<Vec<char>>,
    /// Index into `phrases`
    phrase: usize,
    /// Characters currently shown
    shown: usize,
    state: TypingState,
}

impl TypingEffect {
    pub fn new(target: NodeId, phrases: &[String]) -> Self {
        Self {
            target,
            phrases: phrases.iter().map(|p| p.chars().collect()).collect(),
            phrase: 0,
            shown: 0,
            state: TypingState::Typing,
        }
    }

    /// Start typing into [`TARGET`]. No-op without the element or phrases.
    pub fn start(dom: &mut dyn Dom, spawn: &mut dyn Spawn, phrases: &[String]) -> bool {
        let Some(target) = dom.query(TARGET) else {
            log::debug!("{TARGET} not found, typing effect disabled");
            return false;
        };
        if phrases.is_empty() {
            return false;
        }
        spawn.spawn(Box::new(Self::new(target, phrases)), Wake::After(0));
        true
    }

    pub fn state(&self) -> TypingState {
        self.state
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase
    }

    fn current(&self) -> &[char] {
        &self.phrases[self.phrase]
    }

    fn render(&self, dom: &mut dyn Dom) {
        let text: String = self.current()[..self.shown].iter().collect();
        dom.set_text(self.target, &text);
    }

    fn type_char(&mut self, dom: &mut dyn Dom) -> Wake {
        self.shown = (self.shown + 1).min(self.current().len());
        self.render(dom);

        if self.shown == self.current().len() {
            self.state = TypingState::Paused;
            Wake::After(PHRASE_DWELL_MS)
        } else {
            Wake::After(TYPE_STEP_MS)
        }
    }
}

impl Task for TypingEffect {
    fn run(&mut self, dom: &mut dyn Dom) -> Wake {
        match self.state {
            TypingState::Typing => self.type_char(dom),
            TypingState::Paused => {
                self.state = TypingState::Erasing;
                Wake::After(ERASE_STEP_MS)
            }
            TypingState::Erasing => {
                self.shown = self.shown.saturating_sub(1);
                self.render(dom);
                if self.shown > 0 {
                    return Wake::After(ERASE_STEP_MS);
                }

                self.phrase = (self.phrase + 1) % self.phrases.len();
                self.state = TypingState::Typing;
                self.type_char(dom)
            }
        }
    }
}
