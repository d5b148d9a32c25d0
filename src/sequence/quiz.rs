//! Quiz / Area-Unlock Sequence
//!
//! A per-sign finite state machine: idle, typing out the question,
//! awaiting an answer, a short advancing delay after a correct one, and a
//! permanent completed state. Completion unlocks the expansion area
//! exactly once; walking away resets any in-flight question but never
//! completion.

use crate::config::QuizConfig;

/// Quiz machine states. `question` indexes into the config's question list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuizState {
    Idle,
    Typing { question: usize, shown: f32 },
    Awaiting { question: usize, selected: Option<u8> },
    Advancing { question: usize, remaining: f32 },
    Completed,
}

/// Read-only snapshot for presentation: the visible text prefix, the
/// options once fully typed, and the cosmetic shake level.
#[derive(Debug, Clone)]
pub struct QuizView<'a> {
    /// Question text revealed so far.
    pub text: &'a str,
    /// Answer options, present only while an answer can be chosen.
    pub options: Option<&'a [String]>,
    pub selected: Option<u8>,
    /// Wrong-answer shake intensity, 1 at the moment of the miss, 0 at rest.
    pub shake: f32,
    /// True during the post-correct-answer delay; presentation plays the
    /// celebration burst while set.
    pub celebrating: bool,
    pub completed: bool,
}

#[derive(Debug)]
pub struct QuizSequencer {
    state: QuizState,
    /// Question to resume from after a proximity reset. Answered questions
    /// stay answered; only the in-flight one restarts.
    resume_from: usize,
    /// Remaining wrong-answer shake time. Cosmetic only, never gates input.
    shake: f32,
    unlock_fired: bool,
}

impl QuizSequencer {
    pub fn new() -> Self {
        Self {
            state: QuizState::Idle,
            resume_from: 0,
            shake: 0.0,
            unlock_fired: false,
        }
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn is_completed(&self) -> bool {
        self.state == QuizState::Completed
    }

    /// Highlight an answer option. Ignored outside the answering state or
    /// for an out-of-range index.
    pub fn select(&mut self, option: u8, cfg: &QuizConfig) {
        if let QuizState::Awaiting { question, .. } = self.state {
            if (option as usize) < cfg.questions[question].options.len() {
                self.state = QuizState::Awaiting {
                    question,
                    selected: Some(option),
                };
            }
        }
    }

    /// Confirm the highlighted answer. No selection is a no-op; a wrong
    /// answer shakes and stays put; a correct one starts the advance delay.
    pub fn confirm(&mut self, cfg: &QuizConfig) {
        let QuizState::Awaiting {
            question,
            selected: Some(selected),
        } = self.state
        else {
            return;
        };
        if selected == cfg.questions[question].correct {
            self.state = QuizState::Advancing {
                question,
                remaining: cfg.advance_delay,
            };
        } else {
            self.shake = cfg.shake_duration;
            self.state = QuizState::Awaiting {
                question,
                selected: None,
            };
        }
    }

    /// Per-frame update. `near` is whether any character is inside the
    /// sign's trigger radius; leaving resets an in-flight question back to
    /// idle but never touches completion. Returns true on the single frame
    /// the final answer completes the quiz.
    pub fn update(&mut self, near: bool, cfg: &QuizConfig, dt: f32) -> bool {
        self.shake = (self.shake - dt).max(0.0);

        match self.state {
            QuizState::Idle => {
                if near && self.resume_from < cfg.questions.len() {
                    self.state = QuizState::Typing {
                        question: self.resume_from,
                        shown: 0.0,
                    };
                }
                false
            }
            QuizState::Typing { question, shown } => {
                if !near {
                    self.state = QuizState::Idle;
                    return false;
                }
                let shown = shown + cfg.typing_speed * dt;
                let len = cfg.questions[question].prompt.chars().count() as f32;
                self.state = if shown >= len {
                    QuizState::Awaiting {
                        question,
                        selected: None,
                    }
                } else {
                    QuizState::Typing { question, shown }
                };
                false
            }
            QuizState::Awaiting { .. } => {
                if !near {
                    self.state = QuizState::Idle;
                }
                false
            }
            QuizState::Advancing { question, remaining } => {
                // The advance delay plays out even if the player steps back.
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    self.state = QuizState::Advancing { question, remaining };
                    false
                } else if question + 1 < cfg.questions.len() {
                    self.resume_from = question + 1;
                    self.state = QuizState::Typing {
                        question: question + 1,
                        shown: 0.0,
                    };
                    false
                } else {
                    self.state = QuizState::Completed;
                    let first = !self.unlock_fired;
                    self.unlock_fired = true;
                    first
                }
            }
            QuizState::Completed => false,
        }
    }

    /// Presentation snapshot.
    pub fn view<'a>(&self, cfg: &'a QuizConfig) -> QuizView<'a> {
        let shake = if self.shake > 0.0 {
            self.shake / cfg.shake_duration
        } else {
            0.0
        };
        match self.state {
            QuizState::Idle => QuizView {
                text: "",
                options: None,
                selected: None,
                shake,
                celebrating: false,
                completed: false,
            },
            QuizState::Typing { question, shown } => {
                let prompt = &cfg.questions[question].prompt;
                let visible = prompt
                    .char_indices()
                    .nth(shown as usize)
                    .map_or(prompt.len(), |(i, _)| i);
                QuizView {
                    text: &prompt[..visible],
                    options: None,
                    selected: None,
                    shake,
                    celebrating: false,
                    completed: false,
                }
            }
            QuizState::Awaiting { question, selected } => QuizView {
                text: &cfg.questions[question].prompt,
                options: Some(&cfg.questions[question].options),
                selected,
                shake,
                celebrating: false,
                completed: false,
            },
            QuizState::Advancing { question, .. } => QuizView {
                text: &cfg.questions[question].prompt,
                options: None,
                selected: None,
                shake,
                celebrating: true,
                completed: false,
            },
            QuizState::Completed => QuizView {
                text: "",
                options: None,
                selected: None,
                shake,
                celebrating: false,
                completed: true,
            },
        }
    }
}

impl Default for QuizSequencer {
    fn default() -> Self {
        Self::new()
    }
}
