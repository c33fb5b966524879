//! HUD and state overlay text
//!
//! Text is presented by the host page; this module only decides what it says
//! and how opaque the pulsing prompt is.

use crate::sim::{GamePhase, GameState};

/// Heart glyph used for the lives display
pub const HEART: char = '♥';

/// Text for the full-screen overlay shown outside of active play
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub title: &'static str,
    /// Extra lines under the title (e.g. final score)
    pub details: Vec<String>,
    /// Pulsing call to action
    pub prompt: &'static str,
    /// Opacity of the prompt line
    pub prompt_alpha: f32,
}

/// Top bar contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub score: String,
    pub lives: String,
    pub hearts: String,
}

/// Prompt opacity for the given frame; oscillates in [0.2, 1.0]
pub fn pulse_alpha(frame: u64) -> f32 {
    0.6 + 0.4 * (frame as f32 * 0.05).sin()
}

pub fn hearts(lives: u32) -> String {
    std::iter::repeat_n(HEART, lives as usize).collect()
}

pub fn hud(state: &GameState) -> Hud {
    Hud {
        score: state.score.to_string(),
        lives: state.lives.to_string(),
        hearts: hearts(state.lives),
    }
}

/// Overlay for the current phase, `None` while playing
pub fn overlay(state: &GameState, pulse: bool) -> Option<Overlay> {
    let prompt_alpha = if pulse { pulse_alpha(state.frame) } else { 1.0 };

    let (title, details, prompt) = match state.phase {
        GamePhase::Playing => return None,
        GamePhase::Ready => (
            "NEON BREAKOUT",
            vec!["← → or A / D to move".to_string()],
            "Press SPACE to start",
        ),
        GamePhase::Paused => ("PAUSED", Vec::new(), "Press SPACE to resume"),
        GamePhase::GameOver => (
            "GAME OVER",
            vec![format!("Final score: {}", state.score)],
            "Press R to restart",
        ),
        GamePhase::Win => (
            "YOU WIN!",
            vec![
                format!("Final score: {}", state.score),
                format!("Lives left: {}", hearts(state.lives)),
            ],
            "Press R to play again",
        ),
    };

    Some(Overlay {
        title,
        details,
        prompt,
        prompt_alpha,
    })
}
