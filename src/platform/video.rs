//! Victory video playback cues
//!
//! The snapshot only says whether the video should be on screen. The media
//! element needs explicit play and rewind calls on the edges of that flag.

/// What to do to the video element this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoCommand {
    /// Start playback from wherever the video is
    Play,
    /// Pause and seek back to the start
    Rewind,
}

/// Edge detector over the snapshot's `victory_video_shown` flag
#[derive(Debug, Clone, Default)]
pub struct VideoCue {
    playing: bool,
}

impl VideoCue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Feed the current flag; returns a command only when it changed
    pub fn update(&mut self, shown: bool) -> Option<VideoCommand> {
        if shown == self.playing {
            return None;
        }
        self.playing = shown;
        Some(if shown {
            VideoCommand::Play
        } else {
            VideoCommand::Rewind
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;
    use crate::sim::GamePhase;

    #[test]
    fn test_plays_once_when_shown() {
        let mut cue = VideoCue::new();
        assert_eq!(cue.update(false), None);
        assert_eq!(cue.update(true), Some(VideoCommand::Play));
        assert_eq!(cue.update(true), None);
        assert!(cue.is_playing());
    }

    #[test]
    fn test_rewinds_when_hidden_again() {
        let mut cue = VideoCue::new();
        cue.update(true);
        assert_eq!(cue.update(false), Some(VideoCommand::Rewind));
        assert_eq!(cue.update(false), None);
        assert!(!cue.is_playing());
    }

    #[test]
    fn test_follows_proceed_and_restart() {
        let mut game = Game::new();
        let mut cue = VideoCue::new();
        assert_eq!(cue.update(game.snapshot().victory_video_shown), None);

        game.state.phase = GamePhase::GameWon;
        game.proceed_to_victory();
        assert_eq!(
            cue.update(game.snapshot().victory_video_shown),
            Some(VideoCommand::Play)
        );

        game.restart();
        assert_eq!(
            cue.update(game.snapshot().victory_video_shown),
            Some(VideoCommand::Rewind)
        );
    }
}
