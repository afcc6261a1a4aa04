use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use reel_tui::app::frames::FrameKind;
use reel_tui::app::{AppState, KeypressResult};
use reel_tui::config::Config;
use reel_tui::core::player::MediaPlayer;
use reel_tui::error::Result as ReelResult;
use reel_tui::ui::surface::Grid;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

#[derive(Default, Clone)]
struct RecordingPlayer {
    played: Arc<Mutex<Vec<PathBuf>>>,
    pauses: Arc<Mutex<usize>>,
}

impl MediaPlayer for RecordingPlayer {
    fn play(&self, path: &Path) -> ReelResult<()> {
        self.played
            .lock()
            .map_err(|_| std::io::Error::other("poisoned"))?
            .push(path.to_path_buf());
        Ok(())
    }

    fn pause(&self) -> ReelResult<()> {
        *self
            .pauses
            .lock()
            .map_err(|_| std::io::Error::other("poisoned"))? += 1;
        Ok(())
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn type_text(app: &mut AppState<'_>, text: &str) {
    for c in text.chars() {
        assert_eq!(app.handle_keypress(key(KeyCode::Char(c))), KeypressResult::Continue);
    }
}

fn top_kind(app: &AppState<'_>) -> Option<FrameKind> {
    app.frames().top().map(|f| f.kind())
}

#[test]
fn test_text_box_escape_clears_then_closes() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let config = Config::default();
    let mut app =
        AppState::with_player(&config, dir.path(), (80, 24), Box::new(RecordingPlayer::default()))?;
    assert_eq!(top_kind(&app), Some(FrameKind::Listing));

    app.handle_keypress(key(KeyCode::F(3)));
    assert_eq!(app.frames().len(), 2);
    assert_eq!(top_kind(&app), Some(FrameKind::TextBox));

    // only one text box at a time
    app.handle_keypress(key(KeyCode::F(3)));
    assert_eq!(app.frames().len(), 2);

    type_text(&mut app, "abc");
    assert_eq!(app.handle_keypress(key(KeyCode::Esc)), KeypressResult::Continue);
    assert_eq!(app.frames().len(), 2, "first escape only clears the text");

    assert_eq!(app.handle_keypress(key(KeyCode::Esc)), KeypressResult::Continue);
    assert_eq!(app.frames().len(), 1);
    assert_eq!(top_kind(&app), Some(FrameKind::Listing));
    Ok(())
}

#[test]
fn test_text_box_commit_changes_directory() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::create_dir(dir.path().join("shows"))?;
    let config = Config::default();
    let mut app =
        AppState::with_player(&config, dir.path(), (80, 24), Box::new(RecordingPlayer::default()))?;

    app.handle_keypress(key(KeyCode::F(3)));
    type_text(&mut app, "shows");
    assert_eq!(app.handle_keypress(key(KeyCode::Enter)), KeypressResult::Continue);

    assert_eq!(app.frames().len(), 1);
    let expected = fs::canonicalize(dir.path().join("shows"))?;
    assert_eq!(app.frames().working_dir(), Some(expected.as_path()));
    assert!(!app.status().is_error());
    Ok(())
}

#[test]
fn test_text_box_bad_path_reports_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let config = Config::default();
    let mut app =
        AppState::with_player(&config, dir.path(), (80, 24), Box::new(RecordingPlayer::default()))?;
    let before = app.frames().working_dir().map(Path::to_path_buf);

    app.handle_keypress(key(KeyCode::F(3)));
    type_text(&mut app, "does-not-exist");
    app.handle_keypress(key(KeyCode::Enter));

    assert_eq!(app.frames().len(), 1, "the text box closes even when the change fails");
    assert!(app.status().is_error());
    assert_eq!(app.frames().working_dir().map(Path::to_path_buf), before);
    Ok(())
}

#[test]
fn test_escape_on_base_listing_quits() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::File::create(dir.path().join("a.mkv"))?;
    let config = Config::default();
    let mut app =
        AppState::with_player(&config, dir.path(), (80, 24), Box::new(RecordingPlayer::default()))?;

    type_text(&mut app, "a");
    assert_eq!(app.handle_keypress(key(KeyCode::Esc)), KeypressResult::Continue);
    assert_eq!(app.handle_keypress(key(KeyCode::Esc)), KeypressResult::Quit);
    assert!(app.frames().is_empty());
    Ok(())
}

#[test]
fn test_play_and_pause_reach_the_player() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::File::create(dir.path().join("film.mkv"))?;
    let config = Config::default();
    let player = RecordingPlayer::default();
    let mut app = AppState::with_player(&config, dir.path(), (80, 24), Box::new(player.clone()))?;

    app.handle_keypress(ctrl('b'));
    app.handle_keypress(key(KeyCode::Enter));
    app.handle_keypress(ctrl(' '));

    let played = player.played.lock().map_err(|_| "poisoned")?.clone();
    assert_eq!(played.len(), 2);
    assert!(played.iter().all(|p| p.ends_with("film.mkv")));
    assert_eq!(*player.pauses.lock().map_err(|_| "poisoned")?, 1);
    assert_eq!(app.frames().len(), 1, "enter never pops the base listing");
    Ok(())
}

#[test]
fn test_playing_a_non_media_file_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::File::create(dir.path().join("notes.txt"))?;
    let config = Config::default();
    let player = RecordingPlayer::default();
    let mut app = AppState::with_player(&config, dir.path(), (80, 24), Box::new(player.clone()))?;

    app.handle_keypress(key(KeyCode::Enter));
    assert!(app.status().is_error());
    assert!(player.played.lock().map_err(|_| "poisoned")?.is_empty());
    Ok(())
}

#[test]
fn test_recursive_search_opens_and_closes() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("a/b"))?;
    fs::File::create(dir.path().join("a/b/deep.avi"))?;
    let config = Config::default();
    let mut app =
        AppState::with_player(&config, dir.path(), (80, 24), Box::new(RecordingPlayer::default()))?;

    app.handle_keypress(key(KeyCode::F(4)));
    assert_eq!(top_kind(&app), Some(FrameKind::Recursive));
    assert!(app.status().text().starts_with("Searching "));

    let mut grid = Grid::new(80, 24);
    app.draw(&mut grid);
    assert!(grid.row_text(0).starts_with("Recursive listing of "));

    assert_eq!(app.handle_keypress(key(KeyCode::Esc)), KeypressResult::Continue);
    assert_eq!(top_kind(&app), Some(FrameKind::Listing));
    Ok(())
}

#[test]
fn test_resize_reports_geometry() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let config = Config::default();
    let mut app =
        AppState::with_player(&config, dir.path(), (80, 24), Box::new(RecordingPlayer::default()))?;

    app.resize(100, 30);
    assert_eq!(app.frame_area(), (100, 29));
    assert_eq!(app.status().text(), "Resized to 100x30");

    let mut grid = Grid::new(100, 30);
    app.draw(&mut grid);
    assert!(grid.row_text(29).starts_with("Resized to 100x30"));
    Ok(())
}
