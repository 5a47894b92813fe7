//! Terminal application state and key handling.
//!
//! [`App`] owns the screen state and turns key presses into [`Route`]s. Routes
//! are handled on background tasks and their responses come back through a
//! channel drained once per frame.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::auth::{is_authenticated, Authenticator, Session};
use crate::config::Config;
use crate::constants::async_tasks::CHANNEL_BUFFER_SIZE;
use crate::error::{Error, Result};
use crate::extract::PdfTextExtractor;
use crate::llm::ChatClient;
use crate::render::render_song;
use crate::routes::{Page, Response, Route, Router};
use crate::services::search::{FuzzySearch, SearchStrategy};
use crate::services::SongLibrary;
use crate::song::{SongSummary, SongView};
use crate::storage::{JsonSongStore, MemorySongStore, SongStore};
use crate::types::SongId;

/// Messages sent back from async tasks.
#[derive(Debug)]
pub enum AppUpdate {
    /// A route finished.
    Routed(Response),
}

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Access code prompt.
    Login,
    /// PDF path entry.
    Upload,
    /// Song list.
    History,
    /// One song, chords over lyrics.
    Presentation,
}

/// Which login field receives typed characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    /// User name.
    #[default]
    User,
    /// Access code.
    Code,
}

/// Application state.
pub struct App {
    /// Current screen.
    pub mode: AppMode,
    /// Mode to return to when leaving the presentation screen
    pub return_mode: AppMode,
    /// Handles every route.
    pub router: Router,
    /// Access code gate.
    pub auth: Authenticator,
    /// The terminal user's session.
    pub session: Session,
    /// Songs in the history list, unfiltered.
    pub songs: Vec<SongSummary>,
    /// Selection within the visible songs.
    pub song_list_state: ListState,
    /// Whether keys go to the `/` filter.
    pub filter_active: bool,
    /// The `/` filter text.
    pub filter_query: String,
    /// Whether the history list shows only the user's uploads.
    pub show_mine: bool,
    /// Typed document path.
    pub path_input: String,
    /// Typed user name.
    pub login_user: String,
    /// Typed access code.
    pub login_code: String,
    /// Field receiving login input.
    pub login_field: LoginField,
    /// Song on the presentation screen.
    pub current_song: Option<SongView>,
    /// Presentation scroll offset in rows.
    pub scroll: u16,
    /// Text typed after `:`.
    pub global_command_buffer: String,
    /// Whether keys go to the command line.
    pub is_global_command_mode: bool,
    /// Set once the app should exit.
    pub should_quit: bool,
    /// A route is in flight.
    pub is_loading: bool,
    /// Error modal text.
    pub error_message: Option<String>,
    /// Info modal text.
    pub status_message: Option<String>,
    /// Whether the help modal is open.
    pub show_help: bool,
    /// Sender handed to background tasks.
    pub async_task_tx: mpsc::Sender<AppUpdate>,
    async_task_rx: mpsc::Receiver<AppUpdate>,
}

impl App {
    /// Build the app from configuration, wiring the real collaborators.
    pub fn new(config: &Config) -> Self {
        let opened = config.db_path.as_ref().map(|path| JsonSongStore::open(path));
        let store: Arc<dyn SongStore> = match opened {
            Some(Ok(store)) => Arc::new(store),
            Some(Err(e)) => {
                tracing::warn!("Song store unavailable, keeping songs in memory: {e}");
                Arc::new(MemorySongStore::new())
            }
            None => {
                tracing::warn!("No data directory, keeping songs in memory");
                Arc::new(MemorySongStore::new())
            }
        };

        if !config.has_api_key() {
            tracing::warn!("OPENAI_API_KEY is not set; uploads will be saved as placeholders");
        }

        let library = SongLibrary::new(
            store,
            Arc::new(ChatClient::new(config)),
            Arc::new(PdfTextExtractor),
        );
        Self::with_router(Router::new(library), Authenticator::from_config(config))
    }

    /// Build the app around an existing router.
    pub fn with_router(router: Router, auth: Authenticator) -> Self {
        let (async_task_tx, async_task_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        let session = auth.new_session();
        let mode = if is_authenticated(&session) { AppMode::Upload } else { AppMode::Login };

        Self {
            mode,
            return_mode: AppMode::History,
            router,
            auth,
            session,
            songs: Vec::new(),
            song_list_state: ListState::default(),
            filter_active: false,
            filter_query: String::new(),
            show_mine: false,
            path_input: String::new(),
            login_user: String::new(),
            login_code: String::new(),
            login_field: LoginField::default(),
            current_song: None,
            scroll: 0,
            global_command_buffer: String::new(),
            is_global_command_mode: false,
            should_quit: false,
            is_loading: false,
            error_message: None,
            status_message: None,
            show_help: false,
            async_task_tx,
            async_task_rx,
        }
    }

    /// Whether the main loop should exit.
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Ask the main loop to exit.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Songs shown in the history list, after the `/` filter.
    pub fn visible_songs(&self) -> Vec<&SongSummary> {
        if self.filter_query.trim().is_empty() {
            return self.songs.iter().collect();
        }
        FuzzySearch::default().find_matches(&self.filter_query, &self.songs, self.songs.len())
    }

    /// The route behind the history list: all songs, or only the user's.
    pub const fn history_route(&self) -> Route {
        if self.show_mine {
            Route::MyHistory
        } else {
            Route::History
        }
    }

    /// Send a route to the router on a background task.
    pub fn navigate(&mut self, route: Route) {
        self.is_loading = true;
        let router = self.router.clone();
        let session = self.session.clone();
        let tx = self.async_task_tx.clone();

        tokio::spawn(async move {
            let response = router.handle(&session, route).await;
            if let Err(e) = tx.send(AppUpdate::Routed(response)).await {
                tracing::warn!("Dropped route response: {e}");
            }
        });
    }

    /// Drain finished async tasks; called once per frame.
    pub fn handle_updates(&mut self) {
        while let Ok(update) = self.async_task_rx.try_recv() {
            match update {
                AppUpdate::Routed(response) => {
                    self.is_loading = false;
                    self.apply_response(response);
                }
            }
        }
    }

    /// Switch screens according to a route response.
    pub fn apply_response(&mut self, response: Response) {
        match response.page {
            Page::UploadForm => self.mode = AppMode::Upload,
            Page::LoginForm => self.mode = AppMode::Login,
            Page::Redirect(_) => {
                self.mode = AppMode::Login;
                self.status_message = Some("Please log in first".to_string());
            }
            Page::Presentation(view) => {
                if self.mode != AppMode::Presentation {
                    self.return_mode = self.mode;
                }
                self.current_song = Some(view);
                self.scroll = 0;
                self.mode = AppMode::Presentation;
            }
            Page::History(songs) => {
                self.songs = songs;
                self.filter_query.clear();
                self.filter_active = false;
                self.song_list_state.select((!self.songs.is_empty()).then_some(0));
                self.mode = AppMode::History;
            }
            Page::NotFound(message) | Page::Failed(message) => {
                self.error_message = Some(format!("{} ({message})", response.status));
            }
        }
    }

    /// Dispatch a key press to the active screen.
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits, even from text fields
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        // Modal messages block everything until dismissed
        if self.error_message.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.error_message = None;
            }
            return;
        }
        if self.status_message.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.status_message = None;
            }
            return;
        }

        if self.is_global_command_mode {
            self.handle_global_command_input(key);
            return;
        }

        if key.code == KeyCode::F(1) {
            self.show_help = true;
            return;
        }

        match self.mode {
            AppMode::Login => self.handle_login_input(key),
            AppMode::Upload => self.handle_upload_input(key),
            AppMode::History => self.handle_history_input(key),
            AppMode::Presentation => self.handle_presentation_input(key),
        }
    }

    /// Insert pasted text into whichever text field is active.
    ///
    /// Terminals paste dropped files as quoted paths, so quotes are stripped
    /// from the upload field.
    pub fn handle_paste(&mut self, text: &str) {
        let text = text.trim_end_matches(['\n', '\r']);
        if self.is_global_command_mode {
            self.global_command_buffer.push_str(text);
            return;
        }
        match self.mode {
            AppMode::Upload => self.path_input.push_str(text.trim().trim_matches(['\'', '"'])),
            AppMode::History if self.filter_active => self.filter_query.push_str(text),
            AppMode::Login => match self.login_field {
                LoginField::User => self.login_user.push_str(text),
                LoginField::Code => self.login_code.push_str(text),
            },
            _ => {}
        }
    }

    fn start_command_mode(&mut self) {
        self.is_global_command_mode = true;
        self.global_command_buffer.clear();
    }

    fn handle_global_command_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.is_global_command_mode = false;
                self.global_command_buffer.clear();
            }
            KeyCode::Enter => {
                self.is_global_command_mode = false;
                let command = std::mem::take(&mut self.global_command_buffer);
                self.run_command(command.trim());
            }
            KeyCode::Backspace => {
                if self.global_command_buffer.pop().is_none() {
                    self.is_global_command_mode = false;
                }
            }
            KeyCode::Char(c) => self.global_command_buffer.push(c),
            _ => {}
        }
    }

    /// Execute a `:` command.
    pub fn run_command(&mut self, command: &str) {
        let (name, arg) = command
            .split_once(' ')
            .map_or((command, ""), |(n, a)| (n, a.trim()));

        match name {
            "q" | "quit" => self.quit(),
            "history" | "h" => {
                self.show_mine = false;
                self.navigate(Route::History);
            }
            "mine" | "m" => {
                self.show_mine = true;
                self.navigate(Route::MyHistory);
            }
            "upload" | "u" => self.navigate(Route::Home),
            "logout" => {
                self.auth.logout(&mut self.session);
                self.mode = AppMode::Login;
            }
            "song" => match arg.parse::<u64>() {
                Ok(id) => self.navigate(Route::SongById(SongId::new(id))),
                Err(_) => self.error_message = Some(format!("Not a song id: {arg:?}")),
            },
            "title" if !arg.is_empty() => self.navigate(Route::SongByTitle(arg.to_string())),
            "export" | "w" if !arg.is_empty() => self.export_song(arg),
            "" => {}
            _ if command.starts_with('/') => match Route::parse_path(command) {
                Some(route) => self.navigate(route),
                None => self.error_message = Some(format!("Unknown path: {command}")),
            },
            other => self.error_message = Some(format!("Unknown command: {other}")),
        }
    }

    /// Write the open song as plain text to a (tilde-expanded) path.
    fn export_song(&mut self, raw: &str) {
        let Some(song) = &self.current_song else {
            self.error_message = Some("No song open".to_string());
            return;
        };
        let path = PathBuf::from(shellexpand::tilde(raw).to_string());
        match fs_err::write(&path, render_song(song)) {
            Ok(()) => self.status_message = Some(format!("Saved to {}", path.display())),
            Err(e) => self.error_message = Some(e.to_string()),
        }
    }

    fn handle_login_input(&mut self, key: KeyEvent) {
        let field = match self.login_field {
            LoginField::User => &mut self.login_user,
            LoginField::Code => &mut self.login_code,
        };

        // `:` and `?` are commands only while the field is empty
        match key.code {
            KeyCode::Char(':') if field.is_empty() => self.start_command_mode(),
            KeyCode::Char('?') if field.is_empty() => self.show_help = true,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
                self.login_field = match self.login_field {
                    LoginField::User => LoginField::Code,
                    LoginField::Code => LoginField::User,
                };
            }
            KeyCode::Char(c) => field.push(c),
            KeyCode::Backspace => {
                field.pop();
            }
            KeyCode::Enter => self.submit_login(),
            KeyCode::Esc => self.quit(),
            _ => {}
        }
    }

    fn submit_login(&mut self) {
        let code = std::mem::take(&mut self.login_code);
        match self.auth.login(&mut self.session, &self.login_user, &code) {
            Ok(()) => self.navigate(Route::Home),
            Err(e) => {
                self.login_field = LoginField::Code;
                self.error_message = Some(e.to_string());
            }
        }
    }

    fn handle_upload_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(':') if self.path_input.is_empty() => self.start_command_mode(),
            KeyCode::Char('?') if self.path_input.is_empty() => self.show_help = true,
            KeyCode::Enter => self.submit_upload(),
            KeyCode::Tab => self.navigate(self.history_route()),
            KeyCode::Esc => self.path_input.clear(),
            KeyCode::Backspace => {
                self.path_input.pop();
            }
            KeyCode::Char(c) => self.path_input.push(c),
            _ => {}
        }
    }

    fn submit_upload(&mut self) {
        let raw = self.path_input.trim();
        if raw.is_empty() {
            return;
        }

        match read_document(raw) {
            Ok(bytes) => self.navigate(Route::Upload(bytes)),
            Err(e) => self.error_message = Some(e.to_string()),
        }
    }

    fn handle_history_input(&mut self, key: KeyEvent) {
        if self.filter_active {
            match key.code {
                KeyCode::Esc => {
                    self.filter_active = false;
                    self.filter_query.clear();
                }
                KeyCode::Enter => self.filter_active = false,
                KeyCode::Backspace => {
                    self.filter_query.pop();
                }
                KeyCode::Char(c) => self.filter_query.push(c),
                _ => return,
            }
            let count = self.visible_songs().len();
            self.song_list_state.select((count > 0).then_some(0));
            return;
        }

        match key.code {
            KeyCode::Char(':') => self.start_command_mode(),
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('/') => {
                self.filter_active = true;
                self.filter_query.clear();
            }
            KeyCode::Char('r') => self.navigate(self.history_route()),
            KeyCode::Tab => self.mode = AppMode::Upload,
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Enter => {
                let selected = self
                    .song_list_state
                    .selected()
                    .and_then(|i| self.visible_songs().get(i).map(|s| s.id));
                if let Some(id) = selected {
                    self.navigate(Route::SongById(id));
                }
            }
            KeyCode::Esc => {
                if !self.filter_query.is_empty() {
                    self.filter_query.clear();
                    self.song_list_state.select((!self.songs.is_empty()).then_some(0));
                }
            }
            _ => {}
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let count = self.visible_songs().len();
        if count == 0 {
            self.song_list_state.select(None);
            return;
        }
        let current = self.song_list_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(count - 1);
        self.song_list_state.select(Some(next));
    }

    fn handle_presentation_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(':') => self.start_command_mode(),
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
            KeyCode::Home => self.scroll = 0,
            KeyCode::Tab => self.navigate(self.history_route()),
            KeyCode::Esc => {
                if self.return_mode == AppMode::History {
                    self.navigate(self.history_route());
                } else {
                    self.mode = self.return_mode;
                }
            }
            _ => {}
        }
    }
}

/// Read an uploaded document from a (tilde-expanded) path.
fn read_document(raw: &str) -> Result<Vec<u8>> {
    let path = PathBuf::from(shellexpand::tilde(raw).to_string());
    std::fs::read(&path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::NotFound(path.display().to_string()),
        _ => Error::io(e, path),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::error::Result;
    use crate::extract::TextExtractor;
    use crate::llm::SongFormatter;
    use crate::song::SongDraft;
    use async_trait::async_trait;

    struct Canned;

    #[async_trait]
    impl SongFormatter for Canned {
        async fn format_song(&self, text: &str) -> Result<SongDraft> {
            Ok(SongDraft::new("Canned", "Tester", text))
        }
    }

    struct Utf8;

    impl TextExtractor for Utf8 {
        fn extract(&self, bytes: &[u8]) -> Result<String> {
            String::from_utf8(bytes.to_vec()).map_err(|e| Error::Extraction(e.to_string()))
        }

        fn name(&self) -> &'static str {
            "Utf8"
        }
    }

    fn app(auth: Authenticator) -> App {
        let library = SongLibrary::new(
            Arc::new(MemorySongStore::new()),
            Arc::new(Canned),
            Arc::new(Utf8),
        );
        App::with_router(Router::new(library), auth)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn summary(id: u64, title: &str) -> SongSummary {
        SongSummary { id: SongId::new(id), title: title.to_string(), author: "x".to_string() }
    }

    #[test]
    fn test_starts_on_login_when_gated() {
        assert_eq!(app(Authenticator::with_code("louvor")).mode, AppMode::Login);
        assert_eq!(app(Authenticator::open()).mode, AppMode::Upload);
    }

    #[tokio::test]
    async fn test_wrong_code_shows_error() {
        let mut app = app(Authenticator::with_code("louvor"));
        for c in "errado".chars() {
            app.login_field = LoginField::Code;
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
        assert!(app.error_message.is_some());
        assert!(!is_authenticated(&app.session));
    }

    #[test]
    fn test_history_response_selects_first() {
        let mut app = app(Authenticator::open());
        app.apply_response(Response::ok(Page::History(vec![summary(2, "A"), summary(1, "B")])));
        assert_eq!(app.mode, AppMode::History);
        assert_eq!(app.song_list_state.selected(), Some(0));

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.song_list_state.selected(), Some(1));
    }

    #[test]
    fn test_presentation_remembers_return_mode() {
        let mut app = app(Authenticator::open());
        app.mode = AppMode::Upload;
        app.apply_response(Response::ok(Page::Presentation(SongView::new("T", "A", "[C]x"))));
        assert_eq!(app.mode, AppMode::Presentation);
        assert_eq!(app.return_mode, AppMode::Upload);

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.mode, AppMode::Upload);
    }

    #[test]
    fn test_not_found_shows_error() {
        let mut app = app(Authenticator::open());
        app.apply_response(Response::not_found());
        assert_eq!(app.error_message.as_deref(), Some("404 (Song not found)"));
    }

    #[test]
    fn test_filter_narrows_visible_songs() {
        let mut app = app(Authenticator::open());
        app.apply_response(Response::ok(Page::History(vec![
            summary(1, "Hosana"),
            summary(2, "Porque Ele Vive"),
        ])));
        app.handle_key(key(KeyCode::Char('/')));
        for c in "hosa".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        let visible = app.visible_songs();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Hosana");
    }

    #[tokio::test]
    async fn test_upload_round_trip_through_router() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("sheet.txt");
        std::fs::write(&path, "[D]Aleluia").unwrap();

        let mut app = app(Authenticator::open());
        app.path_input = path.display().to_string();
        app.handle_key(key(KeyCode::Enter));
        assert!(app.is_loading);

        let update = app.async_task_rx.recv().await.unwrap();
        let AppUpdate::Routed(response) = update;
        app.apply_response(response);

        assert_eq!(app.mode, AppMode::Presentation);
        let song = app.current_song.as_ref().unwrap();
        assert_eq!(song.lines.lines()[0].lyric_row, "   Aleluia");
    }

    #[test]
    fn test_paste_strips_quotes_from_path() {
        let mut app = app(Authenticator::open());
        app.handle_paste("'/home/ana/Hosana.pdf'\n");
        assert_eq!(app.path_input, "/home/ana/Hosana.pdf");
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_colon_q_quits_from_upload() {
        let mut app = app(Authenticator::open());
        assert_eq!(app.mode, AppMode::Upload);
        type_text(&mut app, ":q");
        assert!(app.path_input.is_empty());
        app.handle_key(key(KeyCode::Enter));
        assert!(app.should_quit());
    }

    #[test]
    fn test_colon_inside_path_is_text() {
        let mut app = app(Authenticator::open());
        type_text(&mut app, "C:/songs?.pdf");
        assert_eq!(app.path_input, "C:/songs?.pdf");
        assert!(!app.is_global_command_mode);
        assert!(!app.show_help);
    }

    #[test]
    fn test_question_mark_opens_help_from_empty_fields() {
        let mut upload = app(Authenticator::open());
        upload.handle_key(key(KeyCode::Char('?')));
        assert!(upload.show_help);

        let mut login = app(Authenticator::with_code("louvor"));
        login.handle_key(key(KeyCode::Char('?')));
        assert!(login.show_help);
        assert!(login.login_user.is_empty());
    }

    #[test]
    fn test_colon_q_quits_from_login() {
        let mut app = app(Authenticator::with_code("louvor"));
        type_text(&mut app, ":quit");
        app.handle_key(key(KeyCode::Enter));
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn test_mine_lists_own_uploads_and_reload_keeps_it() {
        let mut app = app(Authenticator::open());
        app.session = Session::signed_in("ana");
        app.router.library().upload_text(&app.session, "[A]um").await;
        app.router.library().upload_text(&Session::signed_in("bia"), "[B]dois").await;

        app.run_command("mine");
        assert!(app.show_mine);
        assert_eq!(app.history_route(), Route::MyHistory);
        let AppUpdate::Routed(response) = app.async_task_rx.recv().await.unwrap();
        app.apply_response(response);
        assert_eq!(app.mode, AppMode::History);
        assert_eq!(app.songs.len(), 1);

        app.run_command("history");
        assert_eq!(app.history_route(), Route::History);
        let AppUpdate::Routed(response) = app.async_task_rx.recv().await.unwrap();
        app.apply_response(response);
        assert_eq!(app.songs.len(), 2);
    }

    #[test]
    fn test_export_writes_open_song() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("hosana.txt");

        let mut app = app(Authenticator::open());
        app.apply_response(Response::ok(Page::Presentation(SongView::new("Hosana", "Hillsong", "[E]Ho"))));
        app.run_command(&format!("export {}", path.display()));

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Hosana\nHillsong\n\n[E]\n   Ho");
        assert_eq!(app.status_message, Some(format!("Saved to {}", path.display())));
    }

    #[tokio::test]
    async fn test_path_command_navigates() {
        let mut app = app(Authenticator::open());
        app.run_command("/history/mine");
        assert!(app.is_loading);
        let AppUpdate::Routed(response) = app.async_task_rx.recv().await.unwrap();
        assert_eq!(response, Response::ok(Page::History(Vec::new())));

        app.run_command("/nowhere");
        assert_eq!(app.error_message.as_deref(), Some("Unknown path: /nowhere"));
    }

    #[test]
    fn test_export_without_song_is_error() {
        let mut app = app(Authenticator::open());
        app.run_command("export /tmp/x.txt");
        assert_eq!(app.error_message.as_deref(), Some("No song open"));
    }

    #[test]
    fn test_missing_file_shows_error() {
        let mut app = app(Authenticator::open());
        app.path_input = "/definitely/not/here.pdf".to_string();
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.error_message.as_deref(), Some("Not found: /definitely/not/here.pdf"));
        assert!(!app.is_loading);
    }
}
