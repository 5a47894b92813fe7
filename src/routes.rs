//! Request routing.
//!
//! Maps a [`Route`] plus the caller's [`Session`] to a [`Response`]. The layer
//! is transport-agnostic: the terminal front-end drives it directly, and the
//! status codes follow HTTP conventions so any transport can reuse them.

use crate::auth::{is_authenticated, Session};
use crate::constants::song::NOT_FOUND_MESSAGE;
use crate::error::Error;
use crate::services::{Lookup, SongLibrary};
use crate::song::{SongSummary, SongView};
use crate::types::SongId;

/// Path of the login entry point.
pub const LOGIN_PATH: &str = "/login";

/// A request to the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Upload form.
    Home,
    /// Login form.
    Login,
    /// Upload a document.
    Upload(Vec<u8>),
    /// Saved songs.
    History,
    /// Songs uploaded by the signed-in user.
    MyHistory,
    /// One song by id.
    SongById(SongId),
    /// One song by exact title.
    SongByTitle(String),
}

impl Route {
    /// Parse a request path. Title segments are used verbatim.
    pub fn parse_path(path: &str) -> Option<Self> {
        let path = path.trim_end_matches('/');
        match path {
            "" => return Some(Self::Home),
            LOGIN_PATH => return Some(Self::Login),
            "/history" => return Some(Self::History),
            "/history/mine" => return Some(Self::MyHistory),
            _ => {}
        }

        let rest = path.strip_prefix("/song/")?;
        if let Some(title) = rest.strip_prefix("title/") {
            return (!title.is_empty()).then(|| Self::SongByTitle(title.to_string()));
        }
        rest.parse::<u64>().ok().map(|id| Self::SongById(SongId::new(id)))
    }

    /// Whether the route needs a signed-in session.
    pub const fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login)
    }
}

/// What to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// Ask for a document.
    UploadForm,
    /// Ask for credentials.
    LoginForm,
    /// A song, aligned.
    Presentation(SongView),
    /// A song list.
    History(Vec<SongSummary>),
    /// The requested song does not exist.
    NotFound(String),
    /// The request could not be processed.
    Failed(String),
    /// Go elsewhere.
    Redirect(String),
}

/// A page plus an HTTP-style status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status code.
    pub status: u16,
    /// Page to show.
    pub page: Page,
}

impl Response {
    /// 200 with a page.
    pub const fn ok(page: Page) -> Self {
        Self { status: 200, page }
    }

    /// 303 to a target path.
    pub fn redirect(target: &str) -> Self {
        Self { status: 303, page: Page::Redirect(target.to_string()) }
    }

    /// 404 with the standard message.
    pub fn not_found() -> Self {
        Self { status: 404, page: Page::NotFound(NOT_FOUND_MESSAGE.to_string()) }
    }

    /// 422 for a document that could not be processed.
    pub fn failed(error: &Error) -> Self {
        Self { status: 422, page: Page::Failed(error.user_message()) }
    }
}

/// Routes requests to the song library.
#[derive(Clone)]
pub struct Router {
    library: SongLibrary,
}

impl Router {
    /// Create a router over a library.
    pub const fn new(library: SongLibrary) -> Self {
        Self { library }
    }

    /// The library behind the routes.
    pub const fn library(&self) -> &SongLibrary {
        &self.library
    }

    /// Handle one request.
    pub async fn handle(&self, session: &Session, route: Route) -> Response {
        if route.requires_auth() && !is_authenticated(session) {
            return Response::redirect(LOGIN_PATH);
        }

        match route {
            Route::Home => Response::ok(Page::UploadForm),
            Route::Login => Response::ok(Page::LoginForm),
            Route::Upload(bytes) => match self.library.upload(session, bytes).await {
                Ok(view) => Response::ok(Page::Presentation(view)),
                Err(e) => {
                    tracing::warn!("Upload failed: {e}");
                    Response::failed(&e)
                }
            },
            Route::History => Response::ok(Page::History(self.library.browse())),
            Route::MyHistory => Response::ok(Page::History(self.library.my_songs(session))),
            Route::SongById(id) => present(self.library.view_by_id(id)),
            Route::SongByTitle(title) => present(self.library.view_by_title(&title)),
        }
    }
}

fn present(lookup: Lookup) -> Response {
    match lookup {
        Lookup::Found(view) => Response::ok(Page::Presentation(view)),
        Lookup::NotFound => Response::not_found(),
    }
}
