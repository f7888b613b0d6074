/*!
 * Named routes for the polls application.
 *
 * Handlers and templates reverse a `Route` rather than building paths by hand.
 */
use std::fmt;

pub const INDEX: &str = "/polls";
pub const DETAIL: &str = "/polls/:question_id";
pub const RESULTS: &str = "/polls/:question_id/results";
pub const VOTE: &str = "/polls/:question_id/vote";

/**
 * Name of the path parameter carrying a question's id
 */
pub const QUESTION_ID: &str = "question_id";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Index,
    Detail(i64),
    Results(i64),
    Vote(i64),
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::Index => "polls:index",
            Route::Detail(_) => "polls:detail",
            Route::Results(_) => "polls:results",
            Route::Vote(_) => "polls:vote",
        }
    }

    fn pattern(&self) -> &'static str {
        match self {
            Route::Index => INDEX,
            Route::Detail(_) => DETAIL,
            Route::Results(_) => RESULTS,
            Route::Vote(_) => VOTE,
        }
    }

    /**
     * Resolve a route by its symbolic name, e.g. `polls:detail` with the
     * question id as its only argument
     */
    pub fn from_name(name: &str, args: &[i64]) -> Option<Route> {
        match (name, args) {
            ("polls:index", []) => Some(Route::Index),
            ("polls:detail", [id]) => Some(Route::Detail(*id)),
            ("polls:results", [id]) => Some(Route::Results(*id)),
            ("polls:vote", [id]) => Some(Route::Vote(*id)),
            _ => None,
        }
    }
}

pub fn reverse(route: Route) -> String {
    match route {
        Route::Index => INDEX.to_string(),
        Route::Detail(id) | Route::Results(id) | Route::Vote(id) => route
            .pattern()
            .replace(&format!(":{}", QUESTION_ID), &id.to_string()),
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&reverse(*self))
    }
}
