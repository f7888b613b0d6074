use handlebars::Handlebars;
use log::*;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use std::str::FromStr;
use std::sync::Arc;

mod api_models;
mod config;
mod dao;
mod models;
mod routes;
mod templates;
mod urls;

use crate::config::Settings;

/**
 * Struct for carrying application state into tide request handlers
 */
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub templates: Arc<Handlebars<'static>>,
}

/**
 * Create the sqlx connection pool for sqlite, bringing the schema up to date
 */
async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::migrate!().run(&pool).await?;
    Ok(pool)
}

/**
 * Register every route of the application against the given state
 */
pub fn app(state: AppState) -> tide::Server<AppState> {
    let mut app = tide::with_state(state);
    app.at("/").get(routes::root);
    app.at(urls::INDEX).get(routes::polls::index);
    app.at(urls::DETAIL).get(routes::polls::detail);
    app.at(urls::RESULTS).get(routes::polls::results);
    app.at(urls::VOTE).post(routes::polls::vote);
    app.at("/api/v1/questions").put(routes::api::create);
    app.at("/api/v1/questions/:question_id").get(routes::api::get);
    app.at("/api/v1/questions/:question_id/choices")
        .post(routes::api::add_choice);
    app
}

#[async_std::main]
async fn main() -> Result<(), std::io::Error> {
    let settings = Settings::from_env();
    pretty_env_logger::init();

    let templates = match templates::load(&settings.template_dir) {
        Ok(templates) => templates,
        Err(err) => {
            error!("Could not load templates from {}! {:?}", settings.template_dir, err);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, err));
        }
    };

    match create_pool(&settings.database_url).await {
        Ok(db) => {
            let state = AppState {
                db,
                templates: Arc::new(templates),
            };
            info!("Listening on {}", settings.bind_address);
            app(state).listen(settings.bind_address).await?;
            Ok(())
        }
        Err(err) => {
            error!("Could not initialize pool! {:?}", err);
            Err(std::io::Error::new(std::io::ErrorKind::Other, err))
        }
    }
}

#[cfg(test)]
pub(crate) fn test_template_dir() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/templates")
}

/**
 * A private in-memory database with the schema applied
 */
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    // the in-memory database is dropped along with its last connection
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to migrate");
    pool
}

#[cfg(test)]
pub(crate) async fn test_state() -> AppState {
    AppState {
        db: test_pool().await,
        templates: Arc::new(templates::load(test_template_dir()).expect("Failed to load templates")),
    }
}
