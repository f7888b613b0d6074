use handlebars::{
    handlebars_helper, Context, Handlebars, Helper, HelperResult, Output, RenderContext,
    RenderError,
};
use log::*;
use serde::Serialize;
use tide::{Response, StatusCode};

use std::path::Path;

use crate::urls::{reverse, Route};

handlebars_helper!(pluralize: |count: i64| if count == 1 { "" } else { "s" });

/**
 * `{{url "polls:detail" question.id}}` writes the path of a named route
 */
fn url(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let name = h
        .param(0)
        .and_then(|param| param.value().as_str())
        .ok_or_else(|| RenderError::new("url needs a route name"))?;
    let args: Vec<i64> = h
        .params()
        .iter()
        .skip(1)
        .filter_map(|param| param.value().as_i64())
        .collect();

    match Route::from_name(name, &args) {
        Some(route) => {
            out.write(&reverse(route))?;
            Ok(())
        }
        None => Err(RenderError::new(format!(
            "no route named {} taking {:?}",
            name, args
        ))),
    }
}

/**
 * Load every `.hbs` file under `dir` into a registry.
 *
 * Templates are named by their path relative to `dir` without the extension,
 * e.g. `polls/index`.
 */
pub fn load<P: AsRef<Path>>(dir: P) -> Result<Handlebars<'static>, handlebars::TemplateError> {
    let mut hb = Handlebars::new();
    hb.register_escape_fn(|raw| html_escape::encode_double_quoted_attribute(raw).into_owned());
    hb.register_helper("pluralize", Box::new(pluralize));
    hb.register_helper("url", Box::new(url));
    hb.register_templates_directory(".hbs", dir.as_ref())?;
    debug!("Loaded templates from {:?}", dir.as_ref());
    Ok(hb)
}

/**
 * Render the named template into an HTML response
 */
pub fn render<T: Serialize>(
    hb: &Handlebars<'_>,
    name: &str,
    data: &T,
) -> Result<Response, tide::Error> {
    let html = hb.render(name, data)?;
    Ok(Response::builder(StatusCode::Ok)
        .body(html)
        .content_type(tide::http::mime::HTML)
        .build())
}
