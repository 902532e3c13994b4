//! Member demo application: the external wiring for the dispatcher.
//!
//! Every controller generation serves the same member screens under its own
//! prefix:
//!
//! ```text
//! /front-controller/v{1..4}/members/new-form   form
//! /front-controller/v{1..4}/members/save       save (username, age)
//! /front-controller/v{1..4}/members            list
//! ```

pub mod controllers;
pub mod member;

use std::path::Path;
use std::sync::Arc;

use crate::config::ViewConfig;
use crate::mvc::{Dispatcher, Handler, RenderError, TeraEngine, ViewResolver};

use self::controllers::{v1, v2, v3, v4, VIEW_MEMBERS, VIEW_NEW_FORM, VIEW_SAVE_RESULT};
use self::member::MemberRepository;

pub const BASE_PATH: &str = "/front-controller";

fn paths(version: &str) -> [String; 3] {
    let root = format!("{}/{}/members", BASE_PATH, version);
    [format!("{root}/new-form"), format!("{root}/save"), root]
}

/// Ordered `(path, handler)` registrations for all four generations.
pub fn routes(repository: Arc<MemberRepository>) -> Vec<(String, Handler)> {
    let repo = &repository;
    let mut routes = Vec::with_capacity(12);

    let [form, save, list] = paths("v1");
    routes.push((form, Handler::direct_write(v1::MemberFormController)));
    routes.push((save, Handler::direct_write(v1::MemberSaveController::new(repo.clone()))));
    routes.push((list, Handler::direct_write(v1::MemberListController::new(repo.clone()))));

    let [form, save, list] = paths("v2");
    routes.push((form, Handler::view(v2::MemberFormController)));
    routes.push((save, Handler::view(v2::MemberSaveController::new(repo.clone()))));
    routes.push((list, Handler::view(v2::MemberListController::new(repo.clone()))));

    let [form, save, list] = paths("v3");
    routes.push((form, Handler::simple_view(v3::MemberFormController)));
    routes.push((save, Handler::simple_view(v3::MemberSaveController::new(repo.clone()))));
    routes.push((list, Handler::simple_view(v3::MemberListController::new(repo.clone()))));

    let [form, save, list] = paths("v4");
    routes.push((form, Handler::model(v4::MemberFormController)));
    routes.push((save, Handler::model(v4::MemberSaveController::new(repo.clone()))));
    routes.push((list, Handler::model(v4::MemberListController::new(repo.clone()))));

    routes
}

/// Views rendered by generations 2 to 4.
pub const VIEWS: [&str; 3] = [VIEW_NEW_FORM, VIEW_SAVE_RESULT, VIEW_MEMBERS];

/// Wire the member routes, default adapters, resolver and templates.
///
/// Fails if any of [`VIEWS`] has no template under the configured resolver.
pub fn build_dispatcher(
    views: &ViewConfig,
    repository: Arc<MemberRepository>,
) -> Result<Dispatcher, RenderError> {
    let engine = TeraEngine::from_dir(Path::new(&views.template_dir))?;
    let resolver = ViewResolver::new(views.prefix.clone(), views.suffix.clone());
    for name in VIEWS {
        let view = resolver.resolve(name);
        if !engine.has_template(view.template()) {
            return Err(RenderError::TemplateNotFound(view.template().to_string()));
        }
    }

    Ok(Dispatcher::builder(Arc::new(engine))
        .handlers(routes(repository))
        .default_adapters()
        .view_resolver(resolver)
        .build())
}
