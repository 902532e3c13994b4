//! End-to-end dispatch scenarios against the library API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;
use front_controller::http::{HttpRequest, HttpResponse, ParamMap};
use front_controller::mvc::{
    DirectWriteAdapter, DirectWriteController, DispatchError, DispatchOutcome, Dispatcher,
    Handler, HandlerError, Model, ModelAdapter, ModelController, ModelView, RenderError,
    SimpleViewAdapter, TemplateEngine, ViewAdapter, ViewController,
};
use serde_json::json;

mod common;
use common::{count, CountingAdapter, RecordingEngine};

struct WriteA;
impl DirectWriteController for WriteA {
    fn process(&self, _req: &HttpRequest, resp: &mut HttpResponse) -> Result<(), HandlerError> {
        resp.write("A");
        Ok(())
    }
}

struct ReturnB;
impl ViewController for ReturnB {
    fn process(&self, _req: &HttpRequest, _resp: &mut HttpResponse) -> Result<ModelView, HandlerError> {
        Ok(ModelView::with_model("b", Model::new().with("x", 1)))
    }
}

struct NameC;
impl ModelController for NameC {
    fn process(&self, _params: &ParamMap, _model: &mut Model) -> Result<String, HandlerError> {
        Ok("c".into())
    }
}

#[derive(Debug)]
struct OutOfStock;

impl std::fmt::Display for OutOfStock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "out of stock")
    }
}

impl std::error::Error for OutOfStock {}

struct Failing;
impl ModelController for Failing {
    fn process(&self, _params: &ParamMap, _model: &mut Model) -> Result<String, HandlerError> {
        Err(Box::new(OutOfStock))
    }
}

/// A handler shape that no built-in adapter knows.
struct LegacyServlet;

struct Fixture {
    dispatcher: Dispatcher,
    engine: Arc<RecordingEngine>,
    handles: Vec<Arc<AtomicUsize>>,
    supports: Vec<Arc<AtomicUsize>>,
}

fn fixture() -> Fixture {
    let engine = RecordingEngine::new();
    let direct_write = CountingAdapter::new("direct-write", DirectWriteAdapter);
    let view = CountingAdapter::new("view", ViewAdapter);
    let simple_view = CountingAdapter::new("simple-view", SimpleViewAdapter);
    let model = CountingAdapter::new("model", ModelAdapter);
    let (supports, handles): (Vec<_>, Vec<_>) = [
        direct_write.counters(),
        view.counters(),
        simple_view.counters(),
        model.counters(),
    ]
    .into_iter()
    .unzip();

    let builder = Dispatcher::builder(engine.clone())
        .handler("/a", Handler::direct_write(WriteA))
        .handler("/b", Handler::view(ReturnB))
        .handler("/c", Handler::model(NameC))
        .handler("/fail", Handler::model(Failing))
        .handler("/legacy", Handler::new(LegacyServlet))
        .adapter(direct_write)
        .adapter(view)
        .adapter(simple_view)
        .adapter(model);

    Fixture {
        dispatcher: builder.build(),
        engine,
        handles,
        supports,
    }
}

fn serve(dispatcher: &Dispatcher, path: &str) -> (Result<DispatchOutcome, DispatchError>, HttpResponse) {
    let mut resp = HttpResponse::new();
    let result = dispatcher.serve(&HttpRequest::get(path), &mut resp);
    (result, resp)
}

fn handle_counts(f: &Fixture) -> Vec<usize> {
    f.handles.iter().map(|c| count(c)).collect()
}

#[test]
fn test_direct_write_handler_skips_render() {
    let f = fixture();
    let (result, resp) = serve(&f.dispatcher, "/a");

    assert_eq!(result.unwrap(), DispatchOutcome::Skipped);
    assert_eq!(resp.body_text(), "A");
    assert!(f.engine.calls().is_empty());
    assert_eq!(handle_counts(&f), vec![1, 0, 0, 0]);
}

#[test]
fn test_view_returning_handler_is_resolved_and_rendered() {
    let f = fixture();
    let (result, resp) = serve(&f.dispatcher, "/b");

    assert_eq!(result.unwrap(), DispatchOutcome::Rendered);
    let calls = f.engine.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "views/b.html");
    assert_eq!(calls[0].1.get("x"), Some(&json!(1)));
    assert_eq!(calls[0].1.len(), 1);
    assert_eq!(resp.body_text(), "rendered:views/b.html");
    assert_eq!(handle_counts(&f), vec![0, 1, 0, 0]);
}

#[test]
fn test_map_and_name_handler_normalizes_like_view_returning() {
    let f = fixture();
    let (result, resp) = serve(&f.dispatcher, "/c");

    assert_eq!(result.unwrap(), DispatchOutcome::Rendered);
    let calls = f.engine.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "views/c.html");
    assert!(calls[0].1.is_empty());
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.body_text(), "rendered:views/c.html");
    assert_eq!(handle_counts(&f), vec![0, 0, 0, 1]);
}

#[test]
fn test_unregistered_path_has_no_side_effects() {
    let f = fixture();
    let (result, resp) = serve(&f.dispatcher, "/zzz");

    assert_eq!(result.unwrap(), DispatchOutcome::NotFound);
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(resp.body().is_empty());
    assert!(f.engine.calls().is_empty());
    assert_eq!(handle_counts(&f), vec![0, 0, 0, 0]);
    assert!(f.supports.iter().all(|c| count(c) == 0));
}

#[test]
fn test_unsupported_handler_variant_is_adapter_not_found() {
    let f = fixture();
    let (result, _) = serve(&f.dispatcher, "/legacy");

    match result {
        Err(DispatchError::AdapterNotFound { path, handler }) => {
            assert_eq!(path, "/legacy");
            assert!(handler.ends_with("LegacyServlet"));
        }
        other => panic!("expected AdapterNotFound, got {:?}", other),
    }
    assert_eq!(handle_counts(&f), vec![0, 0, 0, 0]);
    assert!(f.engine.calls().is_empty());
    assert!(f.dispatcher.verify().is_err());
}

#[test]
fn test_handler_error_propagates_unmodified() {
    let f = fixture();
    let (result, _) = serve(&f.dispatcher, "/fail");

    let Err(DispatchError::Handler(err)) = result else {
        panic!("expected handler error");
    };
    assert!(err.downcast_ref::<OutOfStock>().is_some());
    assert!(f.engine.calls().is_empty());
}

#[test]
fn test_first_supporting_adapter_wins() {
    let first = CountingAdapter::new("first", ViewAdapter);
    let second = CountingAdapter::new("second", ViewAdapter);
    let skipped = CountingAdapter::new("direct-write", DirectWriteAdapter);
    let (first_supports, first_handles) = first.counters();
    let (second_supports, second_handles) = second.counters();
    let (skipped_supports, skipped_handles) = skipped.counters();

    let dispatcher = Dispatcher::builder(RecordingEngine::new())
        .handler("/b", Handler::view(ReturnB))
        .adapter(skipped)
        .adapter(first)
        .adapter(second)
        .build();

    let (result, _) = serve(&dispatcher, "/b");
    assert_eq!(result.unwrap(), DispatchOutcome::Rendered);

    assert_eq!(count(&skipped_supports), 1);
    assert_eq!(count(&skipped_handles), 0);
    assert_eq!(count(&first_supports), 1);
    assert_eq!(count(&first_handles), 1);
    assert_eq!(count(&second_supports), 0);
    assert_eq!(count(&second_handles), 0);
    assert_eq!(dispatcher.adapter_for(&Handler::view(ReturnB)).map(|a| a.name()), Some("first"));
}

#[test]
fn test_render_failure_propagates_without_fallback() {
    struct Broken;
    impl TemplateEngine for Broken {
        fn render(&self, template: &str, _model: &Model) -> Result<String, RenderError> {
            Err(RenderError::TemplateNotFound(template.to_string()))
        }
    }

    let dispatcher = Dispatcher::builder(Arc::new(Broken))
        .handler("/b", Handler::view(ReturnB))
        .default_adapters()
        .build();

    let (result, resp) = serve(&dispatcher, "/b");
    assert!(matches!(
        result,
        Err(DispatchError::Render(RenderError::TemplateNotFound(ref t))) if t == "views/b.html"
    ));
    assert!(resp.body().is_empty());
}

#[test]
fn test_shared_handler_serves_concurrent_requests() {
    struct Hits(AtomicUsize);
    impl DirectWriteController for Hits {
        fn process(&self, _req: &HttpRequest, resp: &mut HttpResponse) -> Result<(), HandlerError> {
            let n = self.0.fetch_add(1, Ordering::SeqCst);
            resp.write(&n.to_string());
            Ok(())
        }
    }

    let handler = Handler::direct_write(Hits(AtomicUsize::new(0)));
    let dispatcher = Arc::new(
        Dispatcher::builder(RecordingEngine::new())
            .handler("/hits", handler.clone())
            .default_adapters()
            .build(),
    );

    let threads: Vec<_> = (0..8)
        .map(|_| {
            let dispatcher = dispatcher.clone();
            std::thread::spawn(move || {
                for _ in 0..100 {
                    let (result, _) = serve(&dispatcher, "/hits");
                    assert_eq!(result.unwrap(), DispatchOutcome::Skipped);
                }
            })
        })
        .collect();
    for t in threads {
        t.join().unwrap();
    }

    let hits = handler.as_direct_write().unwrap();
    let mut resp = HttpResponse::new();
    hits.process(&HttpRequest::get("/hits"), &mut resp).unwrap();
    assert_eq!(resp.body_text(), "800");
}
